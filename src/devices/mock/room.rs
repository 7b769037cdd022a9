//! Simulated room
//!
//! Tracks the robot's pose from the actuation calls it receives, the same
//! way the physics loop integrates wheel commands. The infrared sensor
//! looks one cell ahead of that pose.

use super::config::SimulationConfig;
use crate::core::hardware::Hardware;
use crate::core::types::{Facing, Position, Rotation};
use crate::error::Result;
use std::collections::HashSet;

/// Hardware backed by a simulated grid room
#[derive(Debug, Clone)]
pub struct RoomSimulator {
    config: SimulationConfig,
    obstacles: HashSet<Position>,
    position: Position,
    facing: Facing,
    battery: f32,
    cleaning_system: bool,
    recharge_indicator: bool,
}

impl RoomSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        let obstacles = config
            .obstacles
            .iter()
            .map(|[x, y]| Position::new(*x, *y))
            .collect();
        Self {
            battery: config.battery_percent,
            config,
            obstacles,
            position: Position::ORIGIN,
            facing: Facing::North,
            cleaning_system: false,
            recharge_indicator: false,
        }
    }

    /// Simulated pose
    pub fn pose(&self) -> (Position, Facing) {
        (self.position, self.facing)
    }

    pub fn battery(&self) -> f32 {
        self.battery
    }

    pub fn cleaning_system(&self) -> bool {
        self.cleaning_system
    }

    pub fn recharge_indicator(&self) -> bool {
        self.recharge_indicator
    }

    fn inside(&self, cell: Position) -> bool {
        (0..self.config.width).contains(&cell.x) && (0..self.config.height).contains(&cell.y)
    }

    fn log_change(&self, name: &str, old: bool, new: bool) {
        if self.config.log_actuators && old != new {
            log::info!("Actuator '{}': {} -> {}", name, on_off(old), on_off(new));
        }
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

impl Hardware for RoomSimulator {
    fn read_obstacle_sensor(&mut self) -> Result<bool> {
        let ahead = self.position.step(self.facing);
        Ok(self.obstacles.contains(&ahead) || (self.config.sense_walls && !self.inside(ahead)))
    }

    fn read_battery_percent(&mut self) -> Result<i32> {
        if self.recharge_indicator {
            self.battery = (self.battery + self.config.charge_per_read).min(100.0);
        }
        Ok(self.battery.round() as i32)
    }

    fn set_cleaning_system(&mut self, enabled: bool) -> Result<()> {
        self.log_change("cleaning_system", self.cleaning_system, enabled);
        self.cleaning_system = enabled;
        Ok(())
    }

    fn set_recharge_indicator(&mut self, enabled: bool) -> Result<()> {
        self.log_change("recharge_led", self.recharge_indicator, enabled);
        self.recharge_indicator = enabled;
        Ok(())
    }

    fn drive_wheel_forward(&mut self) -> Result<()> {
        self.position = self.position.step(self.facing);
        self.battery = (self.battery - self.config.drain_per_move).max(0.0);
        log::trace!("Sim pose ({},{})", self.position, self.facing);
        Ok(())
    }

    fn rotate(&mut self, direction: Rotation) -> Result<()> {
        self.facing = self.facing.turned(direction);
        Ok(())
    }

    fn reset_pose(&mut self) {
        self.position = Position::ORIGIN;
        self.facing = Facing::North;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim(obstacles: Vec<[i32; 2]>) -> RoomSimulator {
        RoomSimulator::new(SimulationConfig {
            width: 3,
            height: 3,
            obstacles,
            log_actuators: false,
            ..Default::default()
        })
    }

    #[test]
    fn test_sensor_sees_obstacle_ahead() {
        let mut room = sim(vec![[0, 1]]);
        assert!(room.read_obstacle_sensor().unwrap());
        room.rotate(Rotation::Right).unwrap();
        assert!(!room.read_obstacle_sensor().unwrap());
    }

    #[test]
    fn test_walls_only_when_enabled() {
        let mut room = sim(vec![]);
        room.rotate(Rotation::Left).unwrap();
        assert!(!room.read_obstacle_sensor().unwrap());

        room.config.sense_walls = true;
        assert!(room.read_obstacle_sensor().unwrap());
    }

    #[test]
    fn test_drive_drains_battery() {
        let mut room = sim(vec![]);
        room.config.drain_per_move = 30.0;
        room.drive_wheel_forward().unwrap();
        room.drive_wheel_forward().unwrap();
        assert_eq!(room.pose(), (Position::new(0, 2), Facing::North));
        assert_eq!(room.read_battery_percent().unwrap(), 40);

        for _ in 0..5 {
            room.drive_wheel_forward().unwrap();
        }
        assert_eq!(room.read_battery_percent().unwrap(), 0);
    }

    #[test]
    fn test_charges_while_recharge_led_on() {
        let mut room = sim(vec![]);
        room.battery = 8.0;
        room.config.charge_per_read = 5.0;
        assert_eq!(room.read_battery_percent().unwrap(), 8);
        room.set_recharge_indicator(true).unwrap();
        assert_eq!(room.read_battery_percent().unwrap(), 13);
    }

    #[test]
    fn test_reset_pose() {
        let mut room = sim(vec![]);
        room.drive_wheel_forward().unwrap();
        room.rotate(Rotation::Right).unwrap();
        room.reset_pose();
        assert_eq!(room.pose(), (Position::ORIGIN, Facing::North));
    }
}
