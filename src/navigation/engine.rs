//! Navigation engine
//!
//! Executes atomic actions against the robot's grid state, one at a time and
//! strictly in order. Each action runs to completion before the next one is
//! pulled from the command iterator.
//!
//! # Forward move
//!
//! ```text
//! recharging? ──yes──▶ battery check ──still recharging──▶ no-op
//!     │                      │ recovered
//!     ▼                      ▼
//! obstacle sensor ──blocked──▶ log cell ahead, stay
//!     │ clear
//!     ▼
//! cell ahead in room? ──no──▶ no-op (walls are not logged)
//!     │ yes
//!     ▼
//! drive wheel ──▶ commit move ──▶ battery check
//! ```
//!
//! Turns always succeed and never consult the battery or the sensor.
//!
//! # Failure
//!
//! An invalid command or a hardware fault stops the batch. Actions already
//! applied stay applied.

use super::battery::BatteryController;
use super::obstacles::ObstacleLog;
use super::status::format_status;
use crate::core::hardware::Hardware;
use crate::core::types::{Action, BatteryMode, Facing, Position, RoomSize, Rotation};
use crate::error::Result;

/// Robot pose, obstacle log, and power mode for one mission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotState {
    room: RoomSize,
    position: Position,
    facing: Facing,
    obstacles: ObstacleLog,
    battery: BatteryController,
}

impl RobotState {
    /// Fresh state at (0,0,N) with an empty log
    pub fn new(room: RoomSize) -> Self {
        Self {
            room,
            position: Position::ORIGIN,
            facing: Facing::North,
            obstacles: ObstacleLog::new(),
            battery: BatteryController::new(),
        }
    }

    pub fn room(&self) -> RoomSize {
        self.room
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn obstacles(&self) -> &ObstacleLog {
        &self.obstacles
    }

    pub fn battery_mode(&self) -> BatteryMode {
        self.battery.mode()
    }

    pub fn battery(&self) -> &BatteryController {
        &self.battery
    }
}

/// What a single action did, for logging and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Turned(Facing),
    Moved(Position),
    Blocked(Position),
    HitWall,
    Frozen,
}

/// Owns the [`RobotState`] and applies actions to it
#[derive(Debug, Clone)]
pub struct NavigationEngine {
    state: RobotState,
}

impl NavigationEngine {
    /// Place the robot at the origin and run the initial battery check
    pub fn start<H: Hardware + ?Sized>(room: RoomSize, hardware: &mut H) -> Result<Self> {
        let mut state = RobotState::new(room);
        hardware.reset_pose();
        state.battery.check(hardware)?;
        log::info!(
            "Robot initialized in {}x{} room at ({},{})",
            room.width(),
            room.height(),
            state.position,
            state.facing
        );
        Ok(Self { state })
    }

    pub fn state(&self) -> &RobotState {
        &self.state
    }

    /// Current status string
    pub fn status(&self) -> String {
        format_status(&self.state)
    }

    /// Run a batch of actions until it ends or an action fails
    pub fn execute<H, I>(&mut self, actions: I, hardware: &mut H) -> Result<()>
    where
        H: Hardware + ?Sized,
        I: IntoIterator<Item = Result<Action>>,
    {
        for action in actions {
            let action = action.inspect_err(|e| log::warn!("Batch stopped: {}", e))?;
            let outcome = self
                .step(action, hardware)
                .inspect_err(|e| log::error!("{:?} aborted: {}", action, e))?;
            log::debug!("{:?} -> {:?}", action, outcome);
        }
        Ok(())
    }

    /// Apply a single action
    pub fn step<H: Hardware + ?Sized>(
        &mut self,
        action: Action,
        hardware: &mut H,
    ) -> Result<StepOutcome> {
        match action {
            Action::TurnLeft => self.turn(Rotation::Left, hardware),
            Action::TurnRight => self.turn(Rotation::Right, hardware),
            Action::MoveForward => self.forward(hardware),
        }
    }

    fn turn<H: Hardware + ?Sized>(
        &mut self,
        rotation: Rotation,
        hardware: &mut H,
    ) -> Result<StepOutcome> {
        hardware.rotate(rotation)?;
        self.state.facing = self.state.facing.turned(rotation);
        Ok(StepOutcome::Turned(self.state.facing))
    }

    fn forward<H: Hardware + ?Sized>(&mut self, hardware: &mut H) -> Result<StepOutcome> {
        let state = &mut self.state;

        // Frozen while recharging; only a fresh reading can release it
        if state.battery.mode() == BatteryMode::Recharging
            && state.battery.check(hardware)? == BatteryMode::Recharging
        {
            return Ok(StepOutcome::Frozen);
        }

        let ahead = state.position.step(state.facing);

        if hardware.read_obstacle_sensor()? {
            log::warn!("Obstacle detected at ({})", ahead);
            state.obstacles.append(ahead);
            return Ok(StepOutcome::Blocked(ahead));
        }

        if !state.room.contains(ahead) {
            log::debug!("Wall ahead of ({}), staying put", state.position);
            return Ok(StepOutcome::HitWall);
        }

        // Commit only once the wheel has actually moved
        hardware.drive_wheel_forward()?;
        state.position = ahead;
        state.battery.check(hardware)?;
        Ok(StepOutcome::Moved(ahead))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::mock::{HardwareEvent, MockHardware};
    use crate::error::Error;
    use crate::navigation::command::parse;

    fn engine(room_x: u32, room_y: u32, hw: &mut MockHardware) -> NavigationEngine {
        NavigationEngine::start(RoomSize::new(room_x, room_y).unwrap(), hw).unwrap()
    }

    #[test]
    fn test_start_at_origin() {
        let mut hw = MockHardware::new();
        let nav = engine(5, 5, &mut hw);
        assert_eq!(nav.state().position(), Position::ORIGIN);
        assert_eq!(nav.state().facing(), Facing::North);
        assert!(nav.state().obstacles().is_empty());
        assert_eq!(nav.state().battery_mode(), BatteryMode::Cleaning);
        assert!(hw.cleaning_system());
    }

    #[test]
    fn test_turns_actuate_rotation() {
        let mut hw = MockHardware::new();
        let mut nav = engine(5, 5, &mut hw);
        hw.clear_events();

        assert_eq!(
            nav.step(Action::TurnRight, &mut hw).unwrap(),
            StepOutcome::Turned(Facing::East)
        );
        assert_eq!(
            nav.step(Action::TurnLeft, &mut hw).unwrap(),
            StepOutcome::Turned(Facing::North)
        );
        assert_eq!(
            hw.events(),
            vec![
                HardwareEvent::Rotate(Rotation::Right),
                HardwareEvent::Rotate(Rotation::Left)
            ]
        );
    }

    #[test]
    fn test_move_drives_then_checks_battery() {
        let mut hw = MockHardware::new();
        let mut nav = engine(5, 5, &mut hw);
        hw.clear_events();

        assert_eq!(
            nav.step(Action::MoveForward, &mut hw).unwrap(),
            StepOutcome::Moved(Position::new(0, 1))
        );
        assert_eq!(
            hw.events(),
            vec![
                HardwareEvent::DriveForward,
                HardwareEvent::CleaningSystem(true),
                HardwareEvent::RechargeIndicator(false),
            ]
        );
    }

    #[test]
    fn test_blocked_move_logs_cell_ahead() {
        let mut hw = MockHardware::new().with_obstacle_readings([true]);
        let mut nav = engine(5, 5, &mut hw);

        assert_eq!(
            nav.step(Action::MoveForward, &mut hw).unwrap(),
            StepOutcome::Blocked(Position::new(0, 1))
        );
        assert_eq!(nav.state().position(), Position::ORIGIN);
        assert_eq!(nav.state().obstacles().snapshot(), &[Position::new(0, 1)]);
        assert_eq!(hw.drive_count(), 0);
    }

    #[test]
    fn test_sensed_wall_is_logged_outside_room() {
        // Facing south from the origin the sensor sees the wall itself
        let mut hw = MockHardware::new().with_obstacle_readings([true]);
        let mut nav = engine(3, 3, &mut hw);

        nav.execute(parse("rrf"), &mut hw).unwrap();
        assert_eq!(nav.state().obstacles().snapshot(), &[Position::new(0, -1)]);
    }

    #[test]
    fn test_wall_is_silent() {
        let mut hw = MockHardware::new();
        let mut nav = engine(1, 1, &mut hw);

        for cmd in ["f", "rf", "rf", "rf"] {
            nav.execute(parse(cmd), &mut hw).unwrap();
        }
        assert_eq!(nav.state().position(), Position::ORIGIN);
        assert!(nav.state().obstacles().is_empty());
        assert_eq!(hw.drive_count(), 0);
    }

    #[test]
    fn test_recharging_freezes_forward_but_not_turns() {
        let mut hw = MockHardware::new().with_battery_readings([100, 10]);
        let mut nav = engine(5, 5, &mut hw);

        nav.execute(parse("ffrf"), &mut hw).unwrap();
        assert_eq!(nav.state().position(), Position::new(0, 1));
        assert_eq!(nav.state().facing(), Facing::East);
        assert_eq!(nav.state().battery_mode(), BatteryMode::Recharging);
        assert!(hw.recharge_indicator());
        assert!(!hw.cleaning_system());
        assert_eq!(hw.drive_count(), 1);
    }

    #[test]
    fn test_frozen_forward_does_not_sense() {
        let mut hw = MockHardware::new()
            .with_battery_readings([5])
            .with_obstacle_readings([true]);
        let mut nav = engine(5, 5, &mut hw);

        assert_eq!(
            nav.step(Action::MoveForward, &mut hw).unwrap(),
            StepOutcome::Frozen
        );
        assert!(nav.state().obstacles().is_empty());
    }

    #[test]
    fn test_recovered_battery_releases_freeze() {
        let mut hw = MockHardware::new().with_battery_readings([5, 60]);
        let mut nav = engine(5, 5, &mut hw);
        assert_eq!(nav.state().battery_mode(), BatteryMode::Recharging);

        nav.execute(parse("f"), &mut hw).unwrap();
        assert_eq!(nav.state().position(), Position::new(0, 1));
        assert_eq!(nav.state().battery_mode(), BatteryMode::Cleaning);
    }

    #[test]
    fn test_battery_fault_stops_batch() {
        let mut hw = MockHardware::new().with_battery_readings([90, 90, 150]);
        let mut nav = engine(5, 5, &mut hw);

        let result = nav.execute(parse("fffr"), &mut hw);
        assert!(matches!(result, Err(Error::HardwareFault(_))));
        // Second move committed before its battery check failed
        assert_eq!(nav.state().position(), Position::new(0, 2));
        assert_eq!(nav.state().facing(), Facing::North);
        assert_eq!(hw.drive_count(), 2);
    }

    #[test]
    fn test_invalid_command_keeps_progress() {
        let mut hw = MockHardware::new();
        let mut nav = engine(5, 5, &mut hw);

        let result = nav.execute(parse("frxf"), &mut hw);
        assert!(matches!(
            result,
            Err(Error::InvalidCommand { index: 2, character: 'x' })
        ));
        assert_eq!(nav.state().position(), Position::new(0, 1));
        assert_eq!(nav.state().facing(), Facing::East);
    }

    #[test]
    fn test_start_fault_propagates() {
        let mut hw = MockHardware::new().with_battery_readings([-3]);
        let result = NavigationEngine::start(RoomSize::new(2, 2).unwrap(), &mut hw);
        assert!(matches!(result, Err(Error::HardwareFault(_))));
    }
}
