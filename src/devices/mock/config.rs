//! Room simulation configuration
//!
//! Every parameter has a default, so an empty `[device.simulation]` table
//! gives a clear 10×10 room with a full battery.
//!
//! ```toml
//! [device.simulation]
//! width = 6
//! height = 4
//! obstacles = [[1, 2], [3, 3]]
//! battery_percent = 40.0
//! drain_per_move = 2.5
//! charge_per_read = 5.0
//! sense_walls = false
//! log_actuators = true
//! ```

use serde::{Deserialize, Serialize};

/// Simulated room and battery parameters
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Physical room width in cells
    #[serde(default = "default_room_size")]
    pub width: i32,

    /// Physical room height in cells
    #[serde(default = "default_room_size")]
    pub height: i32,

    /// Occupied cells as `[x, y]`
    #[serde(default)]
    pub obstacles: Vec<[i32; 2]>,

    /// Starting battery charge (0-100)
    #[serde(default = "default_battery_percent")]
    pub battery_percent: f32,

    /// Charge lost per wheel drive
    #[serde(default = "default_drain_per_move")]
    pub drain_per_move: f32,

    /// Charge gained per battery read while the recharge LED is on
    #[serde(default)]
    pub charge_per_read: f32,

    /// Whether the infrared sensor also reports the room walls
    #[serde(default)]
    pub sense_walls: bool,

    /// Log actuator state changes
    #[serde(default = "default_log_actuators")]
    pub log_actuators: bool,
}

fn default_room_size() -> i32 {
    10
}
fn default_battery_percent() -> f32 {
    100.0
}
fn default_drain_per_move() -> f32 {
    1.0
}
fn default_log_actuators() -> bool {
    true
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: default_room_size(),
            height: default_room_size(),
            obstacles: Vec::new(),
            battery_percent: default_battery_percent(),
            drain_per_move: default_drain_per_move(),
            charge_per_read: 0.0,
            sense_walls: false,
            log_actuators: default_log_actuators(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_uses_defaults() {
        let config: SimulationConfig = toml::from_str("").unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_obstacle_list() {
        let config: SimulationConfig = toml::from_str(
            r#"
obstacles = [[1, 2], [3, 3]]
drain_per_move = 2.5
"#,
        )
        .unwrap();
        assert_eq!(config.obstacles, vec![[1, 2], [3, 3]]);
        assert_eq!(config.drain_per_move, 2.5);
        assert_eq!(config.width, 10);
    }
}
