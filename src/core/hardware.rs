//! Hardware trait definition

use crate::core::types::Rotation;
use crate::error::Result;

/// Capability set the navigation engine needs from the robot.
///
/// Calls are blocking and return once the hardware has acted. Actuation
/// timing belongs to the implementation and is invisible to the engine.
pub trait Hardware: Send {
    /// Whether the front infrared sensor sees something in the next cell
    fn read_obstacle_sensor(&mut self) -> Result<bool>;

    /// Battery charge reported by the IBS, expected in 0..=100
    fn read_battery_percent(&mut self) -> Result<i32>;

    /// Switch the cleaning system (vacuum + brushes) on or off
    fn set_cleaning_system(&mut self, enabled: bool) -> Result<()>;

    /// Switch the recharge LED on or off
    fn set_recharge_indicator(&mut self, enabled: bool) -> Result<()>;

    /// Drive the wheel motor forward by one cell
    fn drive_wheel_forward(&mut self) -> Result<()>;

    /// Rotate the body 90° in place
    fn rotate(&mut self, direction: Rotation) -> Result<()>;

    /// Robot was placed back at the origin facing north.
    ///
    /// Real hardware has nothing to do here; simulators re-home their pose.
    fn reset_pose(&mut self) {}
}

impl<H: Hardware + ?Sized> Hardware for Box<H> {
    fn read_obstacle_sensor(&mut self) -> Result<bool> {
        (**self).read_obstacle_sensor()
    }

    fn read_battery_percent(&mut self) -> Result<i32> {
        (**self).read_battery_percent()
    }

    fn set_cleaning_system(&mut self, enabled: bool) -> Result<()> {
        (**self).set_cleaning_system(enabled)
    }

    fn set_recharge_indicator(&mut self, enabled: bool) -> Result<()> {
        (**self).set_recharge_indicator(enabled)
    }

    fn drive_wheel_forward(&mut self) -> Result<()> {
        (**self).drive_wheel_forward()
    }

    fn rotate(&mut self, direction: Rotation) -> Result<()> {
        (**self).rotate(direction)
    }

    fn reset_pose(&mut self) {
        (**self).reset_pose()
    }
}
