//! Device implementations

pub mod gpio;
pub mod mock;

use crate::config::DeviceConfig;
use crate::core::hardware::Hardware;
use crate::error::{Error, Result};
use mock::RoomSimulator;

/// Create hardware based on configuration.
///
/// Only `"mock"` is built here. GPIO hardware needs a platform bus, so
/// callers construct [`gpio::GpioHardware`] from `config.pins` themselves.
pub fn create_device(config: &DeviceConfig) -> Result<Box<dyn Hardware>> {
    match config.device_type.as_str() {
        "mock" => {
            log::info!(
                "Simulated {}x{} room with {} obstacle cells",
                config.simulation.width,
                config.simulation.height,
                config.simulation.obstacles.len()
            );
            Ok(Box::new(RoomSimulator::new(config.simulation.clone())))
        }
        _ => Err(Error::UnknownDevice(config.device_type.clone())),
    }
}
