//! Configuration for the Disha daemon
//!
//! Loads a TOML file. Every section is optional and falls back to the
//! defaults for the reference board.
//!
//! The daemon only builds the `mock` device. `[device.pins]` is validated on
//! load and consumed by library users that wire a [`GpioBus`] of their own
//! into [`GpioHardware::new`].
//!
//! [`GpioBus`]: crate::devices::gpio::GpioBus
//! [`GpioHardware::new`]: crate::devices::gpio::GpioHardware::new
//!
//! ```toml
//! [device]
//! type = "mock"
//! name = "Simulated room"
//!
//! [device.pins]
//! battery = 11
//! infrared = 15
//!
//! [device.simulation]
//! obstacles = [[0, 2]]
//!
//! [network]
//! bind_address = "0.0.0.0:5557"
//!
//! [logging]
//! level = "debug"
//! ```

use crate::devices::mock::SimulationConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which hardware to drive and how it is wired
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DeviceConfig {
    /// Device type (`"mock"`)
    #[serde(rename = "type", default = "default_device_type")]
    pub device_type: String,

    /// Human-readable device name
    #[serde(default = "default_device_name")]
    pub name: String,

    /// GPIO pin map for [`GpioHardware`](crate::devices::gpio::GpioHardware).
    /// Not used by the `mock` device.
    #[serde(default)]
    pub pins: PinConfig,

    /// Room simulation, used by the `mock` device
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            device_type: default_device_type(),
            name: default_device_name(),
            pins: PinConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

/// Physical (BOARD) pin numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PinConfig {
    /// IBS battery sensor input
    pub battery: u8,
    /// Recharge LED output
    pub recharge_led: u8,
    /// Cleaning system output
    pub cleaning_system: u8,
    /// Infrared obstacle sensor input
    pub infrared: u8,

    // Wheel motor (A channel)
    pub pwma: u8,
    pub ain2: u8,
    pub ain1: u8,

    // Rotation motor (B channel)
    pub bin1: u8,
    pub bin2: u8,
    pub pwmb: u8,

    /// Motor driver standby, shared by both channels
    pub stby: u8,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            battery: 11,
            recharge_led: 12,
            cleaning_system: 13,
            infrared: 15,
            pwma: 16,
            ain2: 18,
            ain1: 22,
            bin1: 29,
            bin2: 31,
            pwmb: 32,
            stby: 33,
        }
    }
}

impl PinConfig {
    /// Pins read by the controller
    pub fn inputs(&self) -> [u8; 2] {
        [self.infrared, self.battery]
    }

    /// Pins driven by the controller
    pub fn outputs(&self) -> [u8; 9] {
        [
            self.recharge_led,
            self.cleaning_system,
            self.pwma,
            self.ain2,
            self.ain1,
            self.pwmb,
            self.bin2,
            self.bin1,
            self.stby,
        ]
    }

    /// Reject maps where two functions share a pin
    pub fn validate(&self) -> Result<()> {
        let mut all: Vec<u8> = self.inputs().into_iter().chain(self.outputs()).collect();
        all.sort_unstable();
        if let Some(pair) = all.windows(2).find(|w| w[0] == w[1]) {
            return Err(Error::Config(format!("pin {} assigned twice", pair[0])));
        }
        Ok(())
    }
}

/// RMS command service settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// TCP bind address for RMS commands
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default log level when `RUST_LOG` is unset (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_device_type() -> String {
    "mock".to_string()
}
fn default_device_name() -> String {
    "Simulated room".to_string()
}
fn default_bind_address() -> String {
    "0.0.0.0:5557".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let config: Config = toml::from_str(&content)?;
        config.device.pins.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
