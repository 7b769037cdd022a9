//! Battery management
//!
//! Reads the IBS charge level and switches between cleaning and recharging.
//! At or below [`RECHARGE_THRESHOLD_PERCENT`] the recharge LED is turned on
//! and the cleaning system is shut off. Above it, the reverse.

use crate::core::hardware::Hardware;
use crate::core::types::{BatteryMode, RECHARGE_THRESHOLD_PERCENT};
use crate::error::{Error, Result};

/// Valid range for IBS readings
const PERCENT_RANGE: std::ops::RangeInclusive<i32> = 0..=100;

/// Two-mode power state machine driven by battery readings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatteryController {
    mode: BatteryMode,
    last_percent: Option<i32>,
}

impl BatteryController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current power mode
    pub fn mode(&self) -> BatteryMode {
        self.mode
    }

    /// Last valid reading, `None` before the first check
    pub fn last_percent(&self) -> Option<i32> {
        self.last_percent
    }

    /// Read the battery and assert the matching outputs.
    ///
    /// A reading outside 0..=100 leaves the mode untouched and returns
    /// [`Error::HardwareFault`].
    pub fn check<H: Hardware + ?Sized>(&mut self, hardware: &mut H) -> Result<BatteryMode> {
        let percent = hardware.read_battery_percent()?;
        if !PERCENT_RANGE.contains(&percent) {
            log::error!("Battery reading out of range: {}%", percent);
            return Err(Error::HardwareFault(format!(
                "battery percentage {} outside 0..=100",
                percent
            )));
        }

        let mode = BatteryMode::from_percent(percent);
        match mode {
            BatteryMode::Recharging => {
                hardware.set_recharge_indicator(true)?;
                hardware.set_cleaning_system(false)?;
            }
            BatteryMode::Cleaning => {
                hardware.set_cleaning_system(true)?;
                hardware.set_recharge_indicator(false)?;
            }
        }

        if self.mode != mode || self.last_percent.is_none() {
            log::info!(
                "Battery {}% (threshold {}%): {:?} -> {:?}",
                percent,
                RECHARGE_THRESHOLD_PERCENT,
                self.mode,
                mode
            );
        } else {
            log::debug!("Battery {}%: {:?}", percent, mode);
        }

        self.mode = mode;
        self.last_percent = Some(percent);
        Ok(mode)
    }
}
