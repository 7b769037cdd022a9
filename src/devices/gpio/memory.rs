//! In-memory GPIO bus
//!
//! Records every write and serves input values set by the caller. Reading
//! an input that was never set returns 0.

use super::{GpioBus, PinLevel, PinMode};
use crate::error::{Error, Result};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct MemoryBus {
    modes: HashMap<u8, PinMode>,
    levels: HashMap<u8, PinLevel>,
    inputs: HashMap<u8, i32>,
    writes: Vec<(u8, PinLevel)>,
}

impl MemoryBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value the next reads of `pin` return
    pub fn set_input(&mut self, pin: u8, value: i32) {
        self.inputs.insert(pin, value);
    }

    pub fn mode(&self, pin: u8) -> Option<PinMode> {
        self.modes.get(&pin).copied()
    }

    /// Last level written to `pin`
    pub fn level(&self, pin: u8) -> Option<PinLevel> {
        self.levels.get(&pin).copied()
    }

    /// Every write in order
    pub fn writes(&self) -> &[(u8, PinLevel)] {
        &self.writes
    }

    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }
}

impl GpioBus for MemoryBus {
    fn setup(&mut self, pin: u8, mode: PinMode) -> Result<()> {
        self.modes.insert(pin, mode);
        Ok(())
    }

    fn output(&mut self, pin: u8, level: PinLevel) -> Result<()> {
        match self.modes.get(&pin) {
            Some(PinMode::Output) => {
                self.levels.insert(pin, level);
                self.writes.push((pin, level));
                Ok(())
            }
            _ => Err(Error::InvalidParameter(format!(
                "pin {} is not configured as output",
                pin
            ))),
        }
    }

    fn input(&mut self, pin: u8) -> Result<i32> {
        match self.modes.get(&pin) {
            Some(PinMode::Input) => Ok(self.inputs.get(&pin).copied().unwrap_or(0)),
            _ => Err(Error::InvalidParameter(format!(
                "pin {} is not configured as input",
                pin
            ))),
        }
    }
}
