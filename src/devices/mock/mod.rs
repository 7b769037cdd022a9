//! Mock hardware for hardware-free testing and simulation
//!
//! Two implementations of [`Hardware`]:
//!
//! | Type | Use |
//! |------|-----|
//! | [`MockHardware`] | Scripted sensor readings, records every actuation |
//! | [`RoomSimulator`] | Simulated room with obstacle cells and a draining battery |
//!
//! [`MockHardware`] clones share state, so a test can hand one clone to the
//! robot and keep another to inspect outputs.

pub mod config;
mod room;

pub use config::SimulationConfig;
pub use room::RoomSimulator;

use crate::core::hardware::Hardware;
use crate::core::types::Rotation;
use crate::error::{Error, Result};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Battery level reported when nothing has been scripted
const DEFAULT_BATTERY_PERCENT: i32 = 100;

/// Output written to the mock hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareEvent {
    CleaningSystem(bool),
    RechargeIndicator(bool),
    DriveForward,
    Rotate(Rotation),
}

#[derive(Debug)]
struct MockState {
    obstacle_readings: VecDeque<bool>,
    battery_readings: VecDeque<i32>,
    last_battery: i32,
    cleaning_system: bool,
    recharge_indicator: bool,
    events: Vec<HardwareEvent>,
    pose_resets: usize,
    drive_fault: Option<String>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            obstacle_readings: VecDeque::new(),
            battery_readings: VecDeque::new(),
            last_battery: DEFAULT_BATTERY_PERCENT,
            cleaning_system: false,
            recharge_indicator: false,
            events: Vec::new(),
            pose_resets: 0,
            drive_fault: None,
        }
    }
}

/// Scripted hardware double
///
/// - Obstacle readings are consumed in order; once exhausted the sensor
///   reports clear.
/// - Battery readings are consumed in order; once exhausted the last one
///   keeps being reported (100 if none were scripted).
#[derive(Debug, Clone, Default)]
pub struct MockHardware {
    state: Arc<Mutex<MockState>>,
}

impl MockHardware {
    /// Create mock hardware with a clear sensor and a full battery
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue obstacle sensor readings
    pub fn with_obstacle_readings(self, readings: impl IntoIterator<Item = bool>) -> Self {
        self.state.lock().obstacle_readings.extend(readings);
        self
    }

    /// Queue battery readings
    pub fn with_battery_readings(self, readings: impl IntoIterator<Item = i32>) -> Self {
        self.state.lock().battery_readings.extend(readings);
        self
    }

    /// Make every wheel drive fail with the given message
    pub fn with_drive_fault(self, message: &str) -> Self {
        self.state.lock().drive_fault = Some(message.to_string());
        self
    }

    /// Queue more obstacle readings after construction
    pub fn push_obstacle_readings(&self, readings: impl IntoIterator<Item = bool>) {
        self.state.lock().obstacle_readings.extend(readings);
    }

    /// Queue more battery readings after construction
    pub fn push_battery_readings(&self, readings: impl IntoIterator<Item = i32>) {
        self.state.lock().battery_readings.extend(readings);
    }

    pub fn cleaning_system(&self) -> bool {
        self.state.lock().cleaning_system
    }

    pub fn recharge_indicator(&self) -> bool {
        self.state.lock().recharge_indicator
    }

    /// Outputs written so far, oldest first
    pub fn events(&self) -> Vec<HardwareEvent> {
        self.state.lock().events.clone()
    }

    pub fn clear_events(&self) {
        self.state.lock().events.clear();
    }

    /// Number of wheel drives issued
    pub fn drive_count(&self) -> usize {
        self.state
            .lock()
            .events
            .iter()
            .filter(|e| matches!(e, HardwareEvent::DriveForward))
            .count()
    }

    /// Number of times the robot was re-homed
    pub fn pose_resets(&self) -> usize {
        self.state.lock().pose_resets
    }
}

impl Hardware for MockHardware {
    fn read_obstacle_sensor(&mut self) -> Result<bool> {
        Ok(self
            .state
            .lock()
            .obstacle_readings
            .pop_front()
            .unwrap_or(false))
    }

    fn read_battery_percent(&mut self) -> Result<i32> {
        let mut state = self.state.lock();
        if let Some(next) = state.battery_readings.pop_front() {
            state.last_battery = next;
        }
        Ok(state.last_battery)
    }

    fn set_cleaning_system(&mut self, enabled: bool) -> Result<()> {
        let mut state = self.state.lock();
        state.cleaning_system = enabled;
        state.events.push(HardwareEvent::CleaningSystem(enabled));
        Ok(())
    }

    fn set_recharge_indicator(&mut self, enabled: bool) -> Result<()> {
        let mut state = self.state.lock();
        state.recharge_indicator = enabled;
        state.events.push(HardwareEvent::RechargeIndicator(enabled));
        Ok(())
    }

    fn drive_wheel_forward(&mut self) -> Result<()> {
        let mut state = self.state.lock();
        if let Some(msg) = &state.drive_fault {
            return Err(Error::HardwareFault(msg.clone()));
        }
        state.events.push(HardwareEvent::DriveForward);
        Ok(())
    }

    fn rotate(&mut self, direction: Rotation) -> Result<()> {
        self.state.lock().events.push(HardwareEvent::Rotate(direction));
        Ok(())
    }

    fn reset_pose(&mut self) {
        self.state.lock().pose_resets += 1;
    }
}
