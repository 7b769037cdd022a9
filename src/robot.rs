//! Cleaning robot facade
//!
//! The three operations the remote management system calls. Holds the
//! hardware and, once initialized, the navigation engine that owns the
//! robot state.

use crate::core::hardware::Hardware;
use crate::core::types::RoomSize;
use crate::error::{Error, Result};
use crate::navigation::{NavigationEngine, RobotState, parse};

/// Grid-navigating cleaning robot on top of some [`Hardware`]
pub struct CleaningRobot<H: Hardware> {
    hardware: H,
    engine: Option<NavigationEngine>,
}

impl<H: Hardware> CleaningRobot<H> {
    /// Wrap hardware. The robot must be initialized before use.
    pub fn new(hardware: H) -> Self {
        Self {
            hardware,
            engine: None,
        }
    }

    /// Reset to (0,0,N) in a `room_x × room_y` room and check the battery.
    ///
    /// On failure the robot is left uninitialized.
    pub fn initialize(&mut self, room_x: u32, room_y: u32) -> Result<()> {
        self.engine = None;
        let room = RoomSize::new(room_x, room_y)?;
        self.engine = Some(NavigationEngine::start(room, &mut self.hardware)?);
        Ok(())
    }

    /// Run a command batch and return the resulting status.
    ///
    /// On error, actions before the failing one stay applied and can be
    /// observed through [`robot_status`](Self::robot_status).
    pub fn execute_command(&mut self, command: &str) -> Result<String> {
        let engine = self.engine.as_mut().ok_or(Error::UninitializedRobot)?;
        log::debug!("Executing batch {:?}", command);
        engine.execute(parse(command), &mut self.hardware)?;
        Ok(engine.status())
    }

    /// Current status without side effects
    pub fn robot_status(&self) -> Result<String> {
        self.engine
            .as_ref()
            .map(NavigationEngine::status)
            .ok_or(Error::UninitializedRobot)
    }

    /// Robot state, `None` before initialization
    pub fn state(&self) -> Option<&RobotState> {
        self.engine.as_ref().map(NavigationEngine::state)
    }

    pub fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }

    pub fn hardware(&self) -> &H {
        &self.hardware
    }

    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hardware
    }
}
