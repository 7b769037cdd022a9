//! Disha - Grid navigation controller for a robot vacuum
//!
//! Tracks the robot's cell and heading in a rectangular room, runs command
//! batches from the remote management system (RMS), logs obstacles seen by
//! the front infrared sensor, and switches the cleaning system off when the
//! battery runs low.
//!
//! ```no_run
//! use disha::CleaningRobot;
//! use disha::devices::mock::MockHardware;
//!
//! let mut robot = CleaningRobot::new(MockHardware::new());
//! robot.initialize(5, 5)?;
//! assert_eq!(robot.execute_command("ffrf")?, "(1,2,E)");
//! # Ok::<(), disha::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Grid types and the [`Hardware`] trait
//! - [`navigation`]: Command parser, engine, battery controller, status format
//! - [`robot`]: The `initialize` / `execute_command` / `robot_status` facade
//! - [`devices`]: Mock, simulated, and GPIO hardware
//! - [`streaming`]: RMS request/response protocol over TCP

pub mod config;
pub mod core;
pub mod devices;
pub mod error;
pub mod navigation;
pub mod robot;
pub mod streaming;

// Re-export commonly used types
pub use config::Config;
pub use crate::core::hardware::Hardware;
pub use crate::core::types::{Action, BatteryMode, Facing, Position, Rotation};
pub use error::{Error, Result};
pub use robot::CleaningRobot;
