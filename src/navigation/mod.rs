//! Command interpretation and grid navigation.
//!
//! ```text
//! command string ──▶ Commands ──▶ NavigationEngine ──▶ RobotState ──▶ status string
//!                   (per action)       │
//!                                      ├── Hardware (sense / actuate)
//!                                      └── BatteryController
//! ```
//!
//! - [`command`]: Incremental parser for `f`/`l`/`r` command strings
//! - [`engine`]: Per-action state machine and [`RobotState`]
//! - [`battery`]: Threshold-driven cleaning/recharging switch
//! - [`obstacles`]: Append-only log of sensed obstacle cells
//! - [`status`]: `(x,y,dir)(ox,oy)...` wire formatting

pub mod battery;
pub mod command;
pub mod engine;
pub mod obstacles;
pub mod status;

pub use battery::BatteryController;
pub use command::{Commands, parse};
pub use engine::{NavigationEngine, RobotState};
pub use obstacles::ObstacleLog;
pub use status::{StatusReport, format_status, parse_status};
