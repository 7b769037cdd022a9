//! Request and response messages exchanged with the RMS.
//!
//! JSON encoded, internally tagged by `type`:
//!
//! ```text
//! → {"type":"Initialize","room_x":5,"room_y":5}
//! ← {"type":"Status","status":"(0,0,N)"}
//! → {"type":"Execute","command":"ffx"}
//! ← {"type":"Error","kind":"invalid_command","message":"...","status":"(0,2,N)"}
//! ```

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Inbound request from the RMS
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Request {
    /// Place the robot at (0,0,N) in a new room
    Initialize { room_x: u32, room_y: u32 },
    /// Run a command batch
    Execute { command: String },
    /// Report status without moving
    Status,
}

/// Failure category reported to the RMS
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidCommand,
    UninitializedRobot,
    HardwareFault,
    InvalidParameter,
    Other,
}

impl From<&Error> for ErrorKind {
    fn from(e: &Error) -> Self {
        match e {
            Error::InvalidCommand { .. } => ErrorKind::InvalidCommand,
            Error::UninitializedRobot => ErrorKind::UninitializedRobot,
            Error::HardwareFault(_) => ErrorKind::HardwareFault,
            Error::InvalidParameter(_) => ErrorKind::InvalidParameter,
            _ => ErrorKind::Other,
        }
    }
}

/// Outbound response to the RMS
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Response {
    /// Status string after the request
    Status { status: String },
    /// Request failed. `status` carries the state left behind, if any.
    Error {
        kind: ErrorKind,
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status: Option<String>,
    },
}

impl Response {
    pub fn error(err: &Error, status: Option<String>) -> Self {
        Response::Error {
            kind: err.into(),
            message: err.to_string(),
            status,
        }
    }
}
