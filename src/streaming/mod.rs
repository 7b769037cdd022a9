//! RMS command service
//!
//! The remote management system sends command batches over TCP and reads
//! back the robot status. One client at a time.

pub mod messages;
pub mod rms_receiver;
pub mod wire;

pub use messages::{ErrorKind, Request, Response};
pub use rms_receiver::{RmsReceiver, SharedRobot, dispatch};
pub use wire::{FrameReader, MAX_FRAME_LEN, read_frame, write_frame};
