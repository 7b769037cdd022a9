//! RMS command receiver
//!
//! Serves one RMS connection: reads a framed [`Request`], runs it against
//! the shared robot, and writes back a framed [`Response`].
//!
//! # Connection lifecycle
//!
//! ```text
//! 1. RMS connects to the bind address
//! 2. Daemon spawns an RmsReceiver thread for the connection
//! 3. Request/response loop until EOF or shutdown
//! 4. Second clients are refused while one is connected
//! ```
//!
//! A read timeout lets the loop notice the global shutdown flag while the
//! client is idle. Bytes of a frame that straddles a timeout stay buffered
//! in a [`FrameReader`] until the rest arrives.

use crate::core::hardware::Hardware;
use crate::error::{Error, Result};
use crate::robot::CleaningRobot;
use crate::streaming::messages::{Request, Response};
use crate::streaming::wire::{FrameReader, write_frame};
use parking_lot::Mutex;
use std::io::{ErrorKind, Read, Write};
use std::net::TcpStream;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Robot shared between the accept loop and the receiver thread
pub type SharedRobot = Arc<Mutex<CleaningRobot<Box<dyn Hardware>>>>;

/// Poll interval for the shutdown flag while the client is idle
const READ_TIMEOUT: Duration = Duration::from_millis(500);

/// Run one request against the robot
pub fn dispatch<H: Hardware>(robot: &mut CleaningRobot<H>, request: Request) -> Response {
    let result = match request {
        Request::Initialize { room_x, room_y } => robot
            .initialize(room_x, room_y)
            .and_then(|()| robot.robot_status()),
        Request::Execute { command } => robot.execute_command(&command),
        Request::Status => robot.robot_status(),
    };

    match result {
        Ok(status) => Response::Status { status },
        Err(e) => {
            log::warn!("Request failed: {}", e);
            Response::error(&e, robot.robot_status().ok())
        }
    }
}

/// Request/response loop for one client
pub struct RmsReceiver {
    robot: SharedRobot,
    /// Global running flag (daemon shutdown)
    running: Arc<AtomicBool>,
}

impl RmsReceiver {
    pub fn new(robot: SharedRobot, running: Arc<AtomicBool>) -> Self {
        Self { robot, running }
    }

    /// Serve a TCP client until it disconnects or the daemon stops
    pub fn run(&self, mut stream: TcpStream) -> Result<()> {
        log::info!("RMS receiver started for client: {:?}", stream.peer_addr());
        if let Err(e) = stream.set_read_timeout(Some(READ_TIMEOUT)) {
            log::warn!("Failed to set read timeout: {}", e);
        }

        let result = self.serve(&mut stream);
        let _ = stream.shutdown(std::net::Shutdown::Both);
        log::info!("RMS receiver stopped");
        result
    }

    /// Serve any byte stream until EOF or shutdown
    pub fn serve<S: Read + Write>(&self, stream: &mut S) -> Result<()> {
        let mut frames = FrameReader::new();
        while self.running.load(Ordering::Relaxed) {
            let request: Request = match frames.read_frame(stream) {
                Ok(Some(req)) => req,
                Ok(None) => {
                    log::info!("Client disconnected");
                    return Ok(());
                }
                Err(Error::Io(ref e))
                    if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut =>
                {
                    continue;
                }
                Err(Error::Io(ref e)) if e.kind() == ErrorKind::ConnectionReset => {
                    log::info!("Client disconnected");
                    return Ok(());
                }
                Err(Error::Serialization(msg)) => {
                    // Frame was complete, so the stream is still in sync
                    log::warn!("Discarding malformed request: {}", msg);
                    write_frame(
                        stream,
                        &Response::error(&Error::Serialization(msg), None),
                    )?;
                    continue;
                }
                Err(e) => {
                    log::error!("Failed to read request: {}", e);
                    return Err(e);
                }
            };

            log::info!("Received request: {:?}", request);
            let response = {
                let mut robot = self.robot.lock();
                dispatch(&mut *robot, request)
            };
            log::debug!("Response: {:?}", response);
            write_frame(stream, &response)?;
        }

        log::debug!("Running flag cleared, exiting");
        Ok(())
    }
}
