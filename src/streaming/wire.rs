//! Length-prefixed JSON framing
//!
//! ```text
//! ┌──────────────────┬──────────────────────────┐
//! │ Length (4 bytes) │ Payload (variable)       │
//! │ Big-endian u32   │ JSON                     │
//! └──────────────────┴──────────────────────────┘
//! ```
//!
//! Frames larger than [`MAX_FRAME_LEN`] are rejected and the connection
//! should be closed.
//!
//! [`read_frame`] suits blocking readers. Readers with a timeout go through
//! [`FrameReader`], which keeps partial frames across timeouts.

use crate::error::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::{ErrorKind, Read, Write};

/// Maximum payload size (1MB)
pub const MAX_FRAME_LEN: usize = 1024 * 1024;

/// Serialize `msg` and write it as one frame
pub fn write_frame<W: Write, T: Serialize>(writer: &mut W, msg: &T) -> Result<()> {
    let payload = serde_json::to_vec(msg)?;
    if payload.len() > MAX_FRAME_LEN {
        return Err(Error::Other(format!(
            "Message too large: {} bytes",
            payload.len()
        )));
    }
    let mut buffer = Vec::with_capacity(4 + payload.len());
    buffer.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    buffer.extend_from_slice(&payload);
    writer.write_all(&buffer)?;
    writer.flush()?;
    Ok(())
}

/// Read one frame from a blocking reader.
///
/// Returns `Ok(None)` when the peer closed the connection cleanly between
/// frames. A timeout partway through a frame loses the bytes already read,
/// so use [`FrameReader`] when the reader has a timeout.
pub fn read_frame<R: Read, T: DeserializeOwned>(reader: &mut R) -> Result<Option<T>> {
    let mut len_buf = [0u8; 4];
    match reader.read_exact(&mut len_buf) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(Error::Io(e)),
    }

    let len = u32::from_be_bytes(len_buf) as usize;
    if len > MAX_FRAME_LEN {
        return Err(Error::Other(format!("Message too large: {} bytes", len)));
    }

    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload)?;
    Ok(Some(serde_json::from_slice(&payload)?))
}

/// Incremental frame decoder for readers with a timeout.
///
/// Bytes are buffered until a whole frame is available. A `WouldBlock` or
/// `TimedOut` error is returned to the caller with the partial frame kept,
/// and the next call resumes where the last one stopped.
#[derive(Debug, Default)]
pub struct FrameReader {
    buf: Vec<u8>,
}

impl FrameReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes of an incomplete frame held from earlier reads
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Read until one frame is complete.
    ///
    /// Returns `Ok(None)` on a clean EOF between frames. EOF inside a frame
    /// is an `UnexpectedEof` I/O error. A frame whose payload fails to parse
    /// is consumed whole, so the stream stays in sync.
    pub fn read_frame<R: Read, T: DeserializeOwned>(
        &mut self,
        reader: &mut R,
    ) -> Result<Option<T>> {
        let mut chunk = [0u8; 4096];
        loop {
            if let Some(payload) = self.take_frame()? {
                return Ok(Some(serde_json::from_slice(&payload)?));
            }

            match reader.read(&mut chunk) {
                Ok(0) if self.buf.is_empty() => return Ok(None),
                Ok(0) => {
                    let msg = format!("connection closed inside a frame ({} bytes)", self.buf.len());
                    return Err(Error::Io(std::io::Error::new(ErrorKind::UnexpectedEof, msg)));
                }
                Ok(n) => self.buf.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(Error::Io(e)),
            }
        }
    }

    /// Pop the first complete frame's payload off the buffer
    fn take_frame(&mut self) -> Result<Option<Vec<u8>>> {
        let Some(len_buf) = self.buf.first_chunk::<4>() else {
            return Ok(None);
        };
        let len = u32::from_be_bytes(*len_buf) as usize;
        if len > MAX_FRAME_LEN {
            return Err(Error::Other(format!("Message too large: {} bytes", len)));
        }
        if self.buf.len() < 4 + len {
            return Ok(None);
        }
        let payload = self.buf[4..4 + len].to_vec();
        self.buf.drain(..4 + len);
        Ok(Some(payload))
    }
}
