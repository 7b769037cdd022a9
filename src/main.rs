//! Disha - RMS command daemon
//!
//! Listens for one RMS client at a time over TCP and runs its command
//! batches against the configured hardware.

use disha::devices::create_device;
use disha::error::{Error, Result};
use disha::streaming::{RmsReceiver, SharedRobot};
use disha::{CleaningRobot, Config, Hardware};
use parking_lot::Mutex;
use std::env;
use std::net::{Shutdown, TcpListener};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// Config file used when no path is given
const DEFAULT_CONFIG_PATH: &str = "disha.toml";

/// Parse config path from command line arguments.
///
/// Supports:
/// - `disha <path>` (positional)
/// - `disha --config <path>` (flag-based)
/// - `disha -c <path>` (short flag)
fn parse_config_path() -> Option<String> {
    let args: Vec<String> = env::args().collect();

    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }

    if args.len() > 1 && !args[1].starts_with('-') {
        return Some(args[1].clone());
    }

    None
}

fn load_config() -> Result<Config> {
    match parse_config_path() {
        Some(path) => Config::load(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => Config::load(DEFAULT_CONFIG_PATH),
        None => Ok(Config::default()),
    }
}

fn main() -> Result<()> {
    let config = load_config()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    log::info!("Disha v{} starting...", env!("CARGO_PKG_VERSION"));
    log::info!(
        "Device: {} ({})",
        config.device.name,
        config.device.device_type
    );

    let hardware = create_device(&config.device)?;
    let robot: SharedRobot = Arc::new(Mutex::new(CleaningRobot::new(hardware)));

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        r.store(false, Ordering::Relaxed);
    })
    .map_err(|e| Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    let bind_addr = &config.network.bind_address;
    let listener = TcpListener::bind(bind_addr)
        .map_err(|e| Error::Other(format!("Failed to bind to {}: {}", bind_addr, e)))?;
    if let Err(e) = listener.set_nonblocking(true) {
        log::warn!("Failed to set nonblocking mode: {}", e);
    }
    log::info!("RMS listening on {}. Press Ctrl-C to stop.", bind_addr);

    // Only one client at a time so batches never interleave
    let client_active = Arc::new(AtomicBool::new(false));

    while running.load(Ordering::Relaxed) {
        match listener.accept() {
            Ok((stream, addr)) => {
                if client_active.swap(true, Ordering::AcqRel) {
                    log::warn!("Rejecting RMS connection from {}: client already active", addr);
                    let _ = stream.shutdown(Shutdown::Both);
                    continue;
                }
                if let Err(e) = stream.set_nonblocking(false) {
                    log::error!("Failed to set socket to blocking mode: {}", e);
                    client_active.store(false, Ordering::Release);
                    continue;
                }
                log::info!("RMS client connected: {}", addr);

                let receiver = RmsReceiver::new(Arc::clone(&robot), Arc::clone(&running));
                let active = Arc::clone(&client_active);
                let spawned = thread::Builder::new()
                    .name("rms-receiver".to_string())
                    .spawn(move || {
                        if let Err(e) = receiver.run(stream) {
                            log::error!("RMS receiver error: {}", e);
                        }
                        log::info!("RMS client disconnected: {}", addr);
                        active.store(false, Ordering::Release);
                    });
                if let Err(e) = spawned {
                    log::error!("Failed to spawn RMS receiver: {}", e);
                    client_active.store(false, Ordering::Release);
                }
            }
            Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                thread::sleep(Duration::from_millis(10));
            }
            Err(e) => {
                log::error!("Accept error: {}", e);
            }
        }
    }

    log::info!("Shutting down...");
    {
        let mut robot = robot.lock();
        if robot.is_initialized()
            && let Err(e) = robot.hardware_mut().set_cleaning_system(false)
        {
            log::warn!("Failed to stop cleaning system: {}", e);
        }
    }
    log::info!("Disha stopped");
    Ok(())
}
