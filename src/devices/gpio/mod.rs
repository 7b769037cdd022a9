//! GPIO pin-mapped hardware
//!
//! Drives the robot through a dual H-bridge motor driver and a handful of
//! digital pins. The pin numbers come from [`PinConfig`] so a board revision
//! only needs a config change.
//!
//! # Motor driver sequence
//!
//! ```text
//! wheel (A channel):    AIN1=H AIN2=L PWMA=H STBY=H  → all low
//! rotate left (B):      BIN1=H BIN2=L PWMB=H STBY=H  → all low
//! rotate right (B):     BIN1=L BIN2=H PWMB=H STBY=H  → all low
//! ```
//!
//! Waiting for the motor to finish a cell or a quarter turn is the bus
//! implementation's job.

mod memory;

pub use memory::MemoryBus;

use crate::config::PinConfig;
use crate::core::hardware::Hardware;
use crate::core::types::Rotation;
use crate::error::{Error, Result};

/// Digital output level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinLevel {
    Low,
    High,
}

impl From<bool> for PinLevel {
    fn from(high: bool) -> Self {
        if high { PinLevel::High } else { PinLevel::Low }
    }
}

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Input,
    Output,
}

/// Raw access to the board's pins (physical BOARD numbering)
pub trait GpioBus: Send {
    fn setup(&mut self, pin: u8, mode: PinMode) -> Result<()>;

    fn output(&mut self, pin: u8, level: PinLevel) -> Result<()>;

    /// Raw input value. Digital pins read 0 or 1; the IBS pin reads the
    /// charge percentage.
    fn input(&mut self, pin: u8) -> Result<i32>;
}

/// [`Hardware`] on top of a [`GpioBus`]
pub struct GpioHardware<B: GpioBus> {
    bus: B,
    pins: PinConfig,
}

impl<B: GpioBus> GpioHardware<B> {
    /// Configure pin directions and park every output low
    pub fn new(mut bus: B, pins: PinConfig) -> Result<Self> {
        for pin in pins.inputs() {
            bus.setup(pin, PinMode::Input)?;
        }
        for pin in pins.outputs() {
            bus.setup(pin, PinMode::Output)?;
            bus.output(pin, PinLevel::Low)?;
        }
        log::info!(
            "GPIO configured: {} inputs, {} outputs",
            pins.inputs().len(),
            pins.outputs().len()
        );
        Ok(Self { bus, pins })
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn pins(&self) -> &PinConfig {
        &self.pins
    }

    /// Pulse one motor channel: direction, speed, standby, then stop
    fn pulse(&mut self, in1: (u8, PinLevel), in2: (u8, PinLevel), pwm: u8) -> Result<()> {
        let stby = self.pins.stby;
        self.bus.output(in1.0, in1.1)?;
        self.bus.output(in2.0, in2.1)?;
        self.bus.output(pwm, PinLevel::High)?;
        self.bus.output(stby, PinLevel::High)?;

        for pin in [in1.0, in2.0, pwm, stby] {
            self.bus.output(pin, PinLevel::Low)?;
        }
        Ok(())
    }
}

impl<B: GpioBus> Hardware for GpioHardware<B> {
    fn read_obstacle_sensor(&mut self) -> Result<bool> {
        match self.bus.input(self.pins.infrared)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(Error::HardwareFault(format!(
                "infrared pin {} read {}",
                self.pins.infrared, other
            ))),
        }
    }

    fn read_battery_percent(&mut self) -> Result<i32> {
        self.bus.input(self.pins.battery)
    }

    fn set_cleaning_system(&mut self, enabled: bool) -> Result<()> {
        self.bus.output(self.pins.cleaning_system, enabled.into())
    }

    fn set_recharge_indicator(&mut self, enabled: bool) -> Result<()> {
        self.bus.output(self.pins.recharge_led, enabled.into())
    }

    fn drive_wheel_forward(&mut self) -> Result<()> {
        let (ain1, ain2, pwma) = (self.pins.ain1, self.pins.ain2, self.pins.pwma);
        self.pulse((ain1, PinLevel::High), (ain2, PinLevel::Low), pwma)
    }

    fn rotate(&mut self, direction: Rotation) -> Result<()> {
        let (bin1, bin2, pwmb) = (self.pins.bin1, self.pins.bin2, self.pins.pwmb);
        let (l1, l2) = match direction {
            Rotation::Left => (PinLevel::High, PinLevel::Low),
            Rotation::Right => (PinLevel::Low, PinLevel::High),
        };
        self.pulse((bin1, l1), (bin2, l2), pwmb)
    }
}
