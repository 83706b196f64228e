//! Peripheral seams used by [`crate::monitor::Monitor`].
//!
//! The firmware implements these over embassy-nrf drivers; host tests
//! implement them with recording mocks.

#![allow(async_fn_in_trait)]

use crate::config::TextPosition;
use crate::error::Result;
use crate::matrix::Frame;
use crate::policy::PinStates;
use crate::report::StatusLine;

/// Analog input standing in for the ultrasonic distance sensor.
pub trait LevelSensor {
    /// One raw sample on the sensor's full-scale range.
    async fn sample(&mut self) -> Result<u16>;
}

/// Green/red status LEDs.
pub trait StatusLamps {
    fn apply(&mut self, pins: PinStates);
}

/// Addressable LED matrix.
pub trait PixelMatrix {
    /// Stream every cell of `frame` in order. Returns once the last pixel
    /// has been accepted by the peripheral.
    async fn show(&mut self, frame: &Frame) -> Result<()>;
}

/// Monochrome status display.
pub trait StatusDisplay {
    /// Clear, draw `message` at `at`, flush.
    fn show(&mut self, message: &str, at: TextPosition) -> Result<()>;
}

/// Outlet for the per-cycle status line. Fire-and-forget.
pub trait ReportSink {
    fn emit(&mut self, line: &StatusLine);
}
