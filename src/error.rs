//! Unified error type for smartbin.
//!
//! We avoid `alloc` - all error variants carry no data.
//! Implements `defmt::Format` (behind the `defmt` feature) for efficient
//! on-target logging.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Sensor
    /// The level sensor could not produce a sample this cycle.
    Sensor,

    // LED matrix
    /// The PWM sequencer refused the pixel frame.
    Matrix,

    // Display
    /// I²C transaction to the display failed.
    Display,

    // Generic
    /// Buffer too small for the requested operation.
    BufferOverflow,
}

pub type Result<T> = core::result::Result<T, Error>;

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Error::Sensor => "level sensor read failed",
            Error::Matrix => "LED matrix write failed",
            Error::Display => "display write failed",
            Error::BufferOverflow => "buffer overflow",
        };
        f.write_str(msg)
    }
}
