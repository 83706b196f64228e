//! Green/red status LEDs.
//!
//! The 5×5 matrix goes through `smartbin::matrix::SmartLedMatrix` on top of
//! the `embassy-nrf-ws2812-pwm` driver, set up in `main.rs`.

use embassy_nrf::gpio::Output;
use smartbin::policy::PinStates;
use smartbin::traits::StatusLamps;

/// Green + red active-high LEDs.
pub struct StatusLeds {
    green: Output<'static>,
    red: Output<'static>,
}

impl StatusLeds {
    pub fn new(green: Output<'static>, red: Output<'static>) -> Self {
        Self { green, red }
    }
}

impl StatusLamps for StatusLeds {
    fn apply(&mut self, pins: PinStates) {
        self.green.set_level(pins.green.into());
        self.red.set_level(pins.red.into());
    }
}
