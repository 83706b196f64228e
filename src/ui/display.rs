//! SSD1306 OLED display wrapper.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use smartbin::config::TextPosition;
use smartbin::traits::StatusDisplay;
use smartbin::{Error, Result};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the SSD1306 display at `address` and clear the screen.
pub fn init<I2C>(i2c: I2C, address: u8) -> Result<Display<I2C>>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new_custom_address(i2c, address);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    display.init().map_err(|_| Error::Display)?;
    display.clear_buffer();
    display.flush().map_err(|_| Error::Display)?;
    Ok(display)
}

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

/// Full-screen status message, redrawn from scratch every cycle.
pub struct StatusScreen<I2C> {
    display: Display<I2C>,
}

impl<I2C> StatusScreen<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    pub fn new(display: Display<I2C>) -> Self {
        Self { display }
    }
}

impl<I2C> StatusDisplay for StatusScreen<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn show(&mut self, message: &str, at: TextPosition) -> Result<()> {
        self.display.clear_buffer();

        Text::with_baseline(message, Point::new(at.x, at.y), text_style(), Baseline::Top)
            .draw(&mut self.display)
            .map_err(|_| Error::Display)?;

        self.display.flush().map_err(|_| Error::Display)
    }
}
