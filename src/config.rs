//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and policy
//! thresholds live here so they can be tuned in one place.
//! Nothing is configurable at runtime.

use crate::clock::ReferenceDate;
use crate::report::ReportFormat;
use smart_leds::RGB8;

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0002;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "smartbin";
pub const USB_PRODUCT: &str = "Smart Bin Level Monitor";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// CDC-ACM bulk endpoint packet size.
pub const USB_SERIAL_PACKET_SIZE: u16 = 64;

/// Upper bound on how long one status line may block the USB writer (ms).
pub const USB_WRITE_TIMEOUT_MS: u64 = 100;

// GPIO pin assignments (Adafruit Feather nRF52840 Express)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your own wiring.
//
//   Level input (pot / joystick) → P0.04 (A0, AIN2)
//   Green status LED             → P0.06 (D11)
//   Red status LED               → P0.08 (D12)
//   WS2812 5×5 matrix data       → P0.07 (D6)
//   Boot button (to GND)         → P1.02 (USER SW)
//   I²C SDA                      → P0.12
//   I²C SCL                      → P0.11

/// Full-scale value of the 12-bit SAADC.
pub const ADC_FULL_SCALE: u16 = 4095;

/// Fixed bin identifier carried in every report.
pub const BIN_ID: &str = "001";

/// Button debounce window (ms).
pub const BUTTON_DEBOUNCE_MS: u32 = 200;

/// Delay between two sampling cycles (ms).
pub const CYCLE_PERIOD_MS: u64 = 500;

/// `GPREGRET` value the Adafruit nRF52 bootloader reads as "stay in UF2 mode".
pub const UF2_DFU_MAGIC: u8 = 0x57;

/// SSD1306 7-bit I²C address.
pub const DISPLAY_ADDRESS: u8 = 0x3C;

/// Lower bounds (inclusive) of the Medium and High urgency bands, in percent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    pub medium: u8,
    pub high: u8,
}

impl Thresholds {
    pub const DEFAULT: Self = Self {
        medium: 50,
        high: 75,
    };
}

/// Top-left corner of the status message on the display, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextPosition {
    pub x: i32,
    pub y: i32,
}

/// Scale a full-on channel down to `percent` of 255, truncating.
pub const fn dim(percent: u8) -> u8 {
    (255 * percent as u16 / 100) as u8
}

/// Everything a monitor cycle needs, built once and shared by reference.
#[derive(Clone, Copy, Debug)]
pub struct MonitorConfig {
    pub bin_id: &'static str,
    pub adc_full_scale: u16,
    pub thresholds: Thresholds,
    pub lit_color: RGB8,
    pub unlit_color: RGB8,
    pub message_position: TextPosition,
    pub display_address: u8,
    pub cycle_period_ms: u64,
    pub debounce_ms: u32,
    pub reference_date: ReferenceDate,
    pub report_format: ReportFormat,
}

impl MonitorConfig {
    pub const DEFAULT: Self = Self {
        bin_id: BIN_ID,
        adc_full_scale: ADC_FULL_SCALE,
        thresholds: Thresholds::DEFAULT,
        lit_color: RGB8 {
            r: dim(10),
            g: dim(10),
            b: dim(10),
        },
        unlit_color: RGB8 { r: 0, g: 0, b: 0 },
        message_position: TextPosition { x: 8, y: 10 },
        display_address: DISPLAY_ADDRESS,
        cycle_period_ms: CYCLE_PERIOD_MS,
        debounce_ms: BUTTON_DEBOUNCE_MS,
        reference_date: ReferenceDate::DEFAULT,
        report_format: ReportFormat::Legacy,
    };
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
