//! User interface subsystem - OLED status display + boot button.
//!
//! ## Components
//!
//! - **Display**: SSD1306 128×64 OLED via I²C, one status line per cycle
//! - **Buttons**: one tactile switch that reboots into the UF2 bootloader

pub mod buttons;
pub mod display;
