//! Collection-urgency policy: fill level → status LEDs + display message.
//!
//! | Level     | Urgency | Message          | Green | Red |
//! |-----------|---------|------------------|-------|-----|
//! | `[0,50)`  | Low     | `NAO COLETAR`    | on    | off |
//! | `[50,75)` | Medium  | `COLETAR TALVEZ` | on    | on  |
//! | `[75,100]`| High    | `COLETAR`        | off   | on  |

use crate::config::Thresholds;
use crate::level::FillLevel;

/// How urgently the bin needs collecting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Urgency {
    Low,
    Medium,
    High,
}

/// Levels of the two active-high status LEDs (green + red reads as amber).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinStates {
    pub green: bool,
    pub red: bool,
}

impl Urgency {
    /// Text shown on the display for this urgency.
    pub const fn message(self) -> &'static str {
        match self {
            Urgency::Low => "NAO COLETAR",
            Urgency::Medium => "COLETAR TALVEZ",
            Urgency::High => "COLETAR",
        }
    }

    pub const fn pins(self) -> PinStates {
        match self {
            Urgency::Low => PinStates {
                green: true,
                red: false,
            },
            Urgency::Medium => PinStates {
                green: true,
                red: true,
            },
            Urgency::High => PinStates {
                green: false,
                red: true,
            },
        }
    }
}

/// Everything the renderers need to show for one level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Verdict {
    pub urgency: Urgency,
    pub message: &'static str,
    pub pins: PinStates,
}

/// Classify a level; lower bounds are inclusive.
pub fn classify(level: FillLevel, thresholds: &Thresholds) -> Urgency {
    let percent = level.percent();
    if percent < thresholds.medium {
        Urgency::Low
    } else if percent < thresholds.high {
        Urgency::Medium
    } else {
        Urgency::High
    }
}

pub fn decide(level: FillLevel, thresholds: &Thresholds) -> Verdict {
    let urgency = classify(level, thresholds);
    Verdict {
        urgency,
        message: urgency.message(),
        pins: urgency.pins(),
    }
}
