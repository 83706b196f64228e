//! Fill level derived from a raw ADC sample.

/// Container fill level as an integer percentage in `0..=100`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FillLevel(u8);

impl FillLevel {
    pub const EMPTY: Self = Self(0);
    pub const FULL: Self = Self(100);

    /// Build a level directly from a percentage, saturating at 100.
    pub const fn from_percent(percent: u8) -> Self {
        if percent > 100 {
            Self::FULL
        } else {
            Self(percent)
        }
    }

    /// Map a raw sample linearly onto `0..=100`, i.e. `floor(raw / (full_scale / 100))`.
    ///
    /// Samples above `full_scale` saturate at 100. A zero full scale yields
    /// an empty level.
    pub fn from_raw(raw: u16, full_scale: u16) -> Self {
        if full_scale == 0 {
            return Self::EMPTY;
        }
        let raw = u32::from(raw.min(full_scale));
        Self((raw * 100 / u32::from(full_scale)) as u8)
    }

    pub const fn percent(self) -> u8 {
        self.0
    }

    /// Share of the matrix to light, `percent / 100`.
    pub fn fraction(self) -> f32 {
        f32::from(self.0) / 100.0
    }

    /// Number of cells lit out of `total`: `floor(fraction * total)`.
    pub fn lit_cells(self, total: usize) -> usize {
        (usize::from(self.0) * total / 100).min(total)
    }
}
