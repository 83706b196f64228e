//! One sampling → render → report cycle.
//!
//! Order inside a cycle is fixed: sample, compute, matrix, status LEDs,
//! display, report. Level, verdict and frame all derive from the same
//! sample, so the peripherals never disagree. Pacing between cycles is
//! left to the caller.

use crate::clock::Timestamp;
use crate::config::MonitorConfig;
use crate::error::Result;
use crate::level::FillLevel;
use crate::matrix::{Frame, MATRIX_CELLS};
use crate::policy::{self, Verdict};
use crate::report::StatusReport;
use crate::traits::{LevelSensor, PixelMatrix, ReportSink, StatusDisplay, StatusLamps};

/// What a cycle sampled and rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    /// Raw sample, or `None` when the read failed and the previous level
    /// was reused.
    pub raw: Option<u16>,
    pub level: FillLevel,
    pub verdict: Verdict,
    pub lit_cells: usize,
}

pub struct Monitor<'c, S, L, M, D, R> {
    config: &'c MonitorConfig,
    sensor: S,
    lamps: L,
    matrix: M,
    display: D,
    reports: R,
    last_level: FillLevel,
}

impl<'c, S, L, M, D, R> Monitor<'c, S, L, M, D, R>
where
    S: LevelSensor,
    L: StatusLamps,
    M: PixelMatrix,
    D: StatusDisplay,
    R: ReportSink,
{
    pub fn new(
        config: &'c MonitorConfig,
        sensor: S,
        lamps: L,
        matrix: M,
        display: D,
        reports: R,
    ) -> Self {
        Self {
            config,
            sensor,
            lamps,
            matrix,
            display,
            reports,
            last_level: FillLevel::EMPTY,
        }
    }

    /// Run one cycle. `elapsed_secs` is uptime and feeds the report timestamp.
    ///
    /// A failed sensor read reuses the last level (empty before the first
    /// good read). Matrix, display and report formatting errors abort the
    /// cycle and are returned.
    pub async fn run_cycle(&mut self, elapsed_secs: u64) -> Result<Snapshot> {
        let raw = self.sensor.sample().await.ok();
        let level = match raw {
            Some(raw) => FillLevel::from_raw(raw, self.config.adc_full_scale),
            None => self.last_level,
        };
        self.last_level = level;

        let verdict = policy::decide(level, &self.config.thresholds);
        let frame = Frame::for_level(level, self.config.lit_color, self.config.unlit_color);

        self.matrix.show(&frame).await?;
        self.lamps.apply(verdict.pins);
        self.display
            .show(verdict.message, self.config.message_position)?;

        let timestamp = Timestamp::from_elapsed(elapsed_secs, &self.config.reference_date);
        let line = StatusReport::new(self.config.bin_id, level, timestamp)
            .render(self.config.report_format)?;
        self.reports.emit(&line);

        Ok(Snapshot {
            raw,
            level,
            verdict,
            lit_cells: level.lit_cells(MATRIX_CELLS),
        })
    }

    pub fn last_level(&self) -> FillLevel {
        self.last_level
    }
}
