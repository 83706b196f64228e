//! Periodic status report sent to the collection central.

use crate::clock::Timestamp;
use crate::error::{Error, Result};
use crate::level::FillLevel;
use core::fmt::Write;

/// Capacity of one rendered status line.
pub const STATUS_LINE_CAPACITY: usize = 128;

/// A rendered status line, without the trailing newline.
pub type StatusLine = heapless::String<STATUS_LINE_CAPACITY>;

/// Textual layout of the report line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportFormat {
    /// `"nivel": 60%` - what existing central consumers parse.
    /// Not valid JSON because of the bare percent sign.
    Legacy,
    /// `"nivel": 60` - valid JSON.
    Json,
}

/// One cycle's report. Built, rendered, emitted and dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusReport<'a> {
    pub bin_id: &'a str,
    pub level: FillLevel,
    pub timestamp: Timestamp,
}

impl<'a> StatusReport<'a> {
    pub fn new(bin_id: &'a str, level: FillLevel, timestamp: Timestamp) -> Self {
        Self {
            bin_id,
            level,
            timestamp,
        }
    }

    pub fn render(&self, format: ReportFormat) -> Result<StatusLine> {
        let suffix = match format {
            ReportFormat::Legacy => "%",
            ReportFormat::Json => "",
        };
        let mut line = StatusLine::new();
        write!(
            line,
            "{{\"id_lixeira\": \"{}\", \"nivel\": {}{}, \"timestamp\": \"{}\"}}",
            self.bin_id,
            self.level.percent(),
            suffix,
            self.timestamp
        )
        .map_err(|_| Error::BufferOverflow)?;
        Ok(line)
    }
}

/// One line as it goes on the wire: at most a leading `\n`, the line and
/// its terminating `\n`.
pub type FramedLine = heapless::Vec<u8, { STATUS_LINE_CAPACITY + 2 }>;

/// Newline framing for a byte stream where a write can be cut short.
///
/// Once a line is marked broken, the next framed line starts with an extra
/// `\n` so the fragment already on the wire ends there instead of being
/// glued to the front of a good report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineFramer {
    broken: bool,
}

impl LineFramer {
    pub const fn new() -> Self {
        Self { broken: false }
    }

    /// The last framed line may have been only partly sent.
    pub fn mark_broken(&mut self) {
        self.broken = true;
    }

    pub fn frame(&mut self, line: &str) -> Result<FramedLine> {
        let mut out = FramedLine::new();
        if self.broken {
            out.push(b'\n').map_err(|_| Error::BufferOverflow)?;
        }
        out.extend_from_slice(line.as_bytes())
            .map_err(|_| Error::BufferOverflow)?;
        out.push(b'\n').map_err(|_| Error::BufferOverflow)?;
        self.broken = false;
        Ok(out)
    }
}
