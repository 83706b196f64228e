//! Host-testable core of the smartbin fill-level monitor.
//!
//! Everything here is pure logic over plain data: level mapping, the
//! collection policy, matrix frames, the simulated clock, report
//! formatting, the boot-button debounce gate and the cycle orchestration.
//! Hardware adapters live in the embedded binary (`main.rs`) and plug in
//! through the traits in [`traits`].
//!
//! Usage: `cargo test` (no features) runs everything below on the host.
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and needs `--features embedded` plus a `thumbv7em-none-eabihf` target.

#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod config;
pub mod debounce;
pub mod error;
pub mod level;
pub mod matrix;
pub mod monitor;
pub mod policy;
pub mod report;
pub mod traits;

pub use error::{Error, Result};

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::clock::{ReferenceDate, Timestamp};
    use super::config::{dim, MonitorConfig, Thresholds, UF2_DFU_MAGIC};
    use super::debounce::Debouncer;
    use super::level::FillLevel;
    use super::matrix::*;
    use super::policy::{classify, decide, PinStates, Urgency};
    use super::report::{LineFramer, ReportFormat, StatusReport};
    use smart_leds::RGB8;

    const LIT: RGB8 = RGB8 {
        r: 25,
        g: 25,
        b: 25,
    };
    const OFF: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

    fn ts(secs: u64) -> Timestamp {
        Timestamp::from_elapsed(secs, &ReferenceDate::DEFAULT)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Fill Level Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn level_extremes() {
        assert_eq!(FillLevel::from_raw(0, 4095).percent(), 0);
        assert_eq!(FillLevel::from_raw(4095, 4095).percent(), 100);
    }

    #[test]
    fn level_matches_floor_of_scaled_sample() {
        for raw in 0..=4095u16 {
            let expected = (f64::from(raw) * 100.0 / 4095.0).floor() as u8;
            assert_eq!(FillLevel::from_raw(raw, 4095).percent(), expected, "raw={raw}");
        }
    }

    #[test]
    fn level_known_points() {
        assert_eq!(FillLevel::from_raw(2458, 4095).percent(), 60);
        assert_eq!(FillLevel::from_raw(2047, 4095).percent(), 49);
        assert_eq!(FillLevel::from_raw(2048, 4095).percent(), 50);
        assert_eq!(FillLevel::from_raw(40, 4095).percent(), 0);
        assert_eq!(FillLevel::from_raw(41, 4095).percent(), 1);
    }

    #[test]
    fn level_saturates_above_full_scale() {
        assert_eq!(FillLevel::from_raw(5000, 4095), FillLevel::FULL);
        assert_eq!(FillLevel::from_raw(u16::MAX, 4095), FillLevel::FULL);
    }

    #[test]
    fn level_zero_full_scale_is_empty() {
        assert_eq!(FillLevel::from_raw(1234, 0), FillLevel::EMPTY);
    }

    #[test]
    fn level_from_percent_saturates() {
        assert_eq!(FillLevel::from_percent(42).percent(), 42);
        assert_eq!(FillLevel::from_percent(250), FillLevel::FULL);
    }

    #[test]
    fn level_fraction_and_lit_cells() {
        assert_eq!(FillLevel::from_percent(0).fraction(), 0.0);
        assert_eq!(FillLevel::from_percent(100).fraction(), 1.0);
        assert_eq!(FillLevel::from_percent(60).lit_cells(25), 15);
        assert_eq!(FillLevel::from_percent(3).lit_cells(25), 0);
        assert_eq!(FillLevel::from_percent(4).lit_cells(25), 1);
        assert_eq!(FillLevel::from_percent(99).lit_cells(25), 24);
        assert_eq!(FillLevel::from_percent(100).lit_cells(25), 25);
    }

    #[test]
    fn lit_cells_never_exceed_total() {
        for p in 0..=100u8 {
            let lit = FillLevel::from_percent(p).lit_cells(MATRIX_CELLS);
            assert!(lit <= MATRIX_CELLS);
            assert_eq!(lit, usize::from(p) * 25 / 100);
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Policy Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn policy_bands_are_exhaustive() {
        let t = Thresholds::DEFAULT;
        for p in 0..=100u8 {
            let expected = if p < 50 {
                Urgency::Low
            } else if p < 75 {
                Urgency::Medium
            } else {
                Urgency::High
            };
            assert_eq!(classify(FillLevel::from_percent(p), &t), expected, "p={p}");
        }
    }

    #[test]
    fn policy_boundaries_inclusive_on_lower_bound() {
        let t = Thresholds::DEFAULT;
        assert_eq!(classify(FillLevel::from_percent(49), &t), Urgency::Low);
        assert_eq!(classify(FillLevel::from_percent(50), &t), Urgency::Medium);
        assert_eq!(classify(FillLevel::from_percent(74), &t), Urgency::Medium);
        assert_eq!(classify(FillLevel::from_percent(75), &t), Urgency::High);
    }

    #[test]
    fn policy_messages_and_pins() {
        let t = Thresholds::DEFAULT;

        let low = decide(FillLevel::from_percent(10), &t);
        assert_eq!(low.message, "NAO COLETAR");
        assert_eq!(low.pins, PinStates { green: true, red: false });

        let medium = decide(FillLevel::from_percent(60), &t);
        assert_eq!(medium.message, "COLETAR TALVEZ");
        assert_eq!(medium.pins, PinStates { green: true, red: true });

        let high = decide(FillLevel::from_percent(90), &t);
        assert_eq!(high.message, "COLETAR");
        assert_eq!(high.pins, PinStates { green: false, red: true });
    }

    #[test]
    fn policy_custom_thresholds() {
        let t = Thresholds {
            medium: 30,
            high: 90,
        };
        assert_eq!(classify(FillLevel::from_percent(29), &t), Urgency::Low);
        assert_eq!(classify(FillLevel::from_percent(30), &t), Urgency::Medium);
        assert_eq!(classify(FillLevel::from_percent(90), &t), Urgency::High);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Matrix Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn bootloader_magic_matches_uf2_convention() {
        // Adafruit nRF52 bootloader: DFU_MAGIC_UF2_RESET.
        assert_eq!(UF2_DFU_MAGIC, 0x57);
    }

    #[test]
    fn default_lit_colour_is_ten_percent_grey() {
        assert_eq!(dim(10), 25);
        assert_eq!(MonitorConfig::DEFAULT.lit_color, LIT);
        assert_eq!(MonitorConfig::DEFAULT.unlit_color, OFF);
    }

    #[test]
    fn pack_grb_channel_order() {
        let word = pack_grb(RGB8 {
            r: 0x11,
            g: 0x22,
            b: 0x33,
        });
        assert_eq!(word, 0x2211_3300);
        assert_eq!(pack_grb(LIT), 0x1919_1900);
        assert_eq!(pack_grb(OFF), 0);
    }

    fn lit_cells(frame: &Frame) -> usize {
        frame.colors().filter(|&c| c != OFF).count()
    }

    #[test]
    fn frame_lights_leading_cells() {
        let frame = Frame::for_level(FillLevel::from_percent(60), LIT, OFF);
        let words = frame.words();
        assert!(words[..15].iter().all(|&w| w == pack_grb(LIT)));
        assert!(words[15..].iter().all(|&w| w == 0));
        assert_eq!(lit_cells(&frame), 15);
    }

    #[test]
    fn frame_empty_and_full() {
        assert_eq!(lit_cells(&Frame::for_level(FillLevel::EMPTY, LIT, OFF)), 0);
        assert_eq!(lit_cells(&Frame::for_level(FillLevel::FULL, LIT, OFF)), 25);
    }

    #[test]
    fn unpack_grb_inverts_pack() {
        let c = RGB8 {
            r: 0x11,
            g: 0x22,
            b: 0x33,
        };
        assert_eq!(unpack_grb(pack_grb(c)), c);
        // Low byte carries nothing.
        assert_eq!(unpack_grb(0x2211_33FF), c);
    }

    #[test]
    fn frame_colors_follow_scan_order() {
        let green = RGB8 { r: 0, g: 0x80, b: 0 };
        let frame = Frame::for_level(FillLevel::from_percent(8), green, OFF);
        let colors: Vec<_> = frame.colors().collect();
        assert_eq!(colors.len(), MATRIX_CELLS);
        assert_eq!(colors[..2], [green, green]);
        assert!(colors[2..].iter().all(|&c| c == OFF));
    }

    type WriteLog = std::rc::Rc<std::cell::RefCell<Vec<Vec<RGB8>>>>;

    /// Records every write as one colour list, or refuses the write.
    struct ChainRecorder {
        writes: WriteLog,
        fail: bool,
    }

    impl smart_leds::SmartLedsWriteAsync for ChainRecorder {
        type Error = ();
        type Color = RGB8;

        async fn write<T, I>(&mut self, iterator: T) -> core::result::Result<(), ()>
        where
            T: IntoIterator<Item = I>,
            I: Into<RGB8>,
        {
            if self.fail {
                return Err(());
            }
            let colors = iterator.into_iter().map(Into::into).collect();
            self.writes.borrow_mut().push(colors);
            Ok(())
        }
    }

    #[test]
    fn smart_led_matrix_writes_whole_frame_in_one_pass() {
        use super::traits::PixelMatrix;
        use embassy_futures::block_on;

        let writes = WriteLog::default();
        let mut matrix = SmartLedMatrix::new(ChainRecorder {
            writes: writes.clone(),
            fail: false,
        });
        let frame = Frame::for_level(FillLevel::from_percent(60), LIT, OFF);
        block_on(matrix.show(&frame)).unwrap();

        let writes = writes.borrow();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].len(), MATRIX_CELLS);
        assert!(writes[0][..15].iter().all(|&c| c == LIT));
        assert!(writes[0][15..].iter().all(|&c| c == OFF));
    }

    #[test]
    fn smart_led_matrix_maps_driver_error() {
        use super::traits::PixelMatrix;
        use embassy_futures::block_on;

        let mut matrix = SmartLedMatrix::new(ChainRecorder {
            writes: WriteLog::default(),
            fail: true,
        });
        let frame = Frame::for_level(FillLevel::FULL, LIT, OFF);
        assert_eq!(block_on(matrix.show(&frame)), Err(crate::Error::Matrix));
    }

    // ════════════════════════════════════════════════════════════════════════
    // Clock Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn timestamp_at_boot() {
        assert_eq!(ts(0).to_string(), "2025-02-25T00:00:00Z");
    }

    #[test]
    fn timestamp_within_first_day() {
        assert_eq!(ts(3_723).to_string(), "2025-02-25T01:02:03Z");
        assert_eq!(ts(86_399).to_string(), "2025-02-25T23:59:59Z");
    }

    #[test]
    fn timestamp_adds_days_without_month_rollover() {
        assert_eq!(ts(86_400).to_string(), "2025-02-26T00:00:00Z");
        assert_eq!(ts(7 * 86_400 + 61).to_string(), "2025-02-32T00:01:01Z");
        assert_eq!(ts(7 * 86_400).day(), 32);
    }

    #[test]
    fn timestamp_fields_follow_remainder() {
        for secs in [0u64, 59, 60, 3_599, 3_600, 45_296, 200_000] {
            let t = ts(secs);
            let rest = secs % 86_400;
            assert_eq!(t.day(), 25 + secs / 86_400);
            assert_eq!(
                t.time_of_day(),
                ((rest / 3600) as u8, ((rest % 3600) / 60) as u8, (rest % 60) as u8)
            );
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Report Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn report_legacy_format_is_literal() {
        let report = StatusReport::new("001", FillLevel::from_percent(60), ts(0));
        let line = report.render(ReportFormat::Legacy).unwrap();
        assert_eq!(
            line.as_str(),
            r#"{"id_lixeira": "001", "nivel": 60%, "timestamp": "2025-02-25T00:00:00Z"}"#
        );
    }

    #[test]
    fn report_json_format_drops_percent() {
        let report = StatusReport::new("001", FillLevel::from_percent(7), ts(61));
        let line = report.render(ReportFormat::Json).unwrap();
        assert_eq!(
            line.as_str(),
            r#"{"id_lixeira": "001", "nivel": 7, "timestamp": "2025-02-25T00:01:01Z"}"#
        );
    }

    #[test]
    fn report_contains_id_once_and_level() {
        for p in [0u8, 1, 50, 99, 100] {
            let report = StatusReport::new("001", FillLevel::from_percent(p), ts(12_345));
            let line = report.render(ReportFormat::Legacy).unwrap();
            assert_eq!(line.matches("001").count(), 1, "{line}");
            assert!(line.contains(&format!("\"nivel\": {p}%")));
        }
    }

    #[test]
    fn report_overflow_is_an_error() {
        let long_id = "X".repeat(200);
        let report = StatusReport::new(&long_id, FillLevel::EMPTY, ts(0));
        assert_eq!(
            report.render(ReportFormat::Legacy),
            Err(crate::Error::BufferOverflow)
        );
    }

    #[test]
    fn framer_terminates_each_line() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.frame("a").unwrap().as_slice(), b"a\n");
        assert_eq!(framer.frame("b").unwrap().as_slice(), b"b\n");
    }

    #[test]
    fn framer_closes_fragment_after_cut_write() {
        let mut framer = LineFramer::new();
        let first = framer.frame("{\"nivel\": 10%}").unwrap();
        // Only part of `first` reached the host before the write was dropped.
        let mut wire = first[..5].to_vec();
        framer.mark_broken();

        let next = framer.frame("{\"nivel\": 20%}").unwrap();
        assert_eq!(next[0], b'\n');
        wire.extend_from_slice(&next);

        let text = core::str::from_utf8(&wire).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines, ["{\"niv", "{\"nivel\": 20%}"]);
    }

    #[test]
    fn framer_recovers_after_one_extra_newline() {
        let mut framer = LineFramer::new();
        framer.mark_broken();
        assert_eq!(framer.frame("x").unwrap().as_slice(), b"\nx\n");
        assert_eq!(framer.frame("y").unwrap().as_slice(), b"y\n");
    }

    #[test]
    fn framer_fits_longest_status_line_after_break() {
        let longest = "Z".repeat(super::report::STATUS_LINE_CAPACITY);
        let mut framer = LineFramer::new();
        framer.mark_broken();
        let framed = framer.frame(&longest).unwrap();
        assert_eq!(framed.len(), longest.len() + 2);
        assert_eq!(
            framer.frame(&"Z".repeat(200)),
            Err(crate::Error::BufferOverflow)
        );
    }

    // ════════════════════════════════════════════════════════════════════════
    // Debounce Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn debounce_drops_bounce_inside_window() {
        let gate = Debouncer::new(200);
        assert!(gate.try_accept(1_000));
        assert!(!gate.try_accept(1_050));
        assert!(!gate.try_accept(1_199));
    }

    #[test]
    fn debounce_accepts_after_window() {
        let gate = Debouncer::new(200);
        assert!(gate.try_accept(1_000));
        assert!(gate.try_accept(1_200));
        assert!(gate.try_accept(5_000));
    }

    #[test]
    fn debounce_window_measured_from_last_accepted_edge() {
        let gate = Debouncer::new(200);
        assert!(gate.try_accept(1_000));
        assert!(!gate.try_accept(1_150));
        // Rejected edges do not move the reference point.
        assert!(gate.try_accept(1_210));
    }

    #[test]
    fn debounce_ignores_edges_right_after_boot() {
        let gate = Debouncer::new(200);
        assert!(!gate.try_accept(0));
        assert!(!gate.try_accept(150));
        assert!(gate.try_accept(200));
    }

    #[test]
    fn debounce_survives_counter_wrap() {
        let gate = Debouncer::new(200);
        assert!(gate.try_accept(u32::MAX - 50));
        assert!(!gate.try_accept(100));
        assert!(gate.try_accept(150));
    }

    #[test]
    fn debounce_single_winner_across_threads() {
        use std::sync::Arc;

        let gate = Arc::new(Debouncer::new(200));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let gate = Arc::clone(&gate);
                std::thread::spawn(move || gate.try_accept(10_000))
            })
            .collect();
        let accepted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&ok| ok)
            .count();
        assert_eq!(accepted, 1);
    }
}
