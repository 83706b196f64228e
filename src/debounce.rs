//! Debounce gate for the boot button.
//!
//! The last accepted edge time is the only state shared between the button
//! handler and the rest of the firmware, and it is reachable only through
//! [`Debouncer::try_accept`].

use core::sync::atomic::{AtomicU32, Ordering};

pub struct Debouncer {
    window_ms: u32,
    last_accepted_ms: AtomicU32,
}

impl Debouncer {
    /// The reference point starts at boot (0 ms), so edges in the first
    /// window after reset are treated as power-up noise.
    pub const fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            last_accepted_ms: AtomicU32::new(0),
        }
    }

    /// Accept an edge seen at `now_ms` (ms since boot) if at least one window
    /// has passed since the last accepted edge.
    ///
    /// Uses compare-exchange: of two racing edges only one can win.
    /// Millisecond counters wrap after ~49 days; elapsed time uses wrapping
    /// arithmetic.
    pub fn try_accept(&self, now_ms: u32) -> bool {
        let mut last = self.last_accepted_ms.load(Ordering::Acquire);
        loop {
            if now_ms.wrapping_sub(last) < self.window_ms {
                return false;
            }
            match self.last_accepted_ms.compare_exchange_weak(
                last,
                now_ms,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(current) => last = current,
            }
        }
    }
}
