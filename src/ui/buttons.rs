//! Boot button: falling edge → UF2 bootloader.
//!
//! The switch is active-low with the internal pull-up. Edges are gated by
//! the shared [`Debouncer`]; the first accepted edge reboots the board and
//! never returns.

use crate::boot;
use defmt::{debug, info};
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_time::Instant;
use smartbin::debounce::Debouncer;

/// Wait for presses until one passes the debounce gate, then reboot.
pub async fn boot_button_task(pin: AnyPin, debouncer: &'static Debouncer) -> ! {
    let mut btn = Input::new(pin, Pull::Up);

    loop {
        btn.wait_for_falling_edge().await;

        // Millisecond uptime truncated to 32 bits; the gate handles the wrap.
        let now_ms = Instant::now().as_millis() as u32;
        if debouncer.try_accept(now_ms) {
            info!("Button: entering USB bootloader");
            boot::enter_bootloader();
        }
        debug!("Button: bounce at {} ms ignored", now_ms);
    }
}
