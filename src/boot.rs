//! Reboot into the Adafruit nRF52 UF2 bootloader.

use cortex_m::peripheral::SCB;
use embassy_nrf::pac;
use smartbin::config::UF2_DFU_MAGIC;

/// Request USB reprogramming mode. Does not return.
pub fn enter_bootloader() -> ! {
    // GPREGRET is retained across the soft reset below.
    pac::POWER.gpregret().write(|w| w.set_gpregret(UF2_DFU_MAGIC));
    SCB::sys_reset()
}
