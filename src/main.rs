//! smartbin firmware - nRF52840 waste-bin fill-level monitor.
//!
//! Every 500 ms: sample the level input, light the 5×5 matrix in proportion,
//! set the green/red status LEDs, print the collection advice on the OLED and
//! send a status line over USB serial. The boot button reboots into the UF2
//! bootloader for reflashing.

#![no_std]
#![no_main]

mod boot;
mod leds;
mod sensor;
mod ui;
mod usb;

use defmt::{debug, info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{AnyPin, Level, Output, OutputDrive, Pin};
use embassy_nrf::saadc::{self, ChannelConfig, Resolution, Saadc};
use embassy_nrf::{bind_interrupts, peripherals, twim};
use embassy_nrf_ws2812_pwm::Ws2812;
use embassy_time::{Duration, Instant, Timer};
use embassy_usb::UsbDevice;
use embassy_usb::class::cdc_acm::CdcAcmClass;
use smartbin::config::MonitorConfig;
use smartbin::debounce::Debouncer;
use smartbin::matrix::{SmartLedMatrix, MATRIX_CELLS};
use smartbin::monitor::Monitor;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::leds::StatusLeds;
use crate::sensor::FillSensor;
use crate::ui::display::{self, StatusScreen};
use crate::usb::serial::{ReportOutbox, UsbDriver};

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

/// PWM duty words for the matrix: 24 colour bits per cell.
const LED_BUFFER_WORDS: usize = MATRIX_CELLS * 24;
static LED_BUFFER: StaticCell<[u16; LED_BUFFER_WORDS]> = StaticCell::new();

static CONFIG: MonitorConfig = MonitorConfig::DEFAULT;

/// Last accepted boot-button edge. Only the button task touches it.
static BOOT_DEBOUNCE: Debouncer = Debouncer::new(MonitorConfig::DEFAULT.debounce_ms);

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("smartbin starting (bin {=str})", CONFIG.bin_id);

    // USB serial first so the host enumerates while the rest comes up.
    let serial = usb::serial::init(p.USBD);
    unwrap!(spawner.spawn(usb_device_task(serial.device)));
    unwrap!(spawner.spawn(report_writer_task(serial.class)));

    unwrap!(spawner.spawn(boot_button_task(p.P1_02.degrade())));

    // Level input on A0 (AIN2).
    let mut adc_config = saadc::Config::default();
    adc_config.resolution = Resolution::_12BIT;
    let channel = ChannelConfig::single_ended(p.P0_04);
    let adc = Saadc::new(p.SAADC, Irqs, adc_config, [channel]);
    let sensor = FillSensor::new(adc, CONFIG.adc_full_scale).await;

    let lamps = StatusLeds::new(
        Output::new(p.P0_06, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_08, Level::Low, OutputDrive::Standard),
    );

    let led_buf = LED_BUFFER.init([0u16; LED_BUFFER_WORDS]);
    let matrix = SmartLedMatrix::new(Ws2812::new(p.PWM0, p.P0_07, led_buf));

    let mut i2c_config = twim::Config::default();
    i2c_config.frequency = twim::Frequency::K400;
    let i2c = twim::Twim::new(p.TWISPI0, Irqs, p.P0_12, p.P0_11, i2c_config);
    let screen = match display::init(i2c, CONFIG.display_address) {
        Ok(d) => StatusScreen::new(d),
        Err(e) => defmt::panic!("display init failed: {}", e),
    };

    let mut monitor = Monitor::new(&CONFIG, sensor, lamps, matrix, screen, ReportOutbox);
    let period = Duration::from_millis(CONFIG.cycle_period_ms);
    info!("Monitor running, period {} ms", CONFIG.cycle_period_ms);

    loop {
        match monitor.run_cycle(Instant::now().as_secs()).await {
            Ok(snapshot) => {
                if snapshot.raw.is_none() {
                    warn!("Level read failed, reusing {}%", snapshot.level.percent());
                }
                debug!("Cycle: {}", snapshot);
            }
            // Peripheral failures are fatal; panic-probe reports and halts.
            Err(e) => defmt::panic!("cycle failed: {}", e),
        }
        Timer::after(period).await;
    }
}

#[embassy_executor::task]
async fn usb_device_task(device: UsbDevice<'static, UsbDriver>) -> ! {
    usb::serial::run_usb_device(device).await
}

#[embassy_executor::task]
async fn report_writer_task(class: CdcAcmClass<'static, UsbDriver>) -> ! {
    usb::serial::report_writer_task(class).await
}

#[embassy_executor::task]
async fn boot_button_task(pin: AnyPin) -> ! {
    ui::buttons::boot_button_task(pin, &BOOT_DEBOUNCE).await
}
