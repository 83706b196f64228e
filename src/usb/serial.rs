//! USB CDC-ACM status line output.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral and exposes one serial interface.

use defmt::{info, warn};
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{self, bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{with_timeout, Duration};
use embassy_usb::class::cdc_acm::{CdcAcmClass, State};
use embassy_usb::driver::EndpointError;
use embassy_usb::{Builder, Config, UsbDevice};
use smartbin::config;
use smartbin::report::{LineFramer, StatusLine};
use smartbin::traits::ReportSink;
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

const PACKET_SIZE: usize = config::USB_SERIAL_PACKET_SIZE as usize;

static CDC_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();

/// Latest status line not yet written to the host.
static REPORT_SIGNAL: Signal<CriticalSectionRawMutex, StatusLine> = Signal::new();

/// Build result containing the USB device runner and the serial class.
pub struct UsbSerial {
    pub device: UsbDevice<'static, UsbDriver>,
    pub class: CdcAcmClass<'static, UsbDriver>,
}

/// Initialise the USB stack and create the CDC-ACM device.
///
/// Must be called exactly once.  All static buffers are consumed here.
pub fn init(usbd: peripherals::USBD) -> UsbSerial {
    // Create the low-level USB driver with hardware VBUS detection.
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    // USB device-level configuration.
    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100; // mA
    usb_config.max_packet_size_0 = 64;

    // Windows needs IAD for CDC-ACM.
    usb_config.device_class = 0xEF;
    usb_config.device_sub_class = 0x02;
    usb_config.device_protocol = 0x01;
    usb_config.composite_with_iads = true;

    let mut builder = Builder::new(
        driver,
        usb_config,
        USB_CONFIG_DESC.init([0u8; 256]),
        USB_BOS_DESC.init([0u8; 256]),
        USB_MSOS_DESC.init([0u8; 256]),
        USB_CTRL_BUF.init([0u8; 128]),
    );

    let class = CdcAcmClass::new(
        &mut builder,
        CDC_STATE.init(State::new()),
        config::USB_SERIAL_PACKET_SIZE,
    );

    let device = builder.build();

    info!("USB CDC-ACM device initialised");

    UsbSerial { device, class }
}

/// Run the USB device stack - must be spawned as a dedicated Embassy task.
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}

/// Report outlet handed to the monitor: logs the line over defmt and
/// leaves it in the mailbox for the USB writer.
pub struct ReportOutbox;

impl ReportSink for ReportOutbox {
    fn emit(&mut self, line: &StatusLine) {
        info!("{=str}", line.as_str());
        REPORT_SIGNAL.signal(line.clone());
    }
}

/// Status writer task - waits for a terminal, then prints each new line.
///
/// A write that does not finish within `USB_WRITE_TIMEOUT_MS` is dropped;
/// the next line then opens with a newline to close off the fragment.
pub async fn report_writer_task(mut class: CdcAcmClass<'static, UsbDriver>) -> ! {
    info!("Report writer task started");

    loop {
        class.wait_connection().await;
        info!("USB serial connected");

        // Whatever was produced while nobody listened is stale.
        REPORT_SIGNAL.reset();
        let mut framer = LineFramer::new();

        loop {
            let line = REPORT_SIGNAL.wait().await;
            let Ok(bytes) = framer.frame(&line) else {
                warn!("USB serial: line too long, report dropped");
                continue;
            };
            let timeout = Duration::from_millis(config::USB_WRITE_TIMEOUT_MS);
            match with_timeout(timeout, write_bytes(&mut class, &bytes)).await {
                Ok(Ok(())) => {}
                Ok(Err(EndpointError::Disabled)) => break,
                Ok(Err(e)) => {
                    warn!("USB serial: endpoint error {}", e);
                    framer.mark_broken();
                }
                Err(_) => {
                    warn!("USB serial: write timed out, report dropped");
                    framer.mark_broken();
                }
            }
        }

        info!("USB serial disconnected");
    }
}

/// Write `bytes` in full-size packets. A trailing short (possibly empty)
/// packet always terminates the transfer.
async fn write_bytes(
    class: &mut CdcAcmClass<'static, UsbDriver>,
    bytes: &[u8],
) -> Result<(), EndpointError> {
    let mut packet = [0u8; PACKET_SIZE];
    let mut len = 0;

    for &byte in bytes {
        packet[len] = byte;
        len += 1;
        if len == PACKET_SIZE {
            class.write_packet(&packet).await?;
            len = 0;
        }
    }
    class.write_packet(&packet[..len]).await
}
