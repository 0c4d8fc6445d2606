//! USB device task
//!
//! Runs the embassy-usb device state machine. Enumeration, control
//! transfers and alternate setting changes are all driven from here.

use defmt::*;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::UsbDevice;

pub type UsbDriver = Driver<'static, USB>;

#[embassy_executor::task]
pub async fn usb_task(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB task started");
    device.run().await
}
