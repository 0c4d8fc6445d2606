//! Colorcast - USB Video Class test-pattern camera
//!
//! Main firmware binary for RP2040 boards. Enumerates as a UVC webcam and
//! streams moving color bars, with the on-board LED blinking at a rate
//! that shows the USB connection state.

#![no_std]
#![no_main]

use colorcast_core::frame::Geometry;
use colorcast_core::pipeline::TransferSubmitter;
use colorcast_hal_rp2040::usb::build_function;
use colorcast_hal_rp2040::{GpioLed, UvcHandler, UvcStreamer};
use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::{Driver, InterruptHandler as UsbInterruptHandler};
use embassy_usb::{Builder, Config as UsbConfig};
use static_cell::{ConstStaticCell, StaticCell};
use {defmt_rtt as _, panic_probe as _};

use colorcast_core::config::CameraConfig;

use crate::channels::{FRAME_CAPACITY, STREAM, UVC};

mod channels;
mod config;
mod source;
mod tasks;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => UsbInterruptHandler<USB>;
});

// USB descriptor and control buffers
static CONFIG_DESCRIPTOR: ConstStaticCell<[u8; 512]> = ConstStaticCell::new([0; 512]);
static BOS_DESCRIPTOR: ConstStaticCell<[u8; 64]> = ConstStaticCell::new([0; 64]);
static CONTROL_BUF: ConstStaticCell<[u8; 64]> = ConstStaticCell::new([0; 64]);

static CAMERA_CONFIG: StaticCell<CameraConfig> = StaticCell::new();
static UVC_HANDLER: StaticCell<UvcHandler<FRAME_CAPACITY>> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Colorcast firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // USB strings borrow from the configuration for the device lifetime
    let config: &'static CameraConfig = CAMERA_CONFIG.init(config::load_config());
    let video = &config.video;
    info!(
        "Video: {}x{} YUY2 @ {} fps, {} byte packets",
        video.width,
        video.height,
        video.fps(),
        video.max_packet_size
    );

    // Frame source
    let geometry = unwrap!(Geometry::try_from(video));
    let source = unwrap!(source::build(geometry));
    let submitter = TransferSubmitter::new(&STREAM, source);
    info!("Frame source ready ({} bytes per frame)", geometry.frame_size());

    // USB device with one UVC function
    let driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(config.device.vendor_id, config.device.product_id);
    usb_config.manufacturer = Some(config.device.manufacturer.as_str());
    usb_config.product = Some(config.device.product.as_str());
    usb_config.serial_number = Some(config.device.serial_number.as_str());
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;
    // Miscellaneous device class with interface association
    usb_config.device_class = 0xEF;
    usb_config.device_sub_class = 0x02;
    usb_config.device_protocol = 0x01;
    usb_config.composite_with_iads = true;

    let mut builder = Builder::new(
        driver,
        usb_config,
        CONFIG_DESCRIPTOR.take(),
        BOS_DESCRIPTOR.take(),
        &mut [], // no msos descriptors
        CONTROL_BUF.take(),
    );

    let (interfaces, endpoint) = build_function(&mut builder, video);
    let handler = UVC_HANDLER.init(UvcHandler::new(&UVC, video, interfaces));
    builder.handler(handler);
    let device = builder.build();
    info!("USB initialized");

    let streamer = UvcStreamer::new(endpoint, &UVC, &STREAM, video.max_packet_size);

    // Status LED (Pico on-board LED)
    let led = GpioLed::new(Output::new(p.PIN_25, Level::Low), false);

    // Spawn tasks
    info!("Spawning tasks...");
    spawner.spawn(tasks::usb_task(device)).unwrap();
    spawner.spawn(tasks::stream_task(streamer)).unwrap();
    spawner
        .spawn(tasks::video_task(submitter, video.tick_interval_ms))
        .unwrap();
    spawner
        .spawn(tasks::blinky_task(led, config.status.clone()))
        .unwrap();

    info!("All tasks spawned, firmware running");
}
