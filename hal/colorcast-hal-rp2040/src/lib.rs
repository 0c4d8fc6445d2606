//! RP2040-specific HAL for the Colorcast firmware
//!
//! This crate provides RP2040 implementations of the `colorcast-core`
//! traits:
//!
//! - Status LED on a GPIO output
//! - UVC function on the embassy-usb device stack
//! - Staging transport between the frame submitter and the isochronous
//!   endpoint

#![no_std]

pub mod led;
pub mod usb;

pub use led::GpioLed;
pub use usb::{UvcHandler, UvcShared, UvcStreamer, UvcTransport};
