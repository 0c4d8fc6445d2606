//! Board-agnostic core logic for the Colorcast UVC firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Frame sources (color bar generator, fixed frame table, scrolling window)
//! - Frame phase counter shared with the transfer completion path
//! - Stream gate and stream state machine
//! - Probe/commit negotiation
//! - Status LED blink scheduling
//! - Transfer submitter (the per-tick producer loop)
//! - UVC wire formats (control block, payload headers, descriptors)
//! - Configuration type definitions
//! - Transport and LED traits

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod frame;
pub mod negotiation;
pub mod pipeline;
pub mod status;
pub mod stream;
pub mod traits;
pub mod uvc;
