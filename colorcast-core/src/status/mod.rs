//! USB connection status indicator
//!
//! A single LED blinks at a rate that tells the user whether the device is
//! enumerated. The period changes only on connection events and is
//! independent of the video stream.

pub mod indicator;
pub mod slot;

pub use indicator::{BlinkPeriod, ConnectionEvent, StatusIndicator};
pub use slot::ConnectionEventSlot;
