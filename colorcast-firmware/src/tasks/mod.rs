//! Embassy async tasks
//!
//! Each task runs independently and communicates through the statics in
//! `channels`.

pub mod blinky;
pub mod stream;
pub mod usb;
pub mod video;

pub use blinky::blinky_task;
pub use stream::stream_task;
pub use usb::usb_task;
pub use video::video_task;
