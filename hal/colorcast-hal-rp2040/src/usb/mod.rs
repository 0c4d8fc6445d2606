//! UVC function on embassy-usb
//!
//! The control side ([`UvcHandler`]) runs inside the USB device task and
//! answers class requests. The data side is split in two: the frame
//! submitter stages frames through [`UvcTransport`], and [`UvcStreamer`]
//! packetizes the staged frame onto the isochronous endpoint. Both sides
//! meet in a [`UvcShared`] that lives in a `static`.

pub mod function;
pub mod handler;
pub mod shared;
pub mod streamer;
pub mod transport;

pub use function::{build_function, UvcInterfaces, VIDEO_ENDPOINT_ADDR};
pub use handler::UvcHandler;
pub use shared::UvcShared;
pub use streamer::{SendError, UvcStreamer};
pub use transport::UvcTransport;
