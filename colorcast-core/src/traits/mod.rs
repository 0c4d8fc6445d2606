//! Hardware abstraction traits
//!
//! These traits define the interface between the frame pipeline and the
//! board-specific USB stack and LED.

pub mod led;
pub mod transport;

pub use led::StatusLed;
pub use transport::{ConnectionStatus, StreamIndex, TransferError, VideoTransport};
