//! Stream state
//!
//! Tracks whether the host is streaming, and owns the frame phase counter
//! that ties the submitter to the transfer completion path.

pub mod events;
pub mod gate;
pub mod machine;
pub mod phase;

pub use events::StreamEvent;
pub use gate::{GateStatus, StreamGate};
pub use machine::StreamState;
pub use phase::FramePhase;
