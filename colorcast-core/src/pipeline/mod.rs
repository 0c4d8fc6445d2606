//! Frame pipeline
//!
//! The submitter runs once per scheduler tick on the producer side. The
//! stream context is shared with the transport, which reports finished
//! transfers through [`StreamContext::on_transfer_complete`].

pub mod context;
pub mod submitter;

pub use context::StreamContext;
pub use submitter::{TickOutcome, TransferSubmitter};
