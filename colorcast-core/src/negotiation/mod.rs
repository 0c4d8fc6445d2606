//! Probe/commit negotiation
//!
//! The device supports a single format, frame size and frame interval.
//! Probe requests are normalized towards that setting; commit requests must
//! match it exactly or are rejected with a UVC request error code.

pub mod handler;
pub mod probe;

pub use handler::{Accepted, NegotiationHandler, FORMAT_INDEX, FRAME_INDEX};
pub use probe::{ProbeCommit, ProbeCommitError, PROBE_COMMIT_LEN, PROBE_COMMIT_LEN_V10};

/// UVC request error codes (`bRequestErrorCode`)
///
/// Reported to the host through the VideoControl request error code
/// control after a failed class request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RequestErrorCode {
    /// Request succeeded
    #[default]
    NoError = 0x00,
    /// Device not ready
    NotReady = 0x01,
    /// Request not allowed in the current state
    WrongState = 0x02,
    /// Insufficient power
    Power = 0x03,
    /// Value outside the supported range
    OutOfRange = 0x04,
    /// Unknown unit or terminal
    InvalidUnit = 0x05,
    /// Unknown control selector
    InvalidControl = 0x06,
    /// Request not supported by the control
    InvalidRequest = 0x07,
    /// Value inside the range but not supported
    InvalidValueWithinRange = 0x08,
    /// Anything else
    Unknown = 0xFF,
}

impl RequestErrorCode {
    /// Raw code as sent on the wire
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Check if this code reports a failure
    pub fn is_error(&self) -> bool {
        !matches!(self, RequestErrorCode::NoError)
    }
}
