//! Video transport traits
//!
//! The transport is the USB device stack seen from the frame pipeline. It
//! reports whether the host is streaming and whether a new frame can be
//! accepted. It takes frame submissions and calls back into [`StreamContext::on_transfer_complete`] when a frame has
//! been sent.
//!
//! [`StreamContext::on_transfer_complete`]: crate::pipeline::StreamContext::on_transfer_complete

/// Identifier of a logical video stream on the device
///
/// Only [`StreamIndex::PRIMARY`] is used by this firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StreamIndex(pub u8);

impl StreamIndex {
    /// The single video stream
    pub const PRIMARY: StreamIndex = StreamIndex(0);
}

/// Errors returned by a transfer submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferError {
    /// A transfer on this stream is still in flight
    Busy,
    /// Payload exceeds what the transport can stage
    TooLarge,
    /// Host is not streaming on this index
    NotStreaming,
}

/// Transport that carries frames to the host
pub trait VideoTransport {
    /// Check whether the host has started the given stream
    ///
    /// This is the authoritative streaming state and must not be cached by
    /// callers.
    fn is_streaming(&self, stream: StreamIndex) -> bool;

    /// Check whether a submission on the given stream would be accepted now
    ///
    /// False while a previous transfer is in flight. Callers use this to
    /// skip rendering a frame that `submit_transfer` would refuse.
    fn is_ready(&self, stream: StreamIndex) -> bool;

    /// Submit a frame for asynchronous transmission
    ///
    /// Returns `Err(TransferError::Busy)` while a previous transfer on the
    /// same stream is in flight. The transport must not keep a reference to
    /// `payload` after returning.
    fn submit_transfer(&mut self, stream: StreamIndex, payload: &[u8]) -> Result<(), TransferError>;
}

/// USB connection state as seen by the device stack
pub trait ConnectionStatus {
    /// Check if the device is configured by a host
    fn is_mounted(&self) -> bool;
}
