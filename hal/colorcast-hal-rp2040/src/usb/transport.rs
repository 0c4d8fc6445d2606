//! Frame staging transport
//!
//! The submitter hands a borrowed frame to [`UvcTransport::submit_transfer`].
//! The frame is copied into the shared staging buffer before returning, so
//! the source may regenerate its buffer on the next tick.

use colorcast_core::traits::{StreamIndex, TransferError, VideoTransport};

use super::shared::UvcShared;

/// Producer side of the UVC data path
pub struct UvcTransport<'a, const N: usize> {
    shared: &'a UvcShared<N>,
}

impl<'a, const N: usize> UvcTransport<'a, N> {
    /// Create a transport staging frames into `shared`
    pub fn new(shared: &'a UvcShared<N>) -> Self {
        Self { shared }
    }
}

impl<const N: usize> VideoTransport for UvcTransport<'_, N> {
    fn is_streaming(&self, stream: StreamIndex) -> bool {
        stream == StreamIndex::PRIMARY && self.shared.is_streaming()
    }

    fn is_ready(&self, stream: StreamIndex) -> bool {
        self.is_streaming(stream) && !self.shared.is_in_flight()
    }

    fn submit_transfer(&mut self, stream: StreamIndex, payload: &[u8]) -> Result<(), TransferError> {
        if !self.is_streaming(stream) {
            return Err(TransferError::NotStreaming);
        }
        if payload.len() > N {
            return Err(TransferError::TooLarge);
        }
        if self.shared.is_in_flight() {
            return Err(TransferError::Busy);
        }

        // Held by the streamer while a frame is being sent
        let mut frame = self.shared.frame.try_lock().map_err(|_| TransferError::Busy)?;
        frame.clear();
        frame
            .extend_from_slice(payload)
            .map_err(|_| TransferError::TooLarge)?;
        drop(frame);

        self.shared.set_in_flight(true);
        self.shared.frame_ready.signal(());
        Ok(())
    }
}
