//! Isochronous frame streamer
//!
//! Waits for a staged frame, splits it into header-prefixed packets and
//! writes one packet per service interval. The completion notifier runs
//! only after the end-of-frame packet went out.

use colorcast_core::config::MAX_ISO_PACKET_SIZE;
use colorcast_core::pipeline::StreamContext;
use colorcast_core::uvc::Packetizer;
use embassy_usb::driver::{EndpointError, EndpointIn};

use super::shared::UvcShared;

/// Why a frame was not sent completely
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendError {
    /// Host left the streaming alternate setting
    Aborted,
    /// Endpoint disabled by a reset or configuration change
    Disabled,
}

impl From<EndpointError> for SendError {
    fn from(_: EndpointError) -> Self {
        SendError::Disabled
    }
}

/// Consumer side of the UVC data path
pub struct UvcStreamer<'a, E, const N: usize> {
    endpoint: E,
    shared: &'a UvcShared<N>,
    context: &'a StreamContext,
    packet_size: usize,
    fid: bool,
}

impl<'a, E: EndpointIn, const N: usize> UvcStreamer<'a, E, N> {
    /// Create a streamer sending staged frames in `packet_size` packets
    pub fn new(
        endpoint: E,
        shared: &'a UvcShared<N>,
        context: &'a StreamContext,
        packet_size: u16,
    ) -> Self {
        Self {
            endpoint,
            shared,
            context,
            packet_size: (packet_size as usize).min(MAX_ISO_PACKET_SIZE as usize),
            fid: false,
        }
    }

    /// Wait until the host selects the streaming alternate setting
    pub async fn wait_enabled(&mut self) {
        self.endpoint.wait_enabled().await;
    }

    /// Send the next staged frame
    ///
    /// On success the stream context is notified. On failure the frame is
    /// dropped without a completion, and the staging slot is released
    /// either way.
    pub async fn send_next(&mut self) -> Result<usize, SendError> {
        self.shared.frame_ready.wait().await;

        let result = self.send_staged().await;
        if result.is_ok() {
            // Advance before releasing the slot so the next submission
            // already sees the new phase
            self.context.on_transfer_complete(self.context.stream());
        }
        self.shared.set_in_flight(false);
        result
    }

    async fn send_staged(&mut self) -> Result<usize, SendError> {
        let frame = self.shared.frame.lock().await;
        let mut packetizer = Packetizer::new(&frame, self.packet_size, self.fid);
        let mut packet = [0u8; MAX_ISO_PACKET_SIZE as usize];
        let mut result = Ok(frame.len());

        while let Some(len) = packetizer.next_packet(&mut packet) {
            if !self.shared.is_streaming() {
                result = Err(SendError::Aborted);
                break;
            }
            if let Err(e) = self.endpoint.write(&packet[..len]).await {
                result = Err(e.into());
                break;
            }
        }

        // A toggled FID also closes a partially sent frame on the host
        self.fid = !self.fid;
        result
    }
}
