//! Isochronous stream task
//!
//! Drains staged frames onto the video endpoint. A disabled endpoint means
//! the host left the streaming alternate setting or reset the bus; the
//! task then waits for it to be enabled again.

use colorcast_hal_rp2040::usb::SendError;
use colorcast_hal_rp2040::UvcStreamer;
use defmt::*;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::{Endpoint, In};

use crate::channels::FRAME_CAPACITY;

pub type VideoStreamer = UvcStreamer<'static, Endpoint<'static, USB, In>, FRAME_CAPACITY>;

#[embassy_executor::task]
pub async fn stream_task(mut streamer: VideoStreamer) {
    info!("Stream task started");

    loop {
        streamer.wait_enabled().await;
        debug!("Video endpoint enabled");

        loop {
            match streamer.send_next().await {
                Ok(len) => trace!("Frame sent ({} bytes)", len),
                Err(SendError::Aborted) => {
                    warn!("Frame aborted, stream stopped");
                }
                Err(SendError::Disabled) => {
                    warn!("Frame aborted, endpoint disabled");
                    break;
                }
            }
        }
    }
}
