//! Embedded configuration loading
//!
//! `build.rs` validates `camera.toml` and serializes it with postcard. The
//! firmware decodes it at boot and falls back to defaults if the blob is
//! unreadable or does not fit the static frame buffers.

use colorcast_core::config::{CameraConfig, VideoConfig};
use defmt::*;

use crate::channels::{FRAME_CAPACITY, MAX_WIDTH};

/// Configuration blob produced by build.rs
static CAMERA_BIN: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/camera.bin"));

/// Decode the embedded configuration
pub fn load_config() -> CameraConfig {
    let mut config = match postcard::from_bytes::<CameraConfig>(CAMERA_BIN) {
        Ok(config) => config,
        Err(_) => {
            error!("Embedded configuration unreadable, using defaults");
            return CameraConfig::default();
        }
    };

    if let Err(e) = config.validate() {
        error!("Embedded configuration invalid ({}), using defaults", e);
        return CameraConfig::default();
    }

    if !fits_buffers(&config.video) {
        error!(
            "{}x{} exceeds the frame buffers, using default video settings",
            config.video.width, config.video.height
        );
        config.video = VideoConfig::default();
    }

    config
}

/// Check the configured frame against the static buffer sizes
fn fits_buffers(video: &VideoConfig) -> bool {
    video.width <= MAX_WIDTH && video.frame_size() <= FRAME_CAPACITY
}
