//! Configuration type definitions

use heapless::String;

use crate::frame::Geometry;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum USB string descriptor length kept in config
pub const MAX_STRING_LEN: usize = 32;

/// Bytes per pixel for YUY2 (4 bytes per 2-pixel macropixel)
pub const BYTES_PER_PIXEL: usize = 2;

/// Smallest width that still fits one macropixel per color bar
pub const MIN_WIDTH: u16 = 16;

/// Largest isochronous packet allowed at full speed
pub const MAX_ISO_PACKET_SIZE: u16 = 1023;

/// Frame interval units per second (UVC uses 100 ns units)
pub const INTERVAL_UNITS_PER_SEC: u32 = 10_000_000;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Width is zero, odd, or below [`MIN_WIDTH`]
    InvalidWidth,
    /// Height is zero
    InvalidHeight,
    /// Frame interval is zero
    InvalidFrameInterval,
    /// Packet size cannot carry a payload header plus data
    InvalidPacketSize,
    /// Submitter tick interval is zero
    InvalidTickInterval,
    /// Blink period is zero
    InvalidBlinkPeriod,
}

/// Video stream configuration
///
/// The device advertises exactly one format (YUY2), one frame size and one
/// frame interval built from these values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VideoConfig {
    /// Frame width in pixels (even)
    pub width: u16,
    /// Frame height in pixels
    pub height: u16,
    /// Frame interval in 100 ns units (1_000_000 = 10 fps)
    pub frame_interval: u32,
    /// Isochronous endpoint max packet size in bytes
    pub max_packet_size: u16,
    /// Submitter tick interval in milliseconds
    pub tick_interval_ms: u32,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 96,
            frame_interval: 1_000_000,
            max_packet_size: 512,
            tick_interval_ms: 1,
        }
    }
}

impl VideoConfig {
    /// Frame dimensions, unvalidated
    ///
    /// Use `Geometry::try_from` where the sizes must be checked.
    pub fn geometry(&self) -> Geometry {
        Geometry {
            width: self.width,
            height: self.height,
        }
    }

    /// Bytes in one complete frame
    pub fn frame_size(&self) -> usize {
        self.geometry().frame_size()
    }

    /// Frames per second (rounded down)
    pub fn fps(&self) -> u32 {
        INTERVAL_UNITS_PER_SEC / self.frame_interval.max(1)
    }

    /// Bit rate at the configured frame interval
    pub fn bit_rate(&self) -> u32 {
        (self.frame_size() as u32)
            .saturating_mul(8)
            .saturating_mul(self.fps())
    }

    /// Validate geometry and timing
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_WIDTH || self.width % 2 != 0 {
            return Err(ConfigError::InvalidWidth);
        }
        if self.height == 0 {
            return Err(ConfigError::InvalidHeight);
        }
        if self.frame_interval == 0 {
            return Err(ConfigError::InvalidFrameInterval);
        }
        // Header is 2 bytes, so a packet must carry at least one data byte
        if self.max_packet_size < 3 || self.max_packet_size > MAX_ISO_PACKET_SIZE {
            return Err(ConfigError::InvalidPacketSize);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidTickInterval);
        }
        Ok(())
    }
}

/// Status LED blink periods
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatusConfig {
    /// Period while the device is not mounted (ms)
    pub not_mounted_ms: u32,
    /// Period while mounted (ms)
    pub mounted_ms: u32,
    /// Period while the bus is suspended (ms)
    pub suspended_ms: u32,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            not_mounted_ms: 250,
            mounted_ms: 1000,
            suspended_ms: 2500,
        }
    }
}

impl StatusConfig {
    /// Validate blink periods
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.not_mounted_ms == 0 || self.mounted_ms == 0 || self.suspended_ms == 0 {
            return Err(ConfigError::InvalidBlinkPeriod);
        }
        Ok(())
    }
}

/// USB device identity
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeviceConfig {
    /// USB vendor ID
    pub vendor_id: u16,
    /// USB product ID
    pub product_id: u16,
    /// Manufacturer string
    pub manufacturer: String<MAX_STRING_LEN>,
    /// Product string
    pub product: String<MAX_STRING_LEN>,
    /// Serial number string
    pub serial_number: String<MAX_STRING_LEN>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            vendor_id: 0xCAFE,
            product_id: 0x4020,
            manufacturer: label("Colorcast"),
            product: label("Colorcast Test Camera"),
            serial_number: label("000001"),
        }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CameraConfig {
    /// Video stream settings
    pub video: VideoConfig,
    /// Status LED settings
    pub status: StatusConfig,
    /// USB identity
    pub device: DeviceConfig,
}

impl CameraConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.video.validate()?;
        self.status.validate()
    }
}

fn label(s: &str) -> String<MAX_STRING_LEN> {
    let mut out = String::new();
    let _ = out.push_str(s);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CameraConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.video.frame_size(), 128 * 96 * 2);
        assert_eq!(config.video.fps(), 10);
        assert_eq!(config.video.geometry().macropixels(), 64);
    }

    #[test]
    fn test_width_validation() {
        let mut video = VideoConfig::default();

        video.width = 0;
        assert_eq!(video.validate(), Err(ConfigError::InvalidWidth));

        video.width = 127;
        assert_eq!(video.validate(), Err(ConfigError::InvalidWidth));

        video.width = 14;
        assert_eq!(video.validate(), Err(ConfigError::InvalidWidth));

        video.width = 16;
        assert_eq!(video.validate(), Ok(()));
    }

    #[test]
    fn test_timing_validation() {
        let mut video = VideoConfig::default();
        video.frame_interval = 0;
        assert_eq!(video.validate(), Err(ConfigError::InvalidFrameInterval));

        let mut video = VideoConfig::default();
        video.tick_interval_ms = 0;
        assert_eq!(video.validate(), Err(ConfigError::InvalidTickInterval));
    }

    #[test]
    fn test_packet_size_validation() {
        let mut video = VideoConfig::default();

        video.max_packet_size = 2;
        assert_eq!(video.validate(), Err(ConfigError::InvalidPacketSize));

        video.max_packet_size = 1024;
        assert_eq!(video.validate(), Err(ConfigError::InvalidPacketSize));

        video.max_packet_size = 1023;
        assert_eq!(video.validate(), Ok(()));
    }

    #[test]
    fn test_blink_periods() {
        let mut status = StatusConfig::default();
        assert_eq!(status.validate(), Ok(()));

        status.suspended_ms = 0;
        assert_eq!(status.validate(), Err(ConfigError::InvalidBlinkPeriod));
    }

    #[test]
    fn test_bit_rate() {
        let video = VideoConfig::default();
        assert_eq!(video.bit_rate(), 128 * 96 * 2 * 8 * 10);
    }
}
