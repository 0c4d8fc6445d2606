//! Frame sources
//!
//! A frame source turns the current frame phase into the bytes of the next
//! frame. Three sources exist:
//!
//! - [`ColorBarSource`]: regenerates a YUY2 color bar pattern into a mutable
//!   buffer on every call, shifted by the phase
//! - [`FixedTableSource`]: cycles through a table of precomputed frames
//! - [`ScrollingWindowSource`]: slides a frame-sized window over a read-only
//!   strip of color bar rows

pub mod colorbar;
pub mod source;

pub use colorbar::{
    fill_bar_table, fill_frame, fill_row, fill_strip, strip_size, table_phase, BAR_COLORS,
    BAR_COUNT,
};
pub use source::{ColorBarSource, FixedTableSource, FrameSource, ScrollingWindowSource};

use crate::config::{VideoConfig, BYTES_PER_PIXEL, MIN_WIDTH};

/// Bytes in one YUY2 macropixel (Y0 U Y1 V)
pub const MACROPIXEL_SIZE: usize = 4;

/// Frame source errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Buffer cannot hold the requested frame(s)
    BufferTooSmall,
    /// Fixed frame table has no entries
    EmptyTable,
    /// Width/height cannot hold the color bar pattern
    InvalidGeometry,
}

/// Frame dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Geometry {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
}

impl Geometry {
    /// Create a geometry, rejecting sizes the color bar cannot cover
    pub fn new(width: u16, height: u16) -> Result<Self, FrameError> {
        if width < MIN_WIDTH || width % 2 != 0 || height == 0 {
            return Err(FrameError::InvalidGeometry);
        }
        Ok(Self { width, height })
    }

    /// Bytes in one row
    pub fn row_size(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Bytes in one frame
    pub fn frame_size(&self) -> usize {
        self.row_size() * self.height as usize
    }

    /// Macropixels in one row
    pub fn macropixels(&self) -> usize {
        self.width as usize / 2
    }

    /// Macropixel shift applied for a frame phase
    pub fn shift(&self, phase: u32) -> usize {
        phase as usize % self.macropixels()
    }
}

impl TryFrom<&VideoConfig> for Geometry {
    type Error = FrameError;

    fn try_from(config: &VideoConfig) -> Result<Self, Self::Error> {
        Geometry::new(config.width, config.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_sizes() {
        let g = Geometry::new(128, 96).unwrap();
        assert_eq!(g.row_size(), 256);
        assert_eq!(g.frame_size(), 128 * 96 * 2);
        assert_eq!(g.macropixels(), 64);
    }

    #[test]
    fn test_geometry_rejects_bad_sizes() {
        assert_eq!(Geometry::new(15, 10), Err(FrameError::InvalidGeometry));
        assert_eq!(Geometry::new(14, 10), Err(FrameError::InvalidGeometry));
        assert_eq!(Geometry::new(16, 0), Err(FrameError::InvalidGeometry));
    }

    #[test]
    fn test_shift_wraps_at_half_width() {
        let g = Geometry::new(32, 4).unwrap();
        assert_eq!(g.shift(0), 0);
        assert_eq!(g.shift(15), 15);
        assert_eq!(g.shift(16), 0);
        assert_eq!(g.shift(17), 1);
    }

    #[test]
    fn test_geometry_from_config() {
        let config = VideoConfig::default();
        let g = Geometry::try_from(&config).unwrap();
        assert_eq!(g, config.geometry());
        assert_eq!(g.frame_size(), config.frame_size());
    }

    #[test]
    fn test_config_sizes_follow_geometry() {
        let config = VideoConfig {
            width: 320,
            height: 240,
            ..Default::default()
        };
        assert_eq!(config.frame_size(), 320 * 240 * 2);
        assert_eq!(config.geometry().row_size(), 640);
        assert_eq!(
            config.bit_rate(),
            (config.geometry().frame_size() as u32) * 8 * config.fps()
        );
    }
}
