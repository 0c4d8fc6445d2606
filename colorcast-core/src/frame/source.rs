//! Frame source implementations

use super::colorbar::{self, strip_size};
use super::{FrameError, Geometry, MACROPIXEL_SIZE};

/// Produces the payload of the next frame
///
/// `produce` is a deterministic function of `phase`: calling it twice with
/// the same phase yields identical bytes.
pub trait FrameSource {
    /// Get the frame for the given phase
    fn produce(&mut self, phase: u32) -> &[u8];

    /// Size in bytes of every produced frame
    fn frame_size(&self) -> usize;
}

/// Color bar generator writing into a mutable buffer
///
/// The buffer is regenerated on every call, so the caller must not hand a
/// previously produced frame to anyone who still reads it.
pub struct ColorBarSource<B> {
    buffer: B,
    geometry: Geometry,
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> ColorBarSource<B> {
    /// Create a color bar source over `buffer`
    pub fn new(buffer: B, geometry: Geometry) -> Result<Self, FrameError> {
        if buffer.as_ref().len() < geometry.frame_size() {
            return Err(FrameError::BufferTooSmall);
        }
        Ok(Self { buffer, geometry })
    }

    /// Frame geometry
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> FrameSource for ColorBarSource<B> {
    fn produce(&mut self, phase: u32) -> &[u8] {
        let size = self.geometry.frame_size();
        colorbar::render_frame(&mut self.buffer.as_mut()[..size], &self.geometry, phase);
        &self.buffer.as_ref()[..size]
    }

    fn frame_size(&self) -> usize {
        self.geometry.frame_size()
    }
}

/// Cycles through a table of precomputed frames
pub struct FixedTableSource<'a> {
    frames: &'a [&'a [u8]],
}

impl<'a> FixedTableSource<'a> {
    /// Create a source over a non-empty frame table
    pub fn new(frames: &'a [&'a [u8]]) -> Result<Self, FrameError> {
        if frames.is_empty() {
            return Err(FrameError::EmptyTable);
        }
        Ok(Self { frames })
    }

    /// Number of frames in the table
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; empty tables are rejected by [`FixedTableSource::new`]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl<'a> FrameSource for FixedTableSource<'a> {
    fn produce(&mut self, phase: u32) -> &[u8] {
        self.frames[phase as usize % self.frames.len()]
    }

    fn frame_size(&self) -> usize {
        self.frames.iter().map(|f| f.len()).max().unwrap_or(0)
    }
}

/// Slides a frame-sized window across a read-only strip of color bar rows
///
/// The window starts `(phase mod (width / 2))` macropixels into the strip,
/// so the bars scroll left as the phase advances.
pub struct ScrollingWindowSource<B> {
    strip: B,
    geometry: Geometry,
}

impl<B: AsRef<[u8]>> ScrollingWindowSource<B> {
    /// Create a source over a strip filled by [`colorbar::fill_strip`]
    ///
    /// Rejects strips too short to hold the window at the largest offset.
    pub fn new(strip: B, geometry: Geometry) -> Result<Self, FrameError> {
        if strip.as_ref().len() < strip_size(&geometry) {
            return Err(FrameError::BufferTooSmall);
        }
        Ok(Self { strip, geometry })
    }
}

impl<B: AsRef<[u8]>> FrameSource for ScrollingWindowSource<B> {
    fn produce(&mut self, phase: u32) -> &[u8] {
        let start = self.geometry.shift(phase) * MACROPIXEL_SIZE;
        &self.strip.as_ref()[start..start + self.geometry.frame_size()]
    }

    fn frame_size(&self) -> usize {
        self.geometry.frame_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::fill_frame;
    use proptest::prelude::*;

    const A: [u8; 3] = [1, 2, 3];
    const B: [u8; 2] = [4, 5];
    const C: [u8; 4] = [6, 7, 8, 9];

    #[test]
    fn test_color_bar_rejects_small_buffer() {
        let g = Geometry::new(16, 2).unwrap();
        let result = ColorBarSource::new(vec![0u8; g.frame_size() - 1], g);
        assert!(matches!(result, Err(FrameError::BufferTooSmall)));
    }

    #[test]
    fn test_color_bar_matches_fill_frame() {
        let g = Geometry::new(32, 3).unwrap();
        let mut source = ColorBarSource::new([0u8; 32 * 3 * 2], g).unwrap();

        let mut expected = vec![0u8; g.frame_size()];
        fill_frame(&mut expected, &g, 5).unwrap();

        assert_eq!(source.produce(5), &expected[..]);
        assert_eq!(source.frame_size(), g.frame_size());
    }

    #[test]
    fn test_color_bar_larger_buffer_yields_frame_size() {
        let g = Geometry::new(16, 1).unwrap();
        let mut source = ColorBarSource::new(vec![0u8; 100], g).unwrap();
        assert_eq!(source.produce(0).len(), 32);
    }

    #[test]
    fn test_empty_table_rejected() {
        let table: [&[u8]; 0] = [];
        assert!(matches!(
            FixedTableSource::new(&table),
            Err(FrameError::EmptyTable)
        ));
    }

    #[test]
    fn test_table_wraps() {
        let table: [&[u8]; 3] = [&A, &B, &C];
        let mut source = FixedTableSource::new(&table).unwrap();
        assert_eq!(source.produce(0), &A);
        assert_eq!(source.produce(4), &B);
        assert_eq!(source.produce(u32::MAX), table[u32::MAX as usize % 3]);
        assert_eq!(source.frame_size(), 4);
        assert_eq!(source.len(), 3);
    }

    #[test]
    fn test_window_rejects_short_strip() {
        let g = Geometry::new(16, 2).unwrap();
        let result = ScrollingWindowSource::new(vec![0u8; g.frame_size()], g);
        assert!(matches!(result, Err(FrameError::BufferTooSmall)));
    }

    #[test]
    fn test_window_at_last_offset_stays_in_bounds() {
        let g = Geometry::new(16, 2).unwrap();
        let mut strip = vec![0u8; strip_size(&g)];
        colorbar::fill_strip(&mut strip, &g).unwrap();
        let mut source = ScrollingWindowSource::new(strip, g).unwrap();

        let frame = source.produce(g.macropixels() as u32 - 1);
        assert_eq!(frame.len(), g.frame_size());
    }

    proptest! {
        #[test]
        fn prop_color_bar_source_matches_fill_frame(phase in any::<u32>(), half in 8u16..64, height in 1u16..6) {
            let g = Geometry::new(half * 2, height).unwrap();
            // Stale bytes from a previous frame must be fully overwritten
            let mut source = ColorBarSource::new(vec![0x5Au8; g.frame_size() + 7], g).unwrap();
            source.produce(phase.wrapping_add(3));

            let mut expected = vec![0u8; g.frame_size()];
            fill_frame(&mut expected, &g, phase).unwrap();
            prop_assert_eq!(source.produce(phase), &expected[..]);
        }

        #[test]
        fn prop_table_indexes_modulo_len(phase in any::<u32>()) {
            let table: [&[u8]; 3] = [&A, &B, &C];
            let mut source = FixedTableSource::new(&table).unwrap();

            let first = source.produce(phase).to_vec();
            let second = source.produce(phase).to_vec();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(&first[..], table[phase as usize % table.len()]);
        }

        #[test]
        fn prop_window_is_rotated_reference(phase in any::<u32>(), half in 8u16..64, height in 1u16..8) {
            let g = Geometry::new(half * 2, height).unwrap();
            let mut strip = vec![0u8; strip_size(&g)];
            colorbar::fill_strip(&mut strip, &g).unwrap();
            let reference = strip[..g.row_size()].to_vec();
            let mut source = ScrollingWindowSource::new(strip, g).unwrap();

            let frame = source.produce(phase);
            let mut expected = reference;
            expected.rotate_left(g.shift(phase) * MACROPIXEL_SIZE);
            for row in frame.chunks_exact(g.row_size()) {
                prop_assert_eq!(row, &expected[..]);
            }
        }
    }
}
