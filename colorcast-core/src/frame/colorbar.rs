//! EBU color bar generator (YUY2)
//!
//! Eight vertical bars of equal width. Only the first row is computed; all
//! other rows are copies of it.

use super::{FrameError, Geometry, MACROPIXEL_SIZE};

/// Number of bars in the pattern
pub const BAR_COUNT: usize = 8;

/// Bar colors as YUY2 macropixels: Y, U, Y, V
pub const BAR_COLORS: [[u8; MACROPIXEL_SIZE]; BAR_COUNT] = [
    [235, 128, 235, 128], // 100% White
    [219, 16, 219, 138],  // Yellow
    [188, 154, 188, 16],  // Cyan
    [173, 42, 173, 26],   // Green
    [78, 214, 78, 230],   // Magenta
    [63, 102, 63, 240],   // Red
    [32, 240, 32, 118],   // Blue
    [16, 128, 16, 128],   // Black
];

/// Fill one row so that the first bar starts at macropixel `start`
///
/// The pattern wraps around the row end. `row.len()` must be a multiple of
/// [`MACROPIXEL_SIZE`]; trailing bytes are left untouched.
pub fn fill_row(row: &mut [u8], start: usize) {
    let count = row.len() / MACROPIXEL_SIZE;
    if count == 0 {
        return;
    }
    let start = start % count;

    for (column, pixel) in row.chunks_exact_mut(MACROPIXEL_SIZE).enumerate() {
        let offset = (column + count - start) % count;
        let bar = offset * BAR_COUNT / count;
        pixel.copy_from_slice(&BAR_COLORS[bar]);
    }
}

/// Render the color bar frame for `phase` into the start of `buffer`
///
/// The first bar begins at macropixel `phase mod (width / 2)`.
pub fn fill_frame(buffer: &mut [u8], geometry: &Geometry, phase: u32) -> Result<(), FrameError> {
    let frame_size = geometry.frame_size();
    if buffer.len() < frame_size {
        return Err(FrameError::BufferTooSmall);
    }
    render_frame(&mut buffer[..frame_size], geometry, phase);
    Ok(())
}

/// Render the frame for `phase` into a buffer of exactly one frame
///
/// Panics if `frame` is shorter than one row.
pub(crate) fn render_frame(frame: &mut [u8], geometry: &Geometry, phase: u32) {
    render(frame, geometry.row_size(), geometry.shift(phase));
}

/// Phase of entry `index` in a bar table: one bar width per entry
pub fn table_phase(geometry: &Geometry, index: usize) -> u32 {
    (index * (geometry.macropixels() / BAR_COUNT)) as u32
}

/// Render `count` back-to-back frames, entry `i` at [`table_phase`]
///
/// Returns the number of bytes written.
pub fn fill_bar_table(
    buffer: &mut [u8],
    geometry: &Geometry,
    count: usize,
) -> Result<usize, FrameError> {
    let frame_size = geometry.frame_size();
    let table_size = frame_size * count;
    if buffer.len() < table_size {
        return Err(FrameError::BufferTooSmall);
    }
    for (index, frame) in buffer[..table_size].chunks_exact_mut(frame_size).enumerate() {
        render_frame(frame, geometry, table_phase(geometry, index));
    }
    Ok(table_size)
}

/// Render a strip of `height + 1` identical phase-zero rows
///
/// Returns the number of bytes written. A frame-sized window taken at any
/// macropixel offset below `width / 2` stays inside the strip.
pub fn fill_strip(buffer: &mut [u8], geometry: &Geometry) -> Result<usize, FrameError> {
    let strip_size = strip_size(geometry);
    if buffer.len() < strip_size {
        return Err(FrameError::BufferTooSmall);
    }
    render(&mut buffer[..strip_size], geometry.row_size(), 0);
    Ok(strip_size)
}

/// Bytes needed by [`fill_strip`]
pub fn strip_size(geometry: &Geometry) -> usize {
    geometry.frame_size() + geometry.row_size()
}

/// Fill the first row, then replicate it over the rest of `frame`
fn render(frame: &mut [u8], row_size: usize, start: usize) {
    let (first, rest) = frame.split_at_mut(row_size);
    fill_row(first, start);
    for row in rest.chunks_exact_mut(row_size) {
        row.copy_from_slice(first);
    }
}
