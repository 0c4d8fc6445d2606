//! Frame source selection
//!
//! One source per build, picked by cargo feature:
//!
//! - default: color bars regenerated into a RAM buffer every tick
//! - `readonly`: table of eight frames rendered at build time and kept in
//!   flash, one bar width apart
//! - `scrolling`: window sliding over a read-only strip of bar rows

#[cfg(all(feature = "readonly", feature = "scrolling"))]
compile_error!("features `readonly` and `scrolling` are mutually exclusive");

use colorcast_core::frame::{FrameError, Geometry};
use static_cell::ConstStaticCell;

#[cfg(not(feature = "readonly"))]
use crate::channels::FRAME_CAPACITY;

#[cfg(not(any(feature = "readonly", feature = "scrolling")))]
pub type Source = colorcast_core::frame::ColorBarSource<&'static mut [u8]>;

#[cfg(feature = "readonly")]
pub type Source = colorcast_core::frame::FixedTableSource<'static>;

#[cfg(feature = "scrolling")]
pub type Source = colorcast_core::frame::ScrollingWindowSource<&'static [u8]>;

#[cfg(not(any(feature = "readonly", feature = "scrolling")))]
static FRAME: ConstStaticCell<[u8; FRAME_CAPACITY]> = ConstStaticCell::new([0; FRAME_CAPACITY]);

/// Build the color bar source
#[cfg(not(any(feature = "readonly", feature = "scrolling")))]
pub fn build(geometry: Geometry) -> Result<Source, FrameError> {
    colorcast_core::frame::ColorBarSource::new(&mut FRAME.take()[..], geometry)
}

/// Frame table rendered by build.rs, resident in flash
#[cfg(feature = "readonly")]
static TABLE_DATA: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/frames.bin"));

#[cfg(feature = "readonly")]
const TABLE_LEN: usize = colorcast_core::frame::BAR_COUNT;

#[cfg(feature = "readonly")]
static TABLE: ConstStaticCell<[&'static [u8]; TABLE_LEN]> = ConstStaticCell::new([&[]; TABLE_LEN]);

/// Index the flash-resident frame table
///
/// The table is rendered from camera.toml, so a boot-time fallback to
/// default video settings leaves it at the wrong size.
#[cfg(feature = "readonly")]
pub fn build(geometry: Geometry) -> Result<Source, FrameError> {
    let frame_size = geometry.frame_size();
    if TABLE_DATA.len() != frame_size * TABLE_LEN {
        return Err(FrameError::InvalidGeometry);
    }

    let table = TABLE.take();
    for (slot, frame) in table.iter_mut().zip(TABLE_DATA.chunks_exact(frame_size)) {
        *slot = frame;
    }

    let table: &'static [&'static [u8]] = table;
    colorcast_core::frame::FixedTableSource::new(table)
}

#[cfg(feature = "scrolling")]
const STRIP_CAPACITY: usize = FRAME_CAPACITY + crate::channels::MAX_ROW_SIZE;

#[cfg(feature = "scrolling")]
static STRIP: ConstStaticCell<[u8; STRIP_CAPACITY]> = ConstStaticCell::new([0; STRIP_CAPACITY]);

/// Fill the strip once and slide over it
#[cfg(feature = "scrolling")]
pub fn build(geometry: Geometry) -> Result<Source, FrameError> {
    let strip = STRIP.take();
    let len = colorcast_core::frame::fill_strip(strip, &geometry)?;
    let strip: &'static [u8] = &strip[..len];
    colorcast_core::frame::ScrollingWindowSource::new(strip, geometry)
}
