//! Shared state between tasks and the USB stack
//!
//! The UVC function state and the stream context are `static` so that the
//! USB control handler, the streamer and the submitter can all reach them
//! without lifetimes tied to `main`.

use colorcast_core::pipeline::StreamContext;
use colorcast_core::traits::StreamIndex;
use colorcast_hal_rp2040::UvcShared;

/// Largest supported frame width (pixels)
pub const MAX_WIDTH: u16 = 128;

/// Largest supported frame height (pixels)
pub const MAX_HEIGHT: u16 = 96;

/// Bytes of one row at the largest width
pub const MAX_ROW_SIZE: usize = MAX_WIDTH as usize * 2;

/// Bytes of the largest frame
pub const FRAME_CAPACITY: usize = MAX_ROW_SIZE * MAX_HEIGHT as usize;

/// UVC function state with a staging buffer for one frame
pub static UVC: UvcShared<FRAME_CAPACITY> = UvcShared::new();

/// Frame phase shared by the submitter and the completion path
pub static STREAM: StreamContext = StreamContext::new(StreamIndex::PRIMARY);
