//! Frame phase counter
//!
//! Incremented from the transfer completion context, read and reset from the
//! submitter task. Both sides may run interleaved or preempt each other, so
//! the counter is a single atomic word.

use portable_atomic::{AtomicU32, Ordering};

/// Counter selecting the next frame
///
/// Advances by one per completed transfer and returns to zero when the
/// stream stops.
#[derive(Debug, Default)]
pub struct FramePhase(AtomicU32);

impl FramePhase {
    /// Create a counter at phase zero
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    /// Current phase
    pub fn get(&self) -> u32 {
        self.0.load(Ordering::Acquire)
    }

    /// Advance by one, returning the new phase
    pub fn advance(&self) -> u32 {
        self.0.fetch_add(1, Ordering::AcqRel).wrapping_add(1)
    }

    /// Return to phase zero
    pub fn reset(&self) {
        self.0.store(0, Ordering::Release);
    }
}
