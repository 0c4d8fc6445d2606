//! Shared stream context

use crate::stream::FramePhase;
use crate::traits::StreamIndex;

/// State shared between the submitter and the completion path
///
/// Lives in a `static` on the firmware side; every method takes `&self`.
#[derive(Debug)]
pub struct StreamContext {
    stream: StreamIndex,
    phase: FramePhase,
}

impl StreamContext {
    /// Create a context for one stream at phase zero
    pub const fn new(stream: StreamIndex) -> Self {
        Self {
            stream,
            phase: FramePhase::new(),
        }
    }

    /// Stream this context belongs to
    pub fn stream(&self) -> StreamIndex {
        self.stream
    }

    /// Current phase
    pub fn phase(&self) -> u32 {
        self.phase.get()
    }

    /// Phase counter, for the gate to reset when streaming stops
    pub fn frame_phase(&self) -> &FramePhase {
        &self.phase
    }

    /// Completion notifier
    ///
    /// Called by the transport after a submitted frame has been fully sent.
    /// Completions for other streams are ignored. Safe to call from a
    /// context that preempts the submitter.
    pub fn on_transfer_complete(&self, stream: StreamIndex) {
        if stream == self.stream {
            self.phase.advance();
        }
    }
}
