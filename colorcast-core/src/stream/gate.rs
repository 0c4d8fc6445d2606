//! Stream gate
//!
//! Polls the transport for the authoritative streaming flag every tick and
//! resets the frame phase whenever the stream is not active.

use super::phase::FramePhase;
use crate::traits::{StreamIndex, VideoTransport};

/// Result of polling the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GateStatus {
    /// Not streaming, and was not streaming on the previous poll
    Idle,
    /// Streaming stopped since the previous poll
    Stopped,
    /// Streaming started since the previous poll
    Started,
    /// Streaming, and was streaming on the previous poll
    Streaming,
}

impl GateStatus {
    /// Check if a frame should be submitted
    pub fn is_open(&self) -> bool {
        matches!(self, GateStatus::Started | GateStatus::Streaming)
    }
}

/// Gate in front of the transfer submitter
#[derive(Debug, Clone)]
pub struct StreamGate {
    stream: StreamIndex,
    was_streaming: bool,
}

impl StreamGate {
    /// Create a gate for one stream
    pub fn new(stream: StreamIndex) -> Self {
        Self {
            stream,
            was_streaming: false,
        }
    }

    /// Query the transport; never cached
    pub fn is_streaming<T: VideoTransport>(&self, transport: &T) -> bool {
        transport.is_streaming(self.stream)
    }

    /// Poll the transport and classify the edge
    ///
    /// The phase is reset on every poll that observes "not streaming", not
    /// only on the falling edge, so a completion that lands after the stop
    /// cannot leak into the next stream.
    pub fn poll<T: VideoTransport>(&mut self, transport: &T, phase: &FramePhase) -> GateStatus {
        let streaming = self.is_streaming(transport);

        let status = match (self.was_streaming, streaming) {
            (false, false) => GateStatus::Idle,
            (true, false) => GateStatus::Stopped,
            (false, true) => GateStatus::Started,
            (true, true) => GateStatus::Streaming,
        };

        if !streaming {
            self.on_stop(phase);
        }

        self.was_streaming = streaming;
        status
    }

    /// Restart the pattern from its first frame
    pub fn on_stop(&self, phase: &FramePhase) {
        phase.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::TransferError;

    struct FlagTransport {
        streaming: bool,
    }

    impl VideoTransport for FlagTransport {
        fn is_streaming(&self, stream: StreamIndex) -> bool {
            self.streaming && stream == StreamIndex::PRIMARY
        }

        fn is_ready(&self, _: StreamIndex) -> bool {
            true
        }

        fn submit_transfer(&mut self, _: StreamIndex, _: &[u8]) -> Result<(), TransferError> {
            Ok(())
        }
    }

    #[test]
    fn test_edges() {
        let mut transport = FlagTransport { streaming: false };
        let mut gate = StreamGate::new(StreamIndex::PRIMARY);
        let phase = FramePhase::new();

        assert_eq!(gate.poll(&transport, &phase), GateStatus::Idle);

        transport.streaming = true;
        assert_eq!(gate.poll(&transport, &phase), GateStatus::Started);
        assert_eq!(gate.poll(&transport, &phase), GateStatus::Streaming);

        transport.streaming = false;
        assert_eq!(gate.poll(&transport, &phase), GateStatus::Stopped);
        assert_eq!(gate.poll(&transport, &phase), GateStatus::Idle);
    }

    #[test]
    fn test_stop_resets_phase() {
        let mut transport = FlagTransport { streaming: true };
        let mut gate = StreamGate::new(StreamIndex::PRIMARY);
        let phase = FramePhase::new();

        gate.poll(&transport, &phase);
        phase.advance();
        phase.advance();
        assert_eq!(gate.poll(&transport, &phase), GateStatus::Streaming);
        assert_eq!(phase.get(), 2);

        transport.streaming = false;
        gate.poll(&transport, &phase);
        assert_eq!(phase.get(), 0);
    }

    #[test]
    fn test_idle_poll_resets_late_completion() {
        let transport = FlagTransport { streaming: false };
        let mut gate = StreamGate::new(StreamIndex::PRIMARY);
        let phase = FramePhase::new();

        // Completion of a transfer that was in flight when the stream stopped
        phase.advance();
        assert_eq!(gate.poll(&transport, &phase), GateStatus::Idle);
        assert_eq!(phase.get(), 0);
    }

    #[test]
    fn test_gate_open() {
        assert!(GateStatus::Started.is_open());
        assert!(GateStatus::Streaming.is_open());
        assert!(!GateStatus::Stopped.is_open());
        assert!(!GateStatus::Idle.is_open());
    }

    #[test]
    fn test_other_stream_index_not_streaming() {
        let transport = FlagTransport { streaming: true };
        let gate = StreamGate::new(StreamIndex(1));
        assert!(!gate.is_streaming(&transport));
    }
}
