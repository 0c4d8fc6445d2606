//! Transfer submitter
//!
//! One call to [`TransferSubmitter::tick`] per scheduler tick. When the
//! gate is open and the transport is ready, the frame for the current phase
//! is produced and handed to the transport. The phase itself only moves on
//! completion, so a busy transport makes a later tick resubmit the same
//! frame. Nothing is rendered while a transfer is in flight.

use super::context::StreamContext;
use crate::frame::FrameSource;
use crate::stream::{GateStatus, StreamGate};
use crate::traits::{TransferError, VideoTransport};

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Host is not streaming
    Idle,
    /// Host stopped streaming since the previous tick
    Stopped,
    /// Frame for `phase` was accepted by the transport
    Submitted { phase: u32 },
    /// Previous transfer still in flight, retried next tick
    Busy { phase: u32 },
    /// Transport rejected the frame
    Failed(TransferError),
}

/// Per-tick producer
pub struct TransferSubmitter<'a, S> {
    context: &'a StreamContext,
    source: S,
    gate: StreamGate,
}

impl<'a, S: FrameSource> TransferSubmitter<'a, S> {
    /// Create a submitter feeding the context's stream from `source`
    pub fn new(context: &'a StreamContext, source: S) -> Self {
        Self {
            context,
            source,
            gate: StreamGate::new(context.stream()),
        }
    }

    /// Run one tick
    pub fn tick<T: VideoTransport>(&mut self, transport: &mut T) -> TickOutcome {
        match self.gate.poll(transport, self.context.frame_phase()) {
            GateStatus::Idle => return TickOutcome::Idle,
            GateStatus::Stopped => return TickOutcome::Stopped,
            GateStatus::Started | GateStatus::Streaming => {}
        }

        let phase = self.context.phase();
        if !transport.is_ready(self.context.stream()) {
            return TickOutcome::Busy { phase };
        }

        let frame = self.source.produce(phase);

        match transport.submit_transfer(self.context.stream(), frame) {
            Ok(()) => TickOutcome::Submitted { phase },
            Err(TransferError::Busy) => TickOutcome::Busy { phase },
            Err(e) => TickOutcome::Failed(e),
        }
    }

    /// Frame source
    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{fill_frame, ColorBarSource, FixedTableSource, Geometry};
    use crate::traits::StreamIndex;

    /// Transport that records submissions and tracks one in-flight transfer
    #[derive(Default)]
    struct RecordingTransport {
        streaming: bool,
        in_flight: bool,
        submissions: Vec<Vec<u8>>,
    }

    impl RecordingTransport {
        fn streaming() -> Self {
            Self {
                streaming: true,
                ..Default::default()
            }
        }

        fn complete(&mut self, ctx: &StreamContext) {
            assert!(self.in_flight, "completion without a transfer");
            self.in_flight = false;
            ctx.on_transfer_complete(StreamIndex::PRIMARY);
        }
    }

    impl VideoTransport for RecordingTransport {
        fn is_streaming(&self, stream: StreamIndex) -> bool {
            self.streaming && stream == StreamIndex::PRIMARY
        }

        fn is_ready(&self, _: StreamIndex) -> bool {
            !self.in_flight
        }

        fn submit_transfer(&mut self, stream: StreamIndex, payload: &[u8]) -> Result<(), TransferError> {
            if !self.is_streaming(stream) {
                return Err(TransferError::NotStreaming);
            }
            if self.in_flight {
                return Err(TransferError::Busy);
            }
            self.in_flight = true;
            self.submissions.push(payload.to_vec());
            Ok(())
        }
    }

    fn geometry() -> Geometry {
        Geometry::new(32, 2).unwrap()
    }

    fn expected_frame(phase: u32) -> Vec<u8> {
        let g = geometry();
        let mut frame = vec![0u8; g.frame_size()];
        fill_frame(&mut frame, &g, phase).unwrap();
        frame
    }

    fn color_bars() -> ColorBarSource<Vec<u8>> {
        ColorBarSource::new(vec![0u8; geometry().frame_size()], geometry()).unwrap()
    }

    #[test]
    fn test_idle_never_submits() {
        let ctx = StreamContext::new(StreamIndex::PRIMARY);
        let mut transport = RecordingTransport::default();
        let mut submitter = TransferSubmitter::new(&ctx, color_bars());

        for _ in 0..5 {
            assert_eq!(submitter.tick(&mut transport), TickOutcome::Idle);
        }
        assert!(transport.submissions.is_empty());
        assert_eq!(ctx.phase(), 0);
    }

    #[test]
    fn test_ten_ticks_with_completions() {
        let ctx = StreamContext::new(StreamIndex::PRIMARY);
        let mut transport = RecordingTransport::streaming();
        let mut submitter = TransferSubmitter::new(&ctx, color_bars());

        for k in 0..10 {
            assert_eq!(
                submitter.tick(&mut transport),
                TickOutcome::Submitted { phase: k }
            );
            transport.complete(&ctx);
        }

        assert_eq!(ctx.phase(), 10);
        assert_eq!(transport.submissions.len(), 10);
        for (k, frame) in transport.submissions.iter().enumerate() {
            assert_eq!(frame, &expected_frame(k as u32));
        }
    }

    #[test]
    fn test_busy_retries_same_phase() {
        let ctx = StreamContext::new(StreamIndex::PRIMARY);
        let mut transport = RecordingTransport::streaming();
        let mut submitter = TransferSubmitter::new(&ctx, color_bars());

        assert_eq!(
            submitter.tick(&mut transport),
            TickOutcome::Submitted { phase: 0 }
        );
        // Transfer takes three ticks to finish
        for _ in 0..3 {
            assert_eq!(submitter.tick(&mut transport), TickOutcome::Busy { phase: 0 });
        }
        assert_eq!(ctx.phase(), 0);
        assert_eq!(transport.submissions.len(), 1);

        transport.complete(&ctx);
        assert_eq!(
            submitter.tick(&mut transport),
            TickOutcome::Submitted { phase: 1 }
        );
        assert_eq!(transport.submissions[1], expected_frame(1));
    }

    /// Source that counts how often a frame is rendered
    struct CountingSource {
        frame: [u8; 4],
        renders: u32,
    }

    impl FrameSource for CountingSource {
        fn produce(&mut self, phase: u32) -> &[u8] {
            self.renders += 1;
            self.frame = [phase as u8; 4];
            &self.frame
        }

        fn frame_size(&self) -> usize {
            self.frame.len()
        }
    }

    #[test]
    fn test_busy_ticks_render_nothing() {
        let ctx = StreamContext::new(StreamIndex::PRIMARY);
        let mut transport = RecordingTransport::streaming();
        let source = CountingSource {
            frame: [0; 4],
            renders: 0,
        };
        let mut submitter = TransferSubmitter::new(&ctx, source);

        assert_eq!(
            submitter.tick(&mut transport),
            TickOutcome::Submitted { phase: 0 }
        );
        assert_eq!(submitter.source().renders, 1);

        // A full frame takes many ticks on the wire
        for _ in 0..48 {
            assert_eq!(submitter.tick(&mut transport), TickOutcome::Busy { phase: 0 });
        }
        assert_eq!(submitter.source().renders, 1);

        transport.complete(&ctx);
        assert_eq!(
            submitter.tick(&mut transport),
            TickOutcome::Submitted { phase: 1 }
        );
        assert_eq!(submitter.source().renders, 2);
        assert_eq!(transport.submissions[1], vec![1; 4]);
    }

    #[test]
    fn test_restart_begins_at_first_frame() {
        let ctx = StreamContext::new(StreamIndex::PRIMARY);
        let mut transport = RecordingTransport::streaming();
        let mut submitter = TransferSubmitter::new(&ctx, color_bars());

        for _ in 0..3 {
            submitter.tick(&mut transport);
            transport.complete(&ctx);
        }
        assert_eq!(ctx.phase(), 3);

        transport.streaming = false;
        assert_eq!(submitter.tick(&mut transport), TickOutcome::Stopped);
        assert_eq!(ctx.phase(), 0);

        transport.streaming = true;
        assert_eq!(
            submitter.tick(&mut transport),
            TickOutcome::Submitted { phase: 0 }
        );
        assert_eq!(transport.submissions[3], transport.submissions[0]);
    }

    #[test]
    fn test_late_completion_after_stop() {
        let ctx = StreamContext::new(StreamIndex::PRIMARY);
        let mut transport = RecordingTransport::streaming();
        let mut submitter = TransferSubmitter::new(&ctx, color_bars());

        submitter.tick(&mut transport);
        transport.streaming = false;
        assert_eq!(submitter.tick(&mut transport), TickOutcome::Stopped);

        // Completion lands after the stop was observed
        transport.complete(&ctx);
        assert_eq!(ctx.phase(), 1);
        assert_eq!(submitter.tick(&mut transport), TickOutcome::Idle);
        assert_eq!(ctx.phase(), 0);

        transport.streaming = true;
        assert_eq!(
            submitter.tick(&mut transport),
            TickOutcome::Submitted { phase: 0 }
        );
    }

    #[test]
    fn test_foreign_completion_ignored() {
        let ctx = StreamContext::new(StreamIndex::PRIMARY);
        let mut transport = RecordingTransport::streaming();
        let mut submitter = TransferSubmitter::new(&ctx, color_bars());

        submitter.tick(&mut transport);
        ctx.on_transfer_complete(StreamIndex(1));
        assert_eq!(ctx.phase(), 0);
    }

    #[test]
    fn test_fixed_table_cycles() {
        static A: [u8; 4] = [1; 4];
        static B: [u8; 4] = [2; 4];
        static TABLE: [&[u8]; 2] = [&A, &B];

        let ctx = StreamContext::new(StreamIndex::PRIMARY);
        let mut transport = RecordingTransport::streaming();
        let source = FixedTableSource::new(&TABLE).unwrap();
        let mut submitter = TransferSubmitter::new(&ctx, source);

        for _ in 0..4 {
            submitter.tick(&mut transport);
            transport.complete(&ctx);
        }
        assert_eq!(transport.submissions, vec![A.to_vec(), B.to_vec(), A.to_vec(), B.to_vec()]);
        assert_eq!(submitter.source().len(), 2);
    }

    #[test]
    fn test_transport_error_reported() {
        struct Refusing;
        impl VideoTransport for Refusing {
            fn is_streaming(&self, _: StreamIndex) -> bool {
                true
            }
            fn is_ready(&self, _: StreamIndex) -> bool {
                true
            }
            fn submit_transfer(&mut self, _: StreamIndex, _: &[u8]) -> Result<(), TransferError> {
                Err(TransferError::TooLarge)
            }
        }

        let ctx = StreamContext::new(StreamIndex::PRIMARY);
        let mut submitter = TransferSubmitter::new(&ctx, color_bars());
        assert_eq!(
            submitter.tick(&mut Refusing),
            TickOutcome::Failed(TransferError::TooLarge)
        );
        assert_eq!(ctx.phase(), 0);
    }
}
