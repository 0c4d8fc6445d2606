//! Stream state machine
//!
//! The stream state is a function of the previous state and a transport
//! event. A rejected commit never changes the state.

use super::events::StreamEvent;

/// Video stream states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StreamState {
    /// Boot, after stop, or after disconnect
    #[default]
    Idle,
    /// Probe/commit in progress
    Negotiating,
    /// Commit accepted and host started the stream
    Streaming,
}

impl StreamState {
    /// Check if frames should be sent
    pub fn is_streaming(&self) -> bool {
        matches!(self, StreamState::Streaming)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: StreamEvent) -> Self {
        use StreamEvent::*;
        use StreamState::*;

        match (self, event) {
            // Negotiation
            (Idle, Probe) => Negotiating,
            (Idle, CommitAccepted) => Negotiating,
            (Negotiating, Probe) => Negotiating,
            (Negotiating, CommitAccepted) => Negotiating,

            // Start requires an accepted commit; the caller checks that
            (Negotiating, Start) => Streaming,

            // Stop and reset from anywhere
            (_, Stop) => Idle,
            (_, Reset) => Idle,

            // Default: stay in current state (includes CommitRejected)
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_state() {
        assert_eq!(StreamState::default(), StreamState::Idle);
    }

    #[test]
    fn test_negotiate_and_start() {
        let state = StreamState::Idle;

        let probing = state.transition(StreamEvent::Probe);
        assert_eq!(probing, StreamState::Negotiating);

        let committed = probing.transition(StreamEvent::CommitAccepted);
        assert_eq!(committed, StreamState::Negotiating);

        let streaming = committed.transition(StreamEvent::Start);
        assert_eq!(streaming, StreamState::Streaming);
        assert!(streaming.is_streaming());
    }

    #[test]
    fn test_rejected_commit_keeps_state() {
        for state in [
            StreamState::Idle,
            StreamState::Negotiating,
            StreamState::Streaming,
        ] {
            assert_eq!(state.transition(StreamEvent::CommitRejected), state);
        }
    }

    #[test]
    fn test_start_from_idle_ignored() {
        assert_eq!(
            StreamState::Idle.transition(StreamEvent::Start),
            StreamState::Idle
        );
    }

    #[test]
    fn test_stop_and_reset_return_to_idle() {
        for state in [StreamState::Negotiating, StreamState::Streaming] {
            assert_eq!(state.transition(StreamEvent::Stop), StreamState::Idle);
            assert_eq!(state.transition(StreamEvent::Reset), StreamState::Idle);
        }
    }

    #[test]
    fn test_probe_while_streaming_ignored() {
        assert_eq!(
            StreamState::Streaming.transition(StreamEvent::Probe),
            StreamState::Streaming
        );
    }
}
