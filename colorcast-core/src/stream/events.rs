//! Events that drive stream state transitions
//!
//! All events originate in the transport (host control requests and bus
//! state), never in the frame pipeline.

/// Events reported by the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StreamEvent {
    /// Host wrote the probe control
    Probe,
    /// Host wrote an acceptable commit control
    CommitAccepted,
    /// Host wrote a commit the device rejected
    CommitRejected,
    /// Host selected the streaming alternate setting
    Start,
    /// Host selected the zero-bandwidth alternate setting
    Stop,
    /// Bus reset or device unmounted
    Reset,
}

impl StreamEvent {
    /// Check if this event comes from probe/commit negotiation
    pub fn is_negotiation_event(&self) -> bool {
        matches!(
            self,
            StreamEvent::Probe | StreamEvent::CommitAccepted | StreamEvent::CommitRejected
        )
    }
}
