//! Latest-event mailbox between the USB stack and the status task
//!
//! The blink period depends only on the most recent connection event, so
//! a burst of events collapses to the last one. Posting never fails and
//! never blocks, which keeps it usable from the USB control handler.

use portable_atomic::{AtomicU8, Ordering};

use super::ConnectionEvent;

const EMPTY: u8 = 0;

/// Single-slot holder for the newest unread [`ConnectionEvent`]
#[derive(Debug)]
pub struct ConnectionEventSlot {
    pending: AtomicU8,
}

impl Default for ConnectionEventSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionEventSlot {
    /// Create an empty slot
    pub const fn new() -> Self {
        Self {
            pending: AtomicU8::new(EMPTY),
        }
    }

    /// Store `event`, replacing any unread one
    pub fn post(&self, event: ConnectionEvent) {
        self.pending.store(encode(event), Ordering::Release);
    }

    /// Take the newest unread event, leaving the slot empty
    pub fn take(&self) -> Option<ConnectionEvent> {
        decode(self.pending.swap(EMPTY, Ordering::AcqRel))
    }
}

fn encode(event: ConnectionEvent) -> u8 {
    match event {
        ConnectionEvent::Mounted => 1,
        ConnectionEvent::Unmounted => 2,
        ConnectionEvent::Suspended => 3,
        ConnectionEvent::Resumed => 4,
    }
}

fn decode(raw: u8) -> Option<ConnectionEvent> {
    match raw {
        1 => Some(ConnectionEvent::Mounted),
        2 => Some(ConnectionEvent::Unmounted),
        3 => Some(ConnectionEvent::Suspended),
        4 => Some(ConnectionEvent::Resumed),
        _ => None,
    }
}
