//! State shared between the USB control handler and the video tasks

use colorcast_core::status::{ConnectionEvent, ConnectionEventSlot};
use colorcast_core::traits::ConnectionStatus;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use heapless::Vec;
use portable_atomic::{AtomicBool, Ordering};

/// Staging buffer for one frame of up to `N` bytes
pub type FrameBuffer<const N: usize> = Vec<u8, N>;

/// Flags, staging buffer and event mailbox of the UVC function
pub struct UvcShared<const N: usize> {
    mounted: AtomicBool,
    streaming: AtomicBool,
    in_flight: AtomicBool,
    pub(crate) frame: Mutex<CriticalSectionRawMutex, FrameBuffer<N>>,
    pub(crate) frame_ready: Signal<CriticalSectionRawMutex, ()>,
    event: ConnectionEventSlot,
    event_ready: Signal<CriticalSectionRawMutex, ()>,
}

impl<const N: usize> Default for UvcShared<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> UvcShared<N> {
    /// Create the shared state with nothing mounted or streaming
    pub const fn new() -> Self {
        Self {
            mounted: AtomicBool::new(false),
            streaming: AtomicBool::new(false),
            in_flight: AtomicBool::new(false),
            frame: Mutex::new(Vec::new()),
            frame_ready: Signal::new(),
            event: ConnectionEventSlot::new(),
            event_ready: Signal::new(),
        }
    }

    /// Check if the host has started the stream
    pub fn is_streaming(&self) -> bool {
        self.streaming.load(Ordering::Acquire)
    }

    /// Check if a staged frame has not finished sending
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Wait for the newest connection event
    ///
    /// Events posted while nobody waits collapse to the last one.
    pub async fn next_event(&self) -> ConnectionEvent {
        loop {
            if let Some(event) = self.event.take() {
                return event;
            }
            self.event_ready.wait().await;
        }
    }

    pub(crate) fn set_streaming(&self, streaming: bool) {
        self.streaming.store(streaming, Ordering::Release);
    }

    pub(crate) fn set_in_flight(&self, in_flight: bool) {
        self.in_flight.store(in_flight, Ordering::Release);
    }

    pub(crate) fn set_mounted(&self, mounted: bool) {
        self.mounted.store(mounted, Ordering::Release);
    }

    /// Publish a connection event, replacing any unread one
    pub(crate) fn notify(&self, event: ConnectionEvent) {
        self.event.post(event);
        self.event_ready.signal(());
    }
}

impl<const N: usize> ConnectionStatus for UvcShared<N> {
    fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }
}
