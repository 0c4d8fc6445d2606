//! USB control handler for the UVC function

use colorcast_core::config::VideoConfig;
use colorcast_core::status::ConnectionEvent;
use colorcast_core::stream::StreamState;
use colorcast_core::uvc::VideoStreamingControl;
use embassy_usb::control::{InResponse, OutResponse, Recipient, Request, RequestType};
use embassy_usb::types::InterfaceNumber;
use embassy_usb::Handler;

use super::function::UvcInterfaces;
use super::shared::UvcShared;

/// Answers UVC class requests and tracks connection state
pub struct UvcHandler<const N: usize> {
    shared: &'static UvcShared<N>,
    control: VideoStreamingControl,
    interfaces: UvcInterfaces,
}

impl<const N: usize> UvcHandler<N> {
    /// Create a handler answering for `interfaces` with the given video format
    pub fn new(shared: &'static UvcShared<N>, video: &VideoConfig, interfaces: UvcInterfaces) -> Self {
        Self {
            shared,
            control: VideoStreamingControl::new(video),
            interfaces,
        }
    }

    /// Current stream state
    pub fn state(&self) -> StreamState {
        self.control.state()
    }

    fn target(&self, req: &Request) -> Option<Target> {
        if req.request_type != RequestType::Class || req.recipient != Recipient::Interface {
            return None;
        }
        let iface = (req.index & 0xFF) as u8;
        if iface == self.interfaces.streaming.0 {
            Some(Target::Streaming)
        } else if iface == self.interfaces.control.0 {
            Some(Target::Control)
        } else {
            None
        }
    }

    fn sync_streaming(&self) {
        self.shared.set_streaming(self.control.state().is_streaming());
    }

    fn disconnect(&mut self) {
        self.control.reset();
        self.sync_streaming();
        self.shared.set_mounted(false);
        self.shared.notify(ConnectionEvent::Unmounted);
    }
}

enum Target {
    Control,
    Streaming,
}

fn selector(req: &Request) -> u8 {
    (req.value >> 8) as u8
}

impl<const N: usize> Handler for UvcHandler<N> {
    fn enabled(&mut self, enabled: bool) {
        if !enabled {
            self.disconnect();
        }
    }

    fn reset(&mut self) {
        self.disconnect();
    }

    fn configured(&mut self, configured: bool) {
        if configured {
            self.shared.set_mounted(true);
            self.shared.notify(ConnectionEvent::Mounted);
        } else {
            self.disconnect();
        }
    }

    fn suspended(&mut self, suspended: bool) {
        let event = if suspended {
            ConnectionEvent::Suspended
        } else {
            ConnectionEvent::Resumed
        };
        self.shared.notify(event);
    }

    fn set_alternate_setting(&mut self, iface: InterfaceNumber, alternate_setting: u8) {
        if iface == self.interfaces.streaming {
            let _state = self.control.set_alternate_setting(alternate_setting);
            #[cfg(feature = "defmt")]
            defmt::debug!("VS alt setting {} -> {}", alternate_setting, _state);
            self.sync_streaming();
        }
    }

    fn control_out(&mut self, req: Request, data: &[u8]) -> Option<OutResponse> {
        match self.target(&req)? {
            Target::Streaming => match self.control.set(req.request, selector(&req), data) {
                Ok(()) => Some(OutResponse::Accepted),
                Err(_code) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!(
                        "VS request {=u8:#x} selector {} rejected: {}",
                        req.request,
                        selector(&req),
                        _code
                    );
                    Some(OutResponse::Rejected)
                }
            },
            // The request error code control is read-only
            Target::Control => Some(OutResponse::Rejected),
        }
    }

    fn control_in<'a>(&'a mut self, req: Request, buf: &'a mut [u8]) -> Option<InResponse<'a>> {
        let target = self.target(&req)?;
        let len = (req.length as usize).min(buf.len());

        let result = match target {
            Target::Streaming => self.control.get(req.request, selector(&req), &mut buf[..len]),
            Target::Control => self.control.get_control(req.request, selector(&req), &mut buf[..len]),
        };

        match result {
            Ok(n) => Some(InResponse::Accepted(&buf[..n])),
            Err(_) => Some(InResponse::Rejected),
        }
    }
}
