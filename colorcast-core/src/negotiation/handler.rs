//! Negotiation handler
//!
//! Validates host-proposed stream parameters against the single supported
//! setting.

use super::probe::ProbeCommit;
use super::RequestErrorCode;
use crate::config::VideoConfig;
use crate::uvc::payload::PAYLOAD_HEADER_LEN;

/// Index of the only format descriptor
pub const FORMAT_INDEX: u8 = 1;

/// Index of the only frame descriptor
pub const FRAME_INDEX: u8 = 1;

/// bmFramingInfo: FID required, EOF may be present
const FRAMING_INFO: u8 = 0x03;

/// Clock reported in dwClockFrequency (USB full-speed SOF based, Hz)
const CLOCK_FREQUENCY_HZ: u32 = 48_000_000;

/// Parameters accepted by a successful commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Accepted {
    /// Committed frame interval (100 ns units)
    pub frame_interval: u32,
    /// Largest frame the device will send
    pub max_video_frame_size: u32,
    /// Largest payload per isochronous packet, header included
    pub max_payload_transfer_size: u32,
}

/// Validates probe and commit requests
#[derive(Debug, Clone)]
pub struct NegotiationHandler {
    frame_interval: u32,
    max_video_frame_size: u32,
    max_payload_transfer_size: u32,
}

impl NegotiationHandler {
    /// Create a handler for the configured stream
    pub fn new(config: &VideoConfig) -> Self {
        Self {
            frame_interval: config.frame_interval,
            max_video_frame_size: config.frame_size() as u32,
            max_payload_transfer_size: config.max_packet_size as u32,
        }
    }

    /// The single supported setting
    ///
    /// Also the answer to GET_MIN, GET_MAX and GET_DEF.
    pub fn supported(&self) -> ProbeCommit {
        ProbeCommit {
            hint: 0,
            format_index: FORMAT_INDEX,
            frame_index: FRAME_INDEX,
            frame_interval: self.frame_interval,
            max_video_frame_size: self.max_video_frame_size,
            max_payload_transfer_size: self.max_payload_transfer_size,
            clock_frequency: CLOCK_FREQUENCY_HZ,
            framing_info: FRAMING_INFO,
            preferred_version: 1,
            min_version: 1,
            max_version: 1,
            ..Default::default()
        }
    }

    /// Normalize a probe request
    ///
    /// Zero indices select the defaults. Any requested frame interval is
    /// replaced by the supported one, since the host expects the device to
    /// answer a probe with the closest setting it can do. Unknown format or
    /// frame indices are out of range.
    pub fn probe(&self, requested: &ProbeCommit) -> Result<ProbeCommit, RequestErrorCode> {
        let format_index = match requested.format_index {
            0 => FORMAT_INDEX,
            index => index,
        };
        let frame_index = match requested.frame_index {
            0 => FRAME_INDEX,
            index => index,
        };
        if format_index != FORMAT_INDEX || frame_index != FRAME_INDEX {
            return Err(RequestErrorCode::OutOfRange);
        }

        Ok(ProbeCommit {
            hint: requested.hint,
            ..self.supported()
        })
    }

    /// Validate a commit request
    ///
    /// One synchronous check per negotiation attempt; there is no retry.
    pub fn commit(&self, params: &ProbeCommit) -> Result<Accepted, RequestErrorCode> {
        if params.format_index != FORMAT_INDEX || params.frame_index != FRAME_INDEX {
            return Err(RequestErrorCode::OutOfRange);
        }
        if params.frame_interval != self.frame_interval {
            return Err(RequestErrorCode::OutOfRange);
        }
        // The host may lower the payload size, but each packet still needs
        // a header and some data
        if params.max_payload_transfer_size != 0
            && params.max_payload_transfer_size <= PAYLOAD_HEADER_LEN as u32
        {
            return Err(RequestErrorCode::InvalidValueWithinRange);
        }

        Ok(Accepted {
            frame_interval: params.frame_interval,
            max_video_frame_size: self.max_video_frame_size,
            max_payload_transfer_size: self.max_payload_transfer_size,
        })
    }
}
