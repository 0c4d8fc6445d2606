//! USB Video Class wire formats
//!
//! Pure encoders and the class request dispatcher. Nothing here touches the
//! USB peripheral; the HAL crate feeds requests in and writes bytes out.

pub mod control;
pub mod descriptors;
pub mod payload;

pub use control::VideoStreamingControl;
pub use payload::{PayloadHeader, Packetizer, PAYLOAD_HEADER_LEN};

/// Video interface class
pub const CC_VIDEO: u8 = 0x0E;

/// Interface subclasses
pub const SC_VIDEOCONTROL: u8 = 0x01;
pub const SC_VIDEOSTREAMING: u8 = 0x02;
pub const SC_VIDEO_INTERFACE_COLLECTION: u8 = 0x03;

/// Interface protocol
pub const PC_PROTOCOL_UNDEFINED: u8 = 0x00;

/// Class-specific interface descriptor type
pub const CS_INTERFACE: u8 = 0x24;

/// bcdUVC advertised in the VideoControl header
pub const UVC_VERSION: u16 = 0x0110;

/// VideoStreaming control selectors
pub const VS_PROBE_CONTROL: u8 = 0x01;
pub const VS_COMMIT_CONTROL: u8 = 0x02;

/// VideoControl interface control selector
pub const VC_REQUEST_ERROR_CODE_CONTROL: u8 = 0x02;

/// Alternate setting carrying the isochronous endpoint
pub const STREAMING_ALT_SETTING: u8 = 1;

/// UVC class-specific request codes (`bRequest`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClassRequest {
    SetCur,
    GetCur,
    GetMin,
    GetMax,
    GetRes,
    GetLen,
    GetInfo,
    GetDef,
}

impl ClassRequest {
    /// Parse `bRequest`
    pub fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0x01 => Some(ClassRequest::SetCur),
            0x81 => Some(ClassRequest::GetCur),
            0x82 => Some(ClassRequest::GetMin),
            0x83 => Some(ClassRequest::GetMax),
            0x84 => Some(ClassRequest::GetRes),
            0x85 => Some(ClassRequest::GetLen),
            0x86 => Some(ClassRequest::GetInfo),
            0x87 => Some(ClassRequest::GetDef),
            _ => None,
        }
    }

    /// Raw `bRequest` value
    pub fn as_u8(self) -> u8 {
        match self {
            ClassRequest::SetCur => 0x01,
            ClassRequest::GetCur => 0x81,
            ClassRequest::GetMin => 0x82,
            ClassRequest::GetMax => 0x83,
            ClassRequest::GetRes => 0x84,
            ClassRequest::GetLen => 0x85,
            ClassRequest::GetInfo => 0x86,
            ClassRequest::GetDef => 0x87,
        }
    }
}
