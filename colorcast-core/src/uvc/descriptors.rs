//! Class-specific descriptors
//!
//! Each builder returns the complete descriptor including `bLength` and
//! `bDescriptorType`. USB stacks that prepend those two bytes themselves
//! take `&desc[2..]`.

use super::{CS_INTERFACE, UVC_VERSION};
use crate::config::VideoConfig;
use crate::negotiation::{FORMAT_INDEX, FRAME_INDEX};

/// Descriptor lengths
pub const VC_HEADER_LEN: usize = 13;
pub const INPUT_TERMINAL_LEN: usize = 18;
pub const OUTPUT_TERMINAL_LEN: usize = 9;
pub const VS_INPUT_HEADER_LEN: usize = 14;
pub const FORMAT_UNCOMPRESSED_LEN: usize = 27;
pub const FRAME_UNCOMPRESSED_LEN: usize = 30;
pub const COLOR_MATCHING_LEN: usize = 6;

/// Total length of the class-specific VideoControl descriptors
pub const VC_TOTAL_LEN: u16 = (VC_HEADER_LEN + INPUT_TERMINAL_LEN + OUTPUT_TERMINAL_LEN) as u16;

/// Total length of the class-specific VideoStreaming descriptors
pub const VS_TOTAL_LEN: u16 =
    (VS_INPUT_HEADER_LEN + FORMAT_UNCOMPRESSED_LEN + FRAME_UNCOMPRESSED_LEN + COLOR_MATCHING_LEN)
        as u16;

/// Entity IDs
pub const CAMERA_TERMINAL_ID: u8 = 1;
pub const OUTPUT_TERMINAL_ID: u8 = 2;

/// Terminal types
const ITT_CAMERA: u16 = 0x0201;
const TT_STREAMING: u16 = 0x0101;

/// Descriptor subtypes
const VC_HEADER: u8 = 0x01;
const VC_INPUT_TERMINAL: u8 = 0x02;
const VC_OUTPUT_TERMINAL: u8 = 0x03;
const VS_INPUT_HEADER: u8 = 0x01;
const VS_FORMAT_UNCOMPRESSED: u8 = 0x04;
const VS_FRAME_UNCOMPRESSED: u8 = 0x05;
const VS_COLORFORMAT: u8 = 0x0D;

/// YUY2 format GUID (32595559-0000-0010-8000-00AA00389B71)
pub const GUID_YUY2: [u8; 16] = [
    b'Y', b'U', b'Y', b'2', 0x00, 0x00, 0x10, 0x00, 0x80, 0x00, 0x00, 0xAA, 0x00, 0x38, 0x9B,
    0x71,
];

/// Device clock reported in the VideoControl header (Hz)
const DEVICE_CLOCK_HZ: u32 = 48_000_000;

/// Little-endian descriptor writer over a fixed array
struct Writer<const N: usize> {
    buf: [u8; N],
    pos: usize,
}

impl<const N: usize> Writer<N> {
    fn new(subtype: u8) -> Self {
        let mut writer = Self {
            buf: [0u8; N],
            pos: 0,
        };
        writer.u8(N as u8).u8(CS_INTERFACE).u8(subtype);
        writer
    }

    fn u8(&mut self, value: u8) -> &mut Self {
        self.buf[self.pos] = value;
        self.pos += 1;
        self
    }

    fn u16(&mut self, value: u16) -> &mut Self {
        self.bytes(&value.to_le_bytes())
    }

    fn u32(&mut self, value: u32) -> &mut Self {
        self.bytes(&value.to_le_bytes())
    }

    fn bytes(&mut self, data: &[u8]) -> &mut Self {
        self.buf[self.pos..self.pos + data.len()].copy_from_slice(data);
        self.pos += data.len();
        self
    }

    fn finish(&self) -> [u8; N] {
        debug_assert_eq!(self.pos, N);
        self.buf
    }
}

/// VideoControl interface header
pub fn vc_header(streaming_interface: u8) -> [u8; VC_HEADER_LEN] {
    Writer::<VC_HEADER_LEN>::new(VC_HEADER)
        .u16(UVC_VERSION)
        .u16(VC_TOTAL_LEN)
        .u32(DEVICE_CLOCK_HZ)
        .u8(1) // bInCollection
        .u8(streaming_interface)
        .finish()
}

/// Camera input terminal with no controls
pub fn camera_input_terminal() -> [u8; INPUT_TERMINAL_LEN] {
    Writer::<INPUT_TERMINAL_LEN>::new(VC_INPUT_TERMINAL)
        .u8(CAMERA_TERMINAL_ID)
        .u16(ITT_CAMERA)
        .u8(0) // bAssocTerminal
        .u8(0) // iTerminal
        .u16(0) // wObjectiveFocalLengthMin
        .u16(0) // wObjectiveFocalLengthMax
        .u16(0) // wOcularFocalLength
        .u8(3) // bControlSize
        .bytes(&[0, 0, 0])
        .finish()
}

/// Streaming output terminal fed by the camera terminal
pub fn output_terminal() -> [u8; OUTPUT_TERMINAL_LEN] {
    Writer::<OUTPUT_TERMINAL_LEN>::new(VC_OUTPUT_TERMINAL)
        .u8(OUTPUT_TERMINAL_ID)
        .u16(TT_STREAMING)
        .u8(0) // bAssocTerminal
        .u8(CAMERA_TERMINAL_ID)
        .u8(0) // iTerminal
        .finish()
}

/// VideoStreaming input header for one format
pub fn vs_input_header(endpoint_address: u8) -> [u8; VS_INPUT_HEADER_LEN] {
    Writer::<VS_INPUT_HEADER_LEN>::new(VS_INPUT_HEADER)
        .u8(1) // bNumFormats
        .u16(VS_TOTAL_LEN)
        .u8(endpoint_address)
        .u8(0) // bmInfo
        .u8(OUTPUT_TERMINAL_ID)
        .u8(0) // bStillCaptureMethod
        .u8(0) // bTriggerSupport
        .u8(0) // bTriggerUsage
        .u8(1) // bControlSize
        .u8(0) // bmaControls
        .finish()
}

/// Uncompressed YUY2 format
pub fn format_uncompressed() -> [u8; FORMAT_UNCOMPRESSED_LEN] {
    Writer::<FORMAT_UNCOMPRESSED_LEN>::new(VS_FORMAT_UNCOMPRESSED)
        .u8(FORMAT_INDEX)
        .u8(1) // bNumFrameDescriptors
        .bytes(&GUID_YUY2)
        .u8(16) // bBitsPerPixel
        .u8(FRAME_INDEX) // bDefaultFrameIndex
        .u8(0) // bAspectRatioX
        .u8(0) // bAspectRatioY
        .u8(0) // bmInterlaceFlags
        .u8(0) // bCopyProtect
        .finish()
}

/// Uncompressed frame with one discrete frame interval
pub fn frame_uncompressed(config: &VideoConfig) -> [u8; FRAME_UNCOMPRESSED_LEN] {
    let bit_rate = config.bit_rate();
    Writer::<FRAME_UNCOMPRESSED_LEN>::new(VS_FRAME_UNCOMPRESSED)
        .u8(FRAME_INDEX)
        .u8(0) // bmCapabilities
        .u16(config.width)
        .u16(config.height)
        .u32(bit_rate) // dwMinBitRate
        .u32(bit_rate) // dwMaxBitRate
        .u32(config.frame_size() as u32)
        .u32(config.frame_interval) // dwDefaultFrameInterval
        .u8(1) // bFrameIntervalType: one discrete interval
        .u32(config.frame_interval)
        .finish()
}

/// BT.709 primaries and transfer, SMPTE 170M matrix
pub fn color_matching() -> [u8; COLOR_MATCHING_LEN] {
    Writer::<COLOR_MATCHING_LEN>::new(VS_COLORFORMAT)
        .u8(1) // bColorPrimaries
        .u8(1) // bTransferCharacteristics
        .u8(4) // bMatrixCoefficients
        .finish()
}
