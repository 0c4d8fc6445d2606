//! UVC function descriptors
//!
//! One VideoControl interface with a camera terminal wired to a streaming
//! output terminal, and one VideoStreaming interface. Alternate setting 0
//! has no endpoint; alternate setting 1 carries the isochronous IN
//! endpoint.

use colorcast_core::config::VideoConfig;
use colorcast_core::uvc::descriptors::{
    camera_input_terminal, color_matching, format_uncompressed, frame_uncompressed,
    output_terminal, vc_header, vs_input_header,
};
use colorcast_core::uvc::{
    CC_VIDEO, CS_INTERFACE, PC_PROTOCOL_UNDEFINED, SC_VIDEOCONTROL, SC_VIDEOSTREAMING,
    SC_VIDEO_INTERFACE_COLLECTION,
};
use embassy_usb::driver::{
    Direction, Driver, EndpointAddress, SynchronizationType, UsageType,
};
use embassy_usb::types::InterfaceNumber;
use embassy_usb::Builder;

/// Address of the video data endpoint (EP1 IN)
pub const VIDEO_ENDPOINT_ADDR: u8 = 0x81;

/// Isochronous service interval (frames)
const ISO_INTERVAL_MS: u8 = 1;

/// Interface numbers assigned to the UVC function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UvcInterfaces {
    pub control: InterfaceNumber,
    pub streaming: InterfaceNumber,
}

/// Add the UVC function to `builder`
///
/// Returns the assigned interface numbers and the video IN endpoint.
pub fn build_function<'d, D: Driver<'d>>(
    builder: &mut Builder<'d, D>,
    video: &VideoConfig,
) -> (UvcInterfaces, D::EndpointIn) {
    let mut func = builder.function(
        CC_VIDEO,
        SC_VIDEO_INTERFACE_COLLECTION,
        PC_PROTOCOL_UNDEFINED,
    );

    let control = {
        let mut iface = func.interface();
        let number = iface.interface_number();
        // The streaming interface is allocated right after this one
        let streaming_number = number.0 + 1;

        let mut alt = iface.alt_setting(CC_VIDEO, SC_VIDEOCONTROL, PC_PROTOCOL_UNDEFINED, None);
        alt.descriptor(CS_INTERFACE, &vc_header(streaming_number)[2..]);
        alt.descriptor(CS_INTERFACE, &camera_input_terminal()[2..]);
        alt.descriptor(CS_INTERFACE, &output_terminal()[2..]);
        number
    };

    let mut iface = func.interface();
    let streaming = iface.interface_number();

    {
        let mut alt = iface.alt_setting(CC_VIDEO, SC_VIDEOSTREAMING, PC_PROTOCOL_UNDEFINED, None);
        alt.descriptor(CS_INTERFACE, &vs_input_header(VIDEO_ENDPOINT_ADDR)[2..]);
        alt.descriptor(CS_INTERFACE, &format_uncompressed()[2..]);
        alt.descriptor(CS_INTERFACE, &frame_uncompressed(video)[2..]);
        alt.descriptor(CS_INTERFACE, &color_matching()[2..]);
    }

    let mut alt = iface.alt_setting(CC_VIDEO, SC_VIDEOSTREAMING, PC_PROTOCOL_UNDEFINED, None);
    let endpoint = alt.endpoint_isochronous_in(
        Some(EndpointAddress::from_parts(
            (VIDEO_ENDPOINT_ADDR & 0x0F) as usize,
            Direction::In,
        )),
        video.max_packet_size,
        ISO_INTERVAL_MS,
        SynchronizationType::Asynchronous,
        UsageType::DataEndpoint,
        &[],
    );

    (UvcInterfaces { control, streaming }, endpoint)
}
