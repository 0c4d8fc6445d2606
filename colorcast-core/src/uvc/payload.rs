//! UVC payload framing
//!
//! Every isochronous packet starts with a 2-byte payload header. The frame
//! ID bit toggles per frame and the end-of-frame bit marks the last packet.

/// Length of the payload header used by this device
pub const PAYLOAD_HEADER_LEN: usize = 2;

/// bmHeaderInfo bits
pub const HEADER_FID: u8 = 0x01;
pub const HEADER_EOF: u8 = 0x02;
pub const HEADER_EOH: u8 = 0x80;

/// Payload header without timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PayloadHeader {
    /// Frame ID bit
    pub fid: bool,
    /// Last packet of the frame
    pub eof: bool,
}

impl PayloadHeader {
    /// Encode as bHeaderLength, bmHeaderInfo
    pub fn to_bytes(&self) -> [u8; PAYLOAD_HEADER_LEN] {
        let mut info = HEADER_EOH;
        if self.fid {
            info |= HEADER_FID;
        }
        if self.eof {
            info |= HEADER_EOF;
        }
        [PAYLOAD_HEADER_LEN as u8, info]
    }
}

/// Splits one frame into header-prefixed packets
pub struct Packetizer<'a> {
    frame: &'a [u8],
    offset: usize,
    packet_size: usize,
    fid: bool,
    done: bool,
}

impl<'a> Packetizer<'a> {
    /// Packetize `frame` into packets of at most `packet_size` bytes
    pub fn new(frame: &'a [u8], packet_size: usize, fid: bool) -> Self {
        Self {
            frame,
            offset: 0,
            packet_size,
            fid,
            done: false,
        }
    }

    /// Number of packets needed for a frame
    pub fn packet_count(frame_len: usize, packet_size: usize) -> usize {
        let data = packet_size.saturating_sub(PAYLOAD_HEADER_LEN).max(1);
        frame_len.div_ceil(data).max(1)
    }

    /// Bytes of the frame already emitted
    pub fn sent(&self) -> usize {
        self.offset
    }

    /// Write the next packet into `out`, returning its length
    ///
    /// Returns `None` after the end-of-frame packet, or if `out` cannot hold
    /// a header plus one data byte.
    pub fn next_packet(&mut self, out: &mut [u8]) -> Option<usize> {
        if self.done {
            return None;
        }

        let remaining = self.frame.len() - self.offset;
        let room = self.packet_size.min(out.len()).saturating_sub(PAYLOAD_HEADER_LEN);
        if room == 0 && remaining > 0 {
            self.done = true;
            return None;
        }
        if out.len() < PAYLOAD_HEADER_LEN {
            self.done = true;
            return None;
        }

        let chunk = remaining.min(room);
        let eof = chunk == remaining;
        let header = PayloadHeader { fid: self.fid, eof };

        out[..PAYLOAD_HEADER_LEN].copy_from_slice(&header.to_bytes());
        out[PAYLOAD_HEADER_LEN..PAYLOAD_HEADER_LEN + chunk]
            .copy_from_slice(&self.frame[self.offset..self.offset + chunk]);

        self.offset += chunk;
        self.done = eof;
        Some(PAYLOAD_HEADER_LEN + chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_bits() {
        assert_eq!(
            PayloadHeader { fid: false, eof: false }.to_bytes(),
            [2, 0x80]
        );
        assert_eq!(PayloadHeader { fid: true, eof: true }.to_bytes(), [2, 0x83]);
    }

    #[test]
    fn test_packets_cover_frame() {
        let frame: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let mut packetizer = Packetizer::new(&frame, 64, true);
        let mut out = [0u8; 64];
        let mut collected = Vec::new();
        let mut packets = 0;

        while let Some(len) = packetizer.next_packet(&mut out) {
            packets += 1;
            assert!(len <= 64);
            assert_eq!(out[0], 2);
            assert_eq!(out[1] & HEADER_FID, HEADER_FID);
            let last = collected.len() + len - 2 == frame.len();
            assert_eq!(out[1] & HEADER_EOF != 0, last);
            collected.extend_from_slice(&out[2..len]);
        }

        assert_eq!(collected, frame);
        assert_eq!(packets, Packetizer::packet_count(1000, 64));
        assert_eq!(packetizer.sent(), 1000);
    }

    #[test]
    fn test_exact_multiple() {
        let frame = [7u8; 124];
        let mut packetizer = Packetizer::new(&frame, 64, false);
        let mut out = [0u8; 64];

        assert_eq!(packetizer.next_packet(&mut out), Some(64));
        assert_eq!(out[1], 0x80);
        assert_eq!(packetizer.next_packet(&mut out), Some(64));
        assert_eq!(out[1], 0x82);
        assert_eq!(packetizer.next_packet(&mut out), None);
        assert_eq!(Packetizer::packet_count(124, 64), 2);
    }

    #[test]
    fn test_empty_frame_sends_eof_header() {
        let mut packetizer = Packetizer::new(&[], 64, true);
        let mut out = [0u8; 64];
        assert_eq!(packetizer.next_packet(&mut out), Some(2));
        assert_eq!(out[..2], [2, 0x83]);
        assert_eq!(packetizer.next_packet(&mut out), None);
    }

    #[test]
    fn test_output_too_small() {
        let frame = [1u8; 10];
        let mut packetizer = Packetizer::new(&frame, 64, true);
        let mut out = [0u8; 2];
        assert_eq!(packetizer.next_packet(&mut out), None);
    }
}
