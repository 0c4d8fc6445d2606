//! Video probe and commit control block
//!
//! Layout (UVC 1.1, little-endian):
//!
//! ```text
//! off  size  field
//!   0     2  bmHint
//!   2     1  bFormatIndex
//!   3     1  bFrameIndex
//!   4     4  dwFrameInterval          (100 ns units)
//!   8     2  wKeyFrameRate
//!  10     2  wPFrameRate
//!  12     2  wCompQuality
//!  14     2  wCompWindowSize
//!  16     2  wDelay
//!  18     4  dwMaxVideoFrameSize
//!  22     4  dwMaxPayloadTransferSize
//!  26     4  dwClockFrequency         (UVC 1.1)
//!  30     1  bmFramingInfo            (UVC 1.1)
//!  31     1  bPreferedVersion         (UVC 1.1)
//!  32     1  bMinVersion              (UVC 1.1)
//!  33     1  bMaxVersion              (UVC 1.1)
//! ```

/// Length of the UVC 1.1 block
pub const PROBE_COMMIT_LEN: usize = 34;

/// Length of the UVC 1.0 block
pub const PROBE_COMMIT_LEN_V10: usize = 26;

/// Decoding errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProbeCommitError {
    /// Fewer bytes than the UVC 1.0 block
    TooShort,
}

/// Probe/commit control block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProbeCommit {
    pub hint: u16,
    pub format_index: u8,
    pub frame_index: u8,
    pub frame_interval: u32,
    pub key_frame_rate: u16,
    pub p_frame_rate: u16,
    pub comp_quality: u16,
    pub comp_window_size: u16,
    pub delay: u16,
    pub max_video_frame_size: u32,
    pub max_payload_transfer_size: u32,
    pub clock_frequency: u32,
    pub framing_info: u8,
    pub preferred_version: u8,
    pub min_version: u8,
    pub max_version: u8,
}

impl ProbeCommit {
    /// Decode a block sent by the host
    ///
    /// Accepts UVC 1.0 hosts that send only the first 26 bytes; the UVC 1.1
    /// fields are then zero.
    pub fn decode(data: &[u8]) -> Result<Self, ProbeCommitError> {
        if data.len() < PROBE_COMMIT_LEN_V10 {
            return Err(ProbeCommitError::TooShort);
        }

        let mut raw = [0u8; PROBE_COMMIT_LEN];
        let len = data.len().min(PROBE_COMMIT_LEN);
        raw[..len].copy_from_slice(&data[..len]);

        let u16_at = |off: usize| u16::from_le_bytes([raw[off], raw[off + 1]]);
        let u32_at =
            |off: usize| u32::from_le_bytes([raw[off], raw[off + 1], raw[off + 2], raw[off + 3]]);

        Ok(Self {
            hint: u16_at(0),
            format_index: raw[2],
            frame_index: raw[3],
            frame_interval: u32_at(4),
            key_frame_rate: u16_at(8),
            p_frame_rate: u16_at(10),
            comp_quality: u16_at(12),
            comp_window_size: u16_at(14),
            delay: u16_at(16),
            max_video_frame_size: u32_at(18),
            max_payload_transfer_size: u32_at(22),
            clock_frequency: u32_at(26),
            framing_info: raw[30],
            preferred_version: raw[31],
            min_version: raw[32],
            max_version: raw[33],
        })
    }

    /// Encode as a UVC 1.1 block
    ///
    /// Hosts that request fewer bytes get a prefix of this array.
    pub fn to_bytes(&self) -> [u8; PROBE_COMMIT_LEN] {
        let mut raw = [0u8; PROBE_COMMIT_LEN];
        raw[0..2].copy_from_slice(&self.hint.to_le_bytes());
        raw[2] = self.format_index;
        raw[3] = self.frame_index;
        raw[4..8].copy_from_slice(&self.frame_interval.to_le_bytes());
        raw[8..10].copy_from_slice(&self.key_frame_rate.to_le_bytes());
        raw[10..12].copy_from_slice(&self.p_frame_rate.to_le_bytes());
        raw[12..14].copy_from_slice(&self.comp_quality.to_le_bytes());
        raw[14..16].copy_from_slice(&self.comp_window_size.to_le_bytes());
        raw[16..18].copy_from_slice(&self.delay.to_le_bytes());
        raw[18..22].copy_from_slice(&self.max_video_frame_size.to_le_bytes());
        raw[22..26].copy_from_slice(&self.max_payload_transfer_size.to_le_bytes());
        raw[26..30].copy_from_slice(&self.clock_frequency.to_le_bytes());
        raw[30] = self.framing_info;
        raw[31] = self.preferred_version;
        raw[32] = self.min_version;
        raw[33] = self.max_version;
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProbeCommit {
        ProbeCommit {
            hint: 0x0001,
            format_index: 1,
            frame_index: 1,
            frame_interval: 333_333,
            max_video_frame_size: 24_576,
            max_payload_transfer_size: 512,
            clock_frequency: 48_000_000,
            framing_info: 0x03,
            preferred_version: 1,
            min_version: 1,
            max_version: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_field_offsets() {
        let raw = sample().to_bytes();
        assert_eq!(raw[0], 0x01);
        assert_eq!(raw[2], 1);
        assert_eq!(&raw[4..8], &333_333u32.to_le_bytes());
        assert_eq!(&raw[18..22], &24_576u32.to_le_bytes());
        assert_eq!(&raw[22..26], &512u32.to_le_bytes());
        assert_eq!(raw[30], 0x03);
    }

    #[test]
    fn test_decode_encoded() {
        let block = sample();
        assert_eq!(ProbeCommit::decode(&block.to_bytes()), Ok(block));
    }

    #[test]
    fn test_decode_uvc10_prefix() {
        let raw = sample().to_bytes();
        let decoded = ProbeCommit::decode(&raw[..PROBE_COMMIT_LEN_V10]).unwrap();
        assert_eq!(decoded.frame_interval, 333_333);
        assert_eq!(decoded.clock_frequency, 0);
        assert_eq!(decoded.framing_info, 0);
    }

    #[test]
    fn test_decode_too_short() {
        assert_eq!(
            ProbeCommit::decode(&[0u8; 25]),
            Err(ProbeCommitError::TooShort)
        );
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        // UVC 1.5 hosts send 48 bytes
        let mut raw = [0u8; 48];
        raw[..PROBE_COMMIT_LEN].copy_from_slice(&sample().to_bytes());
        assert_eq!(ProbeCommit::decode(&raw), Ok(sample()));
    }
}
