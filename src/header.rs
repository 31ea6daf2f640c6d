//! The 4-byte common header shared by every RTCP packet.
//!
//! See the relevant [RTP RFC section](https://tools.ietf.org/html/rfc3550#section-6.1).

use crate::error::{Result, RtcpError};
use crate::wire;

pub const HEADER_LENGTH: usize = 4;
pub const COUNT_MAX: u8 = 31;

const VERSION_SHIFT: u8 = 6;
const PADDING_BIT: u8 = 0b0010_0000;
const COUNT_MASK: u8 = 0b0001_1111;

/// RTCP message types. See the [IANA page] for an up-to-date list.
///
/// [IANA page]: https://www.iana.org/assignments/rtp-parameters/rtp-parameters.xhtml#rtp-parameters-4
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum RtcpType {
    /// Legacy full intra request. Code 192.
    FullIntraRequest,
    /// Legacy NACK, RFC 2032. Code 193.
    Nack,
    /// Extended inter-arrival jitter report, RFC 5450. Code 195.
    JitterReport,
    /// Sender report. Code 200.
    SenderReport,
    /// Receiver report. Code 201.
    ReceiverReport,
    /// Source description. Code 202.
    SourceDescription,
    /// Goodbye. Code 203.
    Goodbye,
    /// Application-defined. Code 204.
    ApplicationDefined,
    /// RTPFB, feedback on the RTP transport layer. RFC 4585. Code 205.
    TransportFeedback,
    /// PSFB, feedback on the payload. RFC 4585. Code 206.
    PayloadFeedback,
    /// Reserved or otherwise unassigned code point.
    Unassigned(u8),
}

impl RtcpType {
    #[must_use]
    pub fn new(val: u8) -> Self {
        use RtcpType::*;
        match val {
            192 => FullIntraRequest,
            193 => Nack,
            195 => JitterReport,
            200 => SenderReport,
            201 => ReceiverReport,
            202 => SourceDescription,
            203 => Goodbye,
            204 => ApplicationDefined,
            205 => TransportFeedback,
            206 => PayloadFeedback,
            other => Unassigned(other),
        }
    }

    #[must_use]
    pub fn code(self) -> u8 {
        use RtcpType::*;
        match self {
            FullIntraRequest => 192,
            Nack => 193,
            JitterReport => 195,
            SenderReport => 200,
            ReceiverReport => 201,
            SourceDescription => 202,
            Goodbye => 203,
            ApplicationDefined => 204,
            TransportFeedback => 205,
            PayloadFeedback => 206,
            Unassigned(v) => v,
        }
    }
}

/// The fixed 4-byte header shared by every RTCP packet.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RtcpHeader {
    pub version: u8,
    pub padding: bool,
    /// Reception-report count, SDES/BYE source count, APP subtype, or FMT,
    /// depending on `packet_type`.
    pub count: u8,
    pub packet_type: RtcpType,
    /// On-wire length word: 32-bit words in the packet, minus one.
    length_words: u16,
}

impl RtcpHeader {
    #[must_use]
    pub fn new(packet_type: RtcpType, count: u8, byte_len: usize) -> Self {
        RtcpHeader {
            version: 2,
            padding: false,
            count,
            packet_type,
            length_words: words_minus_one(byte_len),
        }
    }

    /// Total size of this packet in bytes: `(length_words + 1) * 4`.
    #[must_use]
    pub fn bytes(&self) -> usize {
        (self.length_words as usize + 1) * 4
    }

    pub fn parse(buf: &[u8]) -> Result<Self> {
        wire::need(buf, HEADER_LENGTH)?;

        let version = buf[0] >> VERSION_SHIFT;
        if version != 2 {
            return Err(RtcpError::BadVersion(version));
        }
        let padding = buf[0] & PADDING_BIT != 0;
        let count = buf[0] & COUNT_MASK;
        let packet_type = RtcpType::new(buf[1]);
        let length_words = wire::read_u16(&buf[2..])?;

        Ok(RtcpHeader {
            version,
            padding,
            count,
            packet_type,
            length_words,
        })
    }

    pub fn serialize(&self, buf: &mut [u8]) -> Result<usize> {
        wire::need(buf, HEADER_LENGTH)?;
        let mut b0 = 2u8 << VERSION_SHIFT;
        if self.padding {
            b0 |= PADDING_BIT;
        }
        b0 |= self.count & COUNT_MASK;
        buf[0] = b0;
        buf[1] = self.packet_type.code();
        wire::write_u16(&mut buf[2..], self.length_words)?;
        Ok(HEADER_LENGTH)
    }
}

/// `(byte_len / 4) - 1`, the on-wire length word for a packet of `byte_len`
/// bytes. `byte_len` must already be a multiple of 4.
#[must_use]
pub fn words_minus_one(byte_len: usize) -> u16 {
    debug_assert_eq!(byte_len % 4, 0, "RTCP packet length must be a multiple of 4");
    ((byte_len / 4).saturating_sub(1)) as u16
}

/// Returns true iff `buf` looks like an RTCP packet: at least 4 bytes,
/// version 2, and a payload type in the recognised RTCP range.
#[must_use]
pub fn is_rtcp(buf: &[u8]) -> bool {
    if buf.len() < 4 {
        return false;
    }
    if buf[0] >> VERSION_SHIFT != 2 {
        return false;
    }
    matches!(buf[1], 192 | 193 | 200..=208)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_s1_rr_header() {
        let buf = [0x81, 0xC9, 0x00, 0x01];
        let h = RtcpHeader::parse(&buf).unwrap();
        assert_eq!(h.version, 2);
        assert!(!h.padding);
        assert_eq!(h.count, 1);
        assert_eq!(h.packet_type, RtcpType::ReceiverReport);
        assert_eq!(h.bytes(), 8);
    }

    #[test]
    fn rejects_bad_version() {
        let buf = [0x01, 0xC9, 0x00, 0x01];
        assert_eq!(RtcpHeader::parse(&buf), Err(RtcpError::BadVersion(0)));
    }

    #[test]
    fn is_rtcp_recognises_legacy_and_modern_types() {
        assert!(is_rtcp(&[0x80, 200, 0, 0]));
        assert!(is_rtcp(&[0x80, 192, 0, 0]));
        assert!(is_rtcp(&[0x80, 193, 0, 0]));
        assert!(!is_rtcp(&[0x80, 96, 0, 0]));
        assert!(!is_rtcp(&[0x80]));
    }

    #[test]
    fn header_round_trips() {
        let h = RtcpHeader::new(RtcpType::SenderReport, 3, 28);
        let mut buf = [0u8; 4];
        h.serialize(&mut buf).unwrap();
        let back = RtcpHeader::parse(&buf).unwrap();
        assert_eq!(back, h);
        assert_eq!(back.bytes(), 28);
    }
}
