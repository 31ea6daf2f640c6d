//! Legacy, pre-RFC-4585 feedback: Full Intra Request (PT=192, RFC 2032
//! successor usage) and NACK (PT=193, RFC 2032 §6.2).
//!
//! Modern senders use [`crate::feedback::PayloadFeedback`] FMT=4 and
//! [`crate::feedback::RtpFeedback`] FMT=1 respectively; these standalone
//! packets remain on the wire for interoperability with older peers.

use crate::error::{Result, RtcpError};
use crate::header::{RtcpHeader, RtcpType, HEADER_LENGTH};
use crate::wire;

/// Legacy Full Intra Request, PT=192.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FullIntraRequest {
    pub ssrc: u32,
}

impl FullIntraRequest {
    pub const SIZE: usize = HEADER_LENGTH + 4;

    #[must_use]
    pub fn size(&self) -> usize {
        Self::SIZE
    }

    pub fn parse(buf: &[u8]) -> Result<Self> {
        let header = RtcpHeader::parse(buf)?;
        if header.packet_type != RtcpType::FullIntraRequest {
            return Err(RtcpError::UnknownPacketType(header.packet_type.code()));
        }
        wire::need(buf, Self::SIZE)?;
        let ssrc = wire::read_u32(&buf[HEADER_LENGTH..])?;
        Ok(FullIntraRequest { ssrc })
    }

    pub fn serialize(&self, buf: &mut [u8]) -> Result<usize> {
        if buf.len() < Self::SIZE {
            return Err(RtcpError::BufferTooSmall {
                needed: Self::SIZE,
                available: buf.len(),
            });
        }
        let header = RtcpHeader::new(RtcpType::FullIntraRequest, 0, Self::SIZE);
        let off = header.serialize(buf)?;
        wire::write_u32(&mut buf[off..], self.ssrc)?;
        Ok(Self::SIZE)
    }

    #[must_use]
    pub fn dump(&self) -> String {
        format!("[FullIntraRequest ssrc={:#x}]", self.ssrc)
    }
}

/// Legacy NACK, PT=193, RFC 2032 §6.2.
///
/// The field layout is `ssrc(4) | fsn(u16) | blp(u16)`: `fsn` at byte
/// offset 4, `blp` at offset 6. (A NACK reader that instead takes `fsn`
/// from offset 4 via a 4-byte read and `blp` from offset 2 has its fields
/// swapped and overlapping the SSRC — that is not this layout.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Nack {
    pub ssrc: u32,
    pub fsn: u16,
    pub blp: u16,
}

impl Nack {
    pub const SIZE: usize = HEADER_LENGTH + 8;

    #[must_use]
    pub fn size(&self) -> usize {
        Self::SIZE
    }

    pub fn parse(buf: &[u8]) -> Result<Self> {
        let header = RtcpHeader::parse(buf)?;
        if header.packet_type != RtcpType::Nack {
            return Err(RtcpError::UnknownPacketType(header.packet_type.code()));
        }
        wire::need(buf, Self::SIZE)?;
        let body = &buf[HEADER_LENGTH..];
        let ssrc = wire::read_u32(body)?;
        let fsn = wire::read_u16(&body[4..])?;
        let blp = wire::read_u16(&body[6..])?;
        Ok(Nack { ssrc, fsn, blp })
    }

    pub fn serialize(&self, buf: &mut [u8]) -> Result<usize> {
        if buf.len() < Self::SIZE {
            return Err(RtcpError::BufferTooSmall {
                needed: Self::SIZE,
                available: buf.len(),
            });
        }
        let header = RtcpHeader::new(RtcpType::Nack, 0, Self::SIZE);
        let mut off = header.serialize(buf)?;
        wire::write_u32(&mut buf[off..], self.ssrc)?;
        off += 4;
        wire::write_u16(&mut buf[off..], self.fsn)?;
        off += 2;
        wire::write_u16(&mut buf[off..], self.blp)?;
        Ok(Self::SIZE)
    }

    #[must_use]
    pub fn dump(&self) -> String {
        format!(
            "[Nack ssrc={:#x} fsn={} blp={:#06x}]",
            self.ssrc, self.fsn, self.blp
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fir_round_trips() {
        let fir = FullIntraRequest { ssrc: 0xABCD };
        let mut buf = [0u8; FullIntraRequest::SIZE];
        fir.serialize(&mut buf).unwrap();
        assert_eq!(FullIntraRequest::parse(&buf).unwrap(), fir);
    }

    #[test]
    fn nack_reads_fsn_then_blp_in_wire_order() {
        #[rustfmt::skip]
        let buf = [
            0x80, 0xC1, 0x00, 0x02,
            0x00, 0x00, 0x00, 0x01,
            0x00, 0x05, 0x00, 0x07,
        ];
        let nack = Nack::parse(&buf).unwrap();
        assert_eq!(nack.ssrc, 1);
        assert_eq!(nack.fsn, 5);
        assert_eq!(nack.blp, 7);
    }

    #[test]
    fn nack_round_trips() {
        let nack = Nack {
            ssrc: 42,
            fsn: 1000,
            blp: 0xFFFF,
        };
        let mut buf = [0u8; Nack::SIZE];
        nack.serialize(&mut buf).unwrap();
        assert_eq!(Nack::parse(&buf).unwrap(), nack);
    }
}
