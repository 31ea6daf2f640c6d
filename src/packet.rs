//! The compound-packet dispatcher: a closed sum of RTCP packet kinds plus
//! the framing logic that walks a datagram's concatenated packets.

use crate::app::App;
use crate::bye::Bye;
use crate::error::{Result, RtcpError};
use crate::feedback::{PayloadFeedback, RtpFeedback};
use crate::header::{RtcpHeader, RtcpType, HEADER_LENGTH};
use crate::jitter::ExtendedJitterReport;
use crate::legacy::{FullIntraRequest, Nack};
use crate::report::{ReceiverReport, SenderReport};
use crate::sdes::Sdes;

pub use crate::header::is_rtcp;

/// A single RTCP packet of any recognised kind. Unrecognised payload types
/// are preserved verbatim rather than dropped, so a compound packet can
/// still be re-serialized byte-for-byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Packet {
    SenderReport(SenderReport),
    ReceiverReport(ReceiverReport),
    Sdes(Sdes),
    Bye(Bye),
    App(App),
    RtpFeedback(RtpFeedback),
    PayloadFeedback(PayloadFeedback),
    FullIntraRequest(FullIntraRequest),
    Nack(Nack),
    JitterReport(ExtendedJitterReport),
    /// A payload type this codec does not parse further. Its raw bytes
    /// (header included) are kept so the compound packet round-trips.
    Unknown(Vec<u8>),
}

impl Packet {
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            Packet::SenderReport(p) => p.size(),
            Packet::ReceiverReport(p) => p.size(),
            Packet::Sdes(p) => p.size(),
            Packet::Bye(p) => p.size(),
            Packet::App(p) => p.size(),
            Packet::RtpFeedback(p) => p.size(),
            Packet::PayloadFeedback(p) => p.size(),
            Packet::FullIntraRequest(p) => p.size(),
            Packet::Nack(p) => p.size(),
            Packet::JitterReport(p) => p.size(),
            Packet::Unknown(bytes) => bytes.len(),
        }
    }

    /// Parses one packet starting at `buf[0]`. Returns the packet and the
    /// number of bytes consumed, which is always the header-declared byte
    /// size of the packet regardless of how much of `buf` follows it.
    pub fn parse(buf: &[u8]) -> Result<(Self, usize)> {
        let header = RtcpHeader::parse(buf)?;
        let total = header.bytes();
        if total > buf.len() {
            return Err(RtcpError::Truncated {
                needed: total,
                available: buf.len(),
            });
        }
        let slice = &buf[..total];

        let packet = match header.packet_type {
            RtcpType::SenderReport => Packet::SenderReport(SenderReport::parse(slice)?),
            RtcpType::ReceiverReport => Packet::ReceiverReport(ReceiverReport::parse(slice)?),
            RtcpType::SourceDescription => Packet::Sdes(Sdes::parse(slice)?),
            RtcpType::Goodbye => Packet::Bye(Bye::parse(slice)?),
            RtcpType::ApplicationDefined => Packet::App(App::parse(slice)?),
            RtcpType::TransportFeedback => Packet::RtpFeedback(RtpFeedback::parse(slice)?.0),
            RtcpType::PayloadFeedback => {
                Packet::PayloadFeedback(PayloadFeedback::parse(slice)?.0)
            }
            RtcpType::FullIntraRequest => Packet::FullIntraRequest(FullIntraRequest::parse(slice)?),
            RtcpType::Nack => Packet::Nack(Nack::parse(slice)?),
            RtcpType::JitterReport => Packet::JitterReport(ExtendedJitterReport::parse(slice)?),
            RtcpType::Unassigned(_) => Packet::Unknown(slice.to_vec()),
        };

        Ok((packet, total))
    }

    pub fn serialize(&self, buf: &mut [u8]) -> Result<usize> {
        match self {
            Packet::SenderReport(p) => p.serialize(buf),
            Packet::ReceiverReport(p) => p.serialize(buf),
            Packet::Sdes(p) => p.serialize(buf),
            Packet::Bye(p) => p.serialize(buf),
            Packet::App(p) => p.serialize(buf),
            Packet::RtpFeedback(p) => p.serialize(buf),
            Packet::PayloadFeedback(p) => p.serialize(buf),
            Packet::FullIntraRequest(p) => p.serialize(buf),
            Packet::Nack(p) => p.serialize(buf),
            Packet::JitterReport(p) => p.serialize(buf),
            Packet::Unknown(bytes) => {
                if buf.len() < bytes.len() {
                    return Err(RtcpError::BufferTooSmall {
                        needed: bytes.len(),
                        available: buf.len(),
                    });
                }
                buf[..bytes.len()].copy_from_slice(bytes);
                Ok(bytes.len())
            }
        }
    }

    #[must_use]
    pub fn dump(&self) -> String {
        match self {
            Packet::SenderReport(p) => p.dump(),
            Packet::ReceiverReport(p) => p.dump(),
            Packet::Sdes(p) => p.dump(),
            Packet::Bye(p) => p.dump(),
            Packet::App(p) => p.dump(),
            Packet::RtpFeedback(p) => p.dump(),
            Packet::PayloadFeedback(p) => p.dump(),
            Packet::FullIntraRequest(p) => p.dump(),
            Packet::Nack(p) => p.dump(),
            Packet::JitterReport(p) => p.dump(),
            Packet::Unknown(bytes) => format!("[Unknown {} bytes]", bytes.len()),
        }
    }
}

/// An ordered sequence of RTCP packets occupying a single UDP datagram.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CompoundPacket {
    pub packets: Vec<Packet>,
}

impl CompoundPacket {
    #[must_use]
    pub fn size(&self) -> usize {
        self.packets.iter().map(Packet::size).sum()
    }

    /// Parses every packet in `buf`. Fails if any packet's header declares
    /// more bytes than remain, or if a trailing partial header is found;
    /// succeeds only once the whole buffer has been consumed.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let mut remaining = buf;
        let mut packets = Vec::new();

        while !remaining.is_empty() {
            if remaining.len() < HEADER_LENGTH {
                return Err(RtcpError::Truncated {
                    needed: HEADER_LENGTH,
                    available: remaining.len(),
                });
            }
            let (packet, consumed) = Packet::parse(remaining)?;
            packets.push(packet);
            remaining = &remaining[consumed..];
        }

        Ok(CompoundPacket { packets })
    }

    pub fn serialize(&self, buf: &mut [u8]) -> Result<usize> {
        let size = self.size();
        if buf.len() < size {
            return Err(RtcpError::BufferTooSmall {
                needed: size,
                available: buf.len(),
            });
        }
        let mut off = 0;
        for packet in &self.packets {
            off += packet.serialize(&mut buf[off..])?;
        }
        Ok(off)
    }

    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::from("[CompoundPacket\n");
        for packet in &self.packets {
            out += "  ";
            out += &packet.dump();
            out += "\n";
        }
        out += "/CompoundPacket]";
        out
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn s1_empty_receiver_report_round_trips() {
        let buf = [0x81, 0xC9, 0x00, 0x01, 0x00, 0x00, 0x00, 0x2A];
        let compound = CompoundPacket::parse(&buf).unwrap();
        assert_eq!(compound.packets.len(), 1);
        match &compound.packets[0] {
            Packet::ReceiverReport(rr) => {
                assert_eq!(rr.ssrc, 0x2A);
                assert!(rr.reports.is_empty());
            }
            other => panic!("expected ReceiverReport, got {other:?}"),
        }

        let mut out = vec![0u8; compound.size()];
        compound.serialize(&mut out).unwrap();
        assert_eq!(out, buf);
    }

    #[test]
    fn unknown_payload_type_is_skipped_but_preserved() {
        #[rustfmt::skip]
        let buf = [
            0x80, 0xB0, 0x00, 0x01, 0xDE, 0xAD, 0xBE, 0xEF,
            0x81, 0xC9, 0x00, 0x01, 0x00, 0x00, 0x00, 0x2A,
        ];
        let compound = CompoundPacket::parse(&buf).unwrap();
        assert_eq!(compound.packets.len(), 2);
        assert!(matches!(compound.packets[0], Packet::Unknown(_)));
        assert!(matches!(compound.packets[1], Packet::ReceiverReport(_)));

        let mut out = vec![0u8; compound.size()];
        compound.serialize(&mut out).unwrap();
        assert_eq!(out, buf);
    }

    #[test]
    fn oversize_header_fails_the_whole_compound() {
        let buf = [0x81, 0xC9, 0x00, 0x05, 0x00, 0x00, 0x00, 0x2A];
        assert!(matches!(
            CompoundPacket::parse(&buf),
            Err(RtcpError::Truncated { .. })
        ));
    }

    #[test]
    fn truncation_safety_never_overreads() {
        #[rustfmt::skip]
        let buf: Vec<u8> = vec![
            0x80, 0xC8, 0x00, 0x06, 0x00, 0x00, 0x00, 0x01,
            0xD9, 0x1D, 0xC8, 0x1C, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x64, 0x00, 0x00, 0x00, 0x05,
            0x00, 0x00, 0x03, 0x20,
        ];
        for k in 0..buf.len() {
            // Either an error, or a result that never reads past k bytes
            // (which parse() enforces internally by construction).
            let _ = CompoundPacket::parse(&buf[..k]);
        }
    }
}
