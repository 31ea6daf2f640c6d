//! Transport-layer (RTPFB, PT=205) and payload-specific (PSFB, PT=206)
//! feedback, RFC 4585 and RFC 5104.
//!
//! Both packet kinds share a `senderSSRC | mediaSSRC` prefix and dispatch
//! their body on the header's 5-bit `count` (the FMT). The field variants
//! below are keyed on `(outer kind, FMT)`, per the closed-dispatch design
//! used throughout this crate.

use crate::error::{Result, RtcpError};
use crate::header::{RtcpHeader, RtcpType, HEADER_LENGTH};
use crate::wire;

const PREFIX_LEN: usize = 8; // senderSSRC(4) | mediaSSRC(4)

/// FMT values recognised for `RTPFeedback`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RtpFeedbackKind {
    Nack,
    Tmmbr,
    Tmmbn,
}

impl RtpFeedbackKind {
    fn from_fmt(fmt: u8) -> Result<Self> {
        match fmt {
            1 => Ok(RtpFeedbackKind::Nack),
            3 => Ok(RtpFeedbackKind::Tmmbr),
            4 => Ok(RtpFeedbackKind::Tmmbn),
            other => Err(RtcpError::UnknownFeedbackFmt {
                payload_type: RtcpType::TransportFeedback.code(),
                fmt: other,
            }),
        }
    }

    fn fmt(self) -> u8 {
        match self {
            RtpFeedbackKind::Nack => 1,
            RtpFeedbackKind::Tmmbr => 3,
            RtpFeedbackKind::Tmmbn => 4,
        }
    }
}

/// A single RTPFB field, per the FMT of the enclosing packet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RtpFeedbackField {
    /// Generic NACK, RFC 4585 §6.2.1. `blp` is a bitmask of the 16 sequence
    /// numbers following `pid`, each bit marking an additional lost packet.
    Nack { pid: u16, blp: u16 },
    /// Temporary Maximum Media Stream Bit Rate Request, RFC 5104 §4.2.
    Tmmbr(Tmmb),
    /// Temporary Maximum Media Stream Bit Rate Notification, RFC 5104 §4.2.2.
    Tmmbn(Tmmb),
}

/// Shared TMMBR/TMMBN body: an exponential bit-rate bound plus an overhead
/// estimate, RFC 5104 §4.2.1.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tmmb {
    pub ssrc: u32,
    pub exp: u8,
    pub mantissa: u32,
    pub overhead: u16,
}

impl Tmmb {
    const SIZE: usize = 8;

    fn parse(buf: &[u8]) -> Result<(Self, usize)> {
        wire::need(buf, Self::SIZE)?;
        let ssrc = wire::read_u32(buf)?;
        let word = wire::read_u32(&buf[4..])?;
        let exp = (word >> 26) as u8 & 0x3F;
        let mantissa = (word >> 9) & 0x1_FFFF;
        let overhead = (word & 0x1FF) as u16;
        Ok((
            Tmmb {
                ssrc,
                exp,
                mantissa,
                overhead,
            },
            Self::SIZE,
        ))
    }

    fn serialize(&self, buf: &mut [u8]) -> Result<usize> {
        wire::need(buf, Self::SIZE)?;
        wire::write_u32(buf, self.ssrc)?;
        let word = ((self.exp as u32 & 0x3F) << 26)
            | ((self.mantissa & 0x1_FFFF) << 9)
            | (self.overhead as u32 & 0x1FF);
        wire::write_u32(&mut buf[4..], word)?;
        Ok(Self::SIZE)
    }
}

impl RtpFeedbackField {
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            RtpFeedbackField::Nack { .. } => 4,
            RtpFeedbackField::Tmmbr(_) | RtpFeedbackField::Tmmbn(_) => Tmmb::SIZE,
        }
    }

    fn parse(kind: RtpFeedbackKind, buf: &[u8]) -> Result<(Self, usize)> {
        match kind {
            RtpFeedbackKind::Nack => {
                wire::need(buf, 4)?;
                let pid = wire::read_u16(buf)?;
                let blp = wire::read_u16(&buf[2..])?;
                Ok((RtpFeedbackField::Nack { pid, blp }, 4))
            }
            RtpFeedbackKind::Tmmbr => {
                let (tmmb, n) = Tmmb::parse(buf)?;
                Ok((RtpFeedbackField::Tmmbr(tmmb), n))
            }
            RtpFeedbackKind::Tmmbn => {
                let (tmmb, n) = Tmmb::parse(buf)?;
                Ok((RtpFeedbackField::Tmmbn(tmmb), n))
            }
        }
    }

    fn serialize(&self, buf: &mut [u8]) -> Result<usize> {
        match self {
            RtpFeedbackField::Nack { pid, blp } => {
                wire::need(buf, 4)?;
                wire::write_u16(buf, *pid)?;
                wire::write_u16(&mut buf[2..], *blp)?;
                Ok(4)
            }
            RtpFeedbackField::Tmmbr(tmmb) | RtpFeedbackField::Tmmbn(tmmb) => tmmb.serialize(buf),
        }
    }
}

/// Transport-layer feedback packet (RTPFB), PT=205.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RtpFeedback {
    /// FMT carried in the header; selects the variant of every field below.
    /// Stored explicitly rather than inferred from `fields[0]` because a
    /// wire packet may legitimately carry zero fields (the header-declared
    /// size is exactly `HEADER_LENGTH + PREFIX_LEN`) for any FMT.
    pub kind: RtpFeedbackKind,
    pub sender_ssrc: u32,
    pub media_ssrc: u32,
    pub fields: Vec<RtpFeedbackField>,
}

impl RtpFeedback {
    #[must_use]
    pub fn size(&self) -> usize {
        HEADER_LENGTH + PREFIX_LEN + self.fields.iter().map(RtpFeedbackField::size).sum::<usize>()
    }

    /// Parses an RTPFB packet, consuming exactly the header-declared byte
    /// size and returning that size. (The field count returned here must
    /// equal bytes consumed — never `bytes + 12`.)
    pub fn parse(buf: &[u8]) -> Result<(Self, usize)> {
        let header = RtcpHeader::parse(buf)?;
        if header.packet_type != RtcpType::TransportFeedback {
            return Err(RtcpError::UnknownPacketType(header.packet_type.code()));
        }
        let total = header.bytes();
        if total > buf.len() {
            return Err(RtcpError::Truncated {
                needed: total,
                available: buf.len(),
            });
        }
        let body = &buf[HEADER_LENGTH..total];
        wire::need(body, PREFIX_LEN)?;
        let sender_ssrc = wire::read_u32(body)?;
        let media_ssrc = wire::read_u32(&body[4..])?;

        let kind = RtpFeedbackKind::from_fmt(header.count)?;
        let mut rest = &body[PREFIX_LEN..];
        let mut fields = Vec::new();
        while !rest.is_empty() {
            let (field, consumed) = RtpFeedbackField::parse(kind, rest)?;
            fields.push(field);
            rest = &rest[consumed..];
        }

        Ok((
            RtpFeedback {
                kind,
                sender_ssrc,
                media_ssrc,
                fields,
            },
            total,
        ))
    }

    pub fn serialize(&self, buf: &mut [u8]) -> Result<usize> {
        let size = self.size();
        if buf.len() < size {
            return Err(RtcpError::BufferTooSmall {
                needed: size,
                available: buf.len(),
            });
        }
        let header = RtcpHeader::new(RtcpType::TransportFeedback, self.kind.fmt(), size);
        let mut off = header.serialize(buf)?;
        wire::write_u32(&mut buf[off..], self.sender_ssrc)?;
        off += 4;
        wire::write_u32(&mut buf[off..], self.media_ssrc)?;
        off += 4;
        for field in &self.fields {
            off += field.serialize(&mut buf[off..])?;
        }
        Ok(off)
    }

    #[must_use]
    pub fn dump(&self) -> String {
        format!(
            "[RTPFeedback kind={:?} sender={:#x} media={:#x} fields={:?}]",
            self.kind, self.sender_ssrc, self.media_ssrc, self.fields
        )
    }
}

/// FMT values recognised for `PayloadFeedback`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PayloadFeedbackKind {
    Pli,
    Sli,
    Rpsi,
    Fir,
    Tstr,
    Tstn,
    Vbcm,
    Afb,
}

impl PayloadFeedbackKind {
    fn from_fmt(fmt: u8) -> Result<Self> {
        use PayloadFeedbackKind::*;
        match fmt {
            1 => Ok(Pli),
            2 => Ok(Sli),
            3 => Ok(Rpsi),
            4 => Ok(Fir),
            5 => Ok(Tstr),
            6 => Ok(Tstn),
            7 => Ok(Vbcm),
            15 => Ok(Afb),
            other => Err(RtcpError::UnknownFeedbackFmt {
                payload_type: RtcpType::PayloadFeedback.code(),
                fmt: other,
            }),
        }
    }

    fn fmt(self) -> u8 {
        use PayloadFeedbackKind::*;
        match self {
            Pli => 1,
            Sli => 2,
            Rpsi => 3,
            Fir => 4,
            Tstr => 5,
            Tstn => 6,
            Vbcm => 7,
            Afb => 15,
        }
    }
}

/// A single PSFB field, per the FMT of the enclosing packet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PayloadFeedbackField {
    /// Picture Loss Indication, RFC 4585 §6.3.1. Carries no field bytes.
    Pli,
    /// Slice Loss Indication, RFC 4585 §6.3.2.
    Sli {
        first: u16,
        number: u16,
        picture_id: u8,
    },
    /// Reference Picture Selection Indication, RFC 4585 §6.3.3.
    Rpsi {
        padding_bits: u8,
        payload_type: u8,
        bit_string: Vec<u8>,
    },
    /// Full Intra Request, RFC 5104 §4.3.1 (modern PSFB form, FMT=4).
    Fir { ssrc: u32, seq_nr: u8 },
    /// Temporal-Spatial Trade-off Request, RFC 5104 §4.3.2.1.
    Tstr { ssrc: u32, seq_nr: u8, index: u8 },
    /// Temporal-Spatial Trade-off Notification, RFC 5104 §4.3.2.2.
    Tstn { ssrc: u32, seq_nr: u8, index: u8 },
    /// Video Back Channel Message, RFC 5104 §4.3.4.
    Vbcm {
        ssrc: u32,
        seq_nr: u8,
        payload_type: u8,
        payload: Vec<u8>,
    },
    /// Application Layer Feedback, RFC 4585 §6.4. Opaque to this codec.
    Afb { payload: Vec<u8> },
}

impl PayloadFeedbackField {
    #[must_use]
    pub fn size(&self) -> usize {
        use PayloadFeedbackField::*;
        match self {
            Pli => 0,
            Sli { .. } => 4,
            Rpsi { bit_string, .. } => wire::pad4(2 + bit_string.len()),
            Fir { .. } => 8,
            Tstr { .. } | Tstn { .. } => 8,
            Vbcm { payload, .. } => wire::pad4(8 + payload.len()),
            Afb { payload } => payload.len(),
        }
    }

    fn parse(kind: PayloadFeedbackKind, buf: &[u8]) -> Result<(Self, usize)> {
        use PayloadFeedbackKind as K;
        match kind {
            K::Pli => {
                if !buf.is_empty() {
                    return Err(RtcpError::EmptyWithBody { kind: "PLI" });
                }
                Ok((PayloadFeedbackField::Pli, 0))
            }
            K::Sli => {
                wire::need(buf, 4)?;
                let word = wire::read_u32(buf)?;
                let first = ((word >> 19) & 0x1FFF) as u16;
                let number = ((word >> 6) & 0x1FFF) as u16;
                let picture_id = (word & 0x3F) as u8;
                Ok((
                    PayloadFeedbackField::Sli {
                        first,
                        number,
                        picture_id,
                    },
                    4,
                ))
            }
            K::Rpsi => {
                wire::need(buf, 2)?;
                let padding_bits = buf[0];
                let payload_type = buf[1] & 0x7F;
                let bit_string = buf[2..].to_vec();
                Ok((
                    PayloadFeedbackField::Rpsi {
                        padding_bits,
                        payload_type,
                        bit_string,
                    },
                    buf.len(),
                ))
            }
            K::Fir => {
                wire::need(buf, 8)?;
                let ssrc = wire::read_u32(buf)?;
                let seq_nr = buf[4];
                Ok((PayloadFeedbackField::Fir { ssrc, seq_nr }, 8))
            }
            K::Tstr | K::Tstn => {
                wire::need(buf, 8)?;
                let ssrc = wire::read_u32(buf)?;
                let seq_nr = buf[4];
                let index = buf[7] & 0x1F;
                Ok((
                    if kind == K::Tstr {
                        PayloadFeedbackField::Tstr { ssrc, seq_nr, index }
                    } else {
                        PayloadFeedbackField::Tstn { ssrc, seq_nr, index }
                    },
                    8,
                ))
            }
            K::Vbcm => {
                wire::need(buf, 8)?;
                let ssrc = wire::read_u32(buf)?;
                let seq_nr = buf[4];
                let payload_type = buf[5] & 0x7F;
                let length = wire::read_u16(&buf[6..])? as usize;
                wire::need(buf, 8 + length)?;
                let payload = buf[8..8 + length].to_vec();
                Ok((
                    PayloadFeedbackField::Vbcm {
                        ssrc,
                        seq_nr,
                        payload_type,
                        payload,
                    },
                    wire::pad4(8 + length),
                ))
            }
            K::Afb => Ok((
                PayloadFeedbackField::Afb {
                    payload: buf.to_vec(),
                },
                buf.len(),
            )),
        }
    }

    fn serialize(&self, buf: &mut [u8]) -> Result<usize> {
        use PayloadFeedbackField::*;
        let size = self.size();
        if buf.len() < size {
            return Err(RtcpError::BufferTooSmall {
                needed: size,
                available: buf.len(),
            });
        }
        match self {
            Pli => Ok(0),
            Sli {
                first,
                number,
                picture_id,
            } => {
                let word = ((*first as u32 & 0x1FFF) << 19)
                    | ((*number as u32 & 0x1FFF) << 6)
                    | (*picture_id as u32 & 0x3F);
                wire::write_u32(buf, word)?;
                Ok(4)
            }
            Rpsi {
                padding_bits,
                payload_type,
                bit_string,
            } => {
                buf[0] = *padding_bits;
                buf[1] = payload_type & 0x7F;
                buf[2..2 + bit_string.len()].copy_from_slice(bit_string);
                for b in &mut buf[2 + bit_string.len()..size] {
                    *b = 0;
                }
                Ok(size)
            }
            Fir { ssrc, seq_nr } => {
                wire::write_u32(buf, *ssrc)?;
                buf[4] = *seq_nr;
                buf[5..8].copy_from_slice(&[0, 0, 0]);
                Ok(8)
            }
            Tstr { ssrc, seq_nr, index } | Tstn { ssrc, seq_nr, index } => {
                wire::write_u32(buf, *ssrc)?;
                buf[4] = *seq_nr;
                buf[5] = 0;
                buf[6] = 0;
                buf[7] = index & 0x1F;
                Ok(8)
            }
            Vbcm {
                ssrc,
                seq_nr,
                payload_type,
                payload,
            } => {
                wire::write_u32(buf, *ssrc)?;
                buf[4] = *seq_nr;
                buf[5] = payload_type & 0x7F;
                wire::write_u16(&mut buf[6..], payload.len() as u16)?;
                buf[8..8 + payload.len()].copy_from_slice(payload);
                for b in &mut buf[8 + payload.len()..size] {
                    *b = 0;
                }
                Ok(size)
            }
            Afb { payload } => {
                buf[..payload.len()].copy_from_slice(payload);
                Ok(payload.len())
            }
        }
    }
}

/// Payload-specific feedback packet (PSFB), PT=206.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PayloadFeedback {
    /// FMT carried in the header; selects the variant of every field below.
    /// Stored explicitly rather than inferred from `fields[0]` because a
    /// wire packet may legitimately carry zero fields (the header-declared
    /// size is exactly `HEADER_LENGTH + PREFIX_LEN`) for any FMT but PLI,
    /// whose single field is always present regardless of body emptiness.
    pub kind: PayloadFeedbackKind,
    pub sender_ssrc: u32,
    pub media_ssrc: u32,
    pub fields: Vec<PayloadFeedbackField>,
}

impl PayloadFeedback {
    #[must_use]
    pub fn size(&self) -> usize {
        HEADER_LENGTH
            + PREFIX_LEN
            + self
                .fields
                .iter()
                .map(PayloadFeedbackField::size)
                .sum::<usize>()
    }

    pub fn parse(buf: &[u8]) -> Result<(Self, usize)> {
        let header = RtcpHeader::parse(buf)?;
        if header.packet_type != RtcpType::PayloadFeedback {
            return Err(RtcpError::UnknownPacketType(header.packet_type.code()));
        }
        let total = header.bytes();
        if total > buf.len() {
            return Err(RtcpError::Truncated {
                needed: total,
                available: buf.len(),
            });
        }
        let body = &buf[HEADER_LENGTH..total];
        wire::need(body, PREFIX_LEN)?;
        let sender_ssrc = wire::read_u32(body)?;
        let media_ssrc = wire::read_u32(&body[4..])?;

        let kind = PayloadFeedbackKind::from_fmt(header.count)?;
        let mut rest = &body[PREFIX_LEN..];
        let mut fields = Vec::new();
        if kind == PayloadFeedbackKind::Pli {
            PayloadFeedbackField::parse(kind, rest)?;
            fields.push(PayloadFeedbackField::Pli);
        } else {
            while !rest.is_empty() {
                let (field, consumed) = PayloadFeedbackField::parse(kind, rest)?;
                if consumed == 0 {
                    break;
                }
                fields.push(field);
                rest = &rest[consumed..];
            }
        }

        Ok((
            PayloadFeedback {
                kind,
                sender_ssrc,
                media_ssrc,
                fields,
            },
            total,
        ))
    }

    pub fn serialize(&self, buf: &mut [u8]) -> Result<usize> {
        let size = self.size();
        if buf.len() < size {
            return Err(RtcpError::BufferTooSmall {
                needed: size,
                available: buf.len(),
            });
        }
        let header = RtcpHeader::new(RtcpType::PayloadFeedback, self.kind.fmt(), size);
        let mut off = header.serialize(buf)?;
        wire::write_u32(&mut buf[off..], self.sender_ssrc)?;
        off += 4;
        wire::write_u32(&mut buf[off..], self.media_ssrc)?;
        off += 4;
        for field in &self.fields {
            off += field.serialize(&mut buf[off..])?;
        }
        Ok(off)
    }

    #[must_use]
    pub fn dump(&self) -> String {
        format!(
            "[PayloadFeedback kind={:?} sender={:#x} media={:#x} fields={:?}]",
            self.kind, self.sender_ssrc, self.media_ssrc, self.fields
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn s4_generic_nack() {
        #[rustfmt::skip]
        let buf = [
            0x81, 0xCD, 0x00, 0x03,
            0x00, 0x00, 0x00, 0x10,
            0x00, 0x00, 0x00, 0x20,
            0x00, 0x64, 0x00, 0x0F,
        ];
        let (fb, n) = RtpFeedback::parse(&buf).unwrap();
        assert_eq!(n, buf.len());
        assert_eq!(fb.sender_ssrc, 0x10);
        assert_eq!(fb.media_ssrc, 0x20);
        assert_eq!(fb.fields, vec![RtpFeedbackField::Nack { pid: 100, blp: 0x000F }]);

        let mut out = vec![0u8; fb.size()];
        let written = fb.serialize(&mut out).unwrap();
        assert_eq!(written, buf.len());
        assert_eq!(out, buf);
    }

    #[test]
    fn s5_pli_errors_on_nonempty_body() {
        #[rustfmt::skip]
        let buf = [
            0x81, 0xCE, 0x00, 0x02,
            0x00, 0x00, 0x00, 0x10,
            0x00, 0x00, 0x00, 0x20,
        ];
        let (fb, n) = PayloadFeedback::parse(&buf).unwrap();
        assert_eq!(n, buf.len());
        assert_eq!(fb.fields, vec![PayloadFeedbackField::Pli]);

        let mut with_body = buf.to_vec();
        with_body[3] = 0x03; // claim one more word of body
        with_body.extend_from_slice(&[0, 0, 0, 0]);
        assert!(matches!(
            PayloadFeedback::parse(&with_body),
            Err(RtcpError::EmptyWithBody { .. })
        ));
    }

    #[test]
    fn tmmbr_round_trips() {
        let fb = RtpFeedback {
            kind: RtpFeedbackKind::Tmmbr,
            sender_ssrc: 1,
            media_ssrc: 2,
            fields: vec![RtpFeedbackField::Tmmbr(Tmmb {
                ssrc: 3,
                exp: 10,
                mantissa: 0x1_2345,
                overhead: 40,
            })],
        };
        let mut buf = vec![0u8; fb.size()];
        fb.serialize(&mut buf).unwrap();
        let (back, n) = RtpFeedback::parse(&buf).unwrap();
        assert_eq!(n, buf.len());
        assert_eq!(back, fb);
    }

    #[test]
    fn unknown_fmt_is_rejected() {
        #[rustfmt::skip]
        let buf = [
            0x82, 0xCD, 0x00, 0x03,
            0x00, 0x00, 0x00, 0x10,
            0x00, 0x00, 0x00, 0x20,
            0x00, 0x64, 0x00, 0x0F,
        ];
        assert!(matches!(
            RtpFeedback::parse(&buf),
            Err(RtcpError::UnknownFeedbackFmt { .. })
        ));
    }

    #[test]
    fn fir_psfb_round_trips() {
        let fb = PayloadFeedback {
            kind: PayloadFeedbackKind::Fir,
            sender_ssrc: 9,
            media_ssrc: 10,
            fields: vec![PayloadFeedbackField::Fir { ssrc: 11, seq_nr: 4 }],
        };
        let mut buf = vec![0u8; fb.size()];
        fb.serialize(&mut buf).unwrap();
        let (back, n) = PayloadFeedback::parse(&buf).unwrap();
        assert_eq!(n, buf.len());
        assert_eq!(back, fb);
    }

    #[test]
    fn afb_preserves_opaque_payload() {
        let fb = PayloadFeedback {
            kind: PayloadFeedbackKind::Afb,
            sender_ssrc: 1,
            media_ssrc: 2,
            fields: vec![PayloadFeedbackField::Afb {
                payload: vec![9, 8, 7, 6],
            }],
        };
        let mut buf = vec![0u8; fb.size()];
        fb.serialize(&mut buf).unwrap();
        let (back, _) = PayloadFeedback::parse(&buf).unwrap();
        assert_eq!(back, fb);
    }

    /// A 12-byte RTPFB (header + `senderSSRC`/`mediaSSRC`, no field bytes)
    /// is well-formed per spec §8 invariant 2: `Parse` must yield a tree
    /// whose `Serialize` round-trips, even though `fields` is empty.
    #[test]
    fn rtpfb_zero_field_round_trips() {
        #[rustfmt::skip]
        let buf = [
            0x81, 0xCD, 0x00, 0x02,
            0x00, 0x00, 0x00, 0x01,
            0x00, 0x00, 0x00, 0x02,
        ];
        let (fb, n) = RtpFeedback::parse(&buf).unwrap();
        assert_eq!(n, buf.len());
        assert_eq!(fb.kind, RtpFeedbackKind::Nack);
        assert!(fb.fields.is_empty());

        let mut out = vec![0u8; fb.size()];
        let written = fb.serialize(&mut out).unwrap();
        assert_eq!(written, buf.len());
        assert_eq!(out, buf);
    }

    /// Same as `rtpfb_zero_field_round_trips`, for a non-PLI PSFB FMT (PLI
    /// is exempt: its single field is always present regardless of body
    /// emptiness).
    #[test]
    fn psfb_zero_field_round_trips() {
        #[rustfmt::skip]
        let buf = [
            0x84, 0xCE, 0x00, 0x02,
            0x00, 0x00, 0x00, 0x01,
            0x00, 0x00, 0x00, 0x02,
        ];
        let (fb, n) = PayloadFeedback::parse(&buf).unwrap();
        assert_eq!(n, buf.len());
        assert_eq!(fb.kind, PayloadFeedbackKind::Fir);
        assert!(fb.fields.is_empty());

        let mut out = vec![0u8; fb.size()];
        let written = fb.serialize(&mut out).unwrap();
        assert_eq!(written, buf.len());
        assert_eq!(out, buf);
    }
}
