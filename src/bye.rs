//! Goodbye (BYE), PT=203.
//!
//! See the relevant [RTP RFC section](https://tools.ietf.org/html/rfc3550#section-6.6).

use crate::error::{Result, RtcpError};
use crate::header::{RtcpHeader, RtcpType, COUNT_MAX, HEADER_LENGTH};
use crate::wire;

/// Source exit message: the list of SSRCs leaving the session, plus an
/// optional human-readable reason.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Bye {
    pub sources: Vec<u32>,
    pub reason: Option<String>,
}

impl Bye {
    #[must_use]
    pub fn size(&self) -> usize {
        let unpadded = HEADER_LENGTH + 4 * self.sources.len() + reason_on_wire_len(&self.reason);
        wire::pad4(unpadded)
    }

    pub fn parse(buf: &[u8]) -> Result<Self> {
        let header = RtcpHeader::parse(buf)?;
        if header.packet_type != RtcpType::Goodbye {
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

        let ssrc_bytes = 4 * header.count as usize;
        wire::need(body, ssrc_bytes)?;
        let mut sources = Vec::with_capacity(header.count as usize);
        for i in 0..header.count as usize {
            sources.push(wire::read_u32(&body[i * 4..])?);
        }

        let rest = &body[ssrc_bytes..];
        let reason = if !rest.is_empty() {
            let n = wire::read_u8(rest)? as usize;
            wire::need(rest, 1 + n)?;
            let text = core::str::from_utf8(&rest[1..1 + n])
                .map_err(|_| RtcpError::InconsistentLength {
                    declared: n,
                    actual: rest.len() - 1,
                })?
                .to_owned();
            Some(text)
        } else {
            None
        };

        Ok(Bye { sources, reason })
    }

    pub fn serialize(&self, buf: &mut [u8]) -> Result<usize> {
        let size = self.size();
        if buf.len() < size {
            return Err(RtcpError::BufferTooSmall {
                needed: size,
                available: buf.len(),
            });
        }
        if self.sources.len() > COUNT_MAX as usize {
            return Err(RtcpError::InconsistentLength {
                declared: self.sources.len(),
                actual: COUNT_MAX as usize,
            });
        }

        let header = RtcpHeader::new(RtcpType::Goodbye, self.sources.len() as u8, size);
        let mut off = header.serialize(buf)?;
        for ssrc in &self.sources {
            wire::write_u32(&mut buf[off..], *ssrc)?;
            off += 4;
        }
        if let Some(reason) = &self.reason {
            let bytes = reason.as_bytes();
            if bytes.len() > 255 {
                return Err(RtcpError::InconsistentLength {
                    declared: bytes.len(),
                    actual: 255,
                });
            }
            wire::write_u8(&mut buf[off..], bytes.len() as u8)?;
            off += 1;
            buf[off..off + bytes.len()].copy_from_slice(bytes);
            off += bytes.len();
        }
        for b in &mut buf[off..size] {
            *b = 0;
        }
        Ok(size)
    }

    #[must_use]
    pub fn dump(&self) -> String {
        format!(
            "[Bye sources={:?} reason={:?}]",
            self.sources
                .iter()
                .map(|s| format!("{:#x}", s))
                .collect::<Vec<_>>(),
            self.reason
        )
    }
}

fn reason_on_wire_len(reason: &Option<String>) -> usize {
    reason.as_ref().map_or(0, |r| 1 + r.len())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn s3_bye_with_reason() {
        #[rustfmt::skip]
        let buf = [
            0x81, 0xCB, 0x00, 0x02,
            0x00, 0x00, 0x00, 0x01,
            0x05, b'H', b'e', b'l', b'l', b'o', 0x00, 0x00,
        ];
        let bye = Bye::parse(&buf).unwrap();
        assert_eq!(bye.sources, vec![1]);
        assert_eq!(bye.reason.as_deref(), Some("Hello"));

        let mut out = vec![0u8; bye.size()];
        let n = bye.serialize(&mut out).unwrap();
        assert_eq!(n, buf.len());
        assert_eq!(out, buf);
    }

    #[test]
    fn bye_without_reason() {
        let bye = Bye {
            sources: vec![1, 2],
            reason: None,
        };
        let mut buf = vec![0u8; bye.size()];
        bye.serialize(&mut buf).unwrap();
        let back = Bye::parse(&buf).unwrap();
        assert_eq!(back, bye);
    }

    #[test]
    fn bye_size_is_padded_to_4() {
        let bye = Bye {
            sources: vec![1],
            reason: Some("Hi".into()),
        };
        assert_eq!(bye.size() % 4, 0);
    }
}
