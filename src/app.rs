//! Application-defined (APP), PT=204.
//!
//! See the relevant [RTP RFC section](https://tools.ietf.org/html/rfc3550#section-6.7).

use crate::error::{Result, RtcpError};
use crate::header::{RtcpHeader, RtcpType, HEADER_LENGTH};
use crate::wire;

/// Application-defined packet: an opaque, 4-byte-aligned payload tagged with
/// a subtype and a 4-character name.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct App {
    /// FMT/subtype field, application-defined.
    pub subtype: u8,
    pub ssrc: u32,
    /// Exactly 4 ASCII bytes, per RFC 3550 §6.7.
    pub name: [u8; 4],
    /// Application-dependent data; must already be a multiple of 4 bytes.
    pub data: Vec<u8>,
}

impl App {
    #[must_use]
    pub fn size(&self) -> usize {
        HEADER_LENGTH + 4 + 4 + self.data.len()
    }

    pub fn parse(buf: &[u8]) -> Result<Self> {
        let header = RtcpHeader::parse(buf)?;
        if header.packet_type != RtcpType::ApplicationDefined {
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
        wire::need(body, 8)?;
        let ssrc = wire::read_u32(body)?;
        let mut name = [0u8; 4];
        name.copy_from_slice(&body[4..8]);
        let data = body[8..].to_vec();

        Ok(App {
            subtype: header.count,
            ssrc,
            name,
            data,
        })
    }

    pub fn serialize(&self, buf: &mut [u8]) -> Result<usize> {
        if self.data.len() % 4 != 0 {
            return Err(RtcpError::InconsistentLength {
                declared: self.data.len(),
                actual: wire::pad4(self.data.len()),
            });
        }
        let size = self.size();
        if buf.len() < size {
            return Err(RtcpError::BufferTooSmall {
                needed: size,
                available: buf.len(),
            });
        }
        let header = RtcpHeader::new(RtcpType::ApplicationDefined, self.subtype, size);
        let mut off = header.serialize(buf)?;
        wire::write_u32(&mut buf[off..], self.ssrc)?;
        off += 4;
        buf[off..off + 4].copy_from_slice(&self.name);
        off += 4;
        buf[off..off + self.data.len()].copy_from_slice(&self.data);
        off += self.data.len();
        Ok(off)
    }

    #[must_use]
    pub fn dump(&self) -> String {
        format!(
            "[App subtype={} ssrc={:#x} name={:?} data_len={}]",
            self.subtype,
            self.ssrc,
            core::str::from_utf8(&self.name).unwrap_or("?"),
            self.data.len()
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trips_with_payload() {
        let app = App {
            subtype: 5,
            ssrc: 0xdead_beef,
            name: *b"TEST",
            data: vec![1, 2, 3, 4, 5, 6, 7, 8],
        };
        let mut buf = vec![0u8; app.size()];
        let n = app.serialize(&mut buf).unwrap();
        assert_eq!(n, app.size());

        let back = App::parse(&buf).unwrap();
        assert_eq!(back, app);
    }

    #[test]
    fn rejects_unaligned_payload() {
        let app = App {
            subtype: 0,
            ssrc: 1,
            name: *b"xxxx",
            data: vec![1, 2, 3],
        };
        let mut buf = vec![0u8; 64];
        assert!(app.serialize(&mut buf).is_err());
    }

    #[test]
    fn empty_payload_round_trips() {
        let app = App {
            subtype: 0,
            ssrc: 7,
            name: *b"NONE",
            data: vec![],
        };
        let mut buf = vec![0u8; app.size()];
        app.serialize(&mut buf).unwrap();
        let back = App::parse(&buf).unwrap();
        assert_eq!(back, app);
    }
}
