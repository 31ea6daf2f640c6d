//! Source description (SDES), PT=202.
//!
//! See the relevant [RTP RFC section](https://tools.ietf.org/html/rfc3550#section-6.5).

use crate::error::{Result, RtcpError};
use crate::header::{RtcpHeader, RtcpType, COUNT_MAX, HEADER_LENGTH};
use crate::wire;

/// SDES item type, RFC 3550 §6.5.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum ItemType {
    Cname,
    Name,
    Email,
    Phone,
    Loc,
    Tool,
    Note,
    Priv,
    /// Unrecognised type octet; carried through unchanged.
    Unknown(u8),
}

impl ItemType {
    #[must_use]
    pub fn new(val: u8) -> Self {
        use ItemType::*;
        match val {
            1 => Cname,
            2 => Name,
            3 => Email,
            4 => Phone,
            5 => Loc,
            6 => Tool,
            7 => Note,
            8 => Priv,
            other => Unknown(other),
        }
    }

    #[must_use]
    pub fn code(self) -> u8 {
        use ItemType::*;
        match self {
            Cname => 1,
            Name => 2,
            Email => 3,
            Phone => 4,
            Loc => 5,
            Tool => 6,
            Note => 7,
            Priv => 8,
            Unknown(v) => v,
        }
    }
}

/// A single `(type, bytes)` SDES item. Opaque bytes are preserved verbatim,
/// including for unknown types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub item_type: ItemType,
    pub data: Vec<u8>,
}

impl Item {
    #[must_use]
    pub fn size(&self) -> usize {
        2 + self.data.len()
    }

    /// Parses one `(type, length, bytes)` item. Returns `None` at the
    /// terminating zero octet.
    fn parse(buf: &[u8]) -> Result<(Option<Item>, usize)> {
        let type_byte = wire::read_u8(buf)?;
        if type_byte == 0 {
            return Ok((None, 1));
        }
        let len = wire::read_u8(&buf[1..])? as usize;
        wire::need(buf, 2 + len)?;
        Ok((
            Some(Item {
                item_type: ItemType::new(type_byte),
                data: buf[2..2 + len].to_vec(),
            }),
            2 + len,
        ))
    }

    fn serialize(&self, buf: &mut [u8]) -> Result<usize> {
        if self.data.len() > 255 {
            return Err(RtcpError::InconsistentLength {
                declared: self.data.len(),
                actual: 255,
            });
        }
        let size = self.size();
        if buf.len() < size {
            return Err(RtcpError::BufferTooSmall {
                needed: size,
                available: buf.len(),
            });
        }
        buf[0] = self.item_type.code();
        buf[1] = self.data.len() as u8;
        buf[2..size].copy_from_slice(&self.data);
        Ok(size)
    }
}

/// One SSRC/CSRC's list of SDES items.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Description {
    pub ssrc: u32,
    pub items: Vec<Item>,
}

impl Description {
    /// Size including the terminating zero octet and 4-byte padding.
    #[must_use]
    pub fn size(&self) -> usize {
        let unpadded = 4 + self.items.iter().map(Item::size).sum::<usize>() + 1;
        wire::pad4(unpadded)
    }

    fn parse(buf: &[u8]) -> Result<(Self, usize)> {
        wire::need(buf, 4)?;
        let ssrc = wire::read_u32(buf)?;
        let mut off = 4;
        let mut items = Vec::new();
        loop {
            let (item, consumed) = Item::parse(&buf[off..])?;
            off += consumed;
            match item {
                Some(item) => items.push(item),
                None => break,
            }
        }
        let padded = wire::pad4(off);
        wire::need(buf, padded)?;
        Ok((Description { ssrc, items }, padded))
    }

    fn serialize(&self, buf: &mut [u8]) -> Result<usize> {
        let size = self.size();
        if buf.len() < size {
            return Err(RtcpError::BufferTooSmall {
                needed: size,
                available: buf.len(),
            });
        }
        wire::write_u32(buf, self.ssrc)?;
        let mut off = 4;
        for item in &self.items {
            off += item.serialize(&mut buf[off..])?;
        }
        buf[off] = 0;
        off += 1;
        for b in &mut buf[off..size] {
            *b = 0;
        }
        Ok(size)
    }

    #[must_use]
    pub fn dump(&self) -> String {
        format!(
            "[Description ssrc={:#x} items={}]",
            self.ssrc,
            self.items.len()
        )
    }
}

/// Source description packet: an ordered list of per-source [`Description`]s.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Sdes {
    pub descriptions: Vec<Description>,
}

impl Sdes {
    #[must_use]
    pub fn size(&self) -> usize {
        HEADER_LENGTH + self.descriptions.iter().map(Description::size).sum::<usize>()
    }

    pub fn parse(buf: &[u8]) -> Result<Self> {
        let header = RtcpHeader::parse(buf)?;
        if header.packet_type != RtcpType::SourceDescription {
            return Err(RtcpError::UnknownPacketType(header.packet_type.code()));
        }
        let total = header.bytes();
        if total > buf.len() {
            return Err(RtcpError::Truncated {
                needed: total,
                available: buf.len(),
            });
        }
        let mut body = &buf[HEADER_LENGTH..total];
        let mut descriptions = Vec::with_capacity(header.count as usize);
        for _ in 0..header.count {
            let (desc, consumed) = Description::parse(body)?;
            descriptions.push(desc);
            body = &body[consumed..];
        }
        Ok(Sdes { descriptions })
    }

    pub fn serialize(&self, buf: &mut [u8]) -> Result<usize> {
        let size = self.size();
        if buf.len() < size {
            return Err(RtcpError::BufferTooSmall {
                needed: size,
                available: buf.len(),
            });
        }
        if self.descriptions.len() > COUNT_MAX as usize {
            return Err(RtcpError::InconsistentLength {
                declared: self.descriptions.len(),
                actual: COUNT_MAX as usize,
            });
        }
        let header = RtcpHeader::new(RtcpType::SourceDescription, self.descriptions.len() as u8, size);
        let mut off = header.serialize(buf)?;
        for desc in &self.descriptions {
            off += desc.serialize(&mut buf[off..])?;
        }
        Ok(off)
    }

    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::from("[SDES\n");
        for desc in &self.descriptions {
            out += "\t";
            out += &desc.dump();
            out += "\n";
        }
        out += "/SDES]";
        out
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_single_cname() {
        #[rustfmt::skip]
        let buf = [
            0x81, 0xCA, 0x00, 0x03,
            0x00, 0x00, 0x00, 0x01,
            0x01, 0x05, b'a', b'l', b'i', b'c', b'e',
            0x00, 0x00,
        ];
        let sdes = Sdes::parse(&buf).unwrap();
        assert_eq!(sdes.descriptions.len(), 1);
        let desc = &sdes.descriptions[0];
        assert_eq!(desc.ssrc, 1);
        assert_eq!(desc.items.len(), 1);
        assert_eq!(desc.items[0].item_type, ItemType::Cname);
        assert_eq!(desc.items[0].data, b"alice");
    }

    #[test]
    fn round_trips_multiple_descriptions() {
        let sdes = Sdes {
            descriptions: vec![
                Description {
                    ssrc: 1,
                    items: vec![Item {
                        item_type: ItemType::Cname,
                        data: b"a".to_vec(),
                    }],
                },
                Description {
                    ssrc: 2,
                    items: vec![Item {
                        item_type: ItemType::Unknown(9),
                        data: b"xy".to_vec(),
                    }],
                },
            ],
        };

        let mut buf = vec![0u8; sdes.size()];
        let n = sdes.serialize(&mut buf).unwrap();
        assert_eq!(n, sdes.size());
        assert_eq!(sdes.size() % 4, 0);

        let back = Sdes::parse(&buf).unwrap();
        assert_eq!(back, sdes);
    }

    #[test]
    fn preserves_unknown_item_types_verbatim() {
        let item = Item {
            item_type: ItemType::Unknown(200),
            data: vec![1, 2, 3],
        };
        let mut buf = [0u8; 5];
        item.serialize(&mut buf).unwrap();
        let (parsed, _) = Item::parse(&buf).unwrap();
        assert_eq!(parsed.unwrap(), item);
    }
}
