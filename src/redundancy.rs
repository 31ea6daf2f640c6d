//! RFC 2198 redundant RTP payload decoding.
//!
//! *Requires the `"rtp"` feature.*
//!
//! A red-encoded RTP payload opens with a chain of sub-headers: zero or
//! more non-terminal 4-byte headers (`F=1`), each naming one redundant
//! block, followed by a single terminal 1-byte header (`F=0`) naming the
//! primary block's payload type. The redundant block payloads follow in
//! order, then the primary payload fills the remainder of the outer RTP
//! payload.

use crate::error::{Result, RtcpError};
use crate::rtp::{Rtp, RtpPacket, RtpType};

const NON_TERMINAL_HEADER_LEN: usize = 4;
const TERMINAL_HEADER_LEN: usize = 1;
const F_BIT: u8 = 0b1000_0000;

/// One non-terminal redundancy sub-header.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RedHeader {
    pub block_pt: u8,
    /// 14-bit RTP-timestamp offset of this block, relative to the outer
    /// packet's timestamp.
    pub ts_offset: u16,
    /// Running sum of the sizes of blocks preceding this one, i.e. this
    /// block's offset into the concatenated redundant-data region.
    pub skip: usize,
    /// 10-bit block length in bytes.
    pub size: u16,
}

/// A parsed view over a red-encoded RTP payload. Borrows from the
/// underlying buffer; use [`RedundantPayload::create_primary_packet`] to
/// sever that borrow and obtain an owned primary packet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedundantPayload<'a> {
    pub headers: Vec<RedHeader>,
    pub primary_type: u8,
    redundant_data: &'a [u8],
    primary_data: &'a [u8],
}

impl<'a> RedundantPayload<'a> {
    /// Parses the sub-header chain out of a raw RTP payload (RFC 2198 §3).
    pub fn from_payload(payload: &'a [u8]) -> Result<Self> {
        let mut headers = Vec::new();
        let mut off = 0usize;
        let mut skip = 0usize;

        let primary_type = loop {
            crate::wire::need(&payload[off..], TERMINAL_HEADER_LEN)?;
            let first_byte = payload[off];
            if first_byte & F_BIT == 0 {
                off += TERMINAL_HEADER_LEN;
                break first_byte & 0x7F;
            }

            crate::wire::need(&payload[off..], NON_TERMINAL_HEADER_LEN)?;
            let b = &payload[off..off + NON_TERMINAL_HEADER_LEN];
            let block_pt = b[0] & 0x7F;
            let ts_offset = ((b[1] as u16) << 6) | ((b[2] as u16) >> 2);
            let size = (((b[2] as u16) & 0x03) << 8) | (b[3] as u16);

            headers.push(RedHeader {
                block_pt,
                ts_offset,
                skip,
                size,
            });
            skip += size as usize;
            off += NON_TERMINAL_HEADER_LEN;
        };

        let total_block_len: usize = headers.iter().map(|h| h.size as usize).sum();
        crate::wire::need(&payload[off..], total_block_len)?;
        let redundant_data = &payload[off..off + total_block_len];
        let primary_data = &payload[off + total_block_len..];

        Ok(RedundantPayload {
            headers,
            primary_type,
            redundant_data,
            primary_data,
        })
    }

    /// Slice for the `index`-th redundant block, or `None` if out of range.
    #[must_use]
    pub fn redundant_block(&self, index: usize) -> Option<&'a [u8]> {
        let header = self.headers.get(index)?;
        let start = header.skip;
        let end = start + header.size as usize;
        self.redundant_data.get(start..end)
    }

    #[must_use]
    pub fn primary_data(&self) -> &'a [u8] {
        self.primary_data
    }

    #[must_use]
    pub fn primary_size(&self) -> usize {
        self.primary_data.len()
    }

    /// Clones the outer packet's timing and identity fields, substituting
    /// the primary block's payload and payload type. Redundant blocks are
    /// not represented in the result.
    #[must_use]
    pub fn create_primary_packet(&self, outer: &RtpPacket<'_>) -> Rtp {
        Rtp {
            version: outer.get_version(),
            padding: 0,
            extension: 0,
            csrc_count: outer.get_csrc_count(),
            marker: outer.get_marker(),
            payload_type: RtpType::new(self.primary_type),
            sequence: outer.get_sequence(),
            timestamp: outer.get_timestamp(),
            ssrc: outer.get_ssrc(),
            csrc_list: outer.get_csrc_list(),
            payload: self.primary_data.to_vec(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn s6_two_redundant_blocks() {
        #[rustfmt::skip]
        let payload: Vec<u8> = vec![
            0xC9, 0x0A, 0x20, 0x10,
            0xCA, 0x0A, 0x30, 0x08,
            0x07,
            // 16 bytes of block 1
            1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
            // 8 bytes of block 2
            2, 2, 2, 2, 2, 2, 2, 2,
            // primary payload
            3, 3, 3, 3, 3,
        ];

        let red = RedundantPayload::from_payload(&payload).unwrap();
        assert_eq!(red.headers.len(), 2);

        assert_eq!(red.headers[0].block_pt, 0x49);
        assert_eq!(red.headers[0].ts_offset, 648);
        assert_eq!(red.headers[0].size, 16);
        assert_eq!(red.headers[0].skip, 0);

        assert_eq!(red.headers[1].block_pt, 0x4A);
        assert_eq!(red.headers[1].ts_offset, 652);
        assert_eq!(red.headers[1].size, 8);
        assert_eq!(red.headers[1].skip, 16);

        assert_eq!(red.primary_type, 7);
        assert_eq!(red.redundant_block(0).unwrap(), &[1u8; 16][..]);
        assert_eq!(red.redundant_block(1).unwrap(), &[2u8; 8][..]);
        assert_eq!(red.primary_data(), &[3u8; 5][..]);
        assert_eq!(
            red.headers.last().unwrap().skip as usize + red.headers.last().unwrap().size as usize
                + red.primary_size(),
            payload.len() - 9
        );
    }

    #[test]
    fn truncated_payload_is_rejected() {
        let payload = [0xC9u8, 0x0A];
        assert!(matches!(
            RedundantPayload::from_payload(&payload),
            Err(RtcpError::Truncated { .. })
        ));
    }

    #[test]
    fn single_primary_only() {
        let payload = [0x07u8, 1, 2, 3];
        let red = RedundantPayload::from_payload(&payload).unwrap();
        assert!(red.headers.is_empty());
        assert_eq!(red.primary_type, 7);
        assert_eq!(red.primary_data(), &[1, 2, 3]);
    }
}
