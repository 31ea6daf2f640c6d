//! Sender and Receiver Reports.
//!
//! See the relevant RTP RFC sections: [SR](https://tools.ietf.org/html/rfc3550#section-6.4.1),
//! [RR](https://tools.ietf.org/html/rfc3550#section-6.4.2).

use crate::error::{Result, RtcpError};
use crate::header::{RtcpHeader, RtcpType, COUNT_MAX, HEADER_LENGTH};
use crate::wire;

pub const REPORT_BLOCK_LENGTH: usize = 24;
const SENDER_INFO_LENGTH: usize = 20;

/// Reception statistics for a single SSRC, as carried in a [`SenderReport`]
/// or [`ReceiverReport`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct ReportBlock {
    pub ssrc: u32,
    /// Packet loss since the last report, as `n/256`.
    pub fraction_lost: u8,
    /// Total packets lost since reception began; signed 24-bit.
    pub cumulative_lost: i32,
    /// Highest sequence number received, extended by wrap-around cycles.
    pub ext_highest_seq: u32,
    pub jitter: u32,
    /// Middle 32 bits of the NTP timestamp of the last SR received, or 0.
    pub lsr: u32,
    /// Delay since the last SR, in units of 1/65536s, or 0.
    pub dlsr: u32,
}

impl ReportBlock {
    #[must_use]
    pub fn size(&self) -> usize {
        REPORT_BLOCK_LENGTH
    }

    pub fn parse(buf: &[u8]) -> Result<Self> {
        wire::need(buf, REPORT_BLOCK_LENGTH)?;
        Ok(ReportBlock {
            ssrc: wire::read_u32(&buf[0..])?,
            fraction_lost: wire::read_u8(&buf[4..])?,
            cumulative_lost: wire::read_i24(&buf[5..])?,
            ext_highest_seq: wire::read_u32(&buf[8..])?,
            jitter: wire::read_u32(&buf[12..])?,
            lsr: wire::read_u32(&buf[16..])?,
            dlsr: wire::read_u32(&buf[20..])?,
        })
    }

    pub fn serialize(&self, buf: &mut [u8]) -> Result<usize> {
        if buf.len() < REPORT_BLOCK_LENGTH {
            return Err(RtcpError::BufferTooSmall {
                needed: REPORT_BLOCK_LENGTH,
                available: buf.len(),
            });
        }
        wire::write_u32(&mut buf[0..], self.ssrc)?;
        wire::write_u8(&mut buf[4..], self.fraction_lost)?;
        wire::write_i24(&mut buf[5..], self.cumulative_lost)?;
        wire::write_u32(&mut buf[8..], self.ext_highest_seq)?;
        wire::write_u32(&mut buf[12..], self.jitter)?;
        wire::write_u32(&mut buf[16..], self.lsr)?;
        wire::write_u32(&mut buf[20..], self.dlsr)?;
        Ok(REPORT_BLOCK_LENGTH)
    }

    #[must_use]
    pub fn dump(&self) -> String {
        format!(
            "[ReportBlock ssrc={:#x} lost={}/{} seq={} jitter={} lsr={} dlsr={}]",
            self.ssrc,
            self.fraction_lost,
            self.cumulative_lost,
            self.ext_highest_seq,
            self.jitter,
            self.lsr,
            self.dlsr
        )
    }
}

/// Sender report, containing jitter, reception, timing and volume information.
///
/// See the relevant [RTP RFC section](https://tools.ietf.org/html/rfc3550#section-6.4.1).
#[derive(Clone, Debug, PartialEq, Default)]
pub struct SenderReport {
    pub ssrc: u32,
    /// Seconds since the NTP epoch (1900-01-01).
    pub ntp_sec: u32,
    /// Fractional seconds, as a 32-bit binary fraction.
    pub ntp_frac: u32,
    pub rtp_timestamp: u32,
    pub packets_sent: u32,
    pub octets_sent: u32,
    pub reports: Vec<ReportBlock>,
}

impl SenderReport {
    /// Stores `SetTimestamp(seconds_since_unix_epoch, micros)`: converts from
    /// the Unix epoch into the NTP fixed-point representation.
    pub fn set_timestamp(&mut self, unix_seconds: u64, micros: u32) {
        let (sec, frac) = wire::ntp_from_unix(unix_seconds, micros);
        self.ntp_sec = sec;
        self.ntp_frac = frac;
    }

    /// Inverts [`Self::set_timestamp`], losing no more than 1 microsecond.
    #[must_use]
    pub fn get_timestamp(&self) -> (u64, u32) {
        wire::ntp_to_unix(self.ntp_sec, self.ntp_frac)
    }

    #[must_use]
    pub fn size(&self) -> usize {
        HEADER_LENGTH + 4 + SENDER_INFO_LENGTH + REPORT_BLOCK_LENGTH * self.reports.len()
    }

    pub fn parse(buf: &[u8]) -> Result<Self> {
        let header = RtcpHeader::parse(buf)?;
        if header.packet_type != RtcpType::SenderReport {
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
        wire::need(body, 4 + SENDER_INFO_LENGTH)?;

        let ssrc = wire::read_u32(&body[0..])?;
        let ntp_sec = wire::read_u32(&body[4..])?;
        let ntp_frac = wire::read_u32(&body[8..])?;
        let rtp_timestamp = wire::read_u32(&body[12..])?;
        let packets_sent = wire::read_u32(&body[16..])?;
        let octets_sent = wire::read_u32(&body[20..])?;

        let rest = &body[4 + SENDER_INFO_LENGTH..];
        let available_blocks = rest.len() / REPORT_BLOCK_LENGTH;
        let take = (header.count as usize).min(available_blocks);
        let mut reports = Vec::with_capacity(take);
        for i in 0..take {
            reports.push(ReportBlock::parse(&rest[i * REPORT_BLOCK_LENGTH..])?);
        }

        Ok(SenderReport {
            ssrc,
            ntp_sec,
            ntp_frac,
            rtp_timestamp,
            packets_sent,
            octets_sent,
            reports,
        })
    }

    pub fn serialize(&self, buf: &mut [u8]) -> Result<usize> {
        let size = self.size();
        if buf.len() < size {
            return Err(RtcpError::BufferTooSmall {
                needed: size,
                available: buf.len(),
            });
        }
        if self.reports.len() > COUNT_MAX as usize {
            return Err(RtcpError::InconsistentLength {
                declared: self.reports.len(),
                actual: COUNT_MAX as usize,
            });
        }

        let header = RtcpHeader::new(RtcpType::SenderReport, self.reports.len() as u8, size);
        let mut off = header.serialize(buf)?;

        wire::write_u32(&mut buf[off..], self.ssrc)?;
        off += 4;
        wire::write_u32(&mut buf[off..], self.ntp_sec)?;
        off += 4;
        wire::write_u32(&mut buf[off..], self.ntp_frac)?;
        off += 4;
        wire::write_u32(&mut buf[off..], self.rtp_timestamp)?;
        off += 4;
        wire::write_u32(&mut buf[off..], self.packets_sent)?;
        off += 4;
        wire::write_u32(&mut buf[off..], self.octets_sent)?;
        off += 4;

        for rep in &self.reports {
            off += rep.serialize(&mut buf[off..])?;
        }

        Ok(off)
    }

    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = format!(
            "[SenderReport ssrc={:#x} ntp={}.{} rtp_ts={} sent={}pkts/{}B\n",
            self.ssrc, self.ntp_sec, self.ntp_frac, self.rtp_timestamp, self.packets_sent, self.octets_sent
        );
        for rep in &self.reports {
            out += "\t";
            out += &rep.dump();
            out += "\n";
        }
        out += "/SenderReport]";
        out
    }
}

/// Receiver report, containing jitter and reception information.
///
/// See the relevant [RTP RFC section](https://tools.ietf.org/html/rfc3550#section-6.4.2).
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ReceiverReport {
    pub ssrc: u32,
    pub reports: Vec<ReportBlock>,
}

impl ReceiverReport {
    #[must_use]
    pub fn size(&self) -> usize {
        HEADER_LENGTH + 4 + REPORT_BLOCK_LENGTH * self.reports.len()
    }

    pub fn parse(buf: &[u8]) -> Result<Self> {
        let header = RtcpHeader::parse(buf)?;
        if header.packet_type != RtcpType::ReceiverReport {
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
        wire::need(body, 4)?;
        let ssrc = wire::read_u32(body)?;

        let rest = &body[4..];
        let available_blocks = rest.len() / REPORT_BLOCK_LENGTH;
        let take = (header.count as usize).min(available_blocks);
        let mut reports = Vec::with_capacity(take);
        for i in 0..take {
            reports.push(ReportBlock::parse(&rest[i * REPORT_BLOCK_LENGTH..])?);
        }

        Ok(ReceiverReport { ssrc, reports })
    }

    pub fn serialize(&self, buf: &mut [u8]) -> Result<usize> {
        let size = self.size();
        if buf.len() < size {
            return Err(RtcpError::BufferTooSmall {
                needed: size,
                available: buf.len(),
            });
        }
        if self.reports.len() > COUNT_MAX as usize {
            return Err(RtcpError::InconsistentLength {
                declared: self.reports.len(),
                actual: COUNT_MAX as usize,
            });
        }

        let header = RtcpHeader::new(RtcpType::ReceiverReport, self.reports.len() as u8, size);
        let mut off = header.serialize(buf)?;
        wire::write_u32(&mut buf[off..], self.ssrc)?;
        off += 4;
        for rep in &self.reports {
            off += rep.serialize(&mut buf[off..])?;
        }
        Ok(off)
    }

    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = format!("[ReceiverReport ssrc={:#x}\n", self.ssrc);
        for rep in &self.reports {
            out += "\t";
            out += &rep.dump();
            out += "\n";
        }
        out += "/ReceiverReport]";
        out
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn s1_empty_rr_round_trips() {
        let buf = [0x81, 0xC9, 0x00, 0x01, 0x00, 0x00, 0x00, 0x2A];
        let rr = ReceiverReport::parse(&buf).unwrap();
        assert_eq!(rr.ssrc, 0x0000_002A);
        assert!(rr.reports.is_empty());

        let mut out = [0u8; 8];
        let n = rr.serialize(&mut out).unwrap();
        assert_eq!(n, 8);
        assert_eq!(&out, &buf);
    }

    #[test]
    fn s2_sr_with_one_block() {
        #[rustfmt::skip]
        let buf = [
            0x80, 0xC8, 0x00, 0x06,
            0x00, 0x00, 0x00, 0x01,
            0xD9, 0x1D, 0xC8, 0x1C,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x64,
            0x00, 0x00, 0x00, 0x05,
            0x00, 0x00, 0x03, 0x20,
            0x00, 0x00, 0x00, 0x02,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x0A,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
        ];
        let sr = SenderReport::parse(&buf).unwrap();
        assert_eq!(sr.ssrc, 1);
        assert_eq!(sr.reports.len(), 1);
        assert_eq!(sr.reports[0].ssrc, 2);
        assert_eq!(sr.reports[0].ext_highest_seq, 10);

        let mut out = vec![0u8; sr.size()];
        let n = sr.serialize(&mut out).unwrap();
        assert_eq!(n, buf.len());
        assert_eq!(out, buf);
    }

    #[test]
    fn tolerates_over_declared_block_count() {
        // count = 5 but only one 24-byte block actually follows.
        let mut buf = vec![0x85, 0xC9, 0x00, 0x02, 0, 0, 0, 1];
        buf.extend(std::iter::repeat(0u8).take(24));
        let rr = ReceiverReport::parse(&buf).unwrap();
        assert_eq!(rr.reports.len(), 1);
    }

    #[test]
    fn ntp_timestamp_round_trip() {
        let mut sr = SenderReport::default();
        sr.set_timestamp(1_700_000_000, 123_456);
        let (sec, micros) = sr.get_timestamp();
        assert_eq!(sec, 1_700_000_000);
        assert!((micros as i64 - 123_456).abs() <= 1);
    }

    #[test]
    fn truncated_header_rejected() {
        let buf = [0x81, 0xC9, 0x00, 0xFF, 0, 0, 0, 0];
        assert!(matches!(
            ReceiverReport::parse(&buf),
            Err(RtcpError::Truncated { .. })
        ));
    }
}
