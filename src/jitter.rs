//! Extended inter-arrival jitter report, PT=195, RFC 5450.

use crate::error::{Result, RtcpError};
use crate::header::{RtcpHeader, RtcpType, COUNT_MAX, HEADER_LENGTH};
use crate::wire;

/// A run of 32-bit inter-arrival jitter samples, one per preceding
/// `ReceiverReport` block in the same compound packet.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ExtendedJitterReport {
    pub samples: Vec<u32>,
}

impl ExtendedJitterReport {
    #[must_use]
    pub fn size(&self) -> usize {
        HEADER_LENGTH + 4 * self.samples.len()
    }

    pub fn parse(buf: &[u8]) -> Result<Self> {
        let header = RtcpHeader::parse(buf)?;
        if header.packet_type != RtcpType::JitterReport {
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
        wire::need(body, 4 * header.count as usize)?;
        let samples = (0..header.count as usize)
            .map(|i| wire::read_u32(&body[i * 4..]))
            .collect::<Result<Vec<_>>>()?;
        Ok(ExtendedJitterReport { samples })
    }

    pub fn serialize(&self, buf: &mut [u8]) -> Result<usize> {
        if self.samples.len() > COUNT_MAX as usize {
            return Err(RtcpError::InconsistentLength {
                declared: self.samples.len(),
                actual: COUNT_MAX as usize,
            });
        }
        let size = self.size();
        if buf.len() < size {
            return Err(RtcpError::BufferTooSmall {
                needed: size,
                available: buf.len(),
            });
        }
        let header = RtcpHeader::new(RtcpType::JitterReport, self.samples.len() as u8, size);
        let mut off = header.serialize(buf)?;
        for sample in &self.samples {
            wire::write_u32(&mut buf[off..], *sample)?;
            off += 4;
        }
        Ok(off)
    }

    #[must_use]
    pub fn dump(&self) -> String {
        format!("[ExtendedJitterReport samples={:?}]", self.samples)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trips_samples() {
        let report = ExtendedJitterReport {
            samples: vec![10, 20, 30],
        };
        let mut buf = vec![0u8; report.size()];
        report.serialize(&mut buf).unwrap();
        assert_eq!(ExtendedJitterReport::parse(&buf).unwrap(), report);
    }

    #[test]
    fn empty_report_round_trips() {
        let report = ExtendedJitterReport::default();
        let mut buf = vec![0u8; report.size()];
        report.serialize(&mut buf).unwrap();
        assert_eq!(ExtendedJitterReport::parse(&buf).unwrap(), report);
    }
}
