//! Error kinds produced by the codec.
//!
//! Every failure a [`Parse`](crate::packet::Packet) or `Serialize` call can
//! raise is represented here; there is no catch-all `Other` variant; a new
//! failure mode should get a new variant, not a blurred one.

use thiserror::Error;

/// A failure encountered while parsing or serializing an RTCP/RTP structure.
#[derive(Error, Copy, Clone, Debug, Eq, PartialEq)]
pub enum RtcpError {
    /// A header declared more bytes than remain in the buffer, or an inner
    /// field declared more bytes than its parent had left to give.
    #[error("truncated: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    /// The 2-bit RTCP version field was not `2`.
    #[error("bad RTCP version {0}")]
    BadVersion(u8),

    /// The payload type did not match any packet kind this codec recognises.
    ///
    /// Recoverable during compound parsing: the packet is skipped and the
    /// remainder of the compound datagram is still parsed.
    #[error("unknown RTCP payload type {0}")]
    UnknownPacketType(u8),

    /// The feedback message type (FMT) carried in `count` was not recognised
    /// for its enclosing RTPFB/PSFB packet. Fatal for the compound packet.
    #[error("unknown feedback FMT {fmt} for payload type {payload_type}")]
    UnknownFeedbackFmt { payload_type: u8, fmt: u8 },

    /// The on-wire `length` word could not be reconciled with the body that
    /// was actually present.
    #[error("inconsistent length: header declares {declared} bytes, body needs {actual}")]
    InconsistentLength { declared: usize, actual: usize },

    /// `Serialize` was given a buffer smaller than `Size()`.
    #[error("buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    /// A field-less variant (e.g. PLI) was parsed with a non-empty body.
    #[error("{kind} carries a body but must be empty")]
    EmptyWithBody { kind: &'static str },
}

pub type Result<T> = core::result::Result<T, RtcpError>;
