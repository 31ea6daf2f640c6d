//! An RTCP compound-packet codec and RTP redundant-payload (RFC 2198)
//! decoder.
//!
//! This crate translates between the RTCP wire format (RFC 3550, plus the
//! AVPF transport/payload feedback of RFC 4585 and the codec-control
//! extensions of RFC 5104) and an in-memory, fully typed tree. It also
//! decodes RFC 2198 redundant RTP payloads into their constituent blocks.
//!
//! The codec is pure: every `parse`/`serialize` call is a synchronous,
//! allocation-bounded transformation over a caller-provided byte buffer.
//! There is no network I/O, no timers, and no cryptography here — those
//! belong to the transport layer this crate is embedded in.
//!
//! ```
//! use rtcc::packet::CompoundPacket;
//!
//! let buf = [0x81, 0xC9, 0x00, 0x01, 0x00, 0x00, 0x00, 0x2A];
//! let compound = CompoundPacket::parse(&buf).unwrap();
//! assert_eq!(compound.packets.len(), 1);
//! ```
//!
//! All crate features are optional:
//! * `"rtp"` includes copy-free and owned views of RTP packets, and the
//!   RFC 2198 redundancy decoder that sits on top of them. *Default*.
//! * `"rtcp"` includes the RTCP packet tree and compound-packet codec. *Default*.
//! * `"pnet"` re-exports the [pnet] packet-view traits used by `"rtp"`. *Default*.
//!
//! [pnet]: https://docs.rs/pnet_macros_support

pub mod error;
pub mod wire;

#[cfg(feature = "rtcp")]
pub mod header;

#[cfg(feature = "rtcp")]
pub mod report;

#[cfg(feature = "rtcp")]
pub mod sdes;

#[cfg(feature = "rtcp")]
pub mod bye;

#[cfg(feature = "rtcp")]
pub mod app;

#[cfg(feature = "rtcp")]
pub mod feedback;

#[cfg(feature = "rtcp")]
pub mod legacy;

#[cfg(feature = "rtcp")]
pub mod jitter;

#[cfg(feature = "rtcp")]
pub mod packet;

#[cfg(feature = "rtp")]
pub mod wrap;

#[cfg(feature = "rtp")]
pub mod rtp;

#[cfg(all(feature = "rtp", feature = "rtcp"))]
pub mod redundancy;

#[cfg(feature = "pnet")]
pub use pnet_macros_support as pnet;
