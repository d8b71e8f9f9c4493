//! Stateless packet decoding for capture inputs.
//!
//! Frames are walked from the Ethernet header upward; each protocol layer
//! appends named fields to a flat [`FieldRecord`] and hands its payload to
//! the next decoder. Whatever no decoder claims is returned as the leftover.

pub mod capture;
pub mod engine;
pub mod layer;
pub mod packet;

pub use capture::{CaptureMessage, InputConfig, ModuleConfig, PacketAnnotator};
pub use engine::{
    CaptureError, ConfigError, DecodeConfig, Dissection, FieldRecord, FieldValue, FrameDecoder,
    Remainder, decode_frame, parse_pcap,
};
pub use packet::{CapturedPacket, PacketMetadata};
