//! The transport layer (Layer 4) decoders.

pub mod tcp;
pub mod udp;
