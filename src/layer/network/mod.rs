//! The network layer (Layer 3) decoders.

pub mod icmp;
pub mod ipv4;
pub mod ipv6;
pub mod ipx;
