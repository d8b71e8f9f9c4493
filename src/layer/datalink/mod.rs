//! The datalink layer (Layer 2) decoders.
//! Ethernet is the pipeline entry point; LLC and ARP/RARP hang off it.

pub mod arp;
pub mod ethernet;
pub mod llc;
