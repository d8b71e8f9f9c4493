pub mod metadata;
pub mod owned;

pub use metadata::PacketMetadata;
pub use owned::CapturedPacket;
