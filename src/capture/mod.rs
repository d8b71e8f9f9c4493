//! The capture input surface: configuration and per-packet messages.

pub mod config;
pub mod message;

pub use config::{InputConfig, ModuleConfig};
pub use message::{CaptureMessage, DataContainer, MessageDocument, PacketAnnotator};
