use thiserror::Error;

/// Failures reading capture input. Decoders themselves never fail.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("pcap global header truncated: {available} of 24 bytes")]
    TruncatedHeader { available: usize },

    #[error("unrecognised pcap magic {0:02x?}")]
    BadMagic([u8; 4]),

    #[error("pcap record at offset {offset} claims {claimed} bytes, {available} available")]
    TruncatedRecord {
        offset: usize,
        claimed: usize,
        available: usize,
    },

    #[error("unsupported link type {0}, only Ethernet (1) is decoded")]
    UnsupportedLinkType(u32),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("either an interface or a file must be configured")]
    NoInputSource,

    #[error("interface and file are mutually exclusive")]
    ConflictingInputSources,

    #[error("snap length must be greater than zero")]
    ZeroSnapLength,

    #[error("buffer size must be greater than zero")]
    ZeroBufferSize,
}
