//! The application layer decoders. Each is reached from a transport
//! decoder by well-known port and decides for itself whether the payload
//! looks like its protocol.

pub mod dns;
pub mod ftp;
pub mod http;
pub mod smb;
