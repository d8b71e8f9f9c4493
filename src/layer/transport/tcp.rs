//! TCP (RFC 9293). Application decoders are picked by well-known port on
//! either side of the connection.

use crate::engine::constants::port;
use crate::engine::{Cursor, DecodeContext, Remainder};
use crate::layer::application::{ftp, http, smb};

pub const MIN_HEADER_LEN: usize = 20;

/// Flag letters for bits 0..7 of the flags byte.
const FLAG_LETTERS: &[u8; 8] = b"FSRPAUEC";
/// Nonce-sum bit, carried in the low bit of the data-offset byte.
const NONCE_LETTER: char = 'N';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TcpHeader {
    src_port: u16,
    dst_port: u16,
    seq: u32,
    ack: u32,
    data_offset: u8,
    flags: u8,
}

impl TcpHeader {
    fn read(data: &[u8]) -> Option<Self> {
        if data.len() < MIN_HEADER_LEN {
            return None;
        }
        let mut cursor = Cursor::new(data);
        Some(Self {
            src_port: cursor.read_u16_be()?,
            dst_port: cursor.read_u16_be()?,
            seq: cursor.read_u32_be()?,
            ack: cursor.read_u32_be()?,
            data_offset: cursor.read_u8()?,
            flags: cursor.read_u8()?,
        })
    }

    fn header_len(&self) -> usize {
        usize::from(self.data_offset & 0xf0) >> 2
    }

    fn uses_port(&self, candidates: &[u16]) -> bool {
        candidates.contains(&self.src_port) || candidates.contains(&self.dst_port)
    }
}

pub fn flag_string(flags: u8, data_offset: u8) -> String {
    let mut out: String = FLAG_LETTERS
        .iter()
        .enumerate()
        .filter(|(bit, _)| flags & (1 << bit) != 0)
        .map(|(_, letter)| char::from(*letter))
        .collect();
    if data_offset & 0x01 != 0 {
        out.push(NONCE_LETTER);
    }
    out
}

pub fn decode<'a>(data: &'a [u8], ctx: &mut DecodeContext) -> Remainder<'a> {
    tracing::trace!(len = data.len(), "decoding tcp");

    let Some(header) = TcpHeader::read(data) else {
        tracing::debug!(len = data.len(), "tcp segment too short");
        return Remainder::empty();
    };

    ctx.emit("net_src_port", header.src_port);
    ctx.emit("net_dst_port", header.dst_port);
    ctx.emit("TCP_seq_number", header.seq);
    ctx.emit("TCP_ack_number", header.ack);
    ctx.emit("net_flags", flag_string(header.flags, header.data_offset));

    let payload = match data.get(header.header_len()..) {
        Some(payload) if header.header_len() >= MIN_HEADER_LEN => payload,
        _ => {
            tracing::debug!(
                header_len = header.header_len(),
                len = data.len(),
                "tcp data offset out of range"
            );
            return Remainder::empty();
        }
    };

    if header.uses_port(&[port::SMB]) {
        ctx.descend("smb", payload, smb::decode)
    } else if header.uses_port(&[port::FTP, port::FTP_DATA]) {
        ctx.descend("ftp", payload, ftp::decode)
    } else if header.uses_port(&[port::HTTP, port::HTTP_ALT]) {
        ctx.descend("http", payload, http::decode)
    } else {
        Remainder::whole(payload)
    }
}
