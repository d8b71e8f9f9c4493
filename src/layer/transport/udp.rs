//! UDP (RFC 768). Port 53 on either side is handed to DNS.

use crate::engine::constants::port;
use crate::engine::{Cursor, DecodeContext, Remainder};
use crate::layer::application::dns;

pub const HEADER_LEN: usize = 8;

pub fn decode<'a>(data: &'a [u8], ctx: &mut DecodeContext) -> Remainder<'a> {
    tracing::trace!(len = data.len(), "decoding udp");

    let mut cursor = Cursor::new(data);
    let (Some(src_port), Some(dst_port), Some(length), Some(checksum)) = (
        cursor.read_u16_be(),
        cursor.read_u16_be(),
        cursor.read_u16_be(),
        cursor.read_u16_be(),
    ) else {
        tracing::debug!(len = data.len(), "udp datagram too short");
        return Remainder::empty();
    };

    ctx.emit("net_src_port", src_port);
    ctx.emit("net_dst_port", dst_port);
    ctx.emit("UDP_Length", length);
    ctx.emit("UDP_Checksum", checksum);

    let payload = cursor.rest();
    if src_port == port::DNS || dst_port == port::DNS {
        return ctx.descend("dns", payload, dns::decode);
    }
    Remainder::whole(payload)
}
