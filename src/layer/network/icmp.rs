//! ICMP and ICMPv6 share the leading type/code/checksum layout.

use crate::engine::{Cursor, DecodeContext, Remainder};

pub const HEADER_LEN: usize = 8;

pub fn decode<'a>(data: &'a [u8], ctx: &mut DecodeContext) -> Remainder<'a> {
    tracing::trace!(len = data.len(), "decoding icmp");

    if data.len() < HEADER_LEN {
        tracing::debug!(len = data.len(), "icmp packet too short");
        return Remainder::empty();
    }

    let mut cursor = Cursor::new(data);
    let (Some(icmp_type), Some(code), Some(checksum)) =
        (cursor.read_u8(), cursor.read_u8(), cursor.read_u16_be())
    else {
        return Remainder::empty();
    };

    ctx.emit("net_icmp_type", icmp_type);
    ctx.emit("net_icmp_code", code);
    ctx.emit("icmp_checksum", checksum);

    Remainder::after(data, HEADER_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_echo_request() {
        let packet = [8, 0, 0xf7, 0xfd, 0x00, 0x01, 0x00, 0x01, b'p', b'i', b'n', b'g'];
        let mut ctx = DecodeContext::default();

        let remainder = decode(&packet, &mut ctx);

        assert_eq!(ctx.record().get_int("net_icmp_type"), Some(8));
        assert_eq!(ctx.record().get_int("net_icmp_code"), Some(0));
        assert_eq!(ctx.record().get_int("icmp_checksum"), Some(0xf7fd));
        assert_eq!(remainder.bytes(), b"ping");
    }

    #[test]
    fn rejects_short_packets() {
        let mut ctx = DecodeContext::default();
        assert!(decode(&[3, 1, 0, 0, 0, 0, 0], &mut ctx).is_empty());
        assert!(ctx.record().is_empty());
    }
}
