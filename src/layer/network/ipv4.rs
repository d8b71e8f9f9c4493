//! IPv4 (RFC 791). Options are skipped using the header length; the
//! payload is demultiplexed through the IP protocol table.

use crate::engine::format::format_ipv4;
use crate::engine::registry::dispatch_ip_proto;
use crate::engine::{Cursor, DecodeContext, Remainder};

pub const MIN_HEADER_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ipv4Header {
    ihl: u8,
    ttl: u8,
    protocol: u8,
    source: [u8; 4],
    destination: [u8; 4],
}

impl Ipv4Header {
    fn read(data: &[u8]) -> Option<Self> {
        let mut cursor = Cursor::new(data);
        let ihl = cursor.read_u8()? & 0x0f;
        // tos, total length, id, flags/fragment offset
        cursor.advance(7).then_some(())?;
        let ttl = cursor.read_u8()?;
        let protocol = cursor.read_u8()?;
        cursor.advance(2).then_some(())?;
        Some(Self {
            ihl,
            ttl,
            protocol,
            source: cursor.read_array()?,
            destination: cursor.read_array()?,
        })
    }

    fn header_len(&self) -> usize {
        usize::from(self.ihl) * 4
    }
}

pub fn decode<'a>(data: &'a [u8], ctx: &mut DecodeContext) -> Remainder<'a> {
    tracing::trace!(len = data.len(), "decoding ipv4");

    let Some(header) = Ipv4Header::read(data) else {
        tracing::debug!(len = data.len(), "ipv4 packet too short");
        return Remainder::empty();
    };
    if header.header_len() < MIN_HEADER_LEN {
        tracing::debug!(ihl = header.ihl, "ipv4 header length below minimum");
        return Remainder::empty();
    }

    ctx.emit("net_dst_ip", format_ipv4(header.destination));
    ctx.emit("net_src_ip", format_ipv4(header.source));
    ctx.emit("IP_ihl", header.ihl);
    ctx.emit("net_ttl", header.ttl);
    ctx.emit("IP_proto", header.protocol);

    let Some(payload) = data.get(header.header_len()..) else {
        tracing::debug!(
            header_len = header.header_len(),
            len = data.len(),
            "ipv4 options run past end of packet"
        );
        return Remainder::empty();
    };
    dispatch_ip_proto(header.protocol, payload, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(ihl: u8, protocol: u8) -> Vec<u8> {
        vec![
            0x40 | ihl, 0x00, 0x00, 0x30, // version/ihl, tos, total len
            0x12, 0x34, 0x40, 0x00, // id, flags
            64, protocol, 0x00, 0x00, // ttl, proto, checksum
            192, 168, 1, 1, // src ip
            192, 168, 1, 2, // dst ip
        ]
    }

    #[test]
    fn emits_fields_and_keeps_unknown_payload() {
        let mut packet = header(5, 47);
        packet.extend_from_slice(&[0xaa, 0xbb]);
        let mut ctx = DecodeContext::default();

        let remainder = decode(&packet, &mut ctx);

        let record = ctx.record();
        let names: Vec<_> = record.names().collect();
        assert_eq!(names, ["net_dst_ip", "net_src_ip", "IP_ihl", "net_ttl", "IP_proto"]);
        assert_eq!(record.get_str("net_src_ip"), Some("192.168.1.1"));
        assert_eq!(record.get_str("net_dst_ip"), Some("192.168.1.2"));
        assert_eq!(record.get_int("net_ttl"), Some(64));
        assert_eq!(record.get_int("IP_proto"), Some(47));
        assert_eq!(remainder.bytes(), &[0xaa, 0xbb]);
    }

    #[test]
    fn skips_options() {
        let mut packet = header(6, 200);
        packet.extend_from_slice(&[0x01, 0x01, 0x01, 0x00]); // nop options
        packet.push(0x77);
        let mut ctx = DecodeContext::default();

        assert_eq!(decode(&packet, &mut ctx).bytes(), &[0x77]);
        assert_eq!(ctx.record().get_int("IP_ihl"), Some(6));
    }

    #[test]
    fn rejects_short_and_malformed_headers() {
        let packet = header(5, 6);
        let mut ctx = DecodeContext::default();
        assert!(decode(&packet[..MIN_HEADER_LEN - 1], &mut ctx).is_empty());
        assert!(ctx.record().is_empty());

        let packet = header(2, 6);
        let mut ctx = DecodeContext::default();
        assert!(decode(&packet, &mut ctx).is_empty());
        assert!(ctx.record().is_empty());
    }

    #[test]
    fn options_past_end_leave_nothing() {
        let packet = header(15, 6);
        let mut ctx = DecodeContext::default();
        assert!(decode(&packet, &mut ctx).is_empty());
        assert_eq!(ctx.record().get_int("IP_ihl"), Some(15));
        assert!(!ctx.record().contains("net_src_port"));
    }
}
