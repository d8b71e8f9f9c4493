//! Novell IPX. Terminal: the payload is not demultiplexed further.

use crate::engine::format::format_mac;
use crate::engine::{Cursor, DecodeContext, Remainder};

pub const HEADER_LEN: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct IpxHeader {
    checksum: u16,
    packet_len: u16,
    transport_control: u8,
    packet_type: u8,
    dst_net: u32,
    dst_node: [u8; 6],
    dst_socket: u16,
    src_net: u32,
    src_node: [u8; 6],
    src_socket: u16,
}

impl IpxHeader {
    fn read(data: &[u8]) -> Option<Self> {
        let mut cursor = Cursor::new(data);
        Some(Self {
            checksum: cursor.read_u16_be()?,
            packet_len: cursor.read_u16_be()?,
            transport_control: cursor.read_u8()?,
            packet_type: cursor.read_u8()?,
            dst_net: cursor.read_u32_be()?,
            dst_node: cursor.read_array()?,
            dst_socket: cursor.read_u16_be()?,
            src_net: cursor.read_u32_be()?,
            src_node: cursor.read_array()?,
            src_socket: cursor.read_u16_be()?,
        })
    }
}

pub fn decode<'a>(data: &'a [u8], ctx: &mut DecodeContext) -> Remainder<'a> {
    tracing::trace!(len = data.len(), "decoding ipx");

    let Some(header) = IpxHeader::read(data) else {
        tracing::debug!(len = data.len(), "ipx packet too short");
        return Remainder::empty();
    };

    ctx.emit("IPX_chksum", header.checksum);
    ctx.emit("IPX_pktLen", header.packet_len);
    ctx.emit("IPX_transCtrl", header.transport_control);
    ctx.emit("IPX_type", header.packet_type);
    ctx.emit("IPX_dest_net", header.dst_net);
    ctx.emit("IPX_src_net", header.src_net);
    ctx.emit("IPX_dest_node", format_mac(header.dst_node));
    ctx.emit("IPX_src_node", format_mac(header.src_node));
    ctx.emit("IPX_dest_socket", header.dst_socket);
    ctx.emit("IPX_src_socket", header.src_socket);

    Remainder::after(data, HEADER_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_header() {
        let packet = [
            0xff, 0xff, 0x00, 0x22, // checksum, length
            0x00, 0x04, // transport control, type
            0x00, 0x00, 0x00, 0x01, // dst net
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, // dst node
            0x04, 0x52, // dst socket sap
            0x00, 0x00, 0x00, 0x02, // src net
            0x00, 0x0c, 0x29, 0x01, 0x02, 0x03, // src node
            0x40, 0x01, // src socket
            0xca, 0xfe, 0xba, 0xbe,
        ];
        let mut ctx = DecodeContext::default();

        let remainder = decode(&packet, &mut ctx);

        let record = ctx.record();
        assert_eq!(record.get_int("IPX_chksum"), Some(0xffff));
        assert_eq!(record.get_int("IPX_pktLen"), Some(0x22));
        assert_eq!(record.get_int("IPX_type"), Some(4));
        assert_eq!(record.get_int("IPX_dest_net"), Some(1));
        assert_eq!(record.get_int("IPX_src_net"), Some(2));
        assert_eq!(record.get_str("IPX_dest_node"), Some("ff:ff:ff:ff:ff:ff"));
        assert_eq!(record.get_str("IPX_src_node"), Some("00:0c:29:01:02:03"));
        assert_eq!(record.get_int("IPX_dest_socket"), Some(0x0452));
        assert_eq!(record.get_int("IPX_src_socket"), Some(0x4001));
        assert_eq!(remainder.bytes(), &[0xca, 0xfe, 0xba, 0xbe]);
    }

    #[test]
    fn rejects_short_packets() {
        let mut ctx = DecodeContext::default();
        assert!(decode(&[0u8; HEADER_LEN - 1], &mut ctx).is_empty());
        assert!(ctx.record().is_empty());
    }
}
