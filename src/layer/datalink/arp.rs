//! ARP and RARP (RFC 826, RFC 903).
//!
//! Both share one wire format and differ only in the field prefix they
//! report under. Address positions are derived from the declared hardware
//! and protocol address lengths, so every address read is bounds checked
//! against the actual buffer rather than trusted.

use crate::engine::constants::ethertype;
use crate::engine::format::{format_ipv4, format_mac};
use crate::engine::{Cursor, DecodeContext, Remainder};

pub const HEADER_LEN: usize = 28;
const ADDRESSES_OFFSET: usize = 8;
const HW_TYPE_ETHERNET: u16 = 1;

struct FieldNames {
    hw_type: &'static str,
    p_type: &'static str,
    op: &'static str,
    hw_src: &'static str,
    hw_dst: &'static str,
    p_src: &'static str,
    p_dst: &'static str,
}

const ARP: FieldNames = FieldNames {
    hw_type: "ARP_hwType",
    p_type: "ARP_pType",
    op: "ARP_op",
    hw_src: "ARP_hwSrc",
    hw_dst: "ARP_hwDst",
    p_src: "ARP_pSrc",
    p_dst: "ARP_pDst",
};

const RARP: FieldNames = FieldNames {
    hw_type: "RARP_hwType",
    p_type: "RARP_pType",
    op: "RARP_op",
    hw_src: "RARP_hwSrc",
    hw_dst: "RARP_hwDst",
    p_src: "RARP_pSrc",
    p_dst: "RARP_pDst",
};

/// Fixed part of the header preceding the variable-length addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ArpHeader {
    hardware_type: u16,
    protocol_type: u16,
    hardware_len: usize,
    protocol_len: usize,
    operation: u16,
}

impl ArpHeader {
    fn read(data: &[u8]) -> Option<Self> {
        let mut cursor = Cursor::new(data);
        Some(Self {
            hardware_type: cursor.read_u16_be()?,
            protocol_type: cursor.read_u16_be()?,
            hardware_len: usize::from(cursor.read_u8()?),
            protocol_len: usize::from(cursor.read_u8()?),
            operation: cursor.read_u16_be()?,
        })
    }
}

pub fn decode_arp<'a>(data: &'a [u8], ctx: &mut DecodeContext) -> Remainder<'a> {
    decode_with(data, ctx, &ARP)
}

pub fn decode_rarp<'a>(data: &'a [u8], ctx: &mut DecodeContext) -> Remainder<'a> {
    decode_with(data, ctx, &RARP)
}

fn decode_with<'a>(data: &'a [u8], ctx: &mut DecodeContext, names: &FieldNames) -> Remainder<'a> {
    tracing::trace!(len = data.len(), prefix = names.op, "decoding arp");

    let header = match ArpHeader::read(data) {
        Some(header) if data.len() >= HEADER_LEN => header,
        _ => {
            tracing::debug!(len = data.len(), "arp packet too short");
            return Remainder::empty();
        }
    };

    ctx.emit(names.hw_type, header.hardware_type);
    ctx.emit(names.p_type, header.protocol_type);
    ctx.emit(names.op, header.operation);

    let hl = header.hardware_len;
    let pl = header.protocol_len;

    if header.hardware_type == HW_TYPE_ETHERNET {
        let src = address::<6>(data, ADDRESSES_OFFSET);
        let dst = address::<6>(data, ADDRESSES_OFFSET + hl + pl);
        if let (Some(src), Some(dst)) = (src, dst) {
            ctx.emit(names.hw_src, format_mac(src));
            ctx.emit(names.hw_dst, format_mac(dst));
        } else {
            tracing::debug!(hl, pl, "arp hardware addresses out of bounds");
        }
    }

    if header.protocol_type == ethertype::IPV4 {
        let src = address::<4>(data, ADDRESSES_OFFSET + hl);
        let dst = address::<4>(data, ADDRESSES_OFFSET + 2 * hl + pl);
        if let (Some(src), Some(dst)) = (src, dst) {
            ctx.emit(names.p_src, format_ipv4(src));
            ctx.emit(names.p_dst, format_ipv4(dst));
        } else {
            tracing::debug!(hl, pl, "arp protocol addresses out of bounds");
        }
    }

    Remainder::after(data, HEADER_LEN)
}

fn address<const N: usize>(data: &[u8], offset: usize) -> Option<[u8; N]> {
    Cursor::with_pos(data, offset)?.read_array::<N>()
}
