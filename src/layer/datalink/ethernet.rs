//! Ethernet II framing, with an optional single 802.1Q tag.
//!
//! Type values below 1500 are 802.3 lengths and hand the payload to LLC;
//! everything else goes through the EtherType dispatch table.

use crate::engine::constants::{ETHERNET_MIN_FRAME, ethertype, ethertype_name};
use crate::engine::format::format_mac;
use crate::engine::registry::dispatch_ethertype;
use crate::engine::{Cursor, DecodeContext, Remainder};

use super::llc;

pub const HEADER_LEN: usize = 14;
pub const VLAN_HEADER_LEN: usize = 18;

pub fn decode<'a>(data: &'a [u8], ctx: &mut DecodeContext) -> Remainder<'a> {
    tracing::trace!(len = data.len(), "decoding ethernet");

    let mut cursor = Cursor::new(data);
    let (Some(dst), Some(src), Some(mut ether_type)) = (
        cursor.read_array::<6>(),
        cursor.read_array::<6>(),
        cursor.read_u16_be(),
    ) else {
        tracing::debug!(len = data.len(), "ethernet frame too short");
        return Remainder::empty();
    };

    ctx.emit("ETH_src", format_mac(src));
    ctx.emit("ETH_dst", format_mac(dst));

    if ether_type == ethertype::VLAN_8021Q {
        let (Some(tag), Some(inner)) = (cursor.read_u16_be(), cursor.read_u16_be()) else {
            tracing::debug!(len = data.len(), "802.1Q header truncated");
            return Remainder::empty();
        };
        ctx.emit("ETH_tag", tag);
        ether_type = inner;
    }

    let payload = cursor.rest();
    let remainder = if ether_type < ethertype::MAX_802_3_LENGTH {
        ctx.emit("ETH_len", ether_type);
        ctx.descend("llc", payload, llc::decode)
    } else {
        ctx.emit("ETH_type", ether_type);
        ctx.emit("ETH_typestr", ethertype_name(ether_type));
        dispatch_ethertype(ether_type, payload, ctx)
    };

    strip_padding(data.len(), remainder)
}

/// Minimum-size frames are zero padded on the wire; a leftover that starts
/// with a zero byte in such a frame is treated as padding.
fn strip_padding(frame_len: usize, remainder: Remainder<'_>) -> Remainder<'_> {
    if frame_len <= ETHERNET_MIN_FRAME && remainder.bytes().first() == Some(&0) {
        return Remainder::empty();
    }
    remainder
}
