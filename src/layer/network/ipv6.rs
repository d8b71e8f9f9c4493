//! IPv6 (RFC 8200) and its extension-header chain.
//!
//! The fixed header is followed by a walk over the next-header chain. Each
//! supported extension header has its own sub-decoder that reports the
//! following next-header value and how many bytes it consumed. The walk is
//! bounded by [`DecodeConfig::max_ipv6_extension_headers`] so a crafted
//! chain cannot loop for long.
//!
//! [`DecodeConfig::max_ipv6_extension_headers`]: crate::engine::DecodeConfig

use crate::engine::constants::{ip_proto, ip_protocol_name, ipv6_next};
use crate::engine::format::format_ipv6;
use crate::engine::registry::dispatch_ip_proto;
use crate::engine::{Cursor, DecodeContext, Remainder};
use crate::layer::network::icmp;

pub const HEADER_LEN: usize = 40;
const FRAGMENT_HEADER_LEN: usize = 8;
const ADDRESS_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ipv6Header {
    next_header: u8,
    hop_limit: u8,
    source: [u8; 16],
    destination: [u8; 16],
}

impl Ipv6Header {
    fn read(data: &[u8]) -> Option<Self> {
        let mut cursor = Cursor::new(data);
        // version/traffic class/flow label, payload length
        cursor.advance(6).then_some(())?;
        Some(Self {
            next_header: cursor.read_u8()?,
            hop_limit: cursor.read_u8()?,
            source: cursor.read_array()?,
            destination: cursor.read_array()?,
        })
    }
}

/// Outcome of one extension-header sub-decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step {
    next_header: u8,
    consumed: usize,
}

pub fn decode<'a>(data: &'a [u8], ctx: &mut DecodeContext) -> Remainder<'a> {
    tracing::trace!(len = data.len(), "decoding ipv6");

    let Some(header) = Ipv6Header::read(data) else {
        tracing::debug!(len = data.len(), "ipv6 packet too short");
        return Remainder::empty();
    };

    ctx.emit("net_dst_ip", format_ipv6(header.destination));
    ctx.emit("net_src_ip", format_ipv6(header.source));
    ctx.emit("net_ttl", header.hop_limit);

    let limit = ctx.config().max_ipv6_extension_headers;
    let mut next_header = header.next_header;
    let mut rest = &data[HEADER_LEN..];
    let mut walked = 0;

    loop {
        let step = match next_header {
            ip_proto::TCP | ip_proto::UDP => {
                ctx.emit("IP_proto", next_header);
                return dispatch_ip_proto(next_header, rest, ctx);
            }
            ip_proto::ICMPV6 => {
                ctx.emit("IP_proto", next_header);
                return ctx.descend("icmpv6", rest, icmp::decode);
            }
            ipv6_next::HOP_BY_HOP
            | ipv6_next::DESTINATION_OPTIONS
            | ipv6_next::ROUTING
            | ipv6_next::FRAGMENT
                if walked == limit =>
            {
                tracing::debug!(next_header, limit, "ipv6 extension header limit reached");
                ctx.emit("IP_proto", next_header);
                return Remainder::whole(rest);
            }
            ipv6_next::HOP_BY_HOP | ipv6_next::DESTINATION_OPTIONS => options_header(rest),
            ipv6_next::ROUTING => routing_header(rest, ctx),
            ipv6_next::FRAGMENT => fragment_header(rest, ctx),
            // encapsulated IPv6, RSVP, ESP, AH, no next header and anything unknown
            _ => {
                tracing::trace!(
                    next_header,
                    name = ip_protocol_name(next_header),
                    "ipv6 chain ends"
                );
                ctx.emit("IP_proto", next_header);
                return Remainder::whole(rest);
            }
        };

        let Some(step) = step else {
            tracing::debug!(next_header, len = rest.len(), "ipv6 extension header truncated");
            return Remainder::empty();
        };
        next_header = step.next_header;
        rest = &rest[step.consumed..];
        walked += 1;
    }
}

/// Length in bytes of a header whose length byte counts 8-octet units
/// beyond the first.
fn extension_len(data: &[u8]) -> Option<usize> {
    let units = usize::from(*data.get(1)?);
    let len = units * 8 + 8;
    (len <= data.len()).then_some(len)
}

/// Hop-by-hop and destination options share a layout; options are skipped.
fn options_header(data: &[u8]) -> Option<Step> {
    Some(Step {
        next_header: *data.first()?,
        consumed: extension_len(data)?,
    })
}

fn routing_header(data: &[u8], ctx: &mut DecodeContext) -> Option<Step> {
    let consumed = extension_len(data)?;
    let mut cursor = Cursor::new(data);
    let next_header = cursor.read_u8()?;
    cursor.advance(1).then_some(())?;
    let routing_type = cursor.read_u8()?;
    let segments_left = cursor.read_u8()?;
    // reserved
    cursor.advance(4).then_some(())?;

    if routing_type == 0 {
        ctx.emit("IP6_route_seg_left", segments_left);

        let mut addresses = Cursor::new(&data[cursor.pos()..consumed]);
        let mut index = 1;
        while addresses.remaining() >= ADDRESS_LEN {
            let Some(address) = addresses.read_array::<ADDRESS_LEN>() else {
                break;
            };
            ctx.emit(format!("IP6_route_{index}"), format_ipv6(address));
            index += 1;
        }
    }

    Some(Step {
        next_header,
        consumed,
    })
}

fn fragment_header(data: &[u8], ctx: &mut DecodeContext) -> Option<Step> {
    let mut cursor = Cursor::new(data);
    let next_header = cursor.read_u8()?;
    cursor.advance(1).then_some(())?;
    let offset_flags = cursor.read_u16_be()?;
    let identification = cursor.read_u32_be()?;

    ctx.emit("IP6_frag_offset", (offset_flags & 0xfff8) >> 3);
    ctx.emit("IP6_frag_more", offset_flags & 0x0001 != 0);
    ctx.emit("IP6_frag_id", identification);

    Some(Step {
        next_header,
        consumed: FRAGMENT_HEADER_LEN,
    })
}
