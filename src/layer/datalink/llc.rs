//! IEEE 802.2 LLC, including SNAP encapsulation.

use crate::engine::constants::llc_sap;
use crate::engine::registry::dispatch_ethertype;
use crate::engine::{Cursor, DecodeContext, Remainder};
use crate::layer::network::{ipv4, ipx};

pub const MIN_LEN: usize = 3;
const SNAP_LEN: usize = 5;
const CTRL_UI: u16 = 0x03;

pub fn decode<'a>(data: &'a [u8], ctx: &mut DecodeContext) -> Remainder<'a> {
    tracing::trace!(len = data.len(), "decoding llc");

    if data.len() < MIN_LEN {
        tracing::debug!(len = data.len(), "llc header too short");
        return Remainder::empty();
    }

    let (dsap_field, ssap_field) = (data[0], data[1]);
    if dsap_field == llc_sap::RAW_IPX && ssap_field == llc_sap::RAW_IPX {
        // Novell raw 802.3: IPX checksum 0xffff where the SAPs would be.
        return ctx.descend("ipx", data, ipx::decode);
    }

    let (ctrl, header_len) = if data[2] & 0x03 == 0x03 {
        (u16::from(data[2]), 3)
    } else {
        let Some(ctrl) = Cursor::with_pos(data, 2).and_then(|mut c| c.read_u16_be()) else {
            tracing::debug!(len = data.len(), "llc I/S frame control truncated");
            return Remainder::empty();
        };
        (ctrl, 4)
    };

    let dsap = dsap_field & 0xfe;
    let ssap = ssap_field & 0xfe;
    ctx.emit("LLC_dsap", dsap);
    ctx.emit("LLC_ssap", ssap);
    ctx.emit("LLC_ctrl", ctrl);

    let payload = &data[header_len..];
    match (dsap, ssap, ctrl) {
        (llc_sap::SNAP, llc_sap::SNAP, CTRL_UI) => decode_snap(payload, ctx),
        (llc_sap::IPV4, llc_sap::IPV4, CTRL_UI) => ctx.descend("ipv4", payload, ipv4::decode),
        (llc_sap::IPX, llc_sap::IPX, CTRL_UI) => ctx.descend("ipx", payload, ipx::decode),
        _ => Remainder::whole(payload),
    }
}

fn decode_snap<'a>(data: &'a [u8], ctx: &mut DecodeContext) -> Remainder<'a> {
    let mut cursor = Cursor::new(data);
    let (Some(oui), Some(ether_type)) = (cursor.read_array::<3>(), cursor.read_u16_be()) else {
        tracing::debug!(len = data.len(), "snap header truncated");
        return Remainder::empty();
    };

    let [a, b, c] = oui;
    ctx.emit("SNAP_oui", u32::from_be_bytes([0, a, b, c]));
    ctx.emit("SNAP_ethType", ether_type);
    dispatch_ethertype(ether_type, &data[SNAP_LEN..], ctx)
}
