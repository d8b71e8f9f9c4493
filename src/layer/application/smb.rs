//! SMB header summary.
//!
//! The header is located by scanning for `SMB` one byte after the current
//! position, which skips the leading protocol marker (`0xFF` for SMB1,
//! `0xFE` for SMB2/3). Fields are read with the SMB2 little-endian layout.

use crate::engine::{Cursor, DecodeContext, Remainder};

pub const HEADER_LEN: usize = 64;
const SIGNATURE: &[u8; 3] = b"SMB";
const SMB1_MARKER: u8 = 0xff;
const FLAG_LETTERS: &[u8; 4] = b"RPCS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SmbHeader {
    marker: u8,
    nt_status: u32,
    opcode: u16,
    flags: u32,
    sequence: u64,
    process_id: u32,
    tree_id: u32,
    user_id: u64,
}

impl SmbHeader {
    fn read(data: &[u8]) -> Option<Self> {
        let mut cursor = Cursor::new(data);
        let marker = cursor.read_u8()?;
        // signature, structure size, credit charge
        cursor.advance(7).then_some(())?;
        let nt_status = cursor.read_u32_le()?;
        let opcode = cursor.read_u16_le()?;
        // credits
        cursor.advance(2).then_some(())?;
        let flags = cursor.read_u32_le()?;
        // next command
        cursor.advance(4).then_some(())?;
        let sequence = read_split_u64(&mut cursor)?;
        let process_id = cursor.read_u32_le()?;
        let tree_id = cursor.read_u32_le()?;
        let user_id = read_split_u64(&mut cursor)?;
        Some(Self {
            marker,
            nt_status,
            opcode,
            flags,
            sequence,
            process_id,
            tree_id,
            user_id,
        })
    }

    fn version(&self) -> u8 {
        if self.marker == SMB1_MARKER { 1 } else { 2 }
    }
}

/// Two little-endian 32-bit halves, low half first.
fn read_split_u64(cursor: &mut Cursor<'_>) -> Option<u64> {
    let low = cursor.read_u32_le()?;
    let high = cursor.read_u32_le()?;
    Some(u64::from(low) | u64::from(high) << 32)
}

pub fn flag_string(flags: u32) -> String {
    FLAG_LETTERS
        .iter()
        .enumerate()
        .filter(|(bit, _)| flags & (1 << bit) != 0)
        .map(|(_, letter)| char::from(*letter))
        .collect()
}

fn find_header(data: &[u8]) -> Option<&[u8]> {
    let start = data
        .windows(1 + SIGNATURE.len())
        .position(|window| &window[1..] == SIGNATURE)?;
    Some(&data[start..])
}

pub fn decode<'a>(data: &'a [u8], ctx: &mut DecodeContext) -> Remainder<'a> {
    tracing::trace!(len = data.len(), "decoding smb");

    let header = find_header(data)
        .filter(|header| header.len() >= HEADER_LEN)
        .and_then(SmbHeader::read);
    let Some(header) = header else {
        tracing::debug!(len = data.len(), "no complete smb header found");
        return Remainder::empty();
    };

    ctx.emit("SMB_version", header.version());
    ctx.emit("SMB_NTstatus", header.nt_status);
    ctx.emit("SMB_operation", header.opcode);
    ctx.emit("SMB_flags", flag_string(header.flags));
    ctx.emit("SMB_seqNumber", header.sequence);
    ctx.emit("SMB_processID", header.process_id);
    ctx.emit("SMB_treeID", header.tree_id);
    ctx.emit("SMB_userID", header.user_id);

    Remainder::whole(data)
}
