use super::error::CaptureError;

pub const LINKTYPE_ETHERNET: u32 = 1;

const GLOBAL_HEADER_LEN: usize = 24;
const RECORD_HEADER_LEN: usize = 16;

#[derive(Debug, Clone)]
pub struct PcapRecord<'a> {
    pub timestamp_sec: u32,
    /// Microseconds, or nanoseconds when the file uses the nanosecond magic.
    pub timestamp_subsec: u32,
    pub original_len: u32,
    pub data: &'a [u8],
}

#[derive(Debug, Clone)]
pub struct PcapFile<'a> {
    pub link_type: u32,
    pub snaplen: u32,
    pub nanosecond: bool,
    pub records: Vec<PcapRecord<'a>>,
}

impl PcapFile<'_> {
    pub fn ensure_ethernet(&self) -> Result<(), CaptureError> {
        if self.link_type != LINKTYPE_ETHERNET {
            return Err(CaptureError::UnsupportedLinkType(self.link_type));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct GlobalHeader {
    little_endian: bool,
    nanosecond: bool,
    snaplen: u32,
    link_type: u32,
}

pub fn parse_pcap(input: &[u8]) -> Result<PcapFile<'_>, CaptureError> {
    let header = parse_global_header(input)?;
    let le = header.little_endian;
    let mut offset = GLOBAL_HEADER_LEN;
    let mut records = Vec::new();

    while offset + RECORD_HEADER_LEN <= input.len() {
        let field = |at: usize| {
            read_u32(input, offset + at, le).ok_or(CaptureError::TruncatedRecord {
                offset,
                claimed: RECORD_HEADER_LEN,
                available: input.len() - offset,
            })
        };
        let ts_sec = field(0)?;
        let ts_subsec = field(4)?;
        let incl_len = field(8)? as usize;
        let orig_len = field(12)?;
        let record_start = offset + RECORD_HEADER_LEN;

        let Some(data) = record_start
            .checked_add(incl_len)
            .and_then(|end| input.get(record_start..end))
        else {
            return Err(CaptureError::TruncatedRecord {
                offset,
                claimed: incl_len,
                available: input.len() - record_start,
            });
        };

        records.push(PcapRecord {
            timestamp_sec: ts_sec,
            timestamp_subsec: ts_subsec,
            original_len: orig_len,
            data,
        });
        offset = record_start + incl_len;
    }

    if offset != input.len() {
        tracing::warn!(
            trailing = input.len() - offset,
            "ignoring trailing bytes after last pcap record"
        );
    }

    Ok(PcapFile {
        link_type: header.link_type,
        snaplen: header.snaplen,
        nanosecond: header.nanosecond,
        records,
    })
}

fn parse_global_header(input: &[u8]) -> Result<GlobalHeader, CaptureError> {
    if input.len() < GLOBAL_HEADER_LEN {
        return Err(truncated_header(input));
    }

    let magic = [input[0], input[1], input[2], input[3]];
    let (little_endian, nanosecond) = match magic {
        [0xd4, 0xc3, 0xb2, 0xa1] => (true, false),
        [0x4d, 0x3c, 0xb2, 0xa1] => (true, true),
        [0xa1, 0xb2, 0xc3, 0xd4] => (false, false),
        [0xa1, 0xb2, 0x3c, 0x4d] => (false, true),
        _ => return Err(CaptureError::BadMagic(magic)),
    };

    Ok(GlobalHeader {
        little_endian,
        nanosecond,
        snaplen: read_u32(input, 16, little_endian).ok_or_else(|| truncated_header(input))?,
        link_type: read_u32(input, 20, little_endian).ok_or_else(|| truncated_header(input))?,
    })
}

fn truncated_header(input: &[u8]) -> CaptureError {
    CaptureError::TruncatedHeader {
        available: input.len(),
    }
}

fn read_u32(input: &[u8], offset: usize, little_endian: bool) -> Option<u32> {
    let end = offset.checked_add(4)?;
    let bytes: [u8; 4] = input.get(offset..end)?.try_into().ok()?;

    Some(if little_endian {
        u32::from_le_bytes(bytes)
    } else {
        u32::from_be_bytes(bytes)
    })
}

#[cfg(test)]
pub(crate) fn build_pcap(link_type: u32, frames: &[&[u8]]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&[0xd4, 0xc3, 0xb2, 0xa1]); // magic, little endian, usec
    out.extend_from_slice(&2u16.to_le_bytes()); // version major
    out.extend_from_slice(&4u16.to_le_bytes()); // version minor
    out.extend_from_slice(&0i32.to_le_bytes()); // thiszone
    out.extend_from_slice(&0u32.to_le_bytes()); // sigfigs
    out.extend_from_slice(&65_535u32.to_le_bytes()); // snaplen
    out.extend_from_slice(&link_type.to_le_bytes());

    for (idx, frame) in frames.iter().enumerate() {
        out.extend_from_slice(&(1_700_000_000u32 + idx as u32).to_le_bytes());
        out.extend_from_slice(&250_000u32.to_le_bytes());
        out.extend_from_slice(&(frame.len() as u32).to_le_bytes());
        out.extend_from_slice(&(frame.len() as u32 + 4).to_le_bytes());
        out.extend_from_slice(frame);
    }
    out
}
