use std::fmt;

use super::metadata::PacketMetadata;

/// One captured frame, owned so it can outlive the capture buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPacket {
    pub data: Vec<u8>,
    pub metadata: PacketMetadata,
}

impl CapturedPacket {
    pub fn new(data: Vec<u8>, metadata: PacketMetadata) -> Self {
        Self { data, metadata }
    }

    /// Drops captured bytes beyond `snap_length`. The original wire length
    /// in the metadata is kept.
    pub fn truncate_to(&mut self, snap_length: usize) {
        if self.data.len() > snap_length {
            tracing::trace!(
                captured = self.data.len(),
                snap_length,
                "truncating frame to snap length"
            );
            self.data.truncate(snap_length);
        }
    }
}

impl fmt::Display for CapturedPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut offset = 0;

        while offset < self.data.len() {
            write!(f, "{:04x}   ", offset)?;

            let mut hex_part = String::new();
            let mut ascii_part = String::new();

            for i in 0..16 {
                if offset + i < self.data.len() {
                    let byte = self.data[offset + i];
                    hex_part.push_str(&format!("{:02x} ", byte));

                    ascii_part.push(if (32..=126).contains(&byte) {
                        byte as char
                    } else {
                        '.'
                    });
                } else {
                    hex_part.push_str("   ");
                }
            }

            writeln!(f, "{:<48}  {}", hex_part, ascii_part)?;
            offset += 16;
        }

        Ok(())
    }
}
