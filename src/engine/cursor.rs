#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn with_pos(data: &'a [u8], pos: usize) -> Option<Self> {
        if pos > data.len() {
            return None;
        }
        Some(Self { data, pos })
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn rest(&self) -> &'a [u8] {
        self.data.get(self.pos..).unwrap_or(&[])
    }

    pub fn advance(&mut self, bytes: usize) -> bool {
        if bytes > self.remaining() {
            return false;
        }
        self.pos += bytes;
        true
    }

    pub fn read_u8(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    pub fn read_u16_be(&mut self) -> Option<u16> {
        self.read_array().map(u16::from_be_bytes)
    }

    pub fn read_u16_le(&mut self) -> Option<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    pub fn read_u32_be(&mut self) -> Option<u32> {
        self.read_array().map(u32::from_be_bytes)
    }

    pub fn read_u32_le(&mut self) -> Option<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.read_exact(N)?;
        bytes.try_into().ok()
    }

    pub fn read_exact(&mut self, len: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(len)?;
        let out = self.data.get(self.pos..end)?;
        self.pos = end;
        Some(out)
    }
}

/// Unconsumed tail of a buffer handed back by a decoder.
///
/// A remainder only ever borrows a suffix of the slice the decoder was
/// given, so its length can never exceed the decoder's input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Remainder<'a> {
    bytes: &'a [u8],
}

impl<'a> Remainder<'a> {
    /// Nothing left over: truncated input, padding, or a fully consumed frame.
    pub fn empty() -> Self {
        Self { bytes: &[] }
    }

    /// The decoder did not consume anything it could hand on.
    pub fn whole(data: &'a [u8]) -> Self {
        Self { bytes: data }
    }

    /// Everything after the first `consumed` bytes, or empty when
    /// `consumed` reaches past the end.
    pub fn after(data: &'a [u8], consumed: usize) -> Self {
        Self {
            bytes: data.get(consumed..).unwrap_or(&[]),
        }
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Offset of this remainder inside `origin`, when it is a suffix of it.
    pub fn offset_in(&self, origin: &[u8]) -> Option<usize> {
        let offset = origin.len().checked_sub(self.bytes.len())?;
        let tail = origin.get(offset..)?;
        (tail.as_ptr() == self.bytes.as_ptr() || self.bytes.is_empty()).then_some(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::{Cursor, Remainder};

    #[test]
    fn cursor_reads_mixed_endianness() {
        let data = [0x12, 0x34, 0x78, 0x56, 0x34, 0x12, 0xff];
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.read_u16_be(), Some(0x1234));
        assert_eq!(cursor.read_u32_le(), Some(0x1234_5678));
        assert_eq!(cursor.remaining(), 1);
        assert_eq!(cursor.read_u16_be(), None);
        assert_eq!(cursor.pos(), 6, "failed read must not move the cursor");
        assert_eq!(cursor.read_u8(), Some(0xff));
        assert!(cursor.rest().is_empty());
    }

    #[test]
    fn remainder_after_clamps_to_input() {
        let data = [1u8, 2, 3];
        assert_eq!(Remainder::after(&data, 1).bytes(), &[2, 3]);
        assert!(Remainder::after(&data, 3).is_empty());
        assert!(Remainder::after(&data, 64).is_empty());
    }

    #[test]
    fn remainder_reports_offset_in_origin() {
        let data = [0u8; 10];
        assert_eq!(Remainder::after(&data, 4).offset_in(&data), Some(4));
        assert_eq!(Remainder::whole(&data).offset_in(&data), Some(0));
        assert_eq!(Remainder::empty().offset_in(&data), Some(10));
    }
}
