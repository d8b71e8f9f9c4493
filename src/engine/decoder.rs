use super::context::{DecodeConfig, DecodeContext};
use super::cursor::Remainder;
use super::record::FieldRecord;
use crate::layer::datalink::ethernet;

/// Result of running the pipeline over one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dissection<'a> {
    pub record: FieldRecord,
    pub leftover: Remainder<'a>,
    /// Offset of `leftover` within the frame.
    pub leftover_offset: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FrameDecoder {
    pub config: DecodeConfig,
}

impl FrameDecoder {
    pub fn with_config(config: DecodeConfig) -> Self {
        Self { config }
    }

    /// Decodes an Ethernet frame from the link layer up.
    pub fn decode<'a>(&self, frame: &'a [u8]) -> Dissection<'a> {
        self.decode_into(frame, FieldRecord::new())
    }

    /// Like [`FrameDecoder::decode`], appending to fields the caller
    /// already placed in `record`.
    pub fn decode_into<'a>(&self, frame: &'a [u8], record: FieldRecord) -> Dissection<'a> {
        let mut ctx = DecodeContext::with_record(self.config, record);
        let leftover = ctx.descend("ethernet", frame, ethernet::decode);
        let leftover_offset = leftover.offset_in(frame).unwrap_or(frame.len());

        tracing::trace!(
            frame_len = frame.len(),
            fields = ctx.record().len(),
            leftover = leftover.len(),
            "frame decoded"
        );

        Dissection {
            record: ctx.into_record(),
            leftover,
            leftover_offset,
        }
    }
}

/// Decodes `frame` with the default configuration.
pub fn decode_frame(frame: &[u8]) -> Dissection<'_> {
    FrameDecoder::default().decode(frame)
}
