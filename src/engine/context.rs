use std::borrow::Cow;

use serde::Deserialize;

use super::cursor::Remainder;
use super::record::{FieldRecord, FieldValue};

/// Signature shared by every protocol decoder.
pub type DecodeFn = for<'a> fn(&'a [u8], &mut DecodeContext) -> Remainder<'a>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Maximum number of nested decoder calls for one frame.
    pub max_depth: usize,
    pub max_ipv6_extension_headers: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_depth: 8,
            max_ipv6_extension_headers: 8,
        }
    }
}

/// Per-frame decode state: the record being filled and the current nesting depth.
#[derive(Debug, Default)]
pub struct DecodeContext {
    config: DecodeConfig,
    record: FieldRecord,
    depth: usize,
}

impl DecodeContext {
    pub fn new(config: DecodeConfig) -> Self {
        Self::with_record(config, FieldRecord::new())
    }

    pub fn with_record(config: DecodeConfig, record: FieldRecord) -> Self {
        Self {
            config,
            record,
            depth: 0,
        }
    }

    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn record(&self) -> &FieldRecord {
        &self.record
    }

    pub fn into_record(self) -> FieldRecord {
        self.record
    }

    pub fn emit(&mut self, name: impl Into<Cow<'static, str>>, value: impl Into<FieldValue>) {
        self.record.insert(name, value);
    }

    /// Runs `decoder` one level deeper. Past the depth cap the data is
    /// handed back untouched.
    pub fn descend<'a>(
        &mut self,
        protocol: &'static str,
        data: &'a [u8],
        decoder: DecodeFn,
    ) -> Remainder<'a> {
        if self.depth >= self.config.max_depth {
            tracing::debug!(
                protocol,
                depth = self.depth,
                "decode depth limit reached, not descending"
            );
            return Remainder::whole(data);
        }

        self.depth += 1;
        let remainder = decoder(data, self);
        self.depth -= 1;
        remainder
    }
}
