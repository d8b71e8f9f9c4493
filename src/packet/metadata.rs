use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

const MAX_NANOS: u32 = 999_999_999;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketMetadata {
    pub timestamp: DateTime<Utc>,
    /// Length of the frame on the wire, which may exceed the captured bytes.
    pub original_len: usize,
}

impl PacketMetadata {
    pub fn new(timestamp: DateTime<Utc>, original_len: usize) -> Self {
        Self {
            timestamp,
            original_len,
        }
    }

    /// Builds metadata from a capture timestamp split into seconds and a
    /// sub-second part in micro- or nanoseconds.
    pub fn from_capture(sec: u32, subsec: u32, nanosecond: bool, original_len: usize) -> Self {
        let mut nanos = if nanosecond {
            subsec
        } else {
            subsec.saturating_mul(1_000)
        };
        if nanos > MAX_NANOS {
            tracing::debug!(subsec, nanosecond, "sub-second timestamp out of range, clamping");
            nanos = MAX_NANOS;
        }
        let timestamp = Utc
            .timestamp_opt(i64::from(sec), nanos)
            .single()
            .unwrap_or_default();
        Self::new(timestamp, original_len)
    }

    pub fn rfc3339(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}
