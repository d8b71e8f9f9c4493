use serde::Deserialize;

use crate::engine::{ConfigError, DecodeConfig};

pub const DEFAULT_SNAP_LENGTH: usize = 65_535;
pub const METADATA_ONLY_SNAP_LENGTH: usize = 100;
pub const DEFAULT_BUFFER_SIZE: usize = 15 * 1024 * 1024;

/// Settings shared by every capture input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ModuleConfig {
    /// Capture only enough of each frame for the headers.
    pub metadata_only: bool,
    pub snap_length: usize,
    /// Key under which decoded fields are published.
    pub metadata_container: String,
    /// Key under which the leftover payload is published.
    pub data_container: String,
    pub decode: DecodeConfig,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            metadata_only: false,
            snap_length: DEFAULT_SNAP_LENGTH,
            metadata_container: "!impcap".to_owned(),
            data_container: "!data".to_owned(),
            decode: DecodeConfig::default(),
        }
    }
}

impl ModuleConfig {
    pub fn effective_snap_length(&self) -> usize {
        if self.metadata_only {
            METADATA_ONLY_SNAP_LENGTH
        } else {
            self.snap_length
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.effective_snap_length() == 0 {
            return Err(ConfigError::ZeroSnapLength);
        }
        Ok(())
    }
}

/// One capture source: a live interface or an offline pcap file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub interface: Option<String>,
    pub file: Option<String>,
    pub promiscuous: bool,
    /// BPF expression, passed through to the capture backend.
    pub filter: Option<String>,
    pub tag: Option<String>,
    pub ruleset: Option<String>,
    pub no_buffer: bool,
    pub buffer_size: usize,
    /// Milliseconds.
    pub buffer_timeout: u64,
    /// Packets handled per dispatch round.
    pub packet_count: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            interface: None,
            file: None,
            promiscuous: false,
            filter: None,
            tag: None,
            ruleset: None,
            no_buffer: false,
            buffer_size: DEFAULT_BUFFER_SIZE,
            buffer_timeout: 10,
            packet_count: 5,
        }
    }
}

impl InputConfig {
    pub fn from_file(path: impl Into<String>) -> Self {
        Self {
            file: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match (&self.interface, &self.file) {
            (None, None) => return Err(ConfigError::NoInputSource),
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingInputSources),
            _ => {}
        }
        if !self.no_buffer && self.buffer_size == 0 {
            return Err(ConfigError::ZeroBufferSize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_only_forces_small_snap_length() {
        let config = ModuleConfig {
            metadata_only: true,
            ..ModuleConfig::default()
        };
        assert_eq!(config.effective_snap_length(), METADATA_ONLY_SNAP_LENGTH);
        assert_eq!(
            ModuleConfig::default().effective_snap_length(),
            DEFAULT_SNAP_LENGTH
        );
    }

    #[test]
    fn deserializes_partial_module_config() {
        let config: ModuleConfig = serde_json::from_str(
            r#"{"metadata_container": "!pkt", "decode": {"max_depth": 5}}"#,
        )
        .expect("config should parse");
        assert_eq!(config.metadata_container, "!pkt");
        assert_eq!(config.data_container, "!data");
        assert_eq!(config.decode.max_depth, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn input_requires_exactly_one_source() {
        assert_eq!(
            InputConfig::default().validate(),
            Err(ConfigError::NoInputSource)
        );

        let both = InputConfig {
            interface: Some("eth0".to_owned()),
            ..InputConfig::from_file("capture.pcap")
        };
        assert_eq!(both.validate(), Err(ConfigError::ConflictingInputSources));

        let file = InputConfig::from_file("capture.pcap");
        assert!(file.validate().is_ok());
        assert_eq!(file.buffer_size, DEFAULT_BUFFER_SIZE);
        assert_eq!(file.packet_count, 5);
    }

    #[test]
    fn zero_buffer_is_rejected_unless_unbuffered() {
        let mut config = InputConfig::from_file("capture.pcap");
        config.buffer_size = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroBufferSize));
        config.no_buffer = true;
        assert!(config.validate().is_ok());
    }
}
