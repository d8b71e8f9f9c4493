use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use super::config::{InputConfig, ModuleConfig};
use crate::engine::format::hex_upper;
use crate::engine::{ConfigError, FieldRecord, FrameDecoder};
use crate::packet::CapturedPacket;

/// Leftover payload rendered as uppercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataContainer {
    /// Length of `content` in characters, twice the leftover byte count.
    pub length: usize,
    pub content: String,
}

impl DataContainer {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let content = hex_upper(bytes);
        Self {
            length: content.len(),
            content,
        }
    }
}

/// Everything published for one captured frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureMessage {
    pub metadata: FieldRecord,
    pub data: DataContainer,
    pub tag: Option<String>,
    pub ruleset: Option<String>,
}

impl CaptureMessage {
    /// Serializable view that nests the containers under their configured keys.
    pub fn document<'a>(&'a self, config: &'a ModuleConfig) -> MessageDocument<'a> {
        MessageDocument {
            message: self,
            config,
        }
    }

    pub fn to_json(&self, config: &ModuleConfig) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.document(config))
    }

    pub fn to_json_pretty(&self, config: &ModuleConfig) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.document(config))
    }
}

pub struct MessageDocument<'a> {
    message: &'a CaptureMessage,
    config: &'a ModuleConfig,
}

impl Serialize for MessageDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(tag) = &self.message.tag {
            map.serialize_entry("tag", tag)?;
        }
        map.serialize_entry(&self.config.metadata_container, &self.message.metadata)?;
        map.serialize_entry(&self.config.data_container, &self.message.data)?;
        map.end()
    }
}

/// Turns captured frames from one input into messages. Holds the
/// per-input packet counter.
#[derive(Debug)]
pub struct PacketAnnotator {
    config: ModuleConfig,
    tag: Option<String>,
    ruleset: Option<String>,
    decoder: FrameDecoder,
    last_id: u64,
}

impl PacketAnnotator {
    pub fn new(config: ModuleConfig, input: &InputConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        input.validate()?;
        Ok(Self {
            decoder: FrameDecoder::with_config(config.decode),
            tag: input.tag.clone(),
            ruleset: input.ruleset.clone(),
            config,
            last_id: 0,
        })
    }

    pub fn config(&self) -> &ModuleConfig {
        &self.config
    }

    pub fn annotate(&mut self, packet: &CapturedPacket) -> CaptureMessage {
        self.last_id += 1;

        let snap_length = self.config.effective_snap_length();
        let frame = &packet.data[..packet.data.len().min(snap_length)];

        let mut record = FieldRecord::new();
        record.insert("ID", self.last_id);
        record.insert("timestamp", packet.metadata.rfc3339());
        record.insert("net_bytes_total", packet.metadata.original_len);

        let dissection = self.decoder.decode_into(frame, record);
        let mut metadata = dissection.record;
        metadata.insert("net_bytes_data", dissection.leftover.len());

        tracing::debug!(
            id = self.last_id,
            captured = frame.len(),
            fields = metadata.len(),
            leftover = dissection.leftover.len(),
            "packet annotated"
        );

        CaptureMessage {
            metadata,
            data: DataContainer::from_bytes(dissection.leftover.bytes()),
            tag: self.tag.clone(),
            ruleset: self.ruleset.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::PacketMetadata;

    fn udp_frame(payload: &[u8]) -> Vec<u8> {
        let mut frame = vec![
            0x02, 0x00, 0x00, 0x00, 0x00, 0x01, // dst mac
            0x02, 0x00, 0x00, 0x00, 0x00, 0x02, // src mac
            0x08, 0x00, // ipv4
            0x45, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // ver/ihl .. fragment
            0x40, 0x11, 0x00, 0x00, // ttl 64, udp
            192, 0, 2, 1, // src ip
            192, 0, 2, 2, // dst ip
            0x1f, 0x90, 0x1f, 0x91, // ports 8080 -> 8081
            0x00, 0x00, 0x00, 0x00, // length, checksum
        ];
        frame.extend_from_slice(payload);
        frame
    }

    fn annotator(config: ModuleConfig) -> PacketAnnotator {
        let mut input = InputConfig::from_file("capture.pcap");
        input.tag = Some("pcap:".to_owned());
        PacketAnnotator::new(config, &input).expect("config should be valid")
    }

    fn captured(frame: Vec<u8>) -> CapturedPacket {
        let metadata = PacketMetadata::from_capture(1_700_000_000, 5, false, frame.len());
        CapturedPacket::new(frame, metadata)
    }

    #[test]
    fn builds_metadata_and_data_containers() {
        let mut annotator = annotator(ModuleConfig::default());
        let payload = [0x0a, 0xbc, 0x00, 0xff, 0x10, 0x20, 0x30, 0x40, 0x50, 0x60, 0x70, 0x80];

        let message = annotator.annotate(&captured(udp_frame(&payload)));

        let metadata = &message.metadata;
        let names: Vec<_> = metadata.names().collect();
        assert_eq!(&names[..3], ["ID", "timestamp", "net_bytes_total"]);
        assert_eq!(names.last(), Some(&"net_bytes_data"));
        assert_eq!(metadata.get_int("ID"), Some(1));
        assert_eq!(metadata.get_str("timestamp"), Some("2023-11-14T22:13:20.000005Z"));
        assert_eq!(metadata.get_int("net_bytes_total"), Some(54));
        assert_eq!(metadata.get_int("net_src_port"), Some(8080));
        assert_eq!(metadata.get_int("net_bytes_data"), Some(12));
        assert_eq!(message.data.content, "0ABC00FF1020304050607080");
        assert_eq!(message.data.length, 24);
        assert_eq!(message.tag.as_deref(), Some("pcap:"));

        let second = annotator.annotate(&captured(udp_frame(&payload)));
        assert_eq!(second.metadata.get_int("ID"), Some(2));
    }

    #[test]
    fn metadata_only_truncates_before_decoding() {
        let config = ModuleConfig {
            metadata_only: true,
            ..ModuleConfig::default()
        };
        let mut annotator = annotator(config);
        let frame = udp_frame(&[0x11; 200]);

        let message = annotator.annotate(&captured(frame));

        assert_eq!(message.metadata.get_int("net_bytes_total"), Some(242));
        assert_eq!(message.metadata.get_int("net_bytes_data"), Some(100 - 42));
    }

    #[test]
    fn document_nests_containers() {
        let config = ModuleConfig::default();
        let mut annotator = annotator(config.clone());
        let message = annotator.annotate(&captured(udp_frame(&[0xab; 20])));

        let json = serde_json::to_value(message.document(&config)).expect("document should serialize");

        assert_eq!(json["tag"], "pcap:");
        assert_eq!(json["!impcap"]["ETH_typestr"], "IP");
        assert_eq!(json["!impcap"]["net_bytes_data"], 20);
        assert_eq!(json["!data"]["length"], 40);

        let text = message.to_json(&config).expect("message should serialize");
        assert!(text.starts_with(r#"{"tag":"pcap:","!impcap":{"ID":1,"timestamp":"#));
    }

    #[test]
    fn rejects_invalid_input_config() {
        let result = PacketAnnotator::new(ModuleConfig::default(), &InputConfig::default());
        assert!(matches!(result, Err(ConfigError::NoInputSource)));
    }
}
