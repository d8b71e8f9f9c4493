pub mod constants;
pub mod context;
pub mod cursor;
pub mod decoder;
pub mod error;
pub mod format;
pub mod pcap;
pub mod record;
pub mod registry;

pub use context::{DecodeConfig, DecodeContext, DecodeFn};
pub use cursor::{Cursor, Remainder};
pub use decoder::{Dissection, FrameDecoder, decode_frame};
pub use error::{CaptureError, ConfigError};
pub use pcap::{PcapFile, PcapRecord, parse_pcap};
pub use record::{FieldRecord, FieldValue};
pub use registry::{DispatchTable, DispatchTables, Dissector};
