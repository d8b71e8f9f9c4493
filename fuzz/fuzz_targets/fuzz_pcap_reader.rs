//! Fuzz target for classic pcap parsing followed by packet annotation.

#![no_main]

use capfield::{CapturedPacket, InputConfig, ModuleConfig, PacketAnnotator, PacketMetadata};
use capfield::engine::parse_pcap;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(pcap) = parse_pcap(data) else {
        return;
    };
    if pcap.ensure_ethernet().is_err() {
        return;
    }

    let input = InputConfig::from_file("fuzz.pcap");
    let Ok(mut annotator) = PacketAnnotator::new(ModuleConfig::default(), &input) else {
        return;
    };
    for record in &pcap.records {
        let metadata = PacketMetadata::from_capture(
            record.timestamp_sec,
            record.timestamp_subsec,
            pcap.nanosecond,
            record.original_len as usize,
        );
        let packet = CapturedPacket::new(record.data.to_vec(), metadata);
        let _ = annotator.annotate(&packet);
    }
});
