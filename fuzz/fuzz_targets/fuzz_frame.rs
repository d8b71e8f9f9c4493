//! Fuzz target for the frame decoding chain.
//!
//! Every decoder must stay inside the frame: no panics, and the leftover
//! is always a suffix of the input.

#![no_main]

use capfield::engine::{DecodeConfig, FrameDecoder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let dissection = FrameDecoder::default().decode(data);
    assert_eq!(
        dissection.leftover_offset + dissection.leftover.len(),
        data.len()
    );
    assert!(data.ends_with(dissection.leftover.bytes()));

    // A shallow depth cap must never panic either
    let shallow = FrameDecoder::with_config(DecodeConfig {
        max_depth: 2,
        ..DecodeConfig::default()
    });
    let _ = shallow.decode(data);
});
