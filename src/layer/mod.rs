//! Protocol decoders grouped by the layer they sit in.
//!
//! Every decoder has the shape of [`DecodeFn`](crate::engine::DecodeFn):
//! it takes the bytes at the start of its header, appends fields to the
//! context's record and returns the part of the input it did not consume.
//! Input that is too short for a header produces no fields and an empty
//! remainder; that is the only failure signal.

pub mod application;
pub mod datalink;
pub mod network;
pub mod transport;
