//! decompress/mod.rs
//! Single-frame and endless incremental decompressors.
//!
//! Design notes:
//! - One engine, parameterized by `FramePolicy`.
//! - Output can be capped per call with `max_length`; the remainder stays in libzstd.

pub mod decompressor;
pub mod engine;

pub use decompressor::{EndlessZstdDecompressor, ZstdDecompressor};
pub use engine::FramePolicy;
