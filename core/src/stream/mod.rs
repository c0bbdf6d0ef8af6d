//! stream/mod.rs
//! Stream pump: drive a byte source through the codec into a sink and/or callback.
//!
//! Design notes:
//! - Sources and sinks may be non-blocking; would-block results are retried.
//! - Scratch buffers have fixed sizes (`PumpConfig`); nothing grows.
//! - Each run returns a `PumpSnapshot` with totals and stage timings.

pub mod io;
pub mod pump;
pub mod types;

pub use io::{ByteSink, ByteSource};
pub use pump::{compress_stream, decompress_stream};
pub use types::{CompressParams, DecompressParams, ProgressCallback, PumpConfig};
