//! telemetry/counters.rs
//! Mutable counters updated by the stream pump.
//!
//! Summary: Byte totals and event counts for one `compress_stream` /
//! `decompress_stream` run. Converted into an immutable `PumpSnapshot` at the end.

use serde::{Deserialize, Serialize};

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PumpCounters {
    /// Bytes read from the source.
    pub bytes_in: u64,
    /// Bytes produced by the codec (and handed to the sink, if any).
    pub bytes_out: u64,
    /// Successful reads, including the final zero-length one.
    pub reads: u64,
    /// Reads that reported would-block.
    pub read_retries: u64,
    /// `write_from` calls that accepted at least one byte.
    pub writes: u64,
    /// `write_from` calls that reported would-block.
    pub write_retries: u64,
    /// Codec invocations.
    pub cycles: u64,
    /// Progress callback invocations.
    pub callbacks: u64,
}

impl PumpCounters {
    pub fn add_read(&mut self, len: usize) {
        self.reads += 1;
        self.bytes_in += len as u64;
    }

    pub fn add_cycle(&mut self, produced: usize) {
        self.cycles += 1;
        self.bytes_out += produced as u64;
    }

    /// `(total_in, total_out)` as reported to callbacks.
    pub fn totals(&self) -> (u64, u64) {
        (self.bytes_in, self.bytes_out)
    }
}
