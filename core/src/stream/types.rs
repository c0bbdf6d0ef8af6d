//! stream/types.rs
//! Pump configuration and per-direction codec parameters.

use serde::{Deserialize, Serialize};

use crate::constants::{
    COMPRESS_READ_SIZE, COMPRESS_WRITE_SIZE, DECOMPRESS_READ_SIZE, DECOMPRESS_WRITE_SIZE,
};
use crate::dict::ZstdDict;
use crate::params::{DecompressOptions, LevelOrOption};
use crate::types::{Result, ZstdError};

/// Progress hook: `(total_in, total_out, input_view, output_view)`.
///
/// `input_view` is the freshly read block on the first call after a read
/// and empty afterwards; `output_view` is what the last codec cycle produced.
pub type ProgressCallback<'a> = &'a mut dyn FnMut(u64, u64, &[u8], &[u8]);

/// Summary: Scratch buffer sizes for the stream pump.
/// - `Default` is the compression geometry; use `PumpConfig::decompress()`
///   for the decompression one.
/// - Missing fields fall back to the defaults when deserialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PumpConfig {
    /// Bytes requested from the source per read.
    pub read_size: usize,
    /// Output scratch size per codec cycle.
    pub write_size: usize,
}

impl PumpConfig {
    pub fn compress() -> Self {
        Self { read_size: COMPRESS_READ_SIZE, write_size: COMPRESS_WRITE_SIZE }
    }

    pub fn decompress() -> Self {
        Self { read_size: DECOMPRESS_READ_SIZE, write_size: DECOMPRESS_WRITE_SIZE }
    }

    #[must_use]
    pub fn with_read_size(mut self, read_size: usize) -> Self {
        self.read_size = read_size;
        self
    }

    #[must_use]
    pub fn with_write_size(mut self, write_size: usize) -> Self {
        self.write_size = write_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.read_size == 0 || self.write_size == 0 {
            return Err(ZstdError::InvalidArgument(
                "read_size argument and write_size argument should be positive numbers.".into(),
            ));
        }
        Ok(())
    }
}

impl Default for PumpConfig {
    fn default() -> Self {
        Self::compress()
    }
}

/// Codec setup for `compress_stream`.
#[derive(Clone, Debug, Default)]
pub struct CompressParams<'a> {
    pub level_or_option: Option<&'a LevelOrOption>,
    pub dict: Option<&'a ZstdDict>,
    /// Total input size, written into the frame header when known.
    pub pledged_input_size: Option<u64>,
}

/// Codec setup for `decompress_stream`.
#[derive(Clone, Debug, Default)]
pub struct DecompressParams<'a> {
    pub dict: Option<&'a ZstdDict>,
    pub option: Option<&'a DecompressOptions>,
}
