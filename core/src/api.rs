//! api.rs
//! One-shot helpers over the incremental codecs.

use crate::compress::{EndDirective, RichMemZstdCompressor, ZstdCompressor};
use crate::decompress::EndlessZstdDecompressor;
use crate::dict::ZstdDict;
use crate::params::{DecompressOptions, LevelOrOption};
use crate::types::{Result, ZstdError};

/// Compress `data` into one complete frame.
pub fn compress(
    data: &[u8],
    level_or_option: Option<&LevelOrOption>,
    dict: Option<&ZstdDict>,
) -> Result<Vec<u8>> {
    ZstdCompressor::new(level_or_option, dict)?.compress(data, EndDirective::FlushFrame)
}

/// Like `compress`, with the output allocated for the worst case up front.
pub fn richmem_compress(
    data: &[u8],
    level_or_option: Option<&LevelOrOption>,
    dict: Option<&ZstdDict>,
) -> Result<Vec<u8>> {
    RichMemZstdCompressor::new(level_or_option, dict)?.compress(data)
}

/// Decompress one or more concatenated frames.
///
/// # Errors
/// `TruncatedFrame` when `data` ends inside a frame.
pub fn decompress(
    data: &[u8],
    dict: Option<&ZstdDict>,
    option: Option<&DecompressOptions>,
) -> Result<Vec<u8>> {
    let decompressor = EndlessZstdDecompressor::new(dict, option)?;
    let out = decompressor.decompress(data, None)?;
    if !decompressor.at_frame_edge() {
        return Err(ZstdError::TruncatedFrame { produced: out.len() });
    }
    Ok(out)
}
