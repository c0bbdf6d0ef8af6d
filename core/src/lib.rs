//! zstream-core
//!
//! Streaming zstd compression engine on top of libzstd.
//! One-shot and incremental codecs, endless multi-frame decompression,
//! dictionaries, and a source-to-sink stream pump.

#![deny(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

// Codec building blocks
pub mod buffer;
mod context;
pub mod dict;
pub mod frame;
pub mod params;
mod sys;

// Codecs
mod api;
pub mod compress;
pub mod decompress;

// Stream layer
pub mod stream;
pub mod telemetry;

pub use api::{compress, decompress, richmem_compress};
pub use types::{CodecWarning, Result, ZstdError};

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::api::{compress, decompress, richmem_compress};
    pub use crate::compress::{EndDirective, RichMemZstdCompressor, ZstdCompressor};
    pub use crate::decompress::{EndlessZstdDecompressor, ZstdDecompressor};
    pub use crate::dict::{finalize_dict, train_dict, ZstdDict};
    pub use crate::frame::{get_frame_info, get_frame_size, FrameInfo};
    pub use crate::params::{
        CParameter, CompressOptions, DParameter, DecompressOptions, LevelOrOption, Strategy,
    };
    pub use crate::stream::{
        compress_stream, decompress_stream, ByteSink, ByteSource, CompressParams,
        DecompressParams, PumpConfig,
    };
    pub use crate::telemetry::PumpSnapshot;
    pub use crate::types::{CodecWarning, Result, ZstdError};
    pub use crate::utils::{compression_level_values, zstd_version, zstd_version_info};
}
