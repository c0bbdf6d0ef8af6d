//! types.rs
//! Unified error type and shared enums.
//!
//! Design notes:
//! - Every fallible operation in the crate returns `Result<T>`.
//! - Codec failures carry libzstd's own error name plus the operation attempted.
//! - Messages are stable so callers can log or match on them.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::utils::{ordinal, truncated_detail};

pub type Result<T> = std::result::Result<T, ZstdError>;

/// What the crate was doing when libzstd reported an error code.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Decompress,
    Compress,
    LoadDecompressionDict,
    LoadCompressionDict,
    GetFrameSize,
    GetCompressionBounds,
    GetDecompressionBounds,
    SetCompressionLevel,
    TrainDictionary,
    FinalizeDictionary,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Operation::Decompress => "decompress zstd data",
            Operation::Compress => "compress zstd data",
            Operation::LoadDecompressionDict => "load zstd dictionary for decompression",
            Operation::LoadCompressionDict => "load zstd dictionary for compression",
            Operation::GetFrameSize => "get the size of a zstd frame",
            Operation::GetCompressionBounds => "get zstd compression parameter bounds",
            Operation::GetDecompressionBounds => "get zstd decompression parameter bounds",
            Operation::SetCompressionLevel => "set zstd compression level",
            Operation::TrainDictionary => "train zstd dictionary",
            Operation::FinalizeDictionary => "finalize zstd dictionary",
        };
        f.write_str(msg)
    }
}

/// Compression or decompression side of a parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParamKind {
    Compression,
    Decompression,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Compression => f.write_str("compression"),
            ParamKind::Decompression => f.write_str("decompression"),
        }
    }
}

/// Non-fatal advisories raised while configuring a context.
/// They are logged through `tracing::warn!` and kept on the owning object.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CodecWarning {
    /// nbWorkers > 0 was requested but libzstd was built without threads.
    MultithreadUnsupported,
    /// Rich-memory mode does nothing useful with worker threads.
    RichMemoryMultithread,
}

impl fmt::Display for CodecWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecWarning::MultithreadUnsupported => f.write_str(
                "The underlying zstd library doesn't support multi-threaded compression, \
                 it was built without this feature. Single-threaded compression will be \
                 performed instead.",
            ),
            CodecWarning::RichMemoryMultithread => f.write_str(
                "Currently \"rich memory mode\" has no effect on zstd multi-threaded \
                 compression (nbWorkers > 1), it will allocate unnecessary memory.",
            ),
        }
    }
}

#[derive(Debug, Error)]
pub enum ZstdError {
    /// libzstd returned an error code.
    #[error("Unable to {op}: {name}.")]
    Codec { op: Operation, name: &'static str },

    #[error("Unable to create {0} instance.")]
    ContextInit(&'static str),

    #[error("Failed to get {0} instance from zstd dictionary content.")]
    DictionaryCompile(&'static str),

    #[error("{0}")]
    InvalidDictionary(String),

    #[error("The {} zstd {kind} parameter is invalid.", ordinal(.position))]
    UnknownParameter { kind: ParamKind, position: usize },

    #[error(
        "Error when setting zstd {kind} parameter \"{name}\", it should {lower} <= value <= {upper}, \
         provided value is {value}. (the {} parameter, zstd v{}, {}-bit build)",
        ordinal(.position),
        zstd_safe::version_string(),
        usize::BITS
    )]
    ParameterOutOfRange {
        kind: ParamKind,
        name: &'static str,
        position: usize,
        lower: i32,
        upper: i32,
        value: i32,
    },

    #[error("{what} should be 32-bit signed int value.")]
    NotInt32 { what: &'static str },

    #[error("Unable to allocate output buffer.")]
    OutOfMemory,

    /// One-shot decompression ended inside a frame.
    #[error(
        "Decompression failed: zstd data ends in an incomplete frame, maybe the input data was \
         truncated. Decompressed data is {}",
        truncated_detail(.produced)
    )]
    TruncatedFrame { produced: usize },

    /// `decompress_stream` reached the end of its source inside a frame.
    #[error(
        "Decompression failed: zstd data ends in an incomplete frame, maybe the input data was \
         truncated. Total input {total_in} bytes, total output {total_out} bytes."
    )]
    TruncatedStream { total_in: u64, total_out: u64 },

    #[error("Already at the end of a zstd frame.")]
    AlreadyAtEof,

    /// A source, sink or caller broke the calling contract.
    #[error("{0}")]
    Protocol(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Unsupported(String),

    #[error(
        "Error when getting a zstd frame's decompressed size, make sure that frame_buffer \
         argument starts from the beginning of a frame and its size larger than the frame \
         header (6~18 bytes)."
    )]
    FrameHeader,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ZstdError {
    /// Wrap a libzstd error code.
    pub(crate) fn codec(op: Operation, code: zstd_safe::ErrorCode) -> Self {
        ZstdError::Codec { op, name: zstd_safe::get_error_name(code) }
    }
}
