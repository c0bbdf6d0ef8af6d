//! compress/mod.rs
//! Incremental and rich-memory compressors.
//!
//! Design notes:
//! - Both compressors own one codec context and drain it into `BlocksOutputBuffer`.
//! - Multithreaded contexts use a dedicated continue loop.

pub mod compressor;
pub mod engine;
pub mod richmem;

pub use compressor::ZstdCompressor;
pub use engine::EndDirective;
pub use richmem::RichMemZstdCompressor;
