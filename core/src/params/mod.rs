//! params/mod.rs
//! Compression and decompression parameters.

pub mod apply;
pub mod types;

pub use apply::multithread_supported;
pub(crate) use apply::{set_c_parameters, set_d_parameters, CompressionSetup};
pub use types::{
    CParameter, CompressOptions, DParameter, DecompressOptions, LevelOrOption, ParamMap, Strategy,
};
