//! dict/mod.rs
//! Zstd dictionaries: loading, compiled-handle cache, training.

pub mod train;
pub mod types;

pub use train::{finalize_dict, train_dict};
pub use types::ZstdDict;
