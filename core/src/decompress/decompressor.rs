//! decompress/decompressor.rs
//! Public decompressors over the shared engine.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::context::DecompressContext;
use crate::decompress::engine::{DecompressState, FramePolicy};
use crate::dict::ZstdDict;
use crate::params::DecompressOptions;
use crate::types::Result;

fn new_state(
    dict: Option<&ZstdDict>,
    option: Option<&DecompressOptions>,
    policy: FramePolicy,
) -> Result<Mutex<DecompressState>> {
    let ctx = DecompressContext::new(dict, option)?;
    Ok(Mutex::new(DecompressState::new(ctx, policy)))
}

fn lock(state: &Mutex<DecompressState>) -> MutexGuard<'_, DecompressState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Summary: Decompresses exactly one zstd frame.
/// - After the frame ends `eof()` is true, further calls fail with
///   `AlreadyAtEof`, and trailing bytes are available from `unused_data()`.
pub struct ZstdDecompressor {
    state: Mutex<DecompressState>,
}

impl ZstdDecompressor {
    pub fn new(dict: Option<&ZstdDict>, option: Option<&DecompressOptions>) -> Result<Self> {
        Ok(Self { state: new_state(dict, option, FramePolicy::SingleFrame)? })
    }

    /// Decompress as much of `data` (plus any held-back input) as possible,
    /// returning at most `max_length` bytes when it is set.
    pub fn decompress(&self, data: &[u8], max_length: Option<usize>) -> Result<Vec<u8>> {
        lock(&self.state).decompress(data, max_length)
    }

    pub fn eof(&self) -> bool {
        lock(&self.state).eof()
    }

    /// False when output is still pending and the next call may pass empty data.
    pub fn needs_input(&self) -> bool {
        lock(&self.state).needs_input()
    }

    pub fn unused_data(&self) -> Vec<u8> {
        lock(&self.state).unused_data()
    }
}

/// Summary: Decompresses any number of concatenated zstd frames.
/// - `at_frame_edge()` tells whether the data seen so far ends on a frame boundary.
pub struct EndlessZstdDecompressor {
    state: Mutex<DecompressState>,
}

impl EndlessZstdDecompressor {
    pub fn new(dict: Option<&ZstdDict>, option: Option<&DecompressOptions>) -> Result<Self> {
        Ok(Self { state: new_state(dict, option, FramePolicy::Endless)? })
    }

    pub fn decompress(&self, data: &[u8], max_length: Option<usize>) -> Result<Vec<u8>> {
        lock(&self.state).decompress(data, max_length)
    }

    pub fn at_frame_edge(&self) -> bool {
        lock(&self.state).at_frame_edge()
    }

    pub fn needs_input(&self) -> bool {
        lock(&self.state).needs_input()
    }
}

impl std::fmt::Debug for ZstdDecompressor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("ZstdDecompressor")
            .field("eof", &state.eof())
            .field("needs_input", &state.needs_input())
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for EndlessZstdDecompressor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("EndlessZstdDecompressor")
            .field("at_frame_edge", &state.at_frame_edge())
            .field("needs_input", &state.needs_input())
            .finish_non_exhaustive()
    }
}
