//! compress/richmem.rs
//! One-frame-per-call compressor that sizes its output for the worst case up front.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::warn;

use crate::compress::engine::{compress_all, EndDirective};
use crate::context::CompressContext;
use crate::dict::ZstdDict;
use crate::params::LevelOrOption;
use crate::types::{CodecWarning, Result};

/// Summary: Compressor that trades memory for speed.
/// - Every call emits one complete frame.
/// - Output starts as a single `compress_bound(len)` block, so it never grows.
pub struct RichMemZstdCompressor {
    ctx: Mutex<CompressContext>,
    warnings: Vec<CodecWarning>,
}

impl RichMemZstdCompressor {
    pub fn new(level_or_option: Option<&LevelOrOption>, dict: Option<&ZstdDict>) -> Result<Self> {
        let (ctx, mut setup) = CompressContext::new(level_or_option, dict)?;
        if setup.multithreaded {
            let advisory = CodecWarning::RichMemoryMultithread;
            warn!(%advisory, "rich memory compressor created with worker threads");
            setup.warnings.push(advisory);
        }
        Ok(Self { ctx: Mutex::new(ctx), warnings: setup.warnings })
    }

    fn lock(&self) -> MutexGuard<'_, CompressContext> {
        self.ctx.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Compress `data` into one complete frame.
    pub fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut ctx = self.lock();
        let bound = zstd_safe::compress_bound(data.len());
        compress_all(&mut ctx.cctx, data, EndDirective::FlushFrame, Some(bound)).map_err(|e| {
            ctx.reset_session();
            e
        })
    }

    pub fn warnings(&self) -> &[CodecWarning] {
        &self.warnings
    }
}

impl std::fmt::Debug for RichMemZstdCompressor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RichMemZstdCompressor")
            .field("warnings", &self.warnings)
            .finish_non_exhaustive()
    }
}
