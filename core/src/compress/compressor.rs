//! compress/compressor.rs
//! Incremental compressor.
//!
//! Design notes:
//! - All state sits behind one mutex; methods take `&self`.
//! - Any codec error resets the session and marks the frame as closed, so
//!   the next call starts a fresh frame.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::compress::engine::{compress_all, compress_continue_mt, EndDirective};
use crate::context::CompressContext;
use crate::dict::ZstdDict;
use crate::params::LevelOrOption;
use crate::types::{CodecWarning, Result, ZstdError};

struct CompressorState {
    ctx: CompressContext,
    last_mode: EndDirective,
}

impl CompressorState {
    fn abort(&mut self) {
        self.ctx.reset_session();
        self.last_mode = EndDirective::FlushFrame;
    }
}

/// Summary: Streaming compressor producing one or more zstd frames.
/// - `compress` with `Continue` may return nothing until enough input is buffered.
/// - `flush` closes the current block or frame.
pub struct ZstdCompressor {
    state: Mutex<CompressorState>,
    multithreaded: bool,
    warnings: Vec<CodecWarning>,
}

impl ZstdCompressor {
    /// # Errors
    /// Context creation, parameter or dictionary failures.
    pub fn new(level_or_option: Option<&LevelOrOption>, dict: Option<&ZstdDict>) -> Result<Self> {
        let (ctx, setup) = CompressContext::new(level_or_option, dict)?;
        Ok(Self {
            state: Mutex::new(CompressorState { ctx, last_mode: EndDirective::FlushFrame }),
            multithreaded: setup.multithreaded,
            warnings: setup.warnings,
        })
    }

    pub fn with_level(level: i32) -> Result<Self> {
        Self::new(Some(&LevelOrOption::Level(level)), None)
    }

    fn lock(&self) -> MutexGuard<'_, CompressorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Feed `data` and return whatever compressed output `mode` makes available.
    pub fn compress(&self, data: &[u8], mode: EndDirective) -> Result<Vec<u8>> {
        let mut state = self.lock();
        let ret = if self.multithreaded && mode == EndDirective::Continue {
            compress_continue_mt(&mut state.ctx.cctx, data)
        } else {
            compress_all(&mut state.ctx.cctx, data, mode, None)
        };

        match ret {
            Ok(out) => {
                state.last_mode = mode;
                Ok(out)
            }
            Err(e) => {
                state.abort();
                Err(e)
            }
        }
    }

    /// Close the current block (`FlushBlock`) or frame (`FlushFrame`).
    ///
    /// # Errors
    /// `InvalidArgument` for `Continue`.
    pub fn flush(&self, mode: EndDirective) -> Result<Vec<u8>> {
        if mode == EndDirective::Continue {
            return Err(ZstdError::InvalidArgument(
                "mode argument wrong value, it should be EndDirective::FlushBlock or \
                 EndDirective::FlushFrame."
                    .into(),
            ));
        }

        let mut state = self.lock();
        match compress_all(&mut state.ctx.cctx, &[], mode, None) {
            Ok(out) => {
                state.last_mode = mode;
                Ok(out)
            }
            Err(e) => {
                state.abort();
                Err(e)
            }
        }
    }

    /// Directive of the last successful call; `FlushFrame` initially and after errors.
    pub fn last_mode(&self) -> EndDirective {
        self.lock().last_mode
    }

    pub fn is_multithreaded(&self) -> bool {
        self.multithreaded
    }

    /// Advisories raised while applying the parameters.
    pub fn warnings(&self) -> &[CodecWarning] {
        &self.warnings
    }
}

impl std::fmt::Debug for ZstdCompressor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZstdCompressor")
            .field("last_mode", &self.last_mode())
            .field("multithreaded", &self.multithreaded)
            .finish_non_exhaustive()
    }
}
