//! context.rs
//! Owned codec contexts with their parameters and dictionary applied.
//!
//! Design notes:
//! - The context field is declared before the dictionary handle, so it is
//!   dropped while the handle it references is still alive.
//! - Used by the incremental compressor/decompressor and by the stream pump.

use std::sync::Arc;

use tracing::debug;
use zstd_safe::{CCtx, CDict, DCtx, DDict, ResetDirective};

use crate::dict::ZstdDict;
use crate::params::{
    set_c_parameters, set_d_parameters, CompressionSetup, DecompressOptions, LevelOrOption,
};
use crate::types::{Operation, Result, ZstdError};

pub(crate) struct CompressContext {
    pub cctx: CCtx<'static>,
    _cdict: Option<Arc<CDict<'static>>>,
}

impl CompressContext {
    pub fn new(
        level_or_option: Option<&LevelOrOption>,
        dict: Option<&ZstdDict>,
    ) -> Result<(Self, CompressionSetup)> {
        let mut cctx = CCtx::try_create().ok_or(ZstdError::ContextInit("ZSTD_CCtx"))?;

        let setup = match level_or_option {
            Some(level_or_option) => set_c_parameters(&mut cctx, level_or_option)?,
            None => CompressionSetup::default(),
        };

        let cdict = match dict {
            Some(dict) => {
                let cdict = dict.cdict(setup.level)?;
                cctx.ref_cdict(&cdict)
                    .map_err(|code| ZstdError::codec(Operation::LoadCompressionDict, code))?;
                Some(cdict)
            }
            None => None,
        };

        debug!(
            level = setup.level,
            multithreaded = setup.multithreaded,
            dict_id = dict.map(ZstdDict::dict_id),
            "compression context ready"
        );
        Ok((Self { cctx, _cdict: cdict }, setup))
    }

    /// Drop any half-written frame; parameters and dictionary stay.
    pub fn reset_session(&mut self) {
        // Session-only reset cannot fail.
        let _ = self.cctx.reset(ResetDirective::SessionOnly);
    }
}

pub(crate) struct DecompressContext {
    pub dctx: DCtx<'static>,
    _ddict: Option<Arc<DDict<'static>>>,
}

impl DecompressContext {
    pub fn new(dict: Option<&ZstdDict>, option: Option<&DecompressOptions>) -> Result<Self> {
        let mut dctx = DCtx::try_create().ok_or(ZstdError::ContextInit("ZSTD_DCtx"))?;

        if let Some(option) = option {
            set_d_parameters(&mut dctx, option)?;
        }

        let ddict = match dict {
            Some(dict) => {
                let ddict = dict.ddict()?;
                dctx.ref_ddict(&ddict)
                    .map_err(|code| ZstdError::codec(Operation::LoadDecompressionDict, code))?;
                Some(ddict)
            }
            None => None,
        };

        debug!(dict_id = dict.map(ZstdDict::dict_id), "decompression context ready");
        Ok(Self { dctx, _ddict: ddict })
    }

    pub fn reset_session(&mut self) {
        let _ = self.dctx.reset(ResetDirective::SessionOnly);
    }
}
