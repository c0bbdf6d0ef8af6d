//! compress/engine.rs
//! Compression loops that drain one call's output into a growable buffer.

use zstd_safe::{CCtx, InBuffer};

use crate::buffer::BlocksOutputBuffer;
use crate::types::{Operation, Result, ZstdError};

/// How far a compression call pushes the frame.
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, num_enum::TryFromPrimitive)]
pub enum EndDirective {
    /// Buffer input; emit only what libzstd has ready.
    Continue = 0,
    /// Close the current block so everything so far is decodable.
    FlushBlock = 1,
    /// Close the frame; the next call starts a new one.
    FlushFrame = 2,
}

impl EndDirective {
    pub(crate) fn raw(self) -> zstd_safe::zstd_sys::ZSTD_EndDirective {
        use zstd_safe::zstd_sys::ZSTD_EndDirective as D;
        match self {
            EndDirective::Continue => D::ZSTD_e_continue,
            EndDirective::FlushBlock => D::ZSTD_e_flush,
            EndDirective::FlushFrame => D::ZSTD_e_end,
        }
    }
}

/// Feed `data` with `directive` until libzstd has nothing left to emit.
/// `size_hint` pre-sizes the first block for the rich-memory path.
pub(crate) fn compress_all(
    cctx: &mut CCtx<'_>,
    data: &[u8],
    directive: EndDirective,
    size_hint: Option<usize>,
) -> Result<Vec<u8>> {
    let mut input = InBuffer::around(data);
    let mut out = match size_hint {
        Some(size) => BlocksOutputBuffer::with_size(size)?,
        None => BlocksOutputBuffer::with_max_length(None)?,
    };

    loop {
        let remaining = out
            .with_out_buffer(|o| cctx.compress_stream2(o, &mut input, directive.raw()))
            .map_err(|code| ZstdError::codec(Operation::Compress, code))?;

        if remaining == 0 {
            return out.finish();
        }
        // libzstd stops short of 0 only when the output block is exhausted.
        if out.is_full() {
            out.grow()?;
        }
    }
}

/// Continue-mode loop for multithreaded contexts: keep calling until the
/// input is consumed, since worker jobs may hold it back between calls.
pub(crate) fn compress_continue_mt(cctx: &mut CCtx<'_>, data: &[u8]) -> Result<Vec<u8>> {
    let mut input = InBuffer::around(data);
    let mut out = BlocksOutputBuffer::with_max_length(None)?;
    let directive = EndDirective::Continue.raw();

    loop {
        out.with_out_buffer(|o| loop {
            let ret = cctx.compress_stream2(o, &mut input, directive);
            if ret.is_err() || o.pos() == o.capacity() || input.pos() == input.src.len() {
                return ret;
            }
        })
        .map_err(|code| ZstdError::codec(Operation::Compress, code))?;

        if input.pos() == data.len() {
            return out.finish();
        }
        if out.is_full() {
            out.grow()?;
        }
    }
}
