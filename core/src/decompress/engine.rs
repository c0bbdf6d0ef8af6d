//! decompress/engine.rs
//! Decompression state machine shared by the single-frame and endless decompressors.
//!
//! Design notes:
//! - Input libzstd did not consume is kept in `input_buffer[in_begin..in_end]`
//!   and prepended to the next call.
//! - When the output block fills, the loop grows or stops before it checks
//!   whether input remains: libzstd may hold decoded bytes back until it is
//!   given more output space.
//! - Every error goes through `abort`, which leaves a clean state ready for
//!   new input.

use zstd_safe::{DCtx, InBuffer};

use crate::buffer::{alloc_block, BlocksOutputBuffer};
use crate::context::DecompressContext;
use crate::types::{Operation, Result, ZstdError};

/// When a decompressor stops accepting data.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FramePolicy {
    /// Stop at the end of the first frame; later bytes are unused data.
    SingleFrame,
    /// Decode concatenated frames until the input runs out.
    Endless,
}

#[derive(Copy, Clone, Debug)]
struct FrameFlags {
    eof: bool,
    at_frame_edge: bool,
}

pub(crate) struct DecompressState {
    ctx: DecompressContext,
    policy: FramePolicy,
    flags: FrameFlags,
    needs_input: bool,
    input_buffer: Vec<u8>,
    in_begin: usize,
    in_end: usize,
    unused_data: Option<Vec<u8>>,
}

impl DecompressState {
    pub fn new(ctx: DecompressContext, policy: FramePolicy) -> Self {
        Self {
            ctx,
            policy,
            flags: FrameFlags { eof: false, at_frame_edge: true },
            needs_input: true,
            input_buffer: Vec::new(),
            in_begin: 0,
            in_end: 0,
            unused_data: None,
        }
    }

    pub fn eof(&self) -> bool {
        self.flags.eof
    }

    pub fn at_frame_edge(&self) -> bool {
        self.flags.at_frame_edge
    }

    pub fn needs_input(&self) -> bool {
        self.needs_input
    }

    /// Bytes after the end of the first frame; empty until it has ended.
    pub fn unused_data(&mut self) -> Vec<u8> {
        if !self.flags.eof {
            return Vec::new();
        }
        self.unused_data
            .get_or_insert_with(|| self.input_buffer[self.in_begin..self.in_end].to_vec())
            .clone()
    }

    pub fn decompress(&mut self, data: &[u8], max_length: Option<usize>) -> Result<Vec<u8>> {
        if self.policy == FramePolicy::SingleFrame && self.flags.eof {
            return Err(ZstdError::AlreadyAtEof);
        }
        self.decompress_inner(data, max_length).map_err(|e| {
            self.abort();
            e
        })
    }

    fn abort(&mut self) {
        self.in_begin = 0;
        self.in_end = 0;
        self.needs_input = true;
        match self.policy {
            FramePolicy::SingleFrame => self.flags.eof = false,
            FramePolicy::Endless => self.flags.at_frame_edge = true,
        }
        self.ctx.reset_session();
    }

    fn decompress_inner(&mut self, data: &[u8], max_length: Option<usize>) -> Result<Vec<u8>> {
        // A whole frame at a frame edge: size the output from its header.
        let mut known_size = None;
        if self.policy == FramePolicy::Endless
            && self.flags.at_frame_edge
            && max_length.is_none()
            && self.in_begin == self.in_end
        {
            if let Ok(Some(size)) = zstd_safe::get_frame_content_size(data) {
                known_size = usize::try_from(size).ok();
            }
        }

        let use_input_buffer = self.in_begin != self.in_end;
        if use_input_buffer {
            self.append_input(data)?;
        }

        let src: &[u8] =
            if use_input_buffer { &self.input_buffer[self.in_begin..self.in_end] } else { data };
        let mut input = InBuffer::around(src);
        let out = run(
            &mut self.ctx.dctx,
            self.policy,
            &mut self.flags,
            &mut input,
            max_length,
            known_size,
        )?;
        let consumed = input.pos();
        let src_len = src.len();

        if consumed == src_len {
            let hit_limit = max_length == Some(out.len());
            self.needs_input = match self.policy {
                FramePolicy::SingleFrame => !(hit_limit || self.flags.eof),
                FramePolicy::Endless => !(hit_limit && !self.flags.at_frame_edge),
            };
            if use_input_buffer {
                self.in_begin = 0;
                self.in_end = 0;
            }
        } else {
            self.needs_input = false;
            if self.policy == FramePolicy::Endless {
                self.flags.at_frame_edge = false;
            }
            if use_input_buffer {
                self.in_begin += consumed;
            } else {
                self.keep_tail(&data[consumed..])?;
            }
        }
        Ok(out)
    }

    /// Replace the (empty) carry-over window with `tail`.
    fn keep_tail(&mut self, tail: &[u8]) -> Result<()> {
        if self.input_buffer.len() < tail.len() {
            self.input_buffer = alloc_block(tail.len())?;
        }
        self.input_buffer[..tail.len()].copy_from_slice(tail);
        self.in_begin = 0;
        self.in_end = tail.len();
        Ok(())
    }

    /// Append `data` behind the carry-over window, compacting or
    /// reallocating when the free tail is too short.
    fn append_input(&mut self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        let used = self.in_end - self.in_begin;
        let free_tail = self.input_buffer.len() - self.in_end;
        let free_total = self.input_buffer.len() - used;

        if free_total < data.len() {
            let mut grown = alloc_block(used + data.len())?;
            grown[..used].copy_from_slice(&self.input_buffer[self.in_begin..self.in_end]);
            self.input_buffer = grown;
            self.in_begin = 0;
            self.in_end = used;
        } else if free_tail < data.len() {
            self.input_buffer.copy_within(self.in_begin..self.in_end, 0);
            self.in_begin = 0;
            self.in_end = used;
        }

        self.input_buffer[self.in_end..self.in_end + data.len()].copy_from_slice(data);
        self.in_end += data.len();
        Ok(())
    }
}

fn run(
    dctx: &mut DCtx<'_>,
    policy: FramePolicy,
    flags: &mut FrameFlags,
    input: &mut InBuffer<'_>,
    max_length: Option<usize>,
    known_size: Option<usize>,
) -> Result<Vec<u8>> {
    let input_done = |input: &InBuffer<'_>| input.pos() == input.src.len();

    if policy == FramePolicy::Endless && flags.at_frame_edge && input_done(input) {
        return Ok(Vec::new());
    }

    let mut out = match known_size {
        Some(size) => BlocksOutputBuffer::with_size(size)?,
        None => BlocksOutputBuffer::with_max_length(max_length)?,
    };

    loop {
        let ret = out
            .with_out_buffer(|o| dctx.decompress_stream(o, input))
            .map_err(|code| ZstdError::codec(Operation::Decompress, code))?;

        match policy {
            FramePolicy::SingleFrame => {
                if ret == 0 {
                    flags.eof = true;
                    break;
                }
            }
            FramePolicy::Endless => {
                flags.at_frame_edge = ret == 0;
                if flags.at_frame_edge && input_done(input) {
                    break;
                }
            }
        }

        if out.is_full() {
            if out.reached_max_length() {
                break;
            }
            out.grow()?;
        } else if input_done(input) {
            break;
        }
    }

    out.finish()
}
