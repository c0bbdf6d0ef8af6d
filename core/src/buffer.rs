//! buffer.rs
//! Growable multi-block output buffer.
//!
//! Design notes:
//! - libzstd writes straight into block memory through `OutBuffer`.
//! - Blocks are sized by `BUFFER_BLOCK_SIZES`; the total never exceeds `max_length`.
//! - Every block except the current one is completely filled.
//! - `finish` hands back the first block without copying when it holds all output.

use tracing::trace;
use zstd_safe::OutBuffer;

use crate::constants::BUFFER_BLOCK_SIZES;
use crate::types::{Result, ZstdError};

pub(crate) fn alloc_block(size: usize) -> Result<Vec<u8>> {
    let mut block = Vec::new();
    block.try_reserve_exact(size).map_err(|_| ZstdError::OutOfMemory)?;
    block.resize(size, 0);
    Ok(block)
}

/// Summary: Output sink for one compress/decompress call.
/// - Created per call, flattened by `finish`, never reused.
#[derive(Debug)]
pub struct BlocksOutputBuffer {
    filled: Vec<Vec<u8>>,
    current: Vec<u8>,
    /// Write cursor inside `current`.
    pos: usize,
    allocated: usize,
    max_length: Option<usize>,
}

impl BlocksOutputBuffer {
    /// Buffer for output of unknown size, optionally capped at `max_length` bytes.
    pub fn with_max_length(max_length: Option<usize>) -> Result<Self> {
        let first = BUFFER_BLOCK_SIZES[0];
        let size = match max_length {
            Some(cap) if cap < first => cap,
            _ => first,
        };
        Ok(Self {
            filled: Vec::new(),
            current: alloc_block(size)?,
            pos: 0,
            allocated: size,
            max_length,
        })
    }

    /// Buffer whose first block holds exactly `size` bytes. Further growth is
    /// unbounded.
    pub fn with_size(size: usize) -> Result<Self> {
        Ok(Self {
            filled: Vec::new(),
            current: alloc_block(size)?,
            pos: 0,
            allocated: size,
            max_length: None,
        })
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.allocated - (self.current.len() - self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn allocated(&self) -> usize {
        self.allocated
    }

    pub fn block_count(&self) -> usize {
        self.filled.len() + 1
    }

    /// The current block has no free space left.
    pub fn is_full(&self) -> bool {
        self.pos == self.current.len()
    }

    /// A cap is set and every byte up to it has been allocated.
    pub fn reached_max_length(&self) -> bool {
        debug_assert!(self.is_full());
        self.max_length == Some(self.allocated)
    }

    /// Append the next block. The current block must be full and, when a cap
    /// is set, `reached_max_length` must be false.
    pub fn grow(&mut self) -> Result<()> {
        debug_assert!(self.is_full(), "output block grown before it was filled");

        let last = BUFFER_BLOCK_SIZES[BUFFER_BLOCK_SIZES.len() - 1];
        let mut size = BUFFER_BLOCK_SIZES
            .get(self.block_count())
            .copied()
            .unwrap_or(last);

        if let Some(cap) = self.max_length {
            let rest = cap.saturating_sub(self.allocated);
            debug_assert!(rest > 0, "output buffer grown past max_length");
            size = size.min(rest);
        }

        let block = alloc_block(size)?;
        let done = std::mem::replace(&mut self.current, block);
        self.filled.push(done);
        self.allocated += size;
        self.pos = 0;

        trace!(blocks = self.block_count(), allocated = self.allocated, "output buffer grown");
        Ok(())
    }

    /// Run `f` against the current block, then record how far it wrote.
    pub(crate) fn with_out_buffer<T>(
        &mut self,
        f: impl FnOnce(&mut OutBuffer<'_, [u8]>) -> T,
    ) -> T {
        let mut out = OutBuffer::around_pos(self.current.as_mut_slice(), self.pos);
        let ret = f(&mut out);
        self.pos = out.pos();
        ret
    }

    /// Flatten into one contiguous buffer.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        // Single full block, or a second block that was never written to.
        if self.filled.is_empty() && self.is_full() {
            return Ok(self.current);
        }
        if self.filled.len() == 1 && self.pos == 0 {
            if let Some(first) = self.filled.pop() {
                return Ok(first);
            }
        }

        let mut out = Vec::new();
        out.try_reserve_exact(self.len()).map_err(|_| ZstdError::OutOfMemory)?;
        for block in &self.filled {
            out.extend_from_slice(block);
        }
        out.extend_from_slice(&self.current[..self.pos]);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Copy as much of `data` as fits into the current block.
    fn write(buf: &mut BlocksOutputBuffer, data: &[u8]) -> usize {
        let n = data.len().min(buf.current.len() - buf.pos);
        buf.current[buf.pos..buf.pos + n].copy_from_slice(&data[..n]);
        buf.pos += n;
        n
    }

    fn fill(buf: &mut BlocksOutputBuffer, byte: u8) {
        let n = buf.current.len() - buf.pos;
        write(buf, &vec![byte; n]);
    }

    #[test]
    fn first_block_follows_table_or_cap() {
        let buf = BlocksOutputBuffer::with_max_length(None).unwrap();
        assert_eq!(buf.allocated(), 32 * 1024);

        let buf = BlocksOutputBuffer::with_max_length(Some(100)).unwrap();
        assert_eq!(buf.allocated(), 100);

        let buf = BlocksOutputBuffer::with_max_length(Some(1 << 20)).unwrap();
        assert_eq!(buf.allocated(), 32 * 1024);
    }

    #[test]
    fn growth_walks_the_table() {
        let mut buf = BlocksOutputBuffer::with_max_length(None).unwrap();
        let mut expected = BUFFER_BLOCK_SIZES[0];
        for step in 1..4 {
            fill(&mut buf, step as u8);
            buf.grow().unwrap();
            expected += BUFFER_BLOCK_SIZES[step];
            assert_eq!(buf.allocated(), expected);
        }
        assert_eq!(buf.block_count(), 4);
    }

    #[test]
    fn growth_is_clamped_to_max_length() {
        let cap = 32 * 1024 + 10;
        let mut buf = BlocksOutputBuffer::with_max_length(Some(cap)).unwrap();
        fill(&mut buf, 1);
        assert!(!buf.reached_max_length());
        buf.grow().unwrap();
        assert_eq!(buf.allocated(), cap);
        fill(&mut buf, 2);
        assert!(buf.reached_max_length());
        assert_eq!(buf.len(), cap);
    }

    #[test]
    fn finish_single_full_block_is_returned_whole() {
        let mut buf = BlocksOutputBuffer::with_size(16).unwrap();
        fill(&mut buf, 7);
        assert_eq!(buf.finish().unwrap(), vec![7u8; 16]);
    }

    #[test]
    fn finish_ignores_untouched_second_block() {
        let mut buf = BlocksOutputBuffer::with_max_length(None).unwrap();
        fill(&mut buf, 3);
        buf.grow().unwrap();
        let out = buf.finish().unwrap();
        assert_eq!(out.len(), 32 * 1024);
        assert!(out.iter().all(|&b| b == 3));
    }

    #[test]
    fn finish_copies_across_block_seams() {
        let mut buf = BlocksOutputBuffer::with_max_length(None).unwrap();
        fill(&mut buf, 1);
        buf.grow().unwrap();
        fill(&mut buf, 2);
        buf.grow().unwrap();
        assert_eq!(write(&mut buf, b"tail"), 4);

        let out = buf.finish().unwrap();
        assert_eq!(out.len(), 32 * 1024 + 64 * 1024 + 4);
        assert!(out[..32 * 1024].iter().all(|&b| b == 1));
        assert!(out[32 * 1024..96 * 1024].iter().all(|&b| b == 2));
        assert_eq!(&out[96 * 1024..], b"tail");
    }

    #[test]
    fn finish_trims_partial_single_block() {
        let mut buf = BlocksOutputBuffer::with_max_length(None).unwrap();
        write(&mut buf, b"hello");
        assert_eq!(buf.finish().unwrap(), b"hello".to_vec());
    }

    #[test]
    fn zero_cap_is_immediately_exhausted() {
        let buf = BlocksOutputBuffer::with_max_length(Some(0)).unwrap();
        assert!(buf.is_full());
        assert!(buf.reached_max_length());
        assert!(buf.finish().unwrap().is_empty());
    }
}
