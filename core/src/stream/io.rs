//! stream/io.rs
//! Byte source and sink contracts used by the stream pump.
//!
//! Design notes:
//! - `Ok(None)` means "would block, try again"; the pump spins on it.
//! - Every `std::io::Read` / `std::io::Write` is a source / sink for free.

use std::io::{self, ErrorKind, Read, Write};

use crate::telemetry::PumpCounters;
use crate::types::{Result, ZstdError};

/// Something the pump can pull bytes from.
pub trait ByteSource {
    /// Fill a prefix of `buf`. `Some(0)` marks the end of input; `None`
    /// means no data is available yet.
    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<Option<usize>>;
}

/// Something the pump can push bytes into.
pub trait ByteSink {
    /// Accept a prefix of `buf` and return its length, never more than
    /// `buf.len()`. `None` means the sink cannot take data yet.
    fn write_from(&mut self, buf: &[u8]) -> io::Result<Option<usize>>;
}

impl<R: Read + ?Sized> ByteSource for R {
    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<Option<usize>> {
        loop {
            match self.read(buf) {
                Ok(n) => return Ok(Some(n)),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == ErrorKind::WouldBlock => return Ok(None),
                Err(e) => return Err(e),
            }
        }
    }
}

impl<W: Write + ?Sized> ByteSink for W {
    fn write_from(&mut self, buf: &[u8]) -> io::Result<Option<usize>> {
        loop {
            match self.write(buf) {
                // A writer that accepts nothing will never make progress.
                Ok(0) if !buf.is_empty() => return Err(ErrorKind::WriteZero.into()),
                Ok(n) => return Ok(Some(n)),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == ErrorKind::WouldBlock => return Ok(None),
                Err(e) => return Err(e),
            }
        }
    }
}

/// Read once, retrying while the source would block.
pub(crate) fn read_some<R: ByteSource + ?Sized>(
    source: &mut R,
    buf: &mut [u8],
    counters: &mut PumpCounters,
) -> Result<usize> {
    loop {
        match source.read_into(buf)? {
            None => counters.read_retries += 1,
            Some(n) if n > buf.len() => {
                return Err(ZstdError::Protocol(
                    "input source's read_into method returned wrong value.".into(),
                ))
            }
            Some(n) => {
                counters.add_read(n);
                return Ok(n);
            }
        }
    }
}

/// Hand every byte of `data` to `sink`.
pub(crate) fn write_all(
    sink: &mut dyn ByteSink,
    data: &[u8],
    counters: &mut PumpCounters,
) -> Result<()> {
    let mut pos = 0;
    while pos < data.len() {
        let rest = &data[pos..];
        match sink.write_from(rest)? {
            None => counters.write_retries += 1,
            Some(n) if n > rest.len() => {
                return Err(ZstdError::Protocol(
                    "output sink's write_from method returned wrong value.".into(),
                ))
            }
            Some(n) => {
                counters.writes += 1;
                pos += n;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reports would-block every other call.
    struct Hesitant<'a> {
        data: &'a [u8],
        ready: bool,
    }

    impl Read for Hesitant<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.ready = !self.ready;
            if !self.ready {
                return Err(ErrorKind::WouldBlock.into());
            }
            self.data.read(buf)
        }
    }

    struct Liar;

    impl ByteSink for Liar {
        fn write_from(&mut self, buf: &[u8]) -> io::Result<Option<usize>> {
            Ok(Some(buf.len() + 1))
        }
    }

    #[test]
    fn would_block_reads_are_retried() {
        let mut src = Hesitant { data: b"abc", ready: true };
        let mut counters = PumpCounters::default();
        let mut buf = [0u8; 8];
        assert_eq!(read_some(&mut src, &mut buf, &mut counters).unwrap(), 3);
        assert_eq!(counters.read_retries, 1);
        assert_eq!(counters.bytes_in, 3);
    }

    #[test]
    fn oversized_write_report_is_a_protocol_error() {
        let mut counters = PumpCounters::default();
        let err = write_all(&mut Liar, b"data", &mut counters).unwrap_err();
        assert!(matches!(err, ZstdError::Protocol(_)));
    }

    #[test]
    fn vec_sink_takes_everything() {
        let mut out: Vec<u8> = Vec::new();
        let mut counters = PumpCounters::default();
        write_all(&mut out, b"hello", &mut counters).unwrap();
        assert_eq!(out, b"hello");
        assert_eq!(counters.writes, 1);
    }
}
