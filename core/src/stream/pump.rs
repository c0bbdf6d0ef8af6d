//! stream/pump.rs
//! Source-to-sink compression and decompression with fixed scratch buffers.
//!
//! Design notes:
//! - One read, then as many codec cycles as needed to consume it.
//! - Output of every cycle is written fully before the next cycle runs.
//! - The codec context lives on the stack and is released on every exit path.

use tracing::{debug, trace};
use zstd_safe::{InBuffer, OutBuffer};

use crate::buffer::alloc_block;
use crate::compress::EndDirective;
use crate::context::{CompressContext, DecompressContext};
use crate::stream::io::{read_some, write_all, ByteSink, ByteSource};
use crate::stream::types::{CompressParams, DecompressParams, ProgressCallback, PumpConfig};
use crate::telemetry::{PumpCounters, PumpSnapshot, Stage, TelemetryTimer};
use crate::types::{Operation, Result, ZstdError};

fn require_destination(
    output: &Option<&mut dyn ByteSink>,
    callback: &Option<ProgressCallback<'_>>,
) -> Result<()> {
    if output.is_none() && callback.is_none() {
        return Err(ZstdError::Protocol(
            "At least one of output_stream argument and callback argument should be non-None."
                .into(),
        ));
    }
    Ok(())
}

/// Shared tail of every codec cycle: write the output, then report progress.
struct CycleReporter<'o, 'c> {
    output: Option<&'o mut dyn ByteSink>,
    callback: Option<ProgressCallback<'c>>,
    counters: PumpCounters,
    timer: TelemetryTimer,
}

impl CycleReporter<'_, '_> {
    fn deliver(&mut self, fresh_input: &[u8], produced: &[u8]) -> Result<()> {
        self.counters.add_cycle(produced.len());

        if let Some(sink) = self.output.as_deref_mut() {
            let counters = &mut self.counters;
            self.timer.time(Stage::Write, || write_all(sink, produced, counters))?;
        }

        if let Some(callback) = self.callback.as_deref_mut() {
            self.counters.callbacks += 1;
            let (total_in, total_out) = self.counters.totals();
            self.timer
                .time(Stage::Callback, || callback(total_in, total_out, fresh_input, produced));
        }
        Ok(())
    }

    fn read<R: ByteSource + ?Sized>(&mut self, input: &mut R, buf: &mut [u8]) -> Result<usize> {
        let counters = &mut self.counters;
        self.timer.time(Stage::Read, || read_some(input, buf, counters))
    }

    fn finish(mut self) -> PumpSnapshot {
        self.timer.finish();
        PumpSnapshot::from(&self.counters, &self.timer)
    }
}

/// Compress everything `input` yields into one zstd frame.
///
/// Output goes to `output` and/or `callback`; at least one must be given.
/// An input that is empty from the start produces no frame at all.
///
/// # Errors
/// - `InvalidArgument` for zero buffer sizes.
/// - `Protocol` when neither destination is given or a source/sink misreports.
/// - Codec, parameter and I/O errors.
pub fn compress_stream<R: ByteSource + ?Sized>(
    input: &mut R,
    output: Option<&mut dyn ByteSink>,
    params: &CompressParams<'_>,
    config: &PumpConfig,
    callback: Option<ProgressCallback<'_>>,
) -> Result<PumpSnapshot> {
    config.validate()?;
    require_destination(&output, &callback)?;

    let (mut ctx, setup) = CompressContext::new(params.level_or_option, params.dict)?;
    if let Some(size) = params.pledged_input_size {
        ctx.cctx
            .set_pledged_src_size(Some(size))
            .map_err(|code| ZstdError::codec(Operation::Compress, code))?;
    }

    let mut in_block = alloc_block(config.read_size)?;
    let mut out_block = alloc_block(config.write_size)?;
    let mut report = CycleReporter {
        output,
        callback,
        counters: PumpCounters::default(),
        timer: TelemetryTimer::new(),
    };
    debug!(read_size = config.read_size, write_size = config.write_size, "compress_stream started");

    loop {
        let read = report.read(input, &mut in_block)?;
        if read == 0 && report.counters.bytes_in == 0 {
            break;
        }

        let directive = if read == 0 { EndDirective::FlushFrame } else { EndDirective::Continue };
        let block = &in_block[..read];
        let mut src = InBuffer::around(block);
        let mut fresh = block;

        loop {
            let (ret, produced) = report.timer.time(Stage::Codec, || {
                let mut dst = OutBuffer::around(out_block.as_mut_slice());
                let ret = if setup.multithreaded && directive == EndDirective::Continue {
                    loop {
                        let ret = ctx.cctx.compress_stream2(&mut dst, &mut src, directive.raw());
                        if ret.is_err() || dst.pos() == dst.capacity() || src.pos() == read {
                            break ret;
                        }
                    }
                } else {
                    ctx.cctx.compress_stream2(&mut dst, &mut src, directive.raw())
                };
                (ret, dst.pos())
            });
            let ret = ret.map_err(|code| ZstdError::codec(Operation::Compress, code))?;
            trace!(read, produced, remaining = ret, "compress cycle");

            report.deliver(fresh, &out_block[..produced])?;
            fresh = &[];

            let done = match directive {
                EndDirective::Continue => src.pos() == read,
                _ => ret == 0,
            };
            if done {
                break;
            }
        }

        if read == 0 {
            break;
        }
    }

    let snapshot = report.finish();
    debug!(
        total_in = snapshot.total_input,
        total_out = snapshot.total_output,
        "compress_stream finished"
    );
    Ok(snapshot)
}

/// Decompress every zstd frame `input` yields.
///
/// Output goes to `output` and/or `callback`; at least one must be given.
///
/// # Errors
/// - `TruncatedStream` when the input ends inside a frame.
/// - `InvalidArgument` for zero buffer sizes.
/// - `Protocol` when neither destination is given or a source/sink misreports.
/// - Codec, parameter and I/O errors.
pub fn decompress_stream<R: ByteSource + ?Sized>(
    input: &mut R,
    output: Option<&mut dyn ByteSink>,
    params: &DecompressParams<'_>,
    config: &PumpConfig,
    callback: Option<ProgressCallback<'_>>,
) -> Result<PumpSnapshot> {
    config.validate()?;
    require_destination(&output, &callback)?;

    let mut ctx = DecompressContext::new(params.dict, params.option)?;

    let mut in_block = alloc_block(config.read_size)?;
    let mut out_block = alloc_block(config.write_size)?;
    let mut report = CycleReporter {
        output,
        callback,
        counters: PumpCounters::default(),
        timer: TelemetryTimer::new(),
    };
    debug!(
        read_size = config.read_size,
        write_size = config.write_size,
        "decompress_stream started"
    );

    let mut at_frame_edge = true;
    loop {
        let read = report.read(input, &mut in_block)?;

        let block = &in_block[..read];
        let mut src = InBuffer::around(block);
        let mut fresh = block;

        loop {
            if at_frame_edge && src.pos() == read {
                break;
            }

            let (ret, produced) = report.timer.time(Stage::Codec, || {
                let mut dst = OutBuffer::around(out_block.as_mut_slice());
                let ret = ctx.dctx.decompress_stream(&mut dst, &mut src);
                (ret, dst.pos())
            });
            let ret = ret.map_err(|code| ZstdError::codec(Operation::Decompress, code))?;
            at_frame_edge = ret == 0;
            trace!(read, produced, at_frame_edge, "decompress cycle");

            report.deliver(fresh, &out_block[..produced])?;
            fresh = &[];

            // libzstd holds back the last input byte until every decoded
            // byte has been flushed, so consumed input means no pending output.
            if src.pos() == read {
                break;
            }
        }

        if read == 0 {
            if !at_frame_edge {
                let (total_in, total_out) = report.counters.totals();
                return Err(ZstdError::TruncatedStream { total_in, total_out });
            }
            break;
        }
    }

    let snapshot = report.finish();
    debug!(
        total_in = snapshot.total_input,
        total_out = snapshot.total_output,
        "decompress_stream finished"
    );
    Ok(snapshot)
}
