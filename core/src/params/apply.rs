//! params/apply.rs
//! Push a compression level / option map onto a live codec context.
//!
//! Design notes:
//! - Entries are applied in map order; errors name the 1-based position.
//! - Rejected values are reported against bounds queried from libzstd at
//!   the time of the failure.
//! - Worker parameters are zeroed when libzstd was built without threads.

use std::sync::OnceLock;

use num_enum::TryFromPrimitive;
use tracing::warn;
use zstd_safe::{CCtx, DCtx};

use crate::constants::version_gates;
use crate::params::types::{
    CParameter, CompressOptions, DParameter, DecompressOptions, LevelOrOption,
};
use crate::types::{CodecWarning, Operation, ParamKind, Result, ZstdError};

/// What the compression parameters decided beyond the context itself.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct CompressionSetup {
    /// Level used to compile a dictionary; 0 means libzstd's default.
    pub level: i32,
    pub multithreaded: bool,
    pub warnings: Vec<CodecWarning>,
}

/// libzstd reports nbWorkers bounds of (0, 0) when built without zstdmt.
pub fn multithread_supported() -> bool {
    static SUPPORTED: OnceLock<bool> = OnceLock::new();
    *SUPPORTED.get_or_init(|| matches!(CParameter::NbWorkers.bounds(), Ok(b) if b != (0, 0)))
}

/// Levels below the minimum are clamped here for libzstd builds that
/// reject them instead of clamping.
fn clamp_level(level: i32) -> i32 {
    if zstd_safe::version_number() < version_gates::SELF_CLAMPING_LEVEL {
        level.max(zstd_safe::min_c_level())
    } else {
        level
    }
}

fn to_int32(value: i64, what: &'static str) -> Result<i32> {
    i32::try_from(value).map_err(|_| ZstdError::NotInt32 { what })
}

fn out_of_range(
    kind: ParamKind,
    name: &'static str,
    bounds: Result<(i32, i32)>,
    position: usize,
    value: i32,
) -> ZstdError {
    match bounds {
        Ok((lower, upper)) => ZstdError::ParameterOutOfRange {
            kind,
            name,
            position,
            lower,
            upper,
            value,
        },
        Err(e) => e,
    }
}

pub(crate) fn set_c_parameters(
    cctx: &mut CCtx<'_>,
    level_or_option: &LevelOrOption,
) -> Result<CompressionSetup> {
    let mut setup = CompressionSetup::default();

    let options = match level_or_option {
        LevelOrOption::Level(level) => {
            let level = clamp_level(*level);
            cctx.set_parameter(zstd_safe::CParameter::CompressionLevel(level))
                .map_err(|code| ZstdError::codec(Operation::SetCompressionLevel, code))?;
            setup.level = level;
            return Ok(setup);
        }
        LevelOrOption::Options(options) => options,
    };

    apply_c_options(cctx, options, &mut setup)?;
    Ok(setup)
}

fn apply_c_options(
    cctx: &mut CCtx<'_>,
    options: &CompressOptions,
    setup: &mut CompressionSetup,
) -> Result<()> {
    for (index, (raw_key, raw_value)) in options.iter().enumerate() {
        let position = index + 1;
        let key = to_int32(raw_key, "Key of option dict")?;
        let mut value = to_int32(raw_value, "Value of option dict")?;

        let param = CParameter::try_from_primitive(key)
            .map_err(|_| ZstdError::UnknownParameter { kind: ParamKind::Compression, position })?;

        match param {
            CParameter::CompressionLevel => {
                value = clamp_level(value);
                setup.level = value;
            }
            // One worker behaves like zero but pays for the job machinery.
            CParameter::NbWorkers if value == 1 => value = 0,
            CParameter::NbWorkers if value > 1 => setup.multithreaded = true,
            _ => {}
        }

        let worker_param = matches!(
            param,
            CParameter::NbWorkers | CParameter::JobSize | CParameter::OverlapLog
        );
        if worker_param && !multithread_supported() {
            if value > 0 {
                value = 0;
                if param == CParameter::NbWorkers {
                    setup.multithreaded = false;
                    let advisory = CodecWarning::MultithreadUnsupported;
                    warn!(%advisory, "falling back to single-threaded compression");
                    setup.warnings.push(advisory);
                }
            }
            // 0 is already the single-threaded default.
            if value == 0 {
                continue;
            }
        }

        let rejected =
            || out_of_range(ParamKind::Compression, param.name(), param.bounds(), position, value);
        let typed = param.typed(value).ok_or_else(rejected)?;
        cctx.set_parameter(typed).map_err(|_| rejected())?;
    }
    Ok(())
}

pub(crate) fn set_d_parameters(dctx: &mut DCtx<'_>, options: &DecompressOptions) -> Result<()> {
    for (index, (raw_key, raw_value)) in options.iter().enumerate() {
        let position = index + 1;
        let key = to_int32(raw_key, "Key of option dict")?;
        let value = to_int32(raw_value, "Value of option dict")?;

        let param = DParameter::try_from_primitive(key).map_err(|_| {
            ZstdError::UnknownParameter { kind: ParamKind::Decompression, position }
        })?;

        dctx.set_parameter(param.typed(value)).map_err(|_| {
            out_of_range(ParamKind::Decompression, param.name(), param.bounds(), position, value)
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cctx() -> CCtx<'static> {
        CCtx::try_create().unwrap()
    }

    #[test]
    fn level_is_recorded() {
        let setup = set_c_parameters(&mut cctx(), &LevelOrOption::Level(7)).unwrap();
        assert_eq!(setup.level, 7);
        assert!(!setup.multithreaded);
    }

    #[test]
    fn single_worker_is_not_multithreaded() {
        let opts = CompressOptions::new().with(CParameter::NbWorkers, 1);
        let setup = set_c_parameters(&mut cctx(), &LevelOrOption::Options(opts)).unwrap();
        assert!(!setup.multithreaded);
    }

    #[test]
    fn two_workers_follow_library_support() {
        let opts = CompressOptions::new().with(CParameter::NbWorkers, 2);
        let setup = set_c_parameters(&mut cctx(), &LevelOrOption::Options(opts)).unwrap();
        assert_eq!(setup.multithreaded, multithread_supported());
        assert_eq!(setup.warnings.is_empty(), multithread_supported());
    }

    #[test]
    fn unknown_key_reports_position() {
        let mut opts = CompressOptions::new().with(CParameter::CompressionLevel, 3);
        opts.set_raw(12345, 1);
        let err = set_c_parameters(&mut cctx(), &LevelOrOption::Options(opts)).unwrap_err();
        assert!(matches!(err, ZstdError::UnknownParameter { position: 2, .. }));
        assert_eq!(err.to_string(), "The 2nd zstd compression parameter is invalid.");
    }

    #[test]
    fn oversized_value_is_not_int32() {
        let mut opts = CompressOptions::new();
        opts.set_raw(CParameter::WindowLog.into(), i64::from(i32::MAX) + 1);
        let err = set_c_parameters(&mut cctx(), &LevelOrOption::Options(opts)).unwrap_err();
        assert!(matches!(err, ZstdError::NotInt32 { what: "Value of option dict" }));
    }

    #[test]
    fn window_log_out_of_range_carries_bounds() {
        let opts = CompressOptions::new().with(CParameter::WindowLog, 100);
        let err = set_c_parameters(&mut cctx(), &LevelOrOption::Options(opts)).unwrap_err();
        let (lower, upper) = CParameter::WindowLog.bounds().unwrap();
        match err {
            ZstdError::ParameterOutOfRange { name, position, lower: l, upper: u, value, .. } => {
                assert_eq!(name, "windowLog");
                assert_eq!(position, 1);
                assert_eq!((l, u), (lower, upper));
                assert_eq!(value, 100);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn decompression_window_limit() {
        let mut dctx = DCtx::try_create().unwrap();
        let ok = DecompressOptions::new().with(DParameter::WindowLogMax, 20);
        set_d_parameters(&mut dctx, &ok).unwrap();

        let bad = DecompressOptions::new().with(DParameter::WindowLogMax, 99);
        let err = set_d_parameters(&mut dctx, &bad).unwrap_err();
        assert!(err.to_string().contains("\"windowLogMax\""));
    }
}
