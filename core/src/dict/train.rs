//! dict/train.rs
//! Dictionary training and finalization from sample corpora.

use tracing::debug;

use crate::constants::version_gates;
use crate::dict::types::ZstdDict;
use crate::sys;
use crate::types::{Operation, Result, ZstdError};
use crate::utils::zstd_version;

/// Concatenate samples into one flat buffer plus the per-sample lengths.
fn flatten_samples<I, S>(samples: I) -> Result<(Vec<u8>, Vec<usize>)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    let mut flat = Vec::new();
    let mut sizes = Vec::new();
    for sample in samples {
        let sample = sample.as_ref();
        flat.try_reserve(sample.len()).map_err(|_| ZstdError::OutOfMemory)?;
        flat.extend_from_slice(sample);
        sizes.push(sample.len());
    }

    if flat.is_empty() {
        return Err(ZstdError::InvalidArgument(
            "The samples are empty content, can't train dictionary.".into(),
        ));
    }
    Ok((flat, sizes))
}

fn check_dict_size(dict_size: usize) -> Result<()> {
    if dict_size == 0 {
        return Err(ZstdError::InvalidArgument(
            "dict_size argument should be positive number.".into(),
        ));
    }
    Ok(())
}

/// Train a dictionary of at most `dict_size` bytes from `samples`.
///
/// # Errors
/// - `InvalidArgument` when all samples are empty or `dict_size` is 0.
/// - `Codec` when libzstd cannot build a dictionary from the samples.
pub fn train_dict<I, S>(samples: I, dict_size: usize) -> Result<ZstdDict>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    let (flat, sizes) = flatten_samples(samples)?;
    check_dict_size(dict_size)?;

    let mut dict = Vec::new();
    dict.try_reserve_exact(dict_size).map_err(|_| ZstdError::OutOfMemory)?;
    zstd_safe::train_from_buffer(&mut dict, &flat, &sizes)
        .map_err(|code| ZstdError::codec(Operation::TrainDictionary, code))?;

    debug!(samples = sizes.len(), dict_size = dict.len(), "trained dictionary");
    ZstdDict::new(dict, false)
}

/// Turn `dict`'s content into a formatted dictionary tuned for `level`,
/// gathering statistics from `samples`.
///
/// # Errors
/// - `Unsupported` when the linked libzstd is older than 1.4.5.
/// - `InvalidArgument` when all samples are empty or `dict_size` is 0.
/// - `Codec` when libzstd rejects the inputs.
pub fn finalize_dict<I, S>(
    dict: &ZstdDict,
    samples: I,
    dict_size: usize,
    level: i32,
) -> Result<ZstdDict>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    if zstd_safe::version_number() < version_gates::FINALIZE_DICTIONARY {
        return Err(ZstdError::Unsupported(format!(
            "This function only available when the underlying zstd library's version is \
             greater than or equal to v1.4.5, the current underlying zstd library's version \
             is v{}.",
            zstd_version()
        )));
    }

    let (flat, sizes) = flatten_samples(samples)?;
    check_dict_size(dict_size)?;

    let mut out = crate::buffer::alloc_block(dict_size)?;
    let written = sys::finalize_dictionary(&mut out, dict.dict_content(), &flat, &sizes, level)
        .map_err(|code| ZstdError::codec(Operation::FinalizeDictionary, code))?;
    out.truncate(written);

    debug!(samples = sizes.len(), dict_size = written, level, "finalized dictionary");
    ZstdDict::new(out, false)
}
