//! sys.rs
//! The few libzstd entry points zstd-safe does not wrap.
//!
//! Only this module may use `unsafe`; everything here is a plain FFI call on
//! caller-owned slices.
#![allow(unsafe_code)]

use std::ffi::c_uint;

use zstd_safe::zstd_sys;
use zstd_safe::ErrorCode;

fn is_error(code: usize) -> bool {
    // SAFETY: pure function on an integer.
    unsafe { zstd_sys::ZSTD_isError(code) != 0 }
}

/// Inclusive `(lower, upper)` bounds of a compression parameter.
pub(crate) fn c_param_bounds(
    param: zstd_sys::ZSTD_cParameter,
) -> Result<(i32, i32), ErrorCode> {
    // SAFETY: takes and returns plain values.
    let bounds = unsafe { zstd_sys::ZSTD_cParam_getBounds(param) };
    if is_error(bounds.error) {
        return Err(bounds.error);
    }
    Ok((bounds.lowerBound, bounds.upperBound))
}

/// Inclusive `(lower, upper)` bounds of a decompression parameter.
pub(crate) fn d_param_bounds(
    param: zstd_sys::ZSTD_dParameter,
) -> Result<(i32, i32), ErrorCode> {
    // SAFETY: takes and returns plain values.
    let bounds = unsafe { zstd_sys::ZSTD_dParam_getBounds(param) };
    if is_error(bounds.error) {
        return Err(bounds.error);
    }
    Ok((bounds.lowerBound, bounds.upperBound))
}

/// ZDICT_finalizeDictionary() into `dst`; returns the dictionary length.
/// `samples` is the concatenation of every sample, `sizes` their lengths.
pub(crate) fn finalize_dictionary(
    dst: &mut [u8],
    content: &[u8],
    samples: &[u8],
    sizes: &[usize],
    level: i32,
) -> Result<usize, ErrorCode> {
    debug_assert_eq!(samples.len(), sizes.iter().sum::<usize>());

    let params = zstd_sys::ZDICT_params_t {
        compressionLevel: level,
        notificationLevel: 0,
        dictID: 0,
    };
    // SAFETY: every pointer/length pair comes from a live slice, `dst` is
    // writable for `dst.len()` bytes and libzstd does not keep any pointer.
    let code = unsafe {
        zstd_sys::ZDICT_finalizeDictionary(
            dst.as_mut_ptr().cast(),
            dst.len(),
            content.as_ptr().cast(),
            content.len(),
            samples.as_ptr().cast(),
            sizes.as_ptr(),
            sizes.len() as c_uint,
            params,
        )
    };
    // SAFETY: pure function on an integer.
    if unsafe { zstd_sys::ZDICT_isError(code) } != 0 {
        return Err(code);
    }
    Ok(code)
}
