//! params/types.rs
//! Parameter keys, strategies and the ordered option maps handed to contexts.
//!
//! Design notes:
//! - Discriminants are libzstd's own `ZSTD_cParameter` / `ZSTD_dParameter` values,
//!   so raw integer keys from configuration map 1:1 onto the enums.
//! - Option maps keep insertion order; the position of an entry is reported
//!   back in errors.

use std::marker::PhantomData;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use zstd_safe::zstd_sys::{ZSTD_cParameter, ZSTD_dParameter, ZSTD_strategy};

use crate::sys;
use crate::types::{Operation, Result, ZstdError};

/// Compression parameter keys.
#[repr(i32)]
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive, Serialize, Deserialize,
)]
pub enum CParameter {
    CompressionLevel = 100,
    WindowLog = 101,
    HashLog = 102,
    ChainLog = 103,
    SearchLog = 104,
    MinMatch = 105,
    TargetLength = 106,
    Strategy = 107,
    EnableLongDistanceMatching = 160,
    LdmHashLog = 161,
    LdmMinMatch = 162,
    LdmBucketSizeLog = 163,
    LdmHashRateLog = 164,
    ContentSizeFlag = 200,
    ChecksumFlag = 201,
    DictIdFlag = 202,
    NbWorkers = 400,
    JobSize = 401,
    OverlapLog = 402,
}

impl CParameter {
    pub const ALL: [CParameter; 19] = [
        CParameter::CompressionLevel,
        CParameter::WindowLog,
        CParameter::HashLog,
        CParameter::ChainLog,
        CParameter::SearchLog,
        CParameter::MinMatch,
        CParameter::TargetLength,
        CParameter::Strategy,
        CParameter::EnableLongDistanceMatching,
        CParameter::LdmHashLog,
        CParameter::LdmMinMatch,
        CParameter::LdmBucketSizeLog,
        CParameter::LdmHashRateLog,
        CParameter::ContentSizeFlag,
        CParameter::ChecksumFlag,
        CParameter::DictIdFlag,
        CParameter::NbWorkers,
        CParameter::JobSize,
        CParameter::OverlapLog,
    ];

    /// libzstd's spelling of the parameter.
    pub fn name(self) -> &'static str {
        match self {
            CParameter::CompressionLevel => "compressionLevel",
            CParameter::WindowLog => "windowLog",
            CParameter::HashLog => "hashLog",
            CParameter::ChainLog => "chainLog",
            CParameter::SearchLog => "searchLog",
            CParameter::MinMatch => "minMatch",
            CParameter::TargetLength => "targetLength",
            CParameter::Strategy => "strategy",
            CParameter::EnableLongDistanceMatching => "enableLongDistanceMatching",
            CParameter::LdmHashLog => "ldmHashLog",
            CParameter::LdmMinMatch => "ldmMinMatch",
            CParameter::LdmBucketSizeLog => "ldmBucketSizeLog",
            CParameter::LdmHashRateLog => "ldmHashRateLog",
            CParameter::ContentSizeFlag => "contentSizeFlag",
            CParameter::ChecksumFlag => "checksumFlag",
            CParameter::DictIdFlag => "dictIDFlag",
            CParameter::NbWorkers => "nbWorkers",
            CParameter::JobSize => "jobSize",
            CParameter::OverlapLog => "overlapLog",
        }
    }

    /// Inclusive `(lower, upper)` bounds reported by the linked libzstd.
    pub fn bounds(self) -> Result<(i32, i32)> {
        sys::c_param_bounds(self.raw())
            .map_err(|code| ZstdError::codec(Operation::GetCompressionBounds, code))
    }

    fn raw(self) -> ZSTD_cParameter {
        match self {
            CParameter::CompressionLevel => ZSTD_cParameter::ZSTD_c_compressionLevel,
            CParameter::WindowLog => ZSTD_cParameter::ZSTD_c_windowLog,
            CParameter::HashLog => ZSTD_cParameter::ZSTD_c_hashLog,
            CParameter::ChainLog => ZSTD_cParameter::ZSTD_c_chainLog,
            CParameter::SearchLog => ZSTD_cParameter::ZSTD_c_searchLog,
            CParameter::MinMatch => ZSTD_cParameter::ZSTD_c_minMatch,
            CParameter::TargetLength => ZSTD_cParameter::ZSTD_c_targetLength,
            CParameter::Strategy => ZSTD_cParameter::ZSTD_c_strategy,
            CParameter::EnableLongDistanceMatching => {
                ZSTD_cParameter::ZSTD_c_enableLongDistanceMatching
            }
            CParameter::LdmHashLog => ZSTD_cParameter::ZSTD_c_ldmHashLog,
            CParameter::LdmMinMatch => ZSTD_cParameter::ZSTD_c_ldmMinMatch,
            CParameter::LdmBucketSizeLog => ZSTD_cParameter::ZSTD_c_ldmBucketSizeLog,
            CParameter::LdmHashRateLog => ZSTD_cParameter::ZSTD_c_ldmHashRateLog,
            CParameter::ContentSizeFlag => ZSTD_cParameter::ZSTD_c_contentSizeFlag,
            CParameter::ChecksumFlag => ZSTD_cParameter::ZSTD_c_checksumFlag,
            CParameter::DictIdFlag => ZSTD_cParameter::ZSTD_c_dictIDFlag,
            CParameter::NbWorkers => ZSTD_cParameter::ZSTD_c_nbWorkers,
            CParameter::JobSize => ZSTD_cParameter::ZSTD_c_jobSize,
            CParameter::OverlapLog => ZSTD_cParameter::ZSTD_c_overlapLog,
        }
    }

    /// The zstd-safe form of `self = value`, or `None` when `value` has no
    /// representation there (flags other than 0/1, unknown strategies, worker
    /// parameters without the `multithread` feature).
    pub(crate) fn typed(self, value: i32) -> Option<zstd_safe::CParameter> {
        use zstd_safe::CParameter as P;

        fn flag(value: i32) -> Option<bool> {
            match value {
                0 => Some(false),
                1 => Some(true),
                _ => None,
            }
        }
        // Negative values survive the cast; libzstd sees the same bits.
        let unsigned = value as u32;

        Some(match self {
            CParameter::CompressionLevel => P::CompressionLevel(value),
            CParameter::WindowLog => P::WindowLog(unsigned),
            CParameter::HashLog => P::HashLog(unsigned),
            CParameter::ChainLog => P::ChainLog(unsigned),
            CParameter::SearchLog => P::SearchLog(unsigned),
            CParameter::MinMatch => P::MinMatch(unsigned),
            CParameter::TargetLength => P::TargetLength(unsigned),
            CParameter::Strategy => P::Strategy(Strategy::try_from_primitive(value).ok()?.raw()),
            CParameter::EnableLongDistanceMatching => P::EnableLongDistanceMatching(flag(value)?),
            CParameter::LdmHashLog => P::LdmHashLog(unsigned),
            CParameter::LdmMinMatch => P::LdmMinMatch(unsigned),
            CParameter::LdmBucketSizeLog => P::LdmBucketSizeLog(unsigned),
            CParameter::LdmHashRateLog => P::LdmHashRateLog(unsigned),
            CParameter::ContentSizeFlag => P::ContentSizeFlag(flag(value)?),
            CParameter::ChecksumFlag => P::ChecksumFlag(flag(value)?),
            CParameter::DictIdFlag => P::DictIdFlag(flag(value)?),
            #[cfg(feature = "multithread")]
            CParameter::NbWorkers => P::NbWorkers(unsigned),
            #[cfg(feature = "multithread")]
            CParameter::JobSize => P::JobSize(unsigned),
            #[cfg(feature = "multithread")]
            CParameter::OverlapLog => P::OverlapSizeLog(unsigned),
            #[cfg(not(feature = "multithread"))]
            CParameter::NbWorkers | CParameter::JobSize | CParameter::OverlapLog => return None,
        })
    }
}

/// Decompression parameter keys.
#[repr(i32)]
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive, Serialize, Deserialize,
)]
pub enum DParameter {
    WindowLogMax = 100,
}

impl DParameter {
    pub fn name(self) -> &'static str {
        match self {
            DParameter::WindowLogMax => "windowLogMax",
        }
    }

    /// Inclusive `(lower, upper)` bounds reported by the linked libzstd.
    pub fn bounds(self) -> Result<(i32, i32)> {
        sys::d_param_bounds(self.raw())
            .map_err(|code| ZstdError::codec(Operation::GetDecompressionBounds, code))
    }

    fn raw(self) -> ZSTD_dParameter {
        match self {
            DParameter::WindowLogMax => ZSTD_dParameter::ZSTD_d_windowLogMax,
        }
    }

    pub(crate) fn typed(self, value: i32) -> zstd_safe::DParameter {
        match self {
            DParameter::WindowLogMax => zstd_safe::DParameter::WindowLogMax(value as u32),
        }
    }
}

/// Match-finder strategies, fastest to strongest.
#[repr(i32)]
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive, Serialize, Deserialize,
)]
pub enum Strategy {
    Fast = 1,
    Dfast = 2,
    Greedy = 3,
    Lazy = 4,
    Lazy2 = 5,
    Btlazy2 = 6,
    Btopt = 7,
    Btultra = 8,
    Btultra2 = 9,
}

impl Strategy {
    fn raw(self) -> ZSTD_strategy {
        match self {
            Strategy::Fast => ZSTD_strategy::ZSTD_fast,
            Strategy::Dfast => ZSTD_strategy::ZSTD_dfast,
            Strategy::Greedy => ZSTD_strategy::ZSTD_greedy,
            Strategy::Lazy => ZSTD_strategy::ZSTD_lazy,
            Strategy::Lazy2 => ZSTD_strategy::ZSTD_lazy2,
            Strategy::Btlazy2 => ZSTD_strategy::ZSTD_btlazy2,
            Strategy::Btopt => ZSTD_strategy::ZSTD_btopt,
            Strategy::Btultra => ZSTD_strategy::ZSTD_btultra,
            Strategy::Btultra2 => ZSTD_strategy::ZSTD_btultra2,
        }
    }
}

impl From<CParameter> for i64 {
    fn from(param: CParameter) -> i64 {
        i32::from(param) as i64
    }
}

impl From<DParameter> for i64 {
    fn from(param: DParameter) -> i64 {
        i32::from(param) as i64
    }
}

impl From<Strategy> for i64 {
    fn from(strategy: Strategy) -> i64 {
        i32::from(strategy) as i64
    }
}

/// Summary: Ordered `key -> value` parameter map.
/// - Keys and values are stored wide so out-of-range entries loaded from
///   configuration are reported with their position instead of failing to parse.
/// - Setting an existing key replaces its value in place.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamMap<K> {
    entries: Vec<(i64, i64)>,
    #[serde(skip)]
    _key: PhantomData<K>,
}

pub type CompressOptions = ParamMap<CParameter>;
pub type DecompressOptions = ParamMap<DParameter>;

impl<K: Into<i64>> ParamMap<K> {
    pub fn new() -> Self {
        Self { entries: Vec::new(), _key: PhantomData }
    }

    /// Builder form of `set`.
    #[must_use]
    pub fn with(mut self, key: K, value: impl Into<i64>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: K, value: impl Into<i64>) {
        self.set_raw(key.into(), value.into());
    }

    /// Insert an untyped entry; validated only when applied to a context.
    pub fn set_raw(&mut self, key: i64, value: i64) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: K) -> Option<i64> {
        let key = key.into();
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}

impl<K> ParamMap<K> {
    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<i64>> Default for ParamMap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Clone for ParamMap<K> {
    fn clone(&self) -> Self {
        Self { entries: self.entries.clone(), _key: PhantomData }
    }
}

impl<K> std::fmt::Debug for ParamMap<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.entries.iter().map(|(k, v)| (k, v))).finish()
    }
}

impl<K> PartialEq for ParamMap<K> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

/// A plain compression level, or a full compression option map.
#[derive(Clone, Debug, PartialEq)]
pub enum LevelOrOption {
    Level(i32),
    Options(CompressOptions),
}

impl From<i32> for LevelOrOption {
    fn from(level: i32) -> Self {
        LevelOrOption::Level(level)
    }
}

impl From<CompressOptions> for LevelOrOption {
    fn from(options: CompressOptions) -> Self {
        LevelOrOption::Options(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminants_match_libzstd() {
        for param in CParameter::ALL {
            assert_eq!(i32::from(param), param.raw() as i32, "{}", param.name());
        }
        assert_eq!(i32::from(DParameter::WindowLogMax), DParameter::WindowLogMax.raw() as i32);
        assert_eq!(Strategy::Btultra2.raw() as i32, 9);
    }

    #[test]
    fn raw_keys_round_trip_through_enum() {
        assert_eq!(CParameter::try_from_primitive(400).unwrap(), CParameter::NbWorkers);
        assert!(CParameter::try_from_primitive(999).is_err());
        assert!(Strategy::try_from_primitive(0).is_err());
    }

    #[test]
    fn flags_reject_non_boolean_values() {
        assert!(CParameter::ChecksumFlag.typed(1).is_some());
        assert!(CParameter::ChecksumFlag.typed(2).is_none());
        assert!(CParameter::Strategy.typed(10).is_none());
        assert!(CParameter::WindowLog.typed(-1).is_some());
    }

    #[test]
    fn map_keeps_order_and_replaces_in_place() {
        let mut map = CompressOptions::new()
            .with(CParameter::WindowLog, 20)
            .with(CParameter::CompressionLevel, 3);
        map.set(CParameter::WindowLog, 21);
        let entries: Vec<_> = map.iter().collect();
        assert_eq!(entries, vec![(101, 21), (100, 3)]);
        assert_eq!(map.get(CParameter::CompressionLevel), Some(3));
    }
}
