//! dict/types.rs
//! `ZstdDict`: dictionary content plus lazily compiled codec handles.
//!
//! Design notes:
//! - Content is immutable after construction.
//! - Compiled handles are `Arc`s; a context keeps the handle it references alive.
//! - One compression handle per level, one decompression handle in total.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;
use zstd_safe::{CDict, DDict};

use crate::constants::MIN_DICT_LEN;
use crate::types::{Result, ZstdError};

#[derive(Default)]
struct CompiledHandles {
    cdicts: HashMap<i32, Arc<CDict<'static>>>,
    ddict: Option<Arc<DDict<'static>>>,
}

/// Summary: Zstd dictionary shared by any number of compressors and decompressors.
/// - `dict_id` is 0 for raw-content dictionaries.
/// - Safe to share across threads; compilation is serialized on an internal lock.
pub struct ZstdDict {
    content: Vec<u8>,
    dict_id: u32,
    handles: Mutex<CompiledHandles>,
}

impl ZstdDict {
    /// Wrap dictionary content.
    ///
    /// # Errors
    /// - `InvalidArgument` when the content is shorter than 8 bytes.
    /// - `InvalidDictionary` when `is_raw` is false and the content does not
    ///   carry a zstd dictionary header.
    pub fn new(content: impl Into<Vec<u8>>, is_raw: bool) -> Result<Self> {
        let content = content.into();
        if content.len() < MIN_DICT_LEN {
            return Err(ZstdError::InvalidArgument(
                "Zstd dictionary content should at least 8 bytes.".into(),
            ));
        }

        let dict_id = zstd_safe::get_dict_id(&content).map_or(0, |id| id.get());
        if !is_raw && dict_id == 0 {
            return Err(ZstdError::InvalidDictionary(
                "The dict_content argument is not a valid zstd dictionary. The first 4 bytes \
                 of a valid zstd dictionary should be a magic number: b'\\x37\\xA4\\x30\\xEC'.\n\
                 Instructions for loading a raw content dictionary: pass is_raw = true when \
                 constructing ZstdDict."
                    .into(),
            ));
        }

        Ok(Self { content, dict_id, handles: Mutex::new(CompiledHandles::default()) })
    }

    pub fn dict_content(&self) -> &[u8] {
        &self.content
    }

    pub fn dict_id(&self) -> u32 {
        self.dict_id
    }

    /// Levels that already have a compiled compression handle.
    pub fn compiled_levels(&self) -> Vec<i32> {
        let mut levels: Vec<i32> = self.lock().cdicts.keys().copied().collect();
        levels.sort_unstable();
        levels
    }

    fn lock(&self) -> MutexGuard<'_, CompiledHandles> {
        self.handles.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Compression handle for `level`, compiled on first use.
    pub(crate) fn cdict(&self, level: i32) -> Result<Arc<CDict<'static>>> {
        let mut handles = self.lock();
        if let Some(cdict) = handles.cdicts.get(&level) {
            return Ok(Arc::clone(cdict));
        }

        let cdict = CDict::try_create(&self.content, level)
            .map(Arc::new)
            .ok_or(ZstdError::DictionaryCompile("ZSTD_CDict"))?;
        debug!(dict_id = self.dict_id, level, "compiled compression dictionary");
        handles.cdicts.insert(level, Arc::clone(&cdict));
        Ok(cdict)
    }

    /// Decompression handle, compiled on first use.
    pub(crate) fn ddict(&self) -> Result<Arc<DDict<'static>>> {
        let mut handles = self.lock();
        if let Some(ddict) = &handles.ddict {
            return Ok(Arc::clone(ddict));
        }

        let ddict = DDict::try_create(&self.content)
            .map(Arc::new)
            .ok_or(ZstdError::DictionaryCompile("ZSTD_DDict"))?;
        debug!(dict_id = self.dict_id, "compiled decompression dictionary");
        handles.ddict = Some(Arc::clone(&ddict));
        Ok(ddict)
    }
}

impl fmt::Display for ZstdDict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<ZstdDict dict_id={} dict_size={}>", self.dict_id, self.content.len())
    }
}

impl fmt::Debug for ZstdDict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZstdDict")
            .field("dict_id", &self.dict_id)
            .field("dict_size", &self.content.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_is_rejected() {
        let err = ZstdDict::new(vec![0u8; 7], true).unwrap_err();
        assert_eq!(err.to_string(), "Zstd dictionary content should at least 8 bytes.");
    }

    #[test]
    fn headerless_content_needs_raw_flag() {
        let content = b"plain dictionary content without a header".to_vec();
        assert!(matches!(
            ZstdDict::new(content.clone(), false),
            Err(ZstdError::InvalidDictionary(_))
        ));

        let dict = ZstdDict::new(content, true).unwrap();
        assert_eq!(dict.dict_id(), 0);
        assert_eq!(dict.to_string(), "<ZstdDict dict_id=0 dict_size=41>");
    }

    #[test]
    fn handles_are_compiled_once_per_level() {
        let dict = ZstdDict::new(b"raw content used as a prefix dictionary".to_vec(), true).unwrap();
        let a = dict.cdict(3).unwrap();
        let b = dict.cdict(3).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        dict.cdict(5).unwrap();
        assert_eq!(dict.compiled_levels(), vec![3, 5]);

        let d1 = dict.ddict().unwrap();
        let d2 = dict.ddict().unwrap();
        assert!(Arc::ptr_eq(&d1, &d2));
    }
}
