//! constants.rs
//! Stable sizes, growth tables and version gates shared by every layer.

const KB: usize = 1024;
const MB: usize = 1024 * 1024;

/// Output block sizes handed out by `BlocksOutputBuffer::grow`, indexed by
/// the number of blocks already allocated. The last entry repeats once the
/// table is exhausted.
pub const BUFFER_BLOCK_SIZES: &[usize] = &[
    32 * KB,
    64 * KB,
    256 * KB,
    1 * MB,
    4 * MB,
    8 * MB,
    16 * MB,
    16 * MB,
    32 * MB,
    32 * MB,
    32 * MB,
    32 * MB,
    64 * MB,
    64 * MB,
    128 * MB,
    128 * MB,
    256 * MB,
];

/// Pump scratch sizes when compressing.
/// - read: ZSTD_CStreamInSize()
/// - write: ZSTD_CStreamOutSize()
pub const COMPRESS_READ_SIZE: usize = 131_072;
pub const COMPRESS_WRITE_SIZE: usize = 131_591;

/// Pump scratch sizes when decompressing.
/// - read: ZSTD_DStreamInSize()
/// - write: ZSTD_DStreamOutSize()
pub const DECOMPRESS_READ_SIZE: usize = 131_075;
pub const DECOMPRESS_WRITE_SIZE: usize = 131_072;

/// Both formatted and raw-content dictionaries need at least this many bytes.
pub const MIN_DICT_LEN: usize = 8;

/// First four bytes of a formatted zstd dictionary.
pub const DICT_MAGIC: [u8; 4] = [0x37, 0xA4, 0x30, 0xEC];

/// Version gates (ZSTD_versionNumber() encoding: major*10000 + minor*100 + patch).
pub mod version_gates {
    /// libzstd clamps levels below `ZSTD_minCLevel()` itself from v1.4.7 on.
    pub const SELF_CLAMPING_LEVEL: u32 = 10407;
    /// ZDICT_finalizeDictionary() became stable in v1.4.5.
    pub const FINALIZE_DICTIONARY: u32 = 10405;
}
