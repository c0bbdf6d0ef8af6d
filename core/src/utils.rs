//! utils.rs
//! Version queries and message formatting helpers.

use serde::{Deserialize, Serialize};

/// Version string of the linked libzstd, e.g. "1.5.7".
pub fn zstd_version() -> &'static str {
    zstd_safe::version_string()
}

/// `(major, minor, release)` of the linked libzstd.
pub fn zstd_version_info() -> (u32, u32, u32) {
    let n = zstd_safe::version_number();
    (n / 10000, (n / 100) % 100, n % 100)
}

/// Default, minimum and maximum compression levels of the linked libzstd.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionLevelValues {
    pub default: i32,
    pub min: i32,
    pub max: i32,
}

#[must_use]
pub fn compression_level_values() -> CompressionLevelValues {
    CompressionLevelValues {
        default: zstd_safe::CLEVEL_DEFAULT,
        min: zstd_safe::min_c_level(),
        max: zstd_safe::max_c_level(),
    }
}

/// 1 -> "1st", 2 -> "2nd", 11 -> "11th", ...
pub fn ordinal(n: &usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// 1234567 -> "1,234,567"
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Tail of the one-shot truncation message.
pub fn truncated_detail(produced: &usize) -> String {
    if *produced == 0 {
        "0 bytes.".to_string()
    } else {
        format!(
            "{} bytes, if want to output these decompressed data, use an \
             EndlessZstdDecompressor object to decompress.",
            group_thousands(*produced as u64)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals() {
        assert_eq!(ordinal(&1), "1st");
        assert_eq!(ordinal(&2), "2nd");
        assert_eq!(ordinal(&3), "3rd");
        assert_eq!(ordinal(&4), "4th");
        assert_eq!(ordinal(&11), "11th");
        assert_eq!(ordinal(&22), "22nd");
    }

    #[test]
    fn thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn version_info_matches_string() {
        let (major, minor, release) = zstd_version_info();
        assert_eq!(zstd_version(), format!("{}.{}.{}", major, minor, release));
    }

    #[test]
    fn level_values_are_ordered() {
        let v = compression_level_values();
        assert!(v.min < 0);
        assert!(v.min <= v.default && v.default <= v.max);
    }
}
