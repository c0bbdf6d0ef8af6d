//! Shared fixtures for the integration tests.
#![allow(dead_code)]

const WORDS: &[&str] = &[
    "zstd", "frame", "block", "window", "stream", "dictionary", "level", "entropy", "match",
    "literal", "sequence", "checksum", "header", "offset", "huffman",
];

fn xorshift(state: &mut u32) -> u32 {
    *state ^= *state << 13;
    *state ^= *state >> 17;
    *state ^= *state << 5;
    *state
}

/// Compressible word soup of exactly `len` bytes.
pub fn corpus(len: usize) -> Vec<u8> {
    let mut state = 0x2545_F491;
    let mut out = Vec::with_capacity(len + 16);
    while out.len() < len {
        let r = xorshift(&mut state);
        out.extend_from_slice(WORDS[r as usize % WORDS.len()].as_bytes());
        out.push(if r & 0x100 == 0 { b' ' } else { b'\n' });
    }
    out.truncate(len);
    out
}

/// Incompressible bytes.
pub fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed | 1;
    (0..len).map(|_| xorshift(&mut state) as u8).collect()
}

/// Small JSON-like records sharing a lot of structure, for dictionary training.
pub fn samples(count: usize) -> Vec<Vec<u8>> {
    let mut state = 0x1234_5678;
    (0..count)
        .map(|i| {
            let r = xorshift(&mut state);
            format!(
                "{{\"id\":{},\"user\":\"user_{}\",\"kind\":\"{}\",\"score\":{},\"tags\":[\"{}\",\"{}\"]}}",
                i,
                r % 997,
                WORDS[r as usize % WORDS.len()],
                r % 100,
                WORDS[(r >> 8) as usize % WORDS.len()],
                WORDS[(r >> 16) as usize % WORDS.len()],
            )
            .into_bytes()
        })
        .collect()
}
