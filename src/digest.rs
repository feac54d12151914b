//! Digest: djb2-XOR hashing for string and sized keys.
//!
//! Both variants start from 5381 and fold each byte in with
//! `hash = hash * 33 ^ byte`. The sized variant mixes in the byte position
//! in place of any zero byte so keys padded with zeros still spread across
//! buckets; this makes zero bytes position-sensitive while non-zero bytes
//! are not, and callers rely on the exact values.

const SEED: u32 = 5381;

#[inline]
fn mix(hash: u32, v: u32) -> u32 {
    (hash << 5).wrapping_add(hash) ^ v
}

/// Digest of a null-terminated key: consumes bytes up to the first zero.
pub fn str_digest(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .take_while(|&&b| b != 0)
        .fold(SEED, |h, &b| mix(h, b as u32))
}

/// Digest of a sized key: consumes every byte, substituting the index for zeros.
pub fn sized_digest(bytes: &[u8]) -> u32 {
    bytes.iter().enumerate().fold(SEED, |h, (i, &b)| {
        let v = if b != 0 { b as u32 } else { i as u32 };
        mix(h, v)
    })
}

/// How a caller's key bytes are addressed.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum KeyFlavor {
    /// Null-terminated: the key ends at the first zero byte.
    Str,
    /// Explicit length: every byte is part of the key.
    Sized,
}

impl KeyFlavor {
    /// The bytes that make up the key under this flavor.
    #[inline]
    pub fn key_bytes(self, raw: &[u8]) -> &[u8] {
        match self {
            KeyFlavor::Str => match raw.iter().position(|&b| b == 0) {
                Some(end) => &raw[..end],
                None => raw,
            },
            KeyFlavor::Sized => raw,
        }
    }

    /// The digest under this flavor; agrees with `key_bytes` on which bytes count.
    #[inline]
    pub fn digest(self, raw: &[u8]) -> u32 {
        match self {
            KeyFlavor::Str => str_digest(raw),
            KeyFlavor::Sized => sized_digest(raw),
        }
    }
}
