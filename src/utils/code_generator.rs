//! Deterministic short code derivation and validation.
//!
//! Codes are derived from the `(owner, url)` pair, so shortening the same URL
//! twice for the same owner always yields the same code. Derivation is not
//! collision-free; collisions are resolved by the repository and service.

use regex::Regex;
use std::sync::LazyLock;

/// Fixed length of every generated short code.
pub const CODE_LENGTH: usize = 6;

/// Base-62 digits in ascending value order.
const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

static SHORT_CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^[A-Za-z0-9]{{{CODE_LENGTH}}}$")).expect("short code pattern is valid")
});

/// Produces and validates short codes.
///
/// Injected into [`crate::application::services::ShortenerService`] so the
/// derivation can be swapped or mocked in isolation.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Derives the short code for `url` on behalf of `owner_id`.
    fn generate(&self, owner_id: &str, url: &str) -> String;

    /// Returns true if `short` could have been produced by [`Self::generate`].
    ///
    /// Used to reject malformed input before any storage lookup.
    fn validate(&self, short: &str) -> bool;
}

/// FNV-1a (32-bit) over the URL then the owner, encoded as fixed-width base-62.
#[derive(Debug, Clone, Copy, Default)]
pub struct FnvCodeGenerator;

impl FnvCodeGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for FnvCodeGenerator {
    fn generate(&self, owner_id: &str, url: &str) -> String {
        let digest = fnv1a_32(&[url.as_bytes(), owner_id.as_bytes()]);
        encode_base62(digest)
    }

    fn validate(&self, short: &str) -> bool {
        SHORT_CODE_REGEX.is_match(short)
    }
}

fn fnv1a_32(chunks: &[&[u8]]) -> u32 {
    chunks
        .iter()
        .flat_map(|chunk| chunk.iter())
        .fold(FNV_OFFSET_BASIS, |hash, &byte| {
            (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
        })
}

/// Encodes `value` most significant digit first, left-padded with `'0'`.
///
/// 62^6 exceeds `u32::MAX`, so every digest fits in [`CODE_LENGTH`] digits.
fn encode_base62(mut value: u32) -> String {
    let mut digits = [ALPHABET[0]; CODE_LENGTH];

    for slot in digits.iter_mut().rev() {
        *slot = ALPHABET[(value % 62) as usize];
        value /= 62;
    }

    digits.iter().map(|&b| b as char).collect()
}
