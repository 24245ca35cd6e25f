//! Pairing code generation and normalization.
//!
//! Codes are 8 uppercase hex characters. They are short enough to type on a
//! phone keyboard and read off a lobby TV from across the room.

use std::collections::HashSet;

use rand::Rng;

/// Alphabet pairing codes are drawn from.
pub const CODE_ALPHABET: &[u8] = b"0123456789ABCDEF";

/// Number of characters in a pairing code.
pub const CODE_LENGTH: usize = 8;

/// Generate a code that is not a member of `existing`.
///
/// `existing` must contain normalized codes.
pub fn generate(existing: &HashSet<String>) -> String {
    generate_with(&mut rand::rng(), existing)
}

/// Same as [`generate`] but draws from the supplied RNG.
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, existing: &HashSet<String>) -> String {
    generate_unique(rng, |candidate| existing.contains(candidate))
}

/// Draw codes until one is not reported as taken by `is_taken`.
///
/// A collision is a normal (if rare) outcome, not an error.
pub fn generate_unique<R, F>(rng: &mut R, is_taken: F) -> String
where
    R: Rng + ?Sized,
    F: Fn(&str) -> bool,
{
    loop {
        let candidate: String = (0..CODE_LENGTH)
            .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
            .collect();
        if !is_taken(&candidate) {
            return candidate;
        }
        tracing::debug!("Pairing code collision, regenerating");
    }
}

/// Canonical form used for every code comparison: whitespace stripped,
/// ASCII letters uppercased.
pub fn normalize_code(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Whether `code` (already normalized) has the shape of a generated code.
pub fn is_well_formed(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| CODE_ALPHABET.contains(&b))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
