//! Candidate Hashing for Hint Tie-Breaking
//!
//! Provides deterministic, portable integer hashing used to pick one hint
//! candidate out of many. The construction is:
//! 1. Fold a domain salt, every candidate's canonical string, and an
//!    optional caller seed into a 64-bit FNV-1a accumulator.
//! 2. Finalize the fold through a 32-bit mix-and-shift.
//! 3. Index the candidate list with the mixed value.
//!
//! Order of updates is critical for determinism.

/// FNV-1a 64-bit offset basis.
pub const FNV_OFFSET: u64 = 0xCBF29CE484222325;

/// FNV-1a 64-bit prime.
pub const FNV_PRIME: u64 = 0x100000001B3;

/// Deterministic FNV-1a fold over candidate material.
///
/// Wraps the running 64-bit accumulator with helpers for the types the
/// hint generator feeds in. Same update sequence, same fold.
pub struct CandidateFold {
    acc: u64,
}

impl CandidateFold {
    /// Create a new fold with a domain salt.
    ///
    /// The salt separates hint kinds so an anchor pick and a relative pick
    /// over identical candidate strings cannot collide.
    pub fn new(salt: &str) -> Self {
        let mut fold = Self { acc: FNV_OFFSET };
        fold.update_bytes(salt.as_bytes());
        fold
    }

    /// Update with raw bytes.
    #[inline]
    pub fn update_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.acc ^= b as u64;
            self.acc = self.acc.wrapping_mul(FNV_PRIME);
        }
    }

    /// Update with a candidate's canonical string.
    ///
    /// A 0xFF terminator keeps adjacent candidates from gluing together
    /// ("ab","c" vs "a","bc").
    #[inline]
    pub fn update_candidate(&mut self, canonical: &str) {
        self.update_bytes(canonical.as_bytes());
        self.update_bytes(&[0xFF]);
    }

    /// Update with a u64 value (little-endian).
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.update_bytes(&value.to_le_bytes());
    }

    /// Finalize and return the 64-bit fold.
    pub fn finalize(self) -> u64 {
        self.acc
    }
}

/// 32-bit mix-and-shift finalizer.
///
/// Murmur3-style avalanche so nearby folds land on unrelated indices.
#[inline]
pub fn mix32(value: u32) -> u32 {
    let mut h = value;
    h ^= h >> 16;
    h = h.wrapping_mul(0x85EBCA6B);
    h ^= h >> 13;
    h = h.wrapping_mul(0xC2B2AE35);
    h ^= h >> 16;
    h
}

/// Pick an index into a candidate list deterministically.
///
/// Folds `salt`, every canonical candidate string (in order), and the
/// optional caller seed, then mixes down to 32 bits and reduces modulo the
/// list length. Same `(candidates, salt, seed)` always yields the same
/// index; omitting the seed is still deterministic relative to the
/// candidate set itself.
///
/// Returns 0 for an empty list so callers can stay total.
pub fn pick_index(candidates: &[String], salt: &str, seed: Option<u64>) -> usize {
    if candidates.is_empty() {
        return 0;
    }

    let mut fold = CandidateFold::new(salt);
    for candidate in candidates {
        fold.update_candidate(candidate);
    }
    if let Some(seed) = seed {
        fold.update_u64(seed);
    }

    let folded = fold.finalize();
    // Collapse the 64-bit fold before mixing so both halves contribute.
    let mixed = mix32((folded ^ (folded >> 32)) as u32);
    mixed as usize % candidates.len()
}

// =============================================================================
// TESTS
// =============================================================================
