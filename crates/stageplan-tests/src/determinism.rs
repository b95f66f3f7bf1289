//! Determinism helpers.
//!
//! Building a document is pure: the same project and records must produce
//! byte-identical JSON on every run. These helpers run a producer several
//! times and compare BLAKE3 hashes of its output.

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// BLAKE3 hash of the first run.
    pub hash: String,
    /// Index of the first run whose output differed.
    pub first_mismatch: Option<usize>,
}

/// Runs `produce` `runs` times and compares the outputs.
///
/// # Panics
/// Panics if `runs` is zero.
pub fn verify_determinism<F>(produce: F, runs: usize) -> DeterminismResult
where
    F: Fn() -> Vec<u8>,
{
    assert!(runs > 0, "runs must be at least 1");

    let hashes: Vec<String> = (0..runs)
        .map(|_| blake3::hash(&produce()).to_hex().to_string())
        .collect();
    let first_mismatch = hashes.iter().position(|h| *h != hashes[0]);

    DeterminismResult {
        is_deterministic: first_mismatch.is_none(),
        runs,
        hash: hashes[0].clone(),
        first_mismatch,
    }
}

/// Serializes a value to JSON bytes for [`verify_determinism`].
pub fn json_bytes<T: serde::Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).unwrap_or_default()
}
