//! System prompt fingerprints and versioned cache keys.
//!
//! Cached answers depend on the system instruction they were produced
//! under. Keys carry a short fingerprint of that instruction, so editing it
//! leaves older entries unreachable until they expire.

use sha2::{Digest, Sha256};

/// Hex digits of the fingerprint kept in a prompt version.
pub const PROMPT_VERSION_LEN: usize = 12;

/// SHA-256 of a prompt string, as lowercase hex.
fn hash_prompt(prompt: &str) -> String {
    Sha256::digest(prompt.as_bytes())
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect()
}

/// Short fingerprint of a system instruction.
pub fn prompt_version(system: &str) -> String {
    let mut version = hash_prompt(system);
    version.truncate(PROMPT_VERSION_LEN);
    version
}

/// Cache key for `prompt` answered under the instruction with `version`.
///
/// The prompt is kept verbatim: keys stay case-sensitive and unnormalized.
pub fn versioned_key(version: &str, prompt: &str) -> String {
    format!("{}:{}", version, prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_sha256_hex() {
        assert_eq!(
            hash_prompt(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_version_tracks_instruction() {
        let v1 = prompt_version("Return JSON");
        assert_eq!(v1.len(), PROMPT_VERSION_LEN);
        assert_eq!(v1, prompt_version("Return JSON"));
        assert_ne!(v1, prompt_version("Return JSON only"));
    }

    #[test]
    fn test_versioned_key_keeps_prompt_exact() {
        let v = prompt_version("Return JSON");
        assert_ne!(versioned_key(&v, "SOL price"), versioned_key(&v, "sol price"));
        assert!(versioned_key(&v, "SOL price").ends_with(":SOL price"));
    }
}
