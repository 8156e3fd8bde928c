// Lusakey — Credential Hasher
//
// One-way digest of the master password: SHA-256 over the UTF-8 bytes,
// rendered as 64 lowercase hex characters. Unsalted and single-round so that
// existing `master.hash` files keep verifying.
//
// The digest comparison is an ordinary early-exit string compare, not a
// constant-time one. The only caller is a local single-user unlock prompt
// with no remote observer to time it.

use sha2::{Digest, Sha256};

/// Length of a digest in hex characters.
pub const DIGEST_HEX_LEN: usize = 64;

/// Hash a plaintext password into its hex digest.
pub fn hash_password(plaintext: &str) -> String {
    let digest = Sha256::digest(plaintext.as_bytes());
    hex::encode(digest)
}

/// Recompute the digest of `candidate` and compare it with `stored`.
pub fn verify_password(candidate: &str, stored: &str) -> bool {
    hash_password(candidate).eq_ignore_ascii_case(stored.trim())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
