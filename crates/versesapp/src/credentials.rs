//! Group password hashing.
//!
//! The digest input is `"{id:simple}:{password.trim()}"`, i.e. the group's id
//! as 32 lowercase hex digits, a colon, and the trimmed password. The SHA-256
//! digest is stored as standard base64. Salting with the id means two groups
//! sharing a password still store different hashes.

use base64::{engine::general_purpose, Engine as _};
use sha2::{Digest, Sha256};
use uuid::Uuid;

pub fn hash_password(group_id: Uuid, password: &str) -> String {
    let input = format!("{}:{}", group_id.simple(), password.trim());
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    general_purpose::STANDARD.encode(hasher.finalize())
}

/// Recomputes the digest for `password` and compares it with `stored`.
/// An empty stored hash never verifies.
pub fn verify_password(group_id: Uuid, password: &str, stored: &str) -> bool {
    if stored.is_empty() || password.trim().is_empty() {
        return false;
    }
    hash_password(group_id, password).as_bytes() == stored.as_bytes()
}
