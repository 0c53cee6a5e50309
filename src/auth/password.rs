// Password hashing via bcrypt

use bcrypt::{hash, verify, DEFAULT_COST};

/// Hashes a plaintext password at the default bcrypt cost.
pub fn hash_password(password: &str) -> Result<String, String> {
    hash(password, DEFAULT_COST).map_err(|e| e.to_string())
}

/// Checks a plaintext password against a stored bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, String> {
    verify(password, hash).map_err(|e| e.to_string())
}
