use anyhow::{Context, Result};

/// bcrypt work factor for newly stored passwords.
pub const COST: u32 = 10;

/// Hash a password with a fresh random salt. The cost and salt travel
/// inside the `$2b$...` string.
pub fn hash_password(password: &str) -> Result<String> {
    hash_with_cost(password, COST)
}

fn hash_with_cost(password: &str, cost: u32) -> Result<String> {
    bcrypt::hash(password, cost).context("failed to hash password")
}

/// Check a password against a stored hash. Malformed hashes never match.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}
