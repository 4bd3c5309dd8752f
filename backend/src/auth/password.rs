//! Password hashing using Argon2id
//!
//! Hashing and verification are CPU-intensive; the async variants run the
//! work on the blocking thread pool so the runtime stays responsive.

use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a password (blocking)
pub fn hash(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Hash a password on the blocking thread pool
pub async fn hash_async(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || hash(&password))
        .await
        .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
}

/// Verify a password against a stored hash (blocking)
pub fn verify(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Verify a password on the blocking thread pool
pub async fn verify_async(password: String, stored_hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || verify(&password, &stored_hash))
        .await
        .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
}
