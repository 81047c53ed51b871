//! Team credential hashing
//!
//! Salted argon2 PHC strings. Verification reads the algorithm parameters
//! from the stored hash, so hashes made with cheaper parameters (tests) still
//! verify with the default hasher.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};

use crate::errors::{Result, SnacError};

/// Hash a password with the default argon2 parameters
///
/// # Errors
///
/// Returns `PasswordHash` if argon2 rejects the input.
pub fn hash_password(password: &str) -> Result<String> {
    hash_password_with(&Argon2::default(), password)
}

/// Hash a password with a caller-provided hasher
///
/// # Errors
///
/// Returns `PasswordHash` if argon2 rejects the input.
pub fn hash_password_with(hasher: &Argon2<'_>, password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    hasher
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| SnacError::PasswordHash {
            reason: e.to_string(),
        })
}

/// Check a password against a stored hash
///
/// A mismatch is `Ok(false)`.
///
/// # Errors
///
/// Returns `PasswordHash` when the stored hash is not a valid PHC string or
/// verification fails for a reason other than a mismatch.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| SnacError::PasswordHash {
        reason: e.to_string(),
    })?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(SnacError::PasswordHash {
            reason: e.to_string(),
        }),
    }
}
