//! Password hashing.
//!
//! bcrypt is CPU bound, so both hashing and verification run on the blocking
//! pool and surface as plain async results.

use crate::store::PasswordHash;
use async_trait::async_trait;
use rand::{rngs::OsRng, RngCore};
use thiserror::Error;

/// bcrypt work factor used for new hashes.
pub const SALT_ROUNDS: u32 = 10;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to generate salt: {0}")]
    Salt(#[from] rand::Error),
    #[error(transparent)]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("password task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Generate a fresh salt and derive the salted hash of `password`.
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordError>;

    /// Compare `password` against a stored hash.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;
}

#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self { cost: SALT_ROUNDS }
    }
}

impl BcryptHasher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    fn generate_salt() -> Result<[u8; 16], PasswordError> {
        let mut salt = [0u8; 16];
        OsRng.try_fill_bytes(&mut salt)?;
        Ok(salt)
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordError> {
        let password = password.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || -> Result<PasswordHash, PasswordError> {
            let salt = Self::generate_salt()?;
            let parts = bcrypt::hash_with_salt(password.as_bytes(), cost, salt)?;

            Ok(PasswordHash::from_hashed(
                parts.format_for_version(bcrypt::Version::TwoB),
            ))
        })
        .await?
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let password = password.to_owned();
        let hash = hash.to_owned();

        let matches =
            tokio::task::spawn_blocking(move || bcrypt::verify(password.as_bytes(), &hash))
                .await??;

        Ok(matches)
    }
}
