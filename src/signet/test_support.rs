//! Test doubles shared by the handler and router tests.

use crate::{
    signet::password::{PasswordError, PasswordHasher},
    store::{MemoryStore, NewUser, PasswordHash, StoreError, User, UserStore},
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

/// Memory store that counts calls.
#[derive(Default)]
pub(crate) struct CountingStore {
    inner: MemoryStore,
    inserts: AtomicUsize,
    lookups: AtomicUsize,
}

impl CountingStore {
    pub(crate) fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub(crate) fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for CountingStore {
    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.exists_by_email(email).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_email(email).await
    }

    async fn insert(&self, user: &NewUser) -> Result<Uuid, StoreError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(user).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Store whose every call fails, as if the database went away.
pub(crate) struct BrokenStore;

#[async_trait]
impl UserStore for BrokenStore {
    async fn exists_by_email(&self, _email: &str) -> Result<bool, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn insert(&self, _user: &NewUser) -> Result<Uuid, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}

/// Deterministic hasher: `hashed:<password>`.
pub(crate) struct FakeHasher;

#[async_trait]
impl PasswordHasher for FakeHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordError> {
        Ok(PasswordHash::from_hashed(format!("hashed:{password}")))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        Ok(hash == format!("hashed:{password}"))
    }
}

/// Hasher whose primitives always fail.
pub(crate) struct FailingHasher;

#[async_trait]
impl PasswordHasher for FailingHasher {
    async fn hash(&self, _password: &str) -> Result<PasswordHash, PasswordError> {
        Err(PasswordError::Bcrypt(bcrypt::BcryptError::CostNotAllowed(1)))
    }

    async fn verify(&self, _password: &str, _hash: &str) -> Result<bool, PasswordError> {
        Err(PasswordError::Bcrypt(bcrypt::BcryptError::InvalidHash(
            "broken".to_string(),
        )))
    }
}
