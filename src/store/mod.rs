//! Credential store.
//!
//! `UserStore` is the persistence seam used by the user service. The
//! PostgreSQL adapter is used in production; the in-memory adapter backs tests
//! and `memory://` development runs. Both enforce email uniqueness on insert
//! and report a violation as [`StoreError::UniqueViolation`].

pub mod memory;
pub mod models;
pub mod postgres;

pub use self::memory::MemoryStore;
pub use self::models::{NewUser, PasswordHash, Role, User, UserError};
pub use self::postgres::PostgresStore;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already exists ")]
    UniqueViolation,
    #[error("invalid user record: {0}")]
    InvalidRecord(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Whether a user with this (normalized) email exists.
    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;

    /// Fetch a user by (normalized) email; `None` when absent.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Insert a user and return the id assigned by the store.
    async fn insert(&self, user: &NewUser) -> Result<Uuid, StoreError>;

    /// Check the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
