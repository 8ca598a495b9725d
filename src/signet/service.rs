//! User service: the duplicate check and insert behind signup, and the
//! lookup behind signin.

use crate::store::{
    models::normalize_email, NewUser, PasswordHash, StoreError, User, UserError, UserStore,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Outcome of `create_user`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateUserOutcome {
    Created { id: Uuid },
    Duplicate,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    #[must_use]
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Create a user unless the email is already registered.
    ///
    /// The existence check and the insert are not atomic; a unique violation
    /// reported by the store on insert is treated as a duplicate as well.
    ///
    /// # Errors
    /// Returns an error if the record is invalid or the store fails.
    #[instrument(skip_all)]
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: PasswordHash,
    ) -> Result<CreateUserOutcome, ServiceError> {
        let user = NewUser::new(name, email, password)?;

        if self.store.exists_by_email(user.email()).await? {
            debug!("User already exists");
            return Ok(CreateUserOutcome::Duplicate);
        }

        match self.store.insert(&user).await {
            Ok(id) => Ok(CreateUserOutcome::Created { id }),
            Err(StoreError::UniqueViolation) => {
                debug!("User inserted concurrently");
                Ok(CreateUserOutcome::Duplicate)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Fetch a user by email, `None` if nobody registered it.
    ///
    /// # Errors
    /// Returns an error only if the store fails.
    #[instrument(skip_all)]
    pub async fn get_user(&self, email: &str) -> Result<Option<User>, ServiceError> {
        Ok(self.store.find_by_email(&normalize_email(email)).await?)
    }

    /// # Errors
    /// Returns an error if the store is unreachable.
    pub async fn ping(&self) -> Result<(), ServiceError> {
        Ok(self.store.ping().await?)
    }
}
