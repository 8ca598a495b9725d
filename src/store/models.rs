use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("name not provided ")]
    MissingName,
    #[error("{0} is not a valid email! ")]
    InvalidEmail(String),
    #[error("{0} is not a valid role! ")]
    InvalidRole(String),
}

/// Normalize an email for lookup/uniqueness checks.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Basic `local@domain.tld` check on already-normalized input.
#[must_use]
pub fn valid_email(email_normalized: &str) -> bool {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").is_ok_and(|re| re.is_match(email_normalized))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(UserError::InvalidRole(other.to_string())),
        }
    }
}

/// A salted one-way password hash.
///
/// Only the password hasher builds these, so a `NewUser` can never carry a
/// plaintext password into the store.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub(crate) fn from_hashed(hash: String) -> Self {
        Self(hash)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(***)")
    }
}

/// A persisted user record.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Stored password hash
    pub password: String,
    pub role: Role,
    pub company_id: Option<Uuid>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***")
            .field("role", &self.role)
            .field("company_id", &self.company_id)
            .finish()
    }
}

/// A user ready to be inserted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    name: String,
    email: String,
    password: PasswordHash,
    role: Role,
    company_id: Option<Uuid>,
}

impl NewUser {
    /// Build a record from raw input: the name is trimmed, the email trimmed,
    /// lowercased and checked against the basic email pattern.
    ///
    /// # Errors
    /// Returns an error if the trimmed name is empty or the email is malformed.
    pub fn new(name: &str, email: &str, password: PasswordHash) -> Result<Self, UserError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(UserError::MissingName);
        }

        let email = normalize_email(email);
        if !valid_email(&email) {
            return Err(UserError::InvalidEmail(email));
        }

        Ok(Self {
            name: name.to_string(),
            email,
            password,
            role: Role::default(),
            company_id: None,
        })
    }

    #[cfg(test)]
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    #[cfg(test)]
    #[must_use]
    pub fn with_company_id(mut self, company_id: Uuid) -> Self {
        self.company_id = Some(company_id);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &PasswordHash {
        &self.password
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub const fn company_id(&self) -> Option<Uuid> {
        self.company_id
    }

    /// Attach the store-assigned id.
    #[must_use]
    pub fn into_user(self, id: Uuid) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password: self.password.0,
            role: self.role,
            company_id: self.company_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash() -> PasswordHash {
        PasswordHash::from_hashed("$2b$10$abcdefghijklmnopqrstuv".to_string())
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email(" Alice@Example.COM "), "alice@example.com");
    }

    #[test]
    fn valid_email_accepts_basic_format() {
        assert!(valid_email("a@example.com"));
        assert!(valid_email("name.surname@example.co"));
    }

    #[test]
    fn valid_email_rejects_missing_parts() {
        assert!(!valid_email("not-an-email"));
        assert!(!valid_email("a@example"));
        assert!(!valid_email("a b@example.com"));
        assert!(!valid_email("@example.com"));
    }

    #[test]
    fn new_user_normalizes_input() -> Result<(), UserError> {
        let user = NewUser::new("  Ada  ", " Ada@Example.COM ", hash())?;
        assert_eq!(user.name(), "Ada");
        assert_eq!(user.email(), "ada@example.com");
        assert_eq!(user.role(), Role::User);
        assert_eq!(user.company_id(), None);
        Ok(())
    }

    #[test]
    fn new_user_rejects_blank_name() {
        let result = NewUser::new("   ", "ada@example.com", hash());
        assert_eq!(result.err(), Some(UserError::MissingName));
    }

    #[test]
    fn new_user_rejects_invalid_email() {
        let result = NewUser::new("Ada", "ada-at-example", hash());
        assert_eq!(
            result.err().map(|e| e.to_string()),
            Some("ada-at-example is not a valid email! ".to_string())
        );
    }

    #[test]
    fn into_user_keeps_fields() -> Result<(), UserError> {
        let company = Uuid::new_v4();
        let id = Uuid::new_v4();
        let user = NewUser::new("Ada", "ada@example.com", hash())?
            .with_role(Role::Admin)
            .with_company_id(company)
            .into_user(id);
        assert_eq!(user.id, id);
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.company_id, Some(company));
        assert_eq!(user.password, "$2b$10$abcdefghijklmnopqrstuv");
        Ok(())
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("user".parse::<Role>(), Ok(Role::User));
        assert!("root".parse::<Role>().is_err());
        assert_eq!(Role::Admin.to_string(), "admin");
    }

    #[test]
    fn debug_hides_password() {
        let user = NewUser::new("Ada", "ada@example.com", hash()).map(|u| u.into_user(Uuid::nil()));
        let rendered = format!("{user:?}");
        assert!(!rendered.contains("$2b$"));
    }
}
