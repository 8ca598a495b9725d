//! Session token issuance.
//!
//! Tokens are HS256 JWTs carrying the user id. The expiry is configured as a
//! duration string in the `ms` style: a bare number is milliseconds, and the
//! usual unit suffixes (`s`, `m`, `h`, `d`, `w`, `y`) are accepted. The
//! default `"60000"` is therefore one minute.

use jsonwebtoken::{encode, EncodingKey, Header};
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    time::{Duration, SystemTime},
};
use thiserror::Error;
use uuid::Uuid;

pub const DEFAULT_EXPIRES_IN: &str = "60000";

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("\"expiresIn\" should be a number of milliseconds or a duration string, got \"{0}\"")]
    InvalidExpiresIn(String),
    #[error("secretOrPrivateKey must have a value")]
    EmptySecret,
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: Uuid,
    pub iat: u64,
    pub exp: u64,
}

/// Parse an `ms` style duration string.
///
/// # Errors
/// Returns an error for empty, negative or unknown-unit values.
pub fn parse_expires_in(value: &str) -> Result<Duration, TokenError> {
    let invalid = || TokenError::InvalidExpiresIn(value.to_string());

    let re = Regex::new(r"^(\d+)\s*([a-z]*)$").map_err(|_| invalid())?;
    let normalized = value.trim().to_lowercase();
    let captures = re.captures(&normalized).ok_or_else(invalid)?;

    let amount: u64 = captures[1].parse().map_err(|_| invalid())?;
    let millis_per_unit: u64 = match &captures[2] {
        "" | "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => 1,
        "s" | "sec" | "secs" | "second" | "seconds" => 1_000,
        "m" | "min" | "mins" | "minute" | "minutes" => 60_000,
        "h" | "hr" | "hrs" | "hour" | "hours" => 3_600_000,
        "d" | "day" | "days" => 86_400_000,
        "w" | "week" | "weeks" => 604_800_000,
        "y" | "yr" | "yrs" | "year" | "years" => 31_557_600_000,
        _ => return Err(invalid()),
    };

    amount
        .checked_mul(millis_per_unit)
        .map(Duration::from_millis)
        .ok_or_else(invalid)
}

fn now_unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Signs session tokens with the process-wide secret.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: SecretString,
    expires_in: String,
    lifetime: Duration,
}

impl TokenIssuer {
    /// # Errors
    /// Returns an error if the secret is empty or `expires_in` cannot be parsed.
    pub fn new(secret: SecretString, expires_in: &str) -> Result<Self, TokenError> {
        if secret.expose_secret().is_empty() {
            return Err(TokenError::EmptySecret);
        }

        let lifetime = parse_expires_in(expires_in)?;

        Ok(Self {
            secret,
            expires_in: expires_in.to_string(),
            lifetime,
        })
    }

    /// The expiry parameter exactly as configured.
    #[must_use]
    pub fn expires_in(&self) -> &str {
        &self.expires_in
    }

    /// Issue a token for `id`.
    ///
    /// # Errors
    /// Returns an error if signing fails.
    pub fn issue(&self, id: Uuid) -> Result<String, TokenError> {
        let iat = now_unix_seconds();
        let claims = Claims {
            id,
            iat,
            exp: iat.saturating_add(self.lifetime.as_secs()),
        };

        let key = EncodingKey::from_secret(self.secret.expose_secret().as_bytes());

        Ok(encode(&Header::default(), &claims, &key)?)
    }
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("secret", &"***")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}
