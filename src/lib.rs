//! # Signet
//!
//! `signet` is a small authentication backend: users sign up with a name,
//! email and password, and sign in to receive a short-lived session token.
//!
//! ## Flow
//!
//! - **Signup** validates the payload, hashes the password with bcrypt (work
//!   factor 10) and stores the user unless the email is already taken.
//! - **Signin** looks the user up by email, verifies the password against the
//!   stored hash and issues an HS256 JWT carrying the user id.
//!
//! Emails are trimmed and lowercased before they are stored or looked up, so
//! uniqueness is case-insensitive. Passwords are only ever persisted as salted
//! hashes; the store API does not accept plaintext.

pub mod cli;
pub mod signet;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
