use crate::signet::token::DEFAULT_EXPIRES_IN;
use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_JWT_SECRET: &str = "jwt-secret";
pub const ARG_TOKEN_EXPIRES_IN: &str = "token-expires-in";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_JWT_SECRET)
                .long(ARG_JWT_SECRET)
                .help("Secret used to sign session tokens")
                .env("SIGNET_JWT_SECRET")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_TOKEN_EXPIRES_IN)
                .long(ARG_TOKEN_EXPIRES_IN)
                .help("Session token lifetime, a bare number is milliseconds (e.g. 60000, 15m, 1h)")
                .env("SIGNET_TOKEN_EXPIRES_IN")
                .default_value(DEFAULT_EXPIRES_IN),
        )
}

pub struct Options {
    pub jwt_secret: SecretString,
    pub token_expires_in: String,
}

impl Options {
    /// # Errors
    /// Returns an error if a required argument is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let jwt_secret = matches
            .get_one::<String>(ARG_JWT_SECRET)
            .cloned()
            .map(SecretString::from)
            .context("missing required argument: --jwt-secret")?;

        let token_expires_in = matches
            .get_one::<String>(ARG_TOKEN_EXPIRES_IN)
            .cloned()
            .unwrap_or_else(|| DEFAULT_EXPIRES_IN.to_string());

        Ok(Self {
            jwt_secret,
            token_expires_in,
        })
    }
}
