use crate::cli::{
    actions::{server, Action},
    commands::auth,
};
use anyhow::{Context, Result};

/// Turn parsed arguments into the action to run.
/// # Errors
/// Returns an error if a required argument is missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let auth = auth::Options::parse(matches)?;

    Ok(Action::Server(server::Args {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        dsn: matches
            .get_one::<String>("dsn")
            .cloned()
            .context("missing required argument: --dsn")?,
        jwt_secret: auth.jwt_secret,
        token_expires_in: auth.token_expires_in,
    }))
}
