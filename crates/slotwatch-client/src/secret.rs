//! TidyCal API token lookup.
//!
//! `[tidycal] api_token` may hold the bearer token itself or say where to
//! find it, so the token never has to sit in `config.toml`:
//!
//! - `env::TIDYCAL_API_TOKEN` reads an environment variable
//! - `pass::tidycal/api-token` asks the `pass` password store
//!
//! Whatever the source, surrounding whitespace is dropped and an empty token
//! is an error: TidyCal would reject it with a 401 on every bookings call.

use std::process::Command;

use thiserror::Error;

/// Why the API token could not be obtained.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("environment variable `{0}` is not set")]
    MissingEnv(String),

    #[error("could not run `pass show {entry}`: {source}")]
    PassUnavailable {
        entry: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`pass show {entry}` failed: {stderr}")]
    PassFailed { entry: String, stderr: String },

    #[error("API token is empty")]
    Empty,
}

/// Where the token comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource<'a> {
    Env(&'a str),
    Pass(&'a str),
    Inline(&'a str),
}

impl<'a> TokenSource<'a> {
    pub fn parse(value: &'a str) -> Self {
        if let Some(var) = value.strip_prefix("env::") {
            Self::Env(var)
        } else if let Some(entry) = value.strip_prefix("pass::") {
            Self::Pass(entry)
        } else {
            Self::Inline(value)
        }
    }

    /// Reads the token from its source.
    pub fn read(&self) -> Result<String, TokenError> {
        let token = match self {
            Self::Inline(token) => token.to_string(),
            Self::Env(var) => {
                std::env::var(var).map_err(|_| TokenError::MissingEnv(var.to_string()))?
            }
            Self::Pass(entry) => read_pass_entry(entry)?,
        };

        let token = token.trim();
        if token.is_empty() {
            return Err(TokenError::Empty);
        }
        Ok(token.to_string())
    }
}

/// Resolves the configured `api_token` value to the bearer token.
pub fn resolve_api_token(value: &str) -> Result<String, TokenError> {
    TokenSource::parse(value).read()
}

/// The token is the first line of the entry, as `pass` stores passwords.
fn read_pass_entry(entry: &str) -> Result<String, TokenError> {
    let output = Command::new("pass")
        .args(["show", entry])
        .output()
        .map_err(|source| TokenError::PassUnavailable {
            entry: entry.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(TokenError::PassFailed {
            entry: entry.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .unwrap_or_default()
        .to_string())
}
