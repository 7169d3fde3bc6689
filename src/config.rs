// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup. A missing
//! or undersized signing secret is a fatal configuration error: the process
//! refuses to start rather than falling back to a compiled-in default.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `TOKEN_SECRET` | HS256 signing secret (min 16 bytes) | Required |
//! | `TOKEN_TTL_SECS` | Token lifetime in seconds | `86400` (24h) |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::env;

/// Environment variable name for the token signing secret.
pub const TOKEN_SECRET_ENV: &str = "TOKEN_SECRET";

/// Environment variable name for the token lifetime.
pub const TOKEN_TTL_ENV: &str = "TOKEN_TTL_SECS";

/// Minimum length of the signing secret, in bytes.
///
/// HS256 keys shorter than this are trivially brute-forceable; startup
/// fails instead of accepting one.
pub const MIN_TOKEN_SECRET_LEN: usize = 16;

/// Default token lifetime: 24 hours.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 86_400;

/// Fatal configuration errors, detected before the server starts serving.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{TOKEN_SECRET_ENV} is not set; a signing secret is required")]
    MissingTokenSecret,

    #[error("{TOKEN_SECRET_ENV} is {actual} bytes, need at least {MIN_TOKEN_SECRET_LEN}")]
    TokenSecretTooShort { actual: usize },

    #[error("{TOKEN_TTL_ENV} is not a positive number of seconds: {value}")]
    InvalidTokenTtl { value: String },

    #[error("PORT is not a valid port number: {value}")]
    InvalidPort { value: String },
}

/// Application configuration, loaded once at process start.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub host: String,
    /// Server bind port.
    pub port: u16,
    /// HS256 signing secret for issued tokens.
    pub token_secret: Vec<u8>,
    /// Lifetime of issued tokens, in seconds.
    pub token_ttl_secs: i64,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the signing secret is missing or
    /// shorter than [`MIN_TOKEN_SECRET_LEN`], or when a numeric variable
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = env::var(TOKEN_SECRET_ENV).map_err(|_| ConfigError::MissingTokenSecret)?;
        let token_secret = secret.into_bytes();
        if token_secret.len() < MIN_TOKEN_SECRET_LEN {
            return Err(ConfigError::TokenSecretTooShort {
                actual: token_secret.len(),
            });
        }

        let token_ttl_secs = match env::var(TOKEN_TTL_ENV) {
            Ok(raw) => match raw.parse::<i64>() {
                Ok(ttl) if ttl > 0 => ttl,
                _ => return Err(ConfigError::InvalidTokenTtl { value: raw }),
            },
            Err(_) => DEFAULT_TOKEN_TTL_SECS,
        };

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value: raw })?,
            Err(_) => 8080,
        };

        Ok(Self {
            host,
            port,
            token_secret,
            token_ttl_secs,
        })
    }
}
