//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config. Token signing settings are
//! owned by the auth crate (`JwtConfig`) so they can be validated there.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection URL (PostgreSQL)
    pub database_url: String,

    /// Runtime configuration
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL is required"))?,

            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "plantplanet=debug".to_string()),
            port: parse_port(env::var("PORT").ok().as_deref())?,
        };

        Ok(config)
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid port number, got {:?}", value)),
    }
}
