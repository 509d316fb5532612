// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;

/// Default Discord REST API base URL.
pub const DEFAULT_DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot token used for Discord REST lookups
    pub discord_token: String,
    /// Shared secret the gateway bridge and command layer present
    pub bridge_token: String,
    /// Home guild, if configured
    pub guild_id: Option<u64>,
    /// Discord REST API base URL
    pub discord_api_base: String,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let guild_id = match env::var("GUILD_ID") {
            Ok(raw) => Some(
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid("GUILD_ID", raw))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            discord_token: env::var("DISCORD_TOKEN")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("DISCORD_TOKEN"))?,
            bridge_token: env::var("BRIDGE_TOKEN")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("BRIDGE_TOKEN"))?,
            guild_id,
            discord_api_base: env::var("DISCORD_API_BASE")
                .unwrap_or_else(|_| DEFAULT_DISCORD_API_BASE.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }

    /// Config for tests only.
    pub fn test_default() -> Self {
        Self {
            discord_token: "test_discord_token".to_string(),
            bridge_token: "test_bridge_token".to_string(),
            guild_id: Some(1),
            discord_api_base: "http://127.0.0.1:9".to_string(),
            port: 8080,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
