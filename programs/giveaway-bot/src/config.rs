// config.rs
use std::env;

use teloxide::types::UserId;
use thiserror::Error;
use url::Url;

use crate::constants::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Process configuration, read once at startup
#[derive(Clone, Debug)]
pub struct Config {
    pub bot_token: String,
    pub admin_id: UserId,
    pub port: u16,
    /// Channel users must join, with the leading `@`
    pub channel_username: String,
    /// Bot handle without `@`, used for referral links
    pub bot_username: String,
    pub channel_url: Url,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build from any key/value source; empty values count as missing
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bot_token = get("BOT_TOKEN").ok_or(ConfigError::Missing("BOT_TOKEN"))?;

        let admin_raw = get("ADMIN_ID").ok_or(ConfigError::Missing("ADMIN_ID"))?;
        let admin_id = admin_raw
            .parse::<u64>()
            .map(UserId)
            .map_err(|e| ConfigError::Invalid {
                var: "ADMIN_ID",
                reason: e.to_string(),
            })?;

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                var: "PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let channel =
            get("CHANNEL_USERNAME").unwrap_or_else(|| DEFAULT_CHANNEL_USERNAME.to_string());
        let channel_username = format!("@{}", channel.trim_start_matches('@'));

        let bot_username = get("BOT_USERNAME")
            .unwrap_or_else(|| DEFAULT_BOT_USERNAME.to_string())
            .trim_start_matches('@')
            .to_string();

        let channel_handle = channel_username.trim_start_matches('@');
        let channel_url = Url::parse(&format!("https://t.me/{channel_handle}")).map_err(|e| {
            ConfigError::Invalid {
                var: "CHANNEL_USERNAME",
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            bot_token,
            admin_id,
            port,
            channel_username,
            bot_username,
            channel_url,
        })
    }

    pub fn referral_link(&self, user: UserId) -> String {
        format!("https://t.me/{}?start={}", self.bot_username, user.0)
    }
}
