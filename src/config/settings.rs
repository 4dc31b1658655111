use std::env;
use std::path::PathBuf;

use crate::bot::error::Error;

const DEFAULT_CHANNEL_NAME: &str = "Temporary Channel";
const DEFAULT_MAX_CHANNEL_NAME_LENGTH: usize = 50;
const DEFAULT_TEMP_CATEGORY_NAME: &str = "Temporary Channels";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Discord rejects channel names longer than this
const DISCORD_CHANNEL_NAME_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct Settings {
    pub discord_token: String,
    pub guild_id: Option<u64>,
    /// Label used when a sanitized name fragment comes out empty
    pub default_channel_name: String,
    pub max_channel_name_length: usize,
    /// Category for channels created with `/create-voice`
    pub temp_category_name: String,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let discord_token = var("DISCORD_BOT_TOKEN")
            .ok_or_else(|| Error::ConfigNotFound("DISCORD_BOT_TOKEN".to_string()))?;

        let guild_id = match var("DISCORD_GUILD_ID") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| Error::InvalidConfig {
                key: "DISCORD_GUILD_ID".to_string(),
                value: raw.clone(),
            })?),
            None => None,
        };

        let default_channel_name =
            var("DEFAULT_CHANNEL_NAME").unwrap_or_else(|| DEFAULT_CHANNEL_NAME.to_string());

        let max_channel_name_length = match var("MAX_CHANNEL_NAME_LENGTH") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if (1..=DISCORD_CHANNEL_NAME_LIMIT).contains(&n) => n,
                _ => {
                    return Err(Error::InvalidConfig {
                        key: "MAX_CHANNEL_NAME_LENGTH".to_string(),
                        value: raw,
                    })
                }
            },
            None => DEFAULT_MAX_CHANNEL_NAME_LENGTH,
        };

        let temp_category_name =
            var("TEMP_CATEGORY_NAME").unwrap_or_else(|| DEFAULT_TEMP_CATEGORY_NAME.to_string());

        let log_level = var("LOG_LEVEL")
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let log_file = var("LOG_FILE").map(PathBuf::from);

        Ok(Self {
            discord_token,
            guild_id,
            default_channel_name,
            max_channel_name_length,
            temp_category_name,
            log_level,
            log_file,
        })
    }
}
