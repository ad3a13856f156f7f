use anyhow::{anyhow, Result};
use argon2::Params;
use std::fmt::Display;
use std::str::FromStr;

use crate::room::{password::PasswordHasher, service::RoomSettings};

/// Process configuration, read from environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// When unset, rooms live in memory and vanish on restart
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub argon2_memory_kib: Option<u32>,
    pub argon2_time_cost: Option<u32>,
    pub argon2_parallelism: Option<u32>,
    pub max_clipboard_bytes: Option<usize>,
    pub room_id_max_attempts: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8001,
            database_url: None,
            database_max_connections: 5,
            argon2_memory_kib: None,
            argon2_time_cost: None,
            argon2_parallelism: None,
            max_clipboard_bytes: None,
            room_id_max_attempts: RoomSettings::default().max_create_attempts,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT")?.unwrap_or(defaults.port),
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            database_max_connections: parse_var(&lookup, "DATABASE_MAX_CONNECTIONS")?
                .unwrap_or(defaults.database_max_connections),
            argon2_memory_kib: parse_var(&lookup, "ARGON2_MEMORY_KIB")?,
            argon2_time_cost: parse_var(&lookup, "ARGON2_TIME_COST")?,
            argon2_parallelism: parse_var(&lookup, "ARGON2_PARALLELISM")?,
            max_clipboard_bytes: parse_var(&lookup, "MAX_CLIPBOARD_BYTES")?,
            room_id_max_attempts: parse_var(&lookup, "ROOM_ID_MAX_ATTEMPTS")?
                .unwrap_or(defaults.room_id_max_attempts),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Hasher with any configured Argon2 cost overrides applied
    pub fn password_hasher(&self) -> Result<PasswordHasher> {
        let defaults = Params::DEFAULT;
        PasswordHasher::from_cost(
            self.argon2_memory_kib.unwrap_or(defaults.m_cost()),
            self.argon2_time_cost.unwrap_or(defaults.t_cost()),
            self.argon2_parallelism.unwrap_or(defaults.p_cost()),
        )
        .map_err(|e| anyhow!("invalid Argon2 parameters: {e}"))
    }

    pub fn room_settings(&self) -> RoomSettings {
        RoomSettings {
            max_clipboard_bytes: self.max_clipboard_bytes,
            max_create_attempts: self.room_id_max_attempts,
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| anyhow!("invalid value for {key} ({raw:?}): {e}")),
        None => Ok(None),
    }
}
