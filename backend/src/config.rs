//! Server configuration loaded from the environment

use crate::error::ConfigError;
use chess_engine::api::DEFAULT_GAME_DURATION_SECS;
use chess_engine::GameConfig;
use std::net::SocketAddr;

pub const BIND_ADDR_VAR: &str = "CHESS_BIND_ADDR";
pub const GAME_DURATION_VAR: &str = "CHESS_GAME_DURATION_SECS";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub game_duration_secs: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            game_duration_secs: DEFAULT_GAME_DURATION_SECS,
        }
    }
}

impl ServerConfig {
    /// Read `CHESS_*` variables, loading `.env` first if present
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ServerConfig::default();
        if let Some(value) = lookup(BIND_ADDR_VAR) {
            config.bind_addr = parse_bind_addr(&value)?;
        }
        if let Some(value) = lookup(GAME_DURATION_VAR) {
            config.game_duration_secs = parse_duration_secs(&value)?;
        }
        Ok(config)
    }

    /// Rule settings handed to every new game
    pub fn game_config(&self) -> GameConfig {
        GameConfig::with_duration_secs(self.game_duration_secs)
    }
}

fn parse_bind_addr(value: &str) -> Result<SocketAddr, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key: BIND_ADDR_VAR,
        value: value.to_string(),
        reason: "expected host:port".to_string(),
    })
}

fn parse_duration_secs(value: &str) -> Result<i64, ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        key: GAME_DURATION_VAR,
        value: value.to_string(),
        reason: reason.to_string(),
    };
    let secs: i64 = value.trim().parse().map_err(|_| invalid("expected whole seconds"))?;
    if secs <= 0 {
        return Err(invalid("must be positive"));
    }
    Ok(secs)
}
