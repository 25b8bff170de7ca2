//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::commands::DEFAULT_PREFIX;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// IRC server to connect to.
    pub server: ServerConfig,
    /// Nick and user identity.
    pub identity: IdentityConfig,
    /// Channels and command handling.
    #[serde(default)]
    pub bot: BotConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Upstream server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// `host:port` of the IRC server.
    pub address: String,
    /// Wrap the connection in TLS.
    #[serde(default)]
    pub tls: bool,
    /// Verify the server certificate against the system roots (default: true).
    /// Only meaningful with `tls = true`.
    #[serde(default = "default_true")]
    pub verify_cert: bool,
    /// Connection password sent with PASS (optional).
    pub password: Option<String>,
}

impl ServerConfig {
    /// Host part of `address`, used for TLS server name verification.
    pub fn host(&self) -> &str {
        match self.address.rsplit_once(':') {
            Some((host, _)) => host.trim_start_matches('[').trim_end_matches(']'),
            None => &self.address,
        }
    }
}

/// Identity the bot registers with.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    pub nick: String,
    /// Username for USER (defaults to the nick).
    pub user: Option<String>,
    /// Realname for USER (defaults to the nick).
    pub realname: Option<String>,
}

impl IdentityConfig {
    pub fn user(&self) -> &str {
        self.user.as_deref().unwrap_or(&self.nick)
    }

    pub fn realname(&self) -> &str {
        self.realname.as_deref().unwrap_or(&self.nick)
    }
}

/// Channel and command settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Channels joined after registration completes.
    #[serde(default)]
    pub channels: Vec<String>,
    /// Marker that turns a chat line into a command (default: "!").
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            channels: Vec::new(),
            command_prefix: default_command_prefix(),
        }
    }
}

fn default_command_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

pub(super) fn default_true() -> bool {
    true
}
