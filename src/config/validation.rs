//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.address is required")]
    MissingAddress,
    #[error("server.address must be host:port, got '{0}'")]
    InvalidAddress(String),
    #[error("identity.nick is required")]
    MissingNick,
    #[error("identity.nick must not contain whitespace, got '{0}'")]
    InvalidNick(String),
    #[error("bot.command_prefix must be non-empty and contain no whitespace, got '{0}'")]
    InvalidPrefix(String),
    #[error("bot.channels entry must start with '#' or '&', got '{0}'")]
    InvalidChannel(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // Server address
    let address = &config.server.address;
    if address.is_empty() {
        errors.push(ValidationError::MissingAddress);
    } else {
        let port_ok = address
            .rsplit_once(':')
            .is_some_and(|(host, port)| !host.is_empty() && port.parse::<u16>().is_ok());
        if !port_ok {
            errors.push(ValidationError::InvalidAddress(address.clone()));
        }
    }

    // Identity
    let nick = &config.identity.nick;
    if nick.is_empty() {
        errors.push(ValidationError::MissingNick);
    } else if nick.chars().any(char::is_whitespace) {
        errors.push(ValidationError::InvalidNick(nick.clone()));
    }

    // Command prefix
    let prefix = &config.bot.command_prefix;
    if prefix.is_empty() || prefix.chars().any(char::is_whitespace) {
        errors.push(ValidationError::InvalidPrefix(prefix.clone()));
    }

    for channel in &config.bot.channels {
        if !(channel.starts_with('#') || channel.starts_with('&')) {
            errors.push(ValidationError::InvalidChannel(channel.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
