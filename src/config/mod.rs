//! Configuration loading and management.
//!
//! - [`types`]: config struct definitions and TOML loading
//! - [`validation`]: startup checks that report every problem at once

mod types;
mod validation;

pub use types::{BotConfig, Config, ConfigError, IdentityConfig, ServerConfig};
pub use validation::{ValidationError, validate};
