//! slirc-bot - Straylight IRC Bot
//!
//! Loads the config, registers the built-in commands and runs one IRC
//! session until Ctrl-C or disconnect.

use slirc_bot::commands::{CommandRegistry, Dispatcher};
use slirc_bot::config::{self, Config};
use slirc_bot::{irc, plugins, telemetry};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("{} configuration error(s) in {}", errors.len(), config_path);
    }

    let registry = Arc::new(CommandRegistry::new());
    plugins::register_all(&registry);

    let dispatcher = Arc::new(Dispatcher::new(
        Arc::clone(&registry),
        config.bot.command_prefix.clone(),
    ));

    info!(
        server = %config.server.address,
        nick = %config.identity.nick,
        prefix = %dispatcher.prefix(),
        commands = registry.len(),
        "Starting slirc-bot"
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    let result = irc::run(&config, dispatcher, shutdown).await;

    for (command, count) in registry.usage_stats() {
        info!(command = %command, count, "Command usage");
    }

    result?;
    info!("Stopped");
    Ok(())
}
