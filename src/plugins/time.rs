//! `time`: current UTC time.

use crate::commands::{CommandContext, CommandRegistry};
use crate::error::CommandResult;
use chrono::{SecondsFormat, Utc};

pub fn register(registry: &CommandRegistry) {
    registry.register("time", "Shows the current UTC time", "", time);
}

fn time(_ctx: &CommandContext) -> CommandResult {
    Ok(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true))
}
