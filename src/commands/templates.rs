//! Fixed reply texts produced by the dispatcher and the help command.
//!
//! These strings are part of the bot's observable behavior; tests compare
//! against them verbatim.

/// Reply sent when a handler returns an error.
pub fn error_executing_command(command: &str, error: &str) -> String {
    format!("Error executing {command}: {error}")
}

/// First line of the generic help reply.
pub fn help_about_command(prefix: &str) -> String {
    format!("Type: '{prefix}help <command>' to see details about a specific command.")
}

/// Second line of the generic help reply. `names` is already joined.
pub fn available_commands(names: &str) -> String {
    format!("Available commands: {names}")
}

pub fn help_description(description: &str) -> String {
    format!("Description: {description}")
}

pub fn help_usage(prefix: &str, command: &str, example_args: &str) -> String {
    format!("Usage: {prefix}{command} {example_args}")
}
