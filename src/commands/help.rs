//! Built-in `help` command.
//!
//! `help` is answered by the dispatcher itself rather than through the
//! registry, so its listing always reflects the registry's current contents.

use super::connection::Connection;
use super::registry::CommandRegistry;
use super::templates;

/// Reserved command name that triggers help.
pub const HELP_COMMAND: &str = "help";

/// Which help reply was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpReply {
    /// The about line plus the list of available commands.
    Generic,
    /// Description and usage of one command.
    Specific,
}

/// Answer a help request.
///
/// `full_arg` is whatever followed `help`; its first word names the command
/// to describe and may carry the command prefix. An unknown name falls back
/// to the generic listing. Always sends exactly two messages to `target`.
pub fn send_help(
    registry: &CommandRegistry,
    prefix: &str,
    full_arg: &str,
    target: &str,
    conn: &dyn Connection,
) -> HelpReply {
    let wanted = full_arg
        .split_whitespace()
        .next()
        .map(|name| name.strip_prefix(prefix).unwrap_or(name));

    match wanted.and_then(|name| registry.lookup(name)) {
        Some(desc) => {
            conn.send_message(target, &templates::help_description(&desc.description));
            conn.send_message(
                target,
                &templates::help_usage(prefix, &desc.name, &desc.example_args),
            );
            HelpReply::Specific
        }
        None => {
            send_available_commands(registry, prefix, target, conn);
            HelpReply::Generic
        }
    }
}

fn send_available_commands(
    registry: &CommandRegistry,
    prefix: &str,
    target: &str,
    conn: &dyn Connection,
) {
    let names = registry.names().join(", ");
    conn.send_message(target, &templates::help_about_command(prefix));
    conn.send_message(target, &templates::available_commands(&names));
}
