//! Routes inbound chat lines to command handlers.
//!
//! The `Dispatcher` owns the command prefix and a shared [`CommandRegistry`].
//! One call to [`Dispatcher::message_received`] handles one inbound line and
//! sends its replies synchronously through the given [`Connection`].

use super::connection::Connection;
use super::context::CommandContext;
use super::help::{self, HELP_COMMAND, HelpReply};
use super::parser;
use super::registry::CommandRegistry;
use super::templates;
use std::sync::Arc;
use tracing::{Level, debug, span, warn};

/// Prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "!";

/// What a single dispatch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The line did not start with the prefix, or named no command.
    NotACommand,
    /// Prefix matched but no command is registered under that name.
    UnknownCommand,
    HelpGeneric,
    HelpSpecific,
    /// Handler succeeded; its text was sent.
    CommandSuccess,
    /// Handler failed; the error reply was sent.
    CommandError,
}

impl DispatchOutcome {
    /// Number of `send_message` calls made for this outcome.
    pub fn message_count(self) -> usize {
        match self {
            Self::NotACommand | Self::UnknownCommand => 0,
            Self::CommandSuccess | Self::CommandError => 1,
            Self::HelpGeneric | Self::HelpSpecific => 2,
        }
    }
}

impl From<HelpReply> for DispatchOutcome {
    fn from(reply: HelpReply) -> Self {
        match reply {
            HelpReply::Generic => Self::HelpGeneric,
            HelpReply::Specific => Self::HelpSpecific,
        }
    }
}

/// Command dispatcher.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    prefix: String,
}

impl Dispatcher {
    /// Create a dispatcher over `registry` using `prefix` to mark commands.
    pub fn new(registry: Arc<CommandRegistry>, prefix: impl Into<String>) -> Self {
        Self {
            registry,
            prefix: prefix.into(),
        }
    }

    /// Create a dispatcher with [`DEFAULT_PREFIX`].
    pub fn with_default_prefix(registry: Arc<CommandRegistry>) -> Self {
        Self::new(registry, DEFAULT_PREFIX)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    /// Handle one inbound line.
    ///
    /// `channel` is the target the line was sent to. When it equals the
    /// connection's own nick the line was a private message and replies go
    /// to `sender` instead.
    pub fn message_received(
        &self,
        channel: &str,
        line: &str,
        sender: &str,
        conn: &dyn Connection,
    ) -> DispatchOutcome {
        let target = if channel == conn.own_nick() {
            sender
        } else {
            channel
        };

        let Some(parsed) = parser::parse(line, &self.prefix) else {
            return DispatchOutcome::NotACommand;
        };

        let cmd_span = span!(
            Level::DEBUG,
            "bot.command",
            command = %parsed.name,
            sender = %sender,
            target = %target,
        );
        let _enter = cmd_span.enter();

        if parsed.name == HELP_COMMAND {
            self.registry.record_invocation(HELP_COMMAND);
            return help::send_help(&self.registry, &self.prefix, parsed.full_arg, target, conn)
                .into();
        }

        let Some(command) = self.registry.lookup(parsed.name) else {
            debug!("Ignoring unknown command");
            return DispatchOutcome::UnknownCommand;
        };
        self.registry.record_invocation(&command.name);

        let ctx = CommandContext {
            raw: line.to_owned(),
            channel: target.to_owned(),
            nick: sender.to_owned(),
            command: command.name.clone(),
            full_arg: parsed.full_arg.to_owned(),
            args: parsed.args(),
        };

        match command.invoke(&ctx) {
            Ok(reply) => {
                conn.send_message(target, &reply);
                DispatchOutcome::CommandSuccess
            }
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "Command failed");
                conn.send_message(
                    target,
                    &templates::error_executing_command(&command.name, &e.to_string()),
                );
                DispatchOutcome::CommandError
            }
        }
    }
}
