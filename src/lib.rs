//! slirc-bot - Straylight IRC Bot
//!
//! A prefix-command bot: feature modules register commands in a
//! [`commands::CommandRegistry`], the [`commands::Dispatcher`] turns inbound
//! chat lines into handler calls, and the [`irc`] client carries the replies
//! back to the channel or the sender.

pub mod commands;
pub mod config;
pub mod error;
pub mod irc;
pub mod plugins;
pub mod telemetry;

pub use commands::{CommandContext, CommandRegistry, Connection, DispatchOutcome, Dispatcher};
pub use error::{ClientError, CommandError, CommandResult};
