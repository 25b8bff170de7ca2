//! Prefix command pipeline.
//!
//! ```text
//! inbound line
//!      ↓
//! parser::parse(line, prefix)     → not a command? ignore
//!      ↓
//! Dispatcher::message_received    → "help"? help::send_help
//!      ↓
//! CommandRegistry::lookup         → unknown? ignore
//!      ↓
//! Handler::handle(&CommandContext)
//!      ↓
//! Connection::send_message(target, reply or error text)
//! ```
//!
//! Feature modules add commands with [`CommandRegistry::register`] before the
//! dispatcher starts seeing traffic.

pub mod connection;
pub mod context;
pub mod dispatcher;
pub mod help;
pub mod parser;
pub mod registry;
pub mod templates;

pub use connection::Connection;
pub use context::CommandContext;
pub use dispatcher::{DEFAULT_PREFIX, DispatchOutcome, Dispatcher};
pub use help::HELP_COMMAND;
pub use registry::{CommandDescriptor, CommandRegistry, Handler};
