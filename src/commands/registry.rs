//! Command registry and handler storage.
//!
//! The `CommandRegistry` maps command names to their descriptors and tracks
//! per-command usage for observability. It is shared behind an `Arc` between
//! the dispatcher and whatever registers commands; reads take a shared lock,
//! registration takes the exclusive one.

use super::context::CommandContext;
use crate::error::CommandResult;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Executable part of a command.
///
/// Implemented for every `Fn(&CommandContext) -> CommandResult` closure, so
/// most commands register a plain function.
pub trait Handler: Send + Sync {
    fn handle(&self, ctx: &CommandContext) -> CommandResult;
}

impl<F> Handler for F
where
    F: Fn(&CommandContext) -> CommandResult + Send + Sync,
{
    fn handle(&self, ctx: &CommandContext) -> CommandResult {
        self(ctx)
    }
}

/// Registered metadata and handler for one command name.
pub struct CommandDescriptor {
    pub name: String,
    pub description: String,
    /// Shown after the command name in the help usage line.
    pub example_args: String,
    handler: Box<dyn Handler>,
}

impl CommandDescriptor {
    /// Run the handler.
    pub fn invoke(&self, ctx: &CommandContext) -> CommandResult {
        self.handler.handle(ctx)
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("example_args", &self.example_args)
            .finish_non_exhaustive()
    }
}

/// Registry of bot commands.
#[derive(Default)]
pub struct CommandRegistry {
    commands: RwLock<BTreeMap<String, Arc<CommandDescriptor>>>,
    /// Invocation counters, keyed by command name.
    usage: DashMap<String, u64>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a closure under `name`, replacing any previous registration.
    pub fn register<F>(&self, name: &str, description: &str, example_args: &str, handler: F)
    where
        F: Fn(&CommandContext) -> CommandResult + Send + Sync + 'static,
    {
        self.register_handler(name, description, example_args, handler);
    }

    /// Register any [`Handler`] under `name`, replacing any previous registration.
    pub fn register_handler<H>(&self, name: &str, description: &str, example_args: &str, handler: H)
    where
        H: Handler + 'static,
    {
        let descriptor = Arc::new(CommandDescriptor {
            name: name.to_owned(),
            description: description.to_owned(),
            example_args: example_args.to_owned(),
            handler: Box::new(handler),
        });

        let replaced = self
            .commands
            .write()
            .insert(name.to_owned(), descriptor)
            .is_some();
        debug!(command = %name, replaced, "Registered command");
    }

    /// Look up a command by exact name.
    ///
    /// The returned descriptor is detached from the lock, so the handler can
    /// run while other threads register commands.
    pub fn lookup(&self, name: &str) -> Option<Arc<CommandDescriptor>> {
        self.commands.read().get(name).cloned()
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.commands.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.commands.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.read().is_empty()
    }

    /// Remove every command and usage counter.
    pub fn reset(&self) {
        self.commands.write().clear();
        self.usage.clear();
    }

    /// Count one invocation of `name`.
    pub fn record_invocation(&self, name: &str) {
        *self.usage.entry(name.to_owned()).or_insert(0) += 1;
    }

    /// Command usage statistics, most used first (ties by name).
    pub fn usage_stats(&self) -> Vec<(String, u64)> {
        let mut stats: Vec<_> = self
            .usage
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();
        stats.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        stats
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.names())
            .finish()
    }
}
