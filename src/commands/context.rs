//! Invocation context handed to command handlers.

/// Everything a handler gets to know about one command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContext {
    /// The full inbound line, prefix included.
    pub raw: String,
    /// Where the reply goes: the channel, or the sender for private messages.
    pub channel: String,
    /// Nick of the user who sent the command.
    pub nick: String,
    /// Command name without the prefix.
    pub command: String,
    /// Everything after the command name, trailing whitespace trimmed.
    pub full_arg: String,
    /// `full_arg` split on whitespace runs.
    pub args: Vec<String>,
}

impl CommandContext {
    /// The `n`th argument (zero-based), if present.
    pub fn arg(&self, n: usize) -> Option<&str> {
        self.args.get(n).map(String::as_str)
    }

    /// True when the command was invoked with no arguments.
    pub fn has_args(&self) -> bool {
        !self.args.is_empty()
    }
}
