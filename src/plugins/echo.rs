//! `echo <text>`: repeat the argument text back.

use crate::commands::{CommandContext, CommandRegistry};
use crate::error::{CommandError, CommandResult};

pub fn register(registry: &CommandRegistry) {
    registry.register("echo", "Repeats the given text", "hello world", echo);
}

fn echo(ctx: &CommandContext) -> CommandResult {
    if ctx.full_arg.is_empty() {
        return Err(CommandError::MissingArgument("text"));
    }
    Ok(ctx.full_arg.clone())
}
