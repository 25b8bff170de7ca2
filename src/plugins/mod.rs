//! Built-in feature commands.
//!
//! Each submodule exposes a `register` function that adds its commands to a
//! [`CommandRegistry`]. [`register_all`] wires in everything shipped with the
//! bot.

pub mod echo;
pub mod roll;
pub mod time;

use crate::commands::CommandRegistry;

/// Register every built-in command.
pub fn register_all(registry: &CommandRegistry) {
    echo::register(registry);
    roll::register(registry);
    time::register(registry);
}
