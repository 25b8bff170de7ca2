//! `roll [NdM]`: roll dice.

use crate::commands::{CommandContext, CommandRegistry, Handler};
use crate::error::{CommandError, CommandResult};
use rand::Rng;

const DEFAULT_DICE: &str = "1d6";

pub fn register(registry: &CommandRegistry) {
    registry.register_handler("roll", "Rolls dice (default 1d6)", "2d20", RollCommand::default());
}

/// Dice roller with bounds on how much a single roll may ask for.
#[derive(Debug, Clone, Copy)]
pub struct RollCommand {
    pub max_dice: u32,
    pub max_sides: u32,
}

impl Default for RollCommand {
    fn default() -> Self {
        Self {
            max_dice: 20,
            max_sides: 1000,
        }
    }
}

impl RollCommand {
    /// Parse `NdM` (`dM` means one die).
    fn parse(&self, spec: &str) -> Result<(u32, u32), CommandError> {
        let invalid = || CommandError::InvalidArgument(format!("expected NdM, got '{spec}'"));

        let (count, sides) = spec.to_ascii_lowercase().split_once('d').map_or_else(
            || Err(invalid()),
            |(count, sides)| {
                let count = if count.is_empty() {
                    1
                } else {
                    count.parse::<u32>().map_err(|_| invalid())?
                };
                let sides = sides.parse::<u32>().map_err(|_| invalid())?;
                Ok((count, sides))
            },
        )?;

        if !(1..=self.max_dice).contains(&count) {
            return Err(CommandError::InvalidArgument(format!(
                "dice count must be between 1 and {}",
                self.max_dice
            )));
        }
        if !(2..=self.max_sides).contains(&sides) {
            return Err(CommandError::InvalidArgument(format!(
                "sides must be between 2 and {}",
                self.max_sides
            )));
        }
        Ok((count, sides))
    }

    fn roll_with<R: Rng>(&self, rng: &mut R, nick: &str, spec: &str) -> CommandResult {
        let (count, sides) = self.parse(spec)?;
        let rolls: Vec<u32> = (0..count).map(|_| rng.gen_range(1..=sides)).collect();
        let total: u32 = rolls.iter().sum();

        if rolls.len() == 1 {
            Ok(format!("{nick} rolled {count}d{sides}: {total}"))
        } else {
            let parts: Vec<String> = rolls.iter().map(u32::to_string).collect();
            Ok(format!(
                "{nick} rolled {count}d{sides}: {} = {total}",
                parts.join(" + ")
            ))
        }
    }
}

impl Handler for RollCommand {
    fn handle(&self, ctx: &CommandContext) -> CommandResult {
        let spec = ctx.arg(0).unwrap_or(DEFAULT_DICE);
        self.roll_with(&mut rand::thread_rng(), &ctx.nick, spec)
    }
}
