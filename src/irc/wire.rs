//! IRC line handling on top of `irc-proto`.
//!
//! Parsing and serialization come from the protocol crate. This module adds
//! the outbound constructors the bot uses and [`encode`], which guarantees a
//! queued line can never carry a second command.

pub use irc_proto::{Command, Message, Response};

use tracing::trace;

/// Parse one inbound line. Blank and malformed lines yield `None`.
pub fn parse(line: &str) -> Option<Message> {
    if line.trim().is_empty() {
        return None;
    }
    match line.parse::<Message>() {
        Ok(msg) => Some(msg),
        Err(e) => {
            trace!(line = %line, error = %e, "Dropping unparseable line");
            None
        }
    }
}

/// Serialize `msg` as a single line without its terminator.
///
/// CR, LF and NUL are removed, so text relayed from users cannot end the
/// line early and smuggle in another command.
pub fn encode(msg: &Message) -> String {
    msg.to_string()
        .chars()
        .filter(|c| !matches!(c, '\r' | '\n' | '\0'))
        .collect()
}

pub fn nick(nick: &str) -> Message {
    Command::NICK(nick.to_owned()).into()
}

/// `USER <user> 0 * :<realname>`
pub fn user(user: &str, realname: &str) -> Message {
    Command::USER(user.to_owned(), "0".to_owned(), realname.to_owned()).into()
}

pub fn pass(password: &str) -> Message {
    Command::PASS(password.to_owned()).into()
}

pub fn join(channel: &str) -> Message {
    Command::JOIN(channel.to_owned(), None, None).into()
}

pub fn pong(token: &str) -> Message {
    Command::PONG(token.to_owned(), None).into()
}

pub fn privmsg(target: &str, text: &str) -> Message {
    Command::PRIVMSG(target.to_owned(), text.to_owned()).into()
}

pub fn quit(reason: &str) -> Message {
    Command::QUIT(Some(reason.to_owned())).into()
}
