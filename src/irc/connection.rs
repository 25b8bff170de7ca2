//! [`Connection`] implementation backed by an IRC session.

use super::wire::{self, Message};
use crate::commands::Connection;
use parking_lot::RwLock;
use tokio::sync::mpsc;
use tracing::warn;

/// Handle the dispatcher uses to talk back to the IRC server.
///
/// Outbound lines go into an unbounded queue drained by the session's writer
/// task, so sending never blocks the caller.
#[derive(Debug)]
pub struct IrcConnection {
    nick: RwLock<String>,
    outbound: mpsc::UnboundedSender<String>,
}

impl IrcConnection {
    pub fn new(nick: impl Into<String>, outbound: mpsc::UnboundedSender<String>) -> Self {
        Self {
            nick: RwLock::new(nick.into()),
            outbound,
        }
    }

    /// Record a nick change confirmed (or requested) on the wire.
    pub fn set_nick(&self, nick: impl Into<String>) {
        *self.nick.write() = nick.into();
    }

    /// Queue a protocol message. Returns `false` once the writer is gone.
    pub fn send(&self, msg: &Message) -> bool {
        self.outbound.send(wire::encode(msg)).is_ok()
    }
}

impl Connection for IrcConnection {
    /// Sends one PRIVMSG per non-blank line of `text`. Both CR and LF end a line.
    fn send_message(&self, target: &str, text: &str) {
        for line in text.split(['\r', '\n']).filter(|l| !l.trim().is_empty()) {
            if !self.send(&wire::privmsg(target, line)) {
                warn!(target = %target, "Dropping reply, connection writer closed");
                return;
            }
        }
    }

    fn own_nick(&self) -> String {
        self.nick.read().clone()
    }
}
