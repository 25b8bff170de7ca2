//! Integration test common infrastructure.
//!
//! Provides a recording [`Connection`] that stands in for the IRC session.

use parking_lot::Mutex;
use slirc_bot::Connection;

/// A connection that records every message instead of sending it.
#[derive(Debug, Default)]
pub struct RecordingConnection {
    /// Nick reported by `own_nick`.
    pub nick: String,
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingConnection {
    pub fn new(nick: &str) -> Self {
        Self {
            nick: nick.to_owned(),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Texts of every message sent, in order.
    pub fn messages(&self) -> Vec<String> {
        self.sent.lock().iter().map(|(_, text)| text.clone()).collect()
    }

    /// Target of the last message sent.
    pub fn last_target(&self) -> Option<String> {
        self.sent.lock().last().map(|(target, _)| target.clone())
    }

    /// Every distinct target messages were sent to.
    pub fn targets(&self) -> Vec<String> {
        let mut targets: Vec<String> = self.sent.lock().iter().map(|(t, _)| t.clone()).collect();
        targets.dedup();
        targets
    }
}

impl Connection for RecordingConnection {
    fn send_message(&self, target: &str, text: &str) {
        self.sent.lock().push((target.to_owned(), text.to_owned()));
    }

    fn own_nick(&self) -> String {
        self.nick.clone()
    }
}
