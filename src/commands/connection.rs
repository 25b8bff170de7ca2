//! Outbound side of the chat connection, as seen by the dispatcher.

/// The capabilities the dispatcher needs from a chat connection.
///
/// Implementations must be cheap to call from any thread: the dispatcher
/// calls [`Connection::send_message`] synchronously and expects any queueing
/// to happen inside the connection.
pub trait Connection: Send + Sync {
    /// Queue `text` for delivery to `target` (a channel or a nick).
    fn send_message(&self, target: &str, text: &str);

    /// The bot's current nickname on the network.
    fn own_nick(&self) -> String;
}
