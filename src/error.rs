//! Unified error handling for slirc-bot.
//!
//! Each layer owns its own error enum: command handlers return
//! [`CommandError`], the IRC client returns [`ClientError`]. Configuration
//! errors live next to the config types.

use thiserror::Error;

// ============================================================================
// Command Errors (handler execution)
// ============================================================================

/// Errors a command handler can return.
///
/// The dispatcher never propagates these: the `Display` text is substituted
/// into the "error executing" reply and sent to the destination.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Failed(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CommandError {
    /// Free-form failure whose text is shown to the user verbatim.
    pub fn msg(text: impl Into<String>) -> Self {
        Self::Failed(text.into())
    }

    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingArgument(_) => "missing_argument",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Failed(_) => "failed",
            Self::Other(_) => "other",
        }
    }
}

/// Result type for command handlers.
pub type CommandResult = Result<String, CommandError>;

// ============================================================================
// Client Errors (IRC connection)
// ============================================================================

/// Errors raised by the IRC client connection loop.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line codec error: {0}")]
    Codec(#[from] tokio_util::codec::LinesCodecError),

    #[error("invalid TLS server name: {0}")]
    InvalidServerName(String),

    #[error("server closed the connection: {0}")]
    Closed(String),

    #[error("registration failed: {0}")]
    Registration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_displays_text_verbatim() {
        let err = CommandError::msg("boom");
        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.error_code(), "failed");
    }

    #[test]
    fn missing_argument_names_the_argument() {
        let err = CommandError::MissingArgument("text");
        assert_eq!(err.to_string(), "missing argument: text");
    }

    #[test]
    fn anyhow_errors_are_transparent() {
        let err: CommandError = anyhow::anyhow!("upstream unavailable").into();
        assert_eq!(err.to_string(), "upstream unavailable");
        assert_eq!(err.error_code(), "other");
    }
}
