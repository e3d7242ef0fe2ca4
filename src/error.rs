//! Error types for termfeed.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for termfeed operations.
#[derive(Error, Debug)]
pub enum TermError {
    /// Configuration errors (invalid config file, conflicting fields, bad CLI values).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Headless script errors (unknown event type, malformed key name, etc.)
    #[error("Script error: {0}")]
    Script(String),

    /// Terminal backend errors (raw mode, alternate screen, drawing).
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A command side effect reported a failure.
    #[error("Side effect failed: {0}")]
    SideEffect(String),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TermError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a script error with the given message.
    pub fn script(msg: impl Into<String>) -> Self {
        Self::Script(msg.into())
    }

    /// Creates a terminal error with the given message.
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Creates a side effect error with the given message.
    pub fn side_effect(msg: impl Into<String>) -> Self {
        Self::SideEffect(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration Error",
            Self::Script(_) => "Script Error",
            Self::Terminal(_) => "Terminal Error",
            Self::SideEffect(_) => "Side Effect Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using TermError.
pub type Result<T> = std::result::Result<T, TermError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_config() {
        let err = TermError::config("command 'ls' sets both output and table");
        assert_eq!(
            err.to_string(),
            "Configuration error: command 'ls' sets both output and table"
        );
        assert_eq!(err.category(), "Configuration Error");
    }

    #[test]
    fn test_error_display_script() {
        let err = TermError::script("Unknown key: 'hyper'");
        assert_eq!(err.to_string(), "Script error: Unknown key: 'hyper'");
        assert_eq!(err.category(), "Script Error");
    }

    #[test]
    fn test_error_display_terminal() {
        let err = TermError::terminal("Failed to enable raw mode");
        assert_eq!(err.to_string(), "Terminal error: Failed to enable raw mode");
        assert_eq!(err.category(), "Terminal Error");
    }

    #[test]
    fn test_error_display_side_effect() {
        let err = TermError::side_effect("printer on fire");
        assert_eq!(err.to_string(), "Side effect failed: printer on fire");
        assert_eq!(err.category(), "Side Effect Error");
    }

    #[test]
    fn test_error_display_internal() {
        let err = TermError::internal("unexpected state");
        assert_eq!(err.to_string(), "Internal error: unexpected state");
        assert_eq!(err.category(), "Internal Error");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TermError>();
    }
}
