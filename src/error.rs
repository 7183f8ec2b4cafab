//! Error types for the rendering service

use thiserror::Error;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing or rendering artifacts
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to launch a browser session
    #[error("Browser initialization failed: {0}")]
    InitializationError(String),

    /// Failed to load a URL or document
    #[error("Failed to load URL: {0}")]
    LoadError(String),

    /// Failed to render content
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Navigation did not finish in time
    #[error("Operation timed out after {0}ms")]
    Timeout(u64),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// The slide document template failed to render
    #[error("Template error: {0}")]
    TemplateError(#[from] askama::Error),

    /// A deck must contain at least one slide
    #[error("No slides provided")]
    EmptyDeck,

    /// The session worker went away before answering
    #[error("Session error: {0}")]
    SessionError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_reports_milliseconds() {
        assert_eq!(Error::Timeout(60000).to_string(), "Operation timed out after 60000ms");
    }

    #[test]
    fn test_empty_deck_message() {
        assert_eq!(Error::EmptyDeck.to_string(), "No slides provided");
    }
}
