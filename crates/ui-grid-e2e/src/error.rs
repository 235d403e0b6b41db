// Error types for ui-grid-e2e

use thiserror::Error;

/// Result type alias for grid helper operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when locating or asserting against a grid
#[derive(Debug, Error)]
pub enum Error {
    /// No grid id was passed and no default was stored
    ///
    /// Either pass an explicit grid id or call `set_grid_id` first.
    #[error("No grid id given and no default grid id set. Call set_grid_id() or pass one explicitly.")]
    GridIdNotSet,

    /// Element not found by locator chain
    ///
    /// Includes the description of the chain that was used to locate the element.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Expectation did not hold
    ///
    /// The message contains the locator plus the expected and actual values.
    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    /// A text pattern could not be compiled into a regular expression
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Failure reported by the underlying automation driver
    #[error("Driver error: {0}")]
    Driver(String),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }

    /// Returns true when this error (or the error it wraps) is a failed expectation
    pub fn is_assertion(&self) -> bool {
        match self {
            Error::AssertionFailed(_) => true,
            Error::Context(_, inner) => inner.is_assertion(),
            _ => false,
        }
    }
}

#[cfg(feature = "playwright")]
impl From<playwright_rs::Error> for Error {
    fn from(err: playwright_rs::Error) -> Self {
        Error::Driver(err.to_string())
    }
}
