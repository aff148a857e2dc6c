use thiserror::Error;

/// Fallback shown when a transport failure carries no usable message.
pub const GENERIC_SUBMIT_FAILURE: &str = "Failed to customize resume. Please try again.";

/// Form-level error surfaced as a single inline message.
/// Every variant is recoverable: the next action overwrites it, nothing appends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please provide both resume and job description")]
    MissingInput,

    #[error("File size exceeds 5MB limit")]
    FileTooLarge,

    #[error("Request failed with status {0}")]
    Request(u16),

    #[error("{0}")]
    Transport(String),
}

impl FormError {
    /// Wraps a transport failure's message, falling back to a generic line
    /// when the underlying error has nothing to say.
    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            FormError::Transport(GENERIC_SUBMIT_FAILURE.to_string())
        } else {
            FormError::Transport(message)
        }
    }
}
