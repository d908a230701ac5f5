//! Error types for the subword BPE library.

use thiserror::Error;

/// Main error type for the tokenizer library.
///
/// Most conditions in BPE are not errors at all: an empty word, an early stop
/// in training, or an unseen character during encoding all return ordinary
/// results. Only malformed caller input ends up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizerError {
    /// Caller input violated a precondition (e.g. a negative merge budget)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unknown token ID
    #[error("Unknown token ID: {0}")]
    UnknownTokenId(u32),

    /// Unknown token string
    #[error("Unknown token: {0}")]
    UnknownToken(String),
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = TokenizerError::InvalidInput("max merges must be non-negative, got -1".into());
        assert_eq!(
            err.to_string(),
            "Invalid input: max merges must be non-negative, got -1"
        );
        assert_eq!(
            TokenizerError::UnknownTokenId(7).to_string(),
            "Unknown token ID: 7"
        );
    }
}
