//! Failure kinds shared by every game operation.

use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by the account, deck, and leaderboard operations.
///
/// Each operation performs a single attempt; nothing here is retried
/// internally. "No session" and "session exhausted" are distinct kinds so
/// callers can tell a missing game apart from an empty one.
#[derive(Debug, Error)]
pub enum GameError {
    /// A required field was missing or malformed.
    #[error("{0}")]
    InvalidInput(&'static str),
    /// The referenced account or game session does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// The session exists but has no cards left to draw.
    #[error("no cards left")]
    EmptyDeck,
    /// The external store returned an unexpected error.
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

pub(crate) fn require_username(username: &str) -> Result<(), GameError> {
    if username.is_empty() {
        return Err(GameError::InvalidInput("username is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_username_is_invalid_input() {
        assert!(matches!(
            require_username(""),
            Err(GameError::InvalidInput(_))
        ));
        assert!(require_username("alice").is_ok());
    }
}
