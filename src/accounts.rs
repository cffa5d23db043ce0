//! Account registration, login, and score updates.
//!
//! Accounts are fields of the `"users"` mapping: the username keyed to its
//! integer point total, stored in decimal form. Registration is destructive,
//! not merge-on-exists: registering an existing username resets its points
//! to zero.

use std::sync::Arc;

use crate::error::{require_username, GameError};
use crate::store::{Store, StoreError};

pub const USERS_MAP: &str = "users";

/// Tracks the set of known usernames and their point totals.
#[derive(Clone)]
pub struct AccountRegistry {
    store: Arc<dyn Store>,
}

impl AccountRegistry {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Creates the account with zero points, overwriting any existing total.
    pub async fn register(&self, username: &str) -> Result<(), GameError> {
        require_username(username)?;
        self.store.set_field(USERS_MAP, username, "0").await?;
        Ok(())
    }

    /// Returns the current point total for a registered username.
    pub async fn login(&self, username: &str) -> Result<i64, GameError> {
        require_username(username)?;
        let raw = self
            .store
            .get_field(USERS_MAP, username)
            .await?
            .ok_or(GameError::NotFound("user"))?;
        parse_points(username, &raw)
    }

    /// Overwrites the stored point total. Does not add to it.
    ///
    /// No existence check: an unknown username is created with the given
    /// score. The leaderboard update route deliberately works as an upsert.
    pub async fn update_score(&self, username: &str, points: i64) -> Result<(), GameError> {
        require_username(username)?;
        self.store
            .set_field(USERS_MAP, username, &points.to_string())
            .await?;
        Ok(())
    }
}

/// Parses a stored point total.
///
/// The registry only ever writes decimal integers, so a value that fails to
/// parse means the stored data is corrupt; that is a store failure, not a
/// caller error.
pub(crate) fn parse_points(username: &str, raw: &str) -> Result<i64, GameError> {
    raw.parse().map_err(|_| {
        GameError::Store(StoreError::new(format!(
            "corrupt points value for '{username}': {raw:?}"
        )))
    })
}
