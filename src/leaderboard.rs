//! Read access over every account's point total.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::accounts::{parse_points, USERS_MAP};
use crate::error::GameError;
use crate::store::Store;

/// Snapshot view over the account registry's point totals.
#[derive(Clone)]
pub struct Leaderboard {
    store: Arc<dyn Store>,
}

impl Leaderboard {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Returns every known account with its current points.
    ///
    /// No ranking is applied; the map is keyed by username (BTreeMap only
    /// for stable serialization) and ordering by score is left to callers.
    pub async fn snapshot(&self) -> Result<BTreeMap<String, i64>, GameError> {
        let fields = self.store.get_all_fields(USERS_MAP).await?;
        let mut board = BTreeMap::new();
        for (username, raw) in fields {
            let points = parse_points(&username, &raw)?;
            board.insert(username, points);
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::AccountRegistry;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn snapshot_of_empty_registry_is_empty() {
        let leaderboard = Leaderboard::new(Arc::new(MemoryStore::new()));
        let board = leaderboard.snapshot().await.expect("snapshot");
        assert!(board.is_empty());
    }

    #[tokio::test]
    async fn snapshot_reflects_registrations_and_updates() {
        let store = Arc::new(MemoryStore::new());
        let accounts = AccountRegistry::new(store.clone());
        let leaderboard = Leaderboard::new(store);

        accounts.register("alice").await.expect("register");
        accounts.register("bob").await.expect("register");
        accounts.update_score("alice", 42).await.expect("update");

        let board = leaderboard.snapshot().await.expect("snapshot");
        assert_eq!(board.len(), 2);
        assert_eq!(board.get("alice"), Some(&42));
        assert_eq!(board.get("bob"), Some(&0));
    }

    #[tokio::test]
    async fn corrupt_entry_fails_the_whole_snapshot() {
        let store = Arc::new(MemoryStore::new());
        store
            .set_field(USERS_MAP, "alice", "forty-two")
            .await
            .expect("seed");
        let leaderboard = Leaderboard::new(store);
        assert!(matches!(
            leaderboard.snapshot().await,
            Err(GameError::Store(_))
        ));
    }
}
