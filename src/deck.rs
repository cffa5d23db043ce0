//! Per-player deck sessions and the draw operation.
//!
//! A session is one field in the `"games"` mapping: the username keyed to
//! the remaining deck, encoded as comma-separated card names with the front
//! of the deck first. A session with zero cards is a valid terminal state
//! and stays in the store as an empty string; it is not the same thing as a
//! missing session, and the two report different errors.

use std::sync::Arc;

use crate::error::{require_username, GameError};
use crate::store::Store;

pub const GAMES_MAP: &str = "games";

/// The fixed deck every new game starts with, in draw order.
///
/// The order is deterministic; no shuffle is applied. Card names must not
/// contain the encoding delimiter.
pub const STARTING_DECK: [&str; 5] = ["Cat", "Defuse", "Shuffle", "ExplodingKitten", "Cat"];

/// Encodes a deck for storage, front card first.
pub fn encode_deck(cards: &[String]) -> String {
    cards.join(",")
}

/// Decodes a stored deck. The empty string is the empty deck, so an
/// exhausted session stays distinguishable from a missing field.
pub fn decode_deck(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(str::to_string).collect()
}

/// Owns the deck state machine for every player, one session per username.
#[derive(Clone)]
pub struct DeckSessions {
    store: Arc<dyn Store>,
}

impl DeckSessions {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Starts (or restarts) the session for `username` with the fixed deck.
    ///
    /// Unconditional: any prior session for the username is overwritten,
    /// whatever state it was in.
    pub async fn start(&self, username: &str) -> Result<(), GameError> {
        require_username(username)?;
        let deck: Vec<String> = STARTING_DECK.iter().map(|card| card.to_string()).collect();
        self.store
            .set_field(GAMES_MAP, username, &encode_deck(&deck))
            .await?;
        Ok(())
    }

    /// Removes and returns the front card of the session's deck.
    ///
    /// Fails with `NotFound` when no session exists and with `EmptyDeck`
    /// when the session is exhausted. The remaining deck is persisted before
    /// the card is returned, so a write failure leaves the stored deck
    /// unchanged and the card undrawn.
    ///
    /// This is a non-atomic read-then-write: two concurrent draws for the
    /// same username can observe the same front card or lose an update.
    pub async fn draw(&self, username: &str) -> Result<String, GameError> {
        require_username(username)?;
        let raw = self
            .store
            .get_field(GAMES_MAP, username)
            .await?
            .ok_or(GameError::NotFound("game"))?;

        let mut cards = decode_deck(&raw);
        if cards.is_empty() {
            return Err(GameError::EmptyDeck);
        }

        let card = cards.remove(0);
        self.store
            .set_field(GAMES_MAP, username, &encode_deck(&cards))
            .await?;
        Ok(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn sessions() -> DeckSessions {
        DeckSessions::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn empty_deck_encodes_as_empty_string() {
        assert_eq!(encode_deck(&[]), "");
        assert!(decode_deck("").is_empty());
    }

    #[test]
    fn deck_encoding_round_trips_in_order() {
        let deck: Vec<String> = STARTING_DECK.iter().map(|c| c.to_string()).collect();
        let encoded = encode_deck(&deck);
        assert_eq!(encoded, "Cat,Defuse,Shuffle,ExplodingKitten,Cat");
        assert_eq!(decode_deck(&encoded), deck);
    }

    #[tokio::test]
    async fn start_requires_username() {
        let sessions = sessions();
        let result = sessions.start("").await;
        assert!(matches!(result, Err(GameError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn draw_without_session_is_not_found() {
        let sessions = sessions();
        let result = sessions.draw("alice").await;
        assert!(matches!(result, Err(GameError::NotFound(_))));
    }

    #[tokio::test]
    async fn draws_return_the_fixed_deck_in_order_then_empty() {
        let sessions = sessions();
        sessions.start("alice").await.expect("start");

        for expected in STARTING_DECK {
            let card = sessions.draw("alice").await.expect("draw");
            assert_eq!(card, expected);
        }

        // The exhausted session stays around; it does not become "not found".
        let result = sessions.draw("alice").await;
        assert!(matches!(result, Err(GameError::EmptyDeck)));
    }

    #[tokio::test]
    async fn restart_resets_a_partially_drawn_deck() {
        let sessions = sessions();
        sessions.start("alice").await.expect("start");
        sessions.draw("alice").await.expect("draw");
        sessions.draw("alice").await.expect("draw");

        sessions.start("alice").await.expect("restart");
        let card = sessions.draw("alice").await.expect("draw");
        assert_eq!(card, STARTING_DECK[0]);
    }

    #[tokio::test]
    async fn sessions_are_independent_per_username() {
        let sessions = sessions();
        sessions.start("alice").await.expect("start");

        assert!(matches!(
            sessions.draw("bob").await,
            Err(GameError::NotFound(_))
        ));
        sessions.draw("alice").await.expect("alice still has cards");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_draws_may_race_but_never_over_drain() {
        let store = Arc::new(MemoryStore::new());
        let sessions = DeckSessions::new(store.clone());
        sessions.start("alice").await.expect("start");

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let sessions = sessions.clone();
            tasks.push(tokio::spawn(async move { sessions.draw("alice").await }));
        }

        let mut drawn = 0;
        for task in tasks {
            match task.await.expect("task") {
                Ok(card) => {
                    assert!(STARTING_DECK.contains(&card.as_str()));
                    drawn += 1;
                }
                // The session exists throughout, so the only acceptable
                // failure is an exhausted deck.
                Err(GameError::EmptyDeck) => {}
                Err(other) => panic!("unexpected draw failure: {other}"),
            }
        }

        // Racing draws may duplicate a card or lose an update, but at least
        // one must succeed and the stored deck can never go negative.
        assert!(drawn >= 1);
        assert!(drawn <= 8);
        let raw = store
            .get_field(GAMES_MAP, "alice")
            .await
            .expect("get")
            .expect("session still present");
        assert!(decode_deck(&raw).len() <= STARTING_DECK.len() - 1);
    }
}
