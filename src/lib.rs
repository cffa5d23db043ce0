//! Minimal multiplayer card-game backend over a flat key-value store.
//!
//! Players register and log in by username, start a game to receive a fixed
//! five-card deck, draw cards one at a time, and appear on a points-based
//! leaderboard. All state lives in the external store as two flat hash
//! mappings: `"users"` (username to points) and `"games"` (username to the
//! comma-delimited remaining deck). Each module focuses on a concrete
//! responsibility:
//!
//! - [`store`] defines the key-value capability the core depends on, plus an
//!   in-process implementation for tests and local runs.
//! - [`redis_store`] backs the same capability with Redis hashes.
//! - [`accounts`] tracks known usernames and their point totals.
//! - [`deck`] owns the per-player deck session and the draw operation.
//! - [`leaderboard`] exposes the point totals as a snapshot.
//! - [`http`] maps the HTTP routes onto the components above.
//! - [`cli`] parses the command-line interface for the server binary.
//!
//! Integration tests boot the real router over the in-memory store and
//! exercise the full HTTP surface.

pub mod accounts;
pub mod cli;
pub mod deck;
pub mod error;
pub mod http;
pub mod leaderboard;
pub mod redis_store;
pub mod store;
