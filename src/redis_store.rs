//! Redis-backed implementation of the [`Store`] contract.
//!
//! Mappings are Redis hashes: `set_field` is `HSET`, `get_field` is `HGET`
//! with nil mapped to `None`, and `get_all_fields` is `HGETALL`.

use std::collections::HashMap;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use crate::store::{Store, StoreError};

pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connects to the Redis instance at `url`, e.g. `redis://127.0.0.1:6379`.
    ///
    /// The connection manager multiplexes one connection and reconnects on
    /// failure; cloning it per command is cheap.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        StoreError::new(err.to_string())
    }
}

#[async_trait]
impl Store for RedisStore {
    async fn set_field(&self, map: &str, field: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let _: () = conn.hset(map, field, value).await?;
        Ok(())
    }

    async fn get_field(&self, map: &str, field: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.hget(map, field).await?;
        Ok(value)
    }

    async fn get_all_fields(&self, map: &str) -> Result<HashMap<String, String>, StoreError> {
        let mut conn = self.conn.clone();
        let fields: HashMap<String, String> = conn.hgetall(map).await?;
        Ok(fields)
    }
}
