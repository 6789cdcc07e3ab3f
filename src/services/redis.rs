//! Redis integration service implementation
//!
//! This service handles Redis connection setup and the caching utilities used
//! for Meetup API access tokens and external query results.

use redis::{AsyncCommands, Client};
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::config::settings::Settings;
use crate::utils::errors::{RaffleBuddyError, Result};

/// Redis service for caching
#[derive(Debug, Clone)]
pub struct RedisService {
    client: Client,
    settings: Settings,
}

impl RedisService {
    /// Create a new RedisService instance
    pub fn new(settings: Settings) -> Result<Self> {
        let client = Client::open(settings.redis.url.as_str())
            .map_err(RaffleBuddyError::Redis)?;

        Ok(Self { client, settings })
    }

    /// Get Redis connection
    async fn get_connection(&self) -> Result<redis::aio::Connection> {
        self.client.get_async_connection().await
            .map_err(RaffleBuddyError::Redis)
    }

    /// Set a value in Redis with TTL
    pub async fn set<T>(&self, key: &str, value: &T, ttl_seconds: Option<u64>) -> Result<()>
    where
        T: Serialize,
    {
        let mut conn = self.get_connection().await?;
        let serialized = serde_json::to_string(value)
            .map_err(RaffleBuddyError::Serialization)?;

        let full_key = format!("{}{}", self.settings.redis.prefix, key);
        let ttl = ttl_seconds.unwrap_or(self.settings.redis.ttl_seconds);

        let _: () = conn.set_ex(&full_key, serialized, ttl).await
            .map_err(RaffleBuddyError::Redis)?;

        debug!(key = %full_key, ttl = ttl, "Value set in Redis");
        Ok(())
    }

    /// Get a value from Redis
    pub async fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let mut conn = self.get_connection().await?;
        let full_key = format!("{}{}", self.settings.redis.prefix, key);

        let result: Option<String> = conn.get(&full_key).await
            .map_err(RaffleBuddyError::Redis)?;

        match result {
            Some(data) => {
                let deserialized = serde_json::from_str::<T>(&data)
                    .map_err(RaffleBuddyError::Serialization)?;
                debug!(key = %full_key, "Value retrieved from Redis");
                Ok(Some(deserialized))
            }
            None => {
                debug!(key = %full_key, "Key not found in Redis");
                Ok(None)
            }
        }
    }

    /// Delete a key from Redis
    pub async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let full_key = format!("{}{}", self.settings.redis.prefix, key);

        let deleted: i32 = conn.del(&full_key).await
            .map_err(RaffleBuddyError::Redis)?;

        debug!(key = %full_key, deleted = deleted > 0, "Key deletion attempted");
        Ok(deleted > 0)
    }

    /// Check if a key exists in Redis
    pub async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let full_key = format!("{}{}", self.settings.redis.prefix, key);

        let exists: bool = conn.exists(&full_key).await
            .map_err(RaffleBuddyError::Redis)?;

        Ok(exists)
    }

    /// Check Redis connectivity
    pub async fn health_check(&self) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await
            .map_err(RaffleBuddyError::Redis)?;

        Ok(pong == "PONG")
    }
}
