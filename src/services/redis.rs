//! Redis-backed storage for refresh tokens

use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Server-side record of live refresh tokens.
///
/// Tokens are stored raw (unsigned) and map to the employee they were issued to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Remember a refresh token for `ttl_secs` seconds
    async fn save(&self, token: &str, employee_id: Uuid, ttl_secs: u64) -> AppResult<()>;

    /// Atomically read and delete a refresh token
    async fn take(&self, token: &str) -> AppResult<Option<Uuid>>;

    /// Forget a refresh token
    async fn revoke(&self, token: &str) -> AppResult<()>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> AppResult<()>;
}

#[derive(Clone)]
pub struct RedisService {
    client: Client,
}

impl RedisService {
    /// Create a new Redis service and verify the connection
    pub async fn new(url: &str) -> AppResult<Self> {
        let service = Self::open(url)?;
        service.ping().await?;
        Ok(service)
    }

    /// Create a Redis service without connecting; connections are opened on first use
    pub fn open(url: &str) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;
        Ok(Self { client })
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))
    }

    fn key(token: &str) -> String {
        format!("refresh:{}", token)
    }
}

#[async_trait]
impl RefreshTokenStore for RedisService {
    async fn save(&self, token: &str, employee_id: Uuid, ttl_secs: u64) -> AppResult<()> {
        let mut conn = self.connection().await?;

        conn.set_ex::<_, _, ()>(Self::key(token), employee_id.to_string(), ttl_secs)
            .await
            .map_err(|e| AppError::Internal(format!("unable to save refresh token: {}", e)))?;

        Ok(())
    }

    async fn take(&self, token: &str) -> AppResult<Option<Uuid>> {
        let mut conn = self.connection().await?;

        let stored: Option<String> = redis::cmd("GETDEL")
            .arg(Self::key(token))
            .query_async(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("unable to read refresh token: {}", e)))?;

        match stored {
            Some(value) => match Uuid::parse_str(&value) {
                Ok(id) => Ok(Some(id)),
                Err(_) => {
                    tracing::warn!("Discarding refresh token with malformed owner");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    async fn revoke(&self, token: &str) -> AppResult<()> {
        let mut conn = self.connection().await?;

        conn.del::<_, ()>(Self::key(token))
            .await
            .map_err(|e| AppError::Internal(format!("unable to revoke refresh token: {}", e)))?;

        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection().await?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Unavailable(format!("Redis connection test failed: {}", e)))?;

        Ok(())
    }
}
