//! Redis-backed cache implementation.

use std::future::Future;
use std::time::Duration;

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, aio::ConnectionManager};
use tracing::{debug, info};

/// Redis cache for fast short code lookups.
///
/// Uses `ConnectionManager` for connection reuse and reconnects. Each call is
/// bounded by `op_timeout` so a slow backend cannot stall a request; errors
/// and timeouts are returned to the caller, which degrades to the store.
pub struct RedisCache {
    conn: ConnectionManager,
    key_prefix: String,
    op_timeout: Duration,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `op_timeout` - Upper bound for every GET/SET/PING
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, op_timeout: Duration) -> CacheResult<Self> {
        info!(timeout_ms = op_timeout.as_millis() as u64, "Connecting to Redis");

        let client = Client::open(redis_url).map_err(connection_error("invalid Redis URL"))?;
        let mut conn = ConnectionManager::new(client)
            .await
            .map_err(connection_error("Redis connection failed"))?;
        conn.ping::<()>()
            .await
            .map_err(connection_error("Redis PING failed"))?;

        info!("Connected to Redis");

        Ok(Self {
            conn,
            key_prefix: "url:".to_string(),
            op_timeout,
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, short_code: &str) -> String {
        format!("{}{}", self.key_prefix, short_code)
    }

    async fn bounded<T>(
        &self,
        op: impl Future<Output = Result<T, RedisError>>,
    ) -> CacheResult<T> {
        match tokio::time::timeout(self.op_timeout, op).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(CacheError::OperationError(e.to_string())),
            Err(_) => Err(CacheError::Timeout(self.op_timeout.as_millis() as u64)),
        }
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        let key = self.build_key(short_code);
        let mut conn = self.conn.clone();

        let cached = self.bounded(conn.get::<_, Option<String>>(&key)).await?;
        match &cached {
            Some(url) => debug!("Cache HIT: {} -> {}", short_code, url),
            None => debug!("Cache MISS: {}", short_code),
        }

        Ok(cached)
    }

    async fn set_url(&self, short_code: &str, original_url: &str) -> CacheResult<()> {
        let key = self.build_key(short_code);
        let mut conn = self.conn.clone();

        self.bounded(conn.set::<_, _, ()>(&key, original_url))
            .await?;
        debug!("Cache SET: {} -> {}", short_code, original_url);

        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        self.bounded(conn.ping::<()>()).await.is_ok()
    }
}

fn connection_error(context: &'static str) -> impl Fn(RedisError) -> CacheError {
    move |e| CacheError::ConnectionError(format!("{}: {}", context, e))
}
