mod redis_store;

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use redis_store::RedisCacheStore;

pub const DEFAULT_LEADERBOARD_TTL: Duration = Duration::from_secs(5);

#[derive(Clone, Debug)]
enum CacheBackend {
    /// No cache configured; every read falls through to the database.
    Disabled,
    Redis(RedisCacheStore),
}

/// Optional read-through cache in front of the leaderboard scan.
///
/// Cache failures never surface to callers; the store logs them and falls
/// back to the database.
#[derive(Clone, Debug)]
pub struct CacheService {
    key_prefix: String,
    leaderboard_ttl: Duration,
    backend: CacheBackend,
}

impl CacheService {
    pub fn disabled(prefix: impl Into<String>) -> Self {
        Self {
            key_prefix: prefix.into(),
            leaderboard_ttl: DEFAULT_LEADERBOARD_TTL,
            backend: CacheBackend::Disabled,
        }
    }

    pub fn redis(redis_url: &str, prefix: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            key_prefix: prefix.into(),
            leaderboard_ttl: DEFAULT_LEADERBOARD_TTL,
            backend: CacheBackend::Redis(RedisCacheStore::from_url(redis_url)?),
        })
    }

    pub fn is_redis_enabled(&self) -> bool {
        matches!(self.backend, CacheBackend::Redis(_))
    }

    pub fn configure_leaderboard_ttl(&mut self, ttl: Duration) {
        self.leaderboard_ttl = ttl;
    }

    pub fn leaderboard_ttl(&self) -> Duration {
        self.leaderboard_ttl
    }

    pub fn key(&self, suffix: impl AsRef<str>) -> String {
        format!("{}:{}", self.key_prefix, suffix.as_ref())
    }

    /// Round-trip health check against the backend; a no-op when disabled.
    pub async fn ping(&self) -> anyhow::Result<()> {
        match &self.backend {
            CacheBackend::Disabled => Ok(()),
            CacheBackend::Redis(store) => store.ping().await,
        }
    }

    pub async fn get_json<T>(&self, key: &str) -> anyhow::Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let value = match &self.backend {
            CacheBackend::Disabled => None,
            CacheBackend::Redis(store) => store.get(key).await?,
        };

        match value {
            Some(bytes) => {
                let parsed = serde_json::from_slice(&bytes).map_err(|e| {
                    anyhow::anyhow!("failed to deserialize cache value for `{key}`: {e}")
                })?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    pub async fn set_json<T>(&self, key: &str, value: &T, ttl: Duration) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        let ttl_seconds = ttl.as_secs().max(1);
        let payload = serde_json::to_vec(value)
            .map_err(|e| anyhow::anyhow!("failed to serialize cache value for `{key}`: {e}"))?;

        match &self.backend {
            CacheBackend::Disabled => Ok(()),
            CacheBackend::Redis(store) => store.set(key, payload, ttl_seconds).await,
        }
    }

    pub async fn del(&self, key: &str) -> anyhow::Result<()> {
        match &self.backend {
            CacheBackend::Disabled => Ok(()),
            CacheBackend::Redis(store) => store.del(key).await,
        }
    }
}
