use redis::aio::ConnectionManager;
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Explore feeds that are cached, each with its own freshness window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    /// Per-user personalised feed, shortest lived
    Featured,
    Popular,
    /// Category histogram, changes slowly
    Categories,
}

/// Time-to-live per feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedTtls {
    pub featured: Duration,
    pub popular: Duration,
    pub categories: Duration,
}

impl FeedTtls {
    pub fn from_secs(featured: u64, popular: u64, categories: u64) -> Self {
        Self {
            featured: Duration::from_secs(featured),
            popular: Duration::from_secs(popular),
            categories: Duration::from_secs(categories),
        }
    }

    pub fn ttl(&self, feed: Feed) -> Duration {
        match feed {
            Feed::Featured => self.featured,
            Feed::Popular => self.popular,
            Feed::Categories => self.categories,
        }
    }
}

impl Default for FeedTtls {
    fn default() -> Self {
        Self::from_secs(30, 120, 300)
    }
}

/// Cache key for one feed variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedKey {
    feed: Feed,
    key: String,
}

impl FeedKey {
    /// Featured feed for a user (or the anonymous feed)
    pub fn featured(user_id: Option<&str>, limit: usize) -> Self {
        Self {
            feed: Feed::Featured,
            key: format!("featured:{}:{}", user_id.unwrap_or("anonymous"), limit),
        }
    }

    /// Popular feed, optionally scoped to a country
    pub fn popular(country: Option<&str>, limit: usize) -> Self {
        let country = country
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "all".to_string());
        Self {
            feed: Feed::Popular,
            key: format!("popular:{}:{}", country, limit),
        }
    }

    pub fn category_counts() -> Self {
        Self {
            feed: Feed::Categories,
            key: "categories:counts".to_string(),
        }
    }

    pub fn feed(&self) -> Feed {
        self.feed
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }
}

#[derive(Clone)]
struct CachedFeed {
    json: Arc<str>,
    ttl: Duration,
}

/// Expires each L1 entry after the TTL of the feed it belongs to
struct FeedExpiry;

impl moka::Expiry<String, CachedFeed> for FeedExpiry {
    fn expire_after_create(&self, _key: &String, value: &CachedFeed, _created_at: Instant) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Two-level cache for the explore feeds
///
/// L1 is an in-process moka cache, L2 is Redis shared across instances.
/// Without Redis the manager runs on L1 alone.
pub struct CacheManager {
    redis: Option<Arc<Mutex<ConnectionManager>>>,
    local: moka::future::Cache<String, CachedFeed>,
    ttls: FeedTtls,
}

impl CacheManager {
    /// Connect to Redis and build the L1 tier
    pub async fn connect(redis_url: &str, l1_size: u64, ttls: FeedTtls) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        let mut cache = Self::in_memory(l1_size, ttls);
        cache.redis = Some(Arc::new(Mutex::new(redis)));
        Ok(cache)
    }

    /// Process-local cache with no Redis tier
    pub fn in_memory(l1_size: u64, ttls: FeedTtls) -> Self {
        let local = moka::future::Cache::builder()
            .max_capacity(l1_size)
            .expire_after(FeedExpiry)
            .build();

        Self { redis: None, local, ttls }
    }

    pub fn ttls(&self) -> FeedTtls {
        self.ttls
    }

    pub fn is_shared(&self) -> bool {
        self.redis.is_some()
    }

    /// Look a feed up, L1 first, then L2
    pub async fn lookup<T: DeserializeOwned>(&self, key: &FeedKey) -> Result<Option<T>, CacheError> {
        if let Some(entry) = self.local.get(key.as_str()).await {
            tracing::trace!("L1 cache hit: {}", key.as_str());
            return Ok(Some(serde_json::from_str(&entry.json)?));
        }

        let Some(redis) = &self.redis else {
            return Ok(None);
        };

        let value: Option<String> = {
            let mut conn = redis.lock().await;
            redis::cmd("GET").arg(key.as_str()).query_async(&mut *conn).await?
        };

        match value {
            Some(json) => {
                tracing::trace!("L2 cache hit: {}", key.as_str());
                let parsed = serde_json::from_str(&json)?;
                self.insert_local(key, json.into()).await;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Store a feed in both tiers under its feed TTL
    pub async fn store<T: Serialize>(&self, key: &FeedKey, value: &T) -> Result<(), CacheError> {
        let json: Arc<str> = serde_json::to_string(value)?.into();
        self.insert_local(key, json.clone()).await;

        if let Some(redis) = &self.redis {
            let ttl_secs = self.ttls.ttl(key.feed()).as_secs().max(1);
            let mut conn = redis.lock().await;
            redis::cmd("SETEX")
                .arg(key.as_str())
                .arg(ttl_secs)
                .arg(&*json)
                .query_async::<()>(&mut *conn)
                .await?;
        }

        tracing::trace!("Cache set: {}", key.as_str());
        Ok(())
    }

    /// Serve a cached feed or compute and cache it
    ///
    /// Cache failures are logged and fall through to `compute`. Errors from
    /// `compute` are returned as-is and never cached.
    pub async fn get_or_compute<T, E, F, Fut>(&self, key: &FeedKey, compute: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match self.lookup(key).await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => tracing::trace!("Cache miss: {}", key.as_str()),
            Err(e) => tracing::warn!("Cache lookup failed for {}: {}", key.as_str(), e),
        }

        let value = compute().await?;

        if let Err(e) = self.store(key, &value).await {
            tracing::warn!("Failed to cache {}: {}", key.as_str(), e);
        }

        Ok(value)
    }

    async fn insert_local(&self, key: &FeedKey, json: Arc<str>) {
        let entry = CachedFeed {
            json,
            ttl: self.ttls.ttl(key.feed()),
        };
        self.local.insert(key.as_str().to_string(), entry).await;
    }
}
