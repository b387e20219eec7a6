//! Upstream API credential access.
//!
//! Ingestion of match data lives in a separate service, but backfill tooling
//! in this crate occasionally talks to the Riot API directly. All such access
//! goes through the [`CredentialProvider`] seam so tests can substitute a
//! fixed key and the cached provider can be invalidated after a 401/403.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

/// Errors raised while resolving an API credential.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("no API key configured; set RIFT_RIOT_API_KEY")]
    Missing,
}

/// Source of the upstream API key.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Resolve the current API key.
    async fn api_key(&self) -> Result<String, CredentialError>;

    /// Drop any cached credential so the next call re-resolves it.
    async fn invalidate(&self);
}

/// Provider backed by a statically configured key.
pub struct StaticCredentialProvider {
    key: Option<String>,
}

impl StaticCredentialProvider {
    pub fn new(key: Option<String>) -> Self {
        Self { key }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn api_key(&self) -> Result<String, CredentialError> {
        self.key.clone().ok_or(CredentialError::Missing)
    }

    async fn invalidate(&self) {}
}

/// Caches the inner provider's key for a bounded TTL.
pub struct CachedCredentialProvider {
    inner: Arc<dyn CredentialProvider>,
    ttl: Duration,
    cached: RwLock<Option<(String, Instant)>>,
}

impl CachedCredentialProvider {
    pub fn new(inner: Arc<dyn CredentialProvider>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cached: RwLock::new(None),
        }
    }
}

#[async_trait]
impl CredentialProvider for CachedCredentialProvider {
    async fn api_key(&self) -> Result<String, CredentialError> {
        {
            let cached = self.cached.read().await;
            if let Some((key, fetched_at)) = cached.as_ref() {
                if fetched_at.elapsed() < self.ttl {
                    return Ok(key.clone());
                }
            }
        }

        let key = self.inner.api_key().await?;
        let mut cached = self.cached.write().await;
        *cached = Some((key.clone(), Instant::now()));
        Ok(key)
    }

    async fn invalidate(&self) {
        debug!("invalidating cached API credential");
        let mut cached = self.cached.write().await;
        *cached = None;
    }
}
