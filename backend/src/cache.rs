//! Short-lived query cache in front of the remote API
//!
//! Reads are cached per staff token and request path. A successful mutation
//! invalidates every cached read of the resource family it touched, so the
//! next read refetches.

use std::time::Duration;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use moka::future::Cache;
use sha2::{Digest, Sha256};

use crate::config::CacheConfig;

#[derive(Clone)]
pub struct QueryCache {
    inner: Cache<String, serde_json::Value>,
}

impl QueryCache {
    pub fn new(config: &CacheConfig) -> Self {
        let inner = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(Duration::from_secs(config.ttl_secs))
            .build();
        Self { inner }
    }

    /// Cache key: token digest, then the path with its query string
    pub fn key(token: &str, path: &str, query: &[(&str, String)]) -> String {
        let digest = URL_SAFE_NO_PAD.encode(Sha256::digest(token.as_bytes()));
        let mut key = format!("{}|{}", digest, path.trim_matches('/'));
        if !query.is_empty() {
            let pairs: Vec<String> = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            key.push('?');
            key.push_str(&pairs.join("&"));
        }
        key
    }

    pub async fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.inner.get(key).await
    }

    pub async fn insert(&self, key: String, value: serde_json::Value) {
        self.inner.insert(key, value).await;
    }

    /// Drop every cached read whose path is `family` or nested below it
    pub async fn invalidate_family(&self, family: &str) {
        let family = family.trim_matches('/');
        let stale: Vec<String> = self
            .inner
            .iter()
            .filter(|(key, _)| {
                key.split_once('|')
                    .map(|(_, path)| belongs_to(path, family))
                    .unwrap_or(false)
            })
            .map(|(key, _)| key.as_ref().clone())
            .collect();

        tracing::debug!("Invalidating {} cached reads of '{}'", stale.len(), family);
        for key in stale {
            self.inner.invalidate(&key).await;
        }
    }
}

/// `path` is `family` itself or nested below it
fn belongs_to(path: &str, family: &str) -> bool {
    match path.strip_prefix(family) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

/// Resource family of a request path (its first segment)
pub fn family_of(path: &str) -> &str {
    let path = path.trim_start_matches('/');
    let end = path.find(|c: char| c == '/' || c == '?').unwrap_or(path.len());
    &path[..end]
}
