//! HTTP client for the remote back-office REST API
//!
//! Every call carries the staff `token` header. Reads go through the query
//! cache; mutations invalidate the cached reads of the family they touched.

use std::time::Duration;

use axum::http::StatusCode;
use reqwest::{Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use shared::{ApiList, Page};

use crate::cache::{family_of, QueryCache};
use crate::config::ApiConfig;
use crate::error::{AppError, AppResult, FALLBACK_MESSAGE};
use crate::middleware::{StaffToken, TOKEN_HEADER};

/// Back-office API client
#[derive(Clone)]
pub struct BackofficeApi {
    client: Client,
    base_url: String,
    cache: QueryCache,
}

/// Page size used when a view needs every row of a list
const FULL_LIST_PAGE_SIZE: u32 = 100;

/// Upper bound on pages walked for one full list
const FULL_LIST_MAX_PAGES: u32 = 500;

/// Error body shape of the remote API
#[derive(serde::Deserialize)]
struct UpstreamErrorBody {
    message: Option<String>,
}

impl BackofficeApi {
    /// Create a new client from configuration
    pub fn new(config: &ApiConfig, cache: QueryCache) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cache,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Cached GET
    pub async fn get<T: DeserializeOwned>(
        &self,
        token: &StaffToken,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let key = QueryCache::key(token.as_str(), path, query);
        if let Some(hit) = self.cache.get(&key).await {
            tracing::debug!("cache hit GET {}", path);
            return decode(hit);
        }

        let value: serde_json::Value = self
            .execute(token, Method::GET, path, query, None::<&()>)
            .await?;
        self.cache.insert(key, value.clone()).await;
        decode(value)
    }

    /// Uncached GET for reads that gate a mutation; refreshes the cached copy
    pub async fn get_fresh<T: DeserializeOwned>(&self, token: &StaffToken, path: &str) -> AppResult<T> {
        let value: serde_json::Value = self
            .execute(token, Method::GET, path, &[], None::<&()>)
            .await?;
        self.cache
            .insert(QueryCache::key(token.as_str(), path, &[]), value.clone())
            .await;
        decode(value)
    }

    /// Every row of a list, following the remote pagination page by page
    ///
    /// `page` and `limit` in `query` are replaced. Unpaginated list shapes are
    /// returned as they come.
    pub async fn get_all<T: DeserializeOwned>(
        &self,
        token: &StaffToken,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<Vec<T>> {
        let mut rows = Vec::new();
        let mut page = 1;
        loop {
            let mut pairs: Vec<(&str, String)> = query
                .iter()
                .filter(|(key, _)| *key != "page" && *key != "limit")
                .cloned()
                .collect();
            pairs.push(("page", page.to_string()));
            pairs.push(("limit", FULL_LIST_PAGE_SIZE.to_string()));

            let list: ApiList<T> = self.get(token, path, &pairs).await?;
            let Page { data, pagination } = list.into_page();
            let fetched = data.len();
            rows.extend(data);

            let Some(meta) = pagination else { break };
            if page >= meta.total_pages || fetched == 0 {
                break;
            }
            if page >= FULL_LIST_MAX_PAGES {
                tracing::warn!(
                    "Stopped reading {} after {} pages ({} of {} rows)",
                    path,
                    page,
                    rows.len(),
                    meta.total
                );
                break;
            }
            page += 1;
        }
        Ok(rows)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        token: &StaffToken,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        self.mutate(token, Method::POST, path, Some(body)).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        token: &StaffToken,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        self.mutate(token, Method::PUT, path, Some(body)).await
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        token: &StaffToken,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        self.mutate(token, Method::PATCH, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, token: &StaffToken, path: &str) -> AppResult<T> {
        self.mutate(token, Method::DELETE, path, None::<&()>).await
    }

    /// Whether the remote API answers at all; any HTTP status counts
    pub async fn ping(&self) -> bool {
        match self.client.get(&self.base_url).send().await {
            Ok(response) => {
                tracing::debug!("ping -> {}", response.status().as_u16());
                true
            }
            Err(e) => {
                tracing::warn!("Back-office API unreachable: {}", e);
                false
            }
        }
    }

    /// Drop cached reads of another family touched as a side effect
    pub async fn invalidate(&self, family: &str) {
        self.cache.invalidate_family(family).await;
    }

    async fn mutate<B: Serialize, T: DeserializeOwned>(
        &self,
        token: &StaffToken,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> AppResult<T> {
        let value = self.execute(token, method, path, &[], body).await?;
        self.cache.invalidate_family(family_of(path)).await;
        decode(value)
    }

    async fn execute<B: Serialize>(
        &self,
        token: &StaffToken,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> AppResult<serde_json::Value> {
        let mut request = self
            .client
            .request(method.clone(), self.url(path))
            .header(TOKEN_HEADER, token.as_str());
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("{} {} failed: {}", method, path, e);
            AppError::UpstreamUnavailable(e.to_string())
        })?;

        let status = response.status();
        tracing::debug!("{} {} -> {}", method, path, status.as_u16());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(e.to_string()))?;

        if !status.is_success() {
            return Err(upstream_error(status.as_u16(), &bytes));
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| {
            AppError::UpstreamDecode(format!("{} {}: {}", method, path, e))
        })
    }
}

/// An id checked to stay within one path segment of the remote URL
pub fn segment(id: &str) -> AppResult<&str> {
    let id = id.trim();
    let escapes = id.is_empty()
        || id == "."
        || id == ".."
        || id.contains(|c: char| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace());
    if escapes {
        return Err(AppError::Validation {
            field: "id".to_string(),
            message: "Invalid identifier".to_string(),
        });
    }
    Ok(id)
}

/// Build the error for a non-2xx response, keeping the API's own message
pub fn upstream_error(status: u16, body: &[u8]) -> AppError {
    let message = serde_json::from_slice::<UpstreamErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());

    // Server-side failures of the remote API are a bad gateway from our side
    let status = StatusCode::from_u16(status)
        .ok()
        .filter(StatusCode::is_client_error)
        .unwrap_or(StatusCode::BAD_GATEWAY);
    AppError::Upstream { status, message }
}

fn decode<T: DeserializeOwned>(value: serde_json::Value) -> AppResult<T> {
    serde_json::from_value(value).map_err(|e| AppError::UpstreamDecode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surfaces_upstream_message() {
        let err = upstream_error(400, br#"{"message":"Table is occupied"}"#);
        match err {
            AppError::Upstream { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "Table is occupied");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn segments_cannot_leave_their_place() {
        assert_eq!(segment("665f1c2e9b").unwrap(), "665f1c2e9b");
        for bad in ["", "..", "a/../x", "a?b=1", "a#b", "a%2Fb", "a\\b", "a b"] {
            assert!(segment(bad).is_err(), "{:?} accepted", bad);
        }
    }

    #[test]
    fn falls_back_on_unreadable_body() {
        let err = upstream_error(500, b"<html>oops</html>");
        match err {
            AppError::Upstream { status, message } => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert_eq!(message, FALLBACK_MESSAGE);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
