//! Staff token pass-through
//!
//! The dashboard does not manage sessions. The browser sends the staff
//! `token` header it got from `auth/staff` login and the gateway forwards it
//! unchanged to the remote API, which decides what the staff member may do.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

/// Name of the header carrying the staff token
pub const TOKEN_HEADER: &str = "token";

/// Staff token extracted from the incoming request
#[derive(Clone)]
pub struct StaffToken(String);

impl StaffToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for StaffToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaffToken(***)")
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for StaffToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(TOKEN_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(StaffToken::new)
            .ok_or(AppError::MissingToken)
    }
}
