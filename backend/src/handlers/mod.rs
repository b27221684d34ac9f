//! HTTP handlers, one module per service

use axum::body::Bytes;
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

pub mod catalog;
pub mod health;
pub mod inventory;
pub mod orders;
pub mod purchases;
pub mod recipes;
pub mod reporting;
pub mod sub_inventory;
pub mod suppliers;

pub use catalog::*;
pub use health::*;
pub use inventory::*;
pub use orders::*;
pub use purchases::*;
pub use recipes::*;
pub use reporting::*;
pub use sub_inventory::*;
pub use suppliers::*;

/// Decode a body that may be left out; only an empty body counts as absent
pub(crate) fn optional_json<T: DeserializeOwned>(body: &Bytes) -> AppResult<Option<T>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| AppError::Validation {
            field: "body".to_string(),
            message: format!("Invalid request body: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::InnerStatus;

    #[derive(Debug, serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Target {
        inner_status: Option<InnerStatus>,
    }

    #[test]
    fn empty_body_is_absent() {
        assert!(optional_json::<Target>(&Bytes::from_static(b"")).unwrap().is_none());
        assert!(optional_json::<Target>(&Bytes::from_static(b" \n")).unwrap().is_none());
    }

    #[test]
    fn unknown_target_is_rejected() {
        let err = optional_json::<Target>(&Bytes::from_static(br#"{"innerStatus":"redy"}"#))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "body"));

        let parsed = optional_json::<Target>(&Bytes::from_static(br#"{"innerStatus":"ready"}"#))
            .unwrap()
            .unwrap();
        assert_eq!(parsed.inner_status, Some(InnerStatus::Ready));
    }
}
