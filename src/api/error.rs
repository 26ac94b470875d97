//! Typed API errors and the normalization boundary
//!
//! Every failure that reaches UI code is an [`ApiError`]; raw transport
//! errors never cross [`normalize`]. Callers branch on `code` alone and
//! never have to distinguish "network down" from "malformed body" from
//! "well-formed application error".

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Error codes the client recognizes specially. The taxonomy is
/// open-ended; server-defined codes pass through untouched.
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";
}

/// Structured failure returned by the WhenWorks API
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub details: Option<Value>,
}

impl ApiError {
    /// Fallback for failures that do not carry a structured error body.
    pub fn unknown() -> Self {
        Self {
            code: codes::UNKNOWN_ERROR.to_string(),
            message: "An unknown error occurred".to_string(),
            details: None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code == codes::UNAUTHORIZED
    }
}

/// Collapse a failure payload into an [`ApiError`].
///
/// Bodies that structurally match the error shape (`code`, `message` and
/// `details` all present) pass through verbatim; everything else becomes
/// the `UNKNOWN_ERROR` fallback.
pub fn normalize(body: Value) -> ApiError {
    let has_shape = body
        .as_object()
        .map(|obj| {
            obj.contains_key("code") && obj.contains_key("message") && obj.contains_key("details")
        })
        .unwrap_or(false);

    if !has_shape {
        tracing::warn!("failure payload is not a structured error, synthesizing fallback");
        return ApiError::unknown();
    }

    serde_json::from_value(body).unwrap_or_else(|_| ApiError::unknown())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structured_error_passes_through_unchanged() {
        let error = normalize(json!({
            "code": "INVALID_CREDENTIALS",
            "message": "invalid username or password",
            "details": null
        }));

        assert_eq!(error.code, "INVALID_CREDENTIALS");
        assert_eq!(error.message, "invalid username or password");
        assert_eq!(error.details, None);
    }

    #[test]
    fn test_details_payload_is_preserved() {
        let error = normalize(json!({
            "code": "VALIDATION_FAILED",
            "message": "validation failed",
            "details": {"username": "must be at least 3 characters"}
        }));

        assert_eq!(error.code, "VALIDATION_FAILED");
        assert_eq!(
            error.details,
            Some(json!({"username": "must be at least 3 characters"}))
        );
    }

    #[test]
    fn test_partial_shape_becomes_fallback() {
        // `details` missing: not the error shape, even though it looks close
        let error = normalize(json!({
            "code": "SOMETHING",
            "message": "half an error"
        }));

        assert_eq!(error, ApiError::unknown());
    }

    #[test]
    fn test_non_object_body_becomes_fallback() {
        assert_eq!(normalize(json!("boom")), ApiError::unknown());
        assert_eq!(normalize(json!(null)), ApiError::unknown());
        assert_eq!(normalize(json!([1, 2, 3])), ApiError::unknown());
    }

    #[test]
    fn test_fallback_shape() {
        let error = ApiError::unknown();
        assert_eq!(error.code, codes::UNKNOWN_ERROR);
        assert_eq!(error.message, "An unknown error occurred");
        assert_eq!(error.details, None);
    }
}
