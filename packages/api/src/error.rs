//! # Errors surfaced by the API client
//!
//! Every failed call, whether the request never left the browser or the backend
//! answered with a 4xx/5xx, comes back as one [`ApiError`]. The variant tells the
//! view how to present it:
//!
//! | Variant | Produced by | Typical presentation |
//! |---------|-------------|----------------------|
//! | [`Validation`](ApiError::Validation) | `{ "field": ["message", ...] }` bodies | inline under each field |
//! | [`Unauthorized`](ApiError::Unauthorized) | HTTP 401 | sign in (again) |
//! | [`Forbidden`](ApiError::Forbidden) | HTTP 403 | one-shot notice |
//! | [`NotFound`](ApiError::NotFound) | HTTP 404 | empty state / notice |
//! | [`Failed`](ApiError::Failed) | any other non-2xx, `{ "error": "..." }` bodies | one-shot notice |
//! | [`Network`](ApiError::Network) | transport failure | retry-able notice |
//! | [`Decode`](ApiError::Decode) | 2xx body that does not match the expected shape | retry-able notice |
//! | [`Config`](ApiError::Config) | unusable base URL or request body | notice |
//!
//! ## Error payloads
//!
//! [`ApiError::from_response`] understands the three shapes the backend emits:
//!
//! - field errors: `{"price": ["must be a number"]}`
//! - operation errors: `{"error": "Insufficient balance"}`, DRF's `{"detail": "..."}`
//!   or `{"message": "..."}`
//!
//! Field reports are only trusted on 400 and 422. On any other status their
//! text is folded into the message, so a 403 or 500 keeps its own variant.
//! - the envelope: `{"success": false, "message": "...", "errors": {...}}`

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field name → messages, as reported by the backend's validators.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single message for one field.
    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    /// All messages reported for `field`.
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The first message for `field`, which is what forms show inline.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field).first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Interpret a JSON object as field errors. Every value must be a string or
    /// a list; anything else means the payload is not a validation report.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let mut errors = Self::new();
        for (field, messages) in object {
            match messages {
                Value::String(message) => errors.push(field, message),
                Value::Array(items) => {
                    for item in items {
                        match item {
                            Value::String(message) => errors.push(field, message),
                            other => errors.push(field, &other.to_string()),
                        }
                    }
                }
                _ => return None,
            }
        }
        (!errors.is_empty()).then_some(errors)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{field}: {}", messages.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error("not signed in: {0}")]
    Unauthorized(String),
    #[error("not allowed: {0}")]
    Forbidden(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("request failed ({status}): {message}")]
    Failed { status: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("invalid request: {0}")]
    Config(String),
}

impl ApiError {
    /// Build the error for a non-2xx response.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let value = serde_json::from_slice::<Value>(body).ok();
        let (fields, message) = value.as_ref().map(extract).unwrap_or((None, None));

        // field reports only count as validation on a client-error status;
        // anywhere else their text becomes the message
        let (fields, message) = match status {
            400 | 422 => (fields, message),
            _ => (None, message.or_else(|| fields.map(|f| f.to_string()))),
        };

        match status {
            401 => Self::Unauthorized(message.unwrap_or_else(|| {
                "Authentication credentials were not provided or have expired".to_string()
            })),
            403 => Self::Forbidden(message.unwrap_or_else(|| {
                "You do not have permission to perform this action".to_string()
            })),
            404 => Self::NotFound(message.unwrap_or_else(|| "Not found".to_string())),
            _ => match fields {
                Some(fields) => Self::Validation(fields),
                None => Self::Failed {
                    status,
                    message: message
                        .unwrap_or_else(|| format!("Request failed with status {status}")),
                },
            },
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Failures where trying again later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Decode(_))
            || matches!(self, Self::Failed { status, .. } if *status >= 500)
    }

    /// Text suitable for a notice or an empty state.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(_) => "Please correct the highlighted fields.".to_string(),
            Self::Unauthorized(message)
            | Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::Failed { message, .. } => message.clone(),
            Self::Network(_) => {
                "Could not reach the store. Check your connection and try again.".to_string()
            }
            Self::Decode(_) => "The store sent an unexpected response. Please try again.".to_string(),
            Self::Config(message) => message.clone(),
        }
    }
}

/// Pull field errors and/or a message out of an error body.
fn extract(value: &Value) -> (Option<FieldErrors>, Option<String>) {
    let Some(object) = value.as_object() else {
        return (None, value.as_str().map(str::to_string));
    };

    let text = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);

    // {"success": false, "message": "...", "errors": {...}}
    if object.get("success").and_then(Value::as_bool) == Some(false) {
        let fields = object.get("errors").and_then(FieldErrors::from_value);
        return (fields, text("message"));
    }

    if let Some(message) = text("error")
        .or_else(|| text("detail"))
        .or_else(|| text("message"))
    {
        return (None, Some(message));
    }

    (FieldErrors::from_value(value), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_payload() {
        let err = ApiError::from_response(400, br#"{"price": ["must be a number"]}"#);
        let fields = err.field_errors().unwrap();
        assert_eq!(fields.first("price"), Some("must be a number"));
        assert!(fields.first("name").is_none());
    }

    #[test]
    fn test_error_message_payload() {
        let err = ApiError::from_response(400, br#"{"error": "Insufficient balance"}"#);
        assert_eq!(
            err,
            ApiError::Failed {
                status: 400,
                message: "Insufficient balance".to_string()
            }
        );
        assert_eq!(err.user_message(), "Insufficient balance");
    }

    #[test]
    fn test_detail_payload_on_401() {
        let err = ApiError::from_response(
            401,
            br#"{"detail": "Given token not valid for any token type"}"#,
        );
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message(), "Given token not valid for any token type");
    }

    #[test]
    fn test_envelope_payload() {
        let err = ApiError::from_response(
            400,
            br#"{"success": false, "message": "Validation error", "errors": {"username": ["taken"]}}"#,
        );
        assert_eq!(err.field_errors().unwrap().first("username"), Some("taken"));

        let err = ApiError::from_response(
            400,
            br#"{"success": false, "message": "Invalid data", "errors": null}"#,
        );
        assert_eq!(err.user_message(), "Invalid data");
    }

    #[test]
    fn test_status_mapping_without_body() {
        assert!(matches!(ApiError::from_response(403, b""), ApiError::Forbidden(_)));
        assert!(matches!(ApiError::from_response(404, b"<html>"), ApiError::NotFound(_)));
        let err = ApiError::from_response(502, b"");
        assert_eq!(
            err,
            ApiError::Failed {
                status: 502,
                message: "Request failed with status 502".to_string()
            }
        );
        assert!(err.is_retryable());
    }

    #[test]
    fn test_status_wins_over_field_shaped_body() {
        let err = ApiError::from_response(403, br#"{"message": "You cannot delete this product"}"#);
        assert_eq!(
            err,
            ApiError::Forbidden("You cannot delete this product".to_string())
        );

        let err = ApiError::from_response(404, br#"{"product": ["does not exist"]}"#);
        assert_eq!(err, ApiError::NotFound("product: does not exist".to_string()));

        let err = ApiError::from_response(500, br#"{"database": "connection refused"}"#);
        assert!(err.field_errors().is_none());
        assert!(err.is_retryable());
        assert_eq!(err.user_message(), "database: connection refused");
    }

    #[test]
    fn test_message_payload_outside_envelope() {
        let err = ApiError::from_response(400, br#"{"message": "Product is sold out"}"#);
        assert_eq!(
            err,
            ApiError::Failed {
                status: 400,
                message: "Product is sold out".to_string()
            }
        );

        let err = ApiError::from_response(422, br#"{"price": "must be a number"}"#);
        assert_eq!(err.field_errors().unwrap().first("price"), Some("must be a number"));
    }

    #[test]
    fn test_non_list_values_are_not_field_errors() {
        let err = ApiError::from_response(400, br#"{"count": 3}"#);
        assert!(err.field_errors().is_none());
    }
}
