//! # Transport: how a request reaches the backend
//!
//! [`ApiRequest`] is a plain description of one call (method, path relative to
//! the configured base address, query, body, optional bearer token).
//! A [`Transport`] turns it into a [`RawResponse`]. The production implementation
//! is [`crate::HttpTransport`]; tests use an in-process fake that records every
//! request it receives.
//!
//! A transport only reports failures to *deliver* the request
//! ([`ApiError::Network`]); interpreting status codes is the client's job.

use std::fmt;

use serde::Serialize;

use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

/// A binary attachment in a multipart body.
#[derive(Clone, Debug, PartialEq)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FilePart {
    /// Build a part, guessing the content type from the file extension.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name).map(str::to_string);
        Self {
            file_name,
            content_type,
            bytes,
        }
    }
}

fn guess_content_type(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Scalar fields plus file attachments, sent as `multipart/form-data`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    pub files: Vec<(String, FilePart)>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    pub fn file(mut self, name: &str, part: FilePart) -> Self {
        self.files.push((name.to_string(), part));
        self
    }

    /// Value of a scalar field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn file_part(&self, name: &str) -> Option<&FilePart> {
        self.files
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, part)| part)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Body {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(MultipartForm),
}

/// One call to the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base address, e.g. `"products/3/like/"`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Body,
    /// Bearer credential. Filled from the session store by the client unless
    /// set explicitly.
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: Body::Empty,
            bearer: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(payload).map_err(|e| ApiError::Config(e.to_string()))?;
        self.body = Body::Json(value);
        Ok(self)
    }

    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = Body::Multipart(form);
        self
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

/// Status and raw body of a delivered request.
#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Async interface for delivering requests. Each call is attempted exactly once.
pub trait Transport {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl std::future::Future<Output = Result<RawResponse, ApiError>>;
}
