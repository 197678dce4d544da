//! # ApiClient: credentialed access to the storefront backend
//!
//! [`ApiClient`] pairs a [`Transport`] with a [`SessionStore`]. For every request
//! it:
//!
//! 1. attaches `Authorization: Bearer <token>` when the store holds a session
//!    (and the request did not bring its own token),
//! 2. hands the request to the transport exactly once,
//! 3. turns non-2xx responses into [`ApiError`] via [`ApiError::from_response`],
//! 4. decodes 2xx bodies, unwrapping the `{ "success": true, "data": ... }`
//!    envelope some endpoints use and DRF's `{ "results": [...] }` pages.
//!
//! The typed endpoint wrappers live in [`crate::endpoints`].

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use store::SessionStore;

use crate::error::ApiError;
use crate::transport::{ApiRequest, Body, Method, Transport};

#[derive(Clone, Debug)]
pub struct ApiClient<T, S> {
    transport: T,
    session: S,
}

impl<T: Transport, S: SessionStore> ApiClient<T, S> {
    pub fn new(transport: T, session: S) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request and return the raw body of a 2xx response.
    pub async fn execute(&self, mut request: ApiRequest) -> Result<Vec<u8>, ApiError> {
        if request.bearer.is_none() {
            request.bearer = self.session.token();
        }
        let method = request.method;
        let path = request.path.clone();
        tracing::debug!(
            %method,
            %path,
            authenticated = request.bearer.is_some(),
            "api request"
        );

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%method, %path, "request not delivered: {e}");
                return Err(e);
            }
        };

        if !response.is_success() {
            let err = ApiError::from_response(response.status, &response.body);
            tracing::warn!(%method, %path, status = response.status, "request rejected: {err}");
            return Err(err);
        }
        Ok(response.body)
    }

    /// Send a request and decode the response body.
    pub async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let body = self.execute(request).await?;
        decode(&body)
    }

    /// Send a request and decode a list, accepting either a bare array or a
    /// paginated `{ "results": [...] }` page.
    pub async fn fetch_list<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Vec<R>, ApiError> {
        let page: Page<R> = self.fetch(request).await?;
        Ok(match page {
            Page::List(items) => items,
            Page::Paged { results } => results,
        })
    }

    /// Send a request whose response body is informational only.
    pub async fn send(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.execute(request).await.map(|_| ())
    }

    /// Decode leniently: a body of an unexpected shape yields `R::default()`
    /// instead of an error, since the call itself succeeded.
    pub async fn fetch_or_default<R: DeserializeOwned + Default>(
        &self,
        request: ApiRequest,
    ) -> Result<R, ApiError> {
        let body = self.execute(request).await?;
        Ok(decode(&body).unwrap_or_default())
    }

    pub async fn request<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Body,
    ) -> Result<R, ApiError> {
        let mut request = ApiRequest::new(method, path);
        request.body = body;
        self.fetch(request).await
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Page<R> {
    List(Vec<R>),
    Paged { results: Vec<R> },
}

/// Decode a 2xx body. Empty bodies decode as JSON `null`.
pub(crate) fn decode<R: DeserializeOwned>(body: &[u8]) -> Result<R, ApiError> {
    let value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice::<Value>(body).map_err(|e| ApiError::Decode(e.to_string()))?
    };
    serde_json::from_value(unwrap_envelope(value)).map_err(|e| ApiError::Decode(e.to_string()))
}

fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut object)
            if object.get("success").and_then(Value::as_bool) == Some(true)
                && object.contains_key("data") =>
        {
            object.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}
