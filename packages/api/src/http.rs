//! reqwest-backed [`Transport`] used by the real application.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};

use crate::error::ApiError;
use crate::transport::{ApiRequest, Body, Method, MultipartForm, RawResponse, Transport};

/// Sends requests to the backend at a fixed base address.
///
/// The base address is parsed per request so a bad configuration shows up as an
/// [`ApiError::Config`] in whichever view made the call.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn from_config(config: &store::ClientConfig) -> Self {
        Self::new(config.api.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> Result<Url, ApiError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| ApiError::Config(format!("bad base url {}: {e}", self.base_url)))?;
        base.join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Config(format!("bad path {path}: {e}")))
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

fn to_form(form: MultipartForm) -> Result<Form, ApiError> {
    let mut out = Form::new();
    for (name, value) in form.fields {
        out = out.text(name, value);
    }
    for (name, file) in form.files {
        let mut part = Part::bytes(file.bytes).file_name(file.file_name);
        if let Some(content_type) = file.content_type {
            part = part
                .mime_str(&content_type)
                .map_err(|e| ApiError::Config(format!("bad content type {content_type}: {e}")))?;
        }
        out = out.part(name, part);
    }
    Ok(out)
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let url = self.url_for(&request.path)?;
        let mut builder = self.client.request(request.method.into(), url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(&value),
            Body::Multipart(form) => builder.multipart(to_form(form)?),
        };

        // Send cookies along with cross-origin API calls
        #[cfg(target_arch = "wasm32")]
        {
            builder = builder.fetch_credentials_include();
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}
