//! HTTP client for backend API requests.
//!
//! This module provides a low-level HTTP client wrapper for making requests
//! to the collections API, handling authentication, URL construction and the
//! response envelope shared by every endpoint.

use super::error::ApiError;
use reqwest::{multipart, Method, RequestBuilder, Url};
use serde::Deserialize;
use serde_json::Value;

/// Fallback message when an error envelope carries none.
///
const GENERIC_FAILURE: &str = "Operation failed";

/// Canonical response envelope. Every endpoint answers with this shape and a
/// 2xx status if and only if `success` is true.
///
#[derive(Debug, Deserialize)]
struct Envelope {
    success: Option<bool>,
    message: Option<String>,
    #[serde(default)]
    data: Value,
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
}

/// Successful response contents.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    pub message: Option<String>,
    pub data: Value,
}

/// Makes requests to the backend and unwraps the response envelope.
///
pub struct Client {
    base_url: Url,
    api_key: Option<String>,
    http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL and optional API key.
    ///
    pub fn new(base_url: &str, api_key: Option<&str>) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Client {
            base_url,
            api_key: api_key.filter(|k| !k.is_empty()).map(str::to_owned),
            http_client: reqwest::Client::new(),
        })
    }

    /// Build `{base}/api/collections/{segments...}` with every segment
    /// percent-encoded.
    ///
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "collections"])
            .extend(segments);
        Ok(url)
    }

    /// Make request with optional JSON body and return the unwrapped payload.
    ///
    pub async fn request(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<Value>,
    ) -> Result<Payload, ApiError> {
        let url = self.url(segments)?;
        log::debug!("{} {}", method, url);
        let mut request = self.http_client.request(method, url);
        if let Some(body) = body {
            request = request.json(&body);
        }
        self.send(request).await
    }

    /// Upload file contents as the `file` part of a multipart form.
    ///
    pub async fn upload(
        &self,
        segments: &[&str],
        file_name: String,
        contents: Vec<u8>,
    ) -> Result<Payload, ApiError> {
        let url = self.url(segments)?;
        log::debug!("POST {} (multipart, {} bytes)", url, contents.len());
        let part = multipart::Part::bytes(contents).file_name(file_name);
        let form = multipart::Form::new().part("file", part);
        self.send(self.http_client.post(url).multipart(form)).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Payload, ApiError> {
        let request = match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        };
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        unwrap_envelope(status.as_u16(), status.is_success(), &bytes)
    }
}

/// Interpret a raw response according to the canonical envelope.
///
fn unwrap_envelope(status: u16, ok: bool, body: &[u8]) -> Result<Payload, ApiError> {
    let envelope = match serde_json::from_slice::<Envelope>(body) {
        Ok(envelope) => envelope,
        Err(e) if ok => {
            log::error!(
                "Failed to parse response envelope: {}. Response body: {}",
                e,
                String::from_utf8_lossy(body)
            );
            return Err(ApiError::Malformed(e.to_string()));
        }
        Err(_) => {
            return Err(ApiError::Server {
                status,
                message: format!("Request failed with status {}", status),
                code: None,
                details: None,
            })
        }
    };

    if !ok || envelope.success == Some(false) {
        let error = envelope.error;
        let (message, code, details) = match error {
            Some(ErrorBody {
                code,
                message,
                details,
            }) => (message, code, details),
            None => (None, None, None),
        };
        return Err(ApiError::Server {
            status,
            message: message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
            code,
            details,
        });
    }

    if envelope.success.is_none() {
        return Err(ApiError::Malformed("missing success flag".to_string()));
    }

    Ok(Payload {
        message: envelope.message.filter(|m| !m.is_empty()),
        data: envelope.data,
    })
}
