//! Low-level HTTP transport: `LicenseChainHttp`.
//!
//! One reqwest client, configured once from [`ClientConfig`], carries both the
//! REST calls (`{ "data": ... }` envelopes) and the Solana JSON-RPC calls.
//! All transport and status failures are mapped to [`SdkError`] here so the
//! layers above only ever see typed errors.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, RETRY_AFTER};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::{ErrorResponse, SdkError, SdkResult};
use crate::network::{API_VERSION, PLATFORM};

/// REST response envelope. Every LicenseChain endpoint wraps its payload in `data`.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    data: Option<T>,
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 code for a response that could not be parsed.
pub const RPC_PARSE_ERROR: i64 = -32700;

/// Shared HTTP transport for the REST backend and the Solana RPC endpoint.
#[derive(Clone)]
pub struct LicenseChainHttp {
    config: Arc<ClientConfig>,
    client: Client,
}

impl LicenseChainHttp {
    /// Build the transport. Default headers carry bearer auth, the API version
    /// and the platform; the configured timeout bounds every request.
    pub fn new(config: Arc<ClientConfig>) -> SdkResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            HeaderValue::from_static("application/json"),
        );

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key()))
            .map_err(|_| SdkError::validation("api_key contains characters not allowed in a header"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            HeaderName::from_static("x-api-version"),
            HeaderValue::from_static(API_VERSION),
        );
        headers.insert(
            HeaderName::from_static("x-platform"),
            HeaderValue::from_static(PLATFORM),
        );

        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| SdkError::Network {
                message: format!("Failed to build HTTP client: {}", e),
                status: None,
                source: Some(e),
            })?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn shared_config(&self) -> Arc<ClientConfig> {
        self.config.clone()
    }

    // ── REST ─────────────────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> SdkResult<T> {
        self.rest::<T, ()>(Method::GET, path, None).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> SdkResult<T> {
        self.rest(Method::POST, path, Some(body)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> SdkResult<T> {
        self.rest(Method::PUT, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> SdkResult<T> {
        self.rest::<T, ()>(Method::DELETE, path, None).await
    }

    /// DELETE that ignores the response body.
    pub async fn delete_no_content(&self, path: &str) -> SdkResult<()> {
        let url = format!("{}{}", self.config.base_url(), path);
        tracing::debug!(method = "DELETE", path, "REST request");
        self.send(self.client.delete(&url)).await.map(|_| ())
    }

    async fn rest<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> SdkResult<T> {
        let url = format!("{}{}", self.config.base_url(), path);
        tracing::debug!(method = %method, path, "REST request");

        let mut req = self.client.request(method, &url);
        if let Some(b) = body {
            req = req.json(b);
        }

        let body = self.send(req).await?;
        let envelope: ApiEnvelope<T> = serde_json::from_str(&body).map_err(|e| {
            SdkError::Serialization(format!("Unexpected response shape from {}: {}", path, e))
        })?;
        envelope.data.ok_or_else(|| {
            SdkError::Serialization(format!("Response from {} is missing `data`", path))
        })
    }

    // ── JSON-RPC ─────────────────────────────────────────────────────────

    /// Issue one JSON-RPC 2.0 call and return its raw `result`.
    ///
    /// An `error` object becomes [`SdkError::Rpc`]; an unparseable envelope
    /// becomes [`SdkError::Rpc`] with [`RPC_PARSE_ERROR`].
    pub async fn rpc_call(&self, method: &str, params: serde_json::Value) -> SdkResult<serde_json::Value> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };
        tracing::debug!(rpc_method = method, "RPC request");

        let req = self.client.post(self.config.rpc_url()).json(&request);
        let body = self.send(req).await?;

        let response: JsonRpcResponse = serde_json::from_str(&body).map_err(|e| SdkError::Rpc {
            rpc_code: RPC_PARSE_ERROR,
            message: format!("Invalid JSON-RPC response for {}: {}", method, e),
            data: None,
        })?;

        if let Some(error) = response.error {
            tracing::debug!(rpc_method = method, code = error.code, error = %error.message, "RPC error");
            return Err(SdkError::Rpc {
                rpc_code: error.code,
                message: error.message,
                data: error.data,
            });
        }

        Ok(response.result.unwrap_or(serde_json::Value::Null))
    }

    // ── Transport ────────────────────────────────────────────────────────

    /// Send a request and return the body of a 2xx response.
    async fn send(&self, req: reqwest::RequestBuilder) -> SdkResult<String> {
        let response = req.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();

        if !status.is_success() {
            return Err(Self::status_error(response).await);
        }

        response.text().await.map_err(|e| self.transport_error(e))
    }

    fn transport_error(&self, e: reqwest::Error) -> SdkError {
        if e.is_timeout() {
            tracing::debug!(timeout_ms = self.config.timeout().as_millis() as u64, "Request timed out");
            return SdkError::Timeout {
                timeout: self.config.timeout(),
            };
        }
        SdkError::Network {
            message: e.to_string(),
            status: e.status().map(|s| s.as_u16()),
            source: Some(e),
        }
    }

    async fn status_error(response: reqwest::Response) -> SdkError {
        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_secs);

        let body = match response.text().await {
            Ok(text) => serde_json::from_str::<ErrorResponse>(&text)
                .unwrap_or_else(|_| ErrorResponse::from_text(text)),
            Err(e) => {
                tracing::warn!("Failed to read error response body: {}", e);
                ErrorResponse::default()
            }
        };
        let message = body.get_message();
        tracing::warn!(status = status.as_u16(), error = %message, "Request failed");

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SdkError::Authentication(message),
            StatusCode::TOO_MANY_REQUESTS => SdkError::RateLimit { retry_after },
            _ => SdkError::Network {
                message: format!("HTTP {}: {}", status.as_u16(), message),
                status: Some(status.as_u16()),
                source: None,
            },
        }
    }
}

/// Percent-encode one path segment.
pub(crate) fn segment(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}
