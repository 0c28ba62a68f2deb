//! JSON-RPC envelope types and the HTTP transport.
//!
//! The node's reply envelope is passed through verbatim: a populated `error`
//! field is a *successful* resolution whose payload happens to encode an
//! error, and disambiguation belongs to whoever renders it. Only
//! transport-level problems (non-2xx status, network failure, unparseable
//! body) reject the call.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;
use std::time::Duration;

static HTTP: OnceLock<reqwest::Client> = OnceLock::new();

fn http_client() -> &'static reqwest::Client {
    HTTP.get_or_init(|| {
        reqwest::Client::builder()
            .pool_max_idle_per_host(8)
            .tcp_nodelay(true)
            .build()
            .expect("reqwest client")
    })
}

/// Request body for the blockchain endpoint: `{"method": ..., "params": [...]}`.
///
/// Constructed fresh per call; params keep their order.
#[derive(Clone, Debug, Serialize)]
pub struct RpcRequest {
    pub method: String,
    pub params: Vec<Value>,
}

impl RpcRequest {
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }
}

/// Node-supplied application error (`error` field of the envelope)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

/// The `{result, error, id}` reply envelope, kept as-is.
///
/// Absent fields deserialize to their defaults; no shape validation happens
/// here or anywhere downstream.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct RpcEnvelope {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcError>,
    #[serde(default)]
    pub id: String,
}

impl RpcEnvelope {
    /// Deserialize the `result` payload into a typed model.
    ///
    /// `None` when `result` is null or absent, or when the payload does not
    /// deserialize (logged, not surfaced — absent data renders as defaults).
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> Option<T> {
        let value = self.result.as_ref()?;
        match serde_json::from_value(value.clone()) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                log::debug!("undecodable result payload: {e}");
                None
            }
        }
    }
}

/// Transport-level failure. Cloneable so a shared in-flight fetch can hand
/// the same outcome to every attached caller.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FetchError {
    /// Non-2xx HTTP status; the server's error body is not echoed.
    #[error("failed to fetch: http status {0}")]
    Status(u16),
    /// Connection-level failure (DNS, refused, timed out, ...)
    #[error("failed to fetch: {0}")]
    Network(String),
    /// 2xx reply whose body was not a JSON envelope
    #[error("failed to fetch: unparseable response: {0}")]
    Decode(String),
    /// The in-flight request was aborted before it resolved
    #[error("fetch aborted")]
    Aborted,
}

pub type FetchResult = Result<RpcEnvelope, FetchError>;

/// The seam between resolvers and the wire. Test doubles implement this to
/// count calls and serve canned envelopes.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn post(&self, request: &RpcRequest) -> FetchResult;
}

/// POSTs request envelopes to a single endpoint. One attempt per call: no
/// retries, no backoff, no timeout beyond the configured request timeout.
pub struct HttpTransport {
    url: String,
    timeout: Duration,
    auth_token: Option<String>,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>, timeout_ms: u64, auth_token: Option<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_millis(timeout_ms),
            auth_token,
        }
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn post(&self, request: &RpcRequest) -> FetchResult {
        let mut req = http_client()
            .post(&self.url)
            .json(request)
            .timeout(self.timeout);

        if let Some(token) = &self.auth_token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let res = req
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            log::warn!("rpc {} -> http {}", request.method, status);
            return Err(FetchError::Status(status.as_u16()));
        }

        res.json::<RpcEnvelope>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_as_method_and_params_only() {
        let req = RpcRequest::new("getblock", vec![json!("2600000")]);
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body, json!({"method": "getblock", "params": ["2600000"]}));
    }

    #[test]
    fn envelope_roundtrips_verbatim() {
        let raw = json!({
            "result": {"chain": "main", "blocks": 2600000},
            "error": null,
            "id": "1"
        });
        let envelope: RpcEnvelope = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(envelope.id, "1");
        assert!(envelope.error.is_none());
        assert_eq!(serde_json::to_value(&envelope).unwrap(), raw);
    }

    #[test]
    fn envelope_keeps_node_errors_as_payload() {
        let envelope: RpcEnvelope = serde_json::from_value(json!({
            "result": null,
            "error": {"code": -5, "message": "Block not found"},
            "id": "1"
        }))
        .unwrap();
        let err = envelope.error.as_ref().unwrap();
        assert_eq!(err.code, -5);
        assert_eq!(err.message, "Block not found");
        assert!(envelope.result.is_none());
    }

    #[test]
    fn envelope_tolerates_missing_fields() {
        let envelope: RpcEnvelope = serde_json::from_value(json!({})).unwrap();
        assert!(envelope.result.is_none());
        assert!(envelope.error.is_none());
        assert_eq!(envelope.id, "");
    }

    #[test]
    fn decode_returns_none_for_null_result() {
        let envelope = RpcEnvelope::default();
        assert!(envelope.decode::<serde_json::Value>().is_none());
    }
}
