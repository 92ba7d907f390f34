use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{trace, warn};

use crate::error::{CoreError, RpcError};

/// Raw HTTP reply, before envelope decoding.
pub(super) struct HttpReply {
    pub(super) status: StatusCode,
    pub(super) body: String,
}

/// Single-request HTTP POST transport with a fixed set of custom headers.
///
/// The inner `reqwest::Client` is shared across calls, so connections are
/// pooled by the library and concurrent posts need no extra locking.
pub(super) struct HttpTransport {
    client: reqwest::Client,
    url: String,
    headers: HeaderMap,
}

impl HttpTransport {
    pub(super) fn new(url: String) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| CoreError::InvalidConfig(format!("build HTTP client: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        Ok(Self {
            client,
            url,
            headers,
        })
    }

    pub(super) fn url(&self) -> &str {
        &self.url
    }

    /// Attach `name: value` to every subsequent post, replacing any previous
    /// value for the same header.
    pub(super) fn set_header(&mut self, name: &str, value: &str) -> Result<(), CoreError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| CoreError::InvalidConfig(format!("invalid header name `{name}`: {e}")))?;
        let mut value = HeaderValue::from_str(value)
            .map_err(|e| CoreError::InvalidConfig(format!("invalid value for `{name}`: {e}")))?;
        if name == header::AUTHORIZATION {
            value.set_sensitive(true);
        }
        self.headers.insert(name, value);
        Ok(())
    }

    /// Serialize `message` and POST it. Non-2xx statuses are not errors here;
    /// the caller decides based on whether the body decodes.
    pub(super) async fn post<M: Serialize>(&self, message: &M) -> Result<HttpReply, CoreError> {
        let body = serde_json::to_vec(message).map_err(|e| {
            warn!(error = %e, "failed to encode JSON-RPC message");
            RpcError::Encode(e)
        })?;
        trace!(url = %self.url, body = %String::from_utf8_lossy(&body), "rpc request body");

        let response = self
            .client
            .post(&self.url)
            .headers(self.headers.clone())
            .body(body)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %self.url, error = %e, "rpc request failed");
                RpcError::Transport(e)
            })?;
        let status = response.status();

        let body = response.text().await.map_err(|e| {
            warn!(url = %self.url, %status, error = %e, "failed to read rpc response body");
            RpcError::Transport(e)
        })?;

        Ok(HttpReply { status, body })
    }
}
