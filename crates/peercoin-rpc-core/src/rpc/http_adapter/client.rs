use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use reqwest::header;
use serde_json::value::RawValue;
use tracing::{debug, trace, warn};

use crate::error::{CoreError, RpcError};
use crate::rpc::message::{Notification, Request};

use super::super::PeercoinRpc;
use super::connection::{basic_auth_header, parse_endpoint};
use super::protocol::{decode_response, into_result};
use super::transport::HttpTransport;

/// Peercoin JSON-RPC client over HTTP.
///
/// Every call carries an `Authorization: Basic ...` header computed once at
/// construction. Call ids come from a per-client counter; with
/// auto-increment enabled (the default) every request gets a fresh id, and
/// concurrent callers never observe duplicates or gaps.
pub struct HttpRpcClient {
    transport: HttpTransport,
    auth_header: String,
    next_id: AtomicU64,
    auto_increment: bool,
}

impl HttpRpcClient {
    /// Create a client for `http://<host>:<port>/` authenticating as
    /// `username:password`.
    pub fn new(host: &str, port: u16, username: &str, password: &str) -> Result<Self, CoreError> {
        let url = parse_endpoint(host, port)?;
        let auth_header = basic_auth_header(username, password);

        let mut transport = HttpTransport::new(url)?;
        transport.set_header(header::AUTHORIZATION.as_str(), &auth_header)?;

        Ok(Self {
            transport,
            auth_header,
            next_id: AtomicU64::new(0),
            auto_increment: true,
        })
    }

    /// When disabled, every request reuses the current counter value.
    pub fn with_auto_increment(mut self, enabled: bool) -> Self {
        self.auto_increment = enabled;
        self
    }

    /// First id handed out by this client (default 0).
    pub fn with_start_id(mut self, id: u64) -> Self {
        self.next_id = AtomicU64::new(id);
        self
    }

    /// Attach an extra header to every outgoing call. Setting
    /// `Authorization` replaces the Basic credentials.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, CoreError> {
        self.transport.set_header(name, value)?;
        if name.eq_ignore_ascii_case(header::AUTHORIZATION.as_str()) {
            self.auth_header = value.to_owned();
        }
        Ok(self)
    }

    /// The `Authorization` header value sent with every call.
    pub fn auth_header(&self) -> &str {
        &self.auth_header
    }

    pub fn endpoint(&self) -> &str {
        self.transport.url()
    }

    fn next_id(&self) -> u64 {
        if self.auto_increment {
            self.next_id.fetch_add(1, Ordering::Relaxed)
        } else {
            self.next_id.load(Ordering::Relaxed)
        }
    }

    /// Send `method` as a notification: no id is allocated and the reply
    /// body, if any, is discarded. Transport and encoding failures and
    /// non-2xx replies are still reported.
    pub async fn notify(&self, method: &str, params: Option<&RawValue>) -> Result<(), CoreError> {
        let notification = Notification::new(method, params);
        debug!(rpc.method = method, "rpc notification");

        let reply = self.transport.post(&notification).await?;
        trace!(rpc.method = method, status = %reply.status, "rpc notification reply");
        if !reply.status.is_success() {
            warn!(rpc.method = method, status = %reply.status, "rpc notification rejected");
            return Err(RpcError::HttpStatus {
                status: reply.status.as_u16(),
                body: reply.body,
            }
            .into());
        }
        Ok(())
    }

    async fn rpc_call(
        &self,
        method: &str,
        params: Option<&RawValue>,
    ) -> Result<Box<RawValue>, CoreError> {
        let id = self.next_id();
        let request = Request::new(id, method, params);
        debug!(
            rpc.id = id,
            rpc.method = method,
            rpc.params = params.map_or("[]", RawValue::get),
            "rpc call"
        );

        let reply = self.transport.post(&request).await?;
        debug!(
            rpc.id = id,
            rpc.method = method,
            status = %reply.status,
            body_len = reply.body.len(),
            "rpc response"
        );
        trace!(rpc.id = id, rpc.method = method, body = %reply.body, "rpc response body");

        let result =
            decode_response(reply.status, &reply.body).and_then(|decoded| into_result(id, decoded));
        if let Err(ref err) = result {
            warn!(rpc.id = id, rpc.method = method, error = %err, "rpc call failed");
        }
        result
    }
}

#[async_trait]
impl PeercoinRpc for HttpRpcClient {
    async fn call(
        &self,
        method: &str,
        params: Option<&RawValue>,
    ) -> Result<Box<RawValue>, CoreError> {
        self.rpc_call(method, params).await
    }
}
