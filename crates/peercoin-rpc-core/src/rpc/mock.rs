use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::value::RawValue;

use crate::error::{CoreError, RpcError};

use super::PeercoinRpc;

enum Canned {
    Result(String),
    Error { code: i64, message: String },
}

/// A mock node for testing. Returns canned results per method name,
/// populated via the builder pattern, and records every call it receives.
pub struct MockRpc {
    replies: HashMap<String, Canned>,
    calls: Mutex<Vec<(String, Option<String>)>>,
}

impl MockRpc {
    pub fn builder() -> MockRpcBuilder {
        MockRpcBuilder {
            replies: HashMap::new(),
        }
    }

    /// Method names and raw params seen so far, in call order.
    pub fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }
}

pub struct MockRpcBuilder {
    replies: HashMap<String, Canned>,
}

impl MockRpcBuilder {
    pub fn with_result(mut self, method: &str, result_json: &str) -> Self {
        self.replies
            .insert(method.to_owned(), Canned::Result(result_json.to_owned()));
        self
    }

    pub fn with_error(mut self, method: &str, code: i64, message: &str) -> Self {
        self.replies.insert(
            method.to_owned(),
            Canned::Error {
                code,
                message: message.to_owned(),
            },
        );
        self
    }

    pub fn build(self) -> MockRpc {
        MockRpc {
            replies: self.replies,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PeercoinRpc for MockRpc {
    async fn call(
        &self,
        method: &str,
        params: Option<&RawValue>,
    ) -> Result<Box<RawValue>, CoreError> {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push((method.to_owned(), params.map(|p| p.get().to_owned())));

        match self.replies.get(method) {
            Some(Canned::Result(json)) => RawValue::from_string(json.clone())
                .map_err(|e| RpcError::InvalidResponse(format!("canned result: {e}")).into()),
            Some(Canned::Error { code, message }) => Err(RpcError::Server {
                code: *code,
                message: message.clone(),
                data: None,
            }
            .into()),
            None => Err(RpcError::Server {
                code: -32601,
                message: "Method not found".to_owned(),
                data: None,
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_method_reports_method_not_found() {
        let rpc = MockRpc::builder().build();
        let err = rpc
            .call("getpeerinfo", None)
            .await
            .expect_err("unconfigured method must fail");
        assert!(matches!(
            err,
            CoreError::Rpc(RpcError::Server { code: -32601, .. })
        ));
    }

    #[tokio::test]
    async fn canned_result_is_returned_verbatim() {
        let rpc = MockRpc::builder()
            .with_result("getbalance", "12345678901234567890.00000001")
            .build();
        let raw = rpc.call("getbalance", None).await.expect("must succeed");
        assert_eq!(raw.get(), "12345678901234567890.00000001");
    }
}
