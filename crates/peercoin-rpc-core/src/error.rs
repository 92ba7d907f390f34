#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("RPC communication failure: {0}")]
    Rpc(#[from] RpcError),

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

/// Failures produced by a single JSON-RPC call.
///
/// `Server` is the only variant where the node actually processed the
/// request; every other variant means no usable reply was obtained.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("HTTP transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("HTTP {status} without a JSON-RPC body: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("encode JSON-RPC request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid JSON-RPC response: {0}")]
    InvalidResponse(String),

    #[error("invalid {method} result: {source}")]
    InvalidResult {
        method: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("server error {code}: {message}")]
    Server {
        code: i64,
        message: String,
        data: Option<String>,
    },

    #[error("response id mismatch: expected {expected}, got {actual}")]
    IdMismatch { expected: u64, actual: String },
}

impl RpcError {
    /// JSON-RPC error code when the node answered with an error object.
    pub fn server_code(&self) -> Option<i64> {
        match self {
            Self::Server { code, .. } => Some(*code),
            _ => None,
        }
    }
}
