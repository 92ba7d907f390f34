//! Peercoin node RPC abstraction layer.
//!
//! Defines the [`PeercoinRpc`] trait and provides an HTTP JSON-RPC
//! implementation ([`HttpRpcClient`]) plus a test mock (`mock::MockRpc`).

mod http_adapter;
pub mod message;
#[cfg(test)]
pub mod mock;
pub mod types;

pub use http_adapter::HttpRpcClient;
pub use message::{ErrorObject, Notification, Request, Response, Version};
pub use types::{ChainInfo, Difficulty};

use async_trait::async_trait;
use bitcoin::BlockHash;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::value::RawValue;

use crate::error::{CoreError, RpcError};

/// Generic JSON-RPC call plus typed bindings for the node methods this
/// crate knows about.
///
/// Implementors only provide [`PeercoinRpc::call`]; every binding is built on
/// top of it and decodes the still-raw `result` straight into its type.
#[async_trait]
pub trait PeercoinRpc: Send + Sync {
    /// Invoke `method` with an already-encoded `params` payload and return the
    /// `result` member untouched. `None` params are sent as `[]`.
    async fn call(
        &self,
        method: &str,
        params: Option<&RawValue>,
    ) -> Result<Box<RawValue>, CoreError>;

    /// Chain state from `getblockchaininfo`.
    async fn get_blockchain_info(&self) -> Result<ChainInfo, CoreError> {
        let raw = self.call("getblockchaininfo", None).await?;
        decode_result("getblockchaininfo", &raw)
    }

    /// Height of the most-work fully-validated chain.
    async fn get_block_count(&self) -> Result<u64, CoreError> {
        let raw = self.call("getblockcount", None).await?;
        decode_result("getblockcount", &raw)
    }

    async fn get_best_block_hash(&self) -> Result<BlockHash, CoreError> {
        let raw = self.call("getbestblockhash", None).await?;
        decode_result("getbestblockhash", &raw)
    }

    /// Hash of the block at `height` in the active chain.
    async fn get_block_hash(&self, height: u64) -> Result<BlockHash, CoreError> {
        let params = encode_params(&[height])?;
        let raw = self.call("getblockhash", Some(&*params)).await?;
        decode_result("getblockhash", &raw)
    }

    async fn get_difficulty(&self) -> Result<Difficulty, CoreError> {
        let raw = self.call("getdifficulty", None).await?;
        decode_result("getdifficulty", &raw)
    }

    /// Number of peer connections.
    async fn get_connection_count(&self) -> Result<u64, CoreError> {
        let raw = self.call("getconnectioncount", None).await?;
        decode_result("getconnectioncount", &raw)
    }
}

/// Decode a raw `result` payload into the binding's result type.
pub fn decode_result<T: DeserializeOwned>(method: &str, raw: &RawValue) -> Result<T, CoreError> {
    serde_json::from_str(raw.get()).map_err(|source| {
        RpcError::InvalidResult {
            method: method.to_owned(),
            source,
        }
        .into()
    })
}

/// Encode positional arguments into the opaque payload expected by
/// [`PeercoinRpc::call`].
pub fn encode_params<P: Serialize + ?Sized>(params: &P) -> Result<Box<RawValue>, CoreError> {
    serde_json::value::to_raw_value(params).map_err(|e| RpcError::Encode(e).into())
}
