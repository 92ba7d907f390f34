pub mod error;
pub mod rpc;

pub use error::{CoreError, RpcError};
pub use rpc::{HttpRpcClient, PeercoinRpc};
