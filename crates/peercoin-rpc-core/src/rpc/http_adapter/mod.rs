//! JSON-RPC client for Peercoin (Bitcoin-Core-family) nodes over plain HTTP.
//!
//! Implements [`PeercoinRpc`](super::PeercoinRpc) using `reqwest`, with
//! basic auth, per-client call-id allocation, and response id correlation.

mod client;
mod connection;
mod protocol;
mod transport;

pub use client::HttpRpcClient;
