//! Adapters connecting outbound ports to real transports.

pub mod json_rpc;

pub use json_rpc::JsonRpcLedgerClient;
