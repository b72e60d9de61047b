//! On-chain read layer: batch reader contract, Multicall implementation,
//! and the JSON-RPC transport underneath it.

pub mod batch_reader;
pub mod error;
pub mod multicall;
pub mod rpc;

pub use batch_reader::{BatchReader, ReadFunction, ReadRequest, ReadValue};
pub use error::ReadError;
pub use multicall::{MULTICALL3_ADDRESS, MulticallReader};
pub use rpc::JsonRpcClient;
