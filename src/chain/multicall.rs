//! [`BatchReader`] backed by an on-chain Multicall contract.
//!
//! Every request is ABI-encoded against the ERC-20 interface, wrapped in
//! a single `aggregate` call and sent as one `eth_call`. `aggregate`
//! reverts if any inner call reverts, so a batch either succeeds as a
//! whole or fails as a whole.

use std::sync::Arc;

use alloy_primitives::{Address, address};
use alloy_sol_types::SolCall;
use async_trait::async_trait;

use super::batch_reader::{BatchReader, ReadFunction, ReadRequest, ReadValue};
use super::error::ReadError;
use super::rpc::JsonRpcClient;

#[allow(missing_docs, missing_debug_implementations, clippy::all, clippy::pedantic)]
mod abi {
    alloy_sol_types::sol! {
        contract ERC20 {
            function balanceOf(address account) external view returns (uint256);
            function totalSupply() external view returns (uint256);
            function decimals() external view returns (uint8);
        }

        contract Multicall {
            struct Call {
                address target;
                bytes callData;
            }

            function aggregate(Call[] calldata calls)
                external
                returns (uint256 blockNumber, bytes[] memory returnData);
        }
    }
}

use abi::{ERC20, Multicall};

/// Multicall3 deployment address, identical on all EVM chains.
pub const MULTICALL3_ADDRESS: Address = address!("cA11bde05977b3631167028862bE2a173976CA11");

/// Batch reader issuing one `Multicall.aggregate` per batch.
#[derive(Debug, Clone)]
pub struct MulticallReader {
    client: Arc<JsonRpcClient>,
    multicall_address: Address,
}

impl MulticallReader {
    /// Creates a reader that sends batches through the multicall contract at
    /// `multicall_address`.
    #[must_use]
    pub const fn new(client: Arc<JsonRpcClient>, multicall_address: Address) -> Self {
        Self {
            client,
            multicall_address,
        }
    }

    /// Returns the multicall contract address.
    #[must_use]
    pub const fn multicall_address(&self) -> &Address {
        &self.multicall_address
    }
}

#[async_trait]
impl BatchReader for MulticallReader {
    async fn read_batch(&self, requests: &[ReadRequest]) -> Result<Vec<ReadValue>, ReadError> {
        let payload = encode_aggregate(requests);
        tracing::debug!(
            calls = requests.len(),
            multicall = %self.multicall_address,
            "executing multicall batch"
        );
        let bytes = self.client.eth_call(&self.multicall_address, &payload).await?;
        decode_aggregate(requests, &bytes)
    }
}

/// ABI-encodes the call data of a single read request.
#[must_use]
pub fn encode_request(function: &ReadFunction) -> Vec<u8> {
    match function {
        ReadFunction::BalanceOf(account) => ERC20::balanceOfCall { account: *account }.abi_encode(),
        ReadFunction::TotalSupply => ERC20::totalSupplyCall {}.abi_encode(),
        ReadFunction::Decimals => ERC20::decimalsCall {}.abi_encode(),
    }
}

/// ABI-encodes `aggregate(calls)` for the given requests.
#[must_use]
pub fn encode_aggregate(requests: &[ReadRequest]) -> Vec<u8> {
    let calls = requests
        .iter()
        .map(|request| Multicall::Call {
            target: request.target,
            callData: encode_request(&request.function).into(),
        })
        .collect();
    Multicall::aggregateCall { calls }.abi_encode()
}

/// Decodes the return data of a single call according to its function.
///
/// # Errors
///
/// Returns [`ReadError::Decode`] if the bytes do not match the declared
/// return type.
pub fn decode_value(function: &ReadFunction, data: &[u8]) -> Result<ReadValue, ReadError> {
    let decoded = match function {
        ReadFunction::BalanceOf(_) => {
            ERC20::balanceOfCall::abi_decode_returns(data).map(ReadValue::Uint)
        }
        ReadFunction::TotalSupply => {
            ERC20::totalSupplyCall::abi_decode_returns(data).map(ReadValue::Uint)
        }
        ReadFunction::Decimals => {
            ERC20::decimalsCall::abi_decode_returns(data).map(ReadValue::Decimals)
        }
    };
    decoded.map_err(|e| ReadError::Decode(format!("failed to decode {function}: {e}")))
}

/// Decodes an `aggregate` response into typed values, in request order.
///
/// # Errors
///
/// Returns a [`ReadError`] if the envelope or any inner result fails to
/// decode, or if the number of results differs from the number of requests.
pub fn decode_aggregate(
    requests: &[ReadRequest],
    bytes: &[u8],
) -> Result<Vec<ReadValue>, ReadError> {
    let decoded = Multicall::aggregateCall::abi_decode_returns(bytes)
        .map_err(|e| ReadError::Decode(format!("failed to decode multicall results: {e}")))?;

    if decoded.returnData.len() != requests.len() {
        return Err(ReadError::ResultCount {
            expected: requests.len(),
            actual: decoded.returnData.len(),
        });
    }

    requests
        .iter()
        .zip(decoded.returnData.iter())
        .map(|(request, data)| decode_value(&request.function, data))
        .collect()
}
