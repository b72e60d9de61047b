//! Batched read contract consumed by the valuation engine.
//!
//! A [`BatchReader`] executes an ordered list of [`ReadRequest`]s in a
//! single round trip and hands back one typed [`ReadValue`] per request,
//! in request order. Implementations must fail the whole batch rather
//! than return partial results.

use std::fmt;

use alloy_primitives::{Address, U256};
use async_trait::async_trait;

use super::error::ReadError;

/// ERC-20 view function invoked by a read request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFunction {
    /// `balanceOf(owner) -> uint256`.
    BalanceOf(Address),
    /// `totalSupply() -> uint256`.
    TotalSupply,
    /// `decimals() -> uint8`.
    Decimals,
}

impl fmt::Display for ReadFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BalanceOf(owner) => write!(f, "balanceOf({owner})"),
            Self::TotalSupply => f.write_str("totalSupply()"),
            Self::Decimals => f.write_str("decimals()"),
        }
    }
}

/// One read call: a target contract and the function to call on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRequest {
    /// Contract the call is sent to.
    pub target: Address,
    /// Function and arguments.
    pub function: ReadFunction,
}

impl ReadRequest {
    /// `target.balanceOf(owner)`.
    #[must_use]
    pub const fn balance_of(target: Address, owner: Address) -> Self {
        Self {
            target,
            function: ReadFunction::BalanceOf(owner),
        }
    }

    /// `target.totalSupply()`.
    #[must_use]
    pub const fn total_supply(target: Address) -> Self {
        Self {
            target,
            function: ReadFunction::TotalSupply,
        }
    }

    /// `target.decimals()`.
    #[must_use]
    pub const fn decimals(target: Address) -> Self {
        Self {
            target,
            function: ReadFunction::Decimals,
        }
    }
}

/// Decoded result of a read, typed by the function's return type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadValue {
    /// A `uint256` result (balances, supplies).
    Uint(U256),
    /// A `uint8` decimals result.
    Decimals(u8),
}

impl ReadValue {
    /// Returns the `uint256` payload.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::UnexpectedValue`] if this is not a `Uint`.
    pub const fn as_uint(&self, index: usize) -> Result<U256, ReadError> {
        match self {
            Self::Uint(v) => Ok(*v),
            Self::Decimals(_) => Err(ReadError::UnexpectedValue {
                index,
                expected: "uint256",
            }),
        }
    }

    /// Returns the `uint8` decimals payload.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::UnexpectedValue`] if this is not `Decimals`.
    pub const fn as_decimals(&self, index: usize) -> Result<u8, ReadError> {
        match self {
            Self::Decimals(d) => Ok(*d),
            Self::Uint(_) => Err(ReadError::UnexpectedValue {
                index,
                expected: "uint8",
            }),
        }
    }
}

/// Executes heterogeneous read requests in one round trip.
#[async_trait]
pub trait BatchReader: Send + Sync + fmt::Debug {
    /// Executes `requests` atomically and returns their decoded results in
    /// the same order.
    ///
    /// # Errors
    ///
    /// Returns a [`ReadError`] if the aggregate call fails or any single
    /// result cannot be decoded. No partial results are returned.
    async fn read_batch(&self, requests: &[ReadRequest]) -> Result<Vec<ReadValue>, ReadError>;
}
