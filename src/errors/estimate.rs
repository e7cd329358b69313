// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for fee estimation.
//!
//! A header without a base fee is not an error: it produces a legacy record.
//! The only rejected inputs are headers whose arithmetic cannot be carried out.

use alloy_primitives::BlockNumber;

/// Failure of the fixed-width integer arithmetic behind the base fee rule.
///
/// Returned by the free functions in the estimator module, which have no block
/// context. [`FeeEstimator`](crate::FeeEstimator) attaches the block number by
/// converting into [`EstimateError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ArithmeticError {
    /// The gas limit is zero and is used as a divisor.
    #[error("division by zero: gas limit is zero")]
    DivisionByZero,

    /// An intermediate value does not fit in 256 bits.
    #[error("arithmetic overflow in {operation}")]
    Overflow {
        /// Which step of the computation overflowed
        operation: &'static str,
    },
}

/// Errors that reject a block header during fee estimation.
///
/// # Examples
///
/// ```rust
/// use alloy_primitives::{B256, U256};
/// use feescan::{estimate, BlockHeader, EstimateError};
///
/// let header = BlockHeader::new(B256::ZERO, 42, 1_700_000_000, 10_000_000, 0)
///     .with_base_fee(U256::from(100_000_000_000u64));
///
/// match estimate(&header) {
///     Err(EstimateError::DivisionByZero { block_number }) => assert_eq!(block_number, 42),
///     other => panic!("unexpected result: {other:?}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EstimateError {
    /// The header's gas limit is zero, so the base fee adjustment is undefined.
    #[error("Division by zero: block {block_number} has a zero gas limit")]
    DivisionByZero {
        /// Number of the rejected block
        block_number: BlockNumber,
    },

    /// A fee value for this header does not fit in a U256.
    #[error("Arithmetic overflow in {operation} for block {block_number}")]
    Overflow {
        /// Number of the rejected block
        block_number: BlockNumber,
        /// Which step of the computation overflowed
        operation: &'static str,
    },
}

impl EstimateError {
    /// Attach a block number to an [`ArithmeticError`].
    pub fn arithmetic(block_number: BlockNumber, err: ArithmeticError) -> Self {
        match err {
            ArithmeticError::DivisionByZero => Self::DivisionByZero { block_number },
            ArithmeticError::Overflow { operation } => Self::Overflow {
                block_number,
                operation,
            },
        }
    }

    /// Number of the block that was rejected.
    pub fn block_number(&self) -> BlockNumber {
        match self {
            Self::DivisionByZero { block_number } | Self::Overflow { block_number, .. } => {
                *block_number
            }
        }
    }
}
