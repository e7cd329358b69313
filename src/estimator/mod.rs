// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-block fee estimation
//!
//! [`FeeEstimator`] turns one [`BlockHeader`] into one [`BlockFeeRecord`]:
//!
//! 1. Identifying fields are copied unconditionally.
//! 2. A header without a base fee yields a legacy record and stops there.
//! 3. Otherwise the next block's base fee is computed with the EIP-1559
//!    adjustment ([`next_base_fee`]) and each tier's max fee is
//!    `expected * multiplier + priority fee` ([`recommended_max_fee`]).
//!
//! The estimator holds only immutable parameters. It performs no I/O and no
//! logging, and can be shared across threads and tasks freely.
//!
//! # Example
//!
//! ```rust
//! use alloy_primitives::{B256, U256};
//! use feescan::{estimate, BlockHeader, FeeTier};
//!
//! let header = BlockHeader::new(B256::ZERO, 1, 1_700_000_000, 15_000_000, 15_000_000)
//!     .with_base_fee(U256::from(100_000_000_000u64));
//!
//! let record = estimate(&header).unwrap();
//! let fees = record.fees().unwrap();
//! assert_eq!(fees.base_fee_per_gas_expected(), U256::from(100_000_000_000u64));
//! assert_eq!(
//!     fees.max_fee_per_gas().get(FeeTier::Eco),
//!     U256::from(201_200_000_000u64)
//! );
//! ```

mod basefee;

use alloy_chains::NamedChain;

pub use basefee::{max, next_base_fee, recommended_max_fee};

use crate::block::BlockHeader;
use crate::config::{FeeEstimatorConfig, FeeParams};
use crate::errors::EstimateError;
use crate::record::{BlockFeeRecord, Eip1559Fees};

/// Stateless EIP-1559 fee estimator
///
/// # Examples
///
/// ```rust
/// use alloy_chains::NamedChain;
/// use feescan::{FeeEstimator, FeeEstimatorConfig};
///
/// // Default parameters
/// let estimator = FeeEstimator::default();
///
/// // Parameters resolved for one chain
/// let config = FeeEstimatorConfig::default();
/// let estimator = FeeEstimator::for_chain(&config, NamedChain::Mainnet);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeeEstimator {
    params: FeeParams,
}

impl FeeEstimator {
    /// Create an estimator with explicit parameters
    pub fn new(params: FeeParams) -> Self {
        Self { params }
    }

    /// Create an estimator with the effective parameters for a chain
    pub fn for_chain(config: &FeeEstimatorConfig, chain: NamedChain) -> Self {
        Self::new(config.params_for(chain))
    }

    /// Parameters this estimator runs with
    pub fn params(&self) -> &FeeParams {
        &self.params
    }

    /// Compute the fee record for one header.
    ///
    /// A missing base fee is not an error: the record comes back with
    /// `eip1559() == false` and no fee section.
    ///
    /// # Errors
    ///
    /// - [`EstimateError::DivisionByZero`] when an EIP-1559 header has a zero gas limit
    /// - [`EstimateError::Overflow`] when a fee value does not fit in a U256
    pub fn estimate(&self, header: &BlockHeader) -> Result<BlockFeeRecord, EstimateError> {
        let record = BlockFeeRecord::legacy(header);

        let Some(base_fee_per_gas) = header.base_fee_per_gas else {
            return Ok(record);
        };

        let block_number = header.number;
        let priority_fees = self.params.priority_fees;

        let base_fee_per_gas_expected = next_base_fee(
            base_fee_per_gas,
            header.gas_used,
            header.gas_limit,
            self.params.base_fee_max_change_denominator,
        )
        .map_err(|e| EstimateError::arithmetic(block_number, e))?;

        let max_fee_per_gas = priority_fees
            .try_map(|priority_fee| {
                recommended_max_fee(
                    base_fee_per_gas_expected,
                    priority_fee,
                    self.params.max_fee_base_multiplier,
                )
            })
            .map_err(|e| EstimateError::arithmetic(block_number, e))?;

        Ok(record.with_fees(Eip1559Fees {
            base_fee_per_gas,
            base_fee_per_gas_expected,
            max_priority_fee_per_gas: priority_fees,
            max_fee_per_gas,
        }))
    }
}

/// Estimate one header with the default parameters.
///
/// Shorthand for `FeeEstimator::default().estimate(header)`.
pub fn estimate(header: &BlockHeader) -> Result<BlockFeeRecord, EstimateError> {
    FeeEstimator::default().estimate(header)
}
