// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! EIP-1559 base fee arithmetic
//!
//! Pure integer helpers behind [`FeeEstimator`](super::FeeEstimator). All
//! divisions are floor divisions performed in a fixed order: multiply by the
//! gas delta, divide by the gas limit, then divide by the max change
//! denominator. Dividing before multiplying loses precision, so the
//! expression is never simplified algebraically.
//!
//! | gas used vs. gas limit | next base fee |
//! |---|---|
//! | equal | unchanged |
//! | above | `base + max(base * delta / limit / denom, 1)` |
//! | below | `base - base * delta / limit / denom` |
//!
//! # Example
//!
//! ```
//! use alloy_primitives::U256;
//! use feescan::{next_base_fee, BASE_FEE_MAX_CHANGE_DENOMINATOR};
//!
//! let next = next_base_fee(
//!     U256::from(100_000_000_000u64),
//!     20_000_000,
//!     15_000_000,
//!     BASE_FEE_MAX_CHANGE_DENOMINATOR,
//! )
//! .unwrap();
//! assert_eq!(next, U256::from(104_166_666_666u64));
//! ```

use std::cmp::Ordering;
use std::num::NonZeroU64;

use alloy_primitives::U256;

use crate::errors::ArithmeticError;

/// Returns the greater of two values, or `left` when they are equal.
///
/// ```
/// use alloy_primitives::U256;
/// use feescan::max;
///
/// assert_eq!(max(U256::from(3), U256::from(7)), U256::from(7));
/// assert_eq!(max(U256::from(7), U256::from(3)), U256::from(7));
/// ```
pub fn max(left: U256, right: U256) -> U256 {
    if right > left {
        right
    } else {
        left
    }
}

/// Expected base fee of the block following a block with the given usage.
///
/// The adjustment compares `gas_used` against `gas_limit` directly. Above the
/// limit the fee always rises by at least one wei; below it the fee may stay
/// unchanged when the computed delta floors to zero.
///
/// # Errors
///
/// - [`ArithmeticError::DivisionByZero`] when `gas_limit` is zero
/// - [`ArithmeticError::Overflow`] when an intermediate value leaves the U256 range
pub fn next_base_fee(
    base_fee: U256,
    gas_used: u64,
    gas_limit: u64,
    denominator: NonZeroU64,
) -> Result<U256, ArithmeticError> {
    if gas_limit == 0 {
        return Err(ArithmeticError::DivisionByZero);
    }

    match gas_used.cmp(&gas_limit) {
        Ordering::Equal => Ok(base_fee),
        Ordering::Greater => {
            let fee_delta = max(
                base_fee_delta(base_fee, gas_used - gas_limit, gas_limit, denominator)?,
                U256::from(1u64),
            );
            base_fee
                .checked_add(fee_delta)
                .ok_or(ArithmeticError::Overflow {
                    operation: "base fee increase",
                })
        }
        Ordering::Less => {
            let fee_delta = base_fee_delta(base_fee, gas_limit - gas_used, gas_limit, denominator)?;
            // delta / limit < 1 and denominator >= 1, so fee_delta <= base_fee
            Ok(base_fee - fee_delta)
        }
    }
}

/// `floor(floor(base_fee * gas_delta / gas_limit) / denominator)`
fn base_fee_delta(
    base_fee: U256,
    gas_delta: u64,
    gas_limit: u64,
    denominator: NonZeroU64,
) -> Result<U256, ArithmeticError> {
    let scaled = base_fee
        .checked_mul(U256::from(gas_delta))
        .ok_or(ArithmeticError::Overflow {
            operation: "base fee delta",
        })?;
    Ok(scaled / U256::from(gas_limit) / U256::from(denominator.get()))
}

/// Max fee per gas recommendation: `expected_base_fee * multiplier + priority_fee`.
///
/// The multiplier is headroom against base fee movement over the next block,
/// the same heuristic common wallets apply.
///
/// ```
/// use alloy_primitives::U256;
/// use feescan::recommended_max_fee;
///
/// let max_fee = recommended_max_fee(
///     U256::from(100_000_000_000u64),
///     U256::from(1_200_000_000u64),
///     2,
/// )
/// .unwrap();
/// assert_eq!(max_fee, U256::from(201_200_000_000u64));
/// ```
pub fn recommended_max_fee(
    expected_base_fee: U256,
    priority_fee: U256,
    multiplier: u64,
) -> Result<U256, ArithmeticError> {
    expected_base_fee
        .checked_mul(U256::from(multiplier))
        .and_then(|headroom| headroom.checked_add(priority_fee))
        .ok_or(ArithmeticError::Overflow {
            operation: "max fee recommendation",
        })
}
