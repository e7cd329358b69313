//! Fee model constants
//!
//! Default values for the estimator. Every one of them can be overridden
//! through [`FeeEstimatorConfig`](crate::FeeEstimatorConfig); the defaults
//! reproduce the default fee rule exactly.

use std::num::NonZeroU64;

use alloy_eips::eip1559::DEFAULT_BASE_FEE_MAX_CHANGE_DENOMINATOR;

use crate::types::fees::TierFees;

/// Bound on the relative base fee change between consecutive blocks (1/8)
pub const BASE_FEE_MAX_CHANGE_DENOMINATOR: NonZeroU64 =
    match NonZeroU64::new(DEFAULT_BASE_FEE_MAX_CHANGE_DENOMINATOR) {
        Some(denominator) => denominator,
        None => panic!("base fee max change denominator must be nonzero"),
    };

/// Factor applied to the expected base fee when recommending a max fee
pub const MAX_FEE_BASE_MULTIPLIER: u64 = 2;

/// Recommended priority fee for the eco tier (1.2 gwei)
pub const ECO_MAX_PRIORITY_FEE_PER_GAS: u64 = 1_200_000_000;

/// Recommended priority fee for the standard tier (1.5 gwei)
pub const STANDARD_MAX_PRIORITY_FEE_PER_GAS: u64 = 1_500_000_000;

/// Recommended priority fee for the fast tier (1.8 gwei)
pub const FAST_MAX_PRIORITY_FEE_PER_GAS: u64 = 1_800_000_000;

/// Default priority fee recommendations for all tiers
pub const DEFAULT_PRIORITY_FEES: TierFees = TierFees::from_wei_unchecked(
    ECO_MAX_PRIORITY_FEE_PER_GAS,
    STANDARD_MAX_PRIORITY_FEE_PER_GAS,
    FAST_MAX_PRIORITY_FEE_PER_GAS,
);
