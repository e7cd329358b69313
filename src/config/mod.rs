//! Configuration for fee estimation
//!
//! This module exposes the fee model's fixed constants as parameters, with
//! defaults that reproduce the standard rule exactly, plus optional per-chain
//! overrides.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use feescan::{FeeEstimator, FeeEstimatorConfig};
//!
//! let config = FeeEstimatorConfig::default();
//! let estimator = FeeEstimator::new(config.params());
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use alloy_chains::NamedChain;
//! use alloy_primitives::U256;
//! use feescan::{FeeEstimatorConfigBuilder, TierFees};
//!
//! let polygon_tips = TierFees::new(
//!     U256::from(30_000_000_000u64),
//!     U256::from(35_000_000_000u64),
//!     U256::from(45_000_000_000u64),
//! )
//! .unwrap();
//!
//! let config = FeeEstimatorConfigBuilder::new()
//!     .max_fee_base_multiplier(3)
//!     .chain_priority_fees(NamedChain::Polygon, polygon_tips)
//!     .build();
//!
//! assert_eq!(config.params_for(NamedChain::Polygon).priority_fees, polygon_tips);
//! assert_eq!(config.params_for(NamedChain::Mainnet).max_fee_base_multiplier, 3);
//! ```

use std::collections::HashMap;
use std::num::NonZeroU64;

use alloy_chains::NamedChain;

use crate::types::fees::TierFees;

pub mod constants;

use constants::{BASE_FEE_MAX_CHANGE_DENOMINATOR, DEFAULT_PRIORITY_FEES, MAX_FEE_BASE_MULTIPLIER};

/// Effective parameters of the fee model
///
/// This is what a [`FeeEstimator`](crate::FeeEstimator) runs with. Obtain one
/// from [`FeeEstimatorConfig::params`] or [`FeeEstimatorConfig::params_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeParams {
    /// Denominator bounding the per-block base fee change
    /// Default: 8
    pub base_fee_max_change_denominator: NonZeroU64,

    /// Factor applied to the expected base fee in max fee recommendations
    /// Default: 2
    pub max_fee_base_multiplier: u64,

    /// Priority fee recommendation per tier
    /// Default: 1.2 / 1.5 / 1.8 gwei
    pub priority_fees: TierFees,
}

impl Default for FeeParams {
    fn default() -> Self {
        Self {
            base_fee_max_change_denominator: BASE_FEE_MAX_CHANGE_DENOMINATOR,
            max_fee_base_multiplier: MAX_FEE_BASE_MULTIPLIER,
            priority_fees: DEFAULT_PRIORITY_FEES,
        }
    }
}

/// Configuration for fee estimation
///
/// Holds global parameters and chain-specific overrides. Use
/// [`FeeEstimatorConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone, Default)]
pub struct FeeEstimatorConfig {
    /// Parameters used when a chain has no override
    pub defaults: FeeParams,

    /// Chain-specific overrides
    pub chain_overrides: HashMap<NamedChain, ChainFeeConfig>,
}

/// Chain-specific configuration overrides
///
/// Each `None` falls back to the global value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChainFeeConfig {
    /// Override the max change denominator for this chain
    pub base_fee_max_change_denominator: Option<NonZeroU64>,

    /// Override the max fee multiplier for this chain
    pub max_fee_base_multiplier: Option<u64>,

    /// Override priority fee tiers for this chain
    pub priority_fees: Option<TierFees>,
}

impl FeeEstimatorConfig {
    /// Global parameters, ignoring chain overrides
    pub fn params(&self) -> FeeParams {
        self.defaults
    }

    /// Effective parameters for a specific chain
    ///
    /// Each overridden field replaces the global value; the rest are inherited.
    ///
    /// # Example
    ///
    /// ```rust
    /// use alloy_chains::NamedChain;
    /// use feescan::{ChainFeeConfig, FeeEstimatorConfig};
    /// use std::num::NonZeroU64;
    ///
    /// let mut config = FeeEstimatorConfig::default();
    /// config.set_chain_override(
    ///     NamedChain::Optimism,
    ///     ChainFeeConfig {
    ///         base_fee_max_change_denominator: NonZeroU64::new(50),
    ///         ..Default::default()
    ///     },
    /// );
    ///
    /// assert_eq!(config.params_for(NamedChain::Optimism).base_fee_max_change_denominator.get(), 50);
    /// assert_eq!(config.params_for(NamedChain::Mainnet).base_fee_max_change_denominator.get(), 8);
    /// ```
    pub fn params_for(&self, chain: NamedChain) -> FeeParams {
        let Some(chain_config) = self.chain_overrides.get(&chain) else {
            return self.defaults;
        };

        FeeParams {
            base_fee_max_change_denominator: chain_config
                .base_fee_max_change_denominator
                .unwrap_or(self.defaults.base_fee_max_change_denominator),
            max_fee_base_multiplier: chain_config
                .max_fee_base_multiplier
                .unwrap_or(self.defaults.max_fee_base_multiplier),
            priority_fees: chain_config
                .priority_fees
                .unwrap_or(self.defaults.priority_fees),
        }
    }

    /// Set chain-specific override
    pub fn set_chain_override(&mut self, chain: NamedChain, config: ChainFeeConfig) {
        self.chain_overrides.insert(chain, config);
    }
}

/// Builder for [`FeeEstimatorConfig`]
///
/// # Example
///
/// ```rust
/// use alloy_chains::NamedChain;
/// use feescan::FeeEstimatorConfigBuilder;
/// use std::num::NonZeroU64;
///
/// let config = FeeEstimatorConfigBuilder::new()
///     .chain_max_change_denominator(NamedChain::Base, NonZeroU64::new(250).unwrap())
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct FeeEstimatorConfigBuilder {
    config: FeeEstimatorConfig,
}

impl FeeEstimatorConfigBuilder {
    /// Create a new builder starting from the default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set global max change denominator
    pub fn base_fee_max_change_denominator(mut self, denominator: NonZeroU64) -> Self {
        self.config.defaults.base_fee_max_change_denominator = denominator;
        self
    }

    /// Set global max fee multiplier
    pub fn max_fee_base_multiplier(mut self, multiplier: u64) -> Self {
        self.config.defaults.max_fee_base_multiplier = multiplier;
        self
    }

    /// Set global priority fee tiers
    pub fn priority_fees(mut self, tiers: TierFees) -> Self {
        self.config.defaults.priority_fees = tiers;
        self
    }

    /// Add chain-specific configuration
    pub fn chain_config(mut self, chain: NamedChain, config: ChainFeeConfig) -> Self {
        self.config.set_chain_override(chain, config);
        self
    }

    /// Convenience: set the max change denominator for a specific chain
    pub fn chain_max_change_denominator(mut self, chain: NamedChain, denominator: NonZeroU64) -> Self {
        self.chain_entry(chain).base_fee_max_change_denominator = Some(denominator);
        self
    }

    /// Convenience: set priority fee tiers for a specific chain
    pub fn chain_priority_fees(mut self, chain: NamedChain, tiers: TierFees) -> Self {
        self.chain_entry(chain).priority_fees = Some(tiers);
        self
    }

    /// Build the final configuration
    pub fn build(self) -> FeeEstimatorConfig {
        self.config
    }

    fn chain_entry(&mut self, chain: NamedChain) -> &mut ChainFeeConfig {
        self.config.chain_overrides.entry(chain).or_default()
    }
}
