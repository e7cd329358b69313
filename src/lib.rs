// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! # feescan
//!
//! Per-block EIP-1559 fee estimation for EVM chains.
//!
//! For every block header, feescan predicts the next block's base fee and
//! derives three tiers (eco, standard, fast) of recommended
//! `maxPriorityFeePerGas` / `maxFeePerGas` values. Headers without a base fee
//! (pre-London blocks, non-1559 chains) produce legacy records carrying only
//! the block's identifying fields.
//!
//! ## Layout
//!
//! - [`BlockHeader`]: the minimal header view the estimator reads, convertible
//!   from `alloy_rpc_types::Header`
//! - [`FeeEstimator`] / [`estimate`]: pure per-block estimation
//! - [`BlockFeeRecord`]: the resulting record, serialized in a flat camelCase shape
//! - [`FeeRecordSink`]: where records are handed off ([`MemorySink`],
//!   [`JsonLinesSink`], [`NoOpSink`])
//! - [`FeeRecordPipeline`]: drives a header stream through the estimator into a sink
//! - [`FeeEstimatorConfig`]: default parameters with per-chain overrides
//!
//! ## Quick start
//!
//! ```rust
//! use alloy_primitives::{B256, U256};
//! use feescan::{estimate, BlockHeader, FeeTier};
//!
//! // Block above its gas limit: the next base fee rises
//! let header = BlockHeader::new(B256::ZERO, 17_000_000, 1_700_000_000, 20_000_000, 15_000_000)
//!     .with_base_fee(U256::from(100_000_000_000u64));
//!
//! let record = estimate(&header).unwrap();
//! let fees = record.fees().unwrap();
//!
//! assert_eq!(fees.base_fee_per_gas_expected(), U256::from(104_166_666_666u64));
//! assert_eq!(
//!     fees.max_fee_per_gas().get(FeeTier::Standard),
//!     U256::from(209_833_333_332u64)
//! );
//! ```

mod block;
pub mod config;
mod errors;
mod estimator;
mod pipeline;
mod record;
mod sink;
mod tracing;
mod types;

pub use block::BlockHeader;
pub use config::constants::*;
pub use config::{ChainFeeConfig, FeeEstimatorConfig, FeeEstimatorConfigBuilder, FeeParams};
pub use errors::{
    ArithmeticError, ConfigError, EstimateError, FeescanError, PipelineError, RecordDecodeError,
    SinkError,
};
pub use estimator::{estimate, max, next_base_fee, recommended_max_fee, FeeEstimator};
pub use pipeline::{
    estimate_stream, FailedSave, FeeRecordPipeline, PipelineReport, RejectedHeader,
};
pub use record::{BlockFeeRecord, Eip1559Fees};
pub use sink::{FeeRecordSink, JsonLinesSink, MemorySink, NoOpSink, SinkStats};
pub use types::fees::{FeeTier, TierFees};
