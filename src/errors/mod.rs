//! Error types for the feescan library.
//!
//! This module provides strongly-typed errors for all public APIs in feescan.
//! It follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained error handling (`EstimateError`,
//!   `SinkError`, etc.)
//! - **Unified error type** (`FeescanError`) for convenience when you don't need
//!   to distinguish between error sources
//!
//! # Architecture
//!
//! - [`ArithmeticError`] - Failures of the raw base fee arithmetic
//! - [`EstimateError`] - Headers rejected by the estimator
//! - [`ConfigError`] - Invalid estimator parameters
//! - [`SinkError`] - Failures handing records to a sink
//! - [`RecordDecodeError`] - Inconsistent persisted records
//! - [`PipelineError`] - Per-header pipeline failures (wraps estimate and sink errors)
//!
//! A header without a base fee is never an error; it yields a legacy record.
//!
//! # Examples
//!
//! ```rust
//! use alloy_primitives::{B256, U256};
//! use feescan::{estimate, BlockHeader, FeescanError};
//!
//! fn expected_base_fee(header: &BlockHeader) -> Result<Option<U256>, FeescanError> {
//!     let record = estimate(header)?;
//!     Ok(record.fees().map(|fees| fees.base_fee_per_gas_expected()))
//! }
//!
//! let header = BlockHeader::new(B256::ZERO, 1, 0, 15_000_000, 15_000_000)
//!     .with_base_fee(U256::from(7u64));
//! assert_eq!(expected_base_fee(&header).unwrap(), Some(U256::from(7u64)));
//! ```

mod config;
mod estimate;
mod pipeline;
mod sink;

pub use config::ConfigError;
pub use estimate::{ArithmeticError, EstimateError};
pub use pipeline::PipelineError;
pub use sink::{RecordDecodeError, SinkError};

/// Unified error type for all feescan operations.
///
/// All module-specific error types automatically convert to `FeescanError` via
/// `From` implementations, so you can use `?` to propagate errors naturally.
#[derive(Debug, thiserror::Error)]
pub enum FeescanError {
    /// Header rejected by the estimator.
    #[error("Estimation error: {0}")]
    Estimate(#[from] EstimateError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Record sink failure.
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// Pipeline failure.
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
}
