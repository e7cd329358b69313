//! Span creation helpers for feescan operations.
//!
//! Telemetry concerns are kept apart from business logic: instead of using
//! `#[instrument]` attributes, each instrumented operation has a corresponding
//! span helper function in this module.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     let span = spans::my_operation(param_value);
//!     async move { /* business logic */ }.instrument(span).await
//! }
//! ```
//!
//! The estimator itself is never instrumented; spans belong to the pipeline
//! that drives it.

use alloy_primitives::{BlockHash, BlockNumber};
use tracing::{Level, Span};

/// Create span for running a header stream through the pipeline.
///
/// Parent: None (root span for this operation)
/// Children: process_header spans (one per header)
#[inline]
pub(crate) fn run_pipeline(sink: &'static str) -> Span {
    tracing::span!(Level::INFO, "feescan.run_pipeline", sink = sink)
}

/// Create span for estimating and saving a single header.
///
/// Parent: run_pipeline span, or none when called directly
/// Children: None
#[inline]
pub(crate) fn process_header(block_number: BlockNumber, block_hash: BlockHash) -> Span {
    tracing::debug_span!(
        "feescan.process_header",
        block_number = block_number,
        block_hash = %block_hash,
    )
}
