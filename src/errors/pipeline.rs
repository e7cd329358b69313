// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the header-to-sink pipeline.

use super::{EstimateError, SinkError};

/// Errors from processing a single header through the pipeline.
///
/// Keeps the two failure sources apart so callers can decide separately
/// whether to skip a bad header or retry a failed write.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The header was rejected by the estimator; no record was produced.
    #[error("Header rejected: {0}")]
    Estimate(#[from] EstimateError),

    /// A record was produced but the sink failed to accept it.
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}

impl PipelineError {
    /// True if the header itself was invalid (as opposed to a sink failure).
    pub fn is_rejected_header(&self) -> bool {
        matches!(self, PipelineError::Estimate(_))
    }
}
