// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for record sinks and the persisted record shape.

use std::path::PathBuf;

use alloy_primitives::BlockHash;

use super::ConfigError;
use crate::types::fees::FeeTier;

/// Errors that can occur when handing a record to a [`FeeRecordSink`](crate::FeeRecordSink).
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// A record for this block hash was already saved.
    ///
    /// Records are handed over exactly once; a second save indicates the
    /// upstream delivered the same block twice.
    #[error("Record for block {hash} was already saved")]
    DuplicateRecord {
        /// Hash of the duplicated block
        hash: BlockHash,
    },

    /// Filesystem failure while writing records.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A record could not be serialized.
    #[error("Failed to serialize record: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SinkError {
    /// Create an `Io` error for a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SinkError::Io {
            path: path.into(),
            source,
        }
    }
}

/// A persisted record whose fee fields are missing, unexpected or inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordDecodeError {
    /// `eip1559` is true but a fee field is missing.
    #[error("Record {hash} is marked eip1559 but is missing {field}")]
    MissingFeeField {
        /// Hash of the malformed record
        hash: BlockHash,
        /// Name of the missing field
        field: &'static str,
    },

    /// A tier set is not ordered `eco <= standard <= fast`.
    #[error("Record {hash} has unordered {kind} tiers: {source}")]
    UnorderedTiers {
        /// Hash of the malformed record
        hash: BlockHash,
        /// Which tier set is unordered
        kind: &'static str,
        /// Ordering violation
        #[source]
        source: ConfigError,
    },

    /// A max fee is not `expected * m + tip` with the same `m` as the other tiers.
    #[error("Record {hash} has an inconsistent {tier} max fee")]
    InconsistentMaxFee {
        /// Hash of the malformed record
        hash: BlockHash,
        /// First tier found inconsistent
        tier: FeeTier,
    },

    /// `eip1559` is false but fee fields are present.
    #[error("Record {hash} is not marked eip1559 but carries fee fields")]
    UnexpectedFeeFields {
        /// Hash of the malformed record
        hash: BlockHash,
    },
}
