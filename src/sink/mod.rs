//! Record sinks: where finished fee records are handed off
//!
//! The estimator only builds records; persisting them is the job of a
//! [`FeeRecordSink`]. Three backends are provided:
//!
//! - [`MemorySink`]: keeps records in memory, indexed by hash and number
//! - [`JsonLinesSink`]: appends one JSON object per record to a file
//! - [`NoOpSink`]: discards records
//!
//! # Examples
//!
//! ```rust,ignore
//! use feescan::{FeeRecordPipeline, FeeEstimator, JsonLinesSink, MemorySink};
//!
//! // Keep records in memory (tests, short-lived tools)
//! let pipeline = FeeRecordPipeline::new(FeeEstimator::default(), MemorySink::new());
//!
//! // Append records to a file
//! let pipeline = FeeRecordPipeline::new(
//!     FeeEstimator::default(),
//!     JsonLinesSink::new("fees/mainnet.jsonl"),
//! );
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::SinkError;
use crate::record::BlockFeeRecord;

mod jsonl;
mod memory;
mod noop;

pub use jsonl::JsonLinesSink;
pub use memory::MemorySink;
pub use noop::NoOpSink;

/// Statistics about records handed to a sink
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkStats {
    /// Records accepted
    pub saved: u64,
    /// Accepted records that carried EIP-1559 fees
    pub eip1559: u64,
    /// Saves refused or failed
    pub failed: u64,
}

impl SinkStats {
    pub(crate) fn record_saved(&mut self, record: &BlockFeeRecord) {
        self.saved += 1;
        if record.eip1559() {
            self.eip1559 += 1;
        }
    }

    /// Accepted records without a base fee
    pub fn legacy(&self) -> u64 {
        self.saved - self.eip1559
    }
}

impl fmt::Display for SinkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "saved={}, eip1559={}, legacy={}, failed={}",
            self.saved,
            self.eip1559,
            self.legacy(),
            self.failed
        )
    }
}

/// Destination for finished fee records
///
/// Each record is handed over exactly once; the core never re-reads or
/// updates a saved record.
///
/// # Thread Safety
///
/// Implementations must be thread-safe. Use interior mutability (e.g.
/// `tokio::sync::Mutex`) as needed.
#[async_trait]
pub trait FeeRecordSink: Send + Sync {
    /// Persist one record
    async fn save(&self, record: BlockFeeRecord) -> Result<(), SinkError>;

    /// Returns current sink statistics
    async fn stats(&self) -> SinkStats;

    /// Returns a human-readable name for this sink
    ///
    /// Used for logging and debugging.
    fn name(&self) -> &'static str;
}

#[async_trait]
impl<S: FeeRecordSink + ?Sized> FeeRecordSink for std::sync::Arc<S> {
    async fn save(&self, record: BlockFeeRecord) -> Result<(), SinkError> {
        (**self).save(record).await
    }

    async fn stats(&self) -> SinkStats {
        (**self).stats().await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
