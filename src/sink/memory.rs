// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory record sink

use alloy_primitives::{BlockHash, BlockNumber};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::Mutex;
use tracing::debug;

use super::{FeeRecordSink, SinkStats};
use crate::errors::SinkError;
use crate::record::BlockFeeRecord;

/// Internal state for the memory sink
#[derive(Debug, Default)]
struct MemorySinkState {
    /// Records by block hash
    records: HashMap<BlockHash, BlockFeeRecord>,
    /// Block hashes by number; reorgs can put several hashes at one height
    by_number: BTreeMap<BlockNumber, Vec<BlockHash>>,
    stats: SinkStats,
}

/// In-memory sink indexed by block hash and block number
///
/// Rejects a second record for the same hash with
/// [`SinkError::DuplicateRecord`]. Records for different hashes at the same
/// height (reorged blocks) are all kept.
///
/// # Examples
///
/// ```rust
/// use alloy_primitives::{B256, U256};
/// use feescan::{estimate, BlockHeader, FeeRecordSink, MemorySink};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let sink = MemorySink::new();
/// let header = BlockHeader::new(B256::repeat_byte(1), 7, 0, 10, 10)
///     .with_base_fee(U256::from(1_000u64));
///
/// sink.save(estimate(&header).unwrap()).await.unwrap();
/// assert_eq!(sink.len().await, 1);
/// assert!(sink.save(estimate(&header).unwrap()).await.is_err());
/// # });
/// ```
///
/// # Performance
///
/// - Save: O(log n) (BTreeMap insert)
/// - Lookup by hash: O(1) average case
#[derive(Debug, Default)]
pub struct MemorySink {
    state: Mutex<MemorySinkState>,
}

impl MemorySink {
    /// Creates an empty memory sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Record for a block hash
    pub async fn get(&self, hash: &BlockHash) -> Option<BlockFeeRecord> {
        self.state.lock().await.records.get(hash).cloned()
    }

    /// All records at a block height, in save order
    pub async fn by_number(&self, number: BlockNumber) -> Vec<BlockFeeRecord> {
        let state = self.state.lock().await;
        state
            .by_number
            .get(&number)
            .into_iter()
            .flatten()
            .filter_map(|hash| state.records.get(hash).cloned())
            .collect()
    }

    /// All records ordered by block number, then save order
    pub async fn records(&self) -> Vec<BlockFeeRecord> {
        let state = self.state.lock().await;
        state
            .by_number
            .values()
            .flatten()
            .filter_map(|hash| state.records.get(hash).cloned())
            .collect()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.state.lock().await.records.len()
    }

    /// Whether no record has been stored
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl FeeRecordSink for MemorySink {
    async fn save(&self, record: BlockFeeRecord) -> Result<(), SinkError> {
        let mut state = self.state.lock().await;
        let hash = record.hash();

        if state.records.contains_key(&hash) {
            state.stats.failed += 1;
            return Err(SinkError::DuplicateRecord { hash });
        }

        debug!(block_number = record.number(), %hash, "Storing fee record in memory");
        state.stats.record_saved(&record);
        state
            .by_number
            .entry(record.number())
            .or_default()
            .push(hash);
        state.records.insert(hash, record);
        Ok(())
    }

    async fn stats(&self) -> SinkStats {
        self.state.lock().await.stats.clone()
    }

    fn name(&self) -> &'static str {
        "MemorySink"
    }
}
