// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for feescan integration tests
//!
//! Header builders for the common block shapes and a sink that can be told to
//! fail, so pipeline behavior can be checked without touching the filesystem.

#![allow(dead_code)]

use alloy_primitives::{BlockHash, BlockNumber, U256};
use async_trait::async_trait;
use feescan::{BlockFeeRecord, BlockHeader, FeeRecordSink, SinkError, SinkStats};
use std::collections::HashSet;
use std::sync::Mutex;

/// 100 gwei
pub const BASE_FEE_100_GWEI: u64 = 100_000_000_000;

/// Gas limit used by the mainnet-like scenarios
pub const GAS_LIMIT: u64 = 15_000_000;

/// Distinct hash derived from a block number
pub fn hash_for(number: BlockNumber) -> BlockHash {
    BlockHash::left_padding_from(&number.to_be_bytes())
}

/// EIP-1559 header with the given usage and base fee
pub fn eip1559_header(number: BlockNumber, gas_used: u64, gas_limit: u64, base_fee: u64) -> BlockHeader {
    BlockHeader::new(hash_for(number), number, 1_700_000_000 + number * 12, gas_used, gas_limit)
        .with_size(50_000)
        .with_base_fee(U256::from(base_fee))
}

/// Header without a base fee
pub fn legacy_header(number: BlockNumber) -> BlockHeader {
    BlockHeader::new(hash_for(number), number, 1_400_000_000 + number * 15, 4_000_000, 8_000_000)
        .with_size(20_000)
}

/// Mock sink that records saves in order and fails for chosen block numbers
///
/// # Example
///
/// ```rust,ignore
/// let sink = FlakySink::new().failing_on([3, 7]);
/// let pipeline = FeeRecordPipeline::new(FeeEstimator::default(), sink);
/// ```
#[derive(Default)]
pub struct FlakySink {
    fail_on: HashSet<BlockNumber>,
    saved: Mutex<Vec<BlockFeeRecord>>,
    failed: Mutex<u64>,
}

impl FlakySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every save whose record has one of these block numbers
    pub fn failing_on(mut self, numbers: impl IntoIterator<Item = BlockNumber>) -> Self {
        self.fail_on = numbers.into_iter().collect();
        self
    }

    /// Records accepted so far, in save order
    pub fn saved(&self) -> Vec<BlockFeeRecord> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeeRecordSink for FlakySink {
    async fn save(&self, record: BlockFeeRecord) -> Result<(), SinkError> {
        if self.fail_on.contains(&record.number()) {
            *self.failed.lock().unwrap() += 1;
            return Err(SinkError::io(
                "/dev/full",
                std::io::Error::other("no space left on device"),
            ));
        }
        self.saved.lock().unwrap().push(record);
        Ok(())
    }

    async fn stats(&self) -> SinkStats {
        let saved = self.saved.lock().unwrap();
        SinkStats {
            saved: saved.len() as u64,
            eip1559: saved.iter().filter(|r| r.eip1559()).count() as u64,
            failed: *self.failed.lock().unwrap(),
        }
    }

    fn name(&self) -> &'static str {
        "FlakySink"
    }
}
