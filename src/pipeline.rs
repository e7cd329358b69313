// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Header stream processing
//!
//! Connects a source of block headers to a [`FeeRecordSink`] through a
//! [`FeeEstimator`]. The pipeline owns the logging: it reports rejected
//! headers and failed saves, and never stops a run because of one bad block.
//!
//! # Examples
//!
//! ```rust
//! use alloy_primitives::{B256, U256};
//! use feescan::{BlockHeader, FeeEstimator, FeeRecordPipeline, MemorySink};
//! use futures::stream;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let headers = vec![
//!     BlockHeader::new(B256::repeat_byte(1), 1, 0, 20_000_000, 15_000_000)
//!         .with_base_fee(U256::from(100_000_000_000u64)),
//!     // Zero gas limit: rejected, the run continues
//!     BlockHeader::new(B256::repeat_byte(2), 2, 0, 0, 0)
//!         .with_base_fee(U256::from(100_000_000_000u64)),
//!     BlockHeader::new(B256::repeat_byte(3), 3, 0, 10_000_000, 15_000_000),
//! ];
//!
//! let pipeline = FeeRecordPipeline::new(FeeEstimator::default(), MemorySink::new());
//! let report = pipeline.run(stream::iter(headers)).await;
//!
//! assert_eq!(report.saved, 2);
//! assert_eq!(report.rejected.len(), 1);
//! assert_eq!(pipeline.sink().len().await, 2);
//! # });
//! ```

use std::fmt;
use std::pin::pin;

use alloy_primitives::{BlockHash, BlockNumber};
use futures::stream::{Stream, StreamExt};
use tracing::{debug, error, info, warn, Instrument};

use crate::block::BlockHeader;
use crate::errors::{EstimateError, PipelineError, SinkError};
use crate::estimator::FeeEstimator;
use crate::record::BlockFeeRecord;
use crate::sink::FeeRecordSink;
use crate::tracing::spans;

/// A header the estimator refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedHeader {
    /// Block number
    pub number: BlockNumber,
    /// Block hash
    pub hash: BlockHash,
    /// Why it was rejected
    pub error: EstimateError,
}

/// A record the sink did not accept
#[derive(Debug)]
pub struct FailedSave {
    /// Block number
    pub number: BlockNumber,
    /// Block hash
    pub hash: BlockHash,
    /// Sink failure
    pub error: SinkError,
}

/// Outcome of one [`FeeRecordPipeline::run`]
#[derive(Debug, Default)]
pub struct PipelineReport {
    /// Headers pulled from the stream
    pub received: u64,
    /// Records accepted by the sink
    pub saved: u64,
    /// Saved records that carried EIP-1559 fees
    pub eip1559: u64,
    /// Headers rejected by the estimator, in stream order
    pub rejected: Vec<RejectedHeader>,
    /// Records the sink refused, in stream order
    pub failed_saves: Vec<FailedSave>,
}

impl PipelineReport {
    /// Saved records without a base fee
    pub fn legacy(&self) -> u64 {
        self.saved - self.eip1559
    }

    /// True when every received header ended up in the sink
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty() && self.failed_saves.is_empty()
    }
}

impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "received={}, saved={}, eip1559={}, legacy={}, rejected={}, failed_saves={}",
            self.received,
            self.saved,
            self.eip1559,
            self.legacy(),
            self.rejected.len(),
            self.failed_saves.len()
        )
    }
}

/// Drives block headers through a [`FeeEstimator`] into a [`FeeRecordSink`]
///
/// Headers are handled one at a time in stream order, so records reach the
/// sink in the order their headers arrived.
#[derive(Debug)]
pub struct FeeRecordPipeline<S> {
    estimator: FeeEstimator,
    sink: S,
}

impl<S: FeeRecordSink> FeeRecordPipeline<S> {
    /// Create a pipeline
    pub fn new(estimator: FeeEstimator, sink: S) -> Self {
        Self { estimator, sink }
    }

    /// Estimator used by this pipeline
    pub fn estimator(&self) -> &FeeEstimator {
        &self.estimator
    }

    /// Sink records are saved to
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the pipeline, returning its sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Estimate one header and save the resulting record.
    ///
    /// Returns a copy of the saved record.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Estimate`] when the header is rejected (nothing is saved)
    /// - [`PipelineError::Sink`] when the sink refuses the record
    pub async fn process(&self, header: BlockHeader) -> Result<BlockFeeRecord, PipelineError> {
        let span = spans::process_header(header.number, header.hash);
        async move {
            let record = self.estimator.estimate(&header)?;
            self.sink.save(record.clone()).await?;
            debug!(eip1559 = record.eip1559(), "Saved fee record");
            Ok(record)
        }
        .instrument(span)
        .await
    }

    /// Process every header of a stream, continuing past failures.
    ///
    /// Rejected headers are logged at `warn` and failed saves at `error`; both
    /// are listed in the returned report so the caller can decide whether to
    /// retry, skip or halt.
    pub async fn run<St>(&self, headers: St) -> PipelineReport
    where
        St: Stream<Item = BlockHeader>,
    {
        let span = spans::run_pipeline(self.sink.name());
        async move {
            let mut headers = pin!(headers);
            let mut report = PipelineReport::default();

            while let Some(header) = headers.next().await {
                report.received += 1;
                let (number, hash) = (header.number, header.hash);

                match self.process(header).await {
                    Ok(record) => {
                        report.saved += 1;
                        if record.eip1559() {
                            report.eip1559 += 1;
                        }
                    }
                    Err(PipelineError::Estimate(error)) => {
                        warn!(block_number = number, block_hash = %hash, %error, "Rejected block header");
                        report.rejected.push(RejectedHeader {
                            number,
                            hash,
                            error,
                        });
                    }
                    Err(PipelineError::Sink(error)) => {
                        error!(block_number = number, block_hash = %hash, %error, "Failed to save fee record");
                        report.failed_saves.push(FailedSave {
                            number,
                            hash,
                            error,
                        });
                    }
                }
            }

            info!(%report, "Fee pipeline run finished");
            report
        }
        .instrument(span)
        .await
    }
}

/// Map a header stream to estimation results, without any sink.
///
/// Each item corresponds to one header, in input order. Rejected headers
/// produce an `Err` item and the stream continues.
///
/// ```rust
/// use alloy_primitives::{B256, U256};
/// use feescan::{estimate_stream, BlockHeader, FeeEstimator};
/// use futures::{stream, StreamExt};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let headers = stream::iter(vec![
///     BlockHeader::new(B256::ZERO, 1, 0, 5, 0).with_base_fee(U256::from(10u64)),
///     BlockHeader::new(B256::ZERO, 2, 0, 5, 10),
/// ]);
///
/// let results: Vec<_> = estimate_stream(FeeEstimator::default(), headers).collect().await;
/// assert!(results[0].is_err());
/// assert!(results[1].is_ok());
/// # });
/// ```
pub fn estimate_stream<St>(
    estimator: FeeEstimator,
    headers: St,
) -> impl Stream<Item = Result<BlockFeeRecord, EstimateError>>
where
    St: Stream<Item = BlockHeader>,
{
    headers.map(move |header| estimator.estimate(&header))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{MemorySink, NoOpSink};
    use alloy_primitives::U256;
    use futures::stream;

    fn header(byte: u8, number: BlockNumber, gas_limit: u64, base_fee: Option<u64>) -> BlockHeader {
        let mut header = BlockHeader::new(BlockHash::repeat_byte(byte), number, 0, 10, gas_limit);
        header.base_fee_per_gas = base_fee.map(U256::from);
        header
    }

    #[tokio::test]
    async fn test_process_saves_record() {
        let pipeline = FeeRecordPipeline::new(FeeEstimator::default(), MemorySink::new());
        let record = pipeline.process(header(1, 1, 10, Some(8))).await.unwrap();

        assert_eq!(pipeline.sink().get(&record.hash()).await, Some(record));
    }

    #[tokio::test]
    async fn test_process_rejected_header_saves_nothing() {
        let pipeline = FeeRecordPipeline::new(FeeEstimator::default(), MemorySink::new());
        let err = pipeline.process(header(1, 1, 0, Some(8))).await.unwrap_err();

        assert!(err.is_rejected_header());
        assert!(pipeline.sink().is_empty().await);
    }

    #[tokio::test]
    async fn test_process_duplicate_is_sink_error() {
        let pipeline = FeeRecordPipeline::new(FeeEstimator::default(), MemorySink::new());
        pipeline.process(header(1, 1, 10, Some(8))).await.unwrap();

        let err = pipeline.process(header(1, 1, 10, Some(8))).await.unwrap_err();
        assert!(matches!(err, PipelineError::Sink(SinkError::DuplicateRecord { .. })));
    }

    #[tokio::test]
    async fn test_run_counts_outcomes() {
        let pipeline = FeeRecordPipeline::new(FeeEstimator::default(), MemorySink::new());
        let headers = vec![
            header(1, 1, 10, Some(8)),
            header(2, 2, 0, Some(8)),
            header(3, 3, 10, None),
            header(1, 1, 10, Some(8)),
        ];

        let report = pipeline.run(stream::iter(headers)).await;

        assert_eq!(report.received, 4);
        assert_eq!(report.saved, 2);
        assert_eq!(report.eip1559, 1);
        assert_eq!(report.legacy(), 1);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].number, 2);
        assert_eq!(report.failed_saves.len(), 1);
        assert_eq!(report.failed_saves[0].hash, BlockHash::repeat_byte(1));
        assert!(!report.is_complete());
    }

    #[tokio::test]
    async fn test_run_empty_stream() {
        let pipeline = FeeRecordPipeline::new(FeeEstimator::default(), NoOpSink);
        let report = pipeline.run(stream::empty()).await;

        assert_eq!(report.received, 0);
        assert!(report.is_complete());
        assert_eq!(
            report.to_string(),
            "received=0, saved=0, eip1559=0, legacy=0, rejected=0, failed_saves=0"
        );
    }

    #[tokio::test]
    async fn test_estimate_stream_preserves_order() {
        let headers = stream::iter((1..=5).map(|n| header(n as u8, n, 10, Some(8))));
        let numbers: Vec<_> = estimate_stream(FeeEstimator::default(), headers)
            .map(|result| result.unwrap().number())
            .collect()
            .await;
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_into_sink() {
        let pipeline = FeeRecordPipeline::new(FeeEstimator::default(), MemorySink::new());
        pipeline.process(header(1, 1, 10, None)).await.unwrap();

        let sink = pipeline.into_sink();
        assert_eq!(sink.len().await, 1);
    }
}
