//! No-operation sink that discards records

use async_trait::async_trait;

use super::{FeeRecordSink, SinkStats};
use crate::errors::SinkError;
use crate::record::BlockFeeRecord;

/// A sink that accepts and discards every record
///
/// Use this when only the pipeline report matters, or when records are
/// consumed through [`estimate_stream`](crate::estimate_stream) instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

#[async_trait]
impl FeeRecordSink for NoOpSink {
    async fn save(&self, _record: BlockFeeRecord) -> Result<(), SinkError> {
        Ok(())
    }

    async fn stats(&self) -> SinkStats {
        // Nothing is tracked
        SinkStats::default()
    }

    fn name(&self) -> &'static str {
        "NoOpSink"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{estimate, BlockHeader};
    use alloy_primitives::BlockHash;

    #[tokio::test]
    async fn test_noop_sink_accepts_duplicates() {
        let sink = NoOpSink;
        let record = estimate(&BlockHeader::new(BlockHash::ZERO, 1, 0, 0, 1)).unwrap();

        assert!(sink.save(record.clone()).await.is_ok());
        assert!(sink.save(record).await.is_ok());
        assert_eq!(sink.stats().await, SinkStats::default());
    }
}
