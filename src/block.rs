// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Block header input
//!
//! [`BlockHeader`] is the subset of a block header the fee estimator reads.
//! It is supplied by whatever follows the chain; an alloy RPC header converts
//! into it directly:
//!
//! ```rust,ignore
//! use alloy_provider::Provider;
//! use feescan::{estimate, BlockHeader};
//!
//! let block = provider.get_block_by_number(BlockNumberOrTag::Latest).await?.unwrap();
//! let record = estimate(&BlockHeader::from(&block.header))?;
//! ```

use alloy_consensus::BlockHeader as ConsensusHeader;
use alloy_primitives::{BlockHash, BlockNumber, U256};
use serde::{Deserialize, Serialize};

/// Header fields consumed by the fee estimator
///
/// A present `base_fee_per_gas` marks an EIP-1559 block. `size` is optional
/// because RPC providers are not required to report it.
///
/// # Examples
///
/// ```
/// use alloy_primitives::{B256, U256};
/// use feescan::BlockHeader;
///
/// let header = BlockHeader::new(B256::ZERO, 17_000_000, 1_681_338_455, 12_000_000, 30_000_000)
///     .with_size(45_000)
///     .with_base_fee(U256::from(25_000_000_000u64));
///
/// assert!(header.is_eip1559());
/// assert_eq!(header.size, Some(45_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockHeader {
    /// Block hash, used as the record identifier
    pub hash: BlockHash,
    /// Block number
    pub number: BlockNumber,
    /// Unix timestamp in seconds
    pub timestamp: u64,
    /// Encoded block size in bytes
    pub size: Option<u64>,
    /// Gas consumed by the block's transactions
    pub gas_used: u64,
    /// Block gas limit; must be nonzero for EIP-1559 blocks
    pub gas_limit: u64,
    /// Base fee per gas in wei, absent before EIP-1559 activation
    pub base_fee_per_gas: Option<U256>,
}

impl BlockHeader {
    /// Create a pre-EIP-1559 header with no size
    pub fn new(
        hash: BlockHash,
        number: BlockNumber,
        timestamp: u64,
        gas_used: u64,
        gas_limit: u64,
    ) -> Self {
        Self {
            hash,
            number,
            timestamp,
            size: None,
            gas_used,
            gas_limit,
            base_fee_per_gas: None,
        }
    }

    /// Set the block size
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the base fee, marking the header as EIP-1559
    pub fn with_base_fee(mut self, base_fee_per_gas: U256) -> Self {
        self.base_fee_per_gas = Some(base_fee_per_gas);
        self
    }

    /// Whether the block carries a base fee
    pub fn is_eip1559(&self) -> bool {
        self.base_fee_per_gas.is_some()
    }
}

impl<H: ConsensusHeader> From<&alloy_rpc_types::Header<H>> for BlockHeader {
    fn from(header: &alloy_rpc_types::Header<H>) -> Self {
        Self {
            hash: header.hash,
            number: header.inner.number(),
            timestamp: header.inner.timestamp(),
            // Sizes that do not fit in u64 cannot come from a real block
            size: header.size.and_then(|size| u64::try_from(size).ok()),
            gas_used: header.inner.gas_used(),
            gas_limit: header.inner.gas_limit(),
            base_fee_per_gas: header.inner.base_fee_per_gas().map(U256::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::b256;

    fn rpc_header(base_fee: Option<u64>, size: Option<U256>) -> alloy_rpc_types::Header {
        alloy_rpc_types::Header {
            hash: b256!("00000000000000000000000000000000000000000000000000000000000000aa"),
            inner: alloy_consensus::Header {
                number: 19_000_000,
                timestamp: 1_705_000_000,
                gas_used: 12_500_000,
                gas_limit: 30_000_000,
                base_fee_per_gas: base_fee,
                ..Default::default()
            },
            total_difficulty: None,
            size,
        }
    }

    #[test]
    fn test_builder_defaults() {
        let header = BlockHeader::new(BlockHash::ZERO, 1, 2, 3, 4);
        assert_eq!(header.size, None);
        assert_eq!(header.base_fee_per_gas, None);
        assert!(!header.is_eip1559());
    }

    #[test]
    fn test_from_rpc_header() {
        let rpc = rpc_header(Some(30_000_000_000), Some(U256::from(62_000u64)));
        let header = BlockHeader::from(&rpc);

        assert_eq!(header.hash, rpc.hash);
        assert_eq!(header.number, 19_000_000);
        assert_eq!(header.timestamp, 1_705_000_000);
        assert_eq!(header.size, Some(62_000));
        assert_eq!(header.gas_used, 12_500_000);
        assert_eq!(header.gas_limit, 30_000_000);
        assert_eq!(header.base_fee_per_gas, Some(U256::from(30_000_000_000u64)));
    }

    #[test]
    fn test_from_rpc_header_without_base_fee() {
        let header = BlockHeader::from(&rpc_header(None, None));
        assert!(!header.is_eip1559());
        assert_eq!(header.size, None);
    }

    #[test]
    fn test_oversized_size_is_dropped() {
        let header = BlockHeader::from(&rpc_header(None, Some(U256::MAX)));
        assert_eq!(header.size, None);
    }

    #[test]
    fn test_serde_is_camel_case() {
        let header = BlockHeader::new(BlockHash::ZERO, 1, 2, 3, 4).with_base_fee(U256::from(5u64));
        let json = serde_json::to_value(&header).unwrap();
        assert!(json.get("gasUsed").is_some());
        assert!(json.get("baseFeePerGas").is_some());

        let back: BlockHeader = serde_json::from_value(json).unwrap();
        assert_eq!(back, header);
    }
}
