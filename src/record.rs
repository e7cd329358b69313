// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Fee record output
//!
//! A [`BlockFeeRecord`] is produced once per header and never mutated. The
//! fee section is present exactly when the block carried a base fee.
//!
//! Records serialize to a flat camelCase object, the shape persisted by
//! downstream stores:
//!
//! ```json
//! {
//!   "id": "0x…",
//!   "number": 17000000,
//!   "timestamp": 1681338455,
//!   "size": 45000,
//!   "gasUsed": 20000000,
//!   "gasLimit": 15000000,
//!   "eip1559": true,
//!   "baseFeePerGas": "0x174876e800",
//!   "baseFeePerGasExpected": "0x18408c4aa2",
//!   "ecoMaxPriorityFeePerGasRecommended": "0x47868c00",
//!   "…": "…"
//! }
//! ```
//!
//! Fee fields are omitted for legacy blocks. Deserialization rejects objects
//! whose `eip1559` flag disagrees with the fee fields, whose tiers are not
//! ordered, or whose max fees are not `expected * m + tip` for a single `m`.

use alloy_primitives::{BlockHash, BlockNumber, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::block::BlockHeader;
use crate::errors::RecordDecodeError;
use crate::types::fees::{FeeTier, TierFees};

/// Fee values computed for an EIP-1559 block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eip1559Fees {
    pub(crate) base_fee_per_gas: U256,
    pub(crate) base_fee_per_gas_expected: U256,
    pub(crate) max_priority_fee_per_gas: TierFees,
    pub(crate) max_fee_per_gas: TierFees,
}

impl Eip1559Fees {
    /// Base fee reported by the block
    pub fn base_fee_per_gas(&self) -> U256 {
        self.base_fee_per_gas
    }

    /// Expected base fee of the next block
    pub fn base_fee_per_gas_expected(&self) -> U256 {
        self.base_fee_per_gas_expected
    }

    /// Recommended priority fee per tier
    pub fn max_priority_fee_per_gas(&self) -> &TierFees {
        &self.max_priority_fee_per_gas
    }

    /// Recommended max fee per tier
    pub fn max_fee_per_gas(&self) -> &TierFees {
        &self.max_fee_per_gas
    }

    /// `(max_priority_fee_per_gas, max_fee_per_gas)` for one tier
    pub fn recommendation(&self, tier: FeeTier) -> (U256, U256) {
        (
            self.max_priority_fee_per_gas.get(tier),
            self.max_fee_per_gas.get(tier),
        )
    }
}

/// Fee estimate for one block
///
/// Built by [`FeeEstimator`](crate::FeeEstimator); fields are read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "PersistedRecord", try_from = "PersistedRecord")]
pub struct BlockFeeRecord {
    hash: BlockHash,
    number: BlockNumber,
    timestamp: u64,
    size: Option<u64>,
    gas_used: u64,
    gas_limit: u64,
    fees: Option<Eip1559Fees>,
}

impl BlockFeeRecord {
    /// Copy the identifying fields of a header, leaving fees unset
    pub(crate) fn legacy(header: &BlockHeader) -> Self {
        Self {
            hash: header.hash,
            number: header.number,
            timestamp: header.timestamp,
            size: header.size,
            gas_used: header.gas_used,
            gas_limit: header.gas_limit,
            fees: None,
        }
    }

    pub(crate) fn with_fees(mut self, fees: Eip1559Fees) -> Self {
        self.fees = Some(fees);
        self
    }

    /// Block hash, the record identifier
    pub fn hash(&self) -> BlockHash {
        self.hash
    }

    /// Block number
    pub fn number(&self) -> BlockNumber {
        self.number
    }

    /// Unix timestamp in seconds
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Block timestamp as a UTC datetime, `None` if out of chrono's range
    pub fn block_time(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.timestamp)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Block size in bytes, if reported
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    /// Gas used by the block
    pub fn gas_used(&self) -> u64 {
        self.gas_used
    }

    /// Block gas limit
    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    /// Whether the block carried a base fee
    pub fn eip1559(&self) -> bool {
        self.fees.is_some()
    }

    /// Fee section, present only for EIP-1559 blocks
    pub fn fees(&self) -> Option<&Eip1559Fees> {
        self.fees.as_ref()
    }
}

/// Flat persisted shape of a [`BlockFeeRecord`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedRecord {
    id: BlockHash,
    number: BlockNumber,
    timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
    gas_used: u64,
    gas_limit: u64,
    eip1559: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_fee_per_gas: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_fee_per_gas_expected: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    eco_max_priority_fee_per_gas_recommended: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    standard_max_priority_fee_per_gas_recommended: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fast_max_priority_fee_per_gas_recommended: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    eco_max_fee_per_gas_recommended: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    standard_max_fee_per_gas_recommended: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fast_max_fee_per_gas_recommended: Option<U256>,
}

impl PersistedRecord {
    fn fee_fields(&self) -> [(&'static str, Option<U256>); 8] {
        [
            ("baseFeePerGas", self.base_fee_per_gas),
            ("baseFeePerGasExpected", self.base_fee_per_gas_expected),
            (
                "ecoMaxPriorityFeePerGasRecommended",
                self.eco_max_priority_fee_per_gas_recommended,
            ),
            (
                "standardMaxPriorityFeePerGasRecommended",
                self.standard_max_priority_fee_per_gas_recommended,
            ),
            (
                "fastMaxPriorityFeePerGasRecommended",
                self.fast_max_priority_fee_per_gas_recommended,
            ),
            ("ecoMaxFeePerGasRecommended", self.eco_max_fee_per_gas_recommended),
            (
                "standardMaxFeePerGasRecommended",
                self.standard_max_fee_per_gas_recommended,
            ),
            ("fastMaxFeePerGasRecommended", self.fast_max_fee_per_gas_recommended),
        ]
    }
}

impl From<BlockFeeRecord> for PersistedRecord {
    fn from(record: BlockFeeRecord) -> Self {
        let fees = record.fees;
        let priority = fees.map(|f| f.max_priority_fee_per_gas);
        let max_fee = fees.map(|f| f.max_fee_per_gas);

        Self {
            id: record.hash,
            number: record.number,
            timestamp: record.timestamp,
            size: record.size,
            gas_used: record.gas_used,
            gas_limit: record.gas_limit,
            eip1559: fees.is_some(),
            base_fee_per_gas: fees.map(|f| f.base_fee_per_gas),
            base_fee_per_gas_expected: fees.map(|f| f.base_fee_per_gas_expected),
            eco_max_priority_fee_per_gas_recommended: priority.map(|t| t.eco()),
            standard_max_priority_fee_per_gas_recommended: priority.map(|t| t.standard()),
            fast_max_priority_fee_per_gas_recommended: priority.map(|t| t.fast()),
            eco_max_fee_per_gas_recommended: max_fee.map(|t| t.eco()),
            standard_max_fee_per_gas_recommended: max_fee.map(|t| t.standard()),
            fast_max_fee_per_gas_recommended: max_fee.map(|t| t.fast()),
        }
    }
}

/// Every tier's max fee must be `expected * m + tip` for one shared `m`.
fn check_max_fee_headroom(hash: BlockHash, fees: &Eip1559Fees) -> Result<(), RecordDecodeError> {
    let expected = fees.base_fee_per_gas_expected;
    let headroom = |tier: FeeTier| {
        fees.max_fee_per_gas
            .get(tier)
            .checked_sub(fees.max_priority_fee_per_gas.get(tier))
    };

    let shared = headroom(FeeTier::Eco);
    for tier in FeeTier::ALL {
        let consistent = match (headroom(tier), shared) {
            (Some(h), Some(shared)) if h == shared => {
                if expected.is_zero() {
                    h.is_zero()
                } else {
                    (h % expected).is_zero()
                }
            }
            _ => false,
        };
        if !consistent {
            return Err(RecordDecodeError::InconsistentMaxFee { hash, tier });
        }
    }
    Ok(())
}

impl TryFrom<PersistedRecord> for BlockFeeRecord {
    type Error = RecordDecodeError;

    fn try_from(persisted: PersistedRecord) -> Result<Self, Self::Error> {
        let hash = persisted.id;
        let fields = persisted.fee_fields();

        let fees = if persisted.eip1559 {
            if let Some((field, _)) = fields.iter().find(|(_, value)| value.is_none()) {
                return Err(RecordDecodeError::MissingFeeField {
                    hash,
                    field: *field,
                });
            }
            let [base, expected, eco_tip, standard_tip, fast_tip, eco_max, standard_max, fast_max] =
                fields.map(|(_, value)| value.unwrap_or_default());

            let tiers = |kind: &'static str, eco: U256, standard: U256, fast: U256| {
                TierFees::new(eco, standard, fast).map_err(|source| {
                    RecordDecodeError::UnorderedTiers { hash, kind, source }
                })
            };

            let fees = Eip1559Fees {
                base_fee_per_gas: base,
                base_fee_per_gas_expected: expected,
                max_priority_fee_per_gas: tiers("priority fee", eco_tip, standard_tip, fast_tip)?,
                max_fee_per_gas: tiers("max fee", eco_max, standard_max, fast_max)?,
            };
            check_max_fee_headroom(hash, &fees)?;
            Some(fees)
        } else {
            if fields.iter().any(|(_, value)| value.is_some()) {
                return Err(RecordDecodeError::UnexpectedFeeFields { hash });
            }
            None
        };

        Ok(Self {
            hash,
            number: persisted.number,
            timestamp: persisted.timestamp,
            size: persisted.size,
            gas_used: persisted.gas_used,
            gas_limit: persisted.gas_limit,
            fees,
        })
    }
}
