// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for tiered fee recommendations
//!
//! Recommendations come in three speed tiers. [`TierFees`] keeps one U256 per
//! tier and guarantees `eco <= standard <= fast`.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::errors::{ArithmeticError, ConfigError};

/// Inclusion-speed preference for a fee recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeTier {
    /// Cheapest, slowest inclusion
    Eco,
    /// Default tier
    Standard,
    /// Most expensive, fastest inclusion
    Fast,
}

impl FeeTier {
    /// All tiers, cheapest first
    pub const ALL: [FeeTier; 3] = [FeeTier::Eco, FeeTier::Standard, FeeTier::Fast];

    /// Lowercase tier name, used as the field prefix in persisted records
    pub fn name(&self) -> &'static str {
        match self {
            FeeTier::Eco => "eco",
            FeeTier::Standard => "standard",
            FeeTier::Fast => "fast",
        }
    }
}

impl std::fmt::Display for FeeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One fee-per-gas value (in wei) for each [`FeeTier`]
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use feescan::{FeeTier, TierFees};
///
/// let tiers = TierFees::new(U256::from(1u64), U256::from(2u64), U256::from(3u64)).unwrap();
/// assert_eq!(tiers.get(FeeTier::Standard), U256::from(2u64));
///
/// // Tiers must not decrease with speed
/// assert!(TierFees::new(U256::from(3u64), U256::from(2u64), U256::from(1u64)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TierFees {
    eco: U256,
    standard: U256,
    fast: U256,
}

impl TierFees {
    /// Create tier values, rejecting any that are not ordered eco <= standard <= fast
    pub fn new(eco: U256, standard: U256, fast: U256) -> Result<Self, ConfigError> {
        if eco > standard || standard > fast {
            return Err(ConfigError::UnorderedTiers {
                eco,
                standard,
                fast,
            });
        }
        Ok(Self {
            eco,
            standard,
            fast,
        })
    }

    /// Create tier values from wei amounts that are known to be ordered
    pub(crate) const fn from_wei_unchecked(eco: u64, standard: u64, fast: u64) -> Self {
        Self {
            eco: U256::from_limbs([eco, 0, 0, 0]),
            standard: U256::from_limbs([standard, 0, 0, 0]),
            fast: U256::from_limbs([fast, 0, 0, 0]),
        }
    }

    /// Value for a single tier
    pub fn get(&self, tier: FeeTier) -> U256 {
        match tier {
            FeeTier::Eco => self.eco,
            FeeTier::Standard => self.standard,
            FeeTier::Fast => self.fast,
        }
    }

    /// Eco tier value
    pub const fn eco(&self) -> U256 {
        self.eco
    }

    /// Standard tier value
    pub const fn standard(&self) -> U256 {
        self.standard
    }

    /// Fast tier value
    pub const fn fast(&self) -> U256 {
        self.fast
    }

    /// `(tier, value)` pairs, cheapest first
    pub fn iter(&self) -> impl Iterator<Item = (FeeTier, U256)> + '_ {
        FeeTier::ALL.into_iter().map(move |tier| (tier, self.get(tier)))
    }

    /// Apply a fallible function to every tier.
    ///
    /// The result is not re-validated: `f` must be monotonic for the ordering
    /// to carry over, which holds for `c + x` with `c` shared across tiers.
    pub(crate) fn try_map<F>(&self, mut f: F) -> Result<Self, ArithmeticError>
    where
        F: FnMut(U256) -> Result<U256, ArithmeticError>,
    {
        Ok(Self {
            eco: f(self.eco)?,
            standard: f(self.standard)?,
            fast: f(self.fast)?,
        })
    }
}

impl std::fmt::Display for TierFees {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "eco={} standard={} fast={}",
            self.eco, self.standard, self.fast
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_order() {
        assert!(FeeTier::Eco < FeeTier::Standard);
        assert!(FeeTier::Standard < FeeTier::Fast);
        assert_eq!(FeeTier::ALL.len(), 3);
    }

    #[test]
    fn test_tier_names() {
        assert_eq!(FeeTier::Eco.to_string(), "eco");
        assert_eq!(FeeTier::Standard.name(), "standard");
        assert_eq!(FeeTier::Fast.name(), "fast");
    }

    #[test]
    fn test_tier_serialization() {
        let json = serde_json::to_string(&FeeTier::Standard).unwrap();
        assert_eq!(json, "\"standard\"");
    }

    #[test]
    fn test_new_accepts_equal_tiers() {
        let v = U256::from(5u64);
        let tiers = TierFees::new(v, v, v).unwrap();
        assert_eq!(tiers.eco(), v);
        assert_eq!(tiers.fast(), v);
    }

    #[test]
    fn test_new_rejects_unordered() {
        let err = TierFees::new(U256::from(2u64), U256::from(1u64), U256::from(3u64)).unwrap_err();
        assert!(matches!(err, ConfigError::UnorderedTiers { .. }));

        assert!(TierFees::new(U256::from(1u64), U256::from(3u64), U256::from(2u64)).is_err());
    }

    #[test]
    fn test_unchecked_constructor() {
        let tiers = TierFees::from_wei_unchecked(1, 2, 3);
        assert_eq!(tiers.get(FeeTier::Eco), U256::from(1u64));
        assert_eq!(tiers.get(FeeTier::Standard), U256::from(2u64));
        assert_eq!(tiers.get(FeeTier::Fast), U256::from(3u64));
    }

    #[test]
    fn test_iter_is_cheapest_first() {
        let tiers = TierFees::from_wei_unchecked(10, 20, 30);
        let collected: Vec<_> = tiers.iter().collect();
        assert_eq!(
            collected,
            vec![
                (FeeTier::Eco, U256::from(10u64)),
                (FeeTier::Standard, U256::from(20u64)),
                (FeeTier::Fast, U256::from(30u64)),
            ]
        );
    }

    #[test]
    fn test_try_map() {
        let tiers = TierFees::from_wei_unchecked(1, 2, 3);
        let doubled = tiers.try_map(|v| Ok(v * U256::from(2u64))).unwrap();
        assert_eq!(doubled, TierFees::from_wei_unchecked(2, 4, 6));

        let err = tiers
            .try_map(|_| Err(ArithmeticError::Overflow { operation: "test" }))
            .unwrap_err();
        assert_eq!(err, ArithmeticError::Overflow { operation: "test" });
    }

    #[test]
    fn test_display() {
        let tiers = TierFees::from_wei_unchecked(1, 2, 3);
        assert_eq!(tiers.to_string(), "eco=1 standard=2 fast=3");
    }
}
