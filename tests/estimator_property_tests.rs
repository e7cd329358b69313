// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for fee estimation
//!
//! These tests use proptest to check the base fee rule and the tier
//! recommendations against a straightforward u128 oracle over a wide range of
//! block shapes.

use alloy_primitives::{BlockHash, U256};
use feescan::{estimate, BlockHeader, EstimateError, FeeTier};
use proptest::prelude::*;

// Gas limits seen on real chains, up to well above mainnet
fn arb_gas_limit() -> impl Strategy<Value = u64> {
    1u64..=60_000_000
}

// Base fees from 1 wei to ~18 ETH per gas
fn arb_base_fee() -> impl Strategy<Value = u64> {
    prop_oneof![1u64..=1_000, 1_000_000_000u64..=500_000_000_000, 1u64..=u64::MAX]
}

// (gas_limit, gas_used) with gas_used strictly below the limit
fn arb_underfull_block() -> impl Strategy<Value = (u64, u64)> {
    arb_gas_limit().prop_flat_map(|gas_limit| (Just(gas_limit), 0..gas_limit))
}

fn header(gas_used: u64, gas_limit: u64, base_fee: Option<u64>) -> BlockHeader {
    let mut header = BlockHeader::new(BlockHash::repeat_byte(0xab), 1_000, 0, gas_used, gas_limit);
    header.base_fee_per_gas = base_fee.map(U256::from);
    header
}

// Same rule in plain integers: multiply, divide by the limit, divide by 8
fn oracle_next_base_fee(base_fee: u64, gas_used: u64, gas_limit: u64) -> u128 {
    let base = u128::from(base_fee);
    let (used, limit) = (u128::from(gas_used), u128::from(gas_limit));
    if used > limit {
        base + (base * (used - limit) / limit / 8).max(1)
    } else {
        base - base * (limit - used) / limit / 8
    }
}

proptest! {
    /// Property: a block using exactly its gas limit leaves the base fee unchanged
    #[test]
    fn prop_full_block_keeps_base_fee(
        gas_limit in arb_gas_limit(),
        base_fee in arb_base_fee(),
    ) {
        let record = estimate(&header(gas_limit, gas_limit, Some(base_fee))).unwrap();
        prop_assert_eq!(
            record.fees().unwrap().base_fee_per_gas_expected(),
            U256::from(base_fee)
        );
    }

    /// Property: above the limit the base fee rises by at least one wei
    #[test]
    fn prop_overfull_block_raises_base_fee(
        gas_limit in arb_gas_limit(),
        excess in 1u64..=30_000_000,
        base_fee in arb_base_fee(),
    ) {
        let gas_used = gas_limit + excess;
        let expected = estimate(&header(gas_used, gas_limit, Some(base_fee)))
            .unwrap()
            .fees()
            .unwrap()
            .base_fee_per_gas_expected();

        prop_assert!(expected > U256::from(base_fee));
        prop_assert_eq!(expected, U256::from(oracle_next_base_fee(base_fee, gas_used, gas_limit)));
    }

    /// Property: below the limit the base fee never rises and drops at most 1/8
    #[test]
    fn prop_underfull_block_lowers_base_fee(
        (gas_limit, gas_used) in arb_underfull_block(),
        base_fee in arb_base_fee(),
    ) {
        let expected = estimate(&header(gas_used, gas_limit, Some(base_fee)))
            .unwrap()
            .fees()
            .unwrap()
            .base_fee_per_gas_expected();

        prop_assert!(expected <= U256::from(base_fee));
        prop_assert!(expected >= U256::from(base_fee - base_fee / 8));
        prop_assert_eq!(expected, U256::from(oracle_next_base_fee(base_fee, gas_used, gas_limit)));
    }

    /// Property: every tier's max fee is twice the expected base fee plus its tip
    #[test]
    fn prop_max_fee_formula(
        gas_used in 0u64..=60_000_000,
        gas_limit in arb_gas_limit(),
        base_fee in arb_base_fee(),
    ) {
        let record = estimate(&header(gas_used, gas_limit, Some(base_fee))).unwrap();
        let fees = record.fees().unwrap();

        for tier in FeeTier::ALL {
            let (tip, max_fee) = fees.recommendation(tier);
            prop_assert_eq!(max_fee, fees.base_fee_per_gas_expected() * U256::from(2u64) + tip);
        }
    }

    /// Property: faster tiers never recommend less than slower ones
    #[test]
    fn prop_tiers_are_ordered(
        gas_used in 0u64..=60_000_000,
        gas_limit in arb_gas_limit(),
        base_fee in arb_base_fee(),
    ) {
        let record = estimate(&header(gas_used, gas_limit, Some(base_fee))).unwrap();
        let fees = record.fees().unwrap();

        for tiers in [fees.max_priority_fee_per_gas(), fees.max_fee_per_gas()] {
            prop_assert!(tiers.eco() <= tiers.standard());
            prop_assert!(tiers.standard() <= tiers.fast());
        }
    }

    /// Property: estimation is deterministic
    #[test]
    fn prop_estimate_is_deterministic(
        gas_used in 0u64..=60_000_000,
        gas_limit in 0u64..=60_000_000,
        base_fee in proptest::option::of(arb_base_fee()),
    ) {
        let header = header(gas_used, gas_limit, base_fee);
        prop_assert_eq!(estimate(&header), estimate(&header));
    }

    /// Property: a zero gas limit always rejects an EIP-1559 header
    #[test]
    fn prop_zero_gas_limit_rejected(
        gas_used in any::<u64>(),
        base_fee in arb_base_fee(),
    ) {
        prop_assert_eq!(
            estimate(&header(gas_used, 0, Some(base_fee))),
            Err(EstimateError::DivisionByZero { block_number: 1_000 })
        );
    }

    /// Property: headers without a base fee always yield legacy records
    #[test]
    fn prop_missing_base_fee_is_legacy(
        gas_used in any::<u64>(),
        gas_limit in any::<u64>(),
    ) {
        let record = estimate(&header(gas_used, gas_limit, None)).unwrap();
        prop_assert!(!record.eip1559());
        prop_assert!(record.fees().is_none());
        prop_assert_eq!(record.gas_used(), gas_used);
        prop_assert_eq!(record.gas_limit(), gas_limit);
    }
}
