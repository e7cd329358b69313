// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for estimator configuration.

use alloy_primitives::U256;

/// Errors raised while building estimator parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Priority fee tiers must satisfy `eco <= standard <= fast`.
    #[error("Priority fee tiers must be ordered eco <= standard <= fast (got {eco}, {standard}, {fast})")]
    UnorderedTiers {
        /// Eco tier value
        eco: U256,
        /// Standard tier value
        standard: U256,
        /// Fast tier value
        fast: U256,
    },
}
