// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for type safety across feescan.
//!
//! - Fee tiers and per-tier fee values

pub mod fees;

// Note: Public types are re-exported from lib.rs, not here
