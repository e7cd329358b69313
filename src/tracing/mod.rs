//! Tracing spans for the fee pipeline.
//!
//! Span construction lives here rather than in `#[instrument]` attributes so
//! field names stay consistent across call sites.

pub(crate) mod spans;
