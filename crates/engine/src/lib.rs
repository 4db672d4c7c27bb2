//! Baseline tracking and threshold evaluation.
//!
//! The tracker keeps per-pair rolling state for one polling cycle; the
//! evaluator is a pure decision layer on top of it.

pub mod baseline;
pub mod evaluator;

pub use baseline::*;
pub use evaluator::*;
