//! Cryptanalysis statistics: frequency, entropy and key-length
//! estimation over arbitrary text.
//!
//! Every routine here is a pure single-pass (or bounded double-pass)
//! computation over its input; nothing is cached between calls.

pub mod entropy;
pub mod frequency;
pub mod kasiski;
mod report;

pub use report::{AnalysisReport, ComparisonReport, DEFAULT_MAX_KEY_LENGTH};
