//! Aggregated analysis reports, one per text sample.

use crate::analysis::entropy::{self, EntropyComparison, EntropyScore};
use crate::analysis::frequency::{self, EnglishComparison, FrequencyTable, IcReport};
use crate::analysis::kasiski::{self, KeyLengthEstimate};

/// Default cap on candidate key lengths for [`AnalysisReport::of`].
pub const DEFAULT_MAX_KEY_LENGTH: usize = 20;

/// Every statistic the engine derives from one text sample.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisReport {
    /// Letter counts and percentages.
    pub frequency: FrequencyTable,
    /// Divergence from the English reference distribution.
    pub english: EnglishComparison,
    /// Entropy with normalized score and rating.
    pub entropy: EntropyScore,
    /// Bigram conditional entropy in bits.
    pub conditional_bits: f64,
    /// Index of coincidence with interpretation.
    pub ic: IcReport,
    /// Kasiski key length estimate; absent for short or repeat-free
    /// text.
    pub key_length: Option<KeyLengthEstimate>,
}

impl AnalysisReport {
    /// Runs the full analysis battery over one sample.
    #[must_use]
    pub fn of(input: &str) -> Self {
        Self {
            frequency: FrequencyTable::of(input),
            english: frequency::compare_with_english(input),
            entropy: EntropyScore::of(input),
            conditional_bits: entropy::conditional_entropy(input),
            ic: frequency::index_of_coincidence(input),
            key_length: kasiski::estimate_key_length(input, DEFAULT_MAX_KEY_LENGTH),
        }
    }
}

/// Plaintext and ciphertext reports side by side, with the entropy gain
/// between them.
#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonReport {
    /// Full report for the plaintext.
    pub plaintext: AnalysisReport,
    /// Full report for the ciphertext.
    pub ciphertext: AnalysisReport,
    /// Entropy delta, relative improvement and verdict.
    pub entropy: EntropyComparison,
}

impl ComparisonReport {
    /// Analyzes both samples and the entropy gain between them.
    #[must_use]
    pub fn of(plaintext: &str, ciphertext: &str) -> Self {
        Self {
            plaintext: AnalysisReport::of(plaintext),
            ciphertext: AnalysisReport::of(ciphertext),
            entropy: entropy::compare_entropy(plaintext, ciphertext),
        }
    }
}
