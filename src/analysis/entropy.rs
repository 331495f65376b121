//! Shannon entropy measurements over the 26-letter alphabet.

use crate::analysis::frequency::{precise, FrequencyTable};
use crate::text::{self, ALPHABET_LEN};

/// Upper bound for letter entropy: log2(26).
pub const MAX_ENTROPY_BITS: f64 = 4.700_439_718_141_092;

/// Normalized score at or above which a distribution rates excellent.
pub const EXCELLENT_SCORE: f64 = 95.0;
/// Normalized score at or above which a distribution rates good.
pub const GOOD_SCORE: f64 = 85.0;
/// Normalized score at or above which a distribution rates moderate;
/// anything lower rates weak.
pub const MODERATE_SCORE: f64 = 70.0;

/// Entropy improvement (in percent) at or above which a cipher's output
/// rates excellent.
pub const EXCELLENT_IMPROVEMENT: f64 = 20.0;
/// Improvement at or above which the verdict is good.
pub const GOOD_IMPROVEMENT: f64 = 10.0;
/// Improvement at or above which the verdict is marginal; below this
/// the ciphertext is no more random than the plaintext.
pub const MARGINAL_IMPROVEMENT: f64 = 2.0;

/// Shannon entropy `H = −Σ p(x) log2 p(x)` of the letter distribution,
/// in bits. Always within `0..=log2(26)`; empty input gives 0.
#[must_use]
pub fn shannon_entropy(input: &str) -> f64 {
    let table = FrequencyTable::of(input);
    distribution_entropy(table.counts(), table.total())
}

/// Qualitative reading of a normalized entropy score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntropyRating {
    /// Nearly uniform distribution.
    Excellent,
    /// Close to uniform.
    Good,
    /// Noticeably skewed.
    Moderate,
    /// Strongly skewed, like natural language.
    Weak,
}

impl EntropyRating {
    fn of(score: f64) -> Self {
        if score >= EXCELLENT_SCORE {
            Self::Excellent
        } else if score >= GOOD_SCORE {
            Self::Good
        } else if score >= MODERATE_SCORE {
            Self::Moderate
        } else {
            Self::Weak
        }
    }
}

/// Entropy of one sample together with its normalized score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntropyScore {
    /// Shannon entropy in bits.
    pub bits: f64,
    /// Maximum attainable entropy, log2(26).
    pub max_bits: f64,
    /// `bits / max_bits` scaled to 0..=100.
    pub normalized: f64,
    /// Qualitative bucket for the normalized score.
    pub rating: EntropyRating,
}

impl EntropyScore {
    /// Scores the letter distribution of `input`.
    #[must_use]
    pub fn of(input: &str) -> Self {
        let bits = shannon_entropy(input);
        let normalized = bits / MAX_ENTROPY_BITS * 100.0;
        Self {
            bits,
            max_bits: MAX_ENTROPY_BITS,
            normalized,
            rating: EntropyRating::of(normalized),
        }
    }
}

/// Conditional entropy `H(Y|X)` of a letter given its predecessor,
/// estimated from adjacent-pair counts. Zero when the text has fewer
/// than two letters.
#[must_use]
pub fn conditional_entropy(input: &str) -> f64 {
    let input = text::normalize(input);
    if input.len() < 2 {
        return 0.0;
    }
    let bytes = input.as_bytes();
    let mut pair_counts = vec![[0usize; ALPHABET_LEN]; ALPHABET_LEN];
    let mut first_counts = [0usize; ALPHABET_LEN];
    for pair in bytes.windows(2) {
        let x = text::letter_index(pair[0]);
        let y = text::letter_index(pair[1]);
        pair_counts[x][y] += 1;
        first_counts[x] += 1;
    }
    let pairs = precise(bytes.len() - 1);

    // H(Y|X) = −Σ p(x,y) log2( p(x,y) / p(x) )
    let mut entropy = 0.0;
    for x in 0..ALPHABET_LEN {
        if first_counts[x] == 0 {
            continue;
        }
        for y in 0..ALPHABET_LEN {
            if pair_counts[x][y] == 0 {
                continue;
            }
            let joint = precise(pair_counts[x][y]) / pairs;
            let conditional = precise(pair_counts[x][y]) / precise(first_counts[x]);
            entropy -= joint * conditional.log2();
        }
    }
    entropy
}

/// Verdict buckets for an entropy comparison, per the improvement
/// threshold constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntropyVerdict {
    /// Improvement at or above [`EXCELLENT_IMPROVEMENT`].
    Excellent,
    /// Improvement at or above [`GOOD_IMPROVEMENT`].
    Good,
    /// Improvement at or above [`MARGINAL_IMPROVEMENT`].
    Marginal,
    /// Ciphertext is no more random than the plaintext.
    Negligible,
}

impl EntropyVerdict {
    fn of(percent_improvement: f64) -> Self {
        if percent_improvement >= EXCELLENT_IMPROVEMENT {
            Self::Excellent
        } else if percent_improvement >= GOOD_IMPROVEMENT {
            Self::Good
        } else if percent_improvement >= MARGINAL_IMPROVEMENT {
            Self::Marginal
        } else {
            Self::Negligible
        }
    }
}

/// Entropy gain from plaintext to ciphertext.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntropyComparison {
    /// Ciphertext entropy minus plaintext entropy, in bits.
    pub delta: f64,
    /// Delta relative to the plaintext entropy, in percent. Zero when
    /// the plaintext entropy is zero.
    pub percent_improvement: f64,
    /// Qualitative bucket for the improvement.
    pub verdict: EntropyVerdict,
}

/// Measures how much a cipher's output gained in entropy over its
/// input.
#[must_use]
pub fn compare_entropy(plaintext: &str, ciphertext: &str) -> EntropyComparison {
    let plain_bits = shannon_entropy(plaintext);
    let cipher_bits = shannon_entropy(ciphertext);
    let delta = cipher_bits - plain_bits;
    let percent_improvement = if plain_bits > 0.0 {
        delta / plain_bits * 100.0
    } else {
        0.0
    };
    EntropyComparison {
        delta,
        percent_improvement,
        verdict: EntropyVerdict::of(percent_improvement),
    }
}

fn distribution_entropy(counts: &[usize; ALPHABET_LEN], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let mut entropy = 0.0;
    for count in counts {
        if *count > 0 {
            let p = precise(*count) / precise(total);
            entropy -= p * p.log2();
        }
    }
    entropy
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn entropy_of_empty_and_single_letter_is_zero() {
        assert_eq!(shannon_entropy(""), 0.0);
        assert_eq!(shannon_entropy("AAAAAAA"), 0.0);
    }

    #[test]
    fn entropy_of_uniform_alphabet_is_maximal() {
        let all_letters: String = ('A'..='Z').collect();
        let bits = shannon_entropy(&all_letters);
        assert!((bits - MAX_ENTROPY_BITS).abs() < 1e-12);
    }

    #[test]
    fn entropy_stays_in_bounds() {
        for input in [
            "",
            "A",
            "HELLO WORLD",
            "The quick brown fox jumps over the lazy dog",
            "ZZZZZZZZZZQ",
        ] {
            let bits = shannon_entropy(input);
            assert!((0.0..=MAX_ENTROPY_BITS).contains(&bits), "{input:?}: {bits}");
        }
    }

    #[test]
    fn two_equiprobable_letters_give_one_bit() {
        assert!((shannon_entropy("ABABABAB") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn score_rates_uniform_text_excellent() {
        let all_letters: String = ('A'..='Z').collect();
        let score = EntropyScore::of(&all_letters);
        assert!((score.normalized - 100.0).abs() < 1e-9);
        assert_eq!(score.rating, EntropyRating::Excellent);
    }

    #[test]
    fn score_rates_degenerate_text_weak() {
        let score = EntropyScore::of("AAAAAAAAAA");
        assert_eq!(score.normalized, 0.0);
        assert_eq!(score.rating, EntropyRating::Weak);
    }

    #[test]
    fn conditional_entropy_of_deterministic_sequence_is_zero() {
        // Every A is followed by B and vice versa.
        assert!(conditional_entropy("ABABABABAB").abs() < 1e-12);
        assert_eq!(conditional_entropy("A"), 0.0);
    }

    #[test]
    fn conditional_entropy_does_not_exceed_marginal_entropy() {
        let text = "THEQUICKBROWNFOXJUMPSOVERTHELAZYDOG";
        assert!(conditional_entropy(text) <= shannon_entropy(text) + 1e-9);
    }

    #[test]
    fn comparison_buckets_follow_the_thresholds() {
        assert_eq!(EntropyVerdict::of(25.0), EntropyVerdict::Excellent);
        assert_eq!(EntropyVerdict::of(15.0), EntropyVerdict::Good);
        assert_eq!(EntropyVerdict::of(5.0), EntropyVerdict::Marginal);
        assert_eq!(EntropyVerdict::of(0.5), EntropyVerdict::Negligible);
        assert_eq!(EntropyVerdict::of(-3.0), EntropyVerdict::Negligible);
    }

    #[test]
    fn comparing_skewed_plaintext_with_flat_ciphertext_improves() {
        let comparison = compare_entropy("AAAAABBBBB", "ABCDEFGHIJ");
        assert!(comparison.delta > 0.0);
        assert!(comparison.percent_improvement > EXCELLENT_IMPROVEMENT);
        assert_eq!(comparison.verdict, EntropyVerdict::Excellent);
    }

    #[test]
    fn zero_entropy_plaintext_gives_zero_improvement() {
        let comparison = compare_entropy("AAAA", "ABCD");
        assert!(comparison.delta > 0.0);
        assert_eq!(comparison.percent_improvement, 0.0);
    }
}
