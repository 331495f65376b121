//! Letter frequency analysis: distributions, comparison against English
//! and the index of coincidence.

use crate::text::{self, ALPHABET_LEN};

/// Relative frequency of each English letter A-Z, in percent.
///
/// Standard corpus figures; every letter has a nonzero entry.
pub const ENGLISH_FREQUENCIES: [f64; ALPHABET_LEN] = [
    8.167, 1.492, 2.782, 4.253, 12.702, 2.228, 2.015, 6.094, 6.966, 0.153, 0.772, 4.025, 2.406,
    6.749, 7.507, 1.929, 0.095, 5.987, 6.327, 9.056, 2.758, 0.978, 2.360, 0.150, 1.974, 0.074,
];

/// Texts with an index of coincidence at or above this are likely
/// monoalphabetic (English plaintext sits near 0.067).
pub const MONOALPHABETIC_IC: f64 = 0.06;

/// Texts with an index of coincidence below this are likely
/// polyalphabetic (uniformly random letters sit near 0.038).
pub const POLYALPHABETIC_IC: f64 = 0.045;

/// Occurrence counts for all 26 letters of a text sample.
///
/// Every letter is present even with a zero count, and percentages sum
/// to 100 (within floating rounding) whenever the total is nonzero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [usize; ALPHABET_LEN],
    total: usize,
}

impl FrequencyTable {
    /// Counts the letters of `input` after normalization.
    #[must_use]
    pub fn of(input: &str) -> Self {
        let mut counts = [0; ALPHABET_LEN];
        let mut total = 0;
        for letter in text::normalize(input).bytes() {
            counts[text::letter_index(letter)] += 1;
            total += 1;
        }
        Self { counts, total }
    }

    /// Occurrences of one letter (case-insensitive); 0 for non-letters.
    #[must_use]
    pub fn count(&self, letter: char) -> usize {
        let upper = letter.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            self.counts[text::letter_index(upper as u8)]
        } else {
            0
        }
    }

    /// Share of one letter in percent; 0 for an empty sample.
    #[must_use]
    pub fn percentage(&self, letter: char) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let count = self.count(letter);
        precise(count) / precise(self.total) * 100.0
    }

    /// Total number of counted letters.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct letters that occur at least once.
    #[must_use]
    pub fn unique_letters(&self) -> usize {
        self.counts.iter().filter(|c| **c > 0).count()
    }

    /// (letter, count, percentage) for all 26 letters in order.
    #[must_use]
    pub fn entries(&self) -> Vec<(char, usize, f64)> {
        (0..ALPHABET_LEN)
            .map(|i| {
                let letter = char::from(text::index_letter(i));
                (letter, self.counts[i], self.percentage(letter))
            })
            .collect()
    }

    pub(crate) fn counts(&self) -> &[usize; ALPHABET_LEN] {
        &self.counts
    }
}

/// Observed frequencies measured against the English reference table.
#[derive(Clone, Debug, PartialEq)]
pub struct EnglishComparison {
    /// Observed minus expected percentage per letter, A-Z.
    pub deltas: [f64; ALPHABET_LEN],
    /// Chi-squared divergence of observed counts from expected counts.
    pub chi_squared: f64,
}

/// Compares a text's letter distribution against standard English.
///
/// Chi-squared is `Σ (observed − expected)² / expected` over counts for
/// all 26 letters; no letter is skipped because every reference entry is
/// nonzero. Empty input yields zeros.
#[must_use]
pub fn compare_with_english(input: &str) -> EnglishComparison {
    let table = FrequencyTable::of(input);
    let mut deltas = [0.0; ALPHABET_LEN];
    let mut chi_squared = 0.0;
    if table.total() > 0 {
        for i in 0..ALPHABET_LEN {
            let letter = char::from(text::index_letter(i));
            deltas[i] = table.percentage(letter) - ENGLISH_FREQUENCIES[i];
            let expected = precise(table.total()) * ENGLISH_FREQUENCIES[i] / 100.0;
            let observed = precise(table.count(letter));
            chi_squared += (observed - expected).powi(2) / expected;
        }
    }
    EnglishComparison {
        deltas,
        chi_squared,
    }
}

/// How an index of coincidence reads, per the threshold constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IcInterpretation {
    /// At or above [`MONOALPHABETIC_IC`]: one alphabet in play.
    LikelyMonoalphabetic,
    /// Between the two thresholds: could be either.
    Ambiguous,
    /// Below [`POLYALPHABETIC_IC`]: several alphabets in play.
    LikelyPolyalphabetic,
}

impl IcInterpretation {
    fn of(value: f64) -> Self {
        if value >= MONOALPHABETIC_IC {
            Self::LikelyMonoalphabetic
        } else if value >= POLYALPHABETIC_IC {
            Self::Ambiguous
        } else {
            Self::LikelyPolyalphabetic
        }
    }
}

/// Index of coincidence with its heuristic interpretation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IcReport {
    /// Probability that two randomly drawn letters coincide.
    pub value: f64,
    /// Heuristic reading of the value.
    pub interpretation: IcInterpretation,
}

/// Computes `Σ f_i(f_i − 1) / (n(n − 1))` over the letter counts.
///
/// Texts with fewer than two letters after normalization get a value of
/// zero, never an error.
#[must_use]
pub fn index_of_coincidence(input: &str) -> IcReport {
    let table = FrequencyTable::of(input);
    let n = table.total();
    let value = if n < 2 {
        0.0
    } else {
        let coincidences: usize = table.counts().iter().map(|f| f * f.saturating_sub(1)).sum();
        precise(coincidences) / precise(n * (n - 1))
    };
    IcReport {
        value,
        interpretation: IcInterpretation::of(value),
    }
}

/// One n-gram with its occurrence count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NGram {
    /// The letter sequence.
    pub gram: String,
    /// How often it appears (overlapping windows counted).
    pub count: usize,
}

/// The `top_k` most frequent n-grams of the normalized text, counted
/// over overlapping windows and sorted by descending count, then
/// alphabetically for determinism.
#[must_use]
pub fn top_ngrams(input: &str, n: usize, top_k: usize) -> Vec<NGram> {
    let input = text::normalize(input);
    if n == 0 || input.len() < n {
        return Vec::new();
    }
    let mut counts = std::collections::HashMap::new();
    for window in input.as_bytes().windows(n) {
        *counts.entry(window).or_insert(0usize) += 1;
    }
    let mut grams: Vec<NGram> = counts
        .into_iter()
        .map(|(gram, count)| NGram {
            gram: String::from_utf8(gram.to_vec()).expect("normalized text is ASCII"),
            count,
        })
        .collect();
    grams.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.gram.cmp(&b.gram)));
    grams.truncate(top_k);
    grams
}

/// Lossless usize-to-f64 for the sizes seen here.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn precise(value: usize) -> f64 {
    value as f64
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn all_letters_present_even_at_zero() {
        let table = FrequencyTable::of("AAB");
        assert_eq!(table.entries().len(), 26);
        assert_eq!(table.count('A'), 2);
        assert_eq!(table.count('Z'), 0);
        assert_eq!(table.unique_letters(), 2);
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        for input in ["HELLO WORLD", "AAAA", "The quick brown fox jumps!"] {
            let table = FrequencyTable::of(input);
            let sum: f64 = table.entries().iter().map(|(_, _, pct)| pct).sum();
            assert!((99.99..=100.01).contains(&sum), "sum {sum} for {input:?}");
        }
    }

    #[test]
    fn empty_text_has_zero_percentages() {
        let table = FrequencyTable::of("");
        assert_eq!(table.total(), 0);
        assert_eq!(table.percentage('E'), 0.0);
    }

    #[test]
    fn reference_table_covers_all_letters() {
        assert!((ENGLISH_FREQUENCIES.iter().sum::<f64>() - 100.0).abs() < 0.1);
        assert!(ENGLISH_FREQUENCIES.iter().all(|f| *f > 0.0));
    }

    #[test]
    fn english_text_scores_lower_chi_squared_than_skewed_text() {
        let english = "IT IS A TRUTH UNIVERSALLY ACKNOWLEDGED THAT A SINGLE MAN \
                       IN POSSESSION OF A GOOD FORTUNE MUST BE IN WANT OF A WIFE";
        let skewed = "ZZZZQQQQXXXXJJJJZZZZQQQQXXXXJJJJ";
        assert!(
            compare_with_english(english).chi_squared
                < compare_with_english(skewed).chi_squared
        );
    }

    #[test]
    fn ic_of_short_text_is_zero() {
        assert_eq!(index_of_coincidence("").value, 0.0);
        assert_eq!(index_of_coincidence("A").value, 0.0);
        assert_eq!(index_of_coincidence("?!").value, 0.0);
    }

    #[test]
    fn ic_of_single_repeated_letter_is_one() {
        let report = index_of_coincidence("AAAAAA");
        assert!((report.value - 1.0).abs() < f64::EPSILON);
        assert_eq!(report.interpretation, IcInterpretation::LikelyMonoalphabetic);
    }

    #[test]
    fn english_prose_reads_monoalphabetic() {
        let english = "IT IS A TRUTH UNIVERSALLY ACKNOWLEDGED THAT A SINGLE MAN \
                       IN POSSESSION OF A GOOD FORTUNE MUST BE IN WANT OF A WIFE";
        let report = index_of_coincidence(english);
        assert!(report.value > MONOALPHABETIC_IC);
        assert_eq!(report.interpretation, IcInterpretation::LikelyMonoalphabetic);
    }

    #[test]
    fn interpretation_thresholds() {
        assert_eq!(
            IcInterpretation::of(0.06),
            IcInterpretation::LikelyMonoalphabetic
        );
        assert_eq!(IcInterpretation::of(0.05), IcInterpretation::Ambiguous);
        assert_eq!(
            IcInterpretation::of(0.04),
            IcInterpretation::LikelyPolyalphabetic
        );
    }

    #[test]
    fn top_ngrams_counts_overlapping_windows() {
        let grams = top_ngrams("ABABAB", 2, 10);
        assert_eq!(grams[0].gram, "AB");
        assert_eq!(grams[0].count, 3);
        assert_eq!(grams[1].gram, "BA");
        assert_eq!(grams[1].count, 2);
    }

    #[test]
    fn top_ngrams_truncates_and_handles_short_input() {
        assert_eq!(top_ngrams("ABCDEF", 2, 3).len(), 3);
        assert!(top_ngrams("AB", 3, 5).is_empty());
        assert!(top_ngrams("ABC", 0, 5).is_empty());
    }
}
