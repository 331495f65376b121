//! Kasiski-style key length estimation.
//!
//! A repeating key tends to encrypt repeated plaintext fragments to the
//! same ciphertext at distances that are multiples of the key length.
//! Candidates are ranked by the share of repeat distances they divide,
//! with the average per-column index of coincidence as a corroborating
//! signal.

use crate::analysis::frequency::{self, precise};
use crate::text;
use std::collections::HashMap;

/// Shortest repeated sequence considered.
const MIN_SEQUENCE: usize = 3;
/// Longest repeated sequence considered.
const MAX_SEQUENCE: usize = 6;
/// Minimum cleaned text length for an estimate to be attempted.
const MIN_TEXT: usize = 6;
/// How many ranked candidates an estimate keeps.
const MAX_CANDIDATES: usize = 5;

/// One candidate key length with its supporting evidence.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyLengthCandidate {
    /// The candidate key length.
    pub length: usize,
    /// Share of repeat distances divisible by the length, 0..=100.
    pub confidence: f64,
    /// Number of repeat distances the length divides.
    pub matching_distances: usize,
    /// Mean index of coincidence over the columns obtained by slicing
    /// the text with this period. Near 0.065 for the true key length.
    pub mean_column_ic: f64,
}

/// Ranked key length candidates from one text sample.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyLengthEstimate {
    /// Candidates ordered from most to least likely.
    pub candidates: Vec<KeyLengthCandidate>,
    /// Total number of repeat distances examined.
    pub distances_examined: usize,
}

impl KeyLengthEstimate {
    /// The top-ranked candidate length.
    #[must_use]
    pub fn best(&self) -> Option<usize> {
        self.candidates.first().map(|c| c.length)
    }
}

/// Estimates the key length of a polyalphabetic ciphertext.
///
/// Repeated substrings of length 3 to 6 are located, the pairwise
/// distances between their occurrences collected, and every candidate
/// length `2..=max_length` scored by the fraction of distances it
/// divides evenly. Returns `None` when the cleaned text is shorter than
/// six letters or contains no repeated sequence.
#[must_use]
pub fn estimate_key_length(input: &str, max_length: usize) -> Option<KeyLengthEstimate> {
    let input = text::normalize(input);
    if input.len() < MIN_TEXT || max_length < 2 {
        return None;
    }

    let distances = repeat_distances(input.as_bytes());
    if distances.is_empty() {
        return None;
    }

    let mut candidates: Vec<KeyLengthCandidate> = (2..=max_length.min(input.len() - 1))
        .map(|length| {
            let matching = distances.iter().filter(|d| *d % length == 0).count();
            KeyLengthCandidate {
                length,
                confidence: precise(matching) / precise(distances.len()) * 100.0,
                matching_distances: matching,
                mean_column_ic: mean_column_ic(&input, length),
            }
        })
        .filter(|c| c.matching_distances > 0)
        .collect();
    if candidates.is_empty() {
        return None;
    }

    // Rank by divisibility first; where two lengths tie (a length and
    // its multiples often do), prefer the higher column IC, then the
    // shorter length.
    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                b.mean_column_ic
                    .partial_cmp(&a.mean_column_ic)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| a.length.cmp(&b.length))
    });
    candidates.truncate(MAX_CANDIDATES);

    Some(KeyLengthEstimate {
        candidates,
        distances_examined: distances.len(),
    })
}

/// Pairwise distances between occurrences of every substring of length
/// 3..=6 that appears more than once.
fn repeat_distances(bytes: &[u8]) -> Vec<usize> {
    let mut distances = Vec::new();
    for n in MIN_SEQUENCE..=MAX_SEQUENCE {
        if bytes.len() < n {
            break;
        }
        let mut positions: HashMap<&[u8], Vec<usize>> = HashMap::new();
        for (i, window) in bytes.windows(n).enumerate() {
            positions.entry(window).or_default().push(i);
        }
        for occurrences in positions.values().filter(|p| p.len() > 1) {
            for (i, a) in occurrences.iter().enumerate() {
                for b in &occurrences[i + 1..] {
                    distances.push(b - a);
                }
            }
        }
    }
    distances
}

/// Mean IC over the columns of the text sliced with period `length`.
fn mean_column_ic(input: &str, length: usize) -> f64 {
    let columns: Vec<String> = (0..length)
        .map(|start| {
            input
                .bytes()
                .skip(start)
                .step_by(length)
                .map(char::from)
                .collect()
        })
        .collect();
    let sum: f64 = columns
        .iter()
        .map(|column| frequency::index_of_coincidence(column).value)
        .sum();
    sum / precise(length)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cipher::vigenere;
    use crate::key::Keyword;

    #[test]
    fn short_text_gives_no_estimate() {
        assert!(estimate_key_length("ABCDE", 10).is_none());
        assert!(estimate_key_length("", 10).is_none());
    }

    #[test]
    fn text_without_repeats_gives_no_estimate() {
        assert!(estimate_key_length("ABCDEFGHIJKLMNOP", 10).is_none());
    }

    #[test]
    fn periodic_text_reveals_its_period() {
        // ABCABCABC... repeats with period 3.
        let text: String = "ABC".repeat(12);
        let estimate = estimate_key_length(&text, 10).unwrap();
        assert_eq!(estimate.best(), Some(3));
        assert!(estimate.distances_examined > 0);
    }

    #[test]
    fn vigenere_ciphertext_reveals_the_keyword_length() {
        let plain = "IT IS A TRUTH UNIVERSALLY ACKNOWLEDGED THAT A SINGLE MAN \
                     IN POSSESSION OF A GOOD FORTUNE MUST BE IN WANT OF A WIFE \
                     HOWEVER LITTLE KNOWN THE FEELINGS OR VIEWS OF SUCH A MAN \
                     MAY BE ON HIS FIRST ENTERING A NEIGHBOURHOOD THIS TRUTH IS \
                     SO WELL FIXED IN THE MINDS OF THE SURROUNDING FAMILIES";
        let key = Keyword::new("LEMON").unwrap();
        let ciphertext = vigenere::encrypt(plain, &key).text;
        let estimate = estimate_key_length(&ciphertext, 20).unwrap();
        let top: Vec<usize> = estimate.candidates.iter().map(|c| c.length).collect();
        // The true length (or a multiple reduced by the IC tiebreak)
        // must surface among the leading candidates.
        assert!(
            top.iter().any(|len| *len == 5),
            "expected 5 among candidates, got {top:?}"
        );
    }

    #[test]
    fn confidence_is_a_percentage() {
        let text: String = "XYZ".repeat(10);
        let estimate = estimate_key_length(&text, 9).unwrap();
        for candidate in &estimate.candidates {
            assert!((0.0..=100.0).contains(&candidate.confidence));
            assert!(candidate.matching_distances <= estimate.distances_examined);
        }
    }
}
