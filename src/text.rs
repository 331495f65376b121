//! Text normalization shared by every transform and analysis routine.

/// Number of letters in the cipher alphabet.
pub const ALPHABET_LEN: usize = 26;

/// Strips all characters other than ASCII letters and uppercases the rest.
///
/// Every transform and analysis routine in this crate operates on the
/// output of this function, never on raw text with punctuation or
/// whitespace. Normalizing twice gives the same string.
#[must_use]
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Index in 0..26 of an uppercase ASCII letter.
pub(crate) fn letter_index(letter: u8) -> usize {
    usize::from(letter - b'A')
}

/// Uppercase ASCII letter for an index, wrapping mod 26.
pub(crate) fn index_letter(index: usize) -> u8 {
    b'A' + u8::try_from(index % ALPHABET_LEN).unwrap()
}

/// Adds two uppercase letters mod 26.
pub(crate) fn add_letters(c: u8, k: u8) -> u8 {
    b'A' + ((c - b'A') + (k - b'A')) % 26
}

/// Subtracts letter `k` from letter `c` mod 26.
pub(crate) fn sub_letters(c: u8, k: u8) -> u8 {
    b'A' + ((26 + (c - b'A')) - (k - b'A')) % 26
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalize_strips_non_letters_and_uppercases() {
        assert_eq!(normalize("Hello, World! 😊"), "HELLOWORLD");
        assert_eq!(normalize("attack at dawn"), "ATTACKATDAWN");
        assert_eq!(normalize("123 !?"), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for input in ["Hello, World!", "", "already CLEAN", "ünïcödé mix"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn letter_arithmetic_wraps() {
        assert_eq!(add_letters(b'Z', b'B'), b'A');
        assert_eq!(sub_letters(b'A', b'B'), b'Z');
        assert_eq!(add_letters(b'H', b'D'), b'K');
        assert_eq!(sub_letters(b'K', b'D'), b'H');
    }
}
