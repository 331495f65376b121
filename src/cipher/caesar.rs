//! Caesar shift cipher.

use crate::cipher::{Outcome, Visualization};
use crate::key::Shift;
use crate::text;

/// Encrypts by shifting every letter forward: `(c + shift) mod 26`.
#[must_use]
pub fn encrypt(input: &str, key: Shift) -> Outcome {
    transform(input, key.value())
}

/// Decrypts by shifting every letter back: `(c - shift) mod 26`.
#[must_use]
pub fn decrypt(input: &str, key: Shift) -> Outcome {
    transform(input, (26 - key.value()) % 26)
}

fn transform(input: &str, shift: u8) -> Outcome {
    let input = text::normalize(input);
    let text = input
        .bytes()
        .map(|c| char::from(shift_letter(c, shift)))
        .collect();
    Outcome {
        text,
        visualization: alphabet_map(shift),
    }
}

fn shift_letter(letter: u8, shift: u8) -> u8 {
    b'A' + (letter - b'A' + shift) % 26
}

/// The full plain-to-cipher alphabet mapping for a shift.
fn alphabet_map(shift: u8) -> Visualization {
    let plain: Vec<char> = (b'A'..=b'Z').map(char::from).collect();
    let cipher = (b'A'..=b'Z')
        .map(|c| char::from(shift_letter(c, shift)))
        .collect();
    Visualization::AlphabetMap { plain, cipher }
}

#[cfg(test)]
mod test {
    use super::*;

    fn shift(value: u32) -> Shift {
        Shift::new(value).unwrap()
    }

    #[test]
    fn known_vector_shift_three() {
        assert_eq!(encrypt("HELLO", shift(3)).text, "KHOOR");
        assert_eq!(decrypt("KHOOR", shift(3)).text, "HELLO");
    }

    #[test]
    fn non_letters_are_stripped_before_the_shift() {
        assert_eq!(encrypt("He said: hello!", shift(3)).text, "KHVDLGKHOOR");
    }

    #[test]
    fn zero_shift_is_identity_on_normalized_text() {
        assert_eq!(encrypt("Attack at dawn", shift(0)).text, "ATTACKATDAWN");
    }

    #[test]
    fn round_trip_all_shifts() {
        for value in 0..26 {
            let key = shift(value);
            let encrypted = encrypt("SPHINXOFBLACKQUARTZ", key);
            assert_eq!(decrypt(&encrypted.text, key).text, "SPHINXOFBLACKQUARTZ");
        }
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert_eq!(encrypt("123 !?", shift(5)).text, "");
    }

    #[test]
    fn alphabet_map_records_the_substitution() {
        let outcome = encrypt("A", shift(1));
        match outcome.visualization {
            Visualization::AlphabetMap { plain, cipher } => {
                assert_eq!(plain[0], 'A');
                assert_eq!(cipher[0], 'B');
                assert_eq!(cipher[25], 'A');
            }
            other => panic!("unexpected visualization: {other:?}"),
        }
    }
}
