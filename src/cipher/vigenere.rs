//! Keyword stream ciphers: Vigenère, Beaufort and Autokey.
//!
//! All three shift letters by a keyword-derived stream; they differ only
//! in how the stream is produced and combined.

use crate::cipher::{Outcome, Visualization};
use crate::key::Keyword;
use crate::text::{self, add_letters, sub_letters};

/// Vigenère encryption: `c_i = (p_i + key[i mod len]) mod 26`.
#[must_use]
pub fn encrypt(input: &str, key: &Keyword) -> Outcome {
    let input = text::normalize(input);
    let stream = repeat_stream(key, input.len());
    let text = input
        .bytes()
        .zip(&stream)
        .map(|(c, k)| char::from(add_letters(c, *k)))
        .collect();
    outcome(text, &stream)
}

/// Vigenère decryption: `p_i = (c_i - key[i mod len]) mod 26`.
#[must_use]
pub fn decrypt(input: &str, key: &Keyword) -> Outcome {
    let input = text::normalize(input);
    let stream = repeat_stream(key, input.len());
    let text = input
        .bytes()
        .zip(&stream)
        .map(|(c, k)| char::from(sub_letters(c, *k)))
        .collect();
    outcome(text, &stream)
}

/// Beaufort transform: `c_i = (key[i mod len] - p_i) mod 26`.
///
/// Reciprocal cipher: applying it twice with the same keyword restores
/// the original text, so this one function serves both directions.
#[must_use]
pub fn beaufort(input: &str, key: &Keyword) -> Outcome {
    let input = text::normalize(input);
    let stream = repeat_stream(key, input.len());
    let text = input
        .bytes()
        .zip(&stream)
        .map(|(c, k)| char::from(sub_letters(*k, c)))
        .collect();
    outcome(text, &stream)
}

/// Autokey encryption. The key stream is the keyword followed by the
/// plaintext itself, truncated to the text length.
#[must_use]
pub fn autokey_encrypt(input: &str, key: &Keyword) -> Outcome {
    let input = text::normalize(input);
    let mut stream = key.bytes().to_vec();
    stream.extend(input.bytes());
    stream.truncate(input.len());
    let text = input
        .bytes()
        .zip(&stream)
        .map(|(c, k)| char::from(add_letters(c, *k)))
        .collect();
    outcome(text, &stream)
}

/// Autokey decryption. Each recovered plaintext letter extends the key
/// stream used for the letters after it, so characters must be processed
/// strictly in order.
#[must_use]
pub fn autokey_decrypt(input: &str, key: &Keyword) -> Outcome {
    let input = text::normalize(input);
    let mut stream = key.bytes().to_vec();
    let mut text = String::with_capacity(input.len());
    for (i, c) in input.bytes().enumerate() {
        let p = sub_letters(c, stream[i]);
        stream.push(p);
        text.push(char::from(p));
    }
    stream.truncate(input.len());
    outcome(text, &stream)
}

/// Keyword repeated to cover `len` characters.
fn repeat_stream(key: &Keyword, len: usize) -> Vec<u8> {
    key.bytes().iter().copied().cycle().take(len).collect()
}

fn outcome(text: String, stream: &[u8]) -> Outcome {
    Outcome {
        text,
        visualization: Visualization::KeyStream {
            stream: stream.iter().map(|k| char::from(*k)).collect(),
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn key(word: &str) -> Keyword {
        Keyword::new(word).unwrap()
    }

    #[test]
    fn vigenere_known_vector() {
        // The textbook LEMON example.
        let outcome = encrypt("ATTACKATDAWN", &key("LEMON"));
        assert_eq!(outcome.text, "LXFOPVEFRNHR");
        assert_eq!(decrypt("LXFOPVEFRNHR", &key("LEMON")).text, "ATTACKATDAWN");
    }

    #[test]
    fn vigenere_key_case_is_irrelevant() {
        assert_eq!(
            encrypt("attack at dawn!", &key("lemon")).text,
            "LXFOPVEFRNHR"
        );
    }

    #[test]
    fn vigenere_round_trip() {
        let plain = "THEQUICKBROWNFOXJUMPSOVERTHELAZYDOG";
        let encrypted = encrypt(plain, &key("CIPHER"));
        assert_eq!(decrypt(&encrypted.text, &key("CIPHER")).text, plain);
    }

    #[test]
    fn beaufort_is_its_own_inverse() {
        let plain = "DEFENDTHEEASTWALL";
        let encrypted = beaufort(plain, &key("FORTIFICATION"));
        assert_ne!(encrypted.text, plain);
        assert_eq!(beaufort(&encrypted.text, &key("FORTIFICATION")).text, plain);
    }

    #[test]
    fn beaufort_known_vector() {
        // c = (key - plain) mod 26; F - D = 2 -> C.
        let outcome = beaufort("DEFENDTHEEASTWALLS", &key("FORTIFICATION"));
        assert_eq!(&outcome.text[..4], "CKMP");
    }

    #[test]
    fn autokey_extends_key_with_plaintext() {
        // Stream for QUEENLY + ATTACKATDAWN is QUEENLYATTACK... truncated.
        let outcome = autokey_encrypt("ATTACKATDAWN", &key("QUEENLY"));
        assert_eq!(outcome.text, "QNXEPVYTWTWP");
    }

    #[test]
    fn autokey_decrypt_reconstructs_the_stream() {
        assert_eq!(
            autokey_decrypt("QNXEPVYTWTWP", &key("QUEENLY")).text,
            "ATTACKATDAWN"
        );
    }

    #[test]
    fn autokey_round_trip_with_short_key() {
        let plain = "MEETMEATTHEFOUNTAIN";
        let encrypted = autokey_encrypt(plain, &key("K"));
        assert_eq!(autokey_decrypt(&encrypted.text, &key("K")).text, plain);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert_eq!(encrypt("", &key("LEMON")).text, "");
        assert_eq!(autokey_decrypt("", &key("LEMON")).text, "");
    }
}
