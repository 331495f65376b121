//! Pure encode/decode transforms, one submodule per cipher family.
//!
//! Every transform normalizes its input (see [`crate::normalize`]) and
//! satisfies the round-trip law `decrypt(encrypt(normalize(t), k), k) ==
//! normalize(t)`, with the caveat that block and grid ciphers leave their
//! own filler letters in the decrypted output.

pub mod caesar;
pub mod hill;
pub mod playfair;
pub mod railfence;
pub mod transposition;
pub mod vigenere;

use crate::error::{CipherError, Result};
use crate::key::{KeyMatrix, KeySpec, Keyword, Rails, Shift};

/// Transform direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Plaintext to ciphertext.
    Encrypt,
    /// Ciphertext to plaintext.
    Decrypt,
}

/// Catalog of ciphers known to the engine.
///
/// Entries without a transform ([`CipherId::implemented`] is false) are
/// kept so the catalog matches the UI; applying them yields
/// [`CipherError::Unsupported`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CipherId {
    /// Single fixed shift.
    Caesar,
    /// Repeating-keyword shift.
    Vigenere,
    /// Reciprocal keyword cipher, encrypt and decrypt coincide.
    Beaufort,
    /// Keyword extended by the plaintext itself.
    Autokey,
    /// 5x5 digraph cipher.
    Playfair,
    /// Matrix block cipher mod 26.
    Hill,
    /// Zigzag transposition.
    RailFence,
    /// Keyed columnar transposition.
    Columnar,
    /// Columnar variant grouping repeated key letters.
    Myszkowski,
    /// Two columnar passes.
    DoubleTransposition,
    /// One-time pad placeholder.
    Otp,
    /// Linear congruential stream placeholder.
    Lcg,
    /// Blum Blum Shub stream placeholder.
    Bbs,
    /// DES placeholder.
    Des,
    /// RSA placeholder.
    Rsa,
}

impl CipherId {
    /// Human-readable name as shown by the CLI.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Caesar => "Caesar",
            Self::Vigenere => "Vigenère",
            Self::Beaufort => "Beaufort",
            Self::Autokey => "Autokey",
            Self::Playfair => "Playfair",
            Self::Hill => "Hill",
            Self::RailFence => "Rail Fence",
            Self::Columnar => "Columnar Transposition",
            Self::Myszkowski => "Myszkowski Transposition",
            Self::DoubleTransposition => "Double Transposition",
            Self::Otp => "One-Time Pad",
            Self::Lcg => "LCG Stream",
            Self::Bbs => "Blum Blum Shub Stream",
            Self::Des => "DES",
            Self::Rsa => "RSA",
        }
    }

    /// Whether a full transform is implemented for this entry.
    #[must_use]
    pub fn implemented(self) -> bool {
        !matches!(
            self,
            Self::Otp | Self::Lcg | Self::Bbs | Self::Des | Self::Rsa
        )
    }
}

/// Data-only record of a transform's intermediate state, for display.
///
/// A faithful snapshot of what the transform did; never re-parsed or
/// round-tripped by the engine itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Visualization {
    /// Plain-to-cipher alphabet mapping (Caesar).
    AlphabetMap {
        /// The 26 plaintext letters in order.
        plain: Vec<char>,
        /// The substituted letter for each plaintext letter.
        cipher: Vec<char>,
    },
    /// Per-character key stream (Vigenère family).
    KeyStream {
        /// The key letter applied at each text position.
        stream: Vec<char>,
    },
    /// Playfair key square.
    KeySquare {
        /// The 5x5 square, row by row.
        rows: Vec<Vec<char>>,
    },
    /// Hill key matrix and the blocks it multiplied.
    MatrixBlocks {
        /// Key matrix rows.
        matrix: Vec<Vec<i64>>,
        /// Input text split into blocks.
        input_blocks: Vec<String>,
        /// Output blocks in the same order.
        output_blocks: Vec<String>,
    },
    /// Rail fence zigzag: the rail each character landed on, in writing
    /// order.
    Zigzag {
        /// Number of rails.
        rails: usize,
        /// (rail, column) coordinate of every character.
        path: Vec<(usize, usize)>,
    },
    /// Transposition grid as written, with the order columns were read.
    Grid {
        /// Grid rows including filler.
        rows: Vec<Vec<char>>,
        /// Column indices in read order.
        read_order: Vec<usize>,
    },
    /// One visualization per pass (double transposition).
    Passes(Vec<Visualization>),
}

/// Result of one transform call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// Output text.
    pub text: String,
    /// Record of the intermediate state, for display.
    pub visualization: Visualization,
}

/// Applies a catalog cipher to `text` in the given direction.
///
/// The untyped `key` is converted to the key type the cipher expects;
/// a mismatched variant fails before any transformation. Input that is
/// empty after normalization produces an empty result, not an error.
///
/// # Errors
/// [`CipherError::InvalidKey`] on a mismatched or invalid key,
/// [`CipherError::Unsupported`] for catalog placeholders.
pub fn apply(id: CipherId, mode: Mode, text: &str, key: &KeySpec) -> Result<Outcome> {
    match id {
        CipherId::Caesar => {
            let shift = Shift::new(expect_number(id, key)?)?;
            Ok(match mode {
                Mode::Encrypt => caesar::encrypt(text, shift),
                Mode::Decrypt => caesar::decrypt(text, shift),
            })
        }
        CipherId::Vigenere => {
            let keyword = Keyword::new(expect_keyword(id, key)?)?;
            Ok(match mode {
                Mode::Encrypt => vigenere::encrypt(text, &keyword),
                Mode::Decrypt => vigenere::decrypt(text, &keyword),
            })
        }
        CipherId::Beaufort => {
            let keyword = Keyword::new(expect_keyword(id, key)?)?;
            // Reciprocal cipher, one function for both directions.
            Ok(vigenere::beaufort(text, &keyword))
        }
        CipherId::Autokey => {
            let keyword = Keyword::new(expect_keyword(id, key)?)?;
            Ok(match mode {
                Mode::Encrypt => vigenere::autokey_encrypt(text, &keyword),
                Mode::Decrypt => vigenere::autokey_decrypt(text, &keyword),
            })
        }
        CipherId::Playfair => {
            let keyword = Keyword::new(expect_keyword(id, key)?)?;
            Ok(match mode {
                Mode::Encrypt => playfair::encrypt(text, &keyword),
                Mode::Decrypt => playfair::decrypt(text, &keyword),
            })
        }
        CipherId::Hill => {
            let matrix = expect_matrix(id, key)?;
            Ok(match mode {
                Mode::Encrypt => hill::encrypt(text, &matrix),
                Mode::Decrypt => hill::decrypt(text, &matrix),
            })
        }
        CipherId::RailFence => {
            let rails = Rails::new(usize::try_from(expect_number(id, key)?).unwrap_or(0))?;
            match mode {
                Mode::Encrypt => railfence::encrypt(text, rails),
                Mode::Decrypt => railfence::decrypt(text, rails),
            }
        }
        CipherId::Columnar => {
            let keyword = Keyword::new(expect_keyword(id, key)?)?;
            Ok(match mode {
                Mode::Encrypt => transposition::columnar_encrypt(text, &keyword),
                Mode::Decrypt => transposition::columnar_decrypt(text, &keyword),
            })
        }
        CipherId::Myszkowski => {
            let keyword = Keyword::new(expect_keyword(id, key)?)?;
            Ok(match mode {
                Mode::Encrypt => transposition::myszkowski_encrypt(text, &keyword),
                Mode::Decrypt => transposition::myszkowski_decrypt(text, &keyword),
            })
        }
        CipherId::DoubleTransposition => {
            let (first, second) = expect_keyword_pair(id, key)?;
            Ok(match mode {
                Mode::Encrypt => transposition::double_encrypt(text, &first, &second),
                Mode::Decrypt => transposition::double_decrypt(text, &first, &second),
            })
        }
        CipherId::Otp | CipherId::Lcg | CipherId::Bbs | CipherId::Des | CipherId::Rsa => Err(
            CipherError::Unsupported(format!("{} has no transform in this catalog", id.name())),
        ),
    }
}

fn expect_number(id: CipherId, key: &KeySpec) -> Result<u32> {
    match key {
        KeySpec::Number(n) => Ok(*n),
        _ => Err(CipherError::InvalidKey(format!(
            "{} expects a numeric key",
            id.name()
        ))),
    }
}

fn expect_keyword<'a>(id: CipherId, key: &'a KeySpec) -> Result<&'a str> {
    match key {
        KeySpec::Keyword(word) => Ok(word),
        _ => Err(CipherError::InvalidKey(format!(
            "{} expects an alphabetic keyword",
            id.name()
        ))),
    }
}

fn expect_matrix(id: CipherId, key: &KeySpec) -> Result<KeyMatrix> {
    match key {
        KeySpec::Matrix { cells, size } => KeyMatrix::new(cells, *size),
        _ => Err(CipherError::InvalidKey(format!(
            "{} expects a key matrix",
            id.name()
        ))),
    }
}

fn expect_keyword_pair(id: CipherId, key: &KeySpec) -> Result<(Keyword, Keyword)> {
    match key {
        KeySpec::KeywordPair(first, second) => Ok((Keyword::new(first)?, Keyword::new(second)?)),
        // A single keyword doubles as both passes.
        KeySpec::Keyword(word) => {
            let keyword = Keyword::new(word)?;
            Ok((keyword.clone(), keyword))
        }
        _ => Err(CipherError::InvalidKey(format!(
            "{} expects one or two keywords",
            id.name()
        ))),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn apply_rejects_mismatched_key_variants() {
        let err = apply(
            CipherId::Caesar,
            Mode::Encrypt,
            "HELLO",
            &KeySpec::Keyword("KEY".into()),
        )
        .unwrap_err();
        assert!(matches!(err, CipherError::InvalidKey(_)));

        let err = apply(
            CipherId::Vigenere,
            Mode::Encrypt,
            "HELLO",
            &KeySpec::Number(3),
        )
        .unwrap_err();
        assert!(matches!(err, CipherError::InvalidKey(_)));
    }

    #[test]
    fn placeholders_are_unsupported() {
        for id in [
            CipherId::Otp,
            CipherId::Lcg,
            CipherId::Bbs,
            CipherId::Des,
            CipherId::Rsa,
        ] {
            assert!(!id.implemented());
            let err = apply(id, Mode::Encrypt, "HELLO", &KeySpec::Number(1)).unwrap_err();
            assert!(matches!(err, CipherError::Unsupported(_)));
        }
    }

    #[test]
    fn apply_round_trips_every_implemented_cipher() {
        let text = "The quick brown fox jumps over the lazy dog";
        let normalized = crate::text::normalize(text);
        let cases = [
            (CipherId::Caesar, KeySpec::Number(7)),
            (CipherId::Vigenere, KeySpec::Keyword("LEMON".into())),
            (CipherId::Beaufort, KeySpec::Keyword("FORTIFY".into())),
            (CipherId::Autokey, KeySpec::Keyword("QUEEN".into())),
            (
                CipherId::Hill,
                KeySpec::Matrix {
                    cells: vec![3, 3, 2, 5],
                    size: 2,
                },
            ),
            (CipherId::RailFence, KeySpec::Number(4)),
            (CipherId::Columnar, KeySpec::Keyword("ZEBRAS".into())),
            (CipherId::Myszkowski, KeySpec::Keyword("TOMATO".into())),
            (
                CipherId::DoubleTransposition,
                KeySpec::KeywordPair("STRIPE".into(), "CARGO".into()),
            ),
        ];
        for (id, key) in cases {
            let encrypted = apply(id, Mode::Encrypt, text, &key).unwrap();
            let decrypted = apply(id, Mode::Decrypt, &encrypted.text, &key).unwrap();
            // Block and grid ciphers leave filler behind; the original
            // text must still come back as a prefix.
            assert!(
                decrypted.text.starts_with(&normalized),
                "{} failed to round-trip: {:?}",
                id.name(),
                decrypted.text
            );
            assert!(decrypted
                .text[normalized.len()..]
                .bytes()
                .all(|b| b == b'X'));
        }
    }
}
