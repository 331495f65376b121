//! Playfair digraph cipher.
//!
//! Letters are paired up and substituted through a 5x5 key square with
//! I and J sharing a cell. Doubled letters within a pair and an odd
//! trailing letter are handled with an `X` filler, which decryption
//! leaves in place.

use crate::cipher::{Outcome, Visualization};
use crate::key::Keyword;
use crate::text;

const SIDE: usize = 5;
const FILLER: u8 = b'X';

/// 5x5 key square with positions indexed by letter.
struct Square {
    cells: [u8; SIDE * SIDE],
    /// (row, col) per letter index 0..26; J shares I's cell.
    position: [(usize, usize); 26],
}

impl Square {
    fn build(key: &Keyword) -> Self {
        let mut cells = [0u8; SIDE * SIDE];
        let mut used = [false; 26];
        // J never enters the square.
        used[text::letter_index(b'J')] = true;
        let mut next = 0;
        for letter in key.bytes().iter().copied().chain(b'A'..=b'Z') {
            let letter = merge_j(letter);
            let index = text::letter_index(letter);
            if !used[index] {
                used[index] = true;
                cells[next] = letter;
                next += 1;
            }
        }
        let mut position = [(0, 0); 26];
        for (i, letter) in cells.iter().enumerate() {
            position[text::letter_index(*letter)] = (i / SIDE, i % SIDE);
        }
        position[text::letter_index(b'J')] = position[text::letter_index(b'I')];
        Self { cells, position }
    }

    fn at(&self, row: usize, col: usize) -> u8 {
        self.cells[row * SIDE + col]
    }

    fn find(&self, letter: u8) -> (usize, usize) {
        self.position[text::letter_index(letter)]
    }

    fn rows(&self) -> Vec<Vec<char>> {
        self.cells
            .chunks(SIDE)
            .map(|row| row.iter().map(|c| char::from(*c)).collect())
            .collect()
    }
}

fn merge_j(letter: u8) -> u8 {
    if letter == b'J' {
        b'I'
    } else {
        letter
    }
}

/// Splits normalized text into digraphs, inserting the filler between
/// doubled letters and after an odd trailing letter.
fn digraphs(input: &str) -> Vec<(u8, u8)> {
    let letters: Vec<u8> = input.bytes().map(merge_j).collect();
    let mut pairs = Vec::with_capacity(letters.len() / 2 + 1);
    let mut i = 0;
    while i < letters.len() {
        let a = letters[i];
        match letters.get(i + 1) {
            Some(&b) if b != a => {
                pairs.push((a, b));
                i += 2;
            }
            _ => {
                pairs.push((a, FILLER));
                i += 1;
            }
        }
    }
    pairs
}

/// Encrypts one digraph: same row shifts right, same column shifts
/// down, otherwise the pair swap columns (rectangle rule).
fn encrypt_pair(square: &Square, a: u8, b: u8) -> (u8, u8) {
    substitute_pair(square, a, b, 1)
}

/// Decrypts one digraph: the row/column shifts reverse, the rectangle
/// rule is its own inverse.
fn decrypt_pair(square: &Square, a: u8, b: u8) -> (u8, u8) {
    substitute_pair(square, a, b, SIDE - 1)
}

fn substitute_pair(square: &Square, a: u8, b: u8, shift: usize) -> (u8, u8) {
    let (ra, ca) = square.find(a);
    let (rb, cb) = square.find(b);
    if ra == rb {
        (
            square.at(ra, (ca + shift) % SIDE),
            square.at(rb, (cb + shift) % SIDE),
        )
    } else if ca == cb {
        (
            square.at((ra + shift) % SIDE, ca),
            square.at((rb + shift) % SIDE, cb),
        )
    } else {
        (square.at(ra, cb), square.at(rb, ca))
    }
}

/// Encrypts with the square built from `key`.
#[must_use]
pub fn encrypt(input: &str, key: &Keyword) -> Outcome {
    transform(input, key, encrypt_pair)
}

/// Decrypts with the square built from `key`. Filler letters inserted
/// during encryption remain in the output.
#[must_use]
pub fn decrypt(input: &str, key: &Keyword) -> Outcome {
    transform(input, key, decrypt_pair)
}

fn transform(input: &str, key: &Keyword, pair_fn: fn(&Square, u8, u8) -> (u8, u8)) -> Outcome {
    let input = text::normalize(input);
    let square = Square::build(key);
    let mut text = String::with_capacity(input.len() + 1);
    for (a, b) in digraphs(&input) {
        let (x, y) = pair_fn(&square, a, b);
        text.push(char::from(x));
        text.push(char::from(y));
    }
    Outcome {
        text,
        visualization: Visualization::KeySquare {
            rows: square.rows(),
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
    fn square_starts_with_deduplicated_keyword() {
        let square = Square::build(&key("MONARCHY"));
        let rows = square.rows();
        assert_eq!(rows[0], vec!['M', 'O', 'N', 'A', 'R']);
        assert_eq!(rows[1], vec!['C', 'H', 'Y', 'B', 'D']);
        // J is absent, I holds its place.
        assert!(!rows.iter().flatten().any(|c| *c == 'J'));
        assert_eq!(rows.iter().flatten().filter(|c| **c == 'I').count(), 1);
    }

    #[test]
    fn digraphs_insert_filler_for_doubles_and_odd_tail() {
        assert_eq!(digraphs("BALLOON"), vec![
            (b'B', b'A'),
            (b'L', b'X'),
            (b'L', b'O'),
            (b'O', b'N'),
        ]);
        assert_eq!(digraphs("HELLO"), vec![
            (b'H', b'E'),
            (b'L', b'X'),
            (b'L', b'O'),
        ]);
    }

    #[test]
    fn known_vector_monarchy() {
        // The classic worked example: IN ST RU ME NT SX, with SX a
        // same-column pair that wraps down to XA.
        let outcome = encrypt("INSTRUMENTS", &key("MONARCHY"));
        assert_eq!(outcome.text, "GATLMZCLRQXA");
    }

    #[test]
    fn decrypt_reverses_encrypt_with_filler_in_place() {
        let encrypted = encrypt("INSTRUMENTS", &key("MONARCHY"));
        assert_eq!(decrypt(&encrypted.text, &key("MONARCHY")).text, "INSTRUMENTSX");
    }

    #[test]
    fn same_row_pairs_wrap_right() {
        // M and R are both on row 0 of the MONARCHY square; R wraps to M.
        let outcome = encrypt("MR", &key("MONARCHY"));
        assert_eq!(outcome.text, "OM");
    }

    #[test]
    fn round_trip_without_doubles_is_exact() {
        let plain = "THEQUICKBROWNFOX";
        let encrypted = encrypt(plain, &key("KEYWORD"));
        assert_eq!(decrypt(&encrypted.text, &key("KEYWORD")).text, plain);
    }

    #[test]
    fn j_is_read_as_i() {
        assert_eq!(
            encrypt("JAR", &key("MONARCHY")).text,
            encrypt("IAR", &key("MONARCHY")).text
        );
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert_eq!(encrypt("", &key("MONARCHY")).text, "");
    }
}
