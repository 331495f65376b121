//! Grid transpositions: columnar, Myszkowski and double transposition.
//!
//! Text is written row-major into a grid as wide as the keyword, padded
//! with `X` to complete the last row, and read out column-wise in an
//! order derived from sorting the key letters. Myszkowski differs in one
//! point only: columns under a repeated key letter form a group and are
//! read together row-major.

use crate::cipher::{Outcome, Visualization};
use crate::key::Keyword;
use crate::text;

const PADDING: char = 'X';

/// Columnar transposition. Ties between repeated key letters are broken
/// left to right.
#[must_use]
pub fn columnar_encrypt(input: &str, key: &Keyword) -> Outcome {
    let grid = Grid::write(&text::normalize(input), key);
    let mut out = String::with_capacity(grid.cells.len());
    for &col in &grid.read_order {
        for row in 0..grid.rows() {
            out.push(grid.at(row, col));
        }
    }
    grid.outcome(out)
}

/// Reverses [`columnar_encrypt`]. Padding added during encryption stays
/// in the output.
#[must_use]
pub fn columnar_decrypt(input: &str, key: &Keyword) -> Outcome {
    let input = text::normalize(input);
    let width = key.bytes().len();
    let mut cells = vec![PADDING; padded_len(input.len(), width)];
    let rows = cells.len() / width;

    let mut chars = input.chars();
    for &col in &read_order(key) {
        for row in 0..rows {
            if let Some(c) = chars.next() {
                cells[row * width + col] = c;
            }
        }
    }
    let grid = Grid {
        cells,
        width,
        read_order: read_order(key),
    };
    let out = grid.row_major();
    grid.outcome(out)
}

/// Myszkowski transposition: columns sharing a repeated key letter are
/// read together, row-major within the group. For a keyword without
/// repeated letters this coincides with columnar transposition.
#[must_use]
pub fn myszkowski_encrypt(input: &str, key: &Keyword) -> Outcome {
    let grid = Grid::write(&text::normalize(input), key);
    let mut out = String::with_capacity(grid.cells.len());
    for group in letter_groups(key) {
        for row in 0..grid.rows() {
            for &col in &group {
                out.push(grid.at(row, col));
            }
        }
    }
    grid.outcome(out)
}

/// Reverses [`myszkowski_encrypt`].
#[must_use]
pub fn myszkowski_decrypt(input: &str, key: &Keyword) -> Outcome {
    let input = text::normalize(input);
    let width = key.bytes().len();
    let mut cells = vec![PADDING; padded_len(input.len(), width)];
    let rows = cells.len() / width;

    let mut chars = input.chars();
    for group in letter_groups(key) {
        for row in 0..rows {
            for &col in &group {
                if let Some(c) = chars.next() {
                    cells[row * width + col] = c;
                }
            }
        }
    }
    let grid = Grid {
        cells,
        width,
        read_order: read_order(key),
    };
    let out = grid.row_major();
    grid.outcome(out)
}

/// Two columnar passes. The input is padded up front to a multiple of
/// both key lengths so each pass works on a complete grid and decryption
/// can undo them cleanly.
#[must_use]
pub fn double_encrypt(input: &str, first: &Keyword, second: &Keyword) -> Outcome {
    let mut input = text::normalize(input);
    let target = padded_len(
        input.len(),
        lcm(first.bytes().len(), second.bytes().len()),
    );
    while input.len() < target {
        input.push(PADDING);
    }
    let pass1 = columnar_encrypt(&input, first);
    let pass2 = columnar_encrypt(&pass1.text, second);
    Outcome {
        text: pass2.text,
        visualization: Visualization::Passes(vec![pass1.visualization, pass2.visualization]),
    }
}

/// Reverses [`double_encrypt`]: the second key's transposition is undone
/// first, then the first key's.
#[must_use]
pub fn double_decrypt(input: &str, first: &Keyword, second: &Keyword) -> Outcome {
    let pass2 = columnar_decrypt(input, second);
    let pass1 = columnar_decrypt(&pass2.text, first);
    Outcome {
        text: pass1.text,
        visualization: Visualization::Passes(vec![pass2.visualization, pass1.visualization]),
    }
}

/// Grid written row-major, padded to complete the last row.
struct Grid {
    cells: Vec<char>,
    width: usize,
    read_order: Vec<usize>,
}

impl Grid {
    fn write(input: &str, key: &Keyword) -> Self {
        let width = key.bytes().len();
        let mut cells: Vec<char> = input.chars().collect();
        cells.resize(padded_len(cells.len(), width), PADDING);
        Self {
            cells,
            width,
            read_order: read_order(key),
        }
    }

    fn rows(&self) -> usize {
        self.cells.len() / self.width
    }

    fn at(&self, row: usize, col: usize) -> char {
        self.cells[row * self.width + col]
    }

    fn row_major(&self) -> String {
        self.cells.iter().collect()
    }

    fn outcome(self, text: String) -> Outcome {
        Outcome {
            text,
            visualization: Visualization::Grid {
                rows: self.cells.chunks(self.width).map(<[char]>::to_vec).collect(),
                read_order: self.read_order,
            },
        }
    }
}

/// Column indices sorted by key letter, ties broken left to right.
fn read_order(key: &Keyword) -> Vec<usize> {
    let letters = key.bytes();
    let mut order: Vec<usize> = (0..letters.len()).collect();
    order.sort_by_key(|&i| (letters[i], i));
    order
}

/// Columns grouped by key letter, groups ordered by letter, columns
/// within a group kept left to right.
fn letter_groups(key: &Keyword) -> Vec<Vec<usize>> {
    let letters = key.bytes();
    let mut unique: Vec<u8> = letters.to_vec();
    unique.sort_unstable();
    unique.dedup();
    unique
        .iter()
        .map(|letter| {
            (0..letters.len())
                .filter(|&i| letters[i] == *letter)
                .collect()
        })
        .collect()
}

fn padded_len(len: usize, width: usize) -> usize {
    len.div_ceil(width) * width
}

fn lcm(a: usize, b: usize) -> usize {
    a / gcd(a, b) * b
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}
