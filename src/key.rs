//! Typed cipher keys, validated at construction.

use crate::error::{CipherError, Result};
use crate::text::ALPHABET_LEN;
use rand::prelude::*;

/// Untyped key as received from a caller (CLI flag, UI form).
///
/// Each cipher converts the variant it expects into its validated key
/// type and rejects everything else with [`CipherError::InvalidKey`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeySpec {
    /// Numeric key: a Caesar shift or a rail count.
    Number(u32),
    /// Alphabetic keyword.
    Keyword(String),
    /// Square matrix given row-major together with its side length.
    Matrix {
        /// Matrix entries, row-major.
        cells: Vec<i64>,
        /// Side length of the square matrix.
        size: usize,
    },
    /// Two keywords for double transposition.
    KeywordPair(String, String),
}

/// Caesar shift in `0..=25`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shift(u8);

impl Shift {
    /// Validates that the shift fits the alphabet.
    ///
    /// # Errors
    /// [`CipherError::InvalidKey`] when the value is 26 or larger.
    pub fn new(value: u32) -> Result<Self> {
        match u8::try_from(value) {
            Ok(v) if usize::from(v) < ALPHABET_LEN => Ok(Self(v)),
            _ => Err(CipherError::InvalidKey(format!(
                "shift must be between 0 and 25, got {value}"
            ))),
        }
    }

    /// Draws a uniformly random nonzero shift.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self(rng.gen_range(1..26))
    }

    /// The shift amount.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

/// Alphabetic keyword, uppercased on ingestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keyword(String);

impl Keyword {
    /// Validates that the keyword is non-empty and contains only letters.
    ///
    /// # Errors
    /// [`CipherError::InvalidKey`] on an empty or non-alphabetic keyword.
    pub fn new(word: &str) -> Result<Self> {
        if word.is_empty() {
            return Err(CipherError::InvalidKey("keyword must not be empty".into()));
        }
        if !word.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CipherError::InvalidKey(format!(
                "keyword must contain only letters, got {word:?}"
            )));
        }
        Ok(Self(word.to_ascii_uppercase()))
    }

    /// Draws a random keyword of `len` letters.
    ///
    /// # Errors
    /// [`CipherError::InvalidKey`] when `len` is zero.
    pub fn random(rng: &mut impl Rng, len: usize) -> Result<Self> {
        if len == 0 {
            return Err(CipherError::InvalidKey("keyword must not be empty".into()));
        }
        let word = (0..len)
            .map(|_| char::from(b'A' + rng.gen_range(0..26)))
            .collect();
        Ok(Self(word))
    }

    /// The keyword as normalized text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// Hill cipher key matrix, invertible modulo 26.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyMatrix {
    /// Entries reduced mod 26, row-major.
    cells: Vec<i64>,
    size: usize,
}

impl KeyMatrix {
    /// Validates shape and invertibility, reducing entries mod 26.
    ///
    /// # Errors
    /// [`CipherError::InvalidKey`] when the cell count does not match a
    /// square of the given size, the size is outside `2..=3`, or the
    /// determinant shares a factor with 26.
    pub fn new(cells: &[i64], size: usize) -> Result<Self> {
        if !(2..=3).contains(&size) {
            return Err(CipherError::InvalidKey(format!(
                "matrix must be 2x2 or 3x3, got size {size}"
            )));
        }
        if cells.len() != size * size {
            return Err(CipherError::InvalidKey(format!(
                "expected {} cells for a {size}x{size} matrix, got {}",
                size * size,
                cells.len()
            )));
        }
        let cells: Vec<i64> = cells.iter().map(|v| v.rem_euclid(26)).collect();
        let matrix = Self { cells, size };
        let det = matrix.determinant().rem_euclid(26);
        if gcd(det, 26) != 1 {
            return Err(CipherError::InvalidKey(format!(
                "matrix determinant {det} is not coprime with 26, matrix is not invertible"
            )));
        }
        Ok(matrix)
    }

    /// Draws a random invertible matrix of the given size.
    ///
    /// # Errors
    /// [`CipherError::InvalidKey`] when the size is outside `2..=3`.
    pub fn random(rng: &mut impl Rng, size: usize) -> Result<Self> {
        if !(2..=3).contains(&size) {
            return Err(CipherError::InvalidKey(format!(
                "matrix must be 2x2 or 3x3, got size {size}"
            )));
        }
        // Rejection sampling. Invertible matrices mod 26 are common
        // enough that this terminates quickly in practice.
        loop {
            let cells: Vec<i64> = (0..size * size).map(|_| rng.gen_range(0..26)).collect();
            if let Ok(matrix) = Self::new(&cells, size) {
                return Ok(matrix);
            }
        }
    }

    /// Side length of the matrix.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Matrix contents as rows, for display.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<i64>> {
        self.cells.chunks(self.size).map(<[i64]>::to_vec).collect()
    }

    pub(crate) fn get(&self, row: usize, col: usize) -> i64 {
        self.cells[row * self.size + col]
    }

    fn determinant(&self) -> i64 {
        match self.size {
            2 => self.get(0, 0) * self.get(1, 1) - self.get(0, 1) * self.get(1, 0),
            3 => {
                self.get(0, 0) * (self.get(1, 1) * self.get(2, 2) - self.get(1, 2) * self.get(2, 1))
                    - self.get(0, 1)
                        * (self.get(1, 0) * self.get(2, 2) - self.get(1, 2) * self.get(2, 0))
                    + self.get(0, 2)
                        * (self.get(1, 0) * self.get(2, 1) - self.get(1, 1) * self.get(2, 0))
            }
            _ => unreachable!("matrix size checked at construction"),
        }
    }

    /// Cofactor of the entry at (row, col): signed determinant of the
    /// minor obtained by deleting that row and column.
    fn cofactor(&self, row: usize, col: usize) -> i64 {
        let minor: Vec<i64> = (0..self.size)
            .filter(|r| *r != row)
            .flat_map(|r| {
                (0..self.size)
                    .filter(|c| *c != col)
                    .map(move |c| self.get(r, c))
            })
            .collect();
        let det = match self.size {
            2 => minor[0],
            3 => minor[0] * minor[3] - minor[1] * minor[2],
            _ => unreachable!("matrix size checked at construction"),
        };
        if (row + col) % 2 == 0 {
            det
        } else {
            -det
        }
    }

    /// Inverse matrix mod 26, via the adjugate. Guaranteed to exist
    /// because invertibility was checked at construction.
    pub(crate) fn inverse(&self) -> Self {
        let det = self.determinant().rem_euclid(26);
        let det_inv = mod_inverse(det).expect("determinant coprime with 26");
        let mut cells = vec![0; self.size * self.size];
        for row in 0..self.size {
            for col in 0..self.size {
                // Adjugate is the transposed cofactor matrix.
                cells[col * self.size + row] = (det_inv * self.cofactor(row, col)).rem_euclid(26);
            }
        }
        Self {
            cells,
            size: self.size,
        }
    }
}

/// Rail count for the rail fence cipher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rails(usize);

impl Rails {
    /// Validates the lower bound. The upper bound (fewer rails than text
    /// letters) depends on the input and is checked by the transform.
    ///
    /// # Errors
    /// [`CipherError::InvalidKey`] when fewer than 2 rails are requested.
    pub fn new(rails: usize) -> Result<Self> {
        if rails >= 2 {
            Ok(Self(rails))
        } else {
            Err(CipherError::InvalidKey(format!(
                "rail fence needs at least 2 rails, got {rails}"
            )))
        }
    }

    pub(crate) fn value(self) -> usize {
        self.0
    }
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 {
        a.abs()
    } else {
        gcd(b, a % b)
    }
}

/// Multiplicative inverse mod 26, by direct search over the 26 residues.
fn mod_inverse(value: i64) -> Option<i64> {
    (1..26).find(|x| (value * x).rem_euclid(26) == 1)
}
