//! Hill block cipher: matrix multiplication mod 26.

use crate::cipher::{Outcome, Visualization};
use crate::key::KeyMatrix;
use crate::text;

const PADDING: u8 = b'X';

/// Encrypts by multiplying each block (as a column vector of letter
/// indices) with the key matrix mod 26. Input is padded with `X` to a
/// multiple of the block size.
#[must_use]
pub fn encrypt(input: &str, key: &KeyMatrix) -> Outcome {
    transform(input, key, key)
}

/// Decrypts by multiplying with the modular inverse of the key matrix.
/// Padding added during encryption remains in the output.
#[must_use]
pub fn decrypt(input: &str, key: &KeyMatrix) -> Outcome {
    transform(input, key, &key.inverse())
}

fn transform(input: &str, key: &KeyMatrix, multiplier: &KeyMatrix) -> Outcome {
    let mut input: Vec<u8> = text::normalize(input).into_bytes();
    let size = key.size();
    while input.len() % size != 0 {
        input.push(PADDING);
    }

    let mut text = String::with_capacity(input.len());
    let mut input_blocks = Vec::with_capacity(input.len() / size);
    let mut output_blocks = Vec::with_capacity(input.len() / size);
    for block in input.chunks(size) {
        let mut out = Vec::with_capacity(size);
        for row in 0..size {
            let sum: i64 = (0..size)
                .map(|col| multiplier.get(row, col) * i64::from(block[col] - b'A'))
                .sum();
            out.push(text::index_letter(usize::try_from(sum.rem_euclid(26)).unwrap()));
        }
        input_blocks.push(String::from_utf8(block.to_vec()).unwrap());
        output_blocks.push(String::from_utf8(out.clone()).unwrap());
        text.extend(out.into_iter().map(char::from));
    }

    Outcome {
        text,
        visualization: Visualization::MatrixBlocks {
            matrix: key.rows(),
            input_blocks,
            output_blocks,
        },
    }
}
