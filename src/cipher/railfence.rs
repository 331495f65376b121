//! Rail fence zigzag transposition.
//!
//! Characters are written diagonally across `rails` rows, bouncing off
//! the top and bottom, then read off rail by rail. No pattern is stored:
//! decryption rebuilds the rail boundaries purely from the text length
//! and rail count by walking the same zigzag twice.

use crate::cipher::{Outcome, Visualization};
use crate::error::{CipherError, Result};
use crate::key::Rails;
use crate::text;

/// Encrypts by reading the zigzag rail by rail.
///
/// # Errors
/// [`CipherError::InvalidKey`] when the rail count is not smaller than
/// the number of letters.
pub fn encrypt(input: &str, key: Rails) -> Result<Outcome> {
    let input = text::normalize(input);
    if input.is_empty() {
        return Ok(empty(key));
    }
    check_bound(&input, key)?;

    let path = zigzag_path(input.len(), key.value());
    let mut rails: Vec<String> = vec![String::new(); key.value()];
    for (c, (rail, _)) in input.chars().zip(&path) {
        rails[*rail].push(c);
    }
    Ok(Outcome {
        text: rails.concat(),
        visualization: visualization(key, path),
    })
}

/// Decrypts by simulating the zigzag once to find per-rail lengths,
/// slicing the ciphertext into rails, then walking the zigzag again to
/// put each character back in writing order.
///
/// # Errors
/// [`CipherError::InvalidKey`] when the rail count is not smaller than
/// the number of letters.
pub fn decrypt(input: &str, key: Rails) -> Result<Outcome> {
    let input = text::normalize(input);
    if input.is_empty() {
        return Ok(empty(key));
    }
    check_bound(&input, key)?;

    let path = zigzag_path(input.len(), key.value());
    let mut lengths = vec![0usize; key.value()];
    for (rail, _) in &path {
        lengths[*rail] += 1;
    }

    // Split the ciphertext into its rails.
    let mut rails = Vec::with_capacity(key.value());
    let mut offset = 0;
    for len in lengths {
        rails.push(input[offset..offset + len].chars());
        offset += len;
    }

    // Replay the zigzag, pulling the next character off whichever rail
    // the pattern visits.
    let mut text = String::with_capacity(input.len());
    for (rail, _) in &path {
        text.push(rails[*rail].next().expect("rail lengths match the path"));
    }
    Ok(Outcome {
        text,
        visualization: visualization(key, path),
    })
}

/// (rail, column) for each character index, bouncing between the top
/// and bottom rails.
fn zigzag_path(len: usize, rails: usize) -> Vec<(usize, usize)> {
    let mut path = Vec::with_capacity(len);
    let mut rail = 0usize;
    let mut down = true;
    for col in 0..len {
        path.push((rail, col));
        if down {
            if rail + 1 == rails {
                down = false;
                rail -= 1;
            } else {
                rail += 1;
            }
        } else if rail == 0 {
            down = true;
            rail += 1;
        } else {
            rail -= 1;
        }
    }
    path
}

fn check_bound(input: &str, key: Rails) -> Result<()> {
    if key.value() >= input.len() {
        return Err(CipherError::InvalidKey(format!(
            "rail count {} must be smaller than the {} letters of text",
            key.value(),
            input.len()
        )));
    }
    Ok(())
}

fn empty(key: Rails) -> Outcome {
    Outcome {
        text: String::new(),
        visualization: visualization(key, Vec::new()),
    }
}

fn visualization(key: Rails, path: Vec<(usize, usize)>) -> Visualization {
    Visualization::Zigzag {
        rails: key.value(),
        path,
    }
}
