//! Library for encrypting, decrypting and analyzing classical ciphers.
//!
//! Two layers, both pure and free of I/O: the transform library under
//! [`cipher`] (Caesar through double transposition) and the statistics
//! layer under [`analysis`] (frequency, entropy, index of coincidence,
//! Kasiski key length estimation). Keys are validated eagerly by the
//! types in [`key`]; failures carry a human-readable message in
//! [`CipherError`].

// Forbid unsafe code (https://doc.rust-lang.org/book/ch19-01-unsafe-rust.html)
#![forbid(unsafe_code)]
// Disallow all missing docs and rustdoc lints
#![deny(missing_docs)]
#![deny(rustdoc::all)]
// Error from most clippy warnings (https://github.com/rust-lang/rust-clippy)
#![deny(clippy::all)]
// Warnings from pedantic clippy lints
#![warn(clippy::pedantic)]
// Warnings about missing Cargo.toml fields
#![warn(clippy::cargo)]
// More about lint levels https://doc.rust-lang.org/rustc/lints/levels.html

pub mod analysis;
pub mod cipher;
pub mod error;
pub mod key;
pub mod metrics;
mod text;

pub use error::CipherError;
pub use text::{normalize, ALPHABET_LEN};
