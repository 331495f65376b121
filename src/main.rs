//! CLI program to encrypt, decrypt and analyze classical ciphers.
//!
//! Run with --help for usage and options.

#![deny(rustdoc::all)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]

mod io;

use clap::{ArgEnum, Parser};
use classical::analysis::{AnalysisReport, ComparisonReport, DEFAULT_MAX_KEY_LENGTH};
use classical::cipher::{self, CipherId, Mode, Visualization};
use classical::key::{KeyMatrix, KeySpec, Keyword, Shift};
use classical::metrics::Tracker;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use io::{Input, Output};
use rand::prelude::*;
use std::fmt::Write as _;
use std::path::PathBuf;

/// Cipher selection shared by the encrypt, decrypt and keygen verbs.
#[derive(ArgEnum, Clone, Copy)]
enum CipherArg {
    Caesar,
    Vigenere,
    Beaufort,
    Autokey,
    Playfair,
    Hill,
    RailFence,
    Columnar,
    Myszkowski,
    DoubleTransposition,
    Otp,
    Lcg,
    Bbs,
    Des,
    Rsa,
}

impl From<CipherArg> for CipherId {
    fn from(arg: CipherArg) -> Self {
        match arg {
            CipherArg::Caesar => Self::Caesar,
            CipherArg::Vigenere => Self::Vigenere,
            CipherArg::Beaufort => Self::Beaufort,
            CipherArg::Autokey => Self::Autokey,
            CipherArg::Playfair => Self::Playfair,
            CipherArg::Hill => Self::Hill,
            CipherArg::RailFence => Self::RailFence,
            CipherArg::Columnar => Self::Columnar,
            CipherArg::Myszkowski => Self::Myszkowski,
            CipherArg::DoubleTransposition => Self::DoubleTransposition,
            CipherArg::Otp => Self::Otp,
            CipherArg::Lcg => Self::Lcg,
            CipherArg::Bbs => Self::Bbs,
            CipherArg::Des => Self::Des,
            CipherArg::Rsa => Self::Rsa,
        }
    }
}

/// Parses the CLI key string into the shape the chosen cipher expects.
fn parse_key(cipher: CipherId, raw: &str) -> Result<KeySpec> {
    match cipher {
        CipherId::Caesar | CipherId::RailFence => {
            let number = raw
                .trim()
                .parse()
                .map_err(|_| eyre!("{} takes a numeric key, got {raw:?}", cipher.name()))?;
            Ok(KeySpec::Number(number))
        }
        CipherId::Hill => parse_matrix(raw),
        CipherId::DoubleTransposition => match raw.split_once(',') {
            Some((first, second)) => Ok(KeySpec::KeywordPair(
                first.trim().to_string(),
                second.trim().to_string(),
            )),
            None => Ok(KeySpec::Keyword(raw.trim().to_string())),
        },
        _ => Ok(KeySpec::Keyword(raw.trim().to_string())),
    }
}

/// Accepts a matrix as rows separated by semicolons ("3,3;2,5") or as a
/// flat comma list whose length is a perfect square ("3,3,2,5").
fn parse_matrix(raw: &str) -> Result<KeySpec> {
    let rows: Vec<&str> = raw.split(';').collect();
    let cells: Vec<i64> = raw
        .split(|c| c == ';' || c == ',')
        .map(|cell| {
            cell.trim()
                .parse()
                .map_err(|_| eyre!("matrix cell {:?} is not an integer", cell.trim()))
        })
        .collect::<Result<_>>()?;
    let size = if rows.len() > 1 {
        rows.len()
    } else {
        match cells.len() {
            4 => 2,
            9 => 3,
            n => return Err(eyre!("cannot shape {n} cells into a square matrix")),
        }
    };
    Ok(KeySpec::Matrix { cells, size })
}

#[derive(Parser)]
struct Transform {
    /// Cipher to apply
    #[clap(arg_enum)]
    cipher: CipherArg,
    /// Cipher key: a number, a keyword, two comma-separated keywords or
    /// a matrix like "3,3;2,5"
    #[clap(short, long)]
    key: String,
    /// Text to process; read from --input or stdin when omitted
    text: Option<String>,
    /// Read the text from a file instead
    #[clap(short, long, conflicts_with = "text")]
    input: Option<PathBuf>,
    /// Write the result to a file instead of stdout
    #[clap(short, long)]
    output: Option<PathBuf>,
    /// Print the transform's intermediate state to stderr
    #[clap(long)]
    show_steps: bool,
    /// Print timing information to stderr
    #[clap(long)]
    timings: bool,
}

impl Transform {
    fn run(self, mode: Mode) -> Result<()> {
        let text = match self.text {
            Some(text) => text,
            None => Input::try_from(self.input)?.read_to_string()?,
        };

        let id = CipherId::from(self.cipher);
        let key = parse_key(id, &self.key)?;
        let mut tracker = Tracker::new();
        let label = match mode {
            Mode::Encrypt => "encrypt",
            Mode::Decrypt => "decrypt",
        };
        let outcome = tracker.time(label, text.len(), || cipher::apply(id, mode, &text, &key))?;

        if self.show_steps {
            eprint!("{}", render_visualization(&outcome.visualization));
        }
        if self.timings {
            for summary in tracker.summary() {
                eprintln!(
                    "{}: {} call(s), {:?} total",
                    summary.operation, summary.calls, summary.total
                );
            }
        }
        Output::try_from(self.output)?.write_line(&outcome.text)
    }
}

#[derive(Parser)]
struct Analyze {
    /// Text to analyze; read from --input or stdin when omitted
    text: Option<String>,
    /// Read the text from a file instead
    #[clap(short, long, conflicts_with = "text")]
    input: Option<PathBuf>,
    /// Largest key length the Kasiski estimate will consider
    #[clap(long, default_value_t = DEFAULT_MAX_KEY_LENGTH)]
    max_key_length: usize,
    /// How many of the most frequent letters to list
    #[clap(long, default_value_t = 5)]
    top: usize,
}

impl Analyze {
    fn run(self) -> Result<()> {
        let text = match self.text {
            Some(text) => text,
            None => Input::try_from(self.input)?.read_to_string()?,
        };
        let mut report = AnalysisReport::of(&text);
        if self.max_key_length != DEFAULT_MAX_KEY_LENGTH {
            report.key_length =
                classical::analysis::kasiski::estimate_key_length(&text, self.max_key_length);
        }
        print!("{}", render_report(&report, self.top));
        Ok(())
    }
}

#[derive(Parser)]
struct Compare {
    /// The plaintext sample
    plaintext: String,
    /// The ciphertext sample
    ciphertext: String,
}

impl Compare {
    fn run(self) -> Result<()> {
        let report = ComparisonReport::of(&self.plaintext, &self.ciphertext);
        let mut out = String::new();
        out.push_str("Plaintext\n---------\n");
        out.push_str(&render_report(&report.plaintext, 5));
        out.push_str("\nCiphertext\n----------\n");
        out.push_str(&render_report(&report.ciphertext, 5));
        let _ = writeln!(
            out,
            "\nEntropy gain: {:+.4} bits ({:+.1}%), {:?}",
            report.entropy.delta, report.entropy.percent_improvement, report.entropy.verdict
        );
        print!("{out}");
        Ok(())
    }
}

#[derive(Parser)]
struct Keygen {
    /// Cipher to generate a key for
    #[clap(arg_enum)]
    cipher: CipherArg,
    /// Keyword length, or matrix side for Hill
    #[clap(short, long, default_value_t = 6)]
    length: usize,
}

impl Keygen {
    fn run(self) -> Result<()> {
        let mut rng = rand::thread_rng();
        let id = CipherId::from(self.cipher);
        let key = match id {
            CipherId::Caesar => Shift::random(&mut rng).value().to_string(),
            CipherId::RailFence => rng.gen_range(2..=9).to_string(),
            CipherId::Hill => {
                let size = self.length.clamp(2, 3);
                let matrix = KeyMatrix::random(&mut rng, size)?;
                matrix
                    .rows()
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(",")
                    })
                    .collect::<Vec<_>>()
                    .join(";")
            }
            CipherId::DoubleTransposition => {
                let first = Keyword::random(&mut rng, self.length)?;
                let second = Keyword::random(&mut rng, self.length)?;
                format!("{},{}", first.as_str(), second.as_str())
            }
            _ if id.implemented() => Keyword::random(&mut rng, self.length)?.as_str().to_string(),
            _ => return Err(eyre!("{} has no key to generate", id.name())),
        };
        println!("{key}");
        Ok(())
    }
}

fn render_visualization(visualization: &Visualization) -> String {
    let mut out = String::new();
    match visualization {
        Visualization::AlphabetMap { plain, cipher } => {
            let _ = writeln!(out, "plain:  {}", plain.iter().collect::<String>());
            let _ = writeln!(out, "cipher: {}", cipher.iter().collect::<String>());
        }
        Visualization::KeyStream { stream } => {
            let _ = writeln!(out, "key stream: {}", stream.iter().collect::<String>());
        }
        Visualization::KeySquare { rows } | Visualization::Grid { rows, .. } => {
            for row in rows {
                let _ = writeln!(
                    out,
                    "{}",
                    row.iter()
                        .map(|c| c.to_string())
                        .collect::<Vec<_>>()
                        .join(" ")
                );
            }
            if let Visualization::Grid { read_order, .. } = visualization {
                let _ = writeln!(
                    out,
                    "column read order: {}",
                    read_order
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(" ")
                );
            }
        }
        Visualization::MatrixBlocks {
            matrix,
            input_blocks,
            output_blocks,
        } => {
            for row in matrix {
                let _ = writeln!(
                    out,
                    "[ {} ]",
                    row.iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(" ")
                );
            }
            for (input, output) in input_blocks.iter().zip(output_blocks) {
                let _ = writeln!(out, "{input} -> {output}");
            }
        }
        Visualization::Zigzag { rails, path } => {
            for rail in 0..*rails {
                let line: String = path
                    .iter()
                    .map(|(r, _)| if *r == rail { '*' } else { '.' })
                    .collect();
                let _ = writeln!(out, "{line}");
            }
        }
        Visualization::Passes(passes) => {
            for (i, pass) in passes.iter().enumerate() {
                let _ = writeln!(out, "pass {}:", i + 1);
                out.push_str(&render_visualization(pass));
            }
        }
    }
    out
}

fn render_report(report: &AnalysisReport, top: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "letters: {}", report.frequency.total());
    let _ = writeln!(
        out,
        "distinct letters: {}",
        report.frequency.unique_letters()
    );

    let mut entries = report.frequency.entries();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    for (letter, count, percentage) in entries.iter().take(top).filter(|(_, count, _)| *count > 0) {
        let _ = writeln!(out, "  {letter}: {count} ({percentage:.2}%)");
    }

    let _ = writeln!(
        out,
        "entropy: {:.4} / {:.4} bits ({:.1}%, {:?})",
        report.entropy.bits,
        report.entropy.max_bits,
        report.entropy.normalized,
        report.entropy.rating
    );
    let _ = writeln!(
        out,
        "bigram conditional entropy: {:.4} bits",
        report.conditional_bits
    );
    let _ = writeln!(
        out,
        "chi-squared vs English: {:.2}",
        report.english.chi_squared
    );
    let _ = writeln!(
        out,
        "index of coincidence: {:.4} ({:?})",
        report.ic.value, report.ic.interpretation
    );
    match &report.key_length {
        Some(estimate) => {
            let _ = writeln!(
                out,
                "key length candidates ({} repeat distances):",
                estimate.distances_examined
            );
            for candidate in &estimate.candidates {
                let _ = writeln!(
                    out,
                    "  {}: {:.1}% of distances, column IC {:.4}",
                    candidate.length, candidate.confidence, candidate.mean_column_ic
                );
            }
        }
        None => {
            let _ = writeln!(out, "key length: no estimate (no repeated sequences)");
        }
    }
    out
}

#[derive(Parser)]
#[clap(author, version, about)]
enum Opts {
    /// Encrypt text with a classical cipher
    Encrypt(Transform),
    /// Decrypt text with a classical cipher
    Decrypt(Transform),
    /// Compute frequency, entropy and key length statistics for a text
    Analyze(Analyze),
    /// Compare plaintext and ciphertext statistics side by side
    Compare(Compare),
    /// Generate a random key for a cipher
    Keygen(Keygen),
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let opts = Opts::parse();
    match opts {
        Opts::Encrypt(t) => t.run(Mode::Encrypt)?,
        Opts::Decrypt(t) => t.run(Mode::Decrypt)?,
        Opts::Analyze(a) => a.run()?,
        Opts::Compare(c) => c.run()?,
        Opts::Keygen(k) => k.run()?,
    };
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_key_shapes_follow_the_cipher() {
        assert_eq!(
            parse_key(CipherId::Caesar, "7").unwrap(),
            KeySpec::Number(7)
        );
        assert_eq!(
            parse_key(CipherId::Vigenere, "lemon").unwrap(),
            KeySpec::Keyword("lemon".into())
        );
        assert_eq!(
            parse_key(CipherId::Hill, "3,3;2,5").unwrap(),
            KeySpec::Matrix {
                cells: vec![3, 3, 2, 5],
                size: 2
            }
        );
        assert_eq!(
            parse_key(CipherId::Hill, "3,3,2,5").unwrap(),
            KeySpec::Matrix {
                cells: vec![3, 3, 2, 5],
                size: 2
            }
        );
        assert_eq!(
            parse_key(CipherId::DoubleTransposition, "STRIPE,CARGO").unwrap(),
            KeySpec::KeywordPair("STRIPE".into(), "CARGO".into())
        );
    }

    #[test]
    fn parse_key_rejects_garbage() {
        assert!(parse_key(CipherId::Caesar, "three").is_err());
        assert!(parse_key(CipherId::Hill, "1,2,3").is_err());
        assert!(parse_key(CipherId::Hill, "1,2,x,4").is_err());
    }

    #[test]
    fn rendered_report_mentions_the_headline_numbers() {
        let report = AnalysisReport::of("HELLO WORLD");
        let rendered = render_report(&report, 3);
        assert!(rendered.contains("letters: 10"));
        assert!(rendered.contains("index of coincidence"));
    }
}
