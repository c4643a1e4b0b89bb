use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Which input disagreed with the established word length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthSubject {
    Feedback,
    Guess,
}

impl fmt::Display for LengthSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthSubject::Feedback => write!(f, "feedback"),
            LengthSubject::Guess => write!(f, "guess"),
        }
    }
}

/// Errors raised while narrowing a candidate set.
///
/// All of these are detected before the candidate set is touched, so the
/// set is still valid after a failed round.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// A feedback character was not one of `1`, `2` or `3`.
    #[error("invalid feedback symbol '{symbol}' at position {position} (use 1, 2 or 3)")]
    InvalidFeedbackSymbol { symbol: char, position: usize },

    #[error("{subject} has length {found}, expected {expected}")]
    LengthMismatch {
        subject: LengthSubject,
        expected: usize,
        found: usize,
    },

    /// The initial word list did not share a single word length.
    #[error("word \"{word}\" has length {found}, but the list uses length {expected}")]
    MixedWordLengths {
        word: String,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Error)]
pub enum WordbankError {
    #[error("could not read word list '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("word list '{name}' not found (searched: {})", display_paths(.searched))]
    NotFound {
        name: &'static str,
        searched: Vec<PathBuf>,
    },

    #[error("word list '{}' contains no words of length {word_length}", .path.display())]
    NoWords { path: PathBuf, word_length: usize },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
