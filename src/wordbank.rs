use crate::debug_log;
use crate::error::WordbankError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const DEFAULT_WORD_LENGTH: usize = 5;
const APP_DIR_NAME: &str = "wordle-filter";

/// Which dictionary seeds the candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordList {
    /// Words the game can choose as a solution (narrow).
    Solutions,
    /// Every word the game accepts as a guess (wide).
    Guesses,
}

impl WordList {
    pub fn from_wide_flag(wide: bool) -> Self {
        if wide {
            WordList::Guesses
        } else {
            WordList::Solutions
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            WordList::Solutions => "possible_solutions",
            WordList::Guesses => "possible_guesses",
        }
    }
}

fn normalize_word(line: &str, word_length: usize) -> Option<String> {
    let word = line.trim().to_lowercase();
    if !word.is_empty()
        && word.chars().count() == word_length
        && word.chars().all(|c| c.is_ascii_alphabetic())
    {
        Some(word)
    } else {
        None
    }
}

pub fn load_wordbank_from_str(data: &str, word_length: usize) -> Vec<String> {
    data.lines()
        .filter_map(|line| normalize_word(line, word_length))
        .collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(
    path: P,
    word_length: usize,
) -> Result<Vec<String>, WordbankError> {
    let path = path.as_ref();
    let io_error = |source| WordbankError::Io {
        path: path.to_path_buf(),
        source,
    };

    let reader = BufReader::new(File::open(path).map_err(io_error)?);
    let mut words = Vec::new();
    let mut skipped = 0usize;
    for line in reader.lines() {
        match normalize_word(&line.map_err(io_error)?, word_length) {
            Some(word) => words.push(word),
            None => skipped += 1,
        }
    }
    debug_log!(
        "loaded {} words from {} ({} lines skipped)",
        words.len(),
        path.display(),
        skipped
    );

    if words.is_empty() {
        return Err(WordbankError::NoWords {
            path: path.to_path_buf(),
            word_length,
        });
    }
    Ok(words)
}

/// Places a word list is looked for, in order.
///
/// An explicit data directory is the only place searched; otherwise the
/// working directory comes first, then the per-user data directory.
pub fn wordbank_search_paths(list: WordList, data_dir: Option<&Path>) -> Vec<PathBuf> {
    if let Some(dir) = data_dir {
        return vec![dir.join(list.file_name())];
    }
    let mut paths = vec![PathBuf::from(list.file_name())];
    if let Some(dir) = dirs::data_dir() {
        paths.push(dir.join(APP_DIR_NAME).join(list.file_name()));
    }
    paths
}

pub fn locate_wordbank(list: WordList, data_dir: Option<&Path>) -> Result<PathBuf, WordbankError> {
    let searched = wordbank_search_paths(list, data_dir);
    match searched.iter().find(|p| p.is_file()) {
        Some(path) => Ok(path.clone()),
        None => Err(WordbankError::NotFound {
            name: list.file_name(),
            searched,
        }),
    }
}

/// Load the initial candidate set: `input` if given, else the selected list.
pub fn load_wordbank(
    input: Option<&Path>,
    list: WordList,
    data_dir: Option<&Path>,
    word_length: usize,
) -> Result<(PathBuf, Vec<String>), WordbankError> {
    let path = match input {
        Some(path) => path.to_path_buf(),
        None => locate_wordbank(list, data_dir)?,
    };
    let words = load_wordbank_from_file(&path, word_length)?;
    Ok((path, words))
}
