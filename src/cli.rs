use crate::debug_log;
use crate::error::FilterError;
use crate::filter::{Feedback, parse_feedback};
use crate::game_state::{GameInterface, SessionInfo, UserAction};
use crate::wordbank::DEFAULT_WORD_LENGTH;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::io::BufRead;
use std::path::PathBuf;

pub const DEFAULT_SHOW: usize = 20;

/// Narrow a Wordle word list from the feedback of each guess
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Start from every accepted guess (possible_guesses) instead of the
    /// possible solutions
    #[arg(long)]
    pub wide: bool,

    /// Path to a newline-delimited word list, overriding --wide
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Directory holding possible_solutions and possible_guesses
    #[arg(short = 'd', long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// Word length of the session
    #[arg(
        short = 'l',
        long = "length",
        default_value_t = DEFAULT_WORD_LENGTH,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub word_length: usize,

    /// Number of candidates printed after each round
    #[arg(long, default_value_t = DEFAULT_SHOW)]
    pub show: usize,

    /// Use the terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to this file instead of stderr (required for -v with --tui)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Checks that argument combinations clap cannot express on its own.
    fn validate(self) -> Result<Self, clap::Error> {
        // Log lines on stderr would draw over the alternate screen.
        if self.tui && self.verbose > 0 && self.log_file.is_none() {
            return Err(Cli::command().error(
                ErrorKind::MissingRequiredArgument,
                "--log-file is required when --tui is combined with -v",
            ));
        }
        Ok(self)
    }

    /// Whether a logger may be installed for this session.
    pub fn logs_enabled(&self) -> bool {
        !self.tui || self.log_file.is_some()
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse().validate().unwrap_or_else(|e| e.exit())
}

pub fn try_parse_cli_from<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args)?.validate()
}

// UI Input/Output functions

pub enum GuessInput {
    Valid(String),
    Invalid,
    Exit,
    NewGame,
}

fn is_valid_word(word: &str, word_length: usize) -> bool {
    word.chars().count() == word_length && word.chars().all(|c| c.is_ascii_alphabetic())
}

/// Reads one trimmed line; `None` at end of input or on a read error.
fn read_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => None,
        Ok(_) => Some(input.trim().to_string()),
        Err(e) => {
            debug_log!("read_line() - {}", e);
            None
        }
    }
}

pub fn display_welcome(info: &SessionInfo) {
    println!("Welcome to wordle-filter!");
    println!("{} candidate words loaded.", info.word_count);
    println!("Enter your guessed word, then a 1/2/3 string with the following rules:");
    println!("1 - letter is in the correct position");
    println!("2 - letter exists in the solution but is not in this position");
    println!("3 - letter does not exist in the solution (beyond copies already marked)");
    println!("example: other 33213");
    println!("You have {} rounds. Type 'next' for a new game or 'exit' to quit.", info.max_rounds);
}

pub fn read_guess<R: BufRead>(reader: &mut R, word_length: usize) -> GuessInput {
    println!("\nEnter your guess ({word_length} letters):");
    let Some(input) = read_line(reader) else {
        return GuessInput::Exit;
    };
    let input = input.to_lowercase();

    match input.as_str() {
        "exit" => GuessInput::Exit,
        "next" => GuessInput::NewGame,
        _ if is_valid_word(&input, word_length) => GuessInput::Valid(input),
        _ => {
            println!("Invalid guess. Please enter {word_length} letters.");
            GuessInput::Invalid
        }
    }
}

pub fn read_feedback<R: BufRead>(reader: &mut R) -> Option<Vec<Feedback>> {
    println!("Enter feedback (1=right position, 2=elsewhere, 3=absent, e.g. 33213):");
    let input = read_line(reader)?;

    match parse_feedback(&input) {
        Ok(feedback) => Some(feedback),
        Err(e) => {
            println!("Invalid feedback: {e}");
            None
        }
    }
}

pub fn display_candidates(candidates: &[String], round: usize, max_display: usize) {
    println!("Round {round}: possible candidates ({})", candidates.len());
    for word in candidates.iter().take(max_display) {
        println!("{word}");
    }
    if candidates.len() > max_display {
        println!("...and {} more", candidates.len() - max_display);
    }
}

pub fn display_filter_error(error: &FilterError) {
    println!("Round rejected: {error}");
}

pub fn display_exit_message() {
    println!("Exiting.");
}

pub fn display_new_game_message(word_count: usize) {
    println!("New game started. Loaded {} words.", word_count);
}

pub fn display_no_candidates_message() {
    println!("No candidates remain. Check your inputs.");
}

pub fn display_solution_found(solution: &str) {
    println!("Solution found: {}", solution);
}

pub fn display_out_of_rounds(remaining: usize) {
    println!("Out of rounds with {remaining} candidates remaining.");
}

/// CLI implementation of the GameInterface trait
/// This struct wraps a BufRead reader and implements the game interface for CLI interaction
pub struct CliInterface<R: BufRead> {
    reader: R,
    word_length: usize,
    max_display: usize,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            word_length: DEFAULT_WORD_LENGTH,
            max_display: DEFAULT_SHOW,
        }
    }

    #[must_use]
    pub fn with_max_display(mut self, max_display: usize) -> Self {
        self.max_display = max_display;
        self
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_welcome(&mut self, info: &SessionInfo) {
        if let Some(length) = info.word_length {
            self.word_length = length;
        }
        display_welcome(info);
    }

    fn read_guess(&mut self) -> Option<UserAction> {
        match read_guess(&mut self.reader, self.word_length) {
            GuessInput::Valid(guess) => Some(UserAction::Guess(guess)),
            GuessInput::Exit => Some(UserAction::Exit),
            GuessInput::NewGame => Some(UserAction::NewGame),
            GuessInput::Invalid => None,
        }
    }

    fn read_feedback(&mut self) -> Option<Vec<Feedback>> {
        read_feedback(&mut self.reader)
    }

    fn display_candidates(&mut self, candidates: &[String], round: usize) {
        display_candidates(candidates, round, self.max_display);
    }

    fn display_filter_error(&mut self, error: &FilterError) {
        display_filter_error(error);
    }

    fn display_no_candidates_message(&mut self) {
        display_no_candidates_message();
    }

    fn display_solution_found(&mut self, solution: &str) {
        display_solution_found(solution);
    }

    fn display_out_of_rounds(&mut self, remaining: usize) {
        display_out_of_rounds(remaining);
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }

    fn display_new_game_message(&mut self, word_count: usize) {
        display_new_game_message(word_count);
    }
}
