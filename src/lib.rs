// Library interface for wordle-filter
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod filter;
pub mod game_state;
pub mod logging;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::{FilterError, LengthSubject, WordbankError};
pub use filter::{
    ConstraintFilter, Feedback, LetterRequirement, LetterRequirements, filter_candidates,
    format_feedback, get_feedback, parse_feedback,
};
pub use game_state::{GameInterface, GameOutcome, MAX_ROUNDS, game_loop};
pub use wordbank::{WordList, load_wordbank, load_wordbank_from_file, load_wordbank_from_str};
