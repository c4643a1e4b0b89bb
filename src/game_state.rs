use crate::error::FilterError;
use crate::filter::{ConstraintFilter, Feedback, format_feedback};
use crate::info_log;

/// The game allows six guesses; the session ends after as many rounds.
pub const MAX_ROUNDS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    Exit,
    NewGame,
}

/// What an interface needs to know when a session starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub word_count: usize,
    pub word_length: Option<usize>,
    pub max_rounds: usize,
}

/// How the last game of a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    Solved(String),
    NoCandidates,
    OutOfRounds { remaining: usize },
    Exited,
}

/// Presentation layer driven by [`game_loop`].
///
/// `read_guess` and `read_feedback` return `None` for input the interface
/// rejected; the loop then asks for a guess again.
pub trait GameInterface {
    fn display_welcome(&mut self, info: &SessionInfo);
    fn read_guess(&mut self) -> Option<UserAction>;
    fn read_feedback(&mut self) -> Option<Vec<Feedback>>;
    fn display_candidates(&mut self, candidates: &[String], round: usize);
    fn display_filter_error(&mut self, error: &FilterError);
    fn display_no_candidates_message(&mut self);
    fn display_solution_found(&mut self, solution: &str);
    fn display_out_of_rounds(&mut self, remaining: usize);
    fn display_exit_message(&mut self);
    fn display_new_game_message(&mut self, word_count: usize);

    /// Asked after a game ends. The line interface stops there.
    fn play_again(&mut self) -> bool {
        false
    }
}

enum RoundResult {
    Continue,
    Finished(GameOutcome),
}

fn check_game_state(filter: &ConstraintFilter, round: usize) -> RoundResult {
    match filter.candidates() {
        [] => RoundResult::Finished(GameOutcome::NoCandidates),
        [solution] => RoundResult::Finished(GameOutcome::Solved(solution.clone())),
        rest if round >= MAX_ROUNDS => RoundResult::Finished(GameOutcome::OutOfRounds {
            remaining: rest.len(),
        }),
        _ => RoundResult::Continue,
    }
}

fn announce_outcome<I: GameInterface + ?Sized>(interface: &mut I, outcome: &GameOutcome) {
    match outcome {
        GameOutcome::Solved(solution) => interface.display_solution_found(solution),
        GameOutcome::NoCandidates => interface.display_no_candidates_message(),
        GameOutcome::OutOfRounds { remaining } => interface.display_out_of_rounds(*remaining),
        GameOutcome::Exited => interface.display_exit_message(),
    }
}

fn new_filter(initial_wordbank: &[String]) -> Result<ConstraintFilter, FilterError> {
    ConstraintFilter::new(initial_wordbank.to_vec())
}

/// Run guess/feedback rounds against `initial_wordbank` until the player
/// stops. Returns how the last game ended.
pub fn game_loop<I: GameInterface + ?Sized>(
    initial_wordbank: &[String],
    interface: &mut I,
) -> Result<GameOutcome, FilterError> {
    let mut filter = new_filter(initial_wordbank)?;
    let mut round = 0;

    interface.display_welcome(&SessionInfo {
        word_count: filter.len(),
        word_length: filter.word_length(),
        max_rounds: MAX_ROUNDS,
    });

    loop {
        let guess = match interface.read_guess() {
            Some(UserAction::Exit) => {
                interface.display_exit_message();
                return Ok(GameOutcome::Exited);
            }
            Some(UserAction::NewGame) => {
                filter = new_filter(initial_wordbank)?;
                round = 0;
                interface.display_new_game_message(filter.len());
                continue;
            }
            Some(UserAction::Guess(guess)) => guess,
            None => continue,
        };

        let Some(feedback) = interface.read_feedback() else {
            continue;
        };

        if let Err(error) = filter.apply(&guess, &feedback) {
            info_log!("round rejected: {}", error);
            interface.display_filter_error(&error);
            continue;
        }
        round += 1;
        info_log!(
            "round {}: {} {} -> {} candidates",
            round,
            guess,
            format_feedback(&feedback),
            filter.len()
        );
        interface.display_candidates(filter.candidates(), round);

        if let RoundResult::Finished(outcome) = check_game_state(&filter, round) {
            announce_outcome(interface, &outcome);
            if !interface.play_again() {
                return Ok(outcome);
            }
            filter = new_filter(initial_wordbank)?;
            round = 0;
            interface.display_new_game_message(filter.len());
        }
    }
}
