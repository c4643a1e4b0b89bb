//! Candidate narrowing from per-letter feedback.
//!
//! Each round derives a table of letter requirements from the guess and its
//! feedback, then runs two stable passes over the candidate set:
//!
//! 1. the count pass keeps words holding at least (or, when the letter was
//!    also marked absent, exactly) the required number of each guessed letter;
//! 2. the position pass keeps words that agree with every exact mark and
//!    disagree with every present mark.

use crate::debug_log;
use crate::error::{FilterError, LengthSubject};
use std::collections::HashMap;
use std::fmt;

/// Feedback for a single letter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Right letter in the right position (`1`).
    Exact,
    /// Letter occurs in the solution, but not here (`2`).
    Present,
    /// No further copies of this letter beyond those already counted (`3`).
    Absent,
}

impl Feedback {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Feedback::Exact),
            '2' => Some(Feedback::Present),
            '3' => Some(Feedback::Absent),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Feedback::Exact => '1',
            Feedback::Present => '2',
            Feedback::Absent => '3',
        }
    }

    fn counts_toward_required(self) -> bool {
        matches!(self, Feedback::Exact | Feedback::Present)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Parse a feedback code such as `"11232"`.
pub fn parse_feedback(input: &str) -> Result<Vec<Feedback>, FilterError> {
    input
        .chars()
        .enumerate()
        .map(|(position, symbol)| {
            Feedback::from_char(symbol)
                .ok_or(FilterError::InvalidFeedbackSymbol { symbol, position })
        })
        .collect()
}

pub fn format_feedback(feedback: &[Feedback]) -> String {
    feedback.iter().map(|f| f.to_char()).collect()
}

/// How many copies of one letter a surviving word must hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LetterRequirement {
    /// Number of exact or present marks for the letter.
    pub required: usize,
    /// Set when the letter was also marked absent: the solution holds exactly
    /// `required` copies, no more.
    pub exact: bool,
}

impl LetterRequirement {
    pub fn admits(self, count: usize) -> bool {
        if self.exact {
            count == self.required
        } else {
            count >= self.required
        }
    }
}

/// Per-letter requirements derived from a single guess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterRequirements {
    letters: HashMap<char, LetterRequirement>,
}

impl LetterRequirements {
    pub fn derive(guess: &[char], feedback: &[Feedback]) -> Self {
        let mut letters: HashMap<char, LetterRequirement> = HashMap::new();
        for (&letter, &mark) in guess.iter().zip(feedback) {
            let entry = letters.entry(letter).or_default();
            if mark.counts_toward_required() {
                entry.required += 1;
            } else {
                entry.exact = true;
            }
        }
        Self { letters }
    }

    pub fn get(&self, letter: char) -> Option<LetterRequirement> {
        self.letters.get(&letter).copied()
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, LetterRequirement)> + '_ {
        self.letters.iter().map(|(&letter, &req)| (letter, req))
    }

    /// The count pass predicate.
    pub fn admits(&self, word: &str) -> bool {
        self.letters
            .iter()
            .all(|(&letter, req)| req.admits(word.chars().filter(|&c| c == letter).count()))
    }
}

/// The position pass predicate. `word` and `guess` have equal length.
fn admits_positions(word: &str, guess: &[char], feedback: &[Feedback]) -> bool {
    word.chars()
        .zip(guess)
        .zip(feedback)
        .all(|((w, &g), mark)| match mark {
            Feedback::Exact => w == g,
            Feedback::Present => w != g,
            Feedback::Absent => true,
        })
}

fn check_lengths(
    guess: &[char],
    feedback: &[Feedback],
    word_length: Option<usize>,
) -> Result<(), FilterError> {
    if feedback.len() != guess.len() {
        return Err(FilterError::LengthMismatch {
            subject: LengthSubject::Feedback,
            expected: guess.len(),
            found: feedback.len(),
        });
    }
    if let Some(expected) = word_length
        && guess.len() != expected
    {
        return Err(FilterError::LengthMismatch {
            subject: LengthSubject::Guess,
            expected,
            found: guess.len(),
        });
    }
    Ok(())
}

/// Owns the candidate set for one session and narrows it round by round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintFilter {
    candidates: Vec<String>,
}

impl ConstraintFilter {
    /// Every word must share one length; an empty list is accepted.
    pub fn new(words: Vec<String>) -> Result<Self, FilterError> {
        if let Some(first) = words.first() {
            let expected = first.chars().count();
            if let Some(word) = words.iter().find(|w| w.chars().count() != expected) {
                return Err(FilterError::MixedWordLengths {
                    word: word.clone(),
                    expected,
                    found: word.chars().count(),
                });
            }
        }
        Ok(Self { candidates: words })
    }

    /// Length of every candidate, or `None` once the set is empty.
    pub fn word_length(&self) -> Option<usize> {
        self.candidates.first().map(|w| w.chars().count())
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn into_candidates(self) -> Vec<String> {
        self.candidates
    }

    /// Narrow the set to the words consistent with `feedback` for `guess`.
    ///
    /// Input is validated first; on error the set is left untouched.
    pub fn apply(&mut self, guess: &str, feedback: &[Feedback]) -> Result<&[String], FilterError> {
        let guess: Vec<char> = guess.chars().collect();
        check_lengths(&guess, feedback, self.word_length())?;

        let requirements = LetterRequirements::derive(&guess, feedback);
        let before = self.candidates.len();

        self.candidates.retain(|word| requirements.admits(word));
        debug_log!(
            "count pass: {} -> {} candidates ({} letters constrained)",
            before,
            self.candidates.len(),
            requirements.len()
        );

        let after_counts = self.candidates.len();
        self.candidates
            .retain(|word| admits_positions(word, &guess, feedback));
        debug_log!(
            "position pass: {} -> {} candidates",
            after_counts,
            self.candidates.len()
        );

        Ok(&self.candidates)
    }

    /// Like [`apply`](Self::apply), taking the feedback as a `1`/`2`/`3` code.
    pub fn apply_str(&mut self, guess: &str, feedback: &str) -> Result<&[String], FilterError> {
        let feedback = parse_feedback(feedback)?;
        self.apply(guess, &feedback)
    }
}

/// Owned-in, owned-out form of [`ConstraintFilter::apply`].
pub fn filter_candidates(
    candidates: &[String],
    guess: &str,
    feedback: &[Feedback],
) -> Result<Vec<String>, FilterError> {
    let mut filter = ConstraintFilter::new(candidates.to_vec())?;
    filter.apply(guess, feedback)?;
    Ok(filter.into_candidates())
}

/// Grade `guess` against a known `solution` the way the game does: exact
/// matches first, then present marks limited by the letters left over.
pub fn get_feedback(guess: &str, solution: &str) -> Result<Vec<Feedback>, FilterError> {
    let guess: Vec<char> = guess.chars().collect();
    let solution: Vec<char> = solution.chars().collect();
    if guess.len() != solution.len() {
        return Err(FilterError::LengthMismatch {
            subject: LengthSubject::Guess,
            expected: solution.len(),
            found: guess.len(),
        });
    }

    let mut feedback = vec![Feedback::Absent; guess.len()];
    let mut remaining: HashMap<char, usize> = HashMap::new();
    for (i, (&g, &s)) in guess.iter().zip(&solution).enumerate() {
        if g == s {
            feedback[i] = Feedback::Exact;
        } else {
            *remaining.entry(s).or_insert(0) += 1;
        }
    }
    for (i, g) in guess.iter().enumerate() {
        if feedback[i] == Feedback::Exact {
            continue;
        }
        if let Some(left) = remaining.get_mut(g)
            && *left > 0
        {
            feedback[i] = Feedback::Present;
            *left -= 1;
        }
    }
    Ok(feedback)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn chars(word: &str) -> Vec<char> {
        word.chars().collect()
    }

    #[test]
    fn test_feedback_from_char() {
        assert_eq!(Feedback::from_char('1'), Some(Feedback::Exact));
        assert_eq!(Feedback::from_char('2'), Some(Feedback::Present));
        assert_eq!(Feedback::from_char('3'), Some(Feedback::Absent));
        assert_eq!(Feedback::from_char('0'), None);
        assert_eq!(Feedback::from_char('G'), None);
    }

    #[test]
    fn test_parse_feedback_reports_first_bad_symbol() {
        let err = parse_feedback("1245").unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidFeedbackSymbol {
                symbol: '4',
                position: 2
            }
        );
    }

    #[test]
    fn test_format_feedback() {
        let feedback = parse_feedback("33213").unwrap();
        assert_eq!(format_feedback(&feedback), "33213");
    }

    #[test]
    fn test_requirements_repeated_letter_mixed_marks() {
        // "sassy": first 's' exact, second 's' absent, third 's' absent
        let feedback = parse_feedback("13333").unwrap();
        let reqs = LetterRequirements::derive(&chars("sassy"), &feedback);
        let s = reqs.get('s').unwrap();
        assert_eq!(s.required, 1);
        assert!(s.exact);
        assert_eq!(reqs.len(), 3);

        let mut table: Vec<(char, usize, bool)> = reqs
            .iter()
            .map(|(letter, req)| (letter, req.required, req.exact))
            .collect();
        table.sort();
        assert_eq!(table, vec![('a', 0, true), ('s', 1, true), ('y', 0, true)]);
    }

    #[test]
    fn test_requirements_exact_versus_lower_bound() {
        let feedback = parse_feedback("21333").unwrap();
        let reqs = LetterRequirements::derive(&chars("eerie"), &feedback);
        let e = reqs.get('e').unwrap();
        assert_eq!(e.required, 2);
        assert!(e.exact);

        let feedback = parse_feedback("21333").unwrap();
        let reqs = LetterRequirements::derive(&chars("speed"), &feedback);
        let s = reqs.get('s').unwrap();
        assert_eq!(s.required, 1);
        assert!(!s.exact);
    }

    #[test]
    fn test_requirement_admits() {
        let lower = LetterRequirement {
            required: 1,
            exact: false,
        };
        assert!(!lower.admits(0));
        assert!(lower.admits(1));
        assert!(lower.admits(3));

        let exact = LetterRequirement {
            required: 1,
            exact: true,
        };
        assert!(!exact.admits(0));
        assert!(exact.admits(1));
        assert!(!exact.admits(2));

        let none = LetterRequirement {
            required: 0,
            exact: true,
        };
        assert!(none.admits(0));
        assert!(!none.admits(1));
    }

    #[test]
    fn test_plate_scenario_eliminates_everything() {
        let mut filter =
            ConstraintFilter::new(words(&["crane", "slate", "plate", "grate"])).unwrap();
        let result = filter.apply_str("plate", "11231").unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_all_exact_converges_to_guess() {
        let mut filter =
            ConstraintFilter::new(words(&["crane", "slate", "plate", "grate"])).unwrap();
        let result = filter.apply_str("slate", "11111").unwrap();
        assert_eq!(result, ["slate".to_string()]);
    }

    #[test]
    fn test_exact_count_excludes_extra_copies() {
        // One 's' confirmed, another marked absent: words with two 's' go.
        let mut filter =
            ConstraintFilter::new(words(&["sassy", "salsa", "satyr", "stays", "salon"])).unwrap();
        let result = filter.apply_str("sassy", "11333").unwrap();
        assert_eq!(result, ["salon".to_string()]);
    }

    #[test]
    fn test_position_pass_applies_after_counts() {
        // "hoist" holds exactly one 's', so only the position pass drops it.
        let feedback = parse_feedback("13333").unwrap();
        let reqs = LetterRequirements::derive(&chars("sassy"), &feedback);
        assert!(reqs.admits("hoist"));
        assert!(reqs.admits("stoic"));

        let mut filter = ConstraintFilter::new(words(&["hoist", "stoic"])).unwrap();
        let after = filter.apply("sassy", &feedback).unwrap();
        assert_eq!(after, ["stoic".to_string()]);
    }

    #[test]
    fn test_present_mark_excludes_same_position() {
        let mut filter = ConstraintFilter::new(words(&["broil", "shirt", "worst"])).unwrap();
        // 'r' present at index 1: words with 'r' at index 1 are dropped.
        let result = filter.apply_str("crane", "32333").unwrap();
        assert_eq!(result, words(&["shirt", "worst"]));
    }

    #[test]
    fn test_order_is_preserved() {
        let mut filter =
            ConstraintFilter::new(words(&["tiger", "fiber", "piker", "wider"])).unwrap();
        let result = filter.apply_str("hiker", "31311").unwrap();
        assert_eq!(result, words(&["tiger", "fiber", "wider"]));
    }

    #[test]
    fn test_invalid_symbol_leaves_set_unchanged() {
        let initial = words(&["crane", "slate", "plate"]);
        let mut filter = ConstraintFilter::new(initial.clone()).unwrap();
        let err = filter.apply_str("crane", "1245").unwrap_err();
        assert!(matches!(err, FilterError::InvalidFeedbackSymbol { symbol: '4', .. }));
        assert_eq!(filter.candidates(), initial.as_slice());
    }

    #[test]
    fn test_feedback_length_mismatch_rejected() {
        let initial = words(&["crane", "slate"]);
        let mut filter = ConstraintFilter::new(initial.clone()).unwrap();
        let err = filter.apply_str("crane", "1111").unwrap_err();
        assert_eq!(
            err,
            FilterError::LengthMismatch {
                subject: LengthSubject::Feedback,
                expected: 5,
                found: 4
            }
        );
        assert_eq!(filter.candidates(), initial.as_slice());
    }

    #[test]
    fn test_guess_length_mismatch_rejected() {
        let mut filter = ConstraintFilter::new(words(&["crane", "slate"])).unwrap();
        let err = filter.apply_str("cranes", "111111").unwrap_err();
        assert_eq!(
            err,
            FilterError::LengthMismatch {
                subject: LengthSubject::Guess,
                expected: 5,
                found: 6
            }
        );
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn test_empty_guess_against_words_rejected() {
        let mut filter = ConstraintFilter::new(words(&["crane"])).unwrap();
        assert!(filter.apply_str("", "").is_err());
        assert_eq!(filter.len(), 1);
    }

    #[test]
    fn test_empty_set_accepts_any_length() {
        let mut filter = ConstraintFilter::new(Vec::new()).unwrap();
        assert_eq!(filter.word_length(), None);
        assert!(filter.apply_str("abc", "123").unwrap().is_empty());
        assert!(filter.apply_str("", "").unwrap().is_empty());
    }

    #[test]
    fn test_mixed_lengths_rejected_at_construction() {
        let err = ConstraintFilter::new(words(&["crane", "cranes"])).unwrap_err();
        assert_eq!(
            err,
            FilterError::MixedWordLengths {
                word: "cranes".to_string(),
                expected: 5,
                found: 6
            }
        );
    }

    #[test]
    fn test_filter_candidates_is_pure() {
        let initial = words(&["crane", "slate", "plate"]);
        let feedback = parse_feedback("33111").unwrap();
        let result = filter_candidates(&initial, "crate", &feedback).unwrap();
        assert_eq!(result, words(&["slate", "plate"]));
        assert_eq!(initial.len(), 3);
    }

    #[test]
    fn test_get_feedback_duplicate_letters() {
        let feedback = get_feedback("speed", "creep").unwrap();
        assert_eq!(format_feedback(&feedback), "32113");

        let feedback = get_feedback("geese", "creep").unwrap();
        assert_eq!(format_feedback(&feedback), "32133");
    }

    #[test]
    fn test_get_feedback_length_mismatch() {
        assert!(get_feedback("crane", "cranes").is_err());
    }

    #[test]
    fn test_solution_survives_its_own_feedback() {
        let list = words(&["speed", "creep", "sleep", "steep", "sweep", "geese"]);
        for solution in &list {
            for guess in &list {
                let feedback = get_feedback(guess, solution).unwrap();
                let survivors = filter_candidates(&list, guess, &feedback).unwrap();
                assert!(
                    survivors.contains(solution),
                    "{solution} dropped after guessing {guess} ({})",
                    format_feedback(&feedback)
                );
            }
        }
    }
}
