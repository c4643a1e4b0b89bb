// Property tests for candidate narrowing

use proptest::collection::vec;
use proptest::prelude::*;
use wordle_filter::*;

const LENGTH: usize = 5;

// A small alphabet makes repeated letters and shared letters common.
fn word() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[abcde]{5}").unwrap()
}

fn feedback() -> impl Strategy<Value = Vec<Feedback>> {
    vec(
        prop_oneof![
            Just(Feedback::Exact),
            Just(Feedback::Present),
            Just(Feedback::Absent)
        ],
        LENGTH,
    )
}

proptest! {
    #[test]
    fn narrowing_never_grows(words in vec(word(), 0..40), guess in word(), marks in feedback()) {
        let mut filter = ConstraintFilter::new(words.clone()).unwrap();
        let survivors = filter.apply(&guess, &marks).unwrap().to_vec();
        prop_assert!(survivors.len() <= words.len());
        // Survivors keep their original relative order.
        let mut remaining = words.iter();
        for survivor in &survivors {
            prop_assert!(remaining.any(|w| w == survivor));
        }
    }

    #[test]
    fn narrowing_is_idempotent(words in vec(word(), 0..40), guess in word(), marks in feedback()) {
        let once = filter_candidates(&words, &guess, &marks).unwrap();
        let twice = filter_candidates(&once, &guess, &marks).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn all_exact_converges_to_guess(words in vec(word(), 1..40), pick in any::<prop::sample::Index>()) {
        let guess = words[pick.index(words.len())].clone();
        let marks = vec![Feedback::Exact; LENGTH];
        let survivors = filter_candidates(&words, &guess, &marks).unwrap();
        prop_assert!(!survivors.is_empty());
        prop_assert!(survivors.iter().all(|w| *w == guess));
    }

    #[test]
    fn solution_survives_its_own_feedback(words in vec(word(), 1..40), guess in word(), pick in any::<prop::sample::Index>()) {
        let solution = words[pick.index(words.len())].clone();
        let marks = get_feedback(&guess, &solution).unwrap();
        let survivors = filter_candidates(&words, &guess, &marks).unwrap();
        prop_assert!(survivors.contains(&solution));
    }

    #[test]
    fn invalid_code_leaves_set_unchanged(words in vec(word(), 0..20), guess in word(), code in "[0-9a-z]{5}") {
        prop_assume!(code.chars().any(|c| Feedback::from_char(c).is_none()));
        let mut filter = ConstraintFilter::new(words.clone()).unwrap();
        let is_symbol_error = matches!(
            filter.apply_str(&guess, &code),
            Err(FilterError::InvalidFeedbackSymbol { .. })
        );
        prop_assert!(is_symbol_error);
        prop_assert_eq!(filter.candidates(), words.as_slice());
    }
}
