use crate::domain::clues::{guess_matches, validate_guess, validate_hint};
use crate::errors::domain::{DomainError, ValidationKind};

fn is_invalid_hint(res: Result<String, DomainError>) -> bool {
    matches!(res, Err(DomainError::Validation(ValidationKind::InvalidHint, _)))
}

#[test]
fn hint_is_trimmed_and_lowercased() {
    assert_eq!(validate_hint(Some("  Crunchy "), "apple").unwrap(), "crunchy");
}

#[test]
fn hint_equal_to_word_is_rejected_in_any_case() {
    assert!(is_invalid_hint(validate_hint(Some("apple"), "apple")));
    assert!(is_invalid_hint(validate_hint(Some("APPLE"), "Apple")));
}

#[test]
fn hint_containing_or_contained_in_word_is_rejected() {
    // hint contains the word
    assert!(is_invalid_hint(validate_hint(Some("pineapple"), "apple")));
    // word contains the hint
    assert!(is_invalid_hint(validate_hint(Some("App"), "apple")));
    assert!(is_invalid_hint(validate_hint(Some("tree"), "Treehouse")));
}

#[test]
fn hint_must_be_one_token() {
    assert!(is_invalid_hint(validate_hint(Some("red fruit"), "apple")));
    assert!(is_invalid_hint(validate_hint(Some("red\tfruit"), "apple")));
    assert!(is_invalid_hint(validate_hint(Some("   "), "apple")));
    assert!(is_invalid_hint(validate_hint(Some(""), "apple")));
    assert!(is_invalid_hint(validate_hint(None, "apple")));
}

#[test]
fn guess_shape_and_comparison() {
    assert_eq!(validate_guess(Some(" Apple ")).unwrap(), "Apple");
    assert!(matches!(
        validate_guess(Some("green apple")),
        Err(DomainError::Validation(ValidationKind::InvalidGuess, _))
    ));
    assert!(validate_guess(None).is_err());

    assert!(guess_matches("APPLE", "apple"));
    assert!(!guess_matches("pear", "apple"));
}
