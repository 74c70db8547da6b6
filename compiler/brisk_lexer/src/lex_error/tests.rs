use super::*;

#[test]
fn test_illegal_character_message() {
    let err = LexError::new(LexErrorKind::IllegalCharacter('@'), Span::new(3, 4));
    assert_eq!(err.to_string(), "Illegal Character: '@'");
}

#[test]
fn test_illegal_control_character_is_escaped() {
    let err = LexError::new(LexErrorKind::IllegalCharacter('\u{7}'), Span::new(0, 1));
    assert_eq!(err.to_string(), "Illegal Character: '\\u{7}'");
}

#[test]
fn test_unterminated_string_message() {
    let err = LexError::new(LexErrorKind::UnterminatedString, Span::new(0, 4));
    assert_eq!(err.title(), "Unterminated String");
    assert!(err.to_string().starts_with("Unterminated String: "));
}
