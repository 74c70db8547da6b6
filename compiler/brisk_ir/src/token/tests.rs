use super::*;

#[test]
fn test_keyword_lookup() {
    assert_eq!(TokenKind::keyword("while"), Some(TokenKind::While));
    assert_eq!(TokenKind::keyword("fn"), Some(TokenKind::Fn));
    assert_eq!(TokenKind::keyword("While"), None);
    assert_eq!(TokenKind::keyword("whilst"), None);
}

#[test]
fn test_describe_quotes_punctuation() {
    assert_eq!(TokenKind::RParen.describe(), "')'");
    assert_eq!(TokenKind::Arrow.to_string(), "'->'");
    assert_eq!(TokenKind::Eof.describe(), "end of input");
}

#[test]
fn test_token_text() {
    let source = "x + 10";
    let token = Token::new(TokenKind::Int(10), Span::new(4, 6));
    assert_eq!(token.text(source), "10");
}

#[test]
fn test_token_list_kinds() {
    let mut list = TokenList::new();
    list.push(Token::new(TokenKind::Int(1), Span::new(0, 1)));
    list.push(Token::new(TokenKind::Eof, Span::point(1)));
    assert_eq!(list.len(), 2);
    assert_eq!(list.kinds(), vec![TokenKind::Int(1), TokenKind::Eof]);
    assert_eq!(list[1].kind, TokenKind::Eof);
}
