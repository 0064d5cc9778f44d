use super::{tokenize, LexError, TokenKind};

#[test]
fn tokenizes_chained_comparison() {
    let tokens = tokenize("CVA.ecsa >= 0.5 && !(mode != 'pulsed')").expect("tokenize");
    let kinds = tokens.into_iter().map(|token| token.kind).collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Dot,
            TokenKind::Identifier,
            TokenKind::Ge,
            TokenKind::Number,
            TokenKind::AndAnd,
            TokenKind::Bang,
            TokenKind::LParen,
            TokenKind::Identifier,
            TokenKind::NotEq,
            TokenKind::String,
            TokenKind::RParen,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn number_lexemes_keep_fraction_and_exponent() {
    let tokens = tokenize("1.25 3e-2 7.").expect("tokenize");
    let lexemes = tokens.iter().map(|token| token.lexeme.as_str()).collect::<Vec<_>>();
    assert_eq!(lexemes, vec!["1.25", "3e-2", "7", ".", ""]);
}

#[test]
fn rejects_assignment_and_bitwise_forms() {
    assert_eq!(
        tokenize("a = 1"),
        Err(LexError::UnexpectedCharacter { ch: '=', pos: 2 })
    );
    assert_eq!(
        tokenize("a | b"),
        Err(LexError::UnexpectedCharacter { ch: '|', pos: 2 })
    );
}

#[test]
fn rejects_call_syntax_characters() {
    assert!(matches!(
        tokenize("alert`x`"),
        Err(LexError::UnexpectedCharacter { ch: '`', .. })
    ));
    assert!(matches!(
        tokenize("a; b"),
        Err(LexError::UnexpectedCharacter { ch: ';', .. })
    ));
}

#[test]
fn reports_unterminated_string() {
    assert_eq!(
        tokenize("mode == 'pulsed"),
        Err(LexError::UnterminatedString { pos: 8 })
    );
}
