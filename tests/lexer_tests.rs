use imp::error::{ErrorKind, Span};
use imp::lexer::{scan, BadChar, Lexer, TokenType};

#[test]
fn scan_returns_token_and_remainder() {
    let scanned = scan("  if x").expect("should scan");
    assert_eq!(scanned.token_type, TokenType::If);
    assert_eq!(scanned.lexeme, "if");
    assert_eq!(scanned.rest, " x");
    assert_eq!(scanned.ident, None);
}

#[test]
fn scan_captures_identifier_text() {
    let scanned = scan("counter:=1").expect("should scan");
    assert_eq!(scanned.token_type, TokenType::Identifier);
    assert_eq!(scanned.ident, Some("counter"));
    assert_eq!(scanned.rest, ":=1");
}

#[test]
fn letter_runs_are_matched_longest_first() {
    assert_eq!(scan("ifx").expect("should scan").ident, Some("ifx"));
    assert_eq!(scan("whileTrue").expect("should scan").ident, Some("whileTrue"));
    assert_eq!(scan("else{").expect("should scan").token_type, TokenType::Else);
}

#[test]
fn keywords() {
    let cases = [
        ("if", TokenType::If),
        ("else", TokenType::Else),
        ("while", TokenType::While),
        ("print", TokenType::Print),
        ("true", TokenType::True),
        ("false", TokenType::False),
    ];
    for (input, expected) in cases {
        assert_eq!(scan(input).expect("should scan").token_type, expected, "{}", input);
    }
}

#[test]
fn two_character_operators_win_over_prefixes() {
    assert_eq!(scan("==3").expect("should scan").token_type, TokenType::EqualEqual);
    assert_eq!(scan("=3").expect("should scan").token_type, TokenType::Equal);
    assert_eq!(scan(":=3").expect("should scan").token_type, TokenType::ColonEqual);
    assert_eq!(scan("||x").expect("should scan").token_type, TokenType::PipePipe);
    assert_eq!(scan("&&x").expect("should scan").token_type, TokenType::AmpAmp);
    assert_eq!(scan("===").expect("should scan").rest, "=");
}

#[test]
fn digits_are_single_character_tokens() {
    let scanned = scan("42").expect("should scan");
    assert_eq!(scanned.token_type, TokenType::Digit(4));
    assert_eq!(scanned.rest, "2");
}

#[test]
fn unknown_characters_are_skipped() {
    let scanned = scan("#$ -/\t7").expect("should scan");
    assert_eq!(scanned.token_type, TokenType::Digit(7));
    assert_eq!(scanned.lexeme, "7");
    assert_eq!(scanned.rest, "");
}

#[test]
fn end_of_input() {
    let scanned = scan("   ").expect("should scan");
    assert_eq!(scanned.token_type, TokenType::Eof);
    assert_eq!(scanned.rest, "");
}

#[test]
fn dead_prefixes_are_errors() {
    assert_eq!(
        scan(" :3"),
        Err(BadChar {
            character: ':',
            rest: "3"
        })
    );
    assert_eq!(scan("|x").map(|s| s.token_type), Err(BadChar { character: '|', rest: "x" }));
    assert_eq!(scan("&").map(|s| s.token_type), Err(BadChar { character: '&', rest: "" }));
}

#[test]
fn lexer_tracks_spans() {
    let tokens = Lexer::new("{ x := 3 }").scan_tokens().expect("should lex");
    let summary: Vec<_> = tokens.iter().map(|t| (t.token_type, t.span)).collect();
    assert_eq!(
        summary,
        vec![
            (TokenType::LeftBrace, Span::new(0, 1)),
            (TokenType::Identifier, Span::new(2, 3)),
            (TokenType::ColonEqual, Span::new(4, 6)),
            (TokenType::Digit(3), Span::new(7, 8)),
            (TokenType::RightBrace, Span::new(9, 10)),
            (TokenType::Eof, Span::new(10, 10)),
        ]
    );
    assert_eq!(tokens[1].lexeme, "x");
}

#[test]
fn lexer_reports_bad_character_position() {
    let error = Lexer::new("{x:3}").scan_tokens().expect_err("should not lex");
    assert_eq!(error.kind, ErrorKind::LexError);
    assert_eq!(error.span, Span::new(2, 3));
    assert_eq!(error.offset(), 3);
}
