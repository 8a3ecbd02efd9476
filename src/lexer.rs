use crate::error::{ImpError, Span};
use std::fmt;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    // Single-character tokens
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Plus,
    Star,
    Less,
    Bang,
    Semicolon,
    Equal,

    // Two-character tokens
    EqualEqual,
    ColonEqual,
    PipePipe,
    AmpAmp,

    // Literals
    Digit(u8),
    Identifier,

    // Keywords
    True,
    False,
    If,
    Else,
    While,
    Print,

    // Special
    Eof,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenType::LeftParen => write!(f, "'('"),
            TokenType::RightParen => write!(f, "')'"),
            TokenType::LeftBrace => write!(f, "'{{'"),
            TokenType::RightBrace => write!(f, "'}}'"),
            TokenType::Plus => write!(f, "'+'"),
            TokenType::Star => write!(f, "'*'"),
            TokenType::Less => write!(f, "'<'"),
            TokenType::Bang => write!(f, "'!'"),
            TokenType::Semicolon => write!(f, "';'"),
            TokenType::Equal => write!(f, "'='"),
            TokenType::EqualEqual => write!(f, "'=='"),
            TokenType::ColonEqual => write!(f, "':='"),
            TokenType::PipePipe => write!(f, "'||'"),
            TokenType::AmpAmp => write!(f, "'&&'"),
            TokenType::Digit(d) => write!(f, "digit {}", d),
            TokenType::Identifier => write!(f, "identifier"),
            TokenType::True => write!(f, "'true'"),
            TokenType::False => write!(f, "'false'"),
            TokenType::If => write!(f, "'if'"),
            TokenType::Else => write!(f, "'else'"),
            TokenType::While => write!(f, "'while'"),
            TokenType::Print => write!(f, "'print'"),
            TokenType::Eof => write!(f, "end of input"),
        }
    }
}

fn keyword(text: &str) -> Option<TokenType> {
    match text {
        "if" => Some(TokenType::If),
        "else" => Some(TokenType::Else),
        "while" => Some(TokenType::While),
        "print" => Some(TokenType::Print),
        "true" => Some(TokenType::True),
        "false" => Some(TokenType::False),
        _ => None,
    }
}

/// Result of scanning a single token off the front of an input slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scanned<'a> {
    pub token_type: TokenType,
    /// Text of the token itself. Empty for `Eof`.
    pub lexeme: &'a str,
    /// Input left after the token.
    pub rest: &'a str,
    /// Name captured for identifiers.
    pub ident: Option<&'a str>,
}

/// A character that starts no valid token and may not be skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadChar<'a> {
    pub character: char,
    /// Input left after the offending character.
    pub rest: &'a str,
}

/// Scan the next token off the front of `input`.
///
/// Letter runs are matched longest-first and then compared against the
/// keyword set. `==`, `:=`, `||` and `&&` win over their one-character
/// prefixes; a `:`, `|` or `&` that does not start one of them is an error.
/// Any other character that starts no token, whitespace included, is skipped.
pub fn scan(input: &str) -> Result<Scanned<'_>, BadChar<'_>> {
    let mut rest = input;

    loop {
        let mut chars = rest.chars();
        let Some(c) = chars.next() else {
            return Ok(Scanned {
                token_type: TokenType::Eof,
                lexeme: "",
                rest,
                ident: None,
            });
        };
        let after = chars.as_str();
        let current = rest;

        let token = move |token_type: TokenType, len: usize| Scanned {
            token_type,
            lexeme: &current[..len],
            rest: &current[len..],
            ident: None,
        };

        let scanned = match c {
            '0'..='9' => token(TokenType::Digit(c as u8 - b'0'), 1),
            '(' => token(TokenType::LeftParen, 1),
            ')' => token(TokenType::RightParen, 1),
            '{' => token(TokenType::LeftBrace, 1),
            '}' => token(TokenType::RightBrace, 1),
            '+' => token(TokenType::Plus, 1),
            '*' => token(TokenType::Star, 1),
            '<' => token(TokenType::Less, 1),
            '!' => token(TokenType::Bang, 1),
            ';' => token(TokenType::Semicolon, 1),
            '=' if after.starts_with('=') => token(TokenType::EqualEqual, 2),
            '=' => token(TokenType::Equal, 1),
            ':' | '|' | '&' => {
                let (second, token_type) = match c {
                    ':' => ('=', TokenType::ColonEqual),
                    '|' => ('|', TokenType::PipePipe),
                    _ => ('&', TokenType::AmpAmp),
                };
                if !after.starts_with(second) {
                    return Err(BadChar {
                        character: c,
                        rest: after,
                    });
                }
                token(token_type, 2)
            }
            c if c.is_alphabetic() => {
                let len = current
                    .find(|ch: char| !ch.is_alphabetic())
                    .unwrap_or(current.len());
                let text = &current[..len];
                match keyword(text) {
                    Some(token_type) => token(token_type, len),
                    None => Scanned {
                        ident: Some(text),
                        ..token(TokenType::Identifier, len)
                    },
                }
            }
            _ => {
                rest = after;
                continue;
            }
        };

        return Ok(scanned);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: String, span: Span) -> Self {
        Self {
            token_type,
            lexeme,
            span,
        }
    }
}

/// On-demand token stream over a source string.
pub struct Lexer<'a> {
    source: &'a str,
    rest: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            rest: source,
        }
    }

    /// Byte offset of the first character not yet scanned.
    pub fn offset(&self) -> usize {
        self.source.len() - self.rest.len()
    }

    pub fn next_token(&mut self) -> Result<Token, ImpError> {
        match scan(self.rest) {
            Ok(scanned) => {
                self.rest = scanned.rest;
                let end = self.offset();
                let start = end - scanned.lexeme.len();
                let lexeme = scanned.ident.unwrap_or(scanned.lexeme).to_string();
                trace!(token = %scanned.token_type, start, end, "scanned token");
                Ok(Token::new(scanned.token_type, lexeme, Span::new(start, end)))
            }
            Err(bad) => {
                self.rest = bad.rest;
                let end = self.offset();
                let span = Span::new(end - bad.character.len_utf8(), end);
                let help = match bad.character {
                    ':' => "Declarations are written 'name := expression'.",
                    '|' => "Disjunction is written '||'.",
                    _ => "Conjunction is written '&&'.",
                };
                Err(ImpError::lex_error_with_help(
                    span,
                    format!("Unexpected character: '{}'", bad.character),
                    help.to_string(),
                ))
            }
        }
    }

    /// Scan the remaining input into a token list terminated by `Eof`.
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>, ImpError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let at_end = token.token_type == TokenType::Eof;
            tokens.push(token);
            if at_end {
                return Ok(tokens);
            }
        }
    }
}
