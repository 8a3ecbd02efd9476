use crate::ast::{BinaryOp, Block, Expr, LogicalOp, Stmt};
use crate::error::{ImpError, Span};
use crate::lexer::{Lexer, Token, TokenType};
use tracing::debug;

/// Parse a complete program: one block followed by end of input.
pub fn parse(source: &str) -> Result<Block, ImpError> {
    Parser::new(source).parse()
}

/// Predictive recursive-descent parser with one token of lookahead. Tokens
/// are pulled from the lexer on demand; the first error aborts the parse.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lexer: Lexer::new(source),
            current: Token::new(TokenType::Eof, String::new(), Span::new(0, 0)),
        }
    }

    pub fn parse(&mut self) -> Result<Block, ImpError> {
        let result = self.program();
        match &result {
            Ok(_) => debug!("parse succeeded"),
            Err(error) => debug!(offset = error.offset(), "parse failed: {}", error.message),
        }
        result
    }

    fn program(&mut self) -> Result<Block, ImpError> {
        self.advance()?;
        let block = self.block()?;

        if !self.check(TokenType::Eof) {
            return Err(ImpError::parse_error_with_help(
                self.current.span,
                format!("Unexpected {} after program", self.current.token_type),
                "A program is a single block '{ ... }' with nothing after it.".to_string(),
            ));
        }

        Ok(block)
    }

    fn block(&mut self) -> Result<Block, ImpError> {
        self.consume_with_help(
            TokenType::LeftBrace,
            "Expected '{' to open a block",
            "Programs and the bodies of 'while' and 'if' are blocks: { statement; statement }"
                .to_string(),
        )?;
        let body = self.statement_sequence()?;
        self.consume_with_help(
            TokenType::RightBrace,
            "Expected '}' after block",
            "Statements are separated by ';' and a block is closed with '}'.".to_string(),
        )?;
        Ok(Block::new(body))
    }

    // Folds left with an accumulator so `a; b; c` nests as `(a; b); c`.
    fn statement_sequence(&mut self) -> Result<Stmt, ImpError> {
        let mut stmt = self.statement()?;

        while self.match_type(TokenType::Semicolon)? {
            let next = self.statement()?;
            stmt = Stmt::Sequence {
                first: Box::new(stmt),
                second: Box::new(next),
            };
        }

        Ok(stmt)
    }

    fn statement(&mut self) -> Result<Stmt, ImpError> {
        match self.current.token_type {
            TokenType::Identifier => {
                let name = self.advance()?.lexeme;
                if self.match_type(TokenType::ColonEqual)? {
                    let value = self.or()?;
                    Ok(Stmt::Declare { name, value })
                } else if self.match_type(TokenType::Equal)? {
                    let value = self.or()?;
                    Ok(Stmt::Assign { name, value })
                } else {
                    Err(ImpError::parse_error_with_help(
                        self.current.span,
                        format!("Expected ':=' or '=' after '{}'", name),
                        "Declare a variable with 'name := value' or update it with 'name = value'."
                            .to_string(),
                    ))
                }
            }
            TokenType::While => {
                self.advance()?;
                let condition = self.or()?;
                let body = self.block()?;
                Ok(Stmt::While { condition, body })
            }
            TokenType::If => {
                self.advance()?;
                let condition = self.or()?;
                let then_branch = self.block()?;
                self.consume_with_help(
                    TokenType::Else,
                    "Expected 'else' after if block",
                    "Every 'if' needs an 'else' branch: if condition { ... } else { ... }"
                        .to_string(),
                )?;
                let else_branch = self.block()?;
                Ok(Stmt::IfElse {
                    condition,
                    then_branch,
                    else_branch,
                })
            }
            TokenType::Print => {
                self.advance()?;
                let expr = self.or()?;
                Ok(Stmt::Print { expr })
            }
            other => Err(ImpError::parse_error_with_help(
                self.current.span,
                format!("Expected a statement, found {}", other),
                "Statements are declarations, assignments, 'while', 'if' or 'print'.".to_string(),
            )),
        }
    }

    fn or(&mut self) -> Result<Expr, ImpError> {
        let mut expr = self.and()?;

        while self.match_type(TokenType::PipePipe)? {
            let right = self.and()?;
            expr = Expr::Logical {
                left: Box::new(expr),
                operator: LogicalOp::Or,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn and(&mut self) -> Result<Expr, ImpError> {
        let mut expr = self.equality()?;

        while self.match_type(TokenType::AmpAmp)? {
            let right = self.equality()?;
            expr = Expr::Logical {
                left: Box::new(expr),
                operator: LogicalOp::And,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expr, ImpError> {
        let mut expr = self.negation()?;

        while self.match_type(TokenType::EqualEqual)? {
            let right = self.negation()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator: BinaryOp::Equal,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    // `!` folds like a binary operator, but only its right operand survives:
    // `a ! b` is `!b`. A prefix `!x` parses because `primary` yields a
    // placeholder for the missing left operand.
    fn negation(&mut self) -> Result<Expr, ImpError> {
        let mut expr = self.comparison()?;

        while self.match_type(TokenType::Bang)? {
            let operand = self.comparison()?;
            expr = Expr::Not {
                operand: Box::new(operand),
            };
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr, ImpError> {
        let mut expr = self.term()?;

        while self.match_type(TokenType::Less)? {
            let right = self.term()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator: BinaryOp::Less,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr, ImpError> {
        let mut expr = self.factor()?;

        while self.match_type(TokenType::Plus)? {
            let right = self.factor()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator: BinaryOp::Add,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr, ImpError> {
        let mut expr = self.primary()?;

        while self.match_type(TokenType::Star)? {
            let right = self.primary()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator: BinaryOp::Multiply,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr, ImpError> {
        match self.current.token_type {
            TokenType::Digit(digit) => {
                self.advance()?;
                Ok(Expr::Int {
                    value: i64::from(digit),
                })
            }
            TokenType::True => {
                self.advance()?;
                Ok(Expr::Bool { value: true })
            }
            TokenType::False => {
                self.advance()?;
                Ok(Expr::Bool { value: false })
            }
            TokenType::Identifier => {
                let name = self.advance()?.lexeme;
                Ok(Expr::Variable { name })
            }
            TokenType::LeftParen => {
                self.advance()?;
                let expr = self.or()?;
                self.consume_with_help(
                    TokenType::RightParen,
                    "Expected ')' after expression",
                    "Every opening parenthesis '(' must have a matching closing parenthesis ')'."
                        .to_string(),
                )?;
                Ok(expr)
            }
            // Left operand of a prefix `!`; discarded by `negation`.
            TokenType::Bang => Ok(Expr::Int { value: 0 }),
            other => {
                let help_msg = match other {
                    TokenType::RightParen => {
                        "Found ')' without matching '('. Check for unbalanced parentheses."
                    }
                    TokenType::RightBrace => "Reached the end of the block while expecting an expression.",
                    TokenType::Eof => "Reached end of input while expecting an expression.",
                    _ => "Expected a digit, 'true', 'false', a variable, or a parenthesized expression here.",
                };

                Err(ImpError::parse_error_with_help(
                    self.current.span,
                    format!("Expected expression, found {}", other),
                    help_msg.to_string(),
                ))
            }
        }
    }

    fn match_type(&mut self, token_type: TokenType) -> Result<bool, ImpError> {
        if self.check(token_type) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn check(&self, token_type: TokenType) -> bool {
        self.current.token_type == token_type
    }

    /// Scan the next lookahead token and hand back the one it replaces.
    fn advance(&mut self) -> Result<Token, ImpError> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn consume_with_help(
        &mut self,
        token_type: TokenType,
        message: &str,
        help: String,
    ) -> Result<Token, ImpError> {
        if self.check(token_type) {
            self.advance()
        } else {
            Err(ImpError::parse_error_with_help(
                self.current.span,
                format!("{}, found {}", message, self.current.token_type),
                help,
            ))
        }
    }
}
