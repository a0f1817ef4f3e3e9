use thiserror::Error;

use crate::ast::{Position, Spanned, Token};
use crate::dialect::{Dialect, FilterDialect};

/// Errors raised while scanning a filter string.
///
/// Scanning stops at the first error; later calls to [`Lexer::next_token`]
/// return the same error again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unexpected character '{ch}' at {position}")]
    UnexpectedCharacter { ch: char, position: Position },

    #[error("unterminated string starting at {position}")]
    UnterminatedString { position: Position },

    #[error("number {literal} at {position} is out of range")]
    NumberOutOfRange { literal: String, position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnexpectedCharacter { position, .. }
            | LexError::UnterminatedString { position }
            | LexError::NumberOutOfRange { position, .. } => *position,
        }
    }
}

pub struct Lexer<'d> {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    dialect: &'d dyn Dialect,
    halted: Option<LexError>,
}

impl Lexer<'static> {
    /// Lexer for the general filter dialect.
    pub fn new(input: &str) -> Self {
        Lexer::with_dialect(input, &FilterDialect)
    }
}

impl<'d> Lexer<'d> {
    pub fn with_dialect(input: &str, dialect: &'d dyn Dialect) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            dialect,
            halted: None,
        }
    }

    pub fn dialect(&self) -> &'d dyn Dialect {
        self.dialect
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += 1;
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn here(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if matches!(ch, ' ' | '\t' | '\n' | '\r') {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn is_identifier_char(ch: char) -> bool {
        ch.is_alphanumeric() || matches!(ch, '-' | '_' | '.' | ':' | '/')
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if Self::is_identifier_char(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Reads a double-quoted value. `\"` and `\\` are unescaped; any other
    /// backslash is kept as written.
    fn read_string(&mut self) -> Result<String, LexError> {
        let start = self.here();
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    self.advance();
                    return Ok(result);
                }
                '\\' if matches!(self.peek_char(1), Some('"') | Some('\\')) => {
                    self.advance();
                    if let Some(escaped) = self.current_char() {
                        result.push(escaped);
                    }
                    self.advance();
                }
                c if c.is_control() && !c.is_whitespace() => {
                    return Err(LexError::UnexpectedCharacter {
                        ch: c,
                        position: self.here(),
                    });
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedString { position: start })
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        let start = self.here();
        let mut number = String::new();

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        number
            .parse::<i64>()
            .map(Token::Integer)
            .map_err(|_| LexError::NumberOutOfRange {
                literal: number,
                position: start,
            })
    }

    fn scan(&mut self) -> Result<Spanned, LexError> {
        self.skip_whitespace();
        let position = self.here();

        let token = match self.current_char() {
            None => Token::Eof,
            Some('"') => Token::String(self.read_string()?),
            Some(ch) if ch.is_ascii_digit() => self.read_number()?,
            Some(ch) if ch.is_alphabetic() || ch == '_' => {
                let word = self.read_identifier();
                self.dialect
                    .keyword(&word.to_lowercase())
                    .unwrap_or(Token::Identifier(word))
            }
            Some(ch) => match self.dialect.punctuation(ch) {
                Some(token) => {
                    self.advance();
                    token
                }
                None => return Err(LexError::UnexpectedCharacter { ch, position }),
            },
        };

        Ok(Spanned { token, position })
    }

    /// Scans the next token. Returns [`Token::Eof`] once the input is
    /// exhausted, and keeps returning it on further calls.
    pub fn next_token(&mut self) -> Result<Spanned, LexError> {
        if let Some(err) = &self.halted {
            return Err(err.clone());
        }

        match self.scan() {
            Ok(spanned) => {
                tracing::trace!(
                    dialect = self.dialect.name(),
                    token = ?spanned.token,
                    position = %spanned.position,
                    "scanned token"
                );
                Ok(spanned)
            }
            Err(err) => {
                self.halted = Some(err.clone());
                Err(err)
            }
        }
    }
}

/// Scans all of `input`, returning every token up to and including
/// [`Token::Eof`].
pub fn tokenize(input: &str, dialect: &dyn Dialect) -> Result<Vec<Spanned>, LexError> {
    let mut lexer = Lexer::with_dialect(input, dialect);
    let mut tokens = Vec::new();
    loop {
        let spanned = lexer.next_token()?;
        let done = spanned.token == Token::Eof;
        tokens.push(spanned);
        if done {
            return Ok(tokens);
        }
    }
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("not and or pr true false null");
    let expected = [
        Token::Not,
        Token::And,
        Token::Or,
        Token::Pr,
        Token::Boolean(true),
        Token::Boolean(false),
        Token::Null,
        Token::Eof,
    ];
    for token in expected {
        assert_eq!(lexer.next_token().unwrap().token, token);
    }
}

#[test]
fn test_value_path() {
    let mut lexer = Lexer::new(r#"emails[type eq "work"]"#);
    assert_eq!(lexer.next_token().unwrap().token, Token::Identifier("emails".to_string()));
    assert_eq!(lexer.next_token().unwrap().token, Token::LBracket);
    assert_eq!(lexer.next_token().unwrap().token, Token::Identifier("type".to_string()));
    assert_eq!(lexer.next_token().unwrap().token, Token::Eq);
    assert_eq!(lexer.next_token().unwrap().token, Token::String("work".to_string()));
    assert_eq!(lexer.next_token().unwrap().token, Token::RBracket);
    assert_eq!(lexer.next_token().unwrap().token, Token::Eof);
}
