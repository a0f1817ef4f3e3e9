use std::mem;

use thiserror::Error;

use crate::{
    ast::{CompareOp, Expr, ExprStatement, LogicalOp, ParenOp, Position, RegexOp, Spanned, Token},
    dialect::{Dialect, FilterDialect, PatchDialect},
    lexer::{LexError, Lexer},
};

/// Errors raised while parsing a filter. No partial tree is ever returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("scan error: {0}")]
    Lex(#[from] LexError),

    #[error("syntax error at {position}: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        position: Position,
    },

    #[error("syntax error at {position}: expected {expected}, found end of input")]
    UnexpectedEof { expected: String, position: Position },

    #[error("syntax error at {position}: nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize, position: Position },
}

impl ParseError {
    pub fn position(&self) -> Position {
        match self {
            ParseError::Lex(e) => e.position(),
            ParseError::UnexpectedToken { position, .. }
            | ParseError::UnexpectedEof { position, .. }
            | ParseError::NestingTooDeep { position, .. } => *position,
        }
    }
}

/// Deepest accepted stack of groups and value paths.
pub const MAX_NESTING: usize = 64;

/// A single parser setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOption {
    /// Accept `attr[filter].subAttr`, as used in PATCH operation paths.
    PatchExpression(bool),
}

pub fn with_patch_expression(enabled: bool) -> ParseOption {
    ParseOption::PatchExpression(enabled)
}

/// Resolved parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub patch_expression: bool,
}

impl ParseOptions {
    pub fn from_options(options: &[ParseOption]) -> Self {
        let mut resolved = ParseOptions::default();
        for option in options {
            match option {
                ParseOption::PatchExpression(enabled) => resolved.patch_expression = *enabled,
            }
        }
        resolved
    }

    /// Token dialect matching this configuration.
    pub fn dialect(&self) -> &'static dyn Dialect {
        if self.patch_expression {
            &PatchDialect
        } else {
            &FilterDialect
        }
    }
}

/// Parses `input` into a statement.
///
/// # Examples
///
/// ```
/// use scim_filter::ast::{CompareOp, Expr};
/// use scim_filter::parser::parse;
///
/// let stmt = parse(r#"ham eq "spam""#, &[]).unwrap();
/// assert_eq!(
///     stmt.expr,
///     Expr::compare(Expr::ident("ham"), CompareOp::Eq, Expr::value("spam"))
/// );
/// ```
pub fn parse(input: &str, options: &[ParseOption]) -> Result<ExprStatement, ParseError> {
    let options = ParseOptions::from_options(options);
    let lexer = Lexer::with_dialect(input, options.dialect());
    let stmt = Parser::new(lexer)?
        .patch_expression(options.patch_expression)
        .parse()?;

    tracing::debug!(
        filter = input,
        patch_expression = options.patch_expression,
        "parsed filter"
    );
    Ok(stmt)
}

pub struct Parser<'d> {
    lexer: Lexer<'d>,
    current: Spanned,
    patch_expression: bool,
    depth: usize,
}

impl<'d> Parser<'d> {
    pub fn new(mut lexer: Lexer<'d>) -> Result<Self, ParseError> {
        let current = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current,
            patch_expression: false,
            depth: 0,
        })
    }

    /// Enables the trailing `.subAttr` after a value path.
    pub fn patch_expression(mut self, enabled: bool) -> Self {
        self.patch_expression = enabled;
        self
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current.token) == mem::discriminant(token)
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match &self.current.token {
            Token::Eof => ParseError::UnexpectedEof {
                expected: expected.to_string(),
                position: self.current.position,
            },
            token => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: token.describe(),
                position: self.current.position,
            },
        }
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        if !self.check(&expected) {
            return Err(self.unexpected(&expected.describe()));
        }
        self.advance()
    }

    fn expect_identifier(&mut self, expected: &str) -> Result<String, ParseError> {
        let Token::Identifier(name) = &mut self.current.token else {
            return Err(self.unexpected(expected));
        };
        let name = mem::take(name);
        self.advance()?;
        Ok(name)
    }

    /// Steps into a group or value path opened at `position`.
    fn enter(&mut self, position: Position) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING,
                position,
            });
        }
        Ok(())
    }

    /// Parse a complete filter and require end of input.
    pub fn parse(&mut self) -> Result<ExprStatement, ParseError> {
        let expr = self.parse_logical()?;
        if !self.check(&Token::Eof) {
            return Err(self.unexpected("'and', 'or' or end of input"));
        }
        Ok(ExprStatement::new(expr))
    }

    /// `and` and `or` share a level and fold to the left.
    fn parse_logical(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;

        loop {
            let op = match &self.current.token {
                Token::And => LogicalOp::And,
                Token::Or => LogicalOp::Or,
                _ => break,
            };

            self.advance()?;
            let right = self.parse_term()?;
            left = Expr::logical(left, op, right);
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        match &self.current.token {
            Token::Not => {
                self.advance()?;
                let sub = self.parse_group()?;
                Ok(Expr::paren(ParenOp::Not, sub))
            }
            Token::LParen => {
                let sub = self.parse_group()?;
                Ok(Expr::paren(ParenOp::Group, sub))
            }
            Token::Identifier(_) => self.parse_attribute_expression(),
            _ => Err(self.unexpected("attribute, '(' or 'not'")),
        }
    }

    fn parse_group(&mut self) -> Result<Expr, ParseError> {
        let position = self.current.position;
        self.expect(Token::LParen)?;
        self.enter(position)?;
        let sub = self.parse_logical()?;
        self.depth -= 1;
        self.expect(Token::RParen)?;
        Ok(sub)
    }

    /// Everything that starts with an attribute path: presence, comparison,
    /// match and value path.
    fn parse_attribute_expression(&mut self) -> Result<Expr, ParseError> {
        let attr = Expr::Identifier(self.expect_identifier("attribute")?);

        let compare = match &self.current.token {
            Token::Eq => Some(CompareOp::Eq),
            Token::Ne => Some(CompareOp::Ne),
            Token::Gt => Some(CompareOp::Gt),
            Token::Ge => Some(CompareOp::Ge),
            Token::Lt => Some(CompareOp::Lt),
            Token::Le => Some(CompareOp::Le),
            _ => None,
        };
        if let Some(op) = compare {
            self.advance()?;
            let rhs = self.parse_comparison_value()?;
            return Ok(Expr::compare(attr, op, rhs));
        }

        let matching = match &self.current.token {
            Token::Co => Some(RegexOp::Co),
            Token::Sw => Some(RegexOp::Sw),
            Token::Ew => Some(RegexOp::Ew),
            _ => None,
        };
        if let Some(op) = matching {
            self.advance()?;
            let Token::String(value) = &mut self.current.token else {
                return Err(self.unexpected("quoted string"));
            };
            let value = mem::take(value);
            self.advance()?;
            return Ok(Expr::regex(attr, op, value));
        }

        match &self.current.token {
            Token::Pr => {
                self.advance()?;
                Ok(Expr::presence(attr))
            }
            Token::LBracket => self.parse_value_path(attr),
            _ => Err(self.unexpected("operator or '['")),
        }
    }

    fn parse_value_path(&mut self, parent: Expr) -> Result<Expr, ParseError> {
        let position = self.current.position;
        self.expect(Token::LBracket)?;
        self.enter(position)?;
        let sub_expr = self.parse_logical()?;
        self.depth -= 1;
        self.expect(Token::RBracket)?;

        let sub_attr = if self.patch_expression && self.check(&Token::Dot) {
            self.advance()?;
            Some(Expr::Identifier(self.expect_identifier("sub-attribute")?))
        } else {
            None
        };

        Ok(Expr::value_path(parent, sub_attr, sub_expr))
    }

    /// Right-hand side of a comparison. `null` is carried as an identifier.
    fn parse_comparison_value(&mut self) -> Result<Expr, ParseError> {
        let expr = match &mut self.current.token {
            Token::String(s) => Expr::AttrValue(mem::take(s)),
            Token::Integer(n) => Expr::Number(*n),
            Token::Boolean(b) => Expr::Bool(*b),
            Token::Null => Expr::Identifier("null".to_string()),
            _ => return Err(self.unexpected("string, number, boolean or null")),
        };
        self.advance()?;
        Ok(expr)
    }
}
