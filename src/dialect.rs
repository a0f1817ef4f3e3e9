//! Token dialects.
//!
//! The lexer recognises word and punctuation families; a [`Dialect`] decides
//! which parser token each one becomes. The same scanning logic serves both
//! the general filter grammar and the patch path grammar, which differ only
//! in whether `.` may follow a value path.

use crate::ast::Token;

/// Maps scanned token families to parser tokens.
pub trait Dialect {
    /// Name used in diagnostics and logs.
    fn name(&self) -> &'static str;

    /// Token for a lower-cased word, or `None` if the word is an identifier.
    fn keyword(&self, word: &str) -> Option<Token> {
        keyword(word)
    }

    /// Token for a single punctuation character, or `None` if the character
    /// is not part of this dialect.
    fn punctuation(&self, ch: char) -> Option<Token>;
}

/// Dialect of `filter=` query parameters and search requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterDialect;

/// Dialect of PATCH operation paths, which may end in `].subAttr`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatchDialect;

impl Dialect for FilterDialect {
    fn name(&self) -> &'static str {
        "filter"
    }

    fn punctuation(&self, ch: char) -> Option<Token> {
        grouping(ch)
    }
}

impl Dialect for PatchDialect {
    fn name(&self) -> &'static str {
        "patch"
    }

    fn punctuation(&self, ch: char) -> Option<Token> {
        match ch {
            '.' => Some(Token::Dot),
            _ => grouping(ch),
        }
    }
}

fn grouping(ch: char) -> Option<Token> {
    match ch {
        '(' => Some(Token::LParen),
        ')' => Some(Token::RParen),
        '[' => Some(Token::LBracket),
        ']' => Some(Token::RBracket),
        _ => None,
    }
}

/// Operator and literal keywords shared by every dialect.
fn keyword(word: &str) -> Option<Token> {
    let token = match word {
        "not" => Token::Not,
        "and" => Token::And,
        "or" => Token::Or,
        "pr" => Token::Pr,
        "eq" => Token::Eq,
        "ne" => Token::Ne,
        "gt" => Token::Gt,
        "ge" => Token::Ge,
        "lt" => Token::Lt,
        "le" => Token::Le,
        "co" => Token::Co,
        "sw" => Token::Sw,
        "ew" => Token::Ew,
        "true" => Token::Boolean(true),
        "false" => Token::Boolean(false),
        "null" => Token::Null,
        _ => return None,
    };
    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_only_in_patch_dialect() {
        assert_eq!(FilterDialect.punctuation('.'), None);
        assert_eq!(PatchDialect.punctuation('.'), Some(Token::Dot));
        assert_eq!(FilterDialect.punctuation(']'), Some(Token::RBracket));
        assert_eq!(PatchDialect.punctuation('('), Some(Token::LParen));
    }

    #[test]
    fn keywords_are_shared() {
        assert_eq!(FilterDialect.keyword("sw"), Some(Token::Sw));
        assert_eq!(PatchDialect.keyword("null"), Some(Token::Null));
        assert_eq!(FilterDialect.keyword("userName"), None);
    }
}
