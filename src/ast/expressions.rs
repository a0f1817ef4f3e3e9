use std::fmt;

use crate::ast::{CompareOp, LogicalOp, ParenOp, RegexOp};

/// Abstract Syntax Tree node representing a parsed filter.
///
/// One variant per grammar production. Trees are built bottom-up by the
/// parser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Comparison against a literal
    ///
    /// # Example
    /// ```text
    /// userName eq "bjensen"
    /// ```
    Compare {
        lhs: Box<Expr>,
        op: CompareOp,
        rhs: Box<Expr>,
    },

    /// Substring match; the right-hand side is always a raw string
    ///
    /// # Example
    /// ```text
    /// emails co "@example.com"
    /// ```
    Regex {
        lhs: Box<Expr>,
        op: RegexOp,
        value: String,
    },

    /// Presence test (`pr`)
    Presence { attr: Box<Expr> },

    /// `and` / `or` chain, left-associative
    Logical {
        lhs: Box<Expr>,
        op: LogicalOp,
        rhs: Box<Expr>,
    },

    /// Parenthesized group, optionally negated with `not`
    Paren { op: ParenOp, sub: Box<Expr> },

    /// Filter on the values of a multi-valued attribute
    ///
    /// `sub_attr` is only ever set when parsing patch paths.
    ///
    /// # Examples
    /// ```text
    /// emails[type eq "work"]
    /// members[value eq "2819c223"].displayName
    /// ```
    ValuePath {
        parent: Box<Expr>,
        sub_attr: Option<Box<Expr>>,
        sub_expr: Box<Expr>,
    },

    // Leaves
    /// Attribute path as written
    Identifier(String),

    /// Quoted attribute value
    AttrValue(String),

    /// Integer literal
    Number(i64),

    /// Boolean literal
    Bool(bool),
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier(name.into())
    }

    pub fn value(lit: impl Into<String>) -> Self {
        Expr::AttrValue(lit.into())
    }

    pub fn compare(lhs: Expr, op: CompareOp, rhs: Expr) -> Self {
        Expr::Compare {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
    }

    pub fn regex(lhs: Expr, op: RegexOp, value: impl Into<String>) -> Self {
        Expr::Regex {
            lhs: Box::new(lhs),
            op,
            value: value.into(),
        }
    }

    pub fn presence(attr: Expr) -> Self {
        Expr::Presence {
            attr: Box::new(attr),
        }
    }

    pub fn logical(lhs: Expr, op: LogicalOp, rhs: Expr) -> Self {
        Expr::Logical {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
    }

    pub fn paren(op: ParenOp, sub: Expr) -> Self {
        Expr::Paren {
            op,
            sub: Box::new(sub),
        }
    }

    pub fn value_path(parent: Expr, sub_attr: Option<Expr>, sub_expr: Expr) -> Self {
        Expr::ValuePath {
            parent: Box::new(parent),
            sub_attr: sub_attr.map(Box::new),
            sub_expr: Box::new(sub_expr),
        }
    }

    /// Name of the production, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Compare { .. } => "comparison",
            Expr::Regex { .. } => "match expression",
            Expr::Presence { .. } => "presence test",
            Expr::Logical { .. } => "logical expression",
            Expr::Paren { .. } => "group",
            Expr::ValuePath { .. } => "value path",
            Expr::Identifier(_) => "identifier",
            Expr::AttrValue(_) => "string literal",
            Expr::Number(_) => "number",
            Expr::Bool(_) => "boolean",
        }
    }
}

pub(crate) fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// Canonical filter text. Parsing the output of a parsed tree yields the
/// same tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Compare { lhs, op, rhs } => write!(f, "{} {} {}", lhs, op, rhs),
            Expr::Regex { lhs, op, value } => write!(f, "{} {} {}", lhs, op, quote(value)),
            Expr::Presence { attr } => write!(f, "{} pr", attr),
            Expr::Logical { lhs, op, rhs } => write!(f, "{} {} {}", lhs, op, rhs),
            Expr::Paren {
                op: ParenOp::Group,
                sub,
            } => write!(f, "({})", sub),
            Expr::Paren {
                op: ParenOp::Not,
                sub,
            } => write!(f, "not ({})", sub),
            Expr::ValuePath {
                parent,
                sub_attr,
                sub_expr,
            } => {
                write!(f, "{}[{}]", parent, sub_expr)?;
                if let Some(sub_attr) = sub_attr {
                    write!(f, ".{}", sub_attr)?;
                }
                Ok(())
            }
            Expr::Identifier(name) => f.write_str(name),
            Expr::AttrValue(lit) => f.write_str(&quote(lit)),
            Expr::Number(n) => write!(f, "{}", n),
            Expr::Bool(b) => write!(f, "{}", b),
        }
    }
}
