//! # SCIM Filter - Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) for SCIM filter
//! expressions as described in RFC 7644 §3.4.2.2.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens and source positions produced by the lexer
//! - **[expressions]** - Expression nodes, one per grammar production
//! - **[operators]** - Comparison, match, logical and group operators
//! - **[statements]** - The top-level statement wrapper returned by the parser
//!
//! ## Quick Start
//!
//! ```text
//! userName eq "bjensen" and emails[type eq "work" and value co "@example.com"]
//! ```
//!
//! ## Grammar
//!
//! Lowest to highest binding:
//!
//! - `and` / `or` - one level, left-associative (`a or b and c` groups as
//!   `(a or b) and c`)
//! - `not (...)` - negates a parenthesized group only
//! - `attr op value`, `attr co|sw|ew "text"`, `attr pr`
//! - `(...)`, `attr[filter]`, literals
//!
//! Patch paths additionally accept a sub-attribute after a value path:
//!
//! ```text
//! members[value eq "2819c223"].displayName
//! ```
pub mod expressions;
pub mod operators;
pub mod statements;
pub mod tokens;

pub use expressions::Expr;
pub use operators::{CompareOp, LogicalOp, ParenOp, RegexOp};
pub use statements::ExprStatement;
pub use tokens::{Position, Spanned, Token};
