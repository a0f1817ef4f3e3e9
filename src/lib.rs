pub mod ast;
pub mod cli;
pub mod compiler;
pub mod dialect;
pub mod lexer;
pub mod mapper;
pub mod parser;
pub mod value;

pub use ast::{Expr, ExprStatement, Position, Token};
pub use compiler::{CompileError, SqlCompiler, SqlDialect, SqlQuery, compile, compile_statement};
pub use dialect::{Dialect, FilterDialect, PatchDialect};
pub use lexer::{LexError, Lexer};
pub use mapper::{Column, ColumnMap, ColumnMapper, DefaultColumnMapper};
pub use parser::{ParseError, ParseOption, ParseOptions, Parser, parse, with_patch_expression};
pub use value::Value;
