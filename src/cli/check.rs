//! Validate filters and inspect their tokens

use super::CliError;
use crate::{
    ExprStatement,
    ast::Spanned,
    lexer::tokenize,
    parser::{ParseOptions, parse, with_patch_expression},
};

/// Options for the check and tokens commands
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The filter to parse
    pub filter: String,
    /// Parse as a PATCH path
    pub patch: bool,
}

/// Parse the filter, returning its syntax tree
pub fn execute_check(options: &CheckOptions) -> Result<ExprStatement, CliError> {
    let filter = non_empty(&options.filter)?;
    Ok(parse(filter, &[with_patch_expression(options.patch)])?)
}

/// Scan the filter, returning every token up to end of input
pub fn execute_tokens(options: &CheckOptions) -> Result<Vec<Spanned>, CliError> {
    let filter = non_empty(&options.filter)?;
    let parse_options = ParseOptions {
        patch_expression: options.patch,
    };
    let tokens = tokenize(filter, parse_options.dialect()).map_err(crate::ParseError::from)?;
    Ok(tokens)
}

/// One `line:column<TAB>token` row per token
pub fn render_tokens(tokens: &[Spanned]) -> String {
    tokens
        .iter()
        .map(|t| format!("{}\t{:?}\n", t.position, t.token))
        .collect()
}

/// Blank input is refused; anything else is passed through untouched so
/// error positions match what the user typed.
pub(super) fn non_empty(filter: &str) -> Result<&str, CliError> {
    if filter.trim().is_empty() {
        return Err(CliError::NoInput);
    }
    Ok(filter)
}
