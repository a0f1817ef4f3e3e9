//! Compile filters to SQL

use super::{CliError, check::non_empty, query_to_json};
use crate::{
    compile,
    mapper::{Column, ColumnMap},
    parser::{parse, with_patch_expression},
};

/// Options for the sql command
#[derive(Debug, Clone)]
pub struct SqlOptions {
    /// The filter to compile
    pub filter: String,
    /// Table the filter selects from
    pub table: String,
    /// SQL dialect name
    pub dialect: String,
    /// `attribute=column` overrides
    pub mappings: Vec<String>,
    /// Reject attributes without a mapping
    pub strict: bool,
    /// Parse as a PATCH path
    pub patch: bool,
}

impl Default for SqlOptions {
    fn default() -> Self {
        SqlOptions {
            filter: String::new(),
            table: "users".to_string(),
            dialect: "postgres".to_string(),
            mappings: Vec::new(),
            strict: false,
            patch: false,
        }
    }
}

/// Split `attribute=column` into its parts
pub fn parse_mapping(mapping: &str) -> Result<(String, Column), CliError> {
    match mapping.split_once('=') {
        Some((attribute, column)) if !attribute.trim().is_empty() && !column.trim().is_empty() => {
            Ok((attribute.trim().to_string(), Column::parse(column.trim())))
        }
        _ => Err(CliError::InvalidMapping(mapping.to_string())),
    }
}

/// Parse and compile the filter, returning `{"sql": ..., "args": [...]}`
pub fn execute_sql(options: &SqlOptions) -> Result<serde_json::Value, CliError> {
    let filter = non_empty(&options.filter)?;

    let mut mapper = if options.strict {
        ColumnMap::strict()
    } else {
        ColumnMap::new()
    };
    for mapping in &options.mappings {
        let (attribute, column) = parse_mapping(mapping)?;
        mapper.insert(attribute, column);
    }

    let stmt = parse(filter, &[with_patch_expression(options.patch)])?;
    let query = compile(&stmt.expr, &options.table, &mapper, &options.dialect)?;
    Ok(query_to_json(query))
}
