//! Attribute to column mapping.
//!
//! The compiler never guesses physical names itself: every attribute it meets
//! is passed through a [`ColumnMapper`] supplied by the caller.

use std::collections::HashMap;
use std::fmt;

/// A physical column, optionally qualified with its table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    pub table: Option<String>,
    pub name: String,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Column {
            table: None,
            name: name.into(),
        }
    }

    pub fn qualified(table: impl Into<String>, name: impl Into<String>) -> Self {
        Column {
            table: Some(table.into()),
            name: name.into(),
        }
    }

    /// Splits `table.column` at the first dot; anything without a dot is an
    /// unqualified column.
    pub fn parse(s: &str) -> Self {
        match s.split_once('.') {
            Some((table, name)) if !table.is_empty() && !name.is_empty() => {
                Column::qualified(table, name)
            }
            _ => Column::new(s),
        }
    }

    /// Qualifies the column with `table` unless it already names one.
    pub fn qualify(&mut self, table: &str) {
        if self.table.is_none() {
            self.table = Some(table.to_string());
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.table {
            Some(table) => write!(f, "{}.{}", table, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Maps a logical attribute name to a physical column.
///
/// Returning `None` rejects the attribute; the compiler reports it as unknown.
pub trait ColumnMapper {
    fn map_column(&self, attribute: &str) -> Option<Column>;
}

impl<F> ColumnMapper for F
where
    F: Fn(&str) -> Option<Column>,
{
    fn map_column(&self, attribute: &str) -> Option<Column> {
        self(attribute)
    }
}

/// Strips a schema URN prefix and splits a dotted path into `table.column`.
///
/// ```
/// use scim_filter::mapper::{Column, ColumnMapper, DefaultColumnMapper};
///
/// let mapper = DefaultColumnMapper;
/// assert_eq!(mapper.map_column("userName"), Some(Column::new("userName")));
/// assert_eq!(
///     mapper.map_column("name.familyName"),
///     Some(Column::qualified("name", "familyName"))
/// );
/// assert_eq!(
///     mapper.map_column("urn:ietf:params:scim:schemas:core:2.0:User:userName"),
///     Some(Column::new("userName"))
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultColumnMapper;

impl ColumnMapper for DefaultColumnMapper {
    fn map_column(&self, attribute: &str) -> Option<Column> {
        let path = strip_schema(attribute);
        if path.is_empty() {
            return None;
        }
        Some(Column::parse(path))
    }
}

/// `urn:...:User:name.familyName` → `name.familyName`
pub(crate) fn strip_schema(attribute: &str) -> &str {
    let is_urn = attribute
        .get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("urn:"));
    if !is_urn {
        return attribute;
    }
    match attribute.rfind(':') {
        Some(idx) => &attribute[idx + 1..],
        None => attribute,
    }
}

/// Explicit attribute → column table, falling back to [`DefaultColumnMapper`]
/// for attributes it does not list unless built with [`ColumnMap::strict`].
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    columns: HashMap<String, Column>,
    strict: bool,
}

impl ColumnMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only listed attributes are accepted.
    pub fn strict() -> Self {
        ColumnMap {
            columns: HashMap::new(),
            strict: true,
        }
    }

    pub fn insert(&mut self, attribute: impl Into<String>, column: Column) -> &mut Self {
        self.columns.insert(attribute.into(), column);
        self
    }

    pub fn with(mut self, attribute: impl Into<String>, column: &str) -> Self {
        self.insert(attribute, Column::parse(column));
        self
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl ColumnMapper for ColumnMap {
    fn map_column(&self, attribute: &str) -> Option<Column> {
        match self.columns.get(attribute) {
            Some(column) => Some(column.clone()),
            None if self.strict => None,
            None => DefaultColumnMapper.map_column(attribute),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_first_dot() {
        assert_eq!(Column::parse("emails.value"), Column::qualified("emails", "value"));
        assert_eq!(Column::parse("title"), Column::new("title"));
        assert_eq!(Column::parse(".x"), Column::new(".x"));
    }

    #[test]
    fn qualify_keeps_existing_table() {
        let mut column = Column::qualified("name", "givenName");
        column.qualify("emails");
        assert_eq!(column.table.as_deref(), Some("name"));

        let mut column = Column::new("type");
        column.qualify("emails");
        assert_eq!(column, Column::qualified("emails", "type"));
    }

    #[test]
    fn column_map_falls_back_unless_strict() {
        let map = ColumnMap::new().with("userName", "user_name");
        assert_eq!(map.map_column("userName"), Some(Column::new("user_name")));
        assert_eq!(map.map_column("title"), Some(Column::new("title")));

        let strict = ColumnMap::strict().with("userName", "users.user_name");
        assert_eq!(
            strict.map_column("userName"),
            Some(Column::qualified("users", "user_name"))
        );
        assert_eq!(strict.map_column("title"), None);
    }

    #[test]
    fn closures_are_mappers() {
        let upper = |attr: &str| Some(Column::new(attr.to_uppercase()));
        assert_eq!(upper.map_column("title"), Some(Column::new("TITLE")));
    }
}
