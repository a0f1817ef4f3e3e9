//! Translation of filter trees into parameterized SQL.
//!
//! Each subtree compiles to a [`Fragment`]: a condition tree plus the tables
//! it needs joined. Parents combine the fragments of their children, so no
//! state is shared between sibling branches. Strings are produced once, at
//! the end, which also fixes the order of the positional arguments.
//!
//! Joined tables follow one convention: `<join>.<root>_id = <root>.id`.

use std::str::FromStr;

use thiserror::Error;

use crate::{
    ast::{CompareOp, Expr, ExprStatement, LogicalOp, ParenOp},
    mapper::{Column, ColumnMapper, strip_schema},
    value::Value,
};

/// Errors raised while compiling a filter tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("unsupported SQL dialect '{0}'")]
    UnsupportedDialect(String),

    #[error("root table name is empty")]
    MissingRootTable,

    #[error("unknown attribute '{0}'")]
    UnknownAttribute(String),

    #[error("{context} must be an attribute, found {found}")]
    ExpectedIdentifier {
        context: &'static str,
        found: &'static str,
    },

    #[error("operator '{op}' cannot be applied to {found}")]
    InvalidOperand { op: &'static str, found: String },

    #[error("{found} cannot be used as a condition")]
    NotACondition { found: &'static str },
}

/// SQL flavours the compiler can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SqlDialect {
    /// PostgreSQL, regular expressions via `~`
    #[default]
    Postgres,
    /// SQLite with a `REGEXP` function registered
    Sqlite,
}

impl SqlDialect {
    pub fn name(&self) -> &'static str {
        match self {
            SqlDialect::Postgres => "postgres",
            SqlDialect::Sqlite => "sqlite",
        }
    }

    fn regex_operator(&self) -> &'static str {
        match self {
            SqlDialect::Postgres => "~",
            SqlDialect::Sqlite => "REGEXP",
        }
    }

    fn quote(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }

    fn column(&self, column: &Column) -> String {
        match &column.table {
            Some(table) => format!("{}.{}", self.quote(table), self.quote(&column.name)),
            None => self.quote(&column.name),
        }
    }
}

impl FromStr for SqlDialect {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "postgres" | "postgresql" | "pg" => Ok(SqlDialect::Postgres),
            "sqlite" | "sqlite3" => Ok(SqlDialect::Sqlite),
            _ => Err(CompileError::UnsupportedDialect(s.to_string())),
        }
    }
}

/// A compiled query: SQL text with `?` placeholders and their arguments in
/// placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    pub sql: String,
    pub args: Vec<Value>,
}

/// Boolean condition over physical columns, before rendering.
#[derive(Debug, Clone, PartialEq)]
enum Condition {
    IsNull(Column),
    IsNotNull(Column),
    Compare {
        column: Column,
        op: CompareOp,
        arg: Value,
    },
    Match {
        column: Column,
        pattern: String,
    },
    Logical {
        lhs: Box<Condition>,
        op: LogicalOp,
        rhs: Box<Condition>,
    },
    Not(Box<Condition>),
}

impl Condition {
    /// Qualifies every column without a table with `table`.
    fn qualify(&mut self, table: &str) {
        match self {
            Condition::IsNull(column)
            | Condition::IsNotNull(column)
            | Condition::Compare { column, .. }
            | Condition::Match { column, .. } => column.qualify(table),
            Condition::Logical { lhs, rhs, .. } => {
                lhs.qualify(table);
                rhs.qualify(table);
            }
            Condition::Not(sub) => sub.qualify(table),
        }
    }

    fn render(&self, dialect: SqlDialect, sql: &mut String, args: &mut Vec<Value>) {
        match self {
            Condition::IsNull(column) => {
                sql.push_str(&dialect.column(column));
                sql.push_str(" IS NULL");
            }
            Condition::IsNotNull(column) => {
                sql.push_str(&dialect.column(column));
                sql.push_str(" IS NOT NULL");
            }
            Condition::Compare { column, op, arg } => {
                sql.push_str(&format!("{} {} ?", dialect.column(column), op.sql()));
                args.push(arg.clone());
            }
            Condition::Match { column, pattern } => {
                sql.push_str(&format!(
                    "{} {} ?",
                    dialect.column(column),
                    dialect.regex_operator()
                ));
                args.push(Value::Text(pattern.clone()));
            }
            Condition::Logical { lhs, op, rhs } => {
                sql.push('(');
                lhs.render(dialect, sql, args);
                sql.push_str(") ");
                sql.push_str(op.sql());
                sql.push_str(" (");
                rhs.render(dialect, sql, args);
                sql.push(')');
            }
            Condition::Not(sub) => {
                sql.push_str("NOT (");
                sub.render(dialect, sql, args);
                sql.push(')');
            }
        }
    }
}

/// Compiled subtree: its condition and the tables it needs joined, in order
/// of first use.
#[derive(Debug, Clone, PartialEq)]
struct Fragment {
    condition: Condition,
    joins: Vec<String>,
}

impl Fragment {
    fn leaf(condition: Condition, joins: Vec<String>) -> Self {
        Fragment { condition, joins }
    }

    fn combine(lhs: Fragment, op: LogicalOp, rhs: Fragment) -> Self {
        let mut joins = lhs.joins;
        add_joins(&mut joins, rhs.joins);
        Fragment {
            condition: Condition::Logical {
                lhs: Box::new(lhs.condition),
                op,
                rhs: Box::new(rhs.condition),
            },
            joins,
        }
    }
}

fn add_joins(joins: &mut Vec<String>, more: Vec<String>) {
    for table in more {
        if !joins.contains(&table) {
            joins.push(table);
        }
    }
}

/// Compiles filter trees against one root table.
pub struct SqlCompiler<'m> {
    root_table: String,
    mapper: &'m dyn ColumnMapper,
    dialect: SqlDialect,
}

impl<'m> SqlCompiler<'m> {
    pub fn new(
        root_table: &str,
        mapper: &'m dyn ColumnMapper,
        dialect: SqlDialect,
    ) -> Result<Self, CompileError> {
        if root_table.is_empty() {
            return Err(CompileError::MissingRootTable);
        }
        Ok(SqlCompiler {
            root_table: root_table.to_string(),
            mapper,
            dialect,
        })
    }

    pub fn compile(&self, expr: &Expr) -> Result<SqlQuery, CompileError> {
        let fragment = self.fragment(expr)?;
        let dialect = self.dialect;
        let root = dialect.quote(&self.root_table);

        let mut sql = format!("SELECT * FROM {}", root);
        for table in &fragment.joins {
            let join = dialect.quote(table);
            sql.push_str(&format!(
                " INNER JOIN {join} ON {join}.{fk} = {root}.{pk}",
                fk = dialect.quote(&format!("{}_id", self.root_table)),
                pk = dialect.quote("id"),
            ));
        }

        let mut args = Vec::new();
        sql.push_str(" WHERE (");
        fragment.condition.render(dialect, &mut sql, &mut args);
        sql.push(')');

        tracing::debug!(
            root_table = %self.root_table,
            dialect = dialect.name(),
            joins = fragment.joins.len(),
            args = args.len(),
            "compiled filter"
        );
        Ok(SqlQuery { sql, args })
    }

    fn fragment(&self, expr: &Expr) -> Result<Fragment, CompileError> {
        match expr {
            Expr::Presence { attr } => {
                let (column, joins) = self.column(attr, "presence test")?;
                Ok(Fragment::leaf(Condition::IsNotNull(column), joins))
            }
            Expr::Compare { lhs, op, rhs } => {
                let (column, joins) = self.column(lhs, "left side of a comparison")?;
                let condition = compare_condition(column, *op, rhs)?;
                Ok(Fragment::leaf(condition, joins))
            }
            Expr::Regex { lhs, op, value } => {
                let (column, joins) = self.column(lhs, "left side of a match")?;
                let condition = Condition::Match {
                    column,
                    pattern: op.pattern(value),
                };
                Ok(Fragment::leaf(condition, joins))
            }
            Expr::Logical { lhs, op, rhs } => {
                let lhs = self.fragment(lhs)?;
                let rhs = self.fragment(rhs)?;
                Ok(Fragment::combine(lhs, *op, rhs))
            }
            Expr::Paren { op, sub } => {
                let mut fragment = self.fragment(sub)?;
                if *op == ParenOp::Not {
                    fragment.condition = Condition::Not(Box::new(fragment.condition));
                }
                Ok(fragment)
            }
            // The sub-attribute of a patch path names the patch target and
            // plays no part in row selection.
            Expr::ValuePath {
                parent, sub_expr, ..
            } => {
                let table = match parent.as_ref() {
                    Expr::Identifier(name) => strip_schema(name),
                    other => {
                        return Err(CompileError::ExpectedIdentifier {
                            context: "value path",
                            found: other.kind(),
                        });
                    }
                };
                let inner = self.fragment(sub_expr)?;
                let mut condition = inner.condition;
                condition.qualify(table);

                let mut joins = vec![table.to_string()];
                add_joins(&mut joins, inner.joins);
                Ok(Fragment::leaf(condition, joins))
            }
            Expr::Identifier(_) | Expr::AttrValue(_) | Expr::Number(_) | Expr::Bool(_) => {
                Err(CompileError::NotACondition { found: expr.kind() })
            }
        }
    }

    /// Resolves an attribute through the mapper. A column placed in a table
    /// other than the root table brings that table in as a join.
    fn column(
        &self,
        expr: &Expr,
        context: &'static str,
    ) -> Result<(Column, Vec<String>), CompileError> {
        let name = match expr {
            Expr::Identifier(name) => name,
            other => {
                return Err(CompileError::ExpectedIdentifier {
                    context,
                    found: other.kind(),
                });
            }
        };
        let column = self
            .mapper
            .map_column(name)
            .ok_or_else(|| CompileError::UnknownAttribute(name.clone()))?;

        let joins = match &column.table {
            Some(table) if *table != self.root_table => vec![table.clone()],
            _ => Vec::new(),
        };
        Ok((column, joins))
    }
}

fn compare_condition(column: Column, op: CompareOp, rhs: &Expr) -> Result<Condition, CompileError> {
    let arg = match rhs {
        Expr::AttrValue(s) => Value::Text(s.clone()),
        Expr::Number(n) => Value::Integer(*n),
        Expr::Bool(b) => Value::Boolean(*b),
        Expr::Identifier(name) if name.eq_ignore_ascii_case("null") => {
            return match op {
                CompareOp::Eq => Ok(Condition::IsNull(column)),
                CompareOp::Ne => Ok(Condition::IsNotNull(column)),
                _ => Err(CompileError::InvalidOperand {
                    op: op.as_str(),
                    found: "null".to_string(),
                }),
            };
        }
        other => {
            return Err(CompileError::InvalidOperand {
                op: op.as_str(),
                found: other.kind().to_string(),
            });
        }
    };
    Ok(Condition::Compare { column, op, arg })
}

/// Compiles `ast` into a `SELECT` over `root_table`.
///
/// # Examples
///
/// ```
/// use scim_filter::{compile, mapper::DefaultColumnMapper, parser::parse, Value};
///
/// let stmt = parse(r#"userName eq "bjensen""#, &[]).unwrap();
/// let query = compile(&stmt.expr, "users", &DefaultColumnMapper, "postgres").unwrap();
/// assert_eq!(query.sql, r#"SELECT * FROM "users" WHERE ("userName" = ?)"#);
/// assert_eq!(query.args, vec![Value::from("bjensen")]);
/// ```
pub fn compile(
    ast: &Expr,
    root_table: &str,
    mapper: &dyn ColumnMapper,
    dialect: &str,
) -> Result<SqlQuery, CompileError> {
    let dialect = dialect.parse::<SqlDialect>()?;
    SqlCompiler::new(root_table, mapper, dialect)?.compile(ast)
}

/// [`compile`] for a whole statement.
pub fn compile_statement(
    stmt: &ExprStatement,
    root_table: &str,
    mapper: &dyn ColumnMapper,
    dialect: &str,
) -> Result<SqlQuery, CompileError> {
    compile(&stmt.expr, root_table, mapper, dialect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialect_names() {
        assert_eq!("".parse::<SqlDialect>().unwrap(), SqlDialect::Postgres);
        assert_eq!("PostgreSQL".parse::<SqlDialect>().unwrap(), SqlDialect::Postgres);
        assert_eq!("sqlite".parse::<SqlDialect>().unwrap(), SqlDialect::Sqlite);
        assert_eq!(
            "mssql".parse::<SqlDialect>(),
            Err(CompileError::UnsupportedDialect("mssql".to_string()))
        );
    }

    #[test]
    fn qualify_reaches_every_leaf() {
        let mut condition = Condition::Logical {
            lhs: Box::new(Condition::IsNotNull(Column::new("type"))),
            op: LogicalOp::Or,
            rhs: Box::new(Condition::Not(Box::new(Condition::Match {
                column: Column::qualified("other", "value"),
                pattern: "x".to_string(),
            }))),
        };
        condition.qualify("emails");

        let mut sql = String::new();
        let mut args = Vec::new();
        condition.render(SqlDialect::Postgres, &mut sql, &mut args);
        assert_eq!(
            sql,
            r#"("emails"."type" IS NOT NULL) OR (NOT ("other"."value" ~ ?))"#
        );
        assert_eq!(args, vec![Value::from("x")]);
    }

    #[test]
    fn quote_doubles_embedded_quotes() {
        assert_eq!(SqlDialect::Postgres.quote(r#"we"ird"#), r#""we""ird""#);
    }
}
