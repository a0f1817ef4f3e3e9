use std::fmt;

use crate::ast::Expr;

/// Top-level result of a parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprStatement {
    pub expr: Expr,
}

impl ExprStatement {
    pub fn new(expr: Expr) -> Self {
        ExprStatement { expr }
    }

    pub fn into_expr(self) -> Expr {
        self.expr
    }
}

impl fmt::Display for ExprStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.expr.fmt(f)
    }
}
