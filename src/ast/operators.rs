use std::fmt;

/// Comparison operators taking a literal right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Equal (`eq`)
    Eq,
    /// Not equal (`ne`)
    Ne,
    /// Greater than (`gt`)
    Gt,
    /// Greater than or equal (`ge`)
    Ge,
    /// Less than (`lt`)
    Lt,
    /// Less than or equal (`le`)
    Le,
}

impl CompareOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Eq => "eq",
            CompareOp::Ne => "ne",
            CompareOp::Gt => "gt",
            CompareOp::Ge => "ge",
            CompareOp::Lt => "lt",
            CompareOp::Le => "le",
        }
    }

    /// SQL spelling of the operator.
    pub fn sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
        }
    }
}

/// String matching operators, compiled to anchored regular expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegexOp {
    /// Contains (`co`)
    Co,
    /// Starts with (`sw`)
    Sw,
    /// Ends with (`ew`)
    Ew,
}

impl RegexOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegexOp::Co => "co",
            RegexOp::Sw => "sw",
            RegexOp::Ew => "ew",
        }
    }

    /// Builds the pattern for `value`: metacharacters are escaped, then the
    /// result is anchored according to the operator.
    pub fn pattern(&self, value: &str) -> String {
        let quoted = regex::escape(value);
        match self {
            RegexOp::Co => quoted,
            RegexOp::Sw => format!("^{}", quoted),
            RegexOp::Ew => format!("{}$", quoted),
        }
    }
}

/// Logical connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    /// Logical AND (`and`)
    And,
    /// Logical OR (`or`)
    Or,
}

impl LogicalOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOp::And => "and",
            LogicalOp::Or => "or",
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }
}

/// Operator of a parenthesized group: plain grouping or `not`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParenOp {
    /// `(expr)`
    Group,
    /// `not (expr)`
    Not,
}

impl ParenOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParenOp::Group => "",
            ParenOp::Not => "not",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(CompareOp, RegexOp, LogicalOp, ParenOp);
