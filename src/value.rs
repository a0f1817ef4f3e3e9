use std::fmt;

/// A bound argument of a compiled query.
///
/// Arguments are positional: the n-th value binds the n-th `?` placeholder.
///
/// # Examples
///
/// ```
/// use scim_filter::Value;
///
/// let text = Value::from("bjensen");
/// let number = Value::from(42);
/// let flag = Value::from(true);
/// assert_eq!(text, Value::Text("bjensen".to_string()));
/// assert_eq!(number, Value::Integer(42));
/// assert_eq!(flag.to_string(), "true");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Text argument, also used for match patterns
    Text(String),

    /// Integer argument
    Integer(i64),

    /// Boolean argument
    Boolean(bool),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Text(s) => serde_json::Value::String(s),
            Value::Integer(n) => serde_json::Value::Number(n.into()),
            Value::Boolean(b) => serde_json::Value::Bool(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_json() {
        let args = vec![Value::from("x"), Value::from(3), Value::from(false)];
        let json: Vec<serde_json::Value> = args.into_iter().map(Into::into).collect();
        assert_eq!(json, vec![serde_json::json!("x"), serde_json::json!(3), serde_json::json!(false)]);
    }
}
