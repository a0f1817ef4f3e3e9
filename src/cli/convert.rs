//! Compiled query -> JSON conversion

use crate::SqlQuery;

/// Convert a compiled query to `{"sql": ..., "args": [...]}`
pub fn query_to_json(query: SqlQuery) -> serde_json::Value {
    let args = query
        .args
        .into_iter()
        .map(serde_json::Value::from)
        .collect();

    let mut object = serde_json::Map::new();
    object.insert("sql".to_string(), serde_json::Value::String(query.sql));
    object.insert("args".to_string(), serde_json::Value::Array(args));
    serde_json::Value::Object(object)
}
