//! JSON-safe conversion. Nothing leaving this module can carry a NaN or
//! infinity; those become `null`.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value as Json;

use claimscan_core::Value;

pub fn number(n: f64) -> Json {
    if n.is_finite() {
        serde_json::Number::from_f64(n).map_or(Json::Null, Json::Number)
    } else {
        Json::Null
    }
}

pub fn optional(n: Option<f64>) -> Json {
    n.map_or(Json::Null, number)
}

pub fn cell(value: &Value) -> Json {
    match value {
        Value::Missing => Json::Null,
        Value::Text(s) => Json::String(s.clone()),
        Value::Number(n) => number(*n),
    }
}

/// A JSON object that keeps its keys in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonRow(pub Vec<(String, Json)>);

impl JsonRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: Json) {
        self.0.push((key.into(), value));
    }

    pub fn get(&self, key: &str) -> Option<&Json> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

impl Serialize for JsonRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_becomes_null() {
        assert_eq!(number(f64::INFINITY), Json::Null);
        assert_eq!(number(f64::NEG_INFINITY), Json::Null);
        assert_eq!(number(f64::NAN), Json::Null);
        assert_eq!(cell(&Value::Number(f64::INFINITY)), Json::Null);
        assert_eq!(cell(&Value::Missing), Json::Null);
        assert_eq!(number(2.5), serde_json::json!(2.5));
    }

    #[test]
    fn rows_keep_insertion_order() {
        let mut row = JsonRow::new();
        row.push("zeta", Json::from(1));
        row.push("alpha", Json::from(2));
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"zeta":1,"alpha":2}"#);
    }
}
