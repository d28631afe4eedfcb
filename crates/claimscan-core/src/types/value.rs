//! A single table cell.

use std::fmt;

use serde::{Serialize, Serializer};

/// One cell of a [`RecordTable`](super::RecordTable).
///
/// Cells start life as text when read from CSV and become `Number` once
/// their column is coerced. A cell that cannot be coerced becomes
/// `Missing`, never zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Missing,
    Text(String),
    Number(f64),
}

impl Value {
    /// Build a cell from raw CSV text. Empty text is missing.
    pub fn from_cell(raw: &str) -> Self {
        if raw.is_empty() {
            Self::Missing
        } else {
            Self::Text(raw.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric payload, including non-finite numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The numeric payload only when it is finite. This is the view every
    /// statistic is computed from.
    pub fn finite(&self) -> Option<f64> {
        self.as_f64().filter(|n| n.is_finite())
    }

    /// Lenient numeric coercion: numbers pass through, text that parses as
    /// a float becomes a number, everything else is missing.
    pub fn coerce_numeric(&self) -> Self {
        match self {
            Self::Number(n) => Self::Number(*n),
            Self::Text(s) => parse_number(s).map_or(Self::Missing, Self::Number),
            Self::Missing => Self::Missing,
        }
    }

    /// Render for tabular output. Missing renders as an empty cell.
    pub fn to_cell_string(&self) -> String {
        match self {
            Self::Missing => String::new(),
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_number(*n),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_cell_string())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<Option<f64>> for Value {
    fn from(n: Option<f64>) -> Self {
        n.map_or(Self::Missing, Self::Number)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Missing => serializer.serialize_none(),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Number(n) if n.is_finite() => serializer.serialize_f64(*n),
            Self::Number(_) => serializer.serialize_none(),
        }
    }
}

/// Parse a trimmed float. Accepts `inf`/`nan` spellings, which then fail
/// the `finite()` filter downstream rather than being dropped here.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Shortest round-trippable rendering of a float.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "inf" } else { "-inf" }.to_string()
    } else {
        format!("{}", n)
    }
}
