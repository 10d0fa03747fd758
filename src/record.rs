//! Person records
//!
//! A [`Record`] wraps one JSON object from the source payload together with its
//! position in the sequence. Fields are read lazily through typed accessors so
//! that a statistic only fails on the fields it actually dereferences.

use crate::error::StatsError;
use serde_json::{Map, Value};

/// One immutable person record
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    position: usize,
    fields: Map<String, Value>,
}

impl Record {
    /// Create a record from a JSON object at the given sequence position
    pub fn new(position: usize, fields: Map<String, Value>) -> Self {
        Self { position, fields }
    }

    /// Zero-based position of this record in the loaded sequence
    pub fn position(&self) -> usize {
        self.position
    }

    /// All fields in their original order
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn first_name(&self) -> Result<&str, StatsError> {
        self.name_part("first")
    }

    pub fn last_name(&self) -> Result<&str, StatsError> {
        self.name_part("last")
    }

    /// "first last", as shown in reports
    pub fn full_name(&self) -> Result<String, StatsError> {
        Ok(format!("{} {}", self.first_name()?, self.last_name()?))
    }

    pub fn eye_color(&self) -> Result<&str, StatsError> {
        self.str_field("eyeColor")
    }

    pub fn company(&self) -> Result<&str, StatsError> {
        self.str_field("company")
    }

    pub fn age(&self) -> Result<u64, StatsError> {
        self.fields
            .get("age")
            .and_then(Value::as_u64)
            .ok_or_else(|| self.shape_error("age", "a non-negative integer"))
    }

    /// Latitude in degrees, within [-90, 90]
    pub fn latitude(&self) -> Result<f64, StatsError> {
        self.degrees("latitude", 90.0, "a latitude between -90 and 90")
    }

    /// Longitude in degrees, within [-180, 180]
    pub fn longitude(&self) -> Result<f64, StatsError> {
        self.degrees("longitude", 180.0, "a longitude between -180 and 180")
    }

    /// Monetary balance, either a JSON number or text like "$3,686.69"
    pub fn balance(&self) -> Result<f64, StatsError> {
        let amount = match self.fields.get("balance") {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => parse_money(s),
            _ => None,
        };
        amount.ok_or_else(|| self.shape_error("balance", "a monetary amount"))
    }

    fn name_part(&self, part: &'static str) -> Result<&str, StatsError> {
        let field = if part == "first" { "name.first" } else { "name.last" };
        self.fields
            .get("name")
            .and_then(|name| name.get(part))
            .and_then(Value::as_str)
            .ok_or_else(|| self.shape_error(field, "a string"))
    }

    fn str_field(&self, field: &'static str) -> Result<&str, StatsError> {
        self.fields
            .get(field)
            .and_then(Value::as_str)
            .ok_or_else(|| self.shape_error(field, "a string"))
    }

    /// Finite number or numeric string with magnitude at most `limit`
    fn degrees(&self, field: &'static str, limit: f64, expected: &'static str) -> Result<f64, StatsError> {
        let value = match self.fields.get(field) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        value
            .filter(|v| v.is_finite() && v.abs() <= limit)
            .ok_or_else(|| self.shape_error(field, expected))
    }

    fn shape_error(&self, field: &'static str, expected: &'static str) -> StatsError {
        StatsError::RecordShape {
            index: self.position,
            field,
            expected,
        }
    }
}

/// Parse a formatted amount, dropping thousands separators and a leading currency symbol
///
/// Only the leading numeric part counts, so `"12abc"` parses as 12.
pub fn parse_money(text: &str) -> Option<f64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    let (negative, rest) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };
    let rest = rest.trim_start_matches(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'));
    // "$-20" carries its sign after the currency symbol
    let (negative, rest) = match rest.strip_prefix('-') {
        Some(rest) => (!negative, rest),
        None => (negative, rest),
    };
    let value: f64 = numeric_prefix(rest).parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Longest prefix made of digits and at most one decimal point
fn numeric_prefix(text: &str) -> &str {
    let mut seen_point = false;
    let end = text
        .char_indices()
        .find(|&(_, c)| match c {
            '0'..='9' => false,
            '.' if !seen_point => {
                seen_point = true;
                false
            }
            _ => true,
        })
        .map_or(text.len(), |(i, _)| i);
    &text[..end]
}

/// Render a field value the way the console report shows it
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        // Whole floats print without a trailing ".0"
        Value::Number(n) if n.is_f64() => n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string()),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}
