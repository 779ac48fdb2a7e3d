use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A scalar value flowing through a calculator: raw inputs arrive as these,
/// and summary/metadata entries are emitted as these.
///
/// `Decimal` is an output-only variant used for dollar-denominated figures;
/// request JSON never deserializes into it (numbers become `Integer` or
/// `Float`, and strings stay `String`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CalcValue {
    /// Whole number value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Boolean(bool),
    /// String value
    String(String),
    /// Array of values
    Array(Vec<CalcValue>),
    /// Ordered map of string keys to values
    Object(BTreeMap<String, CalcValue>),
    /// Null value
    Null,
    /// Exact decimal value (currency). Serializes as a string.
    Decimal(Decimal),
}

impl CalcValue {
    /// Numeric view of this value, if it is `Integer`, `Float` or `Decimal`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CalcValue::Integer(i) => Some(*i as f64),
            CalcValue::Float(f) => Some(*f),
            CalcValue::Decimal(d) => d.to_f64(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CalcValue::Integer(i) => Some(*i),
            CalcValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CalcValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CalcValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            CalcValue::Decimal(d) => Some(*d),
            CalcValue::Integer(i) => Some(Decimal::from(*i)),
            CalcValue::Float(f) => Decimal::from_f64_retain(*f),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CalcValue::Null)
    }

    /// Type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CalcValue::String(_) => "string",
            CalcValue::Integer(_) => "integer",
            CalcValue::Float(_) => "float",
            CalcValue::Boolean(_) => "boolean",
            CalcValue::Array(_) => "array",
            CalcValue::Object(_) => "object",
            CalcValue::Decimal(_) => "decimal",
            CalcValue::Null => "null",
        }
    }
}

impl fmt::Display for CalcValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcValue::String(s) => write!(f, "{s}"),
            CalcValue::Integer(i) => write!(f, "{i}"),
            CalcValue::Float(fl) => write!(f, "{fl}"),
            CalcValue::Boolean(b) => write!(f, "{b}"),
            CalcValue::Decimal(d) => write!(f, "{d}"),
            CalcValue::Null => write!(f, "null"),
            CalcValue::Array(arr) => {
                let items: Vec<String> = arr.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
            CalcValue::Object(obj) => {
                let pairs: Vec<String> =
                    obj.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
        }
    }
}

impl From<&str> for CalcValue {
    fn from(value: &str) -> Self {
        CalcValue::String(value.to_string())
    }
}

impl From<String> for CalcValue {
    fn from(value: String) -> Self {
        CalcValue::String(value)
    }
}

impl From<i64> for CalcValue {
    fn from(value: i64) -> Self {
        CalcValue::Integer(value)
    }
}

impl From<u32> for CalcValue {
    fn from(value: u32) -> Self {
        CalcValue::Integer(i64::from(value))
    }
}

impl From<f64> for CalcValue {
    fn from(value: f64) -> Self {
        CalcValue::Float(value)
    }
}

impl From<bool> for CalcValue {
    fn from(value: bool) -> Self {
        CalcValue::Boolean(value)
    }
}

impl From<Decimal> for CalcValue {
    fn from(value: Decimal) -> Self {
        CalcValue::Decimal(value)
    }
}

// -------------------------------------------------------------------------
// Conversions between `CalcValue` and `serde_json::Value`. The API layer
// converts raw request bodies into calculator inputs through these rather
// than hand-mapping field by field.
// -------------------------------------------------------------------------

impl From<&serde_json::Value> for CalcValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => CalcValue::String(s.clone()),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CalcValue::Integer(i)
                } else {
                    CalcValue::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::Bool(b) => CalcValue::Boolean(*b),
            serde_json::Value::Array(arr) => {
                CalcValue::Array(arr.iter().map(CalcValue::from).collect())
            }
            serde_json::Value::Object(map) => {
                let inner = map.iter().map(|(k, v)| (k.clone(), CalcValue::from(v))).collect();
                CalcValue::Object(inner)
            }
            serde_json::Value::Null => CalcValue::Null,
        }
    }
}

impl From<&CalcValue> for serde_json::Value {
    fn from(value: &CalcValue) -> Self {
        match value {
            CalcValue::String(s) => serde_json::Value::String(s.clone()),
            CalcValue::Integer(i) => serde_json::Value::Number(serde_json::Number::from(*i)),
            CalcValue::Float(f) => serde_json::Number::from_f64(*f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            CalcValue::Boolean(b) => serde_json::Value::Bool(*b),
            CalcValue::Decimal(d) => serde_json::Value::String(d.to_string()),
            CalcValue::Array(arr) => {
                serde_json::Value::Array(arr.iter().map(serde_json::Value::from).collect())
            }
            CalcValue::Object(map) => {
                let json_map = map
                    .iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect::<serde_json::Map<String, serde_json::Value>>();
                serde_json::Value::Object(json_map)
            }
            CalcValue::Null => serde_json::Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_numbers_map_to_integer_or_float() {
        let v: serde_json::Value = serde_json::json!({"a": 3, "b": 2.5});
        let cv = CalcValue::from(&v);
        let CalcValue::Object(obj) = cv else {
            panic!("expected object")
        };
        assert_eq!(obj["a"], CalcValue::Integer(3));
        assert_eq!(obj["b"], CalcValue::Float(2.5));
    }

    #[test]
    fn decimal_serializes_as_exact_string() {
        let v = CalcValue::Decimal(Decimal::new(662_500, 5));
        assert_eq!(serde_json::Value::from(&v), serde_json::json!("6.62500"));
    }
}
