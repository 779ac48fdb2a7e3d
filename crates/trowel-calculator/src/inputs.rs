//! Typed access to calculator inputs.
//!
//! Raw inputs arrive as an open mapping of field name to scalar. The
//! getters here fall back to a caller-supplied default, so a calculator
//! reads its effective value in one place. Before `calculate` runs, the
//! explicit inputs are merged over the calculator's declared defaults
//! (explicit wins) so no field is ever read as absent mid-formula.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use trowel_types::CalcValue;

/// An ordered mapping of input field name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalcInputs(BTreeMap<String, CalcValue>);

impl CalcInputs {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Build inputs from a raw JSON body. Non-object bodies produce an
    /// empty input set; the calculator's defaults then carry the
    /// calculation.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match CalcValue::from(value) {
            CalcValue::Object(map) => Self(map),
            _ => Self::new(),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<CalcValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Builder-style setter, mostly for defaults and tests.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<CalcValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&CalcValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Numeric field with fallback. Non-numeric values count as absent.
    pub fn f64_or(&self, name: &str, default: f64) -> f64 {
        self.0.get(name).and_then(CalcValue::as_f64).unwrap_or(default)
    }

    pub fn i64_or(&self, name: &str, default: i64) -> i64 {
        self.0.get(name).and_then(CalcValue::as_i64).unwrap_or(default)
    }

    pub fn bool_or(&self, name: &str, default: bool) -> bool {
        self.0.get(name).and_then(CalcValue::as_bool).unwrap_or(default)
    }

    pub fn str_or(&self, name: &str, default: &str) -> String {
        self.0
            .get(name)
            .and_then(CalcValue::as_str)
            .map_or_else(|| default.to_string(), str::to_string)
    }

    /// Dollar-denominated field with fallback; integers and floats are
    /// widened to exact decimals.
    pub fn decimal_or(&self, name: &str, default: Decimal) -> Decimal {
        self.0.get(name).and_then(CalcValue::as_decimal).unwrap_or(default)
    }

    /// A strictly positive numeric field, or `None` when absent, zero,
    /// negative or non-numeric. Mirrors the "truthy number" reads used for
    /// optional dimension fields.
    pub fn positive(&self, name: &str) -> Option<f64> {
        self.0.get(name).and_then(CalcValue::as_f64).filter(|v| *v > 0.0)
    }

    /// Merge these (explicit) inputs over `defaults`; explicit wins.
    pub fn merged_over(&self, defaults: &CalcInputs) -> CalcInputs {
        let mut map = defaults.0.clone();
        for (k, v) in &self.0 {
            map.insert(k.clone(), v.clone());
        }
        Self(map)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CalcValue)> {
        self.0.iter()
    }

    /// The underlying map, for echoing resolved inputs into a result.
    pub fn to_map(&self) -> BTreeMap<String, CalcValue> {
        self.0.clone()
    }
}

impl FromIterator<(String, CalcValue)> for CalcInputs {
    fn from_iter<T: IntoIterator<Item = (String, CalcValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_wins_over_defaults() {
        let defaults = CalcInputs::new().with("a", 1.0).with("b", 2.0);
        let explicit = CalcInputs::new().with("b", 9.0);
        let merged = explicit.merged_over(&defaults);
        assert_eq!(merged.f64_or("a", 0.0), 1.0);
        assert_eq!(merged.f64_or("b", 0.0), 9.0);
    }

    #[test]
    fn positive_rejects_zero_and_missing() {
        let inputs = CalcInputs::new().with("zero", 0.0).with("ok", 4.5);
        assert_eq!(inputs.positive("zero"), None);
        assert_eq!(inputs.positive("missing"), None);
        assert_eq!(inputs.positive("ok"), Some(4.5));
    }
}
