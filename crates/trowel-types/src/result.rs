use crate::{CalcValue, ProductCategory};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One material or labor entry produced by a calculation. Quantities are
/// whole purchasable units (bags, boxes, sheets) after ceiling rounding;
/// the formula string is the literal arithmetic used to derive the
/// quantity, kept so an estimate can be audited without re-running code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub qty: f64,
    pub unit: String,
    pub category: ProductCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

impl LineItem {
    pub fn new(
        name: impl Into<String>,
        qty: f64,
        unit: impl Into<String>,
        category: ProductCategory,
    ) -> Self {
        Self {
            name: name.into(),
            qty,
            unit: unit.into(),
            category,
            unit_price: None,
            total_price: None,
            notes: None,
            formula: None,
        }
    }

    pub fn priced(mut self, unit_price: Decimal, total_price: Decimal) -> Self {
        self.unit_price = Some(unit_price);
        self.total_price = Some(total_price);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }
}

/// Full output of one calculation. Line items and formulas keep
/// computation order; `inputs` echoes the fully-resolved effective input
/// (explicit values merged over defaults, enum fallbacks substituted).
/// Warnings, when present, start with any legal disclaimers.
///
/// Maps are ordered so that serializing the same result twice is
/// byte-identical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorResult {
    pub calculator_type: String,
    pub inputs: BTreeMap<String, CalcValue>,
    pub line_items: Vec<LineItem>,
    pub summary: BTreeMap<String, CalcValue>,
    pub formulas: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, CalcValue>,
}

impl CalculatorResult {
    pub fn new(calculator_type: impl Into<String>) -> Self {
        Self {
            calculator_type: calculator_type.into(),
            inputs: BTreeMap::new(),
            line_items: Vec::new(),
            summary: BTreeMap::new(),
            formulas: Vec::new(),
            warnings: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Sum of all priced line items.
    pub fn total_cost(&self) -> Decimal {
        self.line_items.iter().filter_map(|item| item.total_price).sum()
    }
}

/// Discovery metadata for one registered calculator, as returned by
/// `Registry::list_all`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorInfo {
    pub type_id: String,
    pub name: String,
    pub description: String,
    pub category: String,
}
