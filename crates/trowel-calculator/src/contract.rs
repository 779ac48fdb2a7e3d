//! The contract every calculator implements.

use crate::error::CalcError;
use crate::inputs::CalcInputs;
use serde::Serialize;
use trowel_types::{CalcValue, CalculatorResult};

/// Field type tags for schema declarations, used for validation and for
/// auto-generating input forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Number,
    Integer,
    Boolean,
    Text,
    Choice,
}

/// Declaration of one accepted input field: its type, bounds, enumerated
/// choices and default.
#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
    pub description: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<CalcValue>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub choices: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl FieldSpec {
    fn new(name: &'static str, field_type: FieldType, description: &'static str) -> Self {
        Self {
            name,
            field_type,
            description,
            required: false,
            default: None,
            choices: &[],
            min: None,
            max: None,
        }
    }

    pub fn number(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldType::Number, description)
    }

    pub fn integer(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldType::Integer, description)
    }

    pub fn boolean(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldType::Boolean, description)
    }

    pub fn text(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldType::Text, description)
    }

    pub fn choice(
        name: &'static str,
        description: &'static str,
        choices: &'static [&'static str],
    ) -> Self {
        let mut spec = Self::new(name, FieldType::Choice, description);
        spec.choices = choices;
        spec
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<CalcValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

/// The declared input schema of a calculator. A pure function of the
/// calculator type.
#[derive(Debug, Clone, Serialize)]
pub struct InputSchema {
    pub fields: Vec<FieldSpec>,
}

impl InputSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }
}

/// A trait for all calculators. Calculators are stateless and
/// thread-safe; `calculate` is a pure function of the resolved inputs.
pub trait Calculator: Send + Sync + std::fmt::Debug {
    /// Stable identifier used for registry lookup.
    fn type_id(&self) -> &'static str;

    /// Human-readable name for discovery UIs.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Category id, see [`crate::categories`].
    fn category(&self) -> &'static str;

    /// Declares each accepted field's type, choices, bounds and default.
    fn input_schema(&self) -> InputSchema;

    /// A complete, self-consistent set of defaults that alone produce a
    /// valid result.
    fn default_inputs(&self) -> CalcInputs;

    /// Returns an empty list iff the inputs are computable. Never fails.
    fn validate(&self, inputs: &CalcInputs) -> Vec<String>;

    /// Runs the derivation over fully-resolved inputs. Fails only on
    /// input combinations outside the schema's safe range.
    fn calculate(&self, inputs: &CalcInputs) -> Result<CalculatorResult, CalcError>;

    /// Validate raw inputs, resolve them over the defaults, and
    /// calculate. This is the entry point callers use.
    fn run(&self, raw: &CalcInputs) -> Result<CalculatorResult, CalcError> {
        let errors = self.validate(raw);
        if !errors.is_empty() {
            return Err(CalcError::Validation { errors });
        }
        let resolved = raw.merged_over(&self.default_inputs());
        tracing::debug!(calculator = self.type_id(), "running calculation");
        self.calculate(&resolved)
    }
}
