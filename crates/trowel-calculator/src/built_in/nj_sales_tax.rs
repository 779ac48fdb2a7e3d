//! New Jersey construction sales tax: materials taxable, labor exempt,
//! with Salem County and Urban Enterprise Zone reduced rates.

use crate::contract::{Calculator, FieldSpec, InputSchema};
use crate::error::CalcError;
use crate::inputs::CalcInputs;
use rust_decimal::{Decimal, dec};
use trowel_types::{CalculatorResult, LineItem, ProductCategory};

/// Statewide NJ sales tax rate.
pub const NJ_TAX_RATE: Decimal = dec!(0.06625);

/// Reduced rate for Salem County and Urban Enterprise Zones.
pub const NJ_REDUCED_RATE: Decimal = dec!(0.03313);

const UEZ_CITIES: &[&str] = &["atlantic city", "camden", "trenton", "newark", "paterson"];

const NJ_COUNTIES: &[&str] = &[
    "Atlantic", "Bergen", "Burlington", "Camden", "Cape May", "Cumberland", "Essex", "Gloucester",
    "Hudson", "Hunterdon", "Mercer", "Middlesex", "Monmouth", "Morris", "Ocean", "Passaic",
    "Salem", "Somerset", "Sussex", "Union", "Warren",
];

#[derive(Debug)]
pub struct NjSalesTaxCalculator;

impl Calculator for NjSalesTaxCalculator {
    fn type_id(&self) -> &'static str {
        "nj_sales_tax"
    }

    fn name(&self) -> &'static str {
        "NJ Sales Tax Calculator"
    }

    fn description(&self) -> &'static str {
        "Calculate NJ sales tax on materials (6.625%) - labor is exempt"
    }

    fn category(&self) -> &'static str {
        "nj_compliance"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("materials_cost", "Total cost of materials and supplies")
                .required()
                .min(0.0),
            FieldSpec::number("labor_cost", "Total labor cost (tax-exempt)").required().min(0.0),
            FieldSpec::choice("county", "County where work is performed", NJ_COUNTIES)
                .default_value("Atlantic"),
            FieldSpec::boolean("is_capital_improvement", "Work may qualify for tax exemption")
                .default_value(false),
            FieldSpec::text("city", "City name (for UEZ detection)").default_value(""),
        ])
    }

    fn default_inputs(&self) -> CalcInputs {
        CalcInputs::new()
            .with("materials_cost", 1000.0)
            .with("labor_cost", 500.0)
            .with("county", "Atlantic")
            .with("is_capital_improvement", false)
            .with("city", "")
    }

    fn validate(&self, inputs: &CalcInputs) -> Vec<String> {
        let mut errors = Vec::new();
        if inputs.contains("materials_cost") && inputs.f64_or("materials_cost", 0.0) < 0.0 {
            errors.push("Materials cost cannot be negative".to_string());
        }
        if inputs.contains("labor_cost") && inputs.f64_or("labor_cost", 0.0) < 0.0 {
            errors.push("Labor cost cannot be negative".to_string());
        }
        errors
    }

    fn calculate(&self, inputs: &CalcInputs) -> Result<CalculatorResult, CalcError> {
        let materials_cost = inputs.decimal_or("materials_cost", dec!(1000));
        let labor_cost = inputs.decimal_or("labor_cost", dec!(500));
        let is_capital_improvement = inputs.bool_or("is_capital_improvement", false);
        let county = inputs.str_or("county", "Atlantic");
        let city = inputs.str_or("city", "").to_lowercase();

        let mut warnings = Vec::new();

        let mut tax_rate = NJ_TAX_RATE;
        if county.eq_ignore_ascii_case("salem") {
            tax_rate = NJ_REDUCED_RATE;
            warnings.push("Salem County reduced rate applied (3.313%)".to_string());
        }
        if UEZ_CITIES.iter().any(|uez| city.contains(uez)) {
            tax_rate = NJ_REDUCED_RATE;
            warnings.push("Urban Enterprise Zone reduced rate applied (3.313%)".to_string());
        }

        let materials_tax = (materials_cost * tax_rate).round_dp(2);
        let rate_pct = (tax_rate * dec!(100)).normalize();

        let line_items = vec![
            LineItem::new(
                format!("Materials Cost (taxable @ {rate_pct}%)"),
                1.0,
                "subtotal",
                ProductCategory::Compliance,
            )
            .priced(materials_cost, materials_cost)
            .notes("Materials and supplies are taxable in NJ"),
            LineItem::new("Labor Cost (tax-exempt)", 1.0, "subtotal", ProductCategory::Labor)
                .priced(labor_cost, labor_cost)
                .notes("Labor for installation/repair is not taxable"),
            LineItem::new("NJ Sales Tax", 1.0, "tax", ProductCategory::Compliance)
                .priced(materials_tax, materials_tax)
                .notes(format!("{rate_pct}% on materials only")),
        ];

        if is_capital_improvement {
            warnings.push(
                "Capital improvement may be exempt from sales tax if meets NJ criteria"
                    .to_string(),
            );
            warnings.push("  - Must add to property value".to_string());
            warnings.push("  - Must become permanent part of real property".to_string());
            warnings.push("  - Requires ST-8 exemption certificate".to_string());
        }
        warnings
            .push("Contractors are responsible for collecting and remitting sales tax".to_string());

        let total = materials_cost + labor_cost + materials_tax;

        let formulas = vec![
            format!("Tax: ${materials_cost} materials × {rate_pct}% = ${materials_tax}"),
            format!(
                "Total: ${materials_cost} + ${labor_cost} labor + ${materials_tax} tax = ${total}"
            ),
        ];

        let mut result = CalculatorResult::new(self.type_id());
        result.inputs = inputs.to_map();
        result.line_items = line_items;
        result.formulas = formulas;
        result.warnings = warnings;
        result.summary.insert("materials_cost".into(), materials_cost.into());
        result.summary.insert("labor_cost".into(), labor_cost.into());
        result.summary.insert("tax_rate".into(), tax_rate.into());
        result.summary.insert("tax_amount".into(), materials_tax.into());
        result.summary.insert("total".into(), total.into());
        result.metadata.insert("county".into(), county.into());

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statewide_rate_on_materials_only() {
        let calc = NjSalesTaxCalculator;
        let inputs =
            CalcInputs::new().with("materials_cost", 1000.0).with("labor_cost", 500.0);
        let result = calc.run(&inputs).unwrap();
        assert_eq!(result.summary["tax_amount"].as_decimal(), Some(dec!(66.25)));
        assert_eq!(result.summary["total"].as_decimal(), Some(dec!(1566.25)));
    }

    #[test]
    fn salem_county_reduced_rate() {
        let calc = NjSalesTaxCalculator;
        let inputs = CalcInputs::new()
            .with("materials_cost", 1000.0)
            .with("labor_cost", 0.0)
            .with("county", "Salem");
        let result = calc.run(&inputs).unwrap();
        assert_eq!(result.summary["tax_rate"].as_decimal(), Some(NJ_REDUCED_RATE));
        assert!(result.warnings.iter().any(|w| w.contains("Salem County")));
    }

    #[test]
    fn uez_city_reduced_rate() {
        let calc = NjSalesTaxCalculator;
        let inputs = CalcInputs::new()
            .with("materials_cost", 200.0)
            .with("labor_cost", 0.0)
            .with("city", "Camden");
        let result = calc.run(&inputs).unwrap();
        assert_eq!(result.summary["tax_rate"].as_decimal(), Some(NJ_REDUCED_RATE));
    }

    #[test]
    fn capital_improvement_adds_exemption_guidance() {
        let calc = NjSalesTaxCalculator;
        let inputs = CalcInputs::new()
            .with("materials_cost", 100.0)
            .with("labor_cost", 100.0)
            .with("is_capital_improvement", true);
        let result = calc.run(&inputs).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("ST-8")));
    }
}
