//! Thinset mortar calculator: bag count from trowel notch, substrate
//! type and condition, with optional back-buttering.

use crate::contract::{Calculator, FieldSpec, InputSchema};
use crate::coverage::{condition_factor, substrate_factor, trowel_coverage};
use crate::error::CalcError;
use crate::inputs::CalcInputs;
use trowel_types::{CalculatorResult, LineItem, ProductCategory};

const VALID_TROWELS: &[&str] = &["1/4x1/4", "1/4x3/8", "1/2x1/2", "3/4x3/4"];

#[derive(Debug)]
pub struct ThinsetMortarCalculator;

impl Calculator for ThinsetMortarCalculator {
    fn type_id(&self) -> &'static str {
        "thinset_mortar"
    }

    fn name(&self) -> &'static str {
        "Thinset/Mortar Calculator"
    }

    fn description(&self) -> &'static str {
        "Calculate thinset mortar for tile installations per TCNA standards"
    }

    fn category(&self) -> &'static str {
        "tile"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("area_sqft", "Total area to cover in square feet")
                .required()
                .min(0.1),
            FieldSpec::choice("trowel_notch_size", "Trowel notch size", VALID_TROWELS)
                .default_value("1/2x1/2"),
            FieldSpec::choice(
                "tile_size",
                "Tile size category",
                &["small", "medium", "large", "xlarge"],
            )
            .default_value("large"),
            FieldSpec::choice(
                "substrate_type",
                "Substrate material",
                &["cement_board", "plywood", "concrete", "existing_tile", "ditra"],
            )
            .default_value("cement_board"),
            FieldSpec::choice("substrate_condition", "Substrate condition", &["good", "fair", "poor"])
                .default_value("good"),
            FieldSpec::boolean("back_butter", "Apply mortar to tile backs").default_value(false),
            FieldSpec::number("back_butter_coverage", "Percentage of tile back to cover")
                .default_value(50.0)
                .min(0.0)
                .max(100.0),
            FieldSpec::number("bag_weight_lbs", "Bag weight in pounds").default_value(50.0),
            FieldSpec::number("coverage_per_bag_sqft", "Override: coverage per bag in sqft"),
        ])
    }

    fn default_inputs(&self) -> CalcInputs {
        CalcInputs::new()
            .with("area_sqft", 100.0)
            .with("trowel_notch_size", "1/2x1/2")
            .with("tile_size", "large")
            .with("substrate_type", "cement_board")
            .with("substrate_condition", "good")
            .with("back_butter", false)
            .with("back_butter_coverage", 50.0)
            .with("bag_weight_lbs", 50.0)
    }

    fn validate(&self, inputs: &CalcInputs) -> Vec<String> {
        let mut errors = Vec::new();
        if inputs.contains("area_sqft") && inputs.f64_or("area_sqft", 0.0) <= 0.0 {
            errors.push("Area must be positive".to_string());
        }
        if let Some(trowel) = inputs.get("trowel_notch_size").and_then(|v| v.as_str())
            && !VALID_TROWELS.contains(&trowel)
        {
            errors.push(format!("Invalid trowel size. Use: {}", VALID_TROWELS.join(", ")));
        }
        errors
    }

    fn calculate(&self, inputs: &CalcInputs) -> Result<CalculatorResult, CalcError> {
        let area_sqft = inputs.f64_or("area_sqft", 100.0);
        if area_sqft <= 0.0 {
            return Err(CalcError::computation("area is zero"));
        }
        let trowel = inputs.str_or("trowel_notch_size", "1/2x1/2");
        let substrate = inputs.str_or("substrate_type", "cement_board");
        let condition = inputs.str_or("substrate_condition", "good");
        let back_butter = inputs.bool_or("back_butter", false);
        let bag_weight = inputs.f64_or("bag_weight_lbs", 50.0);
        let tile_size = inputs.str_or("tile_size", "large");

        let base_coverage = trowel_coverage(&trowel);
        let sub_factor = substrate_factor(&substrate);
        let cond_factor = condition_factor(&condition);

        let adjusted_coverage = match inputs.positive("coverage_per_bag_sqft") {
            Some(coverage) => coverage,
            None => base_coverage / (sub_factor * cond_factor),
        };

        let bags_substrate = area_sqft / adjusted_coverage;

        let mut formulas = vec![
            format!(
                "Substrate mortar: {area_sqft:.1} sqft ÷ {adjusted_coverage:.1} sqft/bag = {bags_substrate:.2} bags"
            ),
            format!(
                "  (Base {base_coverage} sqft/bag × substrate factor {sub_factor} × condition factor {cond_factor})"
            ),
        ];

        let mut bags_backbutter = 0.0;
        if back_butter {
            let bb_coverage_pct = inputs.f64_or("back_butter_coverage", 50.0);
            // Back-buttering uses roughly 1/4 of the trowel coverage per
            // 100% coverage.
            let bb_ratio = bb_coverage_pct / 100.0 * 0.25;
            bags_backbutter = area_sqft / base_coverage * bb_ratio;
            formulas.push(format!(
                "Back-butter ({bb_coverage_pct:.0}%): {bags_backbutter:.2} bags additional"
            ));
        }

        let total_bags_exact = bags_substrate + bags_backbutter;
        let total_bags = total_bags_exact.ceil() as i64;
        formulas.push(format!("Total: {total_bags_exact:.2} → {total_bags} bags (rounded up)"));

        let mortar_type = if substrate == "ditra" || substrate == "existing_tile" {
            "Modified thinset (ANSI A118.4/A118.15)"
        } else if back_butter || tile_size == "large" || tile_size == "xlarge" {
            "Modified thinset (ANSI A118.4)"
        } else {
            "Unmodified thinset (ANSI A118.1)"
        };

        let line_items = vec![
            LineItem::new(
                format!("Thinset Mortar ({bag_weight}lb bag)"),
                total_bags as f64,
                "bag",
                ProductCategory::Mortar,
            )
            .notes(format!("{mortar_type} recommended. Using {trowel} trowel on {substrate}."))
            .formula(formulas[0].clone()),
        ];

        let mut result = CalculatorResult::new(self.type_id());
        result.inputs = inputs.to_map();
        result.line_items = line_items;
        result.formulas = formulas;
        result.summary.insert("area_sqft".into(), area_sqft.into());
        result.summary.insert("trowel_notch_size".into(), trowel.into());
        result.summary.insert("substrate_type".into(), substrate.into());
        result.summary.insert("substrate_condition".into(), condition.into());
        result.summary.insert("base_coverage_sqft_per_bag".into(), base_coverage.into());
        result.summary.insert(
            "adjusted_coverage_sqft_per_bag".into(),
            ((adjusted_coverage * 10.0).round() / 10.0).into(),
        );
        result.summary.insert("back_butter_included".into(), back_butter.into());
        result.summary.insert("total_bags".into(), total_bags.into());
        result.summary.insert("total_lbs".into(), (total_bags as f64 * bag_weight).into());
        result.summary.insert("recommended_mortar_type".into(), mortar_type.into());

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_compute_two_bags() {
        let calc = ThinsetMortarCalculator;
        let result = calc.run(&CalcInputs::new()).unwrap();
        // 100 sqft at 50 sqft/bag (1/2x1/2, cement board, good)
        assert_eq!(result.summary["total_bags"].as_i64(), Some(2));
    }

    #[test]
    fn poor_plywood_needs_more_mortar() {
        let calc = ThinsetMortarCalculator;
        let inputs = CalcInputs::new()
            .with("area_sqft", 100.0)
            .with("substrate_type", "plywood")
            .with("substrate_condition", "poor");
        let result = calc.run(&inputs).unwrap();
        // 50 / (1.1 * 1.25) = 36.4 sqft/bag -> 100 / 36.4 = 2.75 -> 3 bags
        assert_eq!(result.summary["total_bags"].as_i64(), Some(3));
    }

    #[test]
    fn back_butter_adds_fractional_bags() {
        let calc = ThinsetMortarCalculator;
        let inputs = CalcInputs::new()
            .with("area_sqft", 200.0)
            .with("back_butter", true)
            .with("back_butter_coverage", 100.0);
        let result = calc.run(&inputs).unwrap();
        // Substrate 4.0 bags + back-butter 200/50*0.25 = 1.0 -> 5 bags
        assert_eq!(result.summary["total_bags"].as_i64(), Some(5));
    }

    #[test]
    fn invalid_trowel_rejected() {
        let calc = ThinsetMortarCalculator;
        let inputs = CalcInputs::new().with("area_sqft", 50.0).with("trowel_notch_size", "9x9");
        assert!(!calc.validate(&inputs).is_empty());
    }

    #[test]
    fn coverage_override_wins() {
        let calc = ThinsetMortarCalculator;
        let inputs =
            CalcInputs::new().with("area_sqft", 100.0).with("coverage_per_bag_sqft", 25.0);
        let result = calc.run(&inputs).unwrap();
        assert_eq!(result.summary["total_bags"].as_i64(), Some(4));
    }
}
