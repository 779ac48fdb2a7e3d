//! Shower pan liner calculator for traditional mortar bed showers:
//! CPE/PVC liner sizing, deck mud for pre-slope, top bed and curb, drain
//! assembly and accessories.

use crate::contract::{Calculator, FieldSpec, InputSchema};
use crate::error::CalcError;
use crate::inputs::CalcInputs;
use trowel_types::{CalculatorResult, LineItem, ProductCategory};

const PRESLOPE_BAGS_PER_SQFT: f64 = 0.5;
const TOP_BED_BAGS_PER_SQFT: f64 = 1.2;
const CURB_BAGS_PER_LF: f64 = 0.3;

#[derive(Debug)]
pub struct ShowerPanLinerCalculator;

impl Calculator for ShowerPanLinerCalculator {
    fn type_id(&self) -> &'static str {
        "shower_pan_liner"
    }

    fn name(&self) -> &'static str {
        "Shower Pan Liner Calculator"
    }

    fn description(&self) -> &'static str {
        "CPE/PVC liner for mortar bed shower pans per TCNA"
    }

    fn category(&self) -> &'static str {
        "waterproofing"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("shower_length_in", "Shower length (inches)")
                .required()
                .min(24.0)
                .default_value(60.0),
            FieldSpec::number("shower_width_in", "Shower width (inches)")
                .required()
                .min(24.0)
                .default_value(32.0),
            FieldSpec::number("curb_height_in", "Curb height (inches)")
                .min(2.0)
                .max(12.0)
                .default_value(6.0),
            FieldSpec::number(
                "wall_height_in",
                "Wall upturn height (inches), minimum 3\", typically 9-12\"",
            )
            .min(3.0)
            .default_value(12.0),
        ])
    }

    fn default_inputs(&self) -> CalcInputs {
        CalcInputs::new()
            .with("shower_length_in", 60.0)
            .with("shower_width_in", 32.0)
            .with("curb_height_in", 6.0)
            .with("wall_height_in", 12.0)
    }

    fn validate(&self, inputs: &CalcInputs) -> Vec<String> {
        let mut errors = Vec::new();
        if inputs.contains("shower_length_in") && inputs.f64_or("shower_length_in", 0.0) < 24.0 {
            errors.push("Shower length must be at least 24 inches".to_string());
        }
        if inputs.contains("shower_width_in") && inputs.f64_or("shower_width_in", 0.0) < 24.0 {
            errors.push("Shower width must be at least 24 inches".to_string());
        }
        if inputs.contains("wall_height_in") && inputs.f64_or("wall_height_in", 0.0) < 3.0 {
            errors.push("Liner must extend at least 3 inches up the walls".to_string());
        }
        errors
    }

    fn calculate(&self, inputs: &CalcInputs) -> Result<CalculatorResult, CalcError> {
        let shower_length = inputs.f64_or("shower_length_in", 60.0);
        let shower_width = inputs.f64_or("shower_width_in", 32.0);
        let curb_height = inputs.f64_or("curb_height_in", 6.0);
        let wall_height = inputs.f64_or("wall_height_in", 12.0);
        if shower_length <= 0.0 || shower_width <= 0.0 {
            return Err(CalcError::computation("shower dimensions are zero"));
        }

        let length_ft = shower_length / 12.0;
        let width_ft = shower_width / 12.0;
        let wall_ft = wall_height / 12.0;

        // Liner covers the floor plus the wall upturn on each side, with a
        // foot of extra for corner folds.
        let liner_length = length_ft + wall_ft * 2.0 + 1.0;
        let liner_width = width_ft + wall_ft * 2.0 + 1.0;
        let liner_area = liner_length * liner_width;
        let floor_area = length_ft * width_ft;

        let preslope_bags = (floor_area * PRESLOPE_BAGS_PER_SQFT).ceil() as i64;
        let top_bed_bags = (floor_area * TOP_BED_BAGS_PER_SQFT).ceil() as i64;
        // Curb assumed across the shower width.
        let curb_bags = (width_ft * CURB_BAGS_PER_LF).ceil() as i64;

        let formulas = vec![
            format!(
                "Liner: ({length_ft:.1}' + 2×{wall_ft:.1}' + 1') × ({width_ft:.1}' + 2×{wall_ft:.1}' + 1') = {liner_area:.1} sqft"
            ),
            format!(
                "Pre-slope: {floor_area:.1} sqft × {PRESLOPE_BAGS_PER_SQFT} bags/sqft = {preslope_bags} bags"
            ),
            format!(
                "Top bed: {floor_area:.1} sqft × {TOP_BED_BAGS_PER_SQFT} bags/sqft = {top_bed_bags} bags"
            ),
            format!("Curb: {width_ft:.1} LF × {CURB_BAGS_PER_LF} bags/LF = {curb_bags} bags"),
        ];

        let line_items = vec![
            LineItem::new("CPE/PVC Shower Pan Liner", liner_area, "sqft", ProductCategory::Waterproofing)
                .notes(format!(
                    "{liner_length:.1}' × {liner_width:.1}' (includes wall upturn)"
                )),
            LineItem::new(
                "Deck Mud for Pre-Slope (60lb bags)",
                preslope_bags as f64,
                "bags",
                ProductCategory::Mortar,
            )
            .notes("Pre-slope to drain before liner installation (1/4\" per foot)"),
            LineItem::new(
                "Deck Mud for Top Bed (60lb bags)",
                top_bed_bags as f64,
                "bags",
                ProductCategory::Mortar,
            )
            .notes("Top mortar bed over liner (min 1.25\" at drain)"),
            LineItem::new("2-Piece Shower Drain Assembly", 1.0, "drain", ProductCategory::Waterproofing)
                .notes("Clamping drain with weep holes (Oatey, Schluter-Kerdi-Drain, etc.)"),
            LineItem::new(
                "Deck Mud for Curb (60lb bags)",
                curb_bags as f64,
                "bags",
                ProductCategory::Mortar,
            )
            .notes(format!("Mortar for {curb_height}\" tall curb")),
            LineItem::new("Liner Adhesive/Primer", 1.0, "quart", ProductCategory::Waterproofing)
                .notes("For sealing seams and corners"),
            LineItem::new(
                "Reinforcing Fabric",
                (liner_area / 10.0).ceil(),
                "sqft",
                ProductCategory::Waterproofing,
            )
            .notes("For reinforcing corners and seams"),
        ];

        let warnings = vec![
            "Pre-slope drain area 1/4\" per foot BEFORE liner".to_string(),
            "Liner must extend minimum 3\" up all walls".to_string(),
            "Use 2-piece clamping drain with weep holes".to_string(),
            "Test pan with 2\" water for 24 hours before top bed".to_string(),
            "Top bed minimum 1.25\" thick at drain, 1/4\" per foot slope".to_string(),
            "Never use screws/nails below liner height".to_string(),
        ];

        let mut result = CalculatorResult::new(self.type_id());
        result.inputs = inputs.to_map();
        result.line_items = line_items;
        result.formulas = formulas;
        result.warnings = warnings;
        result.summary.insert(
            "shower_dimensions".into(),
            format!("{shower_length}\" × {shower_width}\"").into(),
        );
        result
            .summary
            .insert("floor_area_sqft".into(), ((floor_area * 10.0).round() / 10.0).into());
        result.summary.insert(
            "liner_dimensions".into(),
            format!("{liner_length:.1}' × {liner_width:.1}'").into(),
        );
        result
            .summary
            .insert("liner_area_sqft".into(), ((liner_area * 10.0).round() / 10.0).into());
        result.summary.insert("preslope_bags".into(), preslope_bags.into());
        result.summary.insert("top_bed_bags".into(), top_bed_bags.into());
        result.summary.insert("curb_bags".into(), curb_bags.into());
        result
            .metadata
            .insert("tcna_method".into(), "Traditional mortar bed".into());

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_sixty_by_thirty_two_pan() {
        let calc = ShowerPanLinerCalculator;
        let result = calc.run(&CalcInputs::new()).unwrap();
        // Floor 5' x 2.67' = 13.3 sqft; pre-slope ceil(13.3 * 0.5) = 7
        assert_eq!(result.summary["preslope_bags"].as_i64(), Some(7));
        assert_eq!(result.summary["top_bed_bags"].as_i64(), Some(16));
        assert_eq!(result.summary["curb_bags"].as_i64(), Some(1));
    }

    #[test]
    fn liner_includes_wall_upturn_and_fold_allowance() {
        let calc = ShowerPanLinerCalculator;
        let result = calc.run(&CalcInputs::new()).unwrap();
        // (5 + 2 + 1) x (2.667 + 2 + 1) = 8 x 5.667 = 45.3 sqft
        let liner = result.summary["liner_area_sqft"].as_f64().unwrap();
        assert!((liner - 45.3).abs() < 0.1);
    }

    #[test]
    fn undersized_shower_rejected() {
        let calc = ShowerPanLinerCalculator;
        let inputs = CalcInputs::new().with("shower_length_in", 20.0);
        assert!(!calc.validate(&inputs).is_empty());
    }
}
