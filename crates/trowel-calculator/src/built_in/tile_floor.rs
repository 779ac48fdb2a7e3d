//! Tile floor calculator: tile count with waste, box rounding, and
//! optional mortar and grout.

use crate::contract::{Calculator, FieldSpec, InputSchema};
use crate::coverage::{self, MEDIUM_BED_COVERAGE};
use crate::error::CalcError;
use crate::inputs::CalcInputs;
use trowel_types::{CalculatorResult, LineItem, ProductCategory};

/// Either tile dimension at or above this is large format and gets the
/// large-format material policy (waste floor, medium-bed mortar).
pub const LARGE_FORMAT_THRESHOLD_IN: f64 = 15.0;

/// Minimum waste percentage enforced for large-format tile.
pub const LARGE_FORMAT_WASTE_FLOOR: f64 = 15.0;

#[derive(Debug)]
pub struct TileFloorCalculator;

impl Calculator for TileFloorCalculator {
    fn type_id(&self) -> &'static str {
        "tile_floor"
    }

    fn name(&self) -> &'static str {
        "Tile Floor Calculator"
    }

    fn description(&self) -> &'static str {
        "Calculate tile, mortar, and grout for floor installations"
    }

    fn category(&self) -> &'static str {
        "tile"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("length_ft", "Room length in feet"),
            FieldSpec::number("width_ft", "Room width in feet"),
            FieldSpec::number("area_sqft", "Direct area input (sqft)"),
            FieldSpec::number("tile_length_in", "Tile length in inches").default_value(12.0),
            FieldSpec::number("tile_width_in", "Tile width in inches").default_value(12.0),
            FieldSpec::number("waste_percent", "Waste percentage")
                .default_value(10.0)
                .min(0.0)
                .max(50.0),
            FieldSpec::boolean("round_up_to_box", "Round tile count up to full boxes")
                .default_value(true),
            FieldSpec::integer("tiles_per_box", "Tiles per box").default_value(10i64),
            FieldSpec::boolean("include_mortar", "Include thinset mortar").default_value(true),
            FieldSpec::boolean("include_grout", "Include grout").default_value(true),
            FieldSpec::number("grout_joint_width_in", "Grout joint width in inches")
                .default_value(0.125),
        ])
    }

    fn default_inputs(&self) -> CalcInputs {
        CalcInputs::new()
            .with("length_ft", 10.0)
            .with("width_ft", 10.0)
            .with("tile_length_in", 12.0)
            .with("tile_width_in", 12.0)
            .with("waste_percent", 10.0)
            .with("round_up_to_box", true)
            .with("tiles_per_box", 10i64)
            .with("include_mortar", true)
            .with("include_grout", true)
            .with("grout_joint_width_in", 0.125)
    }

    fn validate(&self, inputs: &CalcInputs) -> Vec<String> {
        let mut errors = Vec::new();

        let has_dimensions =
            inputs.positive("length_ft").is_some() && inputs.positive("width_ft").is_some();
        let has_area = inputs.positive("area_sqft").is_some();
        if !has_dimensions && !has_area && !inputs.is_empty() {
            // An empty body falls back entirely to defaults, which carry
            // their own dimensions.
            let any_dimension = inputs.contains("length_ft")
                || inputs.contains("width_ft")
                || inputs.contains("area_sqft");
            if any_dimension {
                errors.push("Provide either length/width or direct area_sqft".to_string());
            }
        }

        if inputs.contains("tile_length_in") && inputs.f64_or("tile_length_in", 0.0) <= 0.0 {
            errors.push("Tile length must be positive".to_string());
        }
        if inputs.contains("tile_width_in") && inputs.f64_or("tile_width_in", 0.0) <= 0.0 {
            errors.push("Tile width must be positive".to_string());
        }

        let waste = inputs.f64_or("waste_percent", 0.0);
        if inputs.contains("waste_percent") && !(0.0..=50.0).contains(&waste) {
            errors.push("Waste percent must be between 0 and 50".to_string());
        }

        errors
    }

    fn calculate(&self, inputs: &CalcInputs) -> Result<CalculatorResult, CalcError> {
        let area_sqft = match inputs.positive("area_sqft") {
            Some(area) => area,
            None => inputs.f64_or("length_ft", 0.0) * inputs.f64_or("width_ft", 0.0),
        };
        if area_sqft <= 0.0 {
            return Err(CalcError::computation("computed area is zero"));
        }

        let tile_length_in = inputs.f64_or("tile_length_in", 12.0);
        let tile_width_in = inputs.f64_or("tile_width_in", 12.0);
        let tile_sqft = (tile_length_in * tile_width_in) / 144.0;
        if tile_sqft <= 0.0 {
            return Err(CalcError::computation("tile dimensions produce zero area"));
        }

        let large_format = tile_length_in >= LARGE_FORMAT_THRESHOLD_IN
            || tile_width_in >= LARGE_FORMAT_THRESHOLD_IN;

        let mut warnings = Vec::new();
        let mut waste_percent = inputs.f64_or("waste_percent", 10.0);
        if large_format && waste_percent < LARGE_FORMAT_WASTE_FLOOR {
            waste_percent = LARGE_FORMAT_WASTE_FLOOR;
            warnings.push(format!(
                "Large-format tile: waste raised to {LARGE_FORMAT_WASTE_FLOOR:.0}% minimum"
            ));
        }
        let waste_factor = 1.0 + waste_percent / 100.0;

        let tiles_needed_exact = (area_sqft / tile_sqft) * waste_factor;
        let tiles_needed = tiles_needed_exact.ceil() as i64;

        let round_up_to_box = inputs.bool_or("round_up_to_box", true);
        let tiles_per_box = inputs.i64_or("tiles_per_box", 10);
        let (boxes_needed, tiles_ordered) = if round_up_to_box && tiles_per_box > 0 {
            let boxes = (tiles_needed as f64 / tiles_per_box as f64).ceil() as i64;
            (boxes, boxes * tiles_per_box)
        } else {
            (0, tiles_needed)
        };

        let mut line_items = Vec::new();
        let mut formulas = Vec::new();

        let tile_size_str = format!("{}x{}", tile_length_in as i64, tile_width_in as i64);
        let tile_formula = format!(
            "({area_sqft:.1} sqft ÷ {tile_sqft:.3} sqft/tile) × {waste_factor:.2} waste = {tiles_needed_exact:.1} tiles"
        );
        formulas.push(tile_formula.clone());
        if round_up_to_box {
            formulas.push(format!(
                "Rounded to {boxes_needed} boxes × {tiles_per_box} tiles/box = {tiles_ordered} tiles"
            ));
        }

        let (tile_qty, tile_unit) =
            if round_up_to_box { (boxes_needed as f64, "box") } else { (tiles_needed as f64, "tile") };
        line_items.push(
            LineItem::new(
                format!("Floor Tile ({tile_size_str})"),
                tile_qty,
                tile_unit,
                ProductCategory::Tile,
            )
            .notes(format!(
                "{tiles_ordered} tiles total, covers {area_sqft:.1} sqft + {waste_percent:.0}% waste"
            ))
            .formula(tile_formula),
        );

        if inputs.bool_or("include_mortar", true) {
            let max_tile_dim = tile_length_in.max(tile_width_in);
            let (trowel, coverage_sqft, mortar_name) = if large_format {
                ("1/2x1/2", MEDIUM_BED_COVERAGE, "Medium-Bed Mortar (50lb bag)")
            } else if max_tile_dim <= 6.0 {
                ("1/4x1/4", coverage::trowel_coverage("1/4x1/4"), "Thinset Mortar (50lb bag)")
            } else {
                ("1/4x3/8", coverage::trowel_coverage("1/4x3/8"), "Thinset Mortar (50lb bag)")
            };
            let bags_needed = (area_sqft / coverage_sqft).ceil() as i64;

            let mortar_formula = format!(
                "{area_sqft:.1} sqft ÷ {coverage_sqft:.0} sqft/bag ({trowel} trowel) = {bags_needed} bags"
            );
            formulas.push(mortar_formula.clone());

            line_items.push(
                LineItem::new(mortar_name, bags_needed as f64, "bag", ProductCategory::Mortar)
                    .notes(format!("Using {trowel} trowel notch"))
                    .formula(mortar_formula),
            );
        }

        if inputs.bool_or("include_grout", true) {
            let joint_width = inputs.f64_or("grout_joint_width_in", 0.125);

            let lbs_per_sqft = coverage::grout_coverage(tile_length_in, tile_width_in, joint_width)
                .unwrap_or_else(|| {
                    let tile_perimeter = 2.0 * (tile_length_in + tile_width_in);
                    let tile_area = tile_length_in * tile_width_in;
                    (joint_width * tile_perimeter / tile_area) * 3.5
                });

            let grout_lbs = area_sqft * lbs_per_sqft * 1.1;
            let grout_bags = (grout_lbs / 25.0).ceil() as i64;

            let grout_formula = format!(
                "{area_sqft:.1} sqft × {lbs_per_sqft:.2} lbs/sqft × 1.1 waste = {grout_lbs:.1} lbs = {grout_bags} bags"
            );
            formulas.push(grout_formula.clone());

            line_items.push(
                LineItem::new(
                    "Sanded Grout (25lb bag)",
                    grout_bags as f64,
                    "bag",
                    ProductCategory::Grout,
                )
                .notes(format!("{joint_width}\" joint width"))
                .formula(grout_formula),
            );
        }

        if large_format {
            warnings.push(
                "Back-butter each tile and use a lippage control system for tile 15\" or larger"
                    .to_string(),
            );
        }

        let mut result = CalculatorResult::new(self.type_id());
        let mut resolved = inputs.clone();
        resolved.set("waste_percent", waste_percent);
        result.inputs = resolved.to_map();
        result.line_items = line_items;
        result.formulas = formulas;
        result.warnings = warnings;

        let coverage_sqft = tiles_ordered as f64 * tile_sqft;
        result.summary.insert("area_sqft".into(), ((area_sqft * 10.0).round() / 10.0).into());
        result.summary.insert(
            "tile_size".into(),
            format!("{}×{}", tile_length_in as i64, tile_width_in as i64).into(),
        );
        result.summary.insert("tiles_needed".into(), tiles_ordered.into());
        if round_up_to_box {
            result.summary.insert("boxes_needed".into(), boxes_needed.into());
        }
        result.summary.insert("waste_percent".into(), waste_percent.into());
        result
            .summary
            .insert("coverage_sqft".into(), ((coverage_sqft * 10.0).round() / 10.0).into());
        result.summary.insert(
            "extra_coverage_sqft".into(),
            (((coverage_sqft - area_sqft) * 10.0).round() / 10.0).into(),
        );
        result.summary.insert("large_format".into(), large_format.into());

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundred_sqft_of_twelve_inch_tile() {
        let calc = TileFloorCalculator;
        let inputs = CalcInputs::new().with("area_sqft", 100.0);
        let result = calc.run(&inputs).unwrap();
        // 100 / 1 sqft-per-tile * 1.10 = 110 tiles, 11 boxes of 10
        assert_eq!(result.summary["tiles_needed"].as_i64(), Some(110));
        assert_eq!(result.summary["boxes_needed"].as_i64(), Some(11));
    }

    #[test]
    fn large_format_raises_waste_floor() {
        let calc = TileFloorCalculator;
        let inputs = CalcInputs::new()
            .with("area_sqft", 100.0)
            .with("tile_length_in", 24.0)
            .with("tile_width_in", 12.0)
            .with("waste_percent", 5.0);
        let result = calc.run(&inputs).unwrap();
        assert_eq!(result.summary["waste_percent"].as_f64(), Some(15.0));
        assert_eq!(result.inputs["waste_percent"].as_f64(), Some(15.0));
        assert!(result.warnings.iter().any(|w| w.contains("waste raised")));
    }

    #[test]
    fn missing_dimensions_rejected() {
        let calc = TileFloorCalculator;
        let inputs = CalcInputs::new().with("area_sqft", 0.0);
        let errors = calc.validate(&inputs);
        assert!(!errors.is_empty());
    }

    #[test]
    fn grout_fallback_for_off_table_size() {
        let calc = TileFloorCalculator;
        let inputs = CalcInputs::new()
            .with("area_sqft", 50.0)
            .with("tile_length_in", 13.0)
            .with("tile_width_in", 13.0);
        let result = calc.run(&inputs).unwrap();
        // Closed-form: (0.125 * 52 / 169) * 3.5 lbs/sqft
        let lbs_per_sqft: f64 = (0.125 * 52.0 / 169.0) * 3.5;
        let expected_bags = (50.0 * lbs_per_sqft * 1.1 / 25.0).ceil();
        let grout = result
            .line_items
            .iter()
            .find(|item| item.category == ProductCategory::Grout)
            .unwrap();
        assert_eq!(grout.qty, expected_bags);
    }
}
