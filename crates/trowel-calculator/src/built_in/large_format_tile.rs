//! Large-format tile calculator (15" or more on any side), following
//! TCNA installation guidelines.

use crate::contract::{Calculator, FieldSpec, InputSchema};
use crate::coverage::MEDIUM_BED_COVERAGE;
use crate::error::CalcError;
use crate::inputs::CalcInputs;
use trowel_types::{CalculatorResult, LineItem, ProductCategory};

/// Lippage clips and wedges per tile; corners are shared between
/// neighboring tiles.
const LIPPAGE_PIECES_PER_TILE: f64 = 2.5;

#[derive(Debug)]
pub struct LargeFormatTileCalculator;

impl Calculator for LargeFormatTileCalculator {
    fn type_id(&self) -> &'static str {
        "large_format_tile"
    }

    fn name(&self) -> &'static str {
        "Large Format Tile Calculator"
    }

    fn description(&self) -> &'static str {
        "TCNA-compliant calculator for large format tiles (>15\" any dimension)"
    }

    fn category(&self) -> &'static str {
        "tile_installation"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("area_sqft", "Floor area (sqft)").required().min(0.0),
            FieldSpec::number("tile_length_in", "Tile length (inches)")
                .required()
                .min(1.0)
                .default_value(24.0),
            FieldSpec::number("tile_width_in", "Tile width (inches)")
                .required()
                .min(1.0)
                .default_value(48.0),
            FieldSpec::number("tile_thickness_in", "Tile thickness (inches)")
                .min(0.1)
                .default_value(0.375),
            FieldSpec::number("joint_width_in", "Grout joint width (inches)").default_value(0.25),
            FieldSpec::number("waste_percent", "Waste percentage")
                .min(0.0)
                .max(100.0)
                .default_value(15.0),
            FieldSpec::boolean("lippage_control_system", "Use lippage control system")
                .default_value(true),
        ])
    }

    fn default_inputs(&self) -> CalcInputs {
        CalcInputs::new()
            .with("area_sqft", 100.0)
            .with("tile_length_in", 24.0)
            .with("tile_width_in", 48.0)
            .with("tile_thickness_in", 0.375)
            .with("joint_width_in", 0.25)
            .with("waste_percent", 15.0)
            .with("lippage_control_system", true)
    }

    fn validate(&self, inputs: &CalcInputs) -> Vec<String> {
        let mut errors = Vec::new();
        if inputs.contains("area_sqft") && inputs.f64_or("area_sqft", 0.0) <= 0.0 {
            errors.push("Area must be positive".to_string());
        }
        if inputs.contains("tile_length_in") && inputs.f64_or("tile_length_in", 0.0) < 1.0 {
            errors.push("Tile length must be at least 1 inch".to_string());
        }
        if inputs.contains("tile_width_in") && inputs.f64_or("tile_width_in", 0.0) < 1.0 {
            errors.push("Tile width must be at least 1 inch".to_string());
        }
        errors
    }

    fn calculate(&self, inputs: &CalcInputs) -> Result<CalculatorResult, CalcError> {
        let area_sqft = inputs.f64_or("area_sqft", 100.0);
        let tile_length = inputs.f64_or("tile_length_in", 24.0);
        let tile_width = inputs.f64_or("tile_width_in", 48.0);
        let mut waste_percent = inputs.f64_or("waste_percent", 15.0);
        let lippage_control = inputs.bool_or("lippage_control_system", true);
        if area_sqft <= 0.0 {
            return Err(CalcError::computation("area is zero"));
        }

        let mut line_items = Vec::new();
        let mut warnings = Vec::new();
        let mut formulas = Vec::new();

        let is_large_format = tile_length >= 15.0 || tile_width >= 15.0;
        if !is_large_format {
            warnings.push("Tile size <15\" may not require large format methods".to_string());
        } else if waste_percent < 15.0 {
            waste_percent = 15.0;
            warnings.push("Large-format tile: waste raised to 15% minimum".to_string());
        }

        let tile_area_sqft = (tile_length * tile_width) / 144.0;
        if tile_area_sqft <= 0.0 {
            return Err(CalcError::computation("tile dimensions produce zero area"));
        }
        let waste_factor = 1.0 + waste_percent / 100.0;
        let tiles_needed_base = area_sqft / tile_area_sqft;
        let tiles_with_waste = (tiles_needed_base * waste_factor).ceil() as i64;
        formulas.push(format!(
            "({area_sqft:.1} sqft ÷ {tile_area_sqft:.2} sqft/tile) × {waste_factor:.2} waste = {tiles_with_waste} tiles"
        ));

        line_items.push(
            LineItem::new(
                format!("Tiles ({tile_length}\" x {tile_width}\")"),
                tiles_with_waste as f64,
                "tiles",
                ProductCategory::Tile,
            )
            .notes(format!("Includes {waste_percent:.0}% waste for cuts and breakage")),
        );

        // TCNA: large format requires medium bed mortar.
        let mortar_bags = (area_sqft / MEDIUM_BED_COVERAGE).ceil() as i64;
        formulas.push(format!(
            "{area_sqft:.1} sqft ÷ {MEDIUM_BED_COVERAGE:.0} sqft/bag = {mortar_bags} bags medium bed"
        ));
        line_items.push(
            LineItem::new(
                "Medium Bed Mortar (50lb bags)",
                mortar_bags as f64,
                "bags",
                ProductCategory::Mortar,
            )
            .notes("TCNA requires medium bed mortar for large format tile. Coverage: ~45 sqft/bag"),
        );

        warnings.push("TCNA requires back-buttering for large format tiles".to_string());
        warnings.push("Use 1/2\" x 1/2\" square notch or larger".to_string());

        if lippage_control {
            let clips_needed = (tiles_with_waste as f64 * LIPPAGE_PIECES_PER_TILE).ceil() as i64;
            line_items.push(
                LineItem::new(
                    "Lippage Control Clips",
                    clips_needed as f64,
                    "clips",
                    ProductCategory::Other,
                )
                .notes("Reusable bases for lippage control system"),
            );
            line_items.push(
                LineItem::new(
                    "Lippage Control Wedges",
                    clips_needed as f64,
                    "wedges",
                    ProductCategory::Other,
                )
                .notes("Single-use wedges for leveling system"),
            );
            warnings.push("Lippage control system included for professional results".to_string());
        } else {
            warnings.push("Consider lippage control system for large format tile".to_string());
        }

        warnings.push("Substrate must be flat within 1/8\" in 10' for large format".to_string());
        warnings.push("L/360 deflection maximum (may require reinforcement)".to_string());

        if tile_length >= 24.0 || tile_width >= 24.0 {
            warnings.push("Soft joints required every 20-25' per TCNA".to_string());
        }

        let joint_width = inputs.f64_or("joint_width_in", 0.25);
        let tile_thickness = inputs.f64_or("tile_thickness_in", 0.375);

        // (L + W) / (L × W) × joint × thickness × 1.8 = lbs per sqft
        let grout_lbs_per_sqft = ((tile_length + tile_width) / (tile_length * tile_width))
            * joint_width
            * tile_thickness
            * 1.8;
        let total_grout_lbs = area_sqft * grout_lbs_per_sqft * 1.1;
        let grout_bags = (total_grout_lbs / 25.0).ceil() as i64;
        formulas.push(format!(
            "{area_sqft:.1} sqft × {grout_lbs_per_sqft:.3} lbs/sqft × 1.1 waste = {total_grout_lbs:.1} lbs = {grout_bags} bags"
        ));
        line_items.push(
            LineItem::new("Grout (25lb bags)", grout_bags as f64, "bags", ProductCategory::Grout)
                .notes(format!(
                    "{joint_width}\" joint width, epoxy recommended for large format"
                )),
        );
        warnings.push("Consider epoxy grout for superior bond strength with large format".to_string());

        let mut result = CalculatorResult::new(self.type_id());
        let mut resolved = inputs.clone();
        resolved.set("waste_percent", waste_percent);
        result.inputs = resolved.to_map();
        result.line_items = line_items;
        result.formulas = formulas;
        result.warnings = warnings;
        result.summary.insert(
            "tile_size".into(),
            format!("{tile_length}\" × {tile_width}\"").into(),
        );
        result.summary.insert(
            "tile_area_sqft".into(),
            ((tile_area_sqft * 100.0).round() / 100.0).into(),
        );
        result.summary.insert("area_sqft".into(), area_sqft.into());
        result.summary.insert("tiles_needed".into(), tiles_with_waste.into());
        result.summary.insert("waste_percent".into(), waste_percent.into());
        result.summary.insert("mortar_bags".into(), mortar_bags.into());
        result.summary.insert("grout_bags".into(), grout_bags.into());
        result.summary.insert("lippage_control".into(), lippage_control.into());
        result.metadata.insert("is_large_format".into(), is_large_format.into());
        result.metadata.insert("requires_lippage_control".into(), true.into());
        result.metadata.insert("tcna_compliant".into(), true.into());

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_produce_tcna_quantities() {
        let calc = LargeFormatTileCalculator;
        let result = calc.run(&CalcInputs::new()).unwrap();
        // 100 sqft of 24x48 (8 sqft/tile) at 15% waste: 12.5 * 1.15 -> 15 tiles
        assert_eq!(result.summary["tiles_needed"].as_i64(), Some(15));
        // 100 / 45 -> 3 bags medium bed
        assert_eq!(result.summary["mortar_bags"].as_i64(), Some(3));
        assert_eq!(result.metadata["is_large_format"].as_bool(), Some(true));
    }

    #[test]
    fn low_waste_raised_to_floor() {
        let calc = LargeFormatTileCalculator;
        let inputs = CalcInputs::new()
            .with("area_sqft", 100.0)
            .with("tile_length_in", 24.0)
            .with("tile_width_in", 48.0)
            .with("waste_percent", 5.0);
        let result = calc.run(&inputs).unwrap();
        // 12.5 tiles * 1.15 floor -> 15, not the 12 the requested 5% gives
        assert_eq!(result.summary["tiles_needed"].as_i64(), Some(15));
        assert_eq!(result.summary["waste_percent"].as_f64(), Some(15.0));
        assert_eq!(result.inputs["waste_percent"].as_f64(), Some(15.0));
        assert!(result.warnings.iter().any(|w| w.contains("waste raised")));
    }

    #[test]
    fn small_tile_keeps_requested_waste() {
        let calc = LargeFormatTileCalculator;
        let inputs = CalcInputs::new()
            .with("area_sqft", 50.0)
            .with("tile_length_in", 12.0)
            .with("tile_width_in", 12.0)
            .with("waste_percent", 5.0);
        let result = calc.run(&inputs).unwrap();
        assert_eq!(result.summary["waste_percent"].as_f64(), Some(5.0));
    }

    #[test]
    fn small_tile_warns_not_large_format() {
        let calc = LargeFormatTileCalculator;
        let inputs = CalcInputs::new()
            .with("area_sqft", 50.0)
            .with("tile_length_in", 12.0)
            .with("tile_width_in", 12.0);
        let result = calc.run(&inputs).unwrap();
        assert_eq!(result.metadata["is_large_format"].as_bool(), Some(false));
        assert!(result.warnings.iter().any(|w| w.contains("may not require")));
    }

    #[test]
    fn lippage_clips_scale_with_tiles() {
        let calc = LargeFormatTileCalculator;
        let result = calc.run(&CalcInputs::new()).unwrap();
        let clips = result
            .line_items
            .iter()
            .find(|item| item.name == "Lippage Control Clips")
            .unwrap();
        // 15 tiles * 2.5 = 37.5 -> 38
        assert_eq!(clips.qty, 38.0);
    }

    #[test]
    fn soft_joint_warning_for_two_foot_tile() {
        let calc = LargeFormatTileCalculator;
        let result = calc.run(&CalcInputs::new()).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("Soft joints")));
    }
}
