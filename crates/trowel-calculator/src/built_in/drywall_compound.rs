//! Drywall joint compound calculator, covering premix buckets and dry
//! mix bags plus tape, corner bead and sanding supplies.

use crate::contract::{Calculator, FieldSpec, InputSchema};
use crate::error::CalcError;
use crate::inputs::CalcInputs;
use trowel_types::{CalculatorResult, LineItem, ProductCategory};

const BASE_LBS_PER_SQFT_PER_COAT: f64 = 0.05;
const LBS_PER_LF_SEAM_PER_COAT: f64 = 0.10;
const LBS_PER_LF_CORNER_PER_COAT: f64 = 0.15;
const LBS_PER_SCREW_PER_COAT: f64 = 0.005;

fn skill_factor(level: &str) -> f64 {
    match level {
        "intermediate" => 1.15,
        "diy" => 1.35,
        _ => 1.0, // professional
    }
}

/// Joint linear footage estimated from total area when none was given.
/// Assumes standard 4x8 sheets and typical room layouts.
struct JointEstimate {
    seams_lf: f64,
    corners_lf: f64,
    screw_spots: f64,
}

fn estimate_joints_from_area(sqft: f64) -> JointEstimate {
    // One sheet per 32 sqft; sheets share seams, roughly 8 LF each.
    let sheets = sqft / 32.0;
    JointEstimate {
        seams_lf: sheets * 8.0,
        // Typical room: 4 inside corners per 200 sqft at 8' height.
        corners_lf: (sqft / 200.0) * 4.0 * 8.0,
        // ~1 screw per sqft walls, 1.5 ceilings; 1.2 average.
        screw_spots: (sqft * 1.2).floor(),
    }
}

#[derive(Debug)]
pub struct DrywallCompoundCalculator;

impl Calculator for DrywallCompoundCalculator {
    fn type_id(&self) -> &'static str {
        "drywall_compound"
    }

    fn name(&self) -> &'static str {
        "Drywall Joint Compound Calculator"
    }

    fn description(&self) -> &'static str {
        "Calculate joint compound (mud), tape, and accessories for drywall finishing"
    }

    fn category(&self) -> &'static str {
        "drywall"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("drywall_sqft", "Total drywall area in square feet")
                .required()
                .min(1.0),
            FieldSpec::number("linear_feet_seams", "Linear feet of flat seams").default_value(0.0),
            FieldSpec::number("linear_feet_corners", "Linear feet of inside corners")
                .default_value(0.0),
            FieldSpec::number("linear_feet_outside_corners", "Linear feet of outside corners")
                .default_value(0.0),
            FieldSpec::integer("num_screw_spots", "Number of screw/nail spots to cover")
                .default_value(0i64),
            FieldSpec::choice(
                "compound_type",
                "Compound type: premix buckets or dry mix bags",
                &["premix", "dry_mix"],
            )
            .default_value("premix"),
            FieldSpec::integer("num_coats", "Number of coats")
                .default_value(3i64)
                .min(1.0)
                .max(5.0),
            FieldSpec::choice(
                "skill_level",
                "Applicator skill level",
                &["professional", "intermediate", "diy"],
            )
            .default_value("professional"),
            FieldSpec::number("bucket_weight_lbs", "Premix bucket weight (default: 5-gal)")
                .default_value(61.7),
            FieldSpec::number("bag_weight_lbs", "Dry mix bag weight in pounds").default_value(25.0),
            FieldSpec::boolean("include_tape", "Include joint tape in estimate")
                .default_value(true),
            FieldSpec::boolean("include_corner_bead", "Include corner bead in estimate")
                .default_value(true),
            FieldSpec::boolean("include_sandpaper", "Include sanding supplies")
                .default_value(true),
        ])
    }

    fn default_inputs(&self) -> CalcInputs {
        CalcInputs::new()
            .with("drywall_sqft", 500.0)
            .with("linear_feet_seams", 0.0)
            .with("linear_feet_corners", 0.0)
            .with("linear_feet_outside_corners", 0.0)
            .with("num_screw_spots", 0i64)
            .with("compound_type", "premix")
            .with("num_coats", 3i64)
            .with("skill_level", "professional")
            .with("bucket_weight_lbs", 61.7)
            .with("bag_weight_lbs", 25.0)
            .with("include_tape", true)
            .with("include_corner_bead", true)
            .with("include_sandpaper", true)
    }

    fn validate(&self, inputs: &CalcInputs) -> Vec<String> {
        let mut errors = Vec::new();
        if inputs.contains("drywall_sqft") && inputs.f64_or("drywall_sqft", 0.0) <= 0.0 {
            errors.push("Drywall area must be positive".to_string());
        }
        if inputs.contains("num_coats") && inputs.i64_or("num_coats", 0) < 1 {
            errors.push("Must apply at least 1 coat".to_string());
        }
        errors
    }

    fn calculate(&self, inputs: &CalcInputs) -> Result<CalculatorResult, CalcError> {
        let sqft = inputs.f64_or("drywall_sqft", 500.0);
        if sqft <= 0.0 {
            return Err(CalcError::computation("drywall area is zero"));
        }
        let compound_type = inputs.str_or("compound_type", "premix");
        let num_coats = inputs.i64_or("num_coats", 3);
        let skill_level = inputs.str_or("skill_level", "professional");

        let mut seams_lf = inputs.f64_or("linear_feet_seams", 0.0);
        let mut corners_lf = inputs.f64_or("linear_feet_corners", 0.0);
        let outside_corners_lf = inputs.f64_or("linear_feet_outside_corners", 0.0);
        let mut screw_spots = inputs.f64_or("num_screw_spots", 0.0);

        let estimated = seams_lf == 0.0 && corners_lf == 0.0 && screw_spots == 0.0;
        if estimated {
            let joints = estimate_joints_from_area(sqft);
            seams_lf = joints.seams_lf;
            corners_lf = joints.corners_lf;
            screw_spots = joints.screw_spots;
        }

        let factor = skill_factor(&skill_level);
        let coats = num_coats as f64;

        let base_lbs = sqft * BASE_LBS_PER_SQFT_PER_COAT * coats;
        let seam_lbs = seams_lf * LBS_PER_LF_SEAM_PER_COAT * coats;
        let corner_lbs = corners_lf * LBS_PER_LF_CORNER_PER_COAT * coats;
        let screw_lbs = screw_spots * LBS_PER_SCREW_PER_COAT * coats;
        let compound_lbs = (base_lbs + seam_lbs + corner_lbs + screw_lbs) * factor;

        let mut formulas = vec![
            format!(
                "Base: {sqft:.0} sqft × {BASE_LBS_PER_SQFT_PER_COAT} lbs/sqft × {num_coats} coats = {base_lbs:.1} lbs"
            ),
            format!(
                "Seams: {seams_lf:.0} LF × {LBS_PER_LF_SEAM_PER_COAT} lbs/LF × {num_coats} coats = {seam_lbs:.1} lbs"
            ),
            format!(
                "Corners: {corners_lf:.0} LF × {LBS_PER_LF_CORNER_PER_COAT} lbs/LF × {num_coats} coats = {corner_lbs:.1} lbs"
            ),
            format!("Skill factor ({skill_level}): × {factor}"),
            format!("Total compound: {compound_lbs:.1} lbs"),
        ];

        let mut line_items = Vec::new();

        let (units_needed, unit_type) = if compound_type == "premix" {
            let bucket_weight = inputs.f64_or("bucket_weight_lbs", 61.7);
            let buckets = (compound_lbs / bucket_weight).ceil() as i64;
            formulas.push(format!(
                "Buckets: {compound_lbs:.1} lbs ÷ {bucket_weight} lbs/bucket = {buckets} buckets"
            ));
            line_items.push(
                LineItem::new(
                    "Premix Joint Compound (5-gal bucket)",
                    buckets as f64,
                    "bucket",
                    ProductCategory::JointCompound,
                )
                .notes(format!("All-purpose or lightweight premix. {num_coats} coats."))
                .formula(format!(
                    "{compound_lbs:.1} lbs ÷ {bucket_weight} lbs = {buckets} buckets"
                )),
            );
            (buckets, "bucket")
        } else {
            let bag_weight = inputs.f64_or("bag_weight_lbs", 25.0);
            let bags = (compound_lbs / bag_weight).ceil() as i64;
            formulas.push(format!(
                "Bags: {compound_lbs:.1} lbs ÷ {bag_weight} lbs/bag = {bags} bags"
            ));
            line_items.push(
                LineItem::new(
                    format!("Setting-Type Joint Compound ({bag_weight}lb bag)"),
                    bags as f64,
                    "bag",
                    ProductCategory::JointCompound,
                )
                .notes(format!("20-min, 45-min, or 90-min setting compound. {num_coats} coats."))
                .formula(format!("{compound_lbs:.1} lbs ÷ {bag_weight} lbs = {bags} bags")),
            );
            (bags, "bag")
        };

        if inputs.bool_or("include_tape", true) {
            let tape_lf = seams_lf + corners_lf;
            let rolls = (tape_lf / 250.0).ceil() as i64;
            line_items.push(
                LineItem::new(
                    "Paper Joint Tape (250 ft roll)",
                    rolls as f64,
                    "roll",
                    ProductCategory::Drywall,
                )
                .notes(format!("Covers {tape_lf:.0} LF of seams and inside corners"))
                .formula(format!("{tape_lf:.0} LF ÷ 250 ft/roll = {rolls} rolls")),
            );
            formulas.push(format!("Tape: {tape_lf:.0} LF ÷ 250 ft/roll = {rolls} rolls"));
        }

        if inputs.bool_or("include_corner_bead", true) && outside_corners_lf > 0.0 {
            let pieces = (outside_corners_lf / 8.0).ceil() as i64;
            line_items.push(
                LineItem::new(
                    "Corner Bead (8 ft piece)",
                    pieces as f64,
                    "piece",
                    ProductCategory::Drywall,
                )
                .notes(format!(
                    "Paper-faced or metal. Covers {outside_corners_lf:.0} LF outside corners"
                ))
                .formula(format!(
                    "{outside_corners_lf:.0} LF ÷ 8 ft/piece = {pieces} pieces"
                )),
            );
            formulas.push(format!(
                "Corner bead: {outside_corners_lf:.0} LF ÷ 8 ft/piece = {pieces} pieces"
            ));
        }

        if inputs.bool_or("include_sandpaper", true) {
            let sheets = ((sqft / 100.0).ceil() as i64).max(3);
            line_items.push(
                LineItem::new(
                    "Sanding Screen (150-grit)",
                    sheets as f64,
                    "sheet",
                    ProductCategory::Drywall,
                )
                .notes("150-grit for between coats, 220-grit for final")
                .formula(format!("{sqft:.0} sqft ÷ 100 sqft/sheet = {sheets} sheets")),
            );
        }

        let mut result = CalculatorResult::new(self.type_id());
        result.inputs = inputs.to_map();
        result.line_items = line_items;
        result.formulas = formulas;
        result.summary.insert("drywall_sqft".into(), sqft.into());
        result.summary.insert("compound_type".into(), compound_type.into());
        result.summary.insert("num_coats".into(), num_coats.into());
        result.summary.insert("skill_level".into(), skill_level.into());
        result.summary.insert("estimated_seams_lf".into(), seams_lf.round().into());
        result.summary.insert("estimated_corners_lf".into(), corners_lf.round().into());
        result.summary.insert("estimated_screw_spots".into(), (screw_spots as i64).into());
        result
            .summary
            .insert("total_compound_lbs".into(), ((compound_lbs * 10.0).round() / 10.0).into());
        result.summary.insert("units_needed".into(), units_needed.into());
        result.summary.insert("unit_type".into(), unit_type.into());

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_estimates_joints_when_none_given() {
        let calc = DrywallCompoundCalculator;
        let inputs = CalcInputs::new().with("drywall_sqft", 320.0);
        let result = calc.run(&inputs).unwrap();
        // 320 / 32 = 10 sheets, 10 * 8 = 80 LF of seams
        assert_eq!(result.summary["estimated_seams_lf"].as_f64(), Some(80.0));
        assert_eq!(result.summary["estimated_screw_spots"].as_i64(), Some(384));
    }

    #[test]
    fn explicit_joints_skip_estimation() {
        let calc = DrywallCompoundCalculator;
        let inputs = CalcInputs::new()
            .with("drywall_sqft", 320.0)
            .with("linear_feet_seams", 40.0);
        let result = calc.run(&inputs).unwrap();
        assert_eq!(result.summary["estimated_seams_lf"].as_f64(), Some(40.0));
        assert_eq!(result.summary["estimated_corners_lf"].as_f64(), Some(0.0));
    }

    #[test]
    fn diy_skill_uses_more_compound() {
        let calc = DrywallCompoundCalculator;
        let pro = calc.run(&CalcInputs::new().with("drywall_sqft", 500.0)).unwrap();
        let diy = calc
            .run(&CalcInputs::new().with("drywall_sqft", 500.0).with("skill_level", "diy"))
            .unwrap();
        let pro_lbs = pro.summary["total_compound_lbs"].as_f64().unwrap();
        let diy_lbs = diy.summary["total_compound_lbs"].as_f64().unwrap();
        assert!(diy_lbs > pro_lbs);
    }

    #[test]
    fn dry_mix_reports_bags() {
        let calc = DrywallCompoundCalculator;
        let inputs = CalcInputs::new()
            .with("drywall_sqft", 500.0)
            .with("compound_type", "dry_mix");
        let result = calc.run(&inputs).unwrap();
        assert_eq!(result.summary["unit_type"].as_str(), Some("bag"));
        assert_eq!(result.line_items[0].unit, "bag");
    }

    #[test]
    fn zero_coats_rejected() {
        let calc = DrywallCompoundCalculator;
        let inputs = CalcInputs::new().with("drywall_sqft", 100.0).with("num_coats", 0i64);
        assert!(!calc.validate(&inputs).is_empty());
    }
}
