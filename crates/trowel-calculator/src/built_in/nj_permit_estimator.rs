//! NJ permit and inspection cost estimator: municipal base fees, value
//! percentage by project type, trade permits and inspection fees.

use crate::contract::{Calculator, FieldSpec, InputSchema};
use crate::error::CalcError;
use crate::inputs::CalcInputs;
use rust_decimal::{Decimal, dec};
use trowel_types::{CalcValue, CalculatorResult, LineItem, ProductCategory};

const INSPECTION_FEE: Decimal = dec!(40);
const TRADE_PERMIT_FEE: Decimal = dec!(50);
const CO_FEE: Decimal = dec!(75);

fn base_permit_fee(municipality: &str) -> Decimal {
    match municipality {
        "cape_may_county" => dec!(85),
        "ocean_county" => dec!(70),
        "burlington_county" => dec!(80),
        _ => dec!(75), // atlantic_county and unknown
    }
}

struct ProjectProfile {
    value_rate: Decimal,
    inspections: &'static [&'static str],
    electrical_permit: bool,
    plumbing_permit: bool,
}

fn project_profile(project_type: &str, inputs: &CalcInputs) -> ProjectProfile {
    match project_type {
        "kitchen_remodel" => ProjectProfile {
            value_rate: dec!(0.006),
            inspections: &["Rough plumbing", "Rough electrical", "Gas (if applicable)", "Final"],
            electrical_permit: true,
            plumbing_permit: true,
        },
        "basement_finish" => ProjectProfile {
            value_rate: dec!(0.007),
            inspections: &["Framing", "Rough electrical", "Rough plumbing", "Insulation", "Final"],
            electrical_permit: true,
            plumbing_permit: true,
        },
        "deck_addition" => ProjectProfile {
            value_rate: dec!(0.004),
            inspections: &["Footing", "Framing", "Final"],
            electrical_permit: false,
            plumbing_permit: false,
        },
        "general_remodel" => ProjectProfile {
            value_rate: dec!(0.005),
            inspections: &["Rough", "Final"],
            electrical_permit: inputs.bool_or("needs_electrical", false),
            plumbing_permit: inputs.bool_or("needs_plumbing", false),
        },
        _ => ProjectProfile {
            // bathroom_remodel
            value_rate: dec!(0.005),
            inspections: &["Rough plumbing", "Rough electrical", "Final"],
            electrical_permit: true,
            plumbing_permit: true,
        },
    }
}

fn title_case(id: &str) -> String {
    id.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug)]
pub struct NjPermitEstimator;

impl Calculator for NjPermitEstimator {
    fn type_id(&self) -> &'static str {
        "nj_permit_estimator"
    }

    fn name(&self) -> &'static str {
        "NJ Permit & Inspection Calculator"
    }

    fn description(&self) -> &'static str {
        "Estimate permit costs and inspection requirements for NJ projects"
    }

    fn category(&self) -> &'static str {
        "nj_compliance"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("project_value", "Total project cost").required().min(0.0),
            FieldSpec::choice(
                "project_type",
                "Project type",
                &[
                    "bathroom_remodel",
                    "kitchen_remodel",
                    "basement_finish",
                    "deck_addition",
                    "general_remodel",
                ],
            )
            .default_value("bathroom_remodel"),
            FieldSpec::choice(
                "municipality",
                "Municipality",
                &["atlantic_county", "cape_may_county", "ocean_county", "burlington_county"],
            )
            .default_value("atlantic_county"),
            FieldSpec::boolean("needs_electrical", "Electrical work (general remodel only)")
                .default_value(false),
            FieldSpec::boolean("needs_plumbing", "Plumbing work (general remodel only)")
                .default_value(false),
        ])
    }

    fn default_inputs(&self) -> CalcInputs {
        CalcInputs::new()
            .with("project_value", 15000.0)
            .with("project_type", "bathroom_remodel")
            .with("municipality", "atlantic_county")
            .with("needs_electrical", false)
            .with("needs_plumbing", false)
    }

    fn validate(&self, inputs: &CalcInputs) -> Vec<String> {
        let mut errors = Vec::new();
        if inputs.contains("project_value") && inputs.f64_or("project_value", 0.0) <= 0.0 {
            errors.push("Project value must be positive".to_string());
        }
        errors
    }

    fn calculate(&self, inputs: &CalcInputs) -> Result<CalculatorResult, CalcError> {
        let project_value = inputs.decimal_or("project_value", dec!(15000));
        let project_type = inputs.str_or("project_type", "bathroom_remodel");
        let municipality = inputs.str_or("municipality", "atlantic_county");
        if project_value <= Decimal::ZERO {
            return Err(CalcError::computation("project value is zero"));
        }

        let mut warnings = vec![
            "ESTIMATION TOOL ONLY - Not legal or financial advice".to_string(),
            "Municipal fees and requirements subject to change. Verify with local building \
             department before submitting applications. This is NOT official permit \
             documentation."
                .to_string(),
        ];
        let mut line_items = Vec::new();
        let mut total_cost = Decimal::ZERO;

        let base_permit = base_permit_fee(&municipality);
        let profile = project_profile(&project_type, inputs);

        let permit_fee = (base_permit + project_value * profile.value_rate).round_dp(2);
        total_cost += permit_fee;

        let value_pct = (profile.value_rate * dec!(100)).normalize();
        line_items.push(
            LineItem::new(
                format!("Building Permit - {}", title_case(&municipality)),
                1.0,
                "permit",
                ProductCategory::Compliance,
            )
            .priced(permit_fee, permit_fee)
            .notes(format!("Base ${base_permit} + {value_pct}% of project value")),
        );

        if profile.electrical_permit {
            total_cost += TRADE_PERMIT_FEE;
            line_items.push(
                LineItem::new("Electrical Permit", 1.0, "permit", ProductCategory::Compliance)
                    .priced(TRADE_PERMIT_FEE, TRADE_PERMIT_FEE)
                    .notes("Required for electrical work"),
            );
            warnings.push("Licensed electrician required (NJ)".to_string());
        }

        if profile.plumbing_permit {
            total_cost += TRADE_PERMIT_FEE;
            line_items.push(
                LineItem::new("Plumbing Permit", 1.0, "permit", ProductCategory::Compliance)
                    .priced(TRADE_PERMIT_FEE, TRADE_PERMIT_FEE)
                    .notes("Required for plumbing work"),
            );
            warnings.push("Licensed plumber required (NJ)".to_string());
        }

        let inspection_count = profile.inspections.len();
        let inspection_total = INSPECTION_FEE * Decimal::from(inspection_count as u32);
        total_cost += inspection_total;
        line_items.push(
            LineItem::new(
                format!("Inspection Fees ({inspection_count} inspections)"),
                inspection_count as f64,
                "inspections",
                ProductCategory::Compliance,
            )
            .priced(INSPECTION_FEE, inspection_total)
            .notes(profile.inspections.join(" → ")),
        );

        if project_value > dec!(10000) {
            total_cost += CO_FEE;
            line_items.push(
                LineItem::new(
                    "Certificate of Approval/Occupancy",
                    1.0,
                    "certificate",
                    ProductCategory::Compliance,
                )
                .priced(CO_FEE, CO_FEE)
                .notes("Required for projects >$10,000"),
            );
        }

        warnings.push("Allow 3-5 business days for permit approval".to_string());
        warnings.push("Plans may be required for projects >$5,000".to_string());
        warnings.push("Keep permits posted at job site".to_string());

        let formulas = vec![
            format!(
                "Building permit: ${base_permit} base + ${project_value} × {value_pct}% = ${permit_fee}"
            ),
            format!("Inspections: {inspection_count} × ${INSPECTION_FEE} = ${inspection_total}"),
        ];

        let mut result = CalculatorResult::new(self.type_id());
        result.inputs = inputs.to_map();
        result.line_items = line_items;
        result.formulas = formulas;
        result.warnings = warnings;
        result.summary.insert("municipality".into(), title_case(&municipality).into());
        result.summary.insert("project_type".into(), title_case(&project_type).into());
        result.summary.insert("project_value".into(), project_value.into());
        result
            .summary
            .insert("inspection_count".into(), (inspection_count as i64).into());
        result.summary.insert("total_permit_cost".into(), total_cost.into());
        result.metadata.insert("not_binding".into(), true.into());
        result.metadata.insert("requires_verification".into(), true.into());
        result.metadata.insert(
            "inspections".into(),
            CalcValue::Array(
                profile.inspections.iter().map(|insp| CalcValue::from(*insp)).collect(),
            ),
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bathroom_remodel_fee_breakdown() {
        let calc = NjPermitEstimator;
        let result = calc.run(&CalcInputs::new()).unwrap();
        // Base 75 + 15000*0.5% = 150, + 50 elec + 50 plumb + 3*40 + 75 CO = 445
        assert_eq!(result.summary["total_permit_cost"].as_decimal(), Some(dec!(445)));
        assert_eq!(result.summary["inspection_count"].as_i64(), Some(3));
    }

    #[test]
    fn deck_addition_skips_trade_permits() {
        let calc = NjPermitEstimator;
        let inputs = CalcInputs::new()
            .with("project_value", 8000.0)
            .with("project_type", "deck_addition");
        let result = calc.run(&inputs).unwrap();
        assert!(!result.line_items.iter().any(|i| i.name == "Electrical Permit"));
        assert!(!result.line_items.iter().any(|i| i.name == "Plumbing Permit"));
        // No CO under $10,000
        assert!(!result.line_items.iter().any(|i| i.name.contains("Certificate")));
    }

    #[test]
    fn general_remodel_trade_permits_follow_toggles() {
        let calc = NjPermitEstimator;
        let inputs = CalcInputs::new()
            .with("project_value", 5000.0)
            .with("project_type", "general_remodel")
            .with("needs_electrical", true);
        let result = calc.run(&inputs).unwrap();
        assert!(result.line_items.iter().any(|i| i.name == "Electrical Permit"));
        assert!(!result.line_items.iter().any(|i| i.name == "Plumbing Permit"));
    }

    #[test]
    fn disclaimers_lead_the_warnings() {
        let calc = NjPermitEstimator;
        let result = calc.run(&CalcInputs::new()).unwrap();
        assert!(result.warnings[0].contains("ESTIMATION TOOL ONLY"));
    }
}
