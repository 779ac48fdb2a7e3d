//! NJ Home Improvement Contractor contract checklist: legal deposit cap,
//! required contract elements and a progressive payment schedule per
//! N.J.S.A. 56:8-136 et seq.

use crate::contract::{Calculator, FieldSpec, InputSchema};
use crate::error::CalcError;
use crate::inputs::CalcInputs;
use rust_decimal::{Decimal, dec};
use trowel_types::{CalculatorResult, LineItem, ProductCategory};

pub const NJ_HIC_LICENSE: &str = "13VH10808800";

const REQUIRED_ELEMENTS: &[&str] = &[
    "Contractor Name & HIC License Number",
    "Business Address & Phone",
    "Project Description & Specifications",
    "Total Contract Price",
    "Payment Schedule",
    "Start & Completion Dates",
    "Right to Cancel (3-day for home solicitation)",
    "Permit Information",
    "Warranty Information",
    "Certificate of Insurance",
    "Change Order Procedures",
];

/// NJ caps deposits at one third of the contract price; for contracts
/// under $5000 the cap is the lesser of one third and $1000.
pub fn max_legal_deposit(project_total: Decimal) -> Decimal {
    let third = project_total / dec!(3);
    if project_total < dec!(5000) { third.min(dec!(1000)) } else { third }
}

#[derive(Debug)]
pub struct NjHicContractCalculator;

impl Calculator for NjHicContractCalculator {
    fn type_id(&self) -> &'static str {
        "nj_hic_contract"
    }

    fn name(&self) -> &'static str {
        "NJ HIC Contract Generator"
    }

    fn description(&self) -> &'static str {
        "Generate compliant NJ Home Improvement Contract with required disclosures"
    }

    fn category(&self) -> &'static str {
        "nj_compliance"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("project_total", "Total contract amount in dollars")
                .required()
                .min(0.0),
            FieldSpec::number(
                "deposit_percent",
                "Percentage of total for deposit (will be adjusted to NJ limits)",
            )
            .min(0.0)
            .max(100.0)
            .default_value(10.0),
            FieldSpec::boolean("has_right_to_cancel", "Was contract initiated at customer's home?")
                .default_value(true),
            FieldSpec::choice(
                "payment_schedule",
                "Payment schedule type",
                &["progressive", "custom"],
            )
            .default_value("progressive"),
        ])
    }

    fn default_inputs(&self) -> CalcInputs {
        CalcInputs::new()
            .with("project_total", 5000.0)
            .with("deposit_percent", 10.0)
            .with("has_right_to_cancel", true)
            .with("payment_schedule", "progressive")
    }

    fn validate(&self, inputs: &CalcInputs) -> Vec<String> {
        let mut errors = Vec::new();
        if inputs.contains("project_total") && inputs.f64_or("project_total", 0.0) < 0.0 {
            errors.push("Project total cannot be negative".to_string());
        }
        let pct = inputs.f64_or("deposit_percent", 10.0);
        if inputs.contains("deposit_percent") && !(0.0..=100.0).contains(&pct) {
            errors.push("Deposit percent must be between 0 and 100".to_string());
        }
        errors
    }

    fn calculate(&self, inputs: &CalcInputs) -> Result<CalculatorResult, CalcError> {
        let project_total = inputs.decimal_or("project_total", dec!(5000));
        let deposit_percent = inputs.decimal_or("deposit_percent", dec!(10));
        let has_right_to_cancel = inputs.bool_or("has_right_to_cancel", true);
        let payment_schedule = inputs.str_or("payment_schedule", "progressive");

        let mut warnings = vec![
            "COMPLIANCE CHECKLIST ONLY - Not a legal contract or binding agreement".to_string(),
            "LEGAL DISCLAIMER: This tool provides NJ HIC compliance guidance only. It does NOT \
             create a contract. All work requires a separate, signed written contract that \
             complies with N.J.S.A. 56:8-136 et seq. Consult with legal counsel for contract \
             preparation."
                .to_string(),
            "This is an educational tool - not legal advice. Contractors are responsible for \
             their own compliance."
                .to_string(),
        ];

        let max_deposit = max_legal_deposit(project_total).round_dp(2);
        let requested_deposit = (project_total * deposit_percent / dec!(100)).round_dp(2);

        let deposit_amount = if requested_deposit > max_deposit {
            warnings.push(format!(
                "Deposit ${requested_deposit:.2} exceeds NJ legal limit of ${max_deposit:.2}"
            ));
            max_deposit
        } else {
            requested_deposit
        };

        let mut line_items = vec![
            LineItem::new(
                "Maximum Legal Deposit (1/3 or $1000 for <$5000)",
                1.0,
                "payment",
                ProductCategory::Compliance,
            )
            .priced(deposit_amount, deposit_amount)
            .notes(format!("{deposit_percent}% of ${project_total:.2}")),
            LineItem::new(
                "Required Contract Elements",
                REQUIRED_ELEMENTS.len() as f64,
                "items",
                ProductCategory::Compliance,
            )
            .notes(REQUIRED_ELEMENTS.join(" | ")),
        ];

        if has_right_to_cancel && project_total >= dec!(500) {
            line_items.push(
                LineItem::new(
                    "3-Day Right to Cancel Notice",
                    1.0,
                    "notice",
                    ProductCategory::Compliance,
                )
                .notes("Required for home solicitation sales. Must be in 10-point bold type."),
            );
        }

        if payment_schedule == "progressive" {
            let rough_in = (project_total * dec!(0.30)).round_dp(2);
            let substantial = (project_total * dec!(0.50)).round_dp(2);
            let final_payment = project_total - deposit_amount - rough_in - substantial;
            let milestones: [(&str, Decimal); 4] = [
                ("Deposit (at signing)", deposit_amount),
                ("Rough-in completion (30%)", rough_in),
                ("Substantial completion (50%)", substantial),
                ("Final payment (remainder)", final_payment),
            ];
            for (milestone, amount) in milestones {
                line_items.push(
                    LineItem::new(
                        format!("Payment Milestone: {milestone}"),
                        1.0,
                        "payment",
                        ProductCategory::Compliance,
                    )
                    .priced(amount, amount)
                    .notes("Progress-based payment"),
                );
            }
        }

        let formulas = vec![
            format!("Max deposit: min(${project_total:.2} ÷ 3, $1000 if under $5000) = ${max_deposit:.2}"),
            format!(
                "Requested deposit: ${project_total:.2} × {deposit_percent}% = ${requested_deposit:.2}"
            ),
        ];

        let mut result = CalculatorResult::new(self.type_id());
        result.inputs = inputs.to_map();
        result.line_items = line_items;
        result.formulas = formulas;
        result.warnings = warnings;
        result.summary.insert("project_total".into(), project_total.into());
        result.summary.insert("max_deposit".into(), max_deposit.into());
        result.summary.insert("recommended_deposit".into(), deposit_amount.into());
        result
            .summary
            .insert("required_elements".into(), (REQUIRED_ELEMENTS.len() as i64).into());
        result.metadata.insert("not_binding".into(), true.into());
        result.metadata.insert("not_legal_advice".into(), true.into());
        result.metadata.insert("requires_signed_contract".into(), true.into());
        result
            .metadata
            .insert("requires_right_to_cancel".into(), has_right_to_cancel.into());
        result.metadata.insert("nj_hic_license".into(), NJ_HIC_LICENSE.into());

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposit_capped_at_thousand_under_five_thousand() {
        let calc = NjHicContractCalculator;
        let inputs =
            CalcInputs::new().with("project_total", 4000.0).with("deposit_percent", 50.0);
        let result = calc.run(&inputs).unwrap();
        // min(4000/3, 1000) = 1000; requested 2000 clamps down with warning
        assert_eq!(result.summary["recommended_deposit"].as_decimal(), Some(dec!(1000)));
        assert!(result.warnings.iter().any(|w| w.contains("exceeds NJ legal limit")));
    }

    #[test]
    fn small_deposit_passes_unclamped() {
        let calc = NjHicContractCalculator;
        let inputs = CalcInputs::new().with("project_total", 4000.0).with("deposit_percent", 5.0);
        let result = calc.run(&inputs).unwrap();
        assert_eq!(result.summary["recommended_deposit"].as_decimal(), Some(dec!(200)));
        assert!(!result.warnings.iter().any(|w| w.contains("exceeds")));
    }

    #[test]
    fn larger_contract_allows_one_third() {
        let calc = NjHicContractCalculator;
        let inputs =
            CalcInputs::new().with("project_total", 9000.0).with("deposit_percent", 40.0);
        let result = calc.run(&inputs).unwrap();
        assert_eq!(result.summary["max_deposit"].as_decimal(), Some(dec!(3000)));
    }

    #[test]
    fn disclaimers_lead_the_warnings() {
        let calc = NjHicContractCalculator;
        let result = calc.run(&CalcInputs::new()).unwrap();
        assert!(result.warnings[0].contains("COMPLIANCE CHECKLIST ONLY"));
        assert!(result.warnings[1].contains("LEGAL DISCLAIMER"));
    }

    #[test]
    fn cancel_notice_only_above_five_hundred() {
        let calc = NjHicContractCalculator;
        let small = calc.run(&CalcInputs::new().with("project_total", 400.0)).unwrap();
        assert!(!small.line_items.iter().any(|i| i.name.contains("Right to Cancel")));
        let large = calc.run(&CalcInputs::new().with("project_total", 600.0)).unwrap();
        assert!(large.line_items.iter().any(|i| i.name.contains("Right to Cancel")));
    }
}
