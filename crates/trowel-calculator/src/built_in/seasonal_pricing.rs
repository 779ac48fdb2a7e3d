//! NJ seasonal pricing optimizer: monthly demand multipliers for indoor
//! and outdoor work plus a weather risk surcharge.

use crate::contract::{Calculator, FieldSpec, InputSchema};
use crate::error::CalcError;
use crate::inputs::CalcInputs;
use rust_decimal::{Decimal, dec};
use rust_decimal::prelude::ToPrimitive;
use trowel_types::{CalculatorResult, LineItem, ProductCategory};

const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

struct SeasonalFactor {
    indoor: Decimal,
    outdoor: Decimal,
    weather_risk: &'static str,
}

/// NJ monthly demand factors from historical booking patterns. Unknown
/// months fall back to neutral pricing with medium weather risk.
fn seasonal_factor(month: &str) -> SeasonalFactor {
    let (indoor, outdoor, weather_risk) = match month {
        "january" => (dec!(0.95), dec!(0.70), "high"),
        "february" => (dec!(0.95), dec!(0.75), "high"),
        "march" => (dec!(1.00), dec!(0.90), "medium"),
        "april" => (dec!(1.05), dec!(1.10), "medium"),
        "may" => (dec!(1.10), dec!(1.15), "low"),
        "june" => (dec!(1.10), dec!(1.20), "low"),
        "july" => (dec!(1.15), dec!(1.25), "low"),
        "august" => (dec!(1.15), dec!(1.25), "low"),
        "september" => (dec!(1.12), dec!(1.20), "low"),
        "october" => (dec!(1.08), dec!(1.15), "low"),
        "november" => (dec!(1.00), dec!(0.95), "medium"),
        "december" => (dec!(0.92), dec!(0.75), "high"),
        _ => (dec!(1.0), dec!(1.0), "medium"),
    };
    SeasonalFactor { indoor, outdoor, weather_risk }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug)]
pub struct SeasonalPricingOptimizer;

impl Calculator for SeasonalPricingOptimizer {
    fn type_id(&self) -> &'static str {
        "seasonal_pricing_optimizer"
    }

    fn name(&self) -> &'static str {
        "NJ Seasonal Pricing Optimizer"
    }

    fn description(&self) -> &'static str {
        "Optimize your pricing based on seasonal demand patterns in New Jersey"
    }

    fn category(&self) -> &'static str {
        "estimating"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("base_price", "Base project price").required().min(0.0),
            FieldSpec::choice("month", "Project month", MONTHS).default_value("january"),
            FieldSpec::choice("project_type", "Project type", &["indoor", "outdoor"])
                .default_value("indoor"),
        ])
    }

    fn default_inputs(&self) -> CalcInputs {
        CalcInputs::new()
            .with("base_price", 10000.0)
            .with("month", "january")
            .with("project_type", "indoor")
    }

    fn validate(&self, inputs: &CalcInputs) -> Vec<String> {
        let mut errors = Vec::new();
        if inputs.contains("base_price") && inputs.f64_or("base_price", 0.0) <= 0.0 {
            errors.push("Base price must be positive".to_string());
        }
        errors
    }

    fn calculate(&self, inputs: &CalcInputs) -> Result<CalculatorResult, CalcError> {
        let base_price = inputs.decimal_or("base_price", dec!(10000));
        let month = inputs.str_or("month", "january").to_lowercase();
        let project_type = inputs.str_or("project_type", "indoor");
        if base_price <= Decimal::ZERO {
            return Err(CalcError::computation("base price is zero"));
        }

        let mut warnings = vec![
            "OPTIMIZATION TOOL ONLY - Not a guarantee of demand or pricing accuracy".to_string(),
            "Seasonal factors are estimates based on historical NJ trends. Actual demand varies \
             by location, weather, and economic conditions. Not financial advice."
                .to_string(),
        ];

        let factors = seasonal_factor(&month);
        let factor = if project_type == "outdoor" { factors.outdoor } else { factors.indoor };
        let seasonal_price = (base_price * factor).round_dp(2);
        let mut adjusted_price = seasonal_price;
        let adjustment = seasonal_price - base_price;
        let mut formulas =
            vec![format!("Seasonal price: ${base_price:.2} × {factor} = ${seasonal_price:.2}")];

        let month_title = title_case(&month);
        let mut line_items = vec![
            LineItem::new(
                format!("Base Price ({month_title})"),
                1.0,
                "project",
                ProductCategory::Other,
            )
            .priced(base_price, base_price)
            .notes(format!("Standard pricing for {project_type} work")),
        ];

        let factor_pct = ((factor - Decimal::ONE) * dec!(100)).normalize();
        if adjustment != Decimal::ZERO {
            let sign = if adjustment > Decimal::ZERO { "+" } else { "" };
            line_items.push(
                LineItem::new(
                    format!("Seasonal Adjustment ({month_title})"),
                    1.0,
                    "adjustment",
                    ProductCategory::Other,
                )
                .priced(adjustment, adjustment)
                .notes(format!("{sign}{factor_pct}% {project_type} demand factor")),
            );
        }

        if project_type == "outdoor" && matches!(factors.weather_risk, "high" | "medium") {
            let risk_rate = if factors.weather_risk == "high" { dec!(0.05) } else { dec!(0.02) };
            let risk_surcharge = (base_price * risk_rate).round_dp(2);
            line_items.push(
                LineItem::new(
                    format!("Weather Risk Surcharge ({})", title_case(factors.weather_risk)),
                    1.0,
                    "surcharge",
                    ProductCategory::Other,
                )
                .priced(risk_surcharge, risk_surcharge)
                .notes("Covers potential weather delays and protection"),
            );
            adjusted_price += risk_surcharge;
            formulas.push(format!(
                "Weather risk: ${base_price:.2} × {} = ${risk_surcharge:.2}",
                risk_rate.normalize()
            ));
        }

        if factor < Decimal::ONE {
            warnings.push(format!(
                "{month_title} is OFF-SEASON - Consider offering discounts to fill schedule"
            ));
            warnings.push("  - Offer 5-10% discount for booking now".to_string());
            warnings.push("  - Promote winter indoor remodeling specials".to_string());
        } else if factor > dec!(1.10) {
            warnings.push(format!(
                "{month_title} is PEAK SEASON - High demand justifies premium pricing"
            ));
            warnings.push("  - Book projects 4-6 weeks in advance".to_string());
            warnings.push("  - Emphasize quick turnaround times".to_string());
        } else {
            warnings.push(format!(
                "{month_title} has MODERATE demand - Standard pricing recommended"
            ));
        }

        warnings.push(format!("NJ SEASONAL TIPS for {month_title}:"));
        match month.as_str() {
            "december" | "january" | "february" => {
                warnings.push("  - Indoor bathroom/kitchen remodels ideal".to_string());
                warnings.push("  - Homeowners using holiday bonuses".to_string());
                warnings.push("  - Less competition from outdoor contractors".to_string());
            }
            "march" | "april" | "may" => {
                warnings.push("  - Spring cleaning mentality drives remodels".to_string());
                warnings.push("  - Good time for deck/outdoor prep".to_string());
                warnings.push("  - Pre-summer bathroom upgrades".to_string());
            }
            "june" | "july" | "august" => {
                warnings.push("  - Peak season - maximize your rates".to_string());
                warnings.push("  - Outdoor deck/patio projects hot".to_string());
                warnings.push("  - Pre-book for fall to maintain flow".to_string());
            }
            _ => {
                warnings.push("  - Last chance for outdoor projects".to_string());
                warnings.push("  - Holiday prep drives bathroom upgrades".to_string());
                warnings.push("  - Book winter indoor projects now".to_string());
            }
        }

        let mut result = CalculatorResult::new(self.type_id());
        result.inputs = inputs.to_map();
        result.line_items = line_items;
        result.formulas = formulas;
        result.warnings = warnings;
        result.summary.insert("month".into(), month_title.into());
        result.summary.insert("project_type".into(), title_case(&project_type).into());
        result.summary.insert("base_price".into(), base_price.into());
        result
            .summary
            .insert("seasonal_factor".into(), factor.to_f64().unwrap_or(1.0).into());
        result.summary.insert("optimized_price".into(), adjusted_price.into());
        result.summary.insert("adjustment_amount".into(), adjustment.into());
        result
            .summary
            .insert("weather_risk".into(), factors.weather_risk.into());
        result.metadata.insert("not_binding".into(), true.into());
        result.metadata.insert("not_financial_advice".into(), true.into());

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn january_indoor_discounted() {
        let calc = SeasonalPricingOptimizer;
        let result = calc.run(&CalcInputs::new()).unwrap();
        assert_eq!(result.summary["seasonal_factor"].as_f64(), Some(0.95));
        assert_eq!(result.summary["optimized_price"].as_decimal(), Some(dec!(9500)));
        assert!(result.warnings.iter().any(|w| w.contains("OFF-SEASON")));
    }

    #[test]
    fn july_outdoor_peaks_with_no_surcharge() {
        let calc = SeasonalPricingOptimizer;
        let inputs = CalcInputs::new()
            .with("base_price", 10000.0)
            .with("month", "july")
            .with("project_type", "outdoor");
        let result = calc.run(&inputs).unwrap();
        assert_eq!(result.summary["optimized_price"].as_decimal(), Some(dec!(12500)));
        assert!(!result.line_items.iter().any(|i| i.name.contains("Weather Risk")));
    }

    #[test]
    fn winter_outdoor_carries_weather_surcharge() {
        let calc = SeasonalPricingOptimizer;
        let inputs = CalcInputs::new()
            .with("base_price", 10000.0)
            .with("month", "january")
            .with("project_type", "outdoor");
        let result = calc.run(&inputs).unwrap();
        // 10000 * 0.70 + 5% high-risk surcharge on base
        assert_eq!(result.summary["optimized_price"].as_decimal(), Some(dec!(7500)));
        assert!(result.line_items.iter().any(|i| i.name.contains("Weather Risk")));
    }

    #[test]
    fn march_indoor_is_neutral() {
        let calc = SeasonalPricingOptimizer;
        let inputs = CalcInputs::new().with("base_price", 5000.0).with("month", "march");
        let result = calc.run(&inputs).unwrap();
        assert_eq!(result.summary["adjustment_amount"].as_decimal(), Some(Decimal::ZERO));
        assert!(result.warnings.iter().any(|w| w.contains("MODERATE")));
    }
}
