//! Competitive bid analyzer: candidate pricing strategies against the
//! market average, scored by expected value (margin × win probability).

use crate::contract::{Calculator, FieldSpec, InputSchema};
use crate::error::CalcError;
use crate::inputs::CalcInputs;
use rust_decimal::{Decimal, dec};
use rust_decimal::prelude::ToPrimitive;
use trowel_types::{CalculatorResult, LineItem, ProductCategory};

/// Typical NJ margin range (min, max) by project type.
fn nj_margin_range(project_type: &str) -> (Decimal, Decimal) {
    match project_type {
        "kitchen_backsplash" => (dec!(0.25), dec!(0.35)),
        "shower_install" => (dec!(0.22), dec!(0.32)),
        "floor_tile" => (dec!(0.18), dec!(0.28)),
        "deck_building" => (dec!(0.25), dec!(0.35)),
        "basement_finish" => (dec!(0.20), dec!(0.30)),
        _ => (dec!(0.20), dec!(0.30)), // bathroom_tile
    }
}

struct Strategy {
    name: &'static str,
    price: Decimal,
    margin: Decimal,
    win_probability: Decimal,
    notes: &'static str,
}

#[derive(Debug)]
pub struct CompetitiveBidAnalyzer;

impl Calculator for CompetitiveBidAnalyzer {
    fn type_id(&self) -> &'static str {
        "competitive_bid_analyzer"
    }

    fn name(&self) -> &'static str {
        "Competitive Bid Analyzer"
    }

    fn description(&self) -> &'static str {
        "Analyze market rates and optimize your bid to win more contracts"
    }

    fn category(&self) -> &'static str {
        "estimating"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("your_cost", "Materials + labor + overhead").required().min(0.0),
            FieldSpec::number("desired_margin_percent", "Desired margin %")
                .min(10.0)
                .max(50.0)
                .default_value(25.0),
            FieldSpec::number("market_avg_price", "What competitors charge for similar work")
                .min(0.0),
            FieldSpec::integer("competitor_count", "Number of competitors")
                .min(1.0)
                .max(10.0)
                .default_value(3i64),
            FieldSpec::choice(
                "project_type",
                "Project type",
                &[
                    "bathroom_tile",
                    "kitchen_backsplash",
                    "shower_install",
                    "floor_tile",
                    "deck_building",
                    "basement_finish",
                ],
            )
            .default_value("bathroom_tile"),
        ])
    }

    fn default_inputs(&self) -> CalcInputs {
        CalcInputs::new()
            .with("your_cost", 8000.0)
            .with("desired_margin_percent", 25.0)
            .with("market_avg_price", 12000.0)
            .with("competitor_count", 3i64)
            .with("project_type", "bathroom_tile")
    }

    fn validate(&self, inputs: &CalcInputs) -> Vec<String> {
        let mut errors = Vec::new();
        if inputs.contains("your_cost") && inputs.f64_or("your_cost", 0.0) <= 0.0 {
            errors.push("Your cost must be positive".to_string());
        }
        let margin = inputs.f64_or("desired_margin_percent", 25.0);
        if inputs.contains("desired_margin_percent") && !(10.0..=50.0).contains(&margin) {
            errors.push("Desired margin must be between 10 and 50 percent".to_string());
        }
        errors
    }

    fn calculate(&self, inputs: &CalcInputs) -> Result<CalculatorResult, CalcError> {
        let your_cost = inputs.decimal_or("your_cost", dec!(8000));
        let desired_margin = inputs.decimal_or("desired_margin_percent", dec!(25)) / dec!(100);
        let market_avg_price = inputs.decimal_or("market_avg_price", Decimal::ZERO);
        let competitor_count = inputs.i64_or("competitor_count", 3);
        let project_type = inputs.str_or("project_type", "bathroom_tile");
        if your_cost <= Decimal::ZERO {
            return Err(CalcError::computation("your cost is zero"));
        }
        if desired_margin >= Decimal::ONE {
            return Err(CalcError::computation("margin must be under 100%"));
        }

        let mut warnings = vec![
            "ANALYSIS TOOL ONLY - Not a guarantee of contract award or pricing accuracy"
                .to_string(),
            "Business decisions are your responsibility. This tool provides guidance only and \
             does not guarantee bid success. Market conditions vary. Not financial advice."
                .to_string(),
        ];

        let (min_margin, _max_margin) = nj_margin_range(&project_type);
        let ideal_price = (your_cost / (Decimal::ONE - desired_margin)).round_dp(2);

        let mut strategies = Vec::new();

        if market_avg_price > Decimal::ZERO {
            let market_margin = (market_avg_price - your_cost) / market_avg_price;
            strategies.push(Strategy {
                name: "Match Market Average",
                price: market_avg_price,
                margin: market_margin,
                win_probability: dec!(0.50),
                notes: "Safe middle-ground pricing",
            });

            let competitive_price = (market_avg_price * dec!(0.95)).round_dp(2);
            let competitive_margin = (competitive_price - your_cost) / competitive_price;
            if competitive_margin >= min_margin {
                strategies.push(Strategy {
                    name: "Competitive (5% Under Market)",
                    price: competitive_price,
                    margin: competitive_margin,
                    win_probability: dec!(0.65),
                    notes: "Good balance of profit and competitiveness",
                });
            }

            let aggressive_price = (market_avg_price * dec!(0.90)).round_dp(2);
            let aggressive_margin = (aggressive_price - your_cost) / aggressive_price;
            if aggressive_margin >= min_margin * dec!(0.8) {
                strategies.push(Strategy {
                    name: "Aggressive (10% Under Market)",
                    price: aggressive_price,
                    margin: aggressive_margin,
                    win_probability: dec!(0.80),
                    notes: "Higher win rate, lower margin",
                });
            } else {
                warnings.push("Aggressive pricing below minimum safe margin".to_string());
            }

            let premium_price = (market_avg_price * dec!(1.05)).round_dp(2);
            let premium_margin = (premium_price - your_cost) / premium_price;
            strategies.push(Strategy {
                name: "Premium (5% Above Market)",
                price: premium_price,
                margin: premium_margin,
                win_probability: dec!(0.35),
                notes: "Emphasize quality, warranty, NJ HIC compliance",
            });
        } else {
            // No market data: fall back to a single cost-plus target.
            strategies.push(Strategy {
                name: "Cost-Plus Target Margin",
                price: ideal_price,
                margin: desired_margin,
                win_probability: dec!(0.50),
                notes: "No market data provided; price from cost and desired margin",
            });
            warnings.push(
                "No market average provided; using cost-plus pricing only".to_string(),
            );
        }

        let mut line_items = Vec::new();
        for strategy in &strategies {
            let profit = strategy.price - your_cost;
            let margin_pct = strategy.margin * dec!(100);
            let win_pct = strategy.win_probability * dec!(100);
            line_items.push(
                LineItem::new(
                    format!("Strategy: {}", strategy.name),
                    1.0,
                    "bid",
                    ProductCategory::Other,
                )
                .priced(strategy.price, profit)
                .notes(format!(
                    "Margin: {:.1}% | Win Probability: {:.0}% | {}",
                    margin_pct, win_pct, strategy.notes
                )),
            );
        }

        // Expected-value ranking.
        let recommended = strategies
            .iter()
            .max_by(|a, b| {
                let ev_a = a.win_probability * a.margin;
                let ev_b = b.win_probability * b.margin;
                ev_a.cmp(&ev_b)
            })
            .ok_or_else(|| CalcError::computation("no viable pricing strategy"))?;

        let recommended_profit = recommended.price - your_cost;
        warnings.push(format!("RECOMMENDED: {}", recommended.name));
        warnings.push(format!("  Price: ${:.2}", recommended.price));
        warnings.push(format!("  Your Profit: ${recommended_profit:.2}"));
        warnings.push(format!("  Margin: {:.1}%", recommended.margin * dec!(100)));

        warnings.push("NJ COMPETITIVE ADVANTAGES:".to_string());
        warnings.push("  - Emphasize NJ HIC License #13VH10808800".to_string());
        warnings.push("  - Highlight TCNA compliance and warranties".to_string());
        warnings.push("  - Offer free NJ building permit assistance".to_string());
        warnings.push("  - Include post-project walkthrough".to_string());
        warnings.push("  - Provide detailed NJ HIC compliant contract".to_string());

        let formulas = vec![format!(
            "Ideal price: ${your_cost:.2} ÷ (1 - {:.2}) = ${ideal_price:.2}",
            desired_margin
        )];

        let mut result = CalculatorResult::new(self.type_id());
        result.inputs = inputs.to_map();
        result.line_items = line_items;
        result.formulas = formulas;
        result.warnings = warnings;
        result.summary.insert("your_cost".into(), your_cost.into());
        result.summary.insert("market_avg_price".into(), market_avg_price.into());
        result.summary.insert("competitor_count".into(), competitor_count.into());
        result.summary.insert("strategy_count".into(), (strategies.len() as i64).into());
        result
            .summary
            .insert("recommended_strategy".into(), recommended.name.into());
        result
            .summary
            .insert("recommended_price".into(), recommended.price.into());
        result.summary.insert(
            "recommended_margin".into(),
            recommended.margin.round_dp(4).into(),
        );
        result.summary.insert(
            "win_probability".into(),
            recommended.win_probability.to_f64().unwrap_or(0.0).into(),
        );
        result.metadata.insert("not_binding".into(), true.into());
        result.metadata.insert("not_financial_advice".into(), true.into());

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_recommend_aggressive_strategy() {
        let calc = CompetitiveBidAnalyzer;
        let result = calc.run(&CalcInputs::new()).unwrap();
        // Cost 8000, market 12000: aggressive at 10800 has margin 25.9%
        // and win 0.80, the highest margin x probability product.
        assert_eq!(
            result.summary["recommended_strategy"].as_str(),
            Some("Aggressive (10% Under Market)")
        );
        assert_eq!(result.summary["recommended_price"].as_decimal(), Some(dec!(10800)));
        assert_eq!(result.summary["strategy_count"].as_i64(), Some(4));
    }

    #[test]
    fn thin_market_drops_aggressive_strategy() {
        let calc = CompetitiveBidAnalyzer;
        let inputs = CalcInputs::new()
            .with("your_cost", 10000.0)
            .with("market_avg_price", 11000.0);
        let result = calc.run(&inputs).unwrap();
        assert!(
            !result
                .line_items
                .iter()
                .any(|i| i.name.contains("Aggressive"))
        );
        assert!(result.warnings.iter().any(|w| w.contains("below minimum safe margin")));
    }

    #[test]
    fn no_market_data_falls_back_to_cost_plus() {
        let calc = CompetitiveBidAnalyzer;
        let inputs = CalcInputs::new().with("your_cost", 6000.0).with("market_avg_price", 0.0);
        let result = calc.run(&inputs).unwrap();
        assert_eq!(result.summary["strategy_count"].as_i64(), Some(1));
        // 6000 / 0.75 = 8000
        assert_eq!(result.summary["recommended_price"].as_decimal(), Some(dec!(8000)));
    }

    #[test]
    fn margin_bounds_validated() {
        let calc = CompetitiveBidAnalyzer;
        let inputs =
            CalcInputs::new().with("your_cost", 5000.0).with("desired_margin_percent", 80.0);
        assert!(!calc.validate(&inputs).is_empty());
    }
}
