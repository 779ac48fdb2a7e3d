//! Bill-of-materials rollup over calculator line items.
//!
//! Splits material and labor subtotals on the line item category, applies
//! the contractor's percentage adders (overhead and contingency on the
//! subtotal, profit on subtotal plus overhead) and NJ sales tax on
//! materials only. All dollar math is Decimal; each figure is rounded to
//! cents independently, matching how the numbers appear on an estimate.

use rust_decimal::{Decimal, dec};
use serde::{Deserialize, Serialize};
use trowel_types::{CalculatorResult, LineItem, ProductCategory};

/// Percentage knobs applied on top of the line item subtotal.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BomOptions {
    pub overhead_percent: Decimal,
    pub profit_percent: Decimal,
    pub tax_percent: Decimal,
    pub contingency_percent: Decimal,
}

impl Default for BomOptions {
    fn default() -> Self {
        Self {
            overhead_percent: dec!(15.0),
            profit_percent: dec!(20.0),
            // NJ sales tax, materials only
            tax_percent: dec!(6.625),
            contingency_percent: dec!(10.0),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BomSummary {
    pub calculator_type: String,
    pub total_items: usize,
    pub priced_items: usize,
    pub unpriced_items: usize,
    pub subtotal_materials: Decimal,
    pub subtotal_labor: Decimal,
    pub overhead: Decimal,
    pub profit: Decimal,
    pub tax: Decimal,
    pub contingency: Decimal,
    pub grand_total: Decimal,
    pub line_items: Vec<LineItem>,
}

pub fn rollup(result: &CalculatorResult, options: &BomOptions) -> BomSummary {
    let hundred = dec!(100);
    let mut subtotal_materials = Decimal::ZERO;
    let mut subtotal_labor = Decimal::ZERO;
    let mut priced_items = 0usize;

    for item in &result.line_items {
        let Some(total) = item.total_price else {
            continue;
        };
        priced_items += 1;
        if item.category == ProductCategory::Labor {
            subtotal_labor += total;
        } else {
            subtotal_materials += total;
        }
    }

    let subtotal = subtotal_materials + subtotal_labor;
    let overhead = (subtotal * options.overhead_percent / hundred).round_dp(2);
    let profit = ((subtotal + overhead) * options.profit_percent / hundred).round_dp(2);
    let tax = (subtotal_materials * options.tax_percent / hundred).round_dp(2);
    let contingency = (subtotal * options.contingency_percent / hundred).round_dp(2);
    let grand_total = subtotal + overhead + profit + tax + contingency;

    BomSummary {
        calculator_type: result.calculator_type.clone(),
        total_items: result.line_items.len(),
        priced_items,
        unpriced_items: result.line_items.len() - priced_items,
        subtotal_materials: subtotal_materials.round_dp(2),
        subtotal_labor: subtotal_labor.round_dp(2),
        overhead,
        profit,
        tax,
        contingency,
        grand_total: grand_total.round_dp(2),
        line_items: result.line_items.clone(),
    }
}

impl BomSummary {
    /// Renders the BOM as CSV: one row per line item followed by a blank
    /// row and the rollup figures. Rows are a fixed seven columns wide.
    pub fn to_csv(&self) -> anyhow::Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "Name",
            "Category",
            "Qty",
            "Unit",
            "Unit Price",
            "Extended Price",
            "Notes",
        ])?;

        for item in &self.line_items {
            writer.write_record([
                item.name.clone(),
                item.category.as_str().to_string(),
                item.qty.to_string(),
                item.unit.clone(),
                item.unit_price.map(|p| format!("{p:.2}")).unwrap_or_default(),
                item.total_price.map(|p| format!("{p:.2}")).unwrap_or_default(),
                item.notes.clone().unwrap_or_default(),
            ])?;
        }

        writer.write_record([""; 7])?;
        for (label, amount) in [
            ("Materials Subtotal", self.subtotal_materials),
            ("Labor Subtotal", self.subtotal_labor),
            ("Overhead", self.overhead),
            ("Profit", self.profit),
            ("Tax", self.tax),
            ("Contingency", self.contingency),
            ("Grand Total", self.grand_total),
        ] {
            writer.write_record([label, "", "", "", "", &format!("{amount:.2}"), ""])?;
        }

        let bytes = writer.into_inner()?;
        Ok(String::from_utf8(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> CalculatorResult {
        let mut result = CalculatorResult::new("tile_floor");
        result.line_items = vec![
            LineItem::new("Porcelain Tile", 110.0, "tiles", ProductCategory::Tile)
                .priced(dec!(5.00), dec!(550.00)),
            LineItem::new("Thinset Mortar", 3.0, "bags", ProductCategory::Mortar)
                .priced(dec!(150.00), dec!(450.00)),
            LineItem::new("Installation Labor", 100.0, "sqft", ProductCategory::Labor)
                .priced(dec!(5.00), dec!(500.00)),
            // Unpriced items stay out of the subtotals
            LineItem::new("Tile Spacers", 2.0, "bags", ProductCategory::Other),
        ];
        result
    }

    #[test]
    fn rollup_splits_materials_and_labor() {
        let summary = rollup(&fixture(), &BomOptions::default());
        assert_eq!(summary.subtotal_materials, dec!(1000.00));
        assert_eq!(summary.subtotal_labor, dec!(500.00));
        assert_eq!(summary.priced_items, 3);
        assert_eq!(summary.unpriced_items, 1);
    }

    #[test]
    fn default_adders_compound_correctly() {
        let summary = rollup(&fixture(), &BomOptions::default());
        // subtotal 1500: overhead 15% = 225, profit 20% of 1725 = 345,
        // tax 6.625% of materials 1000 = 66.25, contingency 10% = 150
        assert_eq!(summary.overhead, dec!(225.00));
        assert_eq!(summary.profit, dec!(345.00));
        assert_eq!(summary.tax, dec!(66.25));
        assert_eq!(summary.contingency, dec!(150.00));
        assert_eq!(summary.grand_total, dec!(2286.25));
    }

    #[test]
    fn tax_applies_to_materials_only() {
        let options = BomOptions {
            overhead_percent: Decimal::ZERO,
            profit_percent: Decimal::ZERO,
            tax_percent: dec!(6.625),
            contingency_percent: Decimal::ZERO,
        };
        let summary = rollup(&fixture(), &options);
        assert_eq!(summary.tax, dec!(66.25));
        assert_eq!(summary.grand_total, dec!(1566.25));
    }

    #[test]
    fn csv_lists_items_and_rollup_rows() {
        let summary = rollup(&fixture(), &BomOptions::default());
        let csv = summary.to_csv().unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Name,Category,Qty,Unit,Unit Price,Extended Price,Notes")
        );
        assert!(csv.contains("Porcelain Tile,tile,110,tiles,5.00,550.00,"));
        assert!(csv.contains("Grand Total,,,,,2286.25,"));
    }
}
