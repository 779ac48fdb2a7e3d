//! All-in-one tile project calculator. Combines tile, mortar, grout,
//! waterproofing, substrate prep, labor and NJ HIC deposit compliance
//! across up to four project areas (floor, wall, shower, backsplash).
//!
//! Each section contributes its own line items, cost and warnings;
//! toggling a section off never disturbs the others.

use crate::contract::{Calculator, FieldSpec, InputSchema};
use crate::coverage::{MEDIUM_BED_COVERAGE, trowel_coverage};
use crate::error::CalcError;
use crate::inputs::CalcInputs;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, dec};
use trowel_types::{CalculatorResult, LineItem, ProductCategory};

fn money(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

struct Section {
    items: Vec<LineItem>,
    cost: Decimal,
    warnings: Vec<String>,
}

impl Section {
    fn new() -> Self {
        Self { items: Vec::new(), cost: Decimal::ZERO, warnings: Vec::new() }
    }
}

#[derive(Debug)]
pub struct IntegratedProjectCalculator;

impl IntegratedProjectCalculator {
    fn tiles(
        &self,
        total_area: f64,
        tile_length: f64,
        tile_width: f64,
        waste_percent: f64,
        inputs: &CalcInputs,
    ) -> Result<(Section, i64, i64, i64), CalcError> {
        let mut section = Section::new();

        let tile_sqft_each = (tile_length * tile_width) / 144.0;
        if tile_sqft_each <= 0.0 {
            return Err(CalcError::computation("tile dimensions produce zero area"));
        }
        let waste_factor = 1.0 + waste_percent / 100.0;
        let tiles_needed = (total_area * waste_factor / tile_sqft_each).ceil() as i64;

        let tiles_per_box = inputs.i64_or("tiles_per_box", 10).max(1);
        let boxes_needed = (tiles_needed as f64 / tiles_per_box as f64).ceil() as i64;
        let actual_tiles = boxes_needed * tiles_per_box;
        let waste_tiles = actual_tiles - (total_area / tile_sqft_each).ceil() as i64;

        let price_per_sqft = money(inputs.f64_or("tile_price_per_sqft", 0.0));
        let tile_cost = if price_per_sqft > Decimal::ZERO {
            (money(total_area) * price_per_sqft).round_dp(2)
        } else {
            Decimal::ZERO
        };

        section.items.push(
            LineItem::new(
                format!("Tile ({tile_length}\" x {tile_width}\")"),
                actual_tiles as f64,
                "tiles",
                ProductCategory::Tile,
            )
            .priced(price_per_sqft, tile_cost)
            .notes(format!(
                "{boxes_needed} boxes x {tiles_per_box} tiles/box. Covers {total_area} sqft + {waste_percent:.0}% waste"
            )),
        );
        section.cost = tile_cost;

        Ok((section, actual_tiles, boxes_needed, waste_tiles))
    }

    fn mortar(&self, area: f64, is_large_format: bool, inputs: &CalcInputs) -> Section {
        let mut section = Section::new();

        let (trowel_size, coverage_per_bag, mortar_type) = if is_large_format {
            section
                .warnings
                .push("TCNA requires medium bed mortar for large format tiles".to_string());
            section.warnings.push("Back-butter all large format tiles".to_string());
            ("1/2x1/2".to_string(), MEDIUM_BED_COVERAGE, "Medium Bed Mortar")
        } else {
            let trowel = inputs.str_or("trowel_size", "1/4x3/8");
            let coverage = trowel_coverage(&trowel);
            (trowel, coverage, "Thinset Mortar")
        };

        let substrate = inputs.str_or("substrate_type", "cement_board");
        let substrate_factor = match substrate.as_str() {
            "plywood" => 1.1,
            "existing_tile" => 1.2,
            _ => 1.0,
        };

        let adjusted_coverage = coverage_per_bag / substrate_factor;
        let bags_needed = (area / adjusted_coverage).ceil() as i64;

        let bag_price = money(inputs.f64_or("mortar_price_per_bag", 25.0));
        let mortar_cost = (bag_price * Decimal::from(bags_needed)).round_dp(2);

        section.items.push(
            LineItem::new(
                format!("{mortar_type} (50lb bags)"),
                bags_needed as f64,
                "bags",
                ProductCategory::Mortar,
            )
            .priced(bag_price, mortar_cost)
            .notes(format!(
                "Trowel: {trowel_size}, Coverage: ~{adjusted_coverage:.0} sqft/bag, Substrate: {substrate}"
            )),
        );
        section.cost = mortar_cost;
        section
    }

    fn grout(&self, area: f64, inputs: &CalcInputs) -> Section {
        let mut section = Section::new();

        let joint_width = inputs.f64_or("grout_joint_in", 0.125);
        let lbs_per_sqft = if joint_width <= 0.125 {
            0.15
        } else if joint_width <= 0.1875 {
            0.22
        } else {
            0.30
        };

        let grout_lbs = (area * lbs_per_sqft).ceil() as i64;
        let bags_needed = (grout_lbs as f64 / 25.0).ceil() as i64;
        let bag_price = money(inputs.f64_or("grout_price_per_bag", 35.0));
        let grout_cost = (bag_price * Decimal::from(bags_needed)).round_dp(2);

        let grout_type = inputs.str_or("grout_type", "sanded");
        if joint_width < 0.125 && grout_type == "sanded" {
            section.warnings.push("Consider unsanded grout for joints <1/8\"".to_string());
        }

        let mut grout_label = grout_type.clone();
        if let Some(first) = grout_label.get_mut(..1) {
            first.make_ascii_uppercase();
        }
        section.items.push(
            LineItem::new(
                format!("{grout_label} Grout (25lb bags)"),
                bags_needed as f64,
                "bags",
                ProductCategory::Grout,
            )
            .priced(bag_price, grout_cost)
            .notes(format!("Joint width: {joint_width}\" | ~{grout_lbs}lbs total")),
        );
        section.cost = grout_cost;
        section
    }

    fn waterproofing(&self, shower_area: f64, wall_area: f64, inputs: &CalcInputs) -> Section {
        let mut section = Section::new();
        let waterproof_type = inputs.str_or("waterproof_type", "liquid");

        if waterproof_type == "liquid" {
            // Two coats of liquid membrane, wet walls only.
            let total_area = shower_area + wall_area * 0.3;
            let gallons_needed = (total_area / 25.0).ceil() as i64;
            let price_per_gallon = money(inputs.f64_or("waterproof_price_per_gal", 45.0));
            let cost = (price_per_gallon * Decimal::from(gallons_needed)).round_dp(2);

            section.items.push(
                LineItem::new(
                    "Liquid Waterproofing Membrane",
                    gallons_needed as f64,
                    "gallons",
                    ProductCategory::Waterproofing,
                )
                .priced(price_per_gallon, cost)
                .notes(format!("2 coats, covers {total_area} sqft wet area")),
            );
            section.cost = cost;
            section
                .warnings
                .push("Apply 2 coats minimum for liquid waterproofing".to_string());
            section
                .warnings
                .push("Use fabric reinforcement at corners and transitions".to_string());
        } else if waterproof_type == "sheet" {
            let total_area = shower_area + wall_area;
            // 54" x 33' rolls, roughly 150 sqft.
            let rolls_needed = (total_area / 150.0).ceil() as i64;
            let price_per_roll = money(inputs.f64_or("waterproof_price_per_roll", 180.0));
            let cost = (price_per_roll * Decimal::from(rolls_needed)).round_dp(2);

            section.items.push(
                LineItem::new(
                    "Sheet Waterproofing Membrane (Kerdi-style)",
                    rolls_needed as f64,
                    "rolls",
                    ProductCategory::Waterproofing,
                )
                .priced(price_per_roll, cost)
                .notes(format!("~150 sqft per roll, covers {total_area} sqft")),
            );
            section.cost = cost;
            section.warnings.push("Use unmodified thinset with sheet membranes".to_string());
        }

        section
    }

    fn substrate(&self, floor_area: f64, inputs: &CalcInputs) -> Section {
        let mut section = Section::new();
        if floor_area == 0.0 {
            return section;
        }

        match inputs.str_or("needs_substrate", "none").as_str() {
            "cement_board" => {
                // 3x5 sheets, 15 sqft each.
                let sheets_needed = (floor_area / 15.0).ceil() as i64;
                let price_per_sheet = money(inputs.f64_or("backer_board_price", 12.0));
                let cost = (price_per_sheet * Decimal::from(sheets_needed)).round_dp(2);

                section.items.push(
                    LineItem::new(
                        "Cement Backer Board (3'x5' sheets)",
                        sheets_needed as f64,
                        "sheets",
                        ProductCategory::BackerBoard,
                    )
                    .priced(price_per_sheet, cost)
                    .notes(format!("Covers {floor_area} sqft floor")),
                );
                section.cost = cost;
                section
                    .warnings
                    .push("Use screws every 8\" on edges, 12\" in field".to_string());
            }
            "self_leveler" => {
                // ~50 lbs per 50 sqft at 1/8" thick.
                let lbs_needed = floor_area.ceil();
                let bags_needed = (lbs_needed / 50.0).ceil() as i64;
                let price_per_bag = money(inputs.f64_or("leveler_price_per_bag", 40.0));
                let cost = (price_per_bag * Decimal::from(bags_needed)).round_dp(2);

                section.items.push(
                    LineItem::new(
                        "Self-Leveling Compound (50lb bags)",
                        bags_needed as f64,
                        "bags",
                        ProductCategory::SelfLeveler,
                    )
                    .priced(price_per_bag, cost)
                    .notes(format!("~1/8\" thickness over {floor_area} sqft")),
                );
                section.cost = cost;
                section.warnings.push("Prime substrate before applying self-leveler".to_string());
                section.warnings.push(
                    "Mix to proper consistency - follow manufacturer specs".to_string(),
                );
            }
            _ => {}
        }

        section
    }

    fn labor(
        &self,
        floor_area: f64,
        wall_area: f64,
        shower_area: f64,
        backsplash_area: f64,
        inputs: &CalcInputs,
    ) -> Section {
        let mut section = Section::new();

        // NJ market rates per sqft.
        let areas: [(&str, f64, f64, &str); 4] = [
            (
                "Floor Tile Installation Labor",
                floor_area,
                inputs.f64_or("labor_floor_per_sqft", 8.0),
                "Professional installation",
            ),
            (
                "Wall Tile Installation Labor",
                wall_area,
                inputs.f64_or("labor_wall_per_sqft", 10.0),
                "Professional installation",
            ),
            (
                "Shower Tile Installation Labor",
                shower_area,
                inputs.f64_or("labor_shower_per_sqft", 15.0),
                "Includes waterproofing and shower-specific details",
            ),
            (
                "Backsplash Installation Labor",
                backsplash_area,
                inputs.f64_or("labor_backsplash_per_sqft", 12.0),
                "Professional installation",
            ),
        ];

        for (name, area, rate, notes) in areas {
            if area > 0.0 {
                let rate = money(rate);
                let cost = (money(area) * rate).round_dp(2);
                section.cost += cost;
                section.items.push(
                    LineItem::new(name, area, "sqft", ProductCategory::Labor)
                        .priced(rate, cost)
                        .notes(notes),
                );
            }
        }

        section
    }

    fn nj_contract(&self, project_total: Decimal, inputs: &CalcInputs) -> Section {
        let mut section = Section::new();
        let deposit_percent = inputs.decimal_or("deposit_percent", dec!(10));

        let max_deposit = crate::built_in::nj_hic_contract::max_legal_deposit(project_total);
        let requested_deposit = (project_total * deposit_percent / dec!(100)).round_dp(2);
        let deposit = requested_deposit.min(max_deposit).round_dp(2);

        if requested_deposit > max_deposit {
            section.warnings.push(format!(
                "Deposit adjusted from ${requested_deposit:.2} to ${deposit:.2} per NJ law"
            ));
        }

        section.items.push(
            LineItem::new(
                "NJ HIC Compliant Contract Deposit",
                1.0,
                "payment",
                ProductCategory::Compliance,
            )
            .priced(deposit, deposit)
            .notes(format!(
                "NJ HIC #{} | Maximum {deposit_percent}% deposit = ${deposit:.2}",
                crate::built_in::nj_hic_contract::NJ_HIC_LICENSE
            )),
        );

        section.warnings.push("Contract must include 3-day right to cancel notice".to_string());
        section.warnings.push("Provide signed contract copy within 48 hours".to_string());
        section.warnings.push("All changes require written change orders".to_string());
        section
    }

    /// Formatted multi-line project report carried in the summary under
    /// the `report` key.
    #[allow(clippy::too_many_arguments)]
    fn project_report(
        &self,
        floor_area: f64,
        wall_area: f64,
        shower_area: f64,
        backsplash_area: f64,
        total_tile_area: f64,
        tiles_ordered: i64,
        boxes_needed: i64,
        waste_tiles: i64,
        total_cost: Decimal,
    ) -> String {
        let mut areas = Vec::new();
        if floor_area > 0.0 {
            areas.push(format!("  - Floor: {floor_area} sqft"));
        }
        if wall_area > 0.0 {
            areas.push(format!("  - Wall: {wall_area} sqft"));
        }
        if shower_area > 0.0 {
            areas.push(format!("  - Shower: {shower_area} sqft"));
        }
        if backsplash_area > 0.0 {
            areas.push(format!("  - Backsplash: {backsplash_area} sqft"));
        }

        format!(
            "TILLERSTEAD COMPLETE PROJECT ESTIMATE\n\
             ======================================\n\
             Project Areas:\n\
             {}\n\
             \n\
             Total Coverage: {total_tile_area} sqft\n\
             Tiles Needed: {tiles_ordered} tiles ({boxes_needed} boxes)\n\
             Waste Factor: {waste_tiles} extra tiles\n\
             \n\
             TOTAL PROJECT COST: ${total_cost:.2}\n\
             \n\
             This estimate includes materials and labor for a complete,\n\
             TCNA-compliant tile installation.\n\
             \n\
             Licensed NJ HIC #{}",
            areas.join("\n"),
            crate::built_in::nj_hic_contract::NJ_HIC_LICENSE
        )
    }
}

impl Calculator for IntegratedProjectCalculator {
    fn type_id(&self) -> &'static str {
        "integrated_tile_project"
    }

    fn name(&self) -> &'static str {
        "Complete Tile Project Calculator"
    }

    fn description(&self) -> &'static str {
        "All-in-one calculator for tile, mortar, grout, waterproofing, and compliance"
    }

    fn category(&self) -> &'static str {
        "tile_installation"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::number("floor_area_sqft", "Square footage of floor to tile")
                .min(0.0)
                .default_value(0.0),
            FieldSpec::number("wall_area_sqft", "Square footage of walls to tile")
                .min(0.0)
                .default_value(0.0),
            FieldSpec::number(
                "shower_area_sqft",
                "Square footage of shower to tile (includes waterproofing)",
            )
            .min(0.0)
            .default_value(0.0),
            FieldSpec::number("backsplash_area_sqft", "Square footage of backsplash")
                .min(0.0)
                .default_value(0.0),
            FieldSpec::number("tile_length_in", "Tile length (inches)")
                .min(1.0)
                .default_value(12.0),
            FieldSpec::number("tile_width_in", "Tile width (inches)").min(1.0).default_value(12.0),
            FieldSpec::number("tile_price_per_sqft", "Tile price per sq ft")
                .min(0.0)
                .default_value(0.0),
            FieldSpec::number("waste_percent", "Waste percentage")
                .min(5.0)
                .max(25.0)
                .default_value(10.0),
            FieldSpec::integer("tiles_per_box", "Tiles per box").min(1.0).default_value(10i64),
            FieldSpec::boolean("include_mortar", "Include thinset/mortar").default_value(true),
            FieldSpec::boolean("include_grout", "Include grout").default_value(true),
            FieldSpec::boolean("include_substrate_prep", "Include substrate prep")
                .default_value(false),
            FieldSpec::boolean("include_labor", "Include labor estimate").default_value(true),
            FieldSpec::boolean("needs_waterproofing", "Needs waterproofing (auto for showers)")
                .default_value(false),
            FieldSpec::boolean("nj_contract", "Generate NJ HIC contract info").default_value(false),
            FieldSpec::choice(
                "trowel_size",
                "Trowel notch size",
                &["1/4x1/4", "1/4x3/8", "1/2x1/2", "3/4x3/4"],
            )
            .default_value("1/4x3/8"),
            FieldSpec::choice(
                "substrate_type",
                "Substrate type",
                &["cement_board", "plywood", "concrete", "existing_tile"],
            )
            .default_value("cement_board"),
            FieldSpec::number("mortar_price_per_bag", "Mortar price per 50lb bag")
                .default_value(25.0),
            FieldSpec::number("grout_joint_in", "Grout joint width (inches)").default_value(0.125),
            FieldSpec::choice("grout_type", "Grout type", &["sanded", "unsanded", "epoxy"])
                .default_value("sanded"),
            FieldSpec::number("grout_price_per_bag", "Grout price per 25lb bag")
                .default_value(35.0),
            FieldSpec::choice("waterproof_type", "Waterproofing type", &["liquid", "sheet"])
                .default_value("liquid"),
            FieldSpec::number("waterproof_price_per_gal", "Liquid waterproofing price per gallon")
                .default_value(45.0),
            FieldSpec::number("waterproof_price_per_roll", "Sheet membrane price per roll")
                .default_value(180.0),
            FieldSpec::choice(
                "needs_substrate",
                "Substrate prep needed",
                &["none", "cement_board", "self_leveler"],
            )
            .default_value("none"),
            FieldSpec::number("backer_board_price", "Backer board price per sheet")
                .default_value(12.0),
            FieldSpec::number("leveler_price_per_bag", "Self-leveler price per 50lb bag")
                .default_value(40.0),
            FieldSpec::number("labor_floor_per_sqft", "Floor labor rate per sq ft")
                .default_value(8.0),
            FieldSpec::number("labor_wall_per_sqft", "Wall labor rate per sq ft")
                .default_value(10.0),
            FieldSpec::number("labor_shower_per_sqft", "Shower labor rate per sq ft")
                .default_value(15.0),
            FieldSpec::number("labor_backsplash_per_sqft", "Backsplash labor rate per sq ft")
                .default_value(12.0),
            FieldSpec::number(
                "deposit_percent",
                "Desired deposit percentage (adjusted to NJ HIC law)",
            )
            .min(0.0)
            .max(33.33)
            .default_value(10.0),
        ])
    }

    /// Defaults model a typical bathroom remodel.
    fn default_inputs(&self) -> CalcInputs {
        CalcInputs::new()
            .with("floor_area_sqft", 50.0)
            .with("shower_area_sqft", 60.0)
            .with("tile_length_in", 12.0)
            .with("tile_width_in", 12.0)
            .with("tile_price_per_sqft", 5.0)
            .with("waste_percent", 10.0)
            .with("tiles_per_box", 10i64)
            .with("include_mortar", true)
            .with("include_grout", true)
            .with("include_labor", true)
            .with("needs_waterproofing", true)
            .with("waterproof_type", "liquid")
            .with("substrate_type", "cement_board")
            .with("grout_joint_in", 0.125)
            .with("nj_contract", false)
    }

    fn validate(&self, inputs: &CalcInputs) -> Vec<String> {
        let mut errors = Vec::new();
        for field in
            ["floor_area_sqft", "wall_area_sqft", "shower_area_sqft", "backsplash_area_sqft"]
        {
            if inputs.contains(field) && inputs.f64_or(field, 0.0) < 0.0 {
                errors.push(format!("{field} cannot be negative"));
            }
        }
        let waste = inputs.f64_or("waste_percent", 10.0);
        if inputs.contains("waste_percent") && !(5.0..=25.0).contains(&waste) {
            errors.push("Waste percent must be between 5 and 25".to_string());
        }
        errors
    }

    fn calculate(&self, inputs: &CalcInputs) -> Result<CalculatorResult, CalcError> {
        let floor_area = inputs.f64_or("floor_area_sqft", 0.0);
        let wall_area = inputs.f64_or("wall_area_sqft", 0.0);
        let shower_area = inputs.f64_or("shower_area_sqft", 0.0);
        let backsplash_area = inputs.f64_or("backsplash_area_sqft", 0.0);
        let total_tile_area = floor_area + wall_area + shower_area + backsplash_area;

        let mut result = CalculatorResult::new(self.type_id());
        result.inputs = inputs.to_map();

        if total_tile_area == 0.0 {
            result
                .warnings
                .push("No areas specified. Provide at least one area to calculate.".to_string());
            result.summary.insert("report".into(), "No areas specified".into());
            return Ok(result);
        }

        let tile_length = inputs.f64_or("tile_length_in", 12.0);
        let tile_width = inputs.f64_or("tile_width_in", 12.0);
        let mut waste_percent = inputs.f64_or("waste_percent", 10.0);

        let mut warnings = Vec::new();
        let is_large_format = tile_length >= 15.0 || tile_width >= 15.0;
        if is_large_format {
            warnings.push("Large format tile detected - using medium bed mortar".to_string());
            if waste_percent < 15.0 {
                waste_percent = 15.0;
                warnings
                    .push("Waste percentage increased to 15% for large format tile".to_string());
            }
        }

        let mut line_items = Vec::new();
        let mut total_cost = Decimal::ZERO;

        let (tile_section, tiles_ordered, boxes_needed, waste_tiles) =
            self.tiles(total_tile_area, tile_length, tile_width, waste_percent, inputs)?;
        line_items.extend(tile_section.items);
        total_cost += tile_section.cost;

        if inputs.bool_or("include_mortar", true) {
            let section = self.mortar(total_tile_area, is_large_format, inputs);
            line_items.extend(section.items);
            total_cost += section.cost;
            warnings.extend(section.warnings);
        }

        if inputs.bool_or("include_grout", true) {
            let section = self.grout(total_tile_area, inputs);
            line_items.extend(section.items);
            total_cost += section.cost;
            warnings.extend(section.warnings);
        }

        if shower_area > 0.0 || inputs.bool_or("needs_waterproofing", false) {
            let section = self.waterproofing(shower_area, wall_area, inputs);
            line_items.extend(section.items);
            total_cost += section.cost;
            warnings.extend(section.warnings);
        }

        if inputs.bool_or("include_substrate_prep", true) {
            let section = self.substrate(floor_area, inputs);
            line_items.extend(section.items);
            total_cost += section.cost;
            warnings.extend(section.warnings);
        }

        if inputs.bool_or("include_labor", true) {
            let section = self.labor(floor_area, wall_area, shower_area, backsplash_area, inputs);
            line_items.extend(section.items);
            total_cost += section.cost;
        }

        if inputs.bool_or("nj_contract", false) {
            let section = self.nj_contract(total_cost, inputs);
            line_items.extend(section.items);
            warnings.extend(section.warnings);
        }

        // Disclaimers always lead the warning list.
        let mut all_warnings = vec![
            "ESTIMATION TOOL ONLY - Not a binding estimate, quote, or invoice".to_string(),
            "LEGAL DISCLAIMER: This calculator provides approximate material and cost estimates \
             for planning purposes only. Actual project costs may vary based on site conditions, \
             material availability, labor rates, and unforeseen circumstances. This is NOT a \
             contract, proposal, or binding estimate. For an official quote, contact Tillerstead \
             LLC directly."
                .to_string(),
            "NJ HIC LICENSE: Tillerstead LLC #13VH10808800 - All work subject to signed contract \
             and NJ Home Improvement Contractor Act compliance"
                .to_string(),
        ];
        all_warnings.extend(warnings);

        let mut resolved = inputs.clone();
        resolved.set("waste_percent", waste_percent);
        result.inputs = resolved.to_map();
        result.line_items = line_items;
        result.warnings = all_warnings;

        result.summary.insert("floor_area_sqft".into(), floor_area.into());
        result.summary.insert("wall_area_sqft".into(), wall_area.into());
        result.summary.insert("shower_area_sqft".into(), shower_area.into());
        result.summary.insert("backsplash_area_sqft".into(), backsplash_area.into());
        result.summary.insert("total_tile_area_sqft".into(), total_tile_area.into());
        result.summary.insert("tiles_ordered".into(), tiles_ordered.into());
        result.summary.insert("boxes_needed".into(), boxes_needed.into());
        result.summary.insert("waste_tiles".into(), waste_tiles.into());
        result.summary.insert("total_project_cost".into(), total_cost.into());
        result.summary.insert(
            "report".into(),
            self.project_report(
                floor_area,
                wall_area,
                shower_area,
                backsplash_area,
                total_tile_area,
                tiles_ordered,
                boxes_needed,
                waste_tiles,
                total_cost,
            )
            .into(),
        );

        result
            .metadata
            .insert("disclaimer".into(), "Estimation tool only - not a binding quote or contract".into());
        result.metadata.insert("license".into(), "NJ HIC #13VH10808800".into());
        result.metadata.insert(
            "requires_site_visit".into(),
            "Yes - actual conditions may affect final pricing".into(),
        );
        result.metadata.insert("not_binding".into(), true.into());
        result.metadata.insert("is_large_format".into(), is_large_format.into());

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_areas_short_circuits_with_warning() {
        let calc = IntegratedProjectCalculator;
        let inputs = CalcInputs::new()
            .with("floor_area_sqft", 0.0)
            .with("shower_area_sqft", 0.0);
        let result = calc.calculate(&inputs).unwrap();
        assert!(result.line_items.is_empty());
        assert!(result.warnings[0].contains("No areas specified"));
    }

    #[test]
    fn summary_carries_formatted_report() {
        let calc = IntegratedProjectCalculator;
        let result = calc.run(&CalcInputs::new()).unwrap();
        let report = result.summary["report"].as_str().unwrap();
        assert!(report.starts_with("TILLERSTEAD COMPLETE PROJECT ESTIMATE"));
        assert!(report.contains("  - Floor: 50 sqft"));
        assert!(report.contains("  - Shower: 60 sqft"));
        assert!(report.contains("Total Coverage: 110 sqft"));
        assert!(report.contains("TOTAL PROJECT COST: $"));
        assert!(report.contains("Licensed NJ HIC #13VH10808800"));
        // Disabled areas stay out of the report
        assert!(!report.contains("Wall:"));
    }

    #[test]
    fn zero_area_report_notes_missing_areas() {
        let calc = IntegratedProjectCalculator;
        let inputs = CalcInputs::new()
            .with("floor_area_sqft", 0.0)
            .with("shower_area_sqft", 0.0);
        let result = calc.calculate(&inputs).unwrap();
        assert_eq!(result.summary["report"].as_str(), Some("No areas specified"));
    }

    #[test]
    fn default_bathroom_remodel_totals() {
        let calc = IntegratedProjectCalculator;
        let result = calc.run(&CalcInputs::new()).unwrap();
        // 110 sqft at 10% waste, 12x12 tile: 121 tiles -> 13 boxes -> 130 ordered
        assert_eq!(result.summary["tiles_ordered"].as_i64(), Some(130));
        assert_eq!(result.summary["boxes_needed"].as_i64(), Some(13));
        // Sections: tile, mortar, grout, waterproofing, floor labor, shower labor
        assert!(result.line_items.iter().any(|i| i.category == ProductCategory::Waterproofing));
        assert!(result.line_items.iter().any(|i| i.category == ProductCategory::Labor));
        let total = result.summary["total_project_cost"].as_decimal().unwrap();
        assert!(total > Decimal::ZERO);
    }

    #[test]
    fn disclaimers_always_lead() {
        let calc = IntegratedProjectCalculator;
        let result = calc.run(&CalcInputs::new()).unwrap();
        assert!(result.warnings[0].contains("ESTIMATION TOOL ONLY"));
        assert!(result.warnings[1].contains("LEGAL DISCLAIMER"));
        assert!(result.warnings[2].contains("NJ HIC LICENSE"));
    }

    #[test]
    fn large_format_switches_to_medium_bed_and_raises_waste() {
        let calc = IntegratedProjectCalculator;
        let inputs = CalcInputs::new()
            .with("floor_area_sqft", 100.0)
            .with("tile_length_in", 24.0)
            .with("tile_width_in", 24.0)
            .with("waste_percent", 10.0);
        let result = calc.run(&inputs).unwrap();
        assert_eq!(result.inputs["waste_percent"].as_f64(), Some(15.0));
        assert!(result.line_items.iter().any(|i| i.name.contains("Medium Bed Mortar")));
    }

    #[test]
    fn toggling_labor_off_leaves_other_sections() {
        let calc = IntegratedProjectCalculator;
        let with_labor = calc.run(&CalcInputs::new()).unwrap();
        let without =
            calc.run(&CalcInputs::new().with("include_labor", false)).unwrap();
        assert!(!without.line_items.iter().any(|i| i.category == ProductCategory::Labor));
        let material_items = |r: &CalculatorResult| {
            r.line_items
                .iter()
                .filter(|i| i.category != ProductCategory::Labor)
                .count()
        };
        assert_eq!(material_items(&with_labor), material_items(&without));
    }

    #[test]
    fn nj_contract_deposit_clamped() {
        let calc = IntegratedProjectCalculator;
        let inputs = CalcInputs::new()
            .with("floor_area_sqft", 20.0)
            .with("include_labor", false)
            .with("include_mortar", false)
            .with("include_grout", false)
            .with("tile_price_per_sqft", 100.0)
            .with("nj_contract", true)
            .with("deposit_percent", 33.0);
        // Project total 2000: max deposit min(2000/3, 1000) = 666.67; requested 660 passes
        let result = calc.run(&inputs).unwrap();
        let deposit = result
            .line_items
            .iter()
            .find(|i| i.name.contains("Contract Deposit"))
            .unwrap();
        assert_eq!(deposit.total_price, Some(dec!(660)));
    }
}
