//! Process-wide calculator registry.
//!
//! Populated once at startup through [`Registry::with_builtins`] and
//! read-only afterwards, so lookups need no locking. Registration order is
//! preserved for discovery listings.

use crate::contract::Calculator;
use crate::error::CalcError;
use std::collections::HashMap;
use trowel_types::CalculatorInfo;

pub struct Registry {
    calculators: HashMap<String, Box<dyn Calculator>>,
    // list_all reports calculators in registration order; HashMap alone
    // would lose it.
    order: Vec<String>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self { calculators: HashMap::new(), order: Vec::new() }
    }

    /// Associates a calculator with its type id. Re-registering the same
    /// id overwrites silently (last registration wins) and keeps the
    /// original position.
    pub fn register(&mut self, calculator: Box<dyn Calculator>) {
        let type_id = calculator.type_id().to_string();
        if self.calculators.insert(type_id.clone(), calculator).is_none() {
            self.order.push(type_id);
        }
    }

    pub fn get(&self, type_id: &str) -> Result<&dyn Calculator, CalcError> {
        self.calculators
            .get(type_id)
            .map(Box::as_ref)
            .ok_or_else(|| CalcError::UnknownCalculator { type_id: type_id.to_string() })
    }

    /// Discovery metadata for every registered calculator, in
    /// registration order.
    pub fn list_all(&self) -> Vec<CalculatorInfo> {
        self.order
            .iter()
            .filter_map(|id| self.calculators.get(id))
            .map(|calc| CalculatorInfo {
                type_id: calc.type_id().to_string(),
                name: calc.name().to_string(),
                description: calc.description().to_string(),
                category: calc.category().to_string(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Registry wired with every built-in calculator. Called once at
    /// process start.
    pub fn with_builtins() -> Self {
        use crate::built_in::{
            competitive_bid::CompetitiveBidAnalyzer, drywall_compound::DrywallCompoundCalculator,
            large_format_tile::LargeFormatTileCalculator, nj_hic_contract::NjHicContractCalculator,
            nj_permit_estimator::NjPermitEstimator, nj_sales_tax::NjSalesTaxCalculator,
            seasonal_pricing::SeasonalPricingOptimizer, shower_pan_liner::ShowerPanLinerCalculator,
            thinset_mortar::ThinsetMortarCalculator, tile_floor::TileFloorCalculator,
        };
        use crate::integrated::IntegratedProjectCalculator;

        let mut registry = Self::new();
        registry.register(Box::new(IntegratedProjectCalculator));
        registry.register(Box::new(TileFloorCalculator));
        registry.register(Box::new(ThinsetMortarCalculator));
        registry.register(Box::new(DrywallCompoundCalculator));
        registry.register(Box::new(LargeFormatTileCalculator));
        registry.register(Box::new(ShowerPanLinerCalculator));
        registry.register(Box::new(NjSalesTaxCalculator));
        registry.register(Box::new(NjHicContractCalculator));
        registry.register(Box::new(NjPermitEstimator));
        registry.register(Box::new(CompetitiveBidAnalyzer));
        registry.register(Box::new(SeasonalPricingOptimizer));
        registry
    }
}
