//! Built-in calculators.
//!
//! One module per calculator. Physical-quantity calculators use plain
//! floating point; dollar-denominated calculators (NJ tax, contracts,
//! permits, bid and seasonal pricing) use exact decimals.

pub mod competitive_bid;
pub mod drywall_compound;
pub mod large_format_tile;
pub mod nj_hic_contract;
pub mod nj_permit_estimator;
pub mod nj_sales_tax;
pub mod seasonal_pricing;
pub mod shower_pan_liner;
pub mod thinset_mortar;
pub mod tile_floor;
