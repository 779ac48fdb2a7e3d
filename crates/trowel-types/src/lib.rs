//! Trowel Types
//!
//! This crate defines the value types shared by the Trowel estimating
//! ecosystem (`trowel-calculator` and `trowel-api`): the dynamic
//! [`CalcValue`] scalar used for calculator inputs and summaries, the
//! [`ProductCategory`] tags, and the [`LineItem`]/[`CalculatorResult`]
//! output shapes. Keeping them here eliminates circular dependencies
//! between the engine and the API layer.

mod category;
mod result;
mod value;

pub use category::ProductCategory;
pub use result::{CalculatorInfo, CalculatorResult, LineItem};
pub use value::CalcValue;
