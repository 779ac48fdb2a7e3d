//! Request handlers for the calculator API.

use crate::AppState;
use crate::bom::{self, BomOptions, BomSummary};
use crate::error::ApiError;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use trowel_calculator::categories;
use trowel_calculator::contract::InputSchema;
use trowel_calculator::CalcInputs;
use trowel_types::{CalculatorInfo, CalculatorResult};

/// One calculator in a discovery listing, with its category placement.
#[derive(Debug, Serialize)]
pub struct CalculatorSummary {
    #[serde(flatten)]
    pub info: CalculatorInfo,
    pub category_name: String,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub badge: &'static str,
}

fn summarize(info: CalculatorInfo) -> CalculatorSummary {
    let category = categories::category_of(&info.type_id);
    let category_name = categories::category_info(category)
        .map_or_else(String::new, |group| group.name.to_string());
    let badge = categories::badge_for(&info.type_id);
    CalculatorSummary { info, category_name, badge }
}

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "trowel-api",
        "calculators": state.registry.len(),
    }))
}

pub async fn list_calculators(State(state): State<AppState>) -> Json<Vec<CalculatorSummary>> {
    let listed = state.registry.list_all().into_iter().map(summarize).collect();
    Json(listed)
}

pub async fn list_categories() -> Json<Vec<&'static categories::CategoryGroup>> {
    Json(categories::all_categories())
}

/// Full discovery record for one calculator: schema, defaults and
/// category placement, enough to render an input form.
#[derive(Debug, Serialize)]
pub struct CalculatorDetail {
    pub type_id: String,
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub category_name: String,
    pub category_icon: String,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub badge: &'static str,
    pub input_schema: InputSchema,
    pub default_inputs: CalcInputs,
}

pub async fn get_calculator(
    State(state): State<AppState>,
    Path(calculator_type): Path<String>,
) -> Result<Json<CalculatorDetail>, ApiError> {
    let calculator = state.registry.get(&calculator_type)?;
    let category = categories::category_of(calculator.type_id());
    let group = categories::category_info(category);
    Ok(Json(CalculatorDetail {
        type_id: calculator_type,
        name: calculator.name(),
        description: calculator.description(),
        category,
        category_name: group.map_or_else(String::new, |g| g.name.to_string()),
        category_icon: group.map_or_else(String::new, |g| g.icon.to_string()),
        badge: categories::badge_for(calculator.type_id()),
        input_schema: calculator.input_schema(),
        default_inputs: calculator.default_inputs(),
    }))
}

/// Runs a calculation. The body is an open mapping of input fields;
/// absent fields fall back to the calculator's defaults, so an empty or
/// missing body computes the default scenario.
pub async fn run_calculation(
    State(state): State<AppState>,
    Path(calculator_type): Path<String>,
    body: Option<Json<serde_json::Value>>,
) -> Result<Json<CalculatorResult>, ApiError> {
    let calculator = state.registry.get(&calculator_type)?;
    let inputs = body.map(|Json(value)| CalcInputs::from_json(&value)).unwrap_or_default();
    let result = calculator.run(&inputs)?;
    tracing::info!(calculator = %calculator_type, items = result.line_items.len(), "calculation complete");
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

pub async fn search_calculators(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<CalculatorSummary>>, ApiError> {
    let needle = query.q.trim().to_lowercase();
    if needle.len() < 2 {
        return Err(ApiError::Validation {
            errors: vec!["Search query must be at least 2 characters".to_string()],
        });
    }
    let hits = state
        .registry
        .list_all()
        .into_iter()
        .filter(|info| {
            let mut haystack = categories::search_terms_for(&info.type_id);
            haystack.push(info.name.to_lowercase());
            haystack.push(info.description.to_lowercase());
            haystack.iter().any(|term| term.contains(&needle))
        })
        .map(summarize)
        .collect();
    Ok(Json(hits))
}

/// A previously computed result plus the percentage knobs to roll it up
/// with. Omitted knobs take the NJ contractor defaults.
#[derive(Debug, Deserialize)]
pub struct BomRequest {
    pub result: CalculatorResult,
    #[serde(default)]
    pub options: BomOptions,
}

pub async fn export_bom(Json(request): Json<BomRequest>) -> Json<BomSummary> {
    Json(bom::rollup(&request.result, &request.options))
}

pub async fn export_bom_csv(
    Json(request): Json<BomRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = bom::rollup(&request.result, &request.options);
    let csv = summary
        .to_csv()
        .map_err(|e| ApiError::Internal { message: e.to_string() })?;
    let filename = format!(
        "bom_{}_{}.csv",
        summary.calculator_type,
        chrono::Utc::now().format("%Y%m%d")
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename={filename}")),
        ],
        csv,
    ))
}
