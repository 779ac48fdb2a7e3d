use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use trowel_api::create_app;

fn server() -> TestServer {
    TestServer::new(create_app()).unwrap()
}

#[tokio::test]
async fn health_reports_calculator_count() {
    let server = server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["calculators"], 11);
}

#[tokio::test]
async fn lists_every_calculator_with_category() {
    let server = server();
    let response = server.get("/calculators").await;
    response.assert_status_ok();
    let body: Value = response.json();
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 11);
    assert_eq!(listed[0]["type_id"], "integrated_tile_project");
    assert_eq!(listed[0]["category_name"], "Complete Project Calculators");
}

#[tokio::test]
async fn categories_come_back_in_priority_order() {
    let server = server();
    let response = server.get("/calculators/categories").await;
    response.assert_status_ok();
    let body: Value = response.json();
    let groups = body.as_array().unwrap();
    assert_eq!(groups[0]["id"], "complete_projects");
    assert_eq!(groups[0]["badge"], "RECOMMENDED");
}

#[tokio::test]
async fn calculator_detail_exposes_schema_and_defaults() {
    let server = server();
    let response = server.get("/calculators/tile_floor").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["type_id"], "tile_floor");
    assert_eq!(body["category"], "tile_installation");
    assert!(body["input_schema"]["fields"].as_array().unwrap().len() > 3);
    assert_eq!(body["default_inputs"]["tile_length_in"], 12.0);
}

#[tokio::test]
async fn unknown_calculator_is_404() {
    let server = server();
    let response = server.get("/calculators/quantum_tile").await;
    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn calculate_happy_path() {
    let server = server();
    let response = server
        .post("/calculators/tile_floor/calculate")
        .json(&json!({ "area_sqft": 100.0, "waste_percent": 10.0 }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["calculator_type"], "tile_floor");
    assert_eq!(body["summary"]["tiles_needed"], 110);
    assert_eq!(body["summary"]["boxes_needed"], 11);
}

#[tokio::test]
async fn empty_body_computes_the_default_scenario() {
    let server = server();
    let response = server
        .post("/calculators/seasonal_pricing_optimizer/calculate")
        .json(&json!({}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["summary"]["month"], "January");
}

#[tokio::test]
async fn validation_failure_returns_structured_422() {
    let server = server();
    let response = server
        .post("/calculators/thinset_mortar/calculate")
        .json(&json!({ "area_sqft": -5.0 }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    let errors = body["errors"].as_array().unwrap();
    assert!(errors.iter().any(|e| e.as_str().unwrap().contains("positive")));
}

#[tokio::test]
async fn unknown_calculate_target_is_404_not_422() {
    let server = server();
    let response = server
        .post("/calculators/quantum_tile/calculate")
        .json(&json!({ "area_sqft": 100.0 }))
        .await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn search_matches_tags_and_names() {
    let server = server();
    let response = server.get("/calculators/search").add_query_param("q", "tax").await;
    response.assert_status_ok();
    let body: Value = response.json();
    let hits = body.as_array().unwrap();
    assert!(hits.iter().any(|h| h["type_id"] == "nj_sales_tax"));
}

#[tokio::test]
async fn short_search_query_is_rejected() {
    let server = server();
    let response = server.get("/calculators/search").add_query_param("q", "t").await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn bom_export_rolls_up_a_calculation() {
    let server = server();
    let calc = server
        .post("/calculators/nj_sales_tax/calculate")
        .json(&json!({ "materials_cost": 1000.0, "labor_cost": 500.0 }))
        .await;
    calc.assert_status_ok();
    let result: Value = calc.json();

    let response = server
        .post("/exports/bom")
        .json(&json!({
            "result": result,
            "options": {
                "overhead_percent": "0",
                "profit_percent": "0",
                "tax_percent": "0",
                "contingency_percent": "0"
            }
        }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["calculator_type"], "nj_sales_tax");
    assert_eq!(body["total_items"], body["priced_items"]);
}

#[tokio::test]
async fn bom_csv_export_sets_attachment_headers() {
    let server = server();
    let calc = server.post("/calculators/nj_sales_tax/calculate").json(&json!({})).await;
    let result: Value = calc.json();

    let response = server.post("/exports/bom/csv").json(&json!({ "result": result })).await;
    response.assert_status_ok();
    let content_type = response.header("content-type");
    assert!(content_type.to_str().unwrap().starts_with("text/csv"));
    let body = response.text();
    assert!(body.starts_with("Name,Category,Qty,Unit,Unit Price,Extended Price,Notes"));
    assert!(body.contains("Grand Total"));
}
