//! HTTP-level integration tests for the Benefits Entitlement Engine.
//!
//! Covers the end-to-end scenarios a caller sees over the wire:
//! - Private renter with a housing shortfall
//! - Families hitting every tier
//! - Policy documents loaded from disk and from memory
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use entitlement_engine::api::{AppState, create_router};
use entitlement_engine::config::{ConfigLoader, DocumentFormat, PolicyConfig};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    create_router(AppState::new(ConfigLoader::compiled_default()))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a money field, which must be a JSON number.
fn decimal_field(value: &Value, key: &str) -> Decimal {
    assert!(
        value[key].is_number(),
        "{key} should be a JSON number, got {}",
        value[key]
    );
    decimal(&value[key].to_string())
}

fn ids(items: &Value) -> Vec<String> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

async fn post(router: Router, uri: &str, body: String) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post_assess(router: Router, body: Value) -> (StatusCode, Value) {
    post(router, "/assess", body.to_string()).await
}

fn create_profile(tenure: &str, rent: &str, adults: u32, children: u32, income: &str) -> Value {
    json!({
        "postcode": "PO1 2AL",
        "tenure": tenure,
        "rentAmount": rent,
        "adults": adults,
        "children": children,
        "isDisabled": false,
        "netMonthlyIncome": income,
        "hasUC": false,
        "isSouthernWater": false
    })
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn test_single_private_renter_scenario() {
    let profile = create_profile("rent_private", "700", 1, 0, "1200");
    let (status, body) = post_assess(create_router_for_test(), profile).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_field(&body, "monthlyShortfall"), decimal("75"));
    assert_eq!(decimal_field(&body, "unclaimedValue"), decimal("379.225"));
    assert_eq!(ids(&body["recommendations"]), vec!["dhp", "uc_apply"]);
    assert_eq!(ids(&body["alerts"]), vec!["cts_discount"]);
    assert_eq!(body["alerts"][0]["type"], "opportunity");
}

#[tokio::test]
async fn test_dhp_recommendation_wire_shape() {
    let profile = create_profile("rent_private", "700", 1, 0, "1200");
    let (_, body) = post_assess(create_router_for_test(), profile).await;

    let dhp = &body["recommendations"][0];
    assert_eq!(dhp["priority"], "high");
    assert!(dhp["shortDescription"].as_str().unwrap().contains("75"));
    assert!(dhp["longDescription"].is_string());
    assert!(!dhp["orderedSteps"].as_array().unwrap().is_empty());
    assert!(dhp["externalLink"].is_string());
    assert_eq!(dhp["issuingAuthority"], "Portsmouth City Council");
}

#[tokio::test]
async fn test_family_hits_every_tier_in_order() {
    let mut profile = create_profile("rent_social", "1000", 1, 2, "700");
    profile["isSouthernWater"] = json!(true);

    let (status, body) = post_assess(create_router_for_test(), profile).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        ids(&body["recommendations"]),
        vec!["dhp", "uc_apply", "water_essentials"]
    );
    assert_eq!(ids(&body["alerts"]), vec!["cts_discount", "fsm_cliff"]);
    assert_eq!(body["alerts"][1]["type"], "warning");
}

#[tokio::test]
async fn test_owner_with_existing_claim_gets_empty_assessment() {
    let mut profile = create_profile("owner", "0", 2, 0, "3000");
    profile["hasUC"] = json!(true);

    let (status, body) = post_assess(create_router_for_test(), profile).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_field(&body, "monthlyShortfall"), Decimal::ZERO);
    assert_eq!(decimal_field(&body, "unclaimedValue"), Decimal::ZERO);
    assert!(body["recommendations"].as_array().unwrap().is_empty());
    assert!(body["alerts"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_numeric_money_fields_are_accepted() {
    let mut profile = create_profile("rent_private", "700", 1, 0, "1200");
    profile["rentAmount"] = json!(700);
    profile["netMonthlyIncome"] = json!(1200.0);

    let (status, body) = post_assess(create_router_for_test(), profile).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_field(&body, "monthlyShortfall"), decimal("75"));
}

#[tokio::test]
async fn test_assessments_are_byte_identical() {
    let profile = create_profile("rent_private", "850", 2, 3, "950");

    let (_, first) = post_assess(create_router_for_test(), profile.clone()).await;
    let (_, second) = post_assess(create_router_for_test(), profile).await;

    assert_eq!(first.to_string(), second.to_string());
}

// =============================================================================
// Explain and policy endpoints
// =============================================================================

#[tokio::test]
async fn test_explain_trace_is_numbered_in_tier_order() {
    let profile = create_profile("rent_private", "700", 1, 0, "1200");
    let (status, body) = post(
        create_router_for_test(),
        "/assess/explain",
        profile.to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["policyVersion"], "2024-25");

    let steps = body["auditTrace"]["steps"].as_array().unwrap();
    let rule_ids: Vec<&str> = steps.iter().map(|s| s["ruleId"].as_str().unwrap()).collect();
    assert_eq!(
        rule_ids,
        vec![
            "uc_standard_allowance",
            "uc_housing_element",
            "uc_taper",
            "uc_apply",
            "cts_discount",
            "water_essentials",
            "fsm_cliff"
        ]
    );
    for (index, step) in steps.iter().enumerate() {
        assert_eq!(step["stepNumber"], json!(index + 1));
        assert!(step["policyRef"].is_string());
    }
    assert_eq!(
        decimal_field(&body["assessment"], "monthlyShortfall"),
        decimal("75")
    );
}

#[tokio::test]
async fn test_policy_endpoint_reports_loaded_document() {
    let config = ConfigLoader::load("./config/policy.yaml").unwrap();
    let router = create_router(AppState::new(config));

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/policy")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let policy: PolicyConfig = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(policy, PolicyConfig::default());
}

#[tokio::test]
async fn test_custom_policy_changes_the_outcome() {
    let mut policy = PolicyConfig::default();
    policy.version = "2025-26-draft".to_string();
    policy.lha_caps.bed1 = decimal("700");
    let document = serde_json::to_string(&policy).unwrap();

    let config =
        ConfigLoader::from_document(&document, DocumentFormat::Json, "draft.json").unwrap();
    let router = create_router(AppState::new(config));

    let profile = create_profile("rent_private", "700", 1, 0, "1200");
    let (status, body) = post(router, "/assess/explain", profile.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["policyVersion"], "2025-26-draft");
    assert_eq!(
        decimal_field(&body["assessment"], "monthlyShortfall"),
        Decimal::ZERO
    );
    assert_eq!(ids(&body["assessment"]["recommendations"]), vec!["uc_apply"]);
}

#[tokio::test]
async fn test_broken_policy_falls_back_to_default() {
    let config = ConfigLoader::load_or_default(Some("./tests/fixtures/partial_policy.yaml"));
    let router = create_router(AppState::new(config));

    let profile = create_profile("rent_private", "700", 1, 0, "1200");
    let (status, body) = post_assess(router, profile).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_field(&body, "monthlyShortfall"), decimal("75"));
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_negative_income_is_rejected() {
    let profile = create_profile("rent_private", "700", 1, 0, "-1");
    let (status, body) = post_assess(create_router_for_test(), profile).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PROFILE");
    assert!(body["message"].as_str().unwrap().contains("netMonthlyIncome"));
}

#[tokio::test]
async fn test_negative_rent_is_rejected() {
    let profile = create_profile("rent_private", "-700", 1, 0, "1200");
    let (status, body) = post_assess(create_router_for_test(), profile).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PROFILE");
}

#[tokio::test]
async fn test_income_beyond_ceiling_is_rejected() {
    let profile = create_profile("rent_private", "700", 1, 0, "7000000000000000000000000000");
    let (status, body) = post_assess(create_router_for_test(), profile).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PROFILE");
    assert!(body["message"].as_str().unwrap().contains("netMonthlyIncome"));
}

#[tokio::test]
async fn test_income_at_ceiling_is_assessed() {
    let mut profile = create_profile("rent_private", "700", 1, 0, "10000000");
    profile["isSouthernWater"] = json!(true);

    let (status, body) = post_assess(create_router_for_test(), profile).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_field(&body, "monthlyShortfall"), decimal("75"));
    assert_eq!(ids(&body["recommendations"]), vec!["dhp"]);
}

#[tokio::test]
async fn test_unknown_tenure_is_rejected() {
    let profile = create_profile("rent_council", "700", 1, 0, "1200");
    let (status, body) = post_assess(create_router_for_test(), profile).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_missing_has_uc_is_rejected() {
    let mut profile = create_profile("rent_private", "700", 1, 0, "1200");
    profile.as_object_mut().unwrap().remove("hasUC");

    let (status, body) = post_assess(create_router_for_test(), profile).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().contains("hasUC"));
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let (status, body) = post(
        create_router_for_test(),
        "/assess/explain",
        "{\"tenure\":".to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}
