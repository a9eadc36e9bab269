//! Integration tests for the Leave Engine HTTP API.
//!
//! This test suite covers:
//! - Employee registration and listing with balances
//! - Leave application, overlap conflicts and soft balance warnings
//! - Approve/reject decisions and their terminality
//! - Balance and history lookups
//! - Error bodies and status codes

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use leave_engine::api::{create_router, AppState};
use leave_engine::config::LeavePolicy;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    create_router(AppState::in_memory(LeavePolicy::default()))
}

fn create_router_with_allowance(days: u32) -> Router {
    create_router(AppState::in_memory(LeavePolicy {
        default_annual_allowance: days,
        ..LeavePolicy::default()
    }))
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

async fn create_employee(router: &Router, name: &str, email: &str) -> Value {
    let (status, body) = send(
        router,
        "POST",
        "/employees",
        Some(json!({
            "name": name,
            "email": email,
            "department": "Engineering",
            "joining_date": "2023-01-02"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "body: {}", body);
    body
}

async fn apply(router: &Router, employee_id: &Value, start: &str, end: &str) -> (StatusCode, Value) {
    send(
        router,
        "POST",
        "/leaves/apply",
        Some(json!({
            "employee_id": employee_id,
            "start_date": start,
            "end_date": end
        })),
    )
    .await
}

async fn decide(router: &Router, leave_id: &Value, action: &str) -> (StatusCode, Value) {
    send(router, "POST", &format!("/leaves/{}/{}", leave_id, action), None).await
}

// =============================================================================
// Employees
// =============================================================================

#[tokio::test]
async fn test_create_employee_returns_record_with_balance() {
    let router = create_router_for_test();
    let body = create_employee(&router, "Ada", "ada@example.com").await;

    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["joining_date"], "2023-01-02");
    assert_eq!(body["annual_allowance"], 20);
    assert_eq!(body["leave_balance"], 20);
}

#[tokio::test]
async fn test_duplicate_email_is_bad_request() {
    let router = create_router_for_test();
    create_employee(&router, "Ada", "ada@example.com").await;

    let (status, body) = send(
        &router,
        "POST",
        "/employees",
        Some(json!({
            "name": "Another Ada",
            "email": "ada@example.com",
            "department": "Sales",
            "joining_date": "2023-05-01"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Email already exists");
}

#[tokio::test]
async fn test_unparsable_joining_date_is_bad_request() {
    let router = create_router_for_test();
    let (status, body) = send(
        &router,
        "POST",
        "/employees",
        Some(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "department": "Engineering",
            "joining_date": "yesterday"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("joining_date"));
}

#[tokio::test]
async fn test_missing_field_is_bad_request() {
    let router = create_router_for_test();
    let (status, body) = send(
        &router,
        "POST",
        "/employees",
        Some(json!({
            "name": "Ada",
            "department": "Engineering",
            "joining_date": "2023-01-02"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let router = create_router_for_test();
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/employees")
                .header("Content-Type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["detail"].as_str().unwrap().contains("Invalid JSON"));
}

#[tokio::test]
async fn test_list_employees_in_creation_order_with_balances() {
    let router = create_router_for_test();
    let ada = create_employee(&router, "Ada", "ada@example.com").await;
    create_employee(&router, "Bob", "bob@example.com").await;

    let (_, application) = apply(&router, &ada["id"], "2024-03-01", "2024-03-04").await;
    decide(&router, &application["leave"]["id"], "Approve").await;

    let (status, body) = send(&router, "GET", "/employees", None).await;
    assert_eq!(status, StatusCode::OK);
    let employees = body.as_array().unwrap();
    assert_eq!(employees.len(), 2);
    assert_eq!(employees[0]["name"], "Ada");
    assert_eq!(employees[0]["leave_balance"], 16);
    assert_eq!(employees[1]["name"], "Bob");
    assert_eq!(employees[1]["leave_balance"], 20);
}

#[tokio::test]
async fn test_get_employee_by_id() {
    let router = create_router_for_test();
    let ada = create_employee(&router, "Ada", "ada@example.com").await;

    let (status, body) = send(&router, "GET", &format!("/employees/{}", ada["id"]), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, ada);

    let (status, body) = send(&router, "GET", "/employees/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Employee not found: 99");
}

// =============================================================================
// Leave applications
// =============================================================================

#[tokio::test]
async fn test_apply_leave_creates_pending_request() {
    let router = create_router_for_test();
    let ada = create_employee(&router, "Ada", "ada@example.com").await;

    let (status, body) = apply(&router, &ada["id"], "2024-03-01", "2024-03-05").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["leave"]["status"], "Pending");
    assert_eq!(body["leave"]["employee_id"], ada["id"]);
    assert_eq!(body["leave"]["start_date"], "2024-03-01");
    assert_eq!(body["leave"]["end_date"], "2024-03-05");
    assert!(body["leave"]["created_at"].is_string());
    assert!(body.get("warning").is_none());
}

#[tokio::test]
async fn test_apply_for_unknown_employee_is_not_found() {
    let router = create_router_for_test();
    let (status, body) = apply(&router, &json!(42), "2024-03-01", "2024-03-05").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Employee not found: 42");
}

#[tokio::test]
async fn test_end_before_start_is_bad_request() {
    let router = create_router_for_test();
    let ada = create_employee(&router, "Ada", "ada@example.com").await;
    let (status, _) = apply(&router, &ada["id"], "2024-03-05", "2024-03-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_leave_before_joining_is_bad_request() {
    let router = create_router_for_test();
    let ada = create_employee(&router, "Ada", "ada@example.com").await;
    let (status, body) = apply(&router, &ada["id"], "2022-12-20", "2022-12-22").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("joining date"));
}

#[tokio::test]
async fn test_overlap_is_conflict_and_adjacent_range_succeeds() {
    let router = create_router_for_test();
    let ada = create_employee(&router, "Ada", "ada@example.com").await;

    let (status, _) = apply(&router, &ada["id"], "2024-01-10", "2024-01-15").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = apply(&router, &ada["id"], "2024-01-12", "2024-01-20").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["detail"].as_str().unwrap().contains("Overlapping"));

    let (status, _) = apply(&router, &ada["id"], "2024-01-16", "2024-01-20").await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_over_allowance_application_warns_but_succeeds() {
    let router = create_router_with_allowance(10);
    let ada = create_employee(&router, "Ada", "ada@example.com").await;

    let (status, body) = apply(&router, &ada["id"], "2024-06-01", "2024-06-15").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["leave"]["status"], "Pending");
    assert!(
        body["warning"]
            .as_str()
            .unwrap()
            .starts_with("insufficient balance")
    );
}

// =============================================================================
// Decisions
// =============================================================================

#[tokio::test]
async fn test_reject_then_approve_is_conflict() {
    let router = create_router_for_test();
    let ada = create_employee(&router, "Ada", "ada@example.com").await;
    let (_, application) = apply(&router, &ada["id"], "2024-03-01", "2024-03-05").await;
    let leave_id = &application["leave"]["id"];

    let (status, body) = decide(&router, leave_id, "Reject").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Rejected");

    let (status, body) = decide(&router, leave_id, "Approve").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["detail"].as_str().unwrap().contains("already been decided"));
}

#[tokio::test]
async fn test_action_names_are_case_insensitive() {
    let router = create_router_for_test();
    let ada = create_employee(&router, "Ada", "ada@example.com").await;
    let (_, application) = apply(&router, &ada["id"], "2024-03-01", "2024-03-05").await;

    let (status, body) = decide(&router, &application["leave"]["id"], "approved").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Approved");
}

#[tokio::test]
async fn test_unknown_action_is_bad_request() {
    let router = create_router_for_test();
    let ada = create_employee(&router, "Ada", "ada@example.com").await;
    let (_, application) = apply(&router, &ada["id"], "2024-03-01", "2024-03-05").await;

    let (status, _) = decide(&router, &application["leave"]["id"], "Cancel").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_decide_unknown_leave_is_not_found() {
    let router = create_router_for_test();
    let (status, body) = decide(&router, &json!(7), "Approve").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Leave request not found: 7");
}

// =============================================================================
// Listings and balances
// =============================================================================

#[tokio::test]
async fn test_list_leaves_embeds_employee() {
    let router = create_router_for_test();
    let ada = create_employee(&router, "Ada", "ada@example.com").await;
    let bob = create_employee(&router, "Bob", "bob@example.com").await;
    apply(&router, &bob["id"], "2024-02-01", "2024-02-02").await;
    apply(&router, &ada["id"], "2024-02-01", "2024-02-02").await;

    let (status, body) = send(&router, "GET", "/leaves", None).await;
    assert_eq!(status, StatusCode::OK);
    let leaves = body.as_array().unwrap();
    assert_eq!(leaves.len(), 2);
    assert_eq!(leaves[0]["employee"]["name"], "Bob");
    assert_eq!(leaves[0]["employee"]["department"], "Engineering");
    assert_eq!(leaves[1]["employee"]["name"], "Ada");
    assert_eq!(leaves[1]["status"], "Pending");
}

#[tokio::test]
async fn test_balance_for_unknown_employee_is_not_found() {
    let router = create_router_for_test();
    let (status, _) = send(&router, "GET", "/employees/5/leave", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_end_to_end_ada_scenario() {
    let router = create_router_for_test();
    let ada = create_employee(&router, "Ada", "ada@example.com").await;
    assert_eq!(ada["annual_allowance"], 20);

    let (status, application) = apply(&router, &ada["id"], "2024-03-01", "2024-03-05").await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(application.get("warning").is_none());

    let (status, _) = decide(&router, &application["leave"]["id"], "Approve").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &router,
        "GET",
        &format!("/employees/{}/leave", ada["id"]),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["balance"], 15);
    let history = body["leavehistory"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["status"], "Approved");
    assert_eq!(history[0]["employee"]["name"], "Ada");
}

#[tokio::test]
async fn test_health_endpoint() {
    let router = create_router_for_test();
    let (status, body) = send(&router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
