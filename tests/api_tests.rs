//! Router-level tests driving the full middleware stack in process.
//!
//! Run with: cargo test --test api_tests

use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use accounts_api::budget::RequestBudget;
use accounts_api::config::{CACHE_CONTROL_ACCOUNTS, CACHE_CONTROL_ERROR};
use accounts_api::model::AccountHealth;
use accounts_api::repository::{seed_accounts, StaticAccounts};
use accounts_api::{create_router, AppState};

fn budget() -> RequestBudget {
    RequestBudget::new(Duration::from_secs(60), Duration::from_secs(60)).unwrap()
}

fn seeded_app() -> Router {
    create_router(AppState::new(StaticAccounts::seeded(), budget()))
}

fn empty_app() -> Router {
    create_router(AppState::new(StaticAccounts::new(Vec::new()), budget()))
}

struct TestResponse {
    status: StatusCode,
    headers: axum::http::HeaderMap,
    body: String,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body)
            .unwrap_or_else(|e| panic!("response body is not JSON: {e}; body={}", self.body))
    }
}

async fn get(app: Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri).await
}

async fn send(app: Router, method: Method, uri: &str) -> TestResponse {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

fn names(data: &Value) -> Vec<&str> {
    data.as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_welcome_page() {
    let res = get(seeded_app(), "/").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.headers.get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert_eq!(
        res.body,
        r#"{"status":"success","data":"Welcome to Home page"}"#
    );
}

#[tokio::test]
async fn test_welcome_ignores_query_parameters() {
    let res = get(seeded_app(), "/?health=abc&type=1").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["data"], "Welcome to Home page");
}

#[tokio::test]
async fn test_unknown_paths_fall_back_to_welcome() {
    let res = get(seeded_app(), "/does/not/exist").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["data"], "Welcome to Home page");
}

const METHOD_NOT_ALLOWED_BODY: &str =
    r#"{"status":"error","errorType":"bad_data","error":"Method Not Allowed"}"#;

#[tokio::test]
async fn test_wrong_method_on_known_paths_is_bad_data() {
    for uri in ["/", "/getAll", "/accountsByHealth?health=0", "/accountsByType", "/health"] {
        let res = send(seeded_app(), Method::POST, uri).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "POST {uri}");
        assert_eq!(res.body, METHOD_NOT_ALLOWED_BODY, "POST {uri}");
        assert_eq!(
            res.headers.get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(
            res.headers.get(header::CACHE_CONTROL).unwrap(),
            CACHE_CONTROL_ERROR
        );
    }

    let res = send(seeded_app(), Method::DELETE, "/getAll").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body, METHOD_NOT_ALLOWED_BODY);
}

#[tokio::test]
async fn test_wrong_method_on_unknown_path_is_bad_data() {
    let res = send(seeded_app(), Method::POST, "/nowhere").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body, METHOD_NOT_ALLOWED_BODY);

    let res = get(seeded_app(), "/nowhere").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["data"], "Welcome to Home page");
}

#[tokio::test]
async fn test_wrong_method_honours_pretty_flag() {
    let res = send(seeded_app(), Method::PUT, "/getAll?pretty=1").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body.starts_with("{\n    \"status\": \"error\""), "{}", res.body);
}

#[tokio::test]
async fn test_head_requests_are_served() {
    let res = send(seeded_app(), Method::HEAD, "/getAll").await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.is_empty());

    let res = send(seeded_app(), Method::HEAD, "/nowhere").await;
    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn test_accounts_by_health_returns_matching_subsequence() {
    for health in AccountHealth::ALL {
        let expected: Vec<Value> = seed_accounts()
            .into_iter()
            .filter(|a| a.account_health == health)
            .map(|a| serde_json::to_value(a).unwrap())
            .collect();
        if expected.is_empty() {
            continue;
        }

        let res = get(
            seeded_app(),
            &format!("/accountsByHealth?health={}", health.code()),
        )
        .await;
        assert_eq!(res.status, StatusCode::OK);
        let body = res.json();
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"], Value::Array(expected));
        assert!(body.get("errorType").is_none());
        assert!(body.get("error").is_none());
    }
}

#[tokio::test]
async fn test_accounts_by_health_record_shape() {
    let res = get(seeded_app(), "/accountsByHealth?health=7").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.json()["data"],
        json!([{
            "name": "Monke",
            "id": 36747353,
            "balance": 10000,
            "holdings": 5000,
            "accountType": "Overdraft Account",
            "accountHealth": "Delinquent",
        }])
    );
}

#[tokio::test]
async fn test_accounts_by_health_rejects_non_integer() {
    let res = get(seeded_app(), "/accountsByHealth?health=abc").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json(),
        json!({"status": "error", "errorType": "bad_data", "error": "Invalid Health"})
    );
    assert_eq!(
        res.headers.get(header::CACHE_CONTROL).unwrap(),
        CACHE_CONTROL_ERROR
    );
}

#[tokio::test]
async fn test_accounts_by_health_missing_parameter_is_bad_data() {
    let res = get(seeded_app(), "/accountsByHealth").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["errorType"], "bad_data");
}

#[tokio::test]
async fn test_accounts_by_health_without_match_is_not_found() {
    // Substandard 2 does not occur in the seed data
    let res = get(seeded_app(), "/accountsByHealth?health=3").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(
        res.json(),
        json!({"status": "error", "errorType": "not_found", "error": "Account Not found"})
    );
}

#[tokio::test]
async fn test_accounts_by_type() {
    let res = get(seeded_app(), "/accountsByType?type=2").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(names(&res.json()["data"]), vec!["Steve", "Gerard"]);
    assert_eq!(
        res.headers.get(header::CACHE_CONTROL).unwrap(),
        CACHE_CONTROL_ACCOUNTS
    );
}

#[tokio::test]
async fn test_accounts_by_type_rejects_non_integer() {
    let res = get(seeded_app(), "/accountsByType?type=savings").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["error"], "Invalid Type");
}

#[tokio::test]
async fn test_accounts_by_type_out_of_table_is_not_found() {
    let res = get(seeded_app(), "/accountsByType?type=7").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json()["errorType"], "not_found");
}

#[tokio::test]
async fn test_accounts_by_type_on_empty_collection() {
    let res = get(empty_app(), "/accountsByType?type=0").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json()["error"], "Account Not found");
}

#[tokio::test]
async fn test_get_all_returns_every_seed_record() {
    let res = get(seeded_app(), "/getAll").await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"].as_array().unwrap().len(), 12);
    assert_eq!(body["data"], serde_json::to_value(seed_accounts()).unwrap());
}

#[tokio::test]
async fn test_get_all_on_empty_collection() {
    let res = get(empty_app(), "/getAll").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(
        res.json(),
        json!({"status": "error", "errorType": "not_found", "error": "No Accounts Found"})
    );
}

#[tokio::test]
async fn test_pretty_flag_switches_rendering() {
    for path in ["/", "/getAll", "/accountsByType?type=1", "/accountsByHealth?health=x"] {
        let sep = if path.contains('?') { '&' } else { '?' };

        let compact = get(seeded_app(), path).await;
        let pretty = get(seeded_app(), &format!("{path}{sep}pretty=1")).await;
        let not_pretty = get(seeded_app(), &format!("{path}{sep}pretty=false")).await;

        assert!(!compact.body.contains('\n'), "{path}");
        assert!(pretty.body.starts_with("{\n    \"status\""), "{path}");
        assert_eq!(not_pretty.body, compact.body, "{path}");
        assert_eq!(pretty.status, compact.status, "{path}");
        assert_eq!(pretty.json(), compact.json(), "{path}");
    }
}

#[tokio::test]
async fn test_repeated_requests_are_byte_identical() {
    let app = seeded_app();
    let first = get(app.clone(), "/accountsByHealth?health=0").await;
    let second = get(app, "/accountsByHealth?health=0").await;
    assert_eq!(first.status, second.status);
    assert_eq!(first.body, second.body);
}

#[tokio::test]
async fn test_health_probe() {
    let res = get(empty_app(), "/health").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, "ok");
}
