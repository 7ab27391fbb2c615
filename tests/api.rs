//! Router tests that never reach the database: the pool connects lazily to an
//! address nothing listens on, so any test that touched storage would fail.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use jobboard::{app, common_routes, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

const TOKEN: &str = "test-admin-token";

fn state(admin_token: Option<&str>) -> AppState {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_millis(200))
        .connect_lazy("postgres://nobody@127.0.0.1:1/unreachable")
        .unwrap();
    AppState::new(pool, admin_token.map(str::to_string))
}

fn router() -> axum::Router {
    app(state(Some(TOKEN)), 64 * 1024)
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(t) = token {
        builder = builder.header("Authorization", format!("Bearer {}", t));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let response = common_routes().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn version_reports_package() {
    let response = router().oneshot(get("/version")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "jobboard");
}

#[tokio::test]
async fn ready_reports_unavailable_database() {
    let response = router().oneshot(get("/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn create_company_without_token_is_unauthorized() {
    let body = json!({"handle": "new", "name": "New", "description": "D"});
    let response = router()
        .oneshot(json_request("POST", "/companies", None, body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn wrong_token_is_unauthorized() {
    let response = router()
        .oneshot(json_request("PATCH", "/jobs/1", Some("nope"), json!({"title": "x"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn writes_refused_when_no_token_configured() {
    let router = app(state(None), 1024);
    let response = router
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/companies/c1")
                .header("Authorization", format!("Bearer {}", TOKEN))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn empty_company_update_is_rejected_before_storage() {
    let response = router()
        .oneshot(json_request("PATCH", "/companies/c1", Some(TOKEN), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(body["error"]["message"], "validation: no data supplied");
}

#[tokio::test]
async fn empty_job_update_is_rejected_before_storage() {
    let response = router()
        .oneshot(json_request("PATCH", "/jobs/3", Some(TOKEN), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "validation_error");
}

#[tokio::test]
async fn company_handle_cannot_be_patched() {
    let response = router()
        .oneshot(json_request("PATCH", "/companies/c1", Some(TOKEN), json!({"handle": "c2"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_company_with_invalid_data() {
    let body = json!({"handle": "new", "name": "New", "description": "D", "numEmployees": "lots"});
    let response = router()
        .oneshot(json_request("POST", "/companies", Some(TOKEN), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_object_body_is_bad_request() {
    let response = router()
        .oneshot(json_request("POST", "/jobs", Some(TOKEN), json!(["title"])))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "bad_request");
}

#[tokio::test]
async fn inconsistent_employee_bounds_are_rejected() {
    let response = router()
        .oneshot(get("/companies?minEmployees=10&maxEmployees=5"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "validation_error");
}

#[tokio::test]
async fn unknown_filter_is_bad_request() {
    let response = router().oneshot(get("/companies?colour=red")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "bad_request");
}

#[tokio::test]
async fn job_filters_belong_to_jobs() {
    let response = router().oneshot(get("/jobs?maxEmployees=3")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_numeric_job_id_is_bad_request() {
    let response = router().oneshot(get("/jobs/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

async fn assert_validation_error(request: Request<Body>) {
    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "validation_error");
}

#[tokio::test]
async fn employee_count_beyond_integer_column_is_rejected() {
    let body = json!({"handle": "big", "name": "Big", "description": "D", "numEmployees": 3_000_000_000i64});
    assert_validation_error(json_request("POST", "/companies", Some(TOKEN), body)).await;
    let body = json!({"numEmployees": 3_000_000_000i64});
    assert_validation_error(json_request("PATCH", "/companies/c1", Some(TOKEN), body)).await;
}

#[tokio::test]
async fn salary_beyond_integer_column_is_rejected() {
    let body = json!({"title": "T", "companyHandle": "c1", "salary": 9_999_999_999i64});
    assert_validation_error(json_request("POST", "/jobs", Some(TOKEN), body)).await;
    let body = json!({"salary": 9_999_999_999i64});
    assert_validation_error(json_request("PATCH", "/jobs/1", Some(TOKEN), body)).await;
}

#[tokio::test]
async fn schema_ranges_are_checked_before_storage() {
    assert_validation_error(json_request("PATCH", "/jobs/1", Some(TOKEN), json!({"salary": -1}))).await;
    assert_validation_error(json_request("PATCH", "/jobs/1", Some(TOKEN), json!({"equity": "1.5"}))).await;
    assert_validation_error(json_request("PATCH", "/companies/c1", Some(TOKEN), json!({"numEmployees": -5}))).await;
}

#[tokio::test]
async fn mixed_case_handle_is_rejected() {
    let body = json!({"handle": "UpperCo", "name": "Upper", "description": "D"});
    assert_validation_error(json_request("POST", "/companies", Some(TOKEN), body)).await;
}

#[tokio::test]
async fn malformed_json_uses_error_envelope() {
    let request = Request::builder()
        .method("POST")
        .uri("/companies")
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {}", TOKEN))
        .body(Body::from("{\"handle\": "))
        .unwrap();
    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "bad_request");
}

#[tokio::test]
async fn missing_content_type_uses_error_envelope() {
    let request = Request::builder()
        .method("PATCH")
        .uri("/jobs/1")
        .header("Authorization", format!("Bearer {}", TOKEN))
        .body(Body::from(json!({"title": "x"}).to_string()))
        .unwrap();
    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "bad_request");
}
