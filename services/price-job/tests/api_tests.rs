//! Price Job API Tests
//!
//! Drive the router end to end with in-memory storage and a canned quote
//! source.

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use prometheus::Registry;
use rust_xlsxwriter::Workbook;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use pricecheck_database::{InMemoryBlobStore, InMemoryResultStore};
use pricecheck_models::Quote;
use pricecheck_price_job::{create_app, AppState, JobMetrics, PriceJob, QuoteSource};
use pricecheck_utils::AppConfig;

struct CannedQuotes;

#[async_trait]
impl QuoteSource for CannedQuotes {
    async fn lookup(&self, manufacturer: &str, _part_number: &str) -> Vec<Quote> {
        match manufacturer {
            "Acme" => vec![Quote::new("X", Some(9.99)), Quote::new("Y", Some(12.0))],
            _ => Vec::new(),
        }
    }
}

struct TestApp {
    router: Router,
    store: Arc<InMemoryResultStore>,
}

fn test_app(blobs: InMemoryBlobStore, store: InMemoryResultStore) -> TestApp {
    let registry = Registry::new();
    let metrics = JobMetrics::new().unwrap();
    metrics.register(&registry).unwrap();

    let store = Arc::new(store);
    let price_job = PriceJob::new(Arc::new(blobs), Arc::new(CannedQuotes), store.clone(), metrics);

    let router = create_app(AppState {
        price_job,
        registry,
        config: Arc::new(AppConfig::default()),
    });
    TestApp { router, store }
}

fn parts_csv() -> InMemoryBlobStore {
    InMemoryBlobStore::new().with_object(
        "user-1/parts.csv",
        "Manufacturer,Part No\nAcme,123\n\nGlobex,456\n",
    )
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn job_body(file_path: &str, file_name: &str) -> Value {
    json!({"userId": "user-1", "filePath": file_path, "fileName": file_name})
}

#[tokio::test]
async fn test_run_job_returns_ordered_results() {
    let app = test_app(parts_csv(), InMemoryResultStore::new());

    let (status, body) = post_json(
        app.router,
        "/run-job",
        job_body("user-1/parts.csv", "parts.csv"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"results": [
            {"manufacturer": "Acme", "partNumber": "123", "price": 9.99},
            {"manufacturer": "Globex", "partNumber": "456", "price": null}
        ]})
    );
    assert_eq!(app.store.records().await.len(), 2);
}

#[tokio::test]
async fn test_run_job_accepts_workbook_upload() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "manufacturer").unwrap();
    sheet.write_string(0, 1, "part no").unwrap();
    sheet.write_string(1, 0, "Acme").unwrap();
    sheet.write_number(1, 1, 123).unwrap();
    let xlsx = workbook.save_to_buffer().unwrap();

    let blobs = InMemoryBlobStore::new().with_object("user-1/parts.xlsx", xlsx);
    let app = test_app(blobs, InMemoryResultStore::new());

    let (status, body) = post_json(
        app.router,
        "/run-job",
        job_body("user-1/parts.xlsx", "parts.xlsx"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"][0]["partNumber"], "123");
    assert_eq!(body["results"][0]["price"], 9.99);
}

#[tokio::test]
async fn test_missing_parameters_is_bad_request() {
    let app = test_app(parts_csv(), InMemoryResultStore::new());

    let (status, body) = post_json(
        app.router,
        "/run-job",
        json!({"userId": "user-1", "filePath": "user-1/parts.csv"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Missing parameters"}));
}

#[tokio::test]
async fn test_unparseable_body_is_bad_request() {
    let app = test_app(parts_csv(), InMemoryResultStore::new());

    let request = Request::builder()
        .method("POST")
        .uri("/run-job")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_failures_collapse_to_generic_error() {
    let blobs = parts_csv().with_object("user-1/bad.csv", "manufacturer,partno\nAcme,1\n");

    for (file_path, file_name) in [
        ("user-1/bad.csv", "bad.csv"),           // schema
        ("user-1/parts.csv", "parts.txt"),       // parse
        ("user-1/missing.csv", "missing.csv"),   // download
    ] {
        let app = test_app(
            InMemoryBlobStore::new()
                .with_object("user-1/bad.csv", "manufacturer,partno\nAcme,1\n")
                .with_object("user-1/parts.csv", "manufacturer,part no\nAcme,1\n"),
            InMemoryResultStore::new(),
        );
        let (status, body) = post_json(app.router, "/run-job", job_body(file_path, file_name)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", file_name);
        assert_eq!(body, json!({"error": "Job failed"}));
    }

    // Persistence failure mid-job also collapses, after partial writes
    let app = test_app(blobs, InMemoryResultStore::failing_after(1));
    let (status, body) = post_json(
        app.router,
        "/run-job",
        job_body("user-1/parts.csv", "parts.csv"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Job failed"}));
    assert_eq!(app.store.records().await.len(), 1);
}

#[tokio::test]
async fn test_validate_job_reports_rows_without_persisting() {
    let app = test_app(parts_csv(), InMemoryResultStore::new());

    let (status, body) = post_json(
        app.router,
        "/validate-job",
        job_body("user-1/parts.csv", "parts.csv"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"rows": [
            {"manufacturer": "Acme", "partNumber": "123"},
            {"manufacturer": "Globex", "partNumber": "456"}
        ]})
    );
    assert!(app.store.records().await.is_empty());
}

#[tokio::test]
async fn test_validate_job_explains_schema_errors() {
    let blobs = InMemoryBlobStore::new()
        .with_object("user-1/p.csv", "manufacturer,part no\nAcme,123\n,456\n");
    let app = test_app(blobs, InMemoryResultStore::new());

    let (status, body) = post_json(app.router, "/validate-job", job_body("user-1/p.csv", "p.csv")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("Row 3"));
}

#[tokio::test]
async fn test_health_and_request_id() {
    let app = test_app(InMemoryBlobStore::new(), InMemoryResultStore::new());

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();
    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn test_metrics_endpoint_counts_jobs() {
    let app = test_app(parts_csv(), InMemoryResultStore::new());

    let (status, _) = post_json(
        app.router.clone(),
        "/run-job",
        job_body("user-1/parts.csv", "parts.csv"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let request = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let response = app.router.oneshot(request).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();

    assert!(text.contains("pricecheck_jobs_total{outcome=\"success\"} 1"));
    assert!(text.contains("pricecheck_rows_processed_total 2"));
    assert!(text.contains("pricecheck_quotes_persisted_total 2"));
}
