//! Router tests driven through `tower::ServiceExt::oneshot`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use cropledger_report::{ChartError, ChartRenderer, ChartSpec, ReportPipeline};
use cropledger_web::{app, load_templates, AppState};
use tower::ServiceExt;

/// Skips the chart so responses stay small and fast.
struct NoChart;

impl ChartRenderer for NoChart {
    fn render(&self, _spec: &ChartSpec, _output: &Path) -> Result<PathBuf, ChartError> {
        Err(ChartError::Render("disabled in tests".to_string()))
    }
}

const VALID_FORM: &str = "farmer_name=A.+Singh&crop_name=Wheat&season=Rabi&total_acres=2\
    &date_of_sowing=2023-11-15&date_of_harvest=2024-04-01&location=Ludhiana\
    &expense_category=Seeds&expense_amount=8000&expense_date=2024-01-10&expense_description=\
    &income_category=Sale&income_amount=50000&income_date=2024-04-01&income_description=Mandi";

fn router(root: &Path) -> Router {
    let pipeline = ReportPipeline::new(root.join("static/charts"), root.join("reports"))
        .with_renderer(Arc::new(NoChart));
    let tera = load_templates(None).unwrap();
    app(Arc::new(AppState::new(tera, pipeline, root.join("static"))))
}

fn post_form(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/generate")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn test_index_renders_form() {
    let dir = tempfile::tempdir().unwrap();

    let response = router(dir.path())
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"action="/generate""#));
    assert!(html.contains(r#"name="expense_category""#));
    assert!(html.contains(r#"name="income_amount""#));
    assert!(!html.contains(r#"class="error""#));
}

#[tokio::test]
async fn test_generate_returns_pdf_attachment() {
    let dir = tempfile::tempdir().unwrap();

    let response = router(dir.path()).oneshot(post_form(VALID_FORM)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/pdf"
    );
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"Farm_Finance_Report_A._Singh_"));
    assert!(disposition.ends_with(".pdf\""));

    let pdf = body_bytes(response).await;
    assert!(pdf.starts_with(b"%PDF"));

    let written: Vec<_> = fs::read_dir(dir.path().join("reports"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(written.len(), 1);
    assert!(written[0].starts_with("farm_report_"));
}

#[tokio::test]
async fn test_missing_required_field_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let body = VALID_FORM.replace("farmer_name=A.+Singh", "farmer_name=++");

    let response = router(dir.path()).oneshot(post_form(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains("Please fill in all required fields."));
    assert!(html.contains(r#"class="error""#));
}

#[tokio::test]
async fn test_non_positive_acres_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let body = VALID_FORM.replace("total_acres=2", "total_acres=0");

    let response = router(dir.path()).oneshot(post_form(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response)
        .await
        .contains("Please fill in all required fields."));
}

#[tokio::test]
async fn test_no_usable_entries_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let body = "farmer_name=A.+Singh&crop_name=Wheat&season=Rabi&total_acres=2\
        &expense_category=Seeds&expense_amount=lots\
        &income_category=&income_amount=100";

    let response = router(dir.path()).oneshot(post_form(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response)
        .await
        .contains("Please provide at least one income or expense entry."));
    assert!(!dir.path().join("reports").exists());
}

#[tokio::test]
async fn test_overflowing_amounts_are_a_calculation_error() {
    let dir = tempfile::tempdir().unwrap();
    let body = VALID_FORM
        .replace("total_acres=2", "total_acres=0.01")
        .replace("expense_amount=8000", "expense_amount=1e28");

    let response = router(dir.path()).oneshot(post_form(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains("Calculation error: Cost per acre is too large to calculate"));
    assert!(!dir.path().join("reports").exists());
}

#[tokio::test]
async fn test_assembly_failure_is_a_server_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("reports"), b"not a directory").unwrap();

    let response = router(dir.path()).oneshot(post_form(VALID_FORM)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let html = body_text(response).await;
    assert!(html.contains("PDF generation failed:"));
    assert!(html.contains(r#"action="/generate""#));
}

#[tokio::test]
async fn test_static_files_are_served() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("static/css")).unwrap();
    fs::write(dir.path().join("static/css/site.css"), "body { margin: 0; }").unwrap();

    let response = router(dir.path())
        .oneshot(
            Request::builder()
                .uri("/static/css/site.css")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "body { margin: 0; }");
}
