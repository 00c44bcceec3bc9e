//! Route handlers.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{RawForm, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use chrono::Local;
use cropledger_report::ReportPipeline;
use tera::{Context, Tera};
use tracing::{error, info};

use crate::error::AppError;
use crate::models::parse_report_form;

/// Shared application state
pub struct AppState {
    /// Templates; must contain `form.html`.
    pub tera: Tera,
    /// Report generator shared by all requests.
    pub pipeline: Arc<ReportPipeline>,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
}

impl AppState {
    /// Bundle the pieces the router needs.
    pub fn new(tera: Tera, pipeline: ReportPipeline, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            tera,
            pipeline: Arc::new(pipeline),
            static_dir: static_dir.into(),
        }
    }
}

/// Render the form, optionally with an error banner.
fn render_form(state: &AppState, status: StatusCode, message: Option<&str>) -> Response {
    let mut context = Context::new();
    if let Some(message) = message {
        context.insert("error", message);
    }

    match state.tera.render("form.html", &context) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!(error = ?e, "cannot render form template");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!("<h1>Template Error</h1><p>{e}</p>")),
            )
                .into_response()
        }
    }
}

/// Handler for the form page.
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    render_form(&state, StatusCode::OK, None)
}

/// Handler for form submission: validates, generates and returns the PDF.
pub async fn generate(State(state): State<Arc<AppState>>, RawForm(body): RawForm) -> Response {
    match build_report(&state, &body).await {
        Ok(response) => response,
        Err(err) => {
            let status = err.status();
            if status.is_server_error() {
                error!(error = ?err, "report generation failed");
            } else {
                info!(reason = %err, "report request rejected");
            }
            render_form(&state, status, Some(&err.to_string()))
        }
    }
}

async fn build_report(state: &AppState, body: &[u8]) -> Result<Response, AppError> {
    let request = parse_report_form(body).validate()?;
    let now = Local::now().naive_local();

    // Chart drawing and PDF serialization are CPU bound and touch the disk.
    let pipeline = Arc::clone(&state.pipeline);
    let artifact = tokio::task::spawn_blocking(move || pipeline.generate(&request, now))
        .await
        .map_err(|e| AppError::Unexpected(anyhow::Error::new(e).context("report task failed")))??;

    let bytes = tokio::fs::read(&artifact.pdf_path)
        .await
        .map_err(AppError::Delivery)?;
    info!(
        path = %artifact.pdf_path.display(),
        bytes = bytes.len(),
        "sending report"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(&artifact.download_name),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// `attachment` disposition with characters that would break the quoted
/// filename replaced.
fn content_disposition(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_control() || !c.is_ascii() => '_',
            c => c,
        })
        .collect();
    format!("attachment; filename=\"{safe}\"")
}
