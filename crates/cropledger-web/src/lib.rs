//! HTTP boundary for cropledger.
//!
//! Serves the entry form at `/`, turns form submissions at `/generate` into a
//! PDF download, and serves static assets (logo, stylesheets, charts) under
//! `/static`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use anyhow::{bail, Context as _};
use axum::{
    routing::{get, post},
    Router,
};
use tera::Tera;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::debug;

pub use error::AppError;
pub use handlers::AppState;
pub use models::parse_report_form;

/// Template globs tried when none is configured.
const TEMPLATE_GLOBS: [&str; 3] = [
    concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*"),
    "templates/**/*",
    "crates/cropledger-web/templates/**/*",
];

/// Load templates from `glob`, or from the first default location that has
/// a `form.html`.
pub fn load_templates(glob: Option<&str>) -> anyhow::Result<Tera> {
    if let Some(glob) = glob {
        let tera = Tera::new(glob).with_context(|| format!("cannot load templates from {glob}"))?;
        return with_form(tera).with_context(|| format!("no form.html in {glob}"));
    }

    for candidate in TEMPLATE_GLOBS {
        match Tera::new(candidate) {
            Ok(tera) => {
                if let Some(tera) = with_form(tera) {
                    return Ok(tera);
                }
            }
            Err(e) => debug!(glob = candidate, error = %e, "skipping template location"),
        }
    }
    bail!("no form.html template found")
}

fn with_form(mut tera: Tera) -> Option<Tera> {
    if !tera.get_template_names().any(|name| name == "form.html") {
        return None;
    }
    tera.autoescape_on(vec![".html"]);
    Some(tera)
}

/// Build the application router.
pub fn app(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.static_dir);
    Router::new()
        .route("/", get(handlers::index))
        .route("/generate", post(handlers::generate))
        .nest_service("/static", static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
