//! CropLedger web server.

use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use cropledger_report::ReportPipeline;
use cropledger_web::{app, load_templates, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "CROPLEDGER_HOST", default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "CROPLEDGER_PORT", default_value_t = 5000)]
    port: u16,

    /// Directory generated PDFs are written to
    #[arg(long, env = "CROPLEDGER_REPORTS_DIR", default_value = "reports")]
    reports_dir: PathBuf,

    /// Directory chart images are written to
    #[arg(long, env = "CROPLEDGER_CHARTS_DIR", default_value = "static/charts")]
    charts_dir: PathBuf,

    /// Directory served under /static
    #[arg(long, env = "CROPLEDGER_STATIC_DIR", default_value = "static")]
    static_dir: PathBuf,

    /// Logo drawn in the report header, used only if the file exists
    #[arg(long, env = "CROPLEDGER_LOGO", default_value = "static/images/logo.png")]
    logo: PathBuf,

    /// Template glob, e.g. "templates/**/*"
    #[arg(long, env = "CROPLEDGER_TEMPLATES")]
    templates: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    for dir in [&args.charts_dir, &args.reports_dir] {
        fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))?;
    }

    let tera = load_templates(args.templates.as_deref())?;
    if !args.logo.is_file() {
        info!(path = %args.logo.display(), "no logo found, reports will have none");
    }
    let pipeline = ReportPipeline::new(&args.charts_dir, &args.reports_dir).with_logo(&args.logo);
    let state = Arc::new(AppState::new(tera, pipeline, &args.static_dir));

    let addr = SocketAddr::new(args.host, args.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot listen on {addr}"))?;
    info!("Listening on http://{addr}");

    axum::serve(listener, app(state)).await?;

    Ok(())
}
