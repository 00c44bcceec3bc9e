//! End-to-end report generation for one request.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDateTime;
use cropledger_core::{FinancialMetrics, MetricsError, ReportRequest};
use thiserror::Error;
use tracing::{info, warn};

use crate::chart::{BarChartRenderer, ChartRenderer, ChartSpec, ChartStyle};
use crate::compose::{compose_report, HeaderContext};
use crate::error::ReportError;
use crate::pdf::PdfWriter;

/// Why a report could not be produced.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Metrics could not be derived from the request.
    #[error(transparent)]
    Calculation(#[from] MetricsError),
    /// The PDF could not be assembled or written.
    #[error(transparent)]
    Assembly(#[from] ReportError),
}

/// Files produced for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    /// The finished PDF.
    pub pdf_path: PathBuf,
    /// The chart embedded in the PDF, if it could be rendered.
    pub chart_path: Option<PathBuf>,
    /// File name offered to the browser.
    pub download_name: String,
}

/// Download file name: `Farm_Finance_Report_{name}_{YYYYMMDD}.pdf` with
/// spaces in the name replaced by underscores.
#[must_use]
pub fn download_name(farmer_name: &str, generated_at: NaiveDateTime) -> String {
    format!(
        "Farm_Finance_Report_{}_{}.pdf",
        farmer_name.replace(' ', "_"),
        generated_at.format("%Y%m%d")
    )
}

/// Turns validated requests into PDF files on disk.
///
/// Holds no per-request state; output names are derived from the generation
/// time, so concurrent calls only collide within the same second.
#[derive(Clone)]
pub struct ReportPipeline {
    charts_dir: PathBuf,
    reports_dir: PathBuf,
    logo: Option<PathBuf>,
    renderer: Arc<dyn ChartRenderer>,
}

impl fmt::Debug for ReportPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportPipeline")
            .field("charts_dir", &self.charts_dir)
            .field("reports_dir", &self.reports_dir)
            .field("logo", &self.logo)
            .finish_non_exhaustive()
    }
}

impl ReportPipeline {
    /// Pipeline writing charts and reports into the given directories.
    pub fn new(charts_dir: impl Into<PathBuf>, reports_dir: impl Into<PathBuf>) -> Self {
        Self {
            charts_dir: charts_dir.into(),
            reports_dir: reports_dir.into(),
            logo: None,
            renderer: Arc::new(BarChartRenderer),
        }
    }

    /// Draw `logo` in the page header when the file exists.
    #[must_use]
    pub fn with_logo(mut self, logo: impl Into<PathBuf>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    /// Replace the chart renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn ChartRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Directory charts are written to.
    #[must_use]
    pub fn charts_dir(&self) -> &Path {
        &self.charts_dir
    }

    /// Directory reports are written to.
    #[must_use]
    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    /// Generate the report for `request` as of `now`.
    ///
    /// A chart that fails to render is left out of the report. Any failure
    /// after that aborts generation.
    pub fn generate(
        &self,
        request: &ReportRequest,
        now: NaiveDateTime,
    ) -> Result<ReportArtifact, PipelineError> {
        let metrics = FinancialMetrics::compute(request)?;

        let chart_target = self
            .charts_dir
            .join(now.format("chart_%Y%m%d_%H%M%S.png").to_string());
        let spec = ChartSpec::comparison(
            metrics.total_income,
            metrics.total_expense,
            &ChartStyle::default(),
        );
        let chart_path = match self.renderer.render(&spec, &chart_target) {
            Ok(path) => Some(path),
            Err(err) => {
                warn!(error = %err, "continuing without chart");
                None
            }
        };

        let header = HeaderContext::new(&request.details, now, self.logo.as_deref());
        let pages = compose_report(request, &metrics, chart_path.as_deref(), &header);

        let pdf_path = self
            .reports_dir
            .join(now.format("farm_report_%Y%m%d_%H%M%S.pdf").to_string());
        PdfWriter::new(header.title.as_str()).write_pdf(&pages, &pdf_path)?;
        info!(
            path = %pdf_path.display(),
            pages = pages.len(),
            chart = chart_path.is_some(),
            "generated report"
        );

        Ok(ReportArtifact {
            pdf_path,
            chart_path,
            download_name: download_name(&request.details.farmer_name, now),
        })
    }
}
