//! Rendering side of cropledger: the income vs expense chart, the pagination
//! engine, report composition and PDF output.
//!
//! # Example
//!
//! ```no_run
//! use chrono::Local;
//! use cropledger_core::ReportForm;
//! use cropledger_report::ReportPipeline;
//!
//! # fn run(form: ReportForm) -> Result<(), Box<dyn std::error::Error>> {
//! let request = form.validate()?;
//! let pipeline = ReportPipeline::new("static/charts", "reports");
//! let artifact = pipeline.generate(&request, Local::now().naive_local())?;
//! println!("{}", artifact.pdf_path.display());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod chart;
pub mod compose;
pub mod error;
pub mod layout;
pub mod pdf;
pub mod pipeline;
pub mod text;

pub use chart::{
    render_comparison_chart, BarChartRenderer, ChartError, ChartRenderer, ChartSpec, ChartStyle,
};
pub use compose::{compose_blocks, compose_report, HeaderContext, FOOTER_TEXT};
pub use error::ReportError;
pub use layout::{paginate, Block, DrawOp, Page, PageDecorator, PageGeometry};
pub use pdf::PdfWriter;
pub use pipeline::{download_name, PipelineError, ReportArtifact, ReportPipeline};
