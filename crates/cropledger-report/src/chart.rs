//! Income vs expense bar chart.
//!
//! [`ChartSpec`] is the fully resolved chart (bar values, labels, axis ticks)
//! and carries no drawing code; a [`ChartRenderer`] turns it into an image.
//! The report treats chart rendering as best effort, so renderers only need
//! to report failure, never recover from it.

use std::fs;
use std::path::{Path, PathBuf};

use cropledger_core::{format_currency, format_whole, CURRENCY_MARKER};
use plotters::coord::combinators::WithKeyPoints;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::Color as _;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::layout::Color;

/// Green used for income bars and the income table header.
pub const INCOME_COLOR: Color = Color::rgb(0x2e, 0xcc, 0x71);
/// Red used for expense bars and the expense table header.
pub const EXPENSE_COLOR: Color = Color::rgb(0xe7, 0x4c, 0x3c);

/// Error returned when a chart cannot be produced.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The output directory could not be created.
    #[error("cannot create chart directory {path}: {source}")]
    Io {
        /// Directory that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The drawing backend failed.
    #[error("chart rendering failed: {0}")]
    Render(String),
}

/// Fixed look of the comparison chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartStyle {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Chart title.
    pub title: String,
    /// Currency marker used in labels.
    pub currency: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 1200,
            title: "Income vs Expense Comparison".to_string(),
            currency: CURRENCY_MARKER.to_string(),
        }
    }
}

/// One bar of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Category name under the bar.
    pub name: &'static str,
    /// Bar height.
    pub value: f64,
    /// Label printed above the bar.
    pub label: String,
    /// Fill color.
    pub color: Color,
}

/// A resolved two-bar comparison chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Title above the plot.
    pub title: String,
    /// Y axis description.
    pub y_label: String,
    /// Income then expense.
    pub bars: [Bar; 2],
    /// Top of the y axis.
    pub y_max: f64,
    /// Y values that get a tick label and a grid line, starting at zero.
    pub ticks: Vec<f64>,
    currency: String,
}

impl ChartSpec {
    /// Build the income vs expense chart for the given totals.
    #[must_use]
    pub fn comparison(total_income: Decimal, total_expense: Decimal, style: &ChartStyle) -> Self {
        let income = total_income.to_f64().unwrap_or(0.0);
        let expense = total_expense.to_f64().unwrap_or(0.0);
        let (y_max, step) = nice_axis(income.max(expense));
        let steps = (y_max / step).round() as usize;
        let ticks = (0..=steps).map(|i| i as f64 * step).collect();

        Self {
            width: style.width,
            height: style.height,
            title: style.title.clone(),
            y_label: format!("Amount ({})", style.currency),
            bars: [
                Bar {
                    name: "Income",
                    value: income,
                    label: format_currency(&style.currency, total_income),
                    color: INCOME_COLOR,
                },
                Bar {
                    name: "Expense",
                    value: expense,
                    label: format_currency(&style.currency, total_expense),
                    color: EXPENSE_COLOR,
                },
            ],
            y_max,
            ticks,
            currency: style.currency.clone(),
        }
    }

    /// Axis label for a y value: currency marker, thousands separators, no
    /// decimals.
    #[must_use]
    pub fn tick_label(&self, value: f64) -> String {
        let whole = Decimal::from_f64(value).unwrap_or_default();
        format!("{} {}", self.currency, format_whole(whole))
    }

    /// Category name for an x position, empty between bars.
    #[must_use]
    pub fn bar_name(&self, x: f64) -> &str {
        let index = x.round();
        if (x - index).abs() > 1e-6 || index < 0.0 {
            return "";
        }
        self.bars.get(index as usize).map_or("", |bar| bar.name)
    }
}

/// Axis top and tick step for data peaking at `max`.
///
/// Leaves roughly 15% headroom for the value labels and uses steps of
/// 1, 2 or 5 times a power of ten.
fn nice_axis(max: f64) -> (f64, f64) {
    if !max.is_finite() || max <= 0.0 {
        return (5.0, 1.0);
    }
    let target = max * 1.15;
    let raw_step = target / 5.0;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;
    let factor = [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .find(|f| *f >= normalized)
        .unwrap_or(10.0);
    let step = factor * magnitude;
    ((target / step).ceil() * step, step)
}

/// Something that can draw a [`ChartSpec`] to an image file.
pub trait ChartRenderer: Send + Sync {
    /// Render `spec` to `output`, creating parent directories, and return
    /// the path written.
    fn render(&self, spec: &ChartSpec, output: &Path) -> Result<PathBuf, ChartError>;
}

/// PNG renderer backed by `plotters`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BarChartRenderer;

impl ChartRenderer for BarChartRenderer {
    fn render(&self, spec: &ChartSpec, output: &Path) -> Result<PathBuf, ChartError> {
        ensure_parent(output)?;
        draw(spec, output).map_err(|e| ChartError::Render(e.to_string()))?;
        Ok(output.to_path_buf())
    }
}

/// Create the parent directory of `path` if needed.
pub(crate) fn ensure_parent(path: &Path) -> Result<(), ChartError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| ChartError::Io {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

fn rgb(color: Color) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

type Axis = WithKeyPoints<RangedCoordf64>;

/// Axes whose labelled points are exactly the bar centers and `spec.ticks`.
fn axes(spec: &ChartSpec) -> (Axis, Axis) {
    let x = (-0.5f64..1.5f64).with_key_points(vec![0.0, 1.0]);
    let y = (0f64..spec.y_max).with_key_points(spec.ticks.clone());
    (x, y)
}

fn draw(spec: &ChartSpec, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let (x_axis, y_axis) = axes(spec);
    let root = BitMapBackend::new(output, (spec.width, spec.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            &spec.title,
            ("sans-serif", 40).into_font().style(FontStyle::Bold),
        )
        .margin(30)
        .x_label_area_size(60)
        .y_label_area_size(170)
        .build_cartesian_2d(x_axis, y_axis)?;

    // Only the left and bottom axes are drawn; no solid mesh.
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(spec.bars.len())
        .x_label_formatter(&|x| spec.bar_name(*x).to_string())
        .y_labels(spec.ticks.len())
        .y_label_formatter(&|y| spec.tick_label(*y))
        .y_desc(spec.y_label.as_str())
        .axis_desc_style(("sans-serif", 28).into_font().style(FontStyle::Bold))
        .label_style(("sans-serif", 24))
        .draw()?;

    // Light dashed horizontal grid.
    for &tick in spec.ticks.iter().skip(1) {
        chart.draw_series(dashes(-0.5, 1.5, 0.04, 0.03).map(|(start, end)| {
            PathElement::new(vec![(start, tick), (end, tick)], BLACK.mix(0.3).stroke_width(2))
        }))?;
    }

    for (index, bar) in spec.bars.iter().enumerate() {
        let x = index as f64;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x - 0.3, 0.0), (x + 0.3, bar.value)],
            rgb(bar.color).filled(),
        )))?;

        let label_style = TextStyle::from(("sans-serif", 26).into_font().style(FontStyle::Bold))
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        chart.draw_series(std::iter::once(Text::new(
            bar.label.clone(),
            (x, bar.value),
            label_style,
        )))?;
    }

    root.present()?;
    Ok(())
}

/// Dash segments covering `from..to`.
fn dashes(from: f64, to: f64, dash: f64, gap: f64) -> impl Iterator<Item = (f64, f64)> {
    let period = dash + gap;
    let count = ((to - from) / period).ceil() as usize;
    (0..count).map(move |i| {
        let start = from + i as f64 * period;
        (start, (start + dash).min(to))
    })
}

/// Render the default-styled comparison chart to `output`.
pub fn render_comparison_chart(
    total_income: Decimal,
    total_expense: Decimal,
    output: &Path,
) -> Result<PathBuf, ChartError> {
    let spec = ChartSpec::comparison(total_income, total_expense, &ChartStyle::default());
    BarChartRenderer.render(&spec, output)
}
