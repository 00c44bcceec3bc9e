//! Report composition.
//!
//! Each section builder returns its own blocks and [`compose_blocks`] joins
//! them in a fixed order: finance summary, expense breakdown, income
//! breakdown, ledger. The title, timestamp, logo and farmer name are not part
//! of the flow; [`HeaderContext`] draws them on every page.

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDateTime};
use cropledger_core::{
    format_acres, format_amount, CropDetails, FinancialMetrics, LedgerEntry, ReportRequest,
    TransactionEntry, CURRENCY_MARKER,
};

use crate::chart::{EXPENSE_COLOR, INCOME_COLOR};
use crate::layout::{
    paginate, Align, Block, Color, Column, DrawOp, Font, Page, PageDecorator, PageGeometry,
    ParagraphStyle, Table, TableStyle, INCH,
};

/// Caption printed at the bottom of every page.
pub const FOOTER_TEXT: &str = "Proudly maintained accounting with CropLedger";

/// Slate blue used for headings and the summary and ledger headers.
pub const SLATE: Color = Color::rgb(0x34, 0x49, 0x5e);

/// Drawn size of the embedded chart.
pub const CHART_SIZE: (f32, f32) = (5.0 * INCH, 3.75 * INCH);

const LOGO_SIZE: (f32, f32) = (1.4 * INCH, 0.45 * INCH);
const HEADING_GAP: f32 = 0.6 * INCH;
const SECTION_GAP: f32 = 0.3 * INCH;

/// Per-page furniture shared by every page of one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderContext {
    /// `"{crop} _ {acres} Acres _ {season} {year}"`.
    pub title: String,
    /// `"Generated: YYYY-MM-DD HH:MM:SS"`.
    pub timestamp: String,
    /// `"Farmer: {name}"`.
    pub farmer_line: String,
    /// Logo image, only set when the file exists.
    pub logo: Option<PathBuf>,
    /// Footer caption.
    pub footer: String,
}

impl HeaderContext {
    /// Header for a report generated at `generated_at`.
    #[must_use]
    pub fn new(details: &CropDetails, generated_at: NaiveDateTime, logo: Option<&Path>) -> Self {
        Self {
            title: format!(
                "{} _ {} Acres _ {} {}",
                details.crop_name,
                format_acres(details.total_acres),
                details.season,
                generated_at.year()
            ),
            timestamp: format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
            farmer_line: format!("Farmer: {}", details.farmer_name),
            logo: logo.filter(|path| path.is_file()).map(Path::to_path_buf),
            footer: FOOTER_TEXT.to_string(),
        }
    }
}

impl PageDecorator for HeaderContext {
    fn decorate(&self, _page_number: usize, geometry: &PageGeometry) -> Vec<DrawOp> {
        let left = geometry.frame_left();
        let right = left + geometry.frame_width();
        let center = left + geometry.frame_width() / 2.0;

        // Rows hang from the top of the body area plus the top margin.
        let header_top = geometry.height - geometry.margin_bottom;
        let title_y = header_top - 0.4 * INCH;
        let row2_y = title_y - 0.45 * INCH;
        let farmer_y = row2_y - 0.55 * INCH;

        let mut ops = vec![DrawOp::aligned_text(
            self.title.as_str(),
            Align::Center,
            center,
            title_y,
            Font::Bold,
            15.0,
            Color::BLACK,
        )];
        if let Some(logo) = &self.logo {
            ops.push(DrawOp::Image {
                path: logo.clone(),
                x: left,
                y: row2_y - LOGO_SIZE.1,
                width: LOGO_SIZE.0,
                height: LOGO_SIZE.1,
                required: false,
            });
        }
        ops.push(DrawOp::aligned_text(
            self.timestamp.as_str(),
            Align::Right,
            right,
            row2_y - 0.15 * INCH,
            Font::Regular,
            9.0,
            Color::BLACK,
        ));
        ops.push(DrawOp::aligned_text(
            self.farmer_line.as_str(),
            Align::Left,
            left,
            farmer_y,
            Font::Regular,
            10.0,
            Color::BLACK,
        ));
        ops.push(DrawOp::aligned_text(
            self.footer.as_str(),
            Align::Center,
            center,
            0.5 * INCH,
            Font::Regular,
            9.0,
            Color::GREY,
        ));
        ops
    }
}

fn amount_header() -> String {
    format!("Amount ({CURRENCY_MARKER})")
}

fn heading(text: &str) -> [Block; 2] {
    let style = ParagraphStyle {
        font: Font::Bold,
        size: 14.0,
        leading: 18.0,
        color: SLATE,
        space_before: 12.0,
        space_after: 10.0,
        align: Align::Left,
    };
    [
        Block::Paragraph {
            text: text.to_string(),
            style,
        },
        Block::Spacer(HEADING_GAP),
    ]
}

fn notice(text: &str) -> Block {
    Block::Paragraph {
        text: text.to_string(),
        style: ParagraphStyle::normal(),
    }
}

/// Finance summary: metric table, then the chart if one was rendered.
#[must_use]
pub fn finance_summary(metrics: &FinancialMetrics, chart: Option<&Path>) -> Vec<Block> {
    let rows = [
        ("Total Income", metrics.total_income),
        ("Total Expense", metrics.total_expense),
        ("Total Production", metrics.total_production()),
        ("Profit/Loss", metrics.profit_or_loss),
        ("Cost of Cultivation per Acre", metrics.cost_per_acre),
    ];
    let table = Table {
        columns: vec![Column::left(3.0), Column::right(2.0)],
        header: vec!["Metric".to_string(), amount_header()],
        rows: rows
            .iter()
            .map(|(label, value)| vec![(*label).to_string(), format_amount(*value)])
            .collect(),
        style: TableStyle::new(SLATE, 12.0, 10.0),
    };

    let mut blocks = heading("Finance Summary").to_vec();
    blocks.push(Block::Table(table));
    blocks.push(Block::Spacer(HEADING_GAP));
    if let Some(path) = chart {
        blocks.push(Block::Image {
            path: path.to_path_buf(),
            width: CHART_SIZE.0,
            height: CHART_SIZE.1,
        });
        blocks.push(Block::Spacer(SECTION_GAP));
    }
    blocks.push(Block::PageBreak);
    blocks
}

fn breakdown(
    title: &str,
    empty_notice: &str,
    entries: &[TransactionEntry],
    header: Color,
) -> Vec<Block> {
    let mut blocks = heading(title).to_vec();
    if entries.is_empty() {
        blocks.push(notice(empty_notice));
    } else {
        blocks.push(Block::Table(Table {
            columns: vec![
                Column::left(1.5),
                Column::right(1.2),
                Column::left(1.0),
                Column::left(2.3),
            ],
            header: vec![
                "Category".to_string(),
                amount_header(),
                "Date".to_string(),
                "Description".to_string(),
            ],
            rows: entries
                .iter()
                .map(|entry| {
                    vec![
                        entry.category.clone(),
                        format_amount(entry.amount),
                        entry.date.clone(),
                        entry.description_or_dash().to_string(),
                    ]
                })
                .collect(),
            style: TableStyle::new(header, 11.0, 9.0),
        }));
    }
    blocks.push(Block::Spacer(SECTION_GAP));
    blocks.push(Block::PageBreak);
    blocks
}

/// Expense breakdown in input order, or a notice when there are none.
#[must_use]
pub fn expense_breakdown(expenses: &[TransactionEntry]) -> Vec<Block> {
    breakdown(
        "Expense Breakdown",
        "No expense records found.",
        expenses,
        EXPENSE_COLOR,
    )
}

/// Income breakdown in input order, or a notice when there are none.
#[must_use]
pub fn income_breakdown(incomes: &[TransactionEntry]) -> Vec<Block> {
    breakdown(
        "Income Breakdown",
        "No income records found.",
        incomes,
        INCOME_COLOR,
    )
}

/// Date-ordered ledger of every entry.
#[must_use]
pub fn ledger(entries: &[LedgerEntry]) -> Vec<Block> {
    let mut blocks = heading("Ledger").to_vec();
    if entries.is_empty() {
        blocks.push(notice("No ledger entries found."));
        return blocks;
    }

    blocks.push(Block::Table(Table {
        columns: vec![
            Column::left(1.0),
            Column::left(1.2),
            Column::left(0.8),
            Column::left(1.8),
            Column::right(1.2),
        ],
        header: vec![
            "Date".to_string(),
            "Particulars".to_string(),
            "Type".to_string(),
            "Description".to_string(),
            amount_header(),
        ],
        rows: entries
            .iter()
            .map(|entry| {
                vec![
                    entry.date.clone(),
                    entry.particulars.clone(),
                    entry.kind.to_string(),
                    entry.description.clone(),
                    format_amount(entry.amount),
                ]
            })
            .collect(),
        style: TableStyle::new(SLATE, 10.0, 8.0),
    }));
    blocks
}

/// All report sections in order.
#[must_use]
pub fn compose_blocks(
    request: &ReportRequest,
    metrics: &FinancialMetrics,
    chart: Option<&Path>,
) -> Vec<Block> {
    let mut blocks = finance_summary(metrics, chart);
    blocks.extend(expense_breakdown(&request.expenses));
    blocks.extend(income_breakdown(&request.incomes));
    blocks.extend(ledger(&request.ledger()));
    blocks
}

/// Lay the full report out on US letter pages.
#[must_use]
pub fn compose_report(
    request: &ReportRequest,
    metrics: &FinancialMetrics,
    chart: Option<&Path>,
    header: &HeaderContext,
) -> Vec<Page> {
    let blocks = compose_blocks(request, metrics, chart);
    paginate(&blocks, &PageGeometry::letter(), header)
}
