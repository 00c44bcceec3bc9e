//! Domain types for a seasonal crop finance report.
//!
//! Entries are built once from the submitted form and never mutated; the
//! report pipeline only reads them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an entry records money coming in or going out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// Sale proceeds, subsidies and other receipts.
    Income,
    /// Inputs, labour, rent and other costs.
    Expense,
}

impl EntryKind {
    /// Prefix used by the form fields for this kind (`income_*` / `expense_*`).
    #[must_use]
    pub const fn field_prefix(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => f.write_str("Income"),
            Self::Expense => f.write_str("Expense"),
        }
    }
}

/// One income or expense record that survived normalization.
///
/// `category` is never empty and `amount` is never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEntry {
    /// Free-text label such as "Seeds" or "Sale".
    pub category: String,
    /// Non-negative amount.
    pub amount: Decimal,
    /// Date text as entered; only used for display and ledger ordering.
    pub date: String,
    /// Optional note, empty when not given.
    pub description: String,
}

impl TransactionEntry {
    /// Create an entry with no description.
    #[must_use]
    pub fn new(category: impl Into<String>, amount: Decimal, date: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            amount,
            date: date.into(),
            description: String::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The description as printed in tables: `-` when blank.
    #[must_use]
    pub fn description_or_dash(&self) -> &str {
        if self.description.trim().is_empty() {
            "-"
        } else {
            &self.description
        }
    }
}

/// Parallel lists of raw field values for one entry kind.
///
/// The web layer always produces lists, even for a single submitted entry.
/// Lists may have different lengths; `categories` drives iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntries {
    /// Category field values.
    pub categories: Vec<String>,
    /// Amount field values (unparsed).
    pub amounts: Vec<String>,
    /// Date field values.
    pub dates: Vec<String>,
    /// Description field values.
    pub descriptions: Vec<String>,
}

impl RawEntries {
    /// True when no category was submitted at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Farmer and crop metadata shown on the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropDetails {
    /// Name printed in the page header.
    pub farmer_name: String,
    /// Crop grown this season.
    pub crop_name: String,
    /// Season label, e.g. "Rabi" or "Kharif".
    pub season: String,
    /// Cultivated area, always > 0 once validated.
    pub total_acres: Decimal,
    /// Sowing date text.
    pub date_of_sowing: String,
    /// Harvest date text.
    pub date_of_harvest: String,
    /// Village or district.
    pub location: String,
}

/// Everything the report pipeline needs for one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    /// Farmer and crop metadata.
    pub details: CropDetails,
    /// Expense entries in input order.
    pub expenses: Vec<TransactionEntry>,
    /// Income entries in input order.
    pub incomes: Vec<TransactionEntry>,
}

impl ReportRequest {
    /// Merged ledger view of this request.
    #[must_use]
    pub fn ledger(&self) -> Vec<LedgerEntry> {
        build_ledger(&self.expenses, &self.incomes)
    }
}

/// A row of the combined ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    /// Date text of the source entry.
    pub date: String,
    /// The source entry's category.
    pub particulars: String,
    /// Whether the source was an income or an expense.
    pub kind: EntryKind,
    /// Description, `-` when blank.
    pub description: String,
    /// Amount of the source entry.
    pub amount: Decimal,
}

impl LedgerEntry {
    fn from_entry(entry: &TransactionEntry, kind: EntryKind) -> Self {
        Self {
            date: entry.date.clone(),
            particulars: entry.category.clone(),
            kind,
            description: entry.description_or_dash().to_string(),
            amount: entry.amount,
        }
    }
}

/// Merge expenses and incomes into one list ordered by date text.
///
/// Dates compare as plain strings, so empty dates come first and ISO
/// `YYYY-MM-DD` dates come out chronologically. The sort is stable: on equal
/// dates expenses stay ahead of incomes and each keeps its input order.
#[must_use]
pub fn build_ledger(
    expenses: &[TransactionEntry],
    incomes: &[TransactionEntry],
) -> Vec<LedgerEntry> {
    let mut ledger: Vec<LedgerEntry> = expenses
        .iter()
        .map(|e| LedgerEntry::from_entry(e, EntryKind::Expense))
        .chain(
            incomes
                .iter()
                .map(|e| LedgerEntry::from_entry(e, EntryKind::Income)),
        )
        .collect();
    ledger.sort_by(|a, b| a.date.cmp(&b.date));
    ledger
}
