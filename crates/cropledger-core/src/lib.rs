//! Core types for cropledger
//!
//! This crate provides the domain layer shared by the report generator and the
//! web front end:
//!
//! - [`TransactionEntry`] - A single income or expense record
//! - [`RawEntries`] - Parallel form lists as submitted, before cleanup
//! - [`normalize_entries`] - Turns raw lists into clean entries, dropping bad rows
//! - [`FinancialMetrics`] - Totals, profit/loss and cost per acre
//! - [`LedgerEntry`] - Merged, date-ordered view of both entry kinds
//! - [`ReportForm`] - Boundary validation producing a [`ReportRequest`]
//!
//! # Example
//!
//! ```
//! use cropledger_core::{EntryKind, FinancialMetrics, RawEntries, normalize_entries};
//! use rust_decimal_macros::dec;
//!
//! let raw = RawEntries {
//!     categories: vec!["Seeds".into(), "Labour".into()],
//!     amounts: vec!["8000".into(), "not a number".into()],
//!     dates: vec!["2024-01-10".into()],
//!     descriptions: vec![],
//! };
//!
//! // The malformed second row is dropped, the first survives.
//! let expenses = normalize_entries(&raw, EntryKind::Expense);
//! assert_eq!(expenses.len(), 1);
//! assert_eq!(expenses[0].amount, dec!(8000));
//!
//! let total = cropledger_core::total_expense(&expenses).unwrap();
//! let per_acre = cropledger_core::cost_per_acre(total, dec!(2)).unwrap();
//! assert_eq!(per_acre, dec!(4000));
//! # let _ = FinancialMetrics::default();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod format;
pub mod metrics;
pub mod model;
pub mod normalize;
pub mod request;

pub use format::{format_acres, format_amount, format_currency, format_whole, CURRENCY_MARKER};
pub use metrics::{
    cost_per_acre, profit_or_loss, total_expense, total_income, FinancialMetrics, MetricsError,
};
pub use model::{
    build_ledger, CropDetails, EntryKind, LedgerEntry, RawEntries, ReportRequest, TransactionEntry,
};
pub use normalize::{normalize_entries, parse_amount};
pub use request::{InputError, ReportForm};

// Re-export commonly used external types
pub use rust_decimal::Decimal;
