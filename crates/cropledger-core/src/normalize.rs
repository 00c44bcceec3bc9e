//! Cleanup of raw multi-entry form input.
//!
//! Normalization is deliberately lossy: a row with a blank category, a
//! missing or unparsable amount, or a negative amount is dropped without
//! failing the batch. Each drop is logged at debug level.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::model::{EntryKind, RawEntries, TransactionEntry};

/// Parse a submitted amount.
///
/// Accepts plain decimals (`"8000"`, `" 12.50 "`) and scientific notation
/// (`"1e3"`). Returns `None` for blank, malformed or negative input.
#[must_use]
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let value = Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()?;
    if value < Decimal::ZERO {
        return None;
    }
    Some(value)
}

/// Why a raw row was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DropReason {
    BlankCategory,
    MissingAmount,
    BadAmount,
}

fn normalize_row(raw: &RawEntries, index: usize) -> Result<TransactionEntry, DropReason> {
    let category = raw.categories[index].trim();
    if category.is_empty() {
        return Err(DropReason::BlankCategory);
    }

    let amount = match raw.amounts.get(index) {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Err(DropReason::MissingAmount),
    };
    let amount = parse_amount(amount).ok_or(DropReason::BadAmount)?;

    Ok(TransactionEntry {
        category: category.to_string(),
        amount,
        date: raw.dates.get(index).cloned().unwrap_or_default(),
        description: raw
            .descriptions
            .get(index)
            .map(|d| d.trim().to_string())
            .unwrap_or_default(),
    })
}

/// Build clean entries from parallel raw lists.
///
/// Iterates by index over `raw.categories`; the other lists may be shorter.
/// A missing date or description becomes an empty string, a missing amount
/// drops the row. Applied identically to incomes and expenses; `kind` only
/// labels the diagnostics.
#[must_use]
pub fn normalize_entries(raw: &RawEntries, kind: EntryKind) -> Vec<TransactionEntry> {
    let mut entries = Vec::with_capacity(raw.categories.len());

    for index in 0..raw.categories.len() {
        match normalize_row(raw, index) {
            Ok(entry) => entries.push(entry),
            Err(reason) => {
                tracing::debug!(
                    kind = %kind,
                    index,
                    ?reason,
                    "dropping malformed {} entry",
                    kind.field_prefix()
                );
            }
        }
    }

    entries
}
