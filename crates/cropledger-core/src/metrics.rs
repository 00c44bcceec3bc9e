//! Seasonal financial metrics.
//!
//! Sums run in list order over exact decimals, so results are reproducible
//! and independent of the order entries were submitted in.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::model::{ReportRequest, TransactionEntry};

/// Error returned when a metric cannot be computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    /// Cost per acre needs a positive acreage.
    #[error("Total acres must be greater than zero")]
    InvalidInput {
        /// The rejected acreage.
        total_acres: Decimal,
    },
    /// A result does not fit in a [`Decimal`].
    #[error("{quantity} is too large to calculate")]
    Overflow {
        /// The figure being computed, e.g. `Total income`.
        quantity: &'static str,
    },
}

fn checked_sum(
    entries: &[TransactionEntry],
    quantity: &'static str,
) -> Result<Decimal, MetricsError> {
    entries.iter().try_fold(Decimal::ZERO, |total, entry| {
        total
            .checked_add(entry.amount)
            .ok_or(MetricsError::Overflow { quantity })
    })
}

/// Sum of all income amounts; zero when there are none.
pub fn total_income(incomes: &[TransactionEntry]) -> Result<Decimal, MetricsError> {
    checked_sum(incomes, "Total income")
}

/// Sum of all expense amounts; zero when there are none.
pub fn total_expense(expenses: &[TransactionEntry]) -> Result<Decimal, MetricsError> {
    checked_sum(expenses, "Total expense")
}

/// Profit (positive), loss (negative) or break-even (zero).
pub fn profit_or_loss(
    total_income: Decimal,
    total_expense: Decimal,
) -> Result<Decimal, MetricsError> {
    total_income
        .checked_sub(total_expense)
        .ok_or(MetricsError::Overflow {
            quantity: "Profit/Loss",
        })
}

/// Cost of cultivation per acre.
///
/// Fails for zero or negative acreage. Zero expense yields zero.
pub fn cost_per_acre(
    total_expense: Decimal,
    total_acres: Decimal,
) -> Result<Decimal, MetricsError> {
    if total_acres <= Decimal::ZERO {
        return Err(MetricsError::InvalidInput { total_acres });
    }
    total_expense
        .checked_div(total_acres)
        .ok_or(MetricsError::Overflow {
            quantity: "Cost per acre",
        })
}

/// The derived figures printed in the finance summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FinancialMetrics {
    /// Sum of incomes.
    pub total_income: Decimal,
    /// Sum of expenses.
    pub total_expense: Decimal,
    /// Income minus expense.
    pub profit_or_loss: Decimal,
    /// Expense divided by cultivated acres.
    pub cost_per_acre: Decimal,
}

impl FinancialMetrics {
    /// Compute all metrics for a request.
    pub fn compute(request: &ReportRequest) -> Result<Self, MetricsError> {
        let total_income = total_income(&request.incomes)?;
        let total_expense = total_expense(&request.expenses)?;
        Ok(Self {
            total_income,
            total_expense,
            profit_or_loss: profit_or_loss(total_income, total_expense)?,
            cost_per_acre: cost_per_acre(total_expense, request.details.total_acres)?,
        })
    }

    /// Total production, reported as equal to total income.
    #[must_use]
    pub const fn total_production(&self) -> Decimal {
        self.total_income
    }
}
