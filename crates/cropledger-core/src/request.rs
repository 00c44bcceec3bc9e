//! Validation of a submitted report form.
//!
//! This is the boundary check that runs before any metric or rendering work:
//! required metadata must be present, acreage must be positive, and at least
//! one entry must survive normalization.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::model::{CropDetails, EntryKind, RawEntries, ReportRequest};
use crate::normalize::{normalize_entries, parse_amount};

/// Error returned when a form cannot become a report request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Farmer name, crop name or season is blank.
    #[error("Please fill in all required fields.")]
    MissingField(&'static str),
    /// Acreage is missing, malformed, zero or negative.
    #[error("Please fill in all required fields.")]
    InvalidAcres(String),
    /// Neither an income nor an expense entry survived normalization.
    #[error("Please provide at least one income or expense entry.")]
    NoEntries,
}

/// The report form as submitted, all fields still text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportForm {
    /// Farmer name (required).
    pub farmer_name: String,
    /// Crop name (required).
    pub crop_name: String,
    /// Season (required).
    pub season: String,
    /// Cultivated acres (required, positive decimal).
    pub total_acres: String,
    /// Sowing date.
    pub date_of_sowing: String,
    /// Harvest date.
    pub date_of_harvest: String,
    /// Location.
    pub location: String,
    /// Raw expense rows.
    pub expenses: RawEntries,
    /// Raw income rows.
    pub incomes: RawEntries,
}

fn required(value: &str, field: &'static str) -> Result<String, InputError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(InputError::MissingField(field));
    }
    Ok(value.to_string())
}

fn parse_acres(text: &str) -> Result<Decimal, InputError> {
    match parse_amount(text) {
        Some(acres) if acres > Decimal::ZERO => Ok(acres),
        _ => Err(InputError::InvalidAcres(text.to_string())),
    }
}

impl ReportForm {
    /// Check the form and normalize its entries into a [`ReportRequest`].
    pub fn validate(&self) -> Result<ReportRequest, InputError> {
        let details = CropDetails {
            farmer_name: required(&self.farmer_name, "farmer_name")?,
            crop_name: required(&self.crop_name, "crop_name")?,
            season: required(&self.season, "season")?,
            total_acres: parse_acres(&self.total_acres)?,
            date_of_sowing: self.date_of_sowing.clone(),
            date_of_harvest: self.date_of_harvest.clone(),
            location: self.location.trim().to_string(),
        };

        let expenses = normalize_entries(&self.expenses, EntryKind::Expense);
        let incomes = normalize_entries(&self.incomes, EntryKind::Income);
        if expenses.is_empty() && incomes.is_empty() {
            return Err(InputError::NoEntries);
        }

        Ok(ReportRequest {
            details,
            expenses,
            incomes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn single(category: &str, amount: &str, date: &str) -> RawEntries {
        RawEntries {
            categories: vec![category.to_string()],
            amounts: vec![amount.to_string()],
            dates: vec![date.to_string()],
            descriptions: vec![String::new()],
        }
    }

    fn valid_form() -> ReportForm {
        ReportForm {
            farmer_name: " A. Singh ".into(),
            crop_name: "Wheat".into(),
            season: "Rabi".into(),
            total_acres: "2".into(),
            date_of_sowing: "2023-11-15".into(),
            date_of_harvest: "2024-04-01".into(),
            location: " Ludhiana ".into(),
            expenses: single("Seeds", "8000", "2024-01-10"),
            incomes: single("Sale", "50000", "2024-04-01"),
        }
    }

    #[test]
    fn test_valid_form() {
        let request = valid_form().validate().unwrap();

        assert_eq!(request.details.farmer_name, "A. Singh");
        assert_eq!(request.details.location, "Ludhiana");
        assert_eq!(request.details.total_acres, dec!(2));
        assert_eq!(request.expenses.len(), 1);
        assert_eq!(request.incomes.len(), 1);
    }

    #[test]
    fn test_missing_required_field() {
        let mut form = valid_form();
        form.season = "   ".into();
        assert_eq!(form.validate(), Err(InputError::MissingField("season")));

        let mut form = valid_form();
        form.farmer_name = String::new();
        let err = form.validate().unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all required fields.");
    }

    #[test]
    fn test_acres_must_be_positive() {
        for acres in ["0", "-2", "", "two"] {
            let mut form = valid_form();
            form.total_acres = acres.into();
            assert!(
                matches!(form.validate(), Err(InputError::InvalidAcres(_))),
                "acres {acres:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_requires_some_entry() {
        let mut form = valid_form();
        form.expenses = single("Seeds", "abc", "");
        form.incomes = RawEntries::default();

        let err = form.validate().unwrap_err();
        assert_eq!(err, InputError::NoEntries);
        assert_eq!(
            err.to_string(),
            "Please provide at least one income or expense entry."
        );
    }

    #[test]
    fn test_one_kind_is_enough() {
        let mut form = valid_form();
        form.incomes = RawEntries::default();

        let request = form.validate().unwrap();
        assert!(request.incomes.is_empty());
        assert_eq!(request.expenses.len(), 1);
    }
}
