//! Decoding of the submitted report form.

use cropledger_core::{EntryKind, RawEntries, ReportForm};

/// Decode an `application/x-www-form-urlencoded` body into a [`ReportForm`].
///
/// Entry fields (`expense_category`, `income_amount`, ...) may repeat; every
/// occurrence is kept in submission order, so a single entry becomes a list
/// of one. For scalar fields the last occurrence wins. Unknown keys are
/// ignored.
pub fn parse_report_form(body: &[u8]) -> ReportForm {
    let mut form = ReportForm::default();

    for (key, value) in form_urlencoded::parse(body) {
        let value = value.into_owned();
        match key.as_ref() {
            "farmer_name" => form.farmer_name = value,
            "crop_name" => form.crop_name = value,
            "season" => form.season = value,
            "total_acres" => form.total_acres = value,
            "date_of_sowing" => form.date_of_sowing = value,
            "date_of_harvest" => form.date_of_harvest = value,
            "location" => form.location = value,
            other => {
                for kind in [EntryKind::Expense, EntryKind::Income] {
                    let Some(field) = entry_field(other, kind) else {
                        continue;
                    };
                    let entries = match kind {
                        EntryKind::Expense => &mut form.expenses,
                        EntryKind::Income => &mut form.incomes,
                    };
                    push_entry_field(entries, field, value);
                    break;
                }
            }
        }
    }
    form
}

fn push_entry_field(entries: &mut RawEntries, field: &str, value: String) {
    // Some form builders append `[]` to repeated fields.
    let field = field.strip_suffix("[]").unwrap_or(field);
    let list = match field {
        "category" => &mut entries.categories,
        "amount" => &mut entries.amounts,
        "date" => &mut entries.dates,
        "description" => &mut entries.descriptions,
        _ => return,
    };
    list.push(value);
}

/// `amount` for `expense_amount` when `kind` is an expense.
fn entry_field(key: &str, kind: EntryKind) -> Option<&str> {
    key.strip_prefix(kind.field_prefix())?.strip_prefix('_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_fields_are_decoded() {
        let form = parse_report_form(
            b"farmer_name=A.+Singh&crop_name=Wheat&season=Rabi&total_acres=2\
              &location=Ludhiana%2C+PB",
        );

        assert_eq!(form.farmer_name, "A. Singh");
        assert_eq!(form.crop_name, "Wheat");
        assert_eq!(form.total_acres, "2");
        assert_eq!(form.location, "Ludhiana, PB");
    }

    #[test]
    fn test_repeated_entry_fields_become_lists() {
        let form = parse_report_form(
            b"expense_category=Seeds&expense_amount=8000\
              &expense_date=2024-01-10&expense_description=\
              &expense_category=Urea&expense_amount=1500\
              &expense_date=2024-01-20&expense_description=2+bags\
              &income_category=Sale&income_amount=50000",
        );

        assert_eq!(form.expenses.categories, vec!["Seeds", "Urea"]);
        assert_eq!(form.expenses.amounts, vec!["8000", "1500"]);
        assert_eq!(form.expenses.descriptions, vec!["", "2 bags"]);
        assert_eq!(form.incomes.categories, vec!["Sale"]);
        assert_eq!(form.incomes.amounts, vec!["50000"]);
        assert!(form.incomes.dates.is_empty());
    }

    #[test]
    fn test_bracketed_names_and_unknown_keys() {
        let form = parse_report_form(
            b"income_category%5B%5D=Sale&income_amount[]=10&csrf=abc&expense_colour=red",
        );

        assert_eq!(form.incomes.categories, vec!["Sale"]);
        assert_eq!(form.incomes.amounts, vec!["10"]);
        assert!(form.expenses.is_empty());
    }

    #[test]
    fn test_entry_field() {
        assert_eq!(entry_field("expense_amount", EntryKind::Expense), Some("amount"));
        assert_eq!(entry_field("income_date", EntryKind::Income), Some("date"));
        assert_eq!(entry_field("income_date", EntryKind::Expense), None);
        assert_eq!(entry_field("incomes", EntryKind::Income), None);
    }
}
