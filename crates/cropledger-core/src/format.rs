//! Currency and quantity formatting for tables and charts.

use rust_decimal::Decimal;

/// Currency marker printed next to amounts.
///
/// The PDF uses the standard Type1 fonts, which have no rupee glyph.
pub const CURRENCY_MARKER: &str = "Rs.";

/// Format an amount with thousands separators and two decimals.
///
/// ```
/// use cropledger_core::format_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_amount(dec!(1234567.891)), "1,234,567.89");
/// assert_eq!(format_amount(dec!(-42000)), "-42,000.00");
/// ```
#[must_use]
pub fn format_amount(value: Decimal) -> String {
    format_grouped(value, 2)
}

/// Format an amount with thousands separators and no decimals.
#[must_use]
pub fn format_whole(value: Decimal) -> String {
    format_grouped(value, 0)
}

/// Prefix a two-decimal amount with a currency marker: `Rs. 8,000.00`.
#[must_use]
pub fn format_currency(marker: &str, value: Decimal) -> String {
    format!("{marker} {}", format_amount(value))
}

/// Acreage as entered, without trailing zeros: `2`, `2.5`.
#[must_use]
pub fn format_acres(value: Decimal) -> String {
    value.normalize().to_string()
}

fn format_grouped(value: Decimal, decimals: u32) -> String {
    let mut rounded = value.round_dp(decimals);
    if rounded.is_zero() {
        rounded = rounded.abs();
    }
    let text = format!("{:.*}", decimals as usize, rounded);

    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut out = String::with_capacity(text.len() + int_part.len() / 3);
    out.push_str(sign);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec!(0)), "0.00");
        assert_eq!(format_amount(dec!(5)), "5.00");
        assert_eq!(format_amount(dec!(999.999)), "1,000.00");
        assert_eq!(format_amount(dec!(50000)), "50,000.00");
        assert_eq!(format_amount(dec!(123456.7)), "123,456.70");
        assert_eq!(format_amount(dec!(1000000)), "1,000,000.00");
        assert_eq!(format_amount(dec!(-200)), "-200.00");
        assert_eq!(format_amount(dec!(-1234.5)), "-1,234.50");
    }

    #[test]
    fn test_negative_zero_is_unsigned() {
        assert_eq!(format_amount(dec!(-0.001)), "0.00");
        assert_eq!(format_whole(dec!(-0.2)), "0");
    }

    #[test]
    fn test_format_whole() {
        assert_eq!(format_whole(dec!(0)), "0");
        assert_eq!(format_whole(dec!(10000)), "10,000");
        assert_eq!(format_whole(dec!(2500000)), "2,500,000");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency("Rs.", dec!(8000)), "Rs. 8,000.00");
        assert_eq!(format_currency(CURRENCY_MARKER, dec!(-1)), "Rs. -1.00");
    }

    #[test]
    fn test_format_acres() {
        assert_eq!(format_acres(dec!(2)), "2");
        assert_eq!(format_acres(dec!(2.50)), "2.5");
        assert_eq!(format_acres(dec!(0.75)), "0.75");
    }
}
