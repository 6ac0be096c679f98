//! Lenient field coercion.
//!
//! Seed rows and salary band forms arrive as text. Optional fields are
//! coerced with the functions here, which never fail: blank or unparsable
//! input becomes `None` and the row carries on.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept for monetary values.
pub const MONEY_SCALE: u32 = 2;

/// Largest storable amount in either direction: twelve digits, two of them
/// after the point.
// 999_999_999_999 split into 32-bit words.
pub const MAX_MONEY: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Returns the trimmed value of `field`, or an empty string when absent.
///
/// Used for required text fields, which are taken verbatim apart from
/// surrounding whitespace.
pub fn required_text(fields: &HashMap<String, String>, field: &str) -> String {
    fields
        .get(field)
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Returns the trimmed value of `field`, or `None` when absent or blank.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use salary_benchmarks::parse::optional_text;
///
/// let mut fields = HashMap::new();
/// fields.insert("industry".to_string(), "  iGaming ".to_string());
/// fields.insert("notes".to_string(), "   ".to_string());
///
/// assert_eq!(optional_text(&fields, "industry"), Some("iGaming".to_string()));
/// assert_eq!(optional_text(&fields, "notes"), None);
/// assert_eq!(optional_text(&fields, "missing"), None);
/// ```
pub fn optional_text(fields: &HashMap<String, String>, field: &str) -> Option<String> {
    fields.get(field).and_then(|value| non_blank(value))
}

/// Trims `value`, returning `None` if nothing is left.
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parses an optional whole number.
///
/// Blank or unparsable input returns `None`; this never fails.
///
/// # Examples
///
/// ```
/// use salary_benchmarks::parse::parse_optional_int;
///
/// assert_eq!(parse_optional_int(Some(" 5 ")), Some(5));
/// assert_eq!(parse_optional_int(Some("five")), None);
/// assert_eq!(parse_optional_int(Some("")), None);
/// assert_eq!(parse_optional_int(None), None);
/// ```
pub fn parse_optional_int(value: Option<&str>) -> Option<i64> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

/// Parses an optional monetary amount, rounded to two decimal places.
///
/// Accepts plain decimals (`"40000"`, `"1234.567"`) and scientific notation
/// (`"4e4"`). Blank, unparsable or out-of-range input returns `None`; this
/// never fails. Midpoints round away from zero and the result always carries
/// a scale of exactly two, so `"40000"` becomes `40000.00`.
///
/// # Examples
///
/// ```
/// use salary_benchmarks::parse::parse_optional_decimal;
///
/// let amount = parse_optional_decimal(Some("40000")).unwrap();
/// assert_eq!(amount.to_string(), "40000.00");
/// assert_eq!(parse_optional_decimal(Some("abc")), None);
/// assert_eq!(parse_optional_decimal(Some("10000000000")), None);
/// ```
pub fn parse_optional_decimal(value: Option<&str>) -> Option<Decimal> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()?;
    to_money(parsed)
}

/// Rounds an amount to the monetary scale.
///
/// Returns `None` when the rounded amount exceeds [`MAX_MONEY`] in
/// magnitude.
pub fn to_money(amount: Decimal) -> Option<Decimal> {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded.abs() > MAX_MONEY {
        return None;
    }
    rounded.rescale(MONEY_SCALE);
    (rounded.scale() == MONEY_SCALE).then_some(rounded)
}
