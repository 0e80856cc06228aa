//! Display helpers for the presentation layer (en-US conventions).
//!
//! The numeric contract of the core is raw `f64`; these are convenience
//! renderings only.

use chrono::NaiveDate;

/// `1234.5, "USD"` → `$1,234.50`; negatives as `-$12.00`.
/// Unknown codes are prefixed: `CHF 1,234.50`.
pub fn format_currency(value: f64, currency: &str) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let code = currency.trim().to_uppercase();
    let amount = group_thousands(&format!("{:.2}", value.abs()));
    let sign = if value < 0.0 && amount.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match currency_symbol(&code) {
        Some(symbol) => format!("{sign}{symbol}{amount}"),
        None => format!("{sign}{code}\u{a0}{amount}"),
    }
}

/// Percent value (already ×100) with two decimals: `-5.257` → `-5.26%`.
pub fn format_percentage(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let rendered = group_thousands(&format!("{:.2}", value.abs()));
    if value < 0.0 && rendered != "0.00" {
        format!("-{rendered}%")
    } else {
        format!("{rendered}%")
    }
}

/// Percent with an explicit `+` for gains, as shown next to holdings.
pub fn format_signed_percentage(value: f64) -> String {
    let rendered = format_percentage(value);
    if rendered.starts_with('-') {
        rendered
    } else {
        format!("+{rendered}")
    }
}

/// Date styles used across the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `January 15, 2023`
    Long,
    /// `Jan 15, 2023`
    Short,
    /// `3 days ago`, relative to a reference day
    Relative,
}

pub fn format_date(date: NaiveDate, style: DateStyle, today: NaiveDate) -> String {
    match style {
        DateStyle::Long => date.format("%B %-d, %Y").to_string(),
        DateStyle::Short => date.format("%b %-d, %Y").to_string(),
        DateStyle::Relative => relative_date(date, today),
    }
}

/// Coarse "time ago" label; the distance is absolute, so future dates read
/// the same as past ones.
pub fn relative_date(date: NaiveDate, today: NaiveDate) -> String {
    let days = (today - date).num_days().abs();
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=29 => format!("{} weeks ago", days / 7),
        30..=364 => format!("{} months ago", days / 30),
        _ => format!("{} years ago", days / 365),
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        "INR" => Some("₹"),
        _ => None,
    }
}

/// `"1234567.89"` → `"1,234,567.89"`
fn group_thousands(fixed: &str) -> String {
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed, ""));
    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if !frac_part.is_empty() {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}
