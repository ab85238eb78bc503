// Display helpers for amounts, counts and timestamps
use chrono::{DateTime, Utc};

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code.to_ascii_uppercase().as_str() {
        "NGN" => Some("₦"),
        "USD" => Some("$"),
        "GBP" => Some("£"),
        "EUR" => Some("€"),
        "GHS" => Some("GH₵"),
        "KES" => Some("KSh"),
        _ => None,
    }
}

/// Group the integer part of a plain decimal string in threes
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn format_fixed(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut out = String::new();
    // -0.00 is just 0.00
    if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// `1234.5, "NGN"` -> `₦1,234.50`; unknown codes get a `XYZ ` prefix
pub fn format_currency(amount: f64, code: &str) -> String {
    let number = format_fixed(amount, 2);
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number.as_str()),
    };

    match currency_symbol(code) {
        Some(symbol) => format!("{}{}{}", sign, symbol, digits),
        None => format!("{}{} {}", sign, code.to_ascii_uppercase(), digits),
    }
}

/// Whole numbers with thousands separators
pub fn format_number(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// One decimal place, e.g. `33.3%`
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// `12 Mar 2024`
pub fn format_date(value: &DateTime<Utc>) -> String {
    value.format("%d %b %Y").to_string()
}

/// `12 Mar 2024, 09:30`
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format("%d %b %Y, %H:%M").to_string()
}

pub fn format_optional_date(value: Option<&DateTime<Utc>>) -> String {
    value.map(format_date).unwrap_or_else(|| "-".to_string())
}

/// Cut to `max` characters, ending in an ellipsis when shortened
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}
