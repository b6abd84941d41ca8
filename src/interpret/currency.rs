//! Rupiah amounts: reading `.`-grouped tokens out of prose and formatting
//! values back for display.

use crate::interpret::chart::ValueFormat;

/// Parse a token such as `10.765.306` into `10765306`.
///
/// Every `.` is dropped before parsing. Anything that does not reduce to a
/// base-10 integer (letters, empty input, overflow) yields 0.
pub fn parse_amount_token(token: &str) -> u64 {
    let digits: String = token.chars().filter(|&c| c != '.').collect();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    digits.parse().unwrap_or(0)
}

/// `Rp 10.765.306`, rounded to whole rupiah.
pub fn format_rupiah(value: f64) -> String {
    let (sign, whole) = split_sign(value);
    format!("{sign}Rp {}", group_thousands(whole))
}

/// `10.765.306`
pub fn format_plain(value: f64) -> String {
    let (sign, whole) = split_sign(value);
    format!("{sign}{}", group_thousands(whole))
}

/// Short axis label in millions, e.g. `Rp 10.8M`.
pub fn format_compact(value: f64) -> String {
    format!("Rp {:.1}M", value / 1_000_000.0)
}

pub fn format_value(value: f64, format: Option<ValueFormat>) -> String {
    match format {
        Some(ValueFormat::Currency) => format_rupiah(value),
        Some(ValueFormat::Plain) | None => format_plain(value),
    }
}

fn split_sign(value: f64) -> (&'static str, u64) {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    (sign, rounded.abs() as u64)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
