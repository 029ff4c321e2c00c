//! Currency formatting and negotiation-value arithmetic.
//!
//! Formats and aggregates values already computed server-side; per-card
//! averages are never recomputed here.

/// Round a currency amount to 2 decimals, half away from zero.
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute the (70%, 80%) negotiation reference values for a total.
pub fn negotiation_values(total_value: f64) -> (f64, f64) {
    (
        round_currency(total_value * 0.70),
        round_currency(total_value * 0.80),
    )
}

/// Format an amount as a `$`-prefixed plain string with thousands
/// separators and exactly two decimals, e.g. `$1,234.50`.
///
/// Plain-string output keeps currency-symbol placement stable inside the
/// PDF renderer regardless of locale.
pub fn format_pdf_currency(value: f64) -> String {
    format!("${}", grouped_amount(value))
}

/// On-screen variant: `None` renders as `"N/A"`.
pub fn format_currency(value: Option<f64>) -> String {
    match value {
        Some(v) => format_pdf_currency(v),
        None => "N/A".to_string(),
    }
}

/// `1234567.891` -> `1,234,567.89`.
fn grouped_amount(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}{grouped}.{frac:02}")
}
