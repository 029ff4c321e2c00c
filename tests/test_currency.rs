//! Unit tests for currency formatting and negotiation arithmetic.

mod common;

use collection_report::currency::{
    format_currency, format_pdf_currency, negotiation_values, round_currency,
};

// ---------------------------------------------------------------------------
// format_pdf_currency
// ---------------------------------------------------------------------------

#[test]
fn pdf_currency_starts_with_dollar_and_has_two_decimals() {
    for value in [0.0, 0.5, 8.5, 15.0, 999.99, 1234.5, 1234567.891] {
        let formatted = format_pdf_currency(value);
        assert!(formatted.starts_with('$'), "{formatted}");
        let decimals = formatted.rsplit('.').next().unwrap();
        assert_eq!(decimals.len(), 2, "{formatted}");
        assert!(decimals.chars().all(|c| c.is_ascii_digit()), "{formatted}");
    }
}

#[test]
fn pdf_currency_groups_thousands() {
    assert_eq!(format_pdf_currency(0.0), "$0.00");
    assert_eq!(format_pdf_currency(8.5), "$8.50");
    assert_eq!(format_pdf_currency(999.99), "$999.99");
    assert_eq!(format_pdf_currency(1000.0), "$1,000.00");
    assert_eq!(format_pdf_currency(1234567.891), "$1,234,567.89");
}

// ---------------------------------------------------------------------------
// format_currency
// ---------------------------------------------------------------------------

#[test]
fn null_average_renders_as_na() {
    assert_eq!(format_currency(None), "N/A");
}

#[test]
fn present_average_matches_pdf_variant() {
    assert_eq!(format_currency(Some(8.5)), "$8.50");
    assert_eq!(format_currency(Some(1500.0)), "$1,500.00");
}

// ---------------------------------------------------------------------------
// round_currency / negotiation_values
// ---------------------------------------------------------------------------

#[test]
fn round_currency_rounds_to_cents() {
    assert_eq!(round_currency(26.949999999999996), 26.95);
    assert_eq!(round_currency(30.800000000000004), 30.8);
    assert_eq!(round_currency(10.0), 10.0);
}

#[test]
fn negotiation_values_are_rounded_percentages() {
    let (seventy, eighty) = negotiation_values(38.50);
    assert_eq!(seventy, 26.95);
    assert_eq!(eighty, 30.80);

    assert_eq!(negotiation_values(0.0), (0.0, 0.0));
}

#[test]
fn sample_payload_values_are_consistent() {
    let cards = vec![
        common::sample_card("ST01-001", "Monkey D. Luffy", "https://img/1.png", 2, Some(15.0)),
        common::sample_card("ST01-013", "Trafalgar Law", "https://img/2.png", 1, Some(8.5)),
        common::sample_card("OP01-120", "Shanks", "https://img/3.png", 3, None),
    ];
    let data = common::sample_report("Sample", cards);

    let subtotal_sum: f64 = data.cards.iter().map(|c| c.subtotal).sum();
    assert_eq!(data.total_value, round_currency(subtotal_sum));
    assert_eq!(data.value_80_percent, round_currency(data.total_value * 0.80));
    assert_eq!(data.value_70_percent, round_currency(data.total_value * 0.70));
}
