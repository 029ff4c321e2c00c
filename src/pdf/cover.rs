//! Cover page: header band, summary stats, total value, negotiation
//! values, and the methodology disclaimer.

use printpdf::{IndirectFontRef, Mm, PdfLayerReference};

use crate::config::{MARGIN_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::currency::format_pdf_currency;
use crate::models::CollectionReportData;
use crate::pdf::draw;
use crate::pdf::Fonts;

const CONTENT_WIDTH: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;

const DISCLAIMER_LINES: &[&str] = &[
    "Values are derived from the average of up to the three most recent recorded",
    "TCGplayer sales per card, multiplied by the owned quantity. Negotiation values",
    "represent common buyout reference discounts (80% and 70% of the estimated",
    "total). Figures are informational only and do not constitute an appraisal;",
    "actual market prices fluctuate.",
];

pub fn draw_cover(layer: &PdfLayerReference, fonts: &Fonts, data: &CollectionReportData) {
    header_band(layer, fonts, data);
    summary_box(layer, fonts, data);
    total_value_box(layer, fonts, data);
    negotiation_boxes(layer, fonts, data);
    disclaimer(layer, &fonts.bold, &fonts.regular);
}

// -- Header band ------------------------------------------------------------

fn header_band(layer: &PdfLayerReference, fonts: &Fonts, data: &CollectionReportData) {
    layer.set_fill_color(draw::band());
    draw::fill_rect(layer, 0.0, PAGE_HEIGHT_MM - 45.0, PAGE_WIDTH_MM, 45.0);

    layer.set_fill_color(draw::white());
    layer.use_text(
        "Collection Valuation Report",
        22.0,
        Mm(MARGIN_MM),
        Mm(PAGE_HEIGHT_MM - 21.0),
        &fonts.bold,
    );
    layer.use_text(
        &data.list_name,
        13.0,
        Mm(MARGIN_MM),
        Mm(PAGE_HEIGHT_MM - 30.0),
        &fonts.regular,
    );
    let generated = format!(
        "Generated {}",
        data.generated_at.format("%B %-d, %Y %H:%M UTC")
    );
    layer.use_text(
        &generated,
        9.5,
        Mm(MARGIN_MM),
        Mm(PAGE_HEIGHT_MM - 38.0),
        &fonts.regular,
    );
    layer.set_fill_color(draw::ink());
}

// -- Summary stats ----------------------------------------------------------

fn summary_box(layer: &PdfLayerReference, fonts: &Fonts, data: &CollectionReportData) {
    let top = 240.0;
    layer.set_outline_color(draw::border_gray());
    layer.set_outline_thickness(0.5);
    draw::stroke_rect(layer, MARGIN_MM, top - 34.0, CONTENT_WIDTH, 34.0);

    layer.use_text(
        "Collection Summary",
        12.0,
        Mm(MARGIN_MM + 4.0),
        Mm(top - 8.0),
        &fonts.bold,
    );

    let left = MARGIN_MM + 4.0;
    let right = MARGIN_MM + CONTENT_WIDTH / 2.0 + 4.0;
    layer.use_text(
        &format!("Unique cards: {}", data.total_cards),
        10.0,
        Mm(left),
        Mm(top - 18.0),
        &fonts.regular,
    );
    layer.use_text(
        &format!("Total quantity: {}", data.total_quantity),
        10.0,
        Mm(left),
        Mm(top - 26.0),
        &fonts.regular,
    );
    layer.use_text(
        &format!("Successful lookups: {}", data.successful_lookups),
        10.0,
        Mm(right),
        Mm(top - 18.0),
        &fonts.regular,
    );
    layer.use_text(
        &format!("Failed lookups: {}", data.failed_lookups),
        10.0,
        Mm(right),
        Mm(top - 26.0),
        &fonts.regular,
    );
}

// -- Total value ------------------------------------------------------------

fn total_value_box(layer: &PdfLayerReference, fonts: &Fonts, data: &CollectionReportData) {
    let top = 196.0;
    layer.set_fill_color(draw::panel_fill());
    draw::fill_rect(layer, MARGIN_MM, top - 34.0, CONTENT_WIDTH, 34.0);
    layer.set_outline_color(draw::border_gray());
    layer.set_outline_thickness(0.5);
    draw::stroke_rect(layer, MARGIN_MM, top - 34.0, CONTENT_WIDTH, 34.0);

    layer.set_fill_color(draw::muted());
    let label = "Estimated Collection Value";
    layer.use_text(
        label,
        12.0,
        Mm(draw::centered_x(label, 12.0)),
        Mm(top - 10.0),
        &fonts.bold,
    );

    layer.set_fill_color(draw::ink());
    let value = format_pdf_currency(data.total_value);
    layer.use_text(
        &value,
        24.0,
        Mm(draw::centered_x(&value, 24.0)),
        Mm(top - 25.0),
        &fonts.bold,
    );
}

// -- Negotiation values -----------------------------------------------------

fn negotiation_boxes(layer: &PdfLayerReference, fonts: &Fonts, data: &CollectionReportData) {
    let top = 154.0;
    let box_width = (CONTENT_WIDTH - 6.0) / 2.0;
    let boxes = [
        ("80% Negotiation Value", data.value_80_percent, MARGIN_MM),
        (
            "70% Negotiation Value",
            data.value_70_percent,
            MARGIN_MM + box_width + 6.0,
        ),
    ];

    layer.set_outline_color(draw::border_gray());
    layer.set_outline_thickness(0.5);
    for (label, value, x) in boxes {
        draw::stroke_rect(layer, x, top - 28.0, box_width, 28.0);

        layer.set_fill_color(draw::muted());
        let label_x = x + (box_width - draw::approx_text_width(label, 10.0)) / 2.0;
        layer.use_text(label, 10.0, Mm(label_x), Mm(top - 9.0), &fonts.bold);

        layer.set_fill_color(draw::ink());
        let value_text = format_pdf_currency(value);
        let value_x = x + (box_width - draw::approx_text_width(&value_text, 16.0)) / 2.0;
        layer.use_text(&value_text, 16.0, Mm(value_x), Mm(top - 21.0), &fonts.bold);
    }
}

// -- Disclaimer -------------------------------------------------------------

fn disclaimer(layer: &PdfLayerReference, bold: &IndirectFontRef, regular: &IndirectFontRef) {
    layer.set_fill_color(draw::muted());
    layer.use_text("Methodology", 9.0, Mm(MARGIN_MM), Mm(58.0), bold);

    let mut y = 52.0;
    for line in DISCLAIMER_LINES {
        layer.use_text(*line, 7.5, Mm(MARGIN_MM), Mm(y), regular);
        y -= 4.2;
    }
    layer.set_fill_color(draw::ink());
}
