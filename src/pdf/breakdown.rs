//! Breakdown table pages: one row per card with alternating shading, a
//! hard page break every 30 rows (header re-emitted), and the totals
//! block on the final page.

use printpdf::{Mm, PdfLayerReference};

use crate::config::{BREAKDOWN_NAME_MAX_CHARS, MARGIN_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::currency::{format_currency, format_pdf_currency};
use crate::models::{CardValuation, CollectionReportData};
use crate::pdf::draw;
use crate::pdf::Fonts;

const CONTENT_WIDTH: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;

const COL_CODE_X: f32 = MARGIN_MM + 2.0;
const COL_NAME_X: f32 = 47.0;
const COL_QTY_X: f32 = 124.0;
const COL_AVG_X: f32 = 140.0;
const COL_SUBTOTAL_X: f32 = 168.0;

const ROW_HEIGHT: f32 = 6.5;

/// Draw one breakdown page. `rows` is this page's slice (at most 30);
/// the totals block is appended after the last slice.
pub fn draw_breakdown_page(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    data: &CollectionReportData,
    rows: &[CardValuation],
    first_page: bool,
    last_page: bool,
) {
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

    if first_page {
        layer.set_fill_color(draw::ink());
        layer.use_text("Card Breakdown", 14.0, Mm(MARGIN_MM), Mm(y - 4.0), &fonts.bold);
        y -= 12.0;
    }

    y = header_row(layer, fonts, y);

    for (i, card) in rows.iter().enumerate() {
        if i % 2 == 1 {
            layer.set_fill_color(draw::row_shade());
            draw::fill_rect(layer, MARGIN_MM, y - ROW_HEIGHT + 1.5, CONTENT_WIDTH, ROW_HEIGHT);
        }
        layer.set_fill_color(draw::ink());
        let text_y = y - ROW_HEIGHT + 3.0;
        layer.use_text(&card.card_code, 8.0, Mm(COL_CODE_X), Mm(text_y), &fonts.regular);
        layer.use_text(
            &draw::truncate_name(&card.card_name, BREAKDOWN_NAME_MAX_CHARS),
            8.0,
            Mm(COL_NAME_X),
            Mm(text_y),
            &fonts.regular,
        );
        layer.use_text(
            &card.quantity.to_string(),
            8.0,
            Mm(COL_QTY_X),
            Mm(text_y),
            &fonts.regular,
        );
        layer.use_text(
            &format_currency(card.top3_average),
            8.0,
            Mm(COL_AVG_X),
            Mm(text_y),
            &fonts.regular,
        );
        layer.use_text(
            &format_pdf_currency(card.subtotal),
            8.0,
            Mm(COL_SUBTOTAL_X),
            Mm(text_y),
            &fonts.regular,
        );
        y -= ROW_HEIGHT;
    }

    if last_page {
        totals_block(layer, fonts, data, y);
    }
}

fn header_row(layer: &PdfLayerReference, fonts: &Fonts, y: f32) -> f32 {
    layer.set_fill_color(draw::ink());
    let text_y = y - 4.0;
    layer.use_text("Code", 9.0, Mm(COL_CODE_X), Mm(text_y), &fonts.bold);
    layer.use_text("Name", 9.0, Mm(COL_NAME_X), Mm(text_y), &fonts.bold);
    layer.use_text("Qty", 9.0, Mm(COL_QTY_X), Mm(text_y), &fonts.bold);
    layer.use_text("Average", 9.0, Mm(COL_AVG_X), Mm(text_y), &fonts.bold);
    layer.use_text("Subtotal", 9.0, Mm(COL_SUBTOTAL_X), Mm(text_y), &fonts.bold);

    layer.set_outline_color(draw::ink());
    layer.set_outline_thickness(0.5);
    draw::line(layer, MARGIN_MM, text_y - 2.0, MARGIN_MM + CONTENT_WIDTH, text_y - 2.0);

    text_y - 3.5
}

fn totals_block(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    data: &CollectionReportData,
    y: f32,
) {
    let right_edge = MARGIN_MM + CONTENT_WIDTH;
    layer.set_outline_color(draw::ink());
    layer.set_outline_thickness(0.5);
    draw::line(layer, MARGIN_MM, y - 1.0, right_edge, y - 1.0);

    layer.set_fill_color(draw::ink());
    let total = format!(
        "Total ({} unique / {} cards): {}",
        data.total_cards,
        data.total_quantity,
        format_pdf_currency(data.total_value)
    );
    layer.use_text(
        &total,
        11.0,
        Mm(draw::right_aligned_x(&total, 11.0, right_edge)),
        Mm(y - 8.0),
        &fonts.bold,
    );

    layer.set_fill_color(draw::muted());
    let eighty = format!(
        "80% Negotiation Value: {}",
        format_pdf_currency(data.value_80_percent)
    );
    layer.use_text(
        &eighty,
        9.5,
        Mm(draw::right_aligned_x(&eighty, 9.5, right_edge)),
        Mm(y - 15.0),
        &fonts.regular,
    );
    let seventy = format!(
        "70% Negotiation Value: {}",
        format_pdf_currency(data.value_70_percent)
    );
    layer.use_text(
        &seventy,
        9.5,
        Mm(draw::right_aligned_x(&seventy, 9.5, right_edge)),
        Mm(y - 21.0),
        &fonts.regular,
    );
    layer.set_fill_color(draw::ink());
}
