//! Card-detail pages: four bordered rows per page, each with the
//! materialized image (or placeholder), name/code, recent sales, and the
//! average/subtotal panel.

use printpdf::{
    ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm, PdfLayerReference, Px,
};

use crate::config::{DETAIL_NAME_MAX_CHARS, MARGIN_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::currency::{format_currency, format_pdf_currency};
use crate::images::{CachedImage, EncodedImage, ImageCache};
use crate::models::CardValuation;
use crate::pdf::draw;
use crate::pdf::Fonts;

const CONTENT_WIDTH: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
const CONTENT_TOP: f32 = PAGE_HEIGHT_MM - MARGIN_MM;

/// Vertical step per card row; the drawn border is slightly shorter to
/// leave a gap between rows.
const ROW_STEP: f32 = 63.0;
const ROW_HEIGHT: f32 = 60.0;

const IMAGE_HEIGHT: f32 = 54.0;
/// Width follows the 744x1044 canvas aspect.
const IMAGE_WIDTH: f32 = IMAGE_HEIGHT * 744.0 / 1044.0;

pub fn draw_detail_page(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    cards: &[CardValuation],
    images: &ImageCache,
) {
    for (i, card) in cards.iter().enumerate() {
        let row_top = CONTENT_TOP - i as f32 * ROW_STEP;
        draw_card_row(layer, fonts, card, images, row_top);
    }
}

fn draw_card_row(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    card: &CardValuation,
    images: &ImageCache,
    row_top: f32,
) {
    let row_bottom = row_top - ROW_HEIGHT;

    layer.set_outline_color(draw::border_gray());
    layer.set_outline_thickness(0.4);
    draw::stroke_rect(layer, MARGIN_MM, row_bottom, CONTENT_WIDTH, ROW_HEIGHT);

    // Image cell
    let image_x = MARGIN_MM + 3.0;
    let image_y = row_bottom + (ROW_HEIGHT - IMAGE_HEIGHT) / 2.0;
    let cached = images.get(&card.card_src);
    match cached {
        Some(CachedImage::Ready(encoded)) => {
            if let Err(err) = embed_card_image(layer, encoded, image_x, image_y) {
                log::warn!("embedding image for {} failed: {err}", card.card_code);
                image_placeholder(layer, fonts, image_x, image_y);
            }
        }
        _ => image_placeholder(layer, fonts, image_x, image_y),
    }

    // Name, code, and sales
    let text_x = image_x + IMAGE_WIDTH + 5.0;
    layer.set_fill_color(draw::ink());
    layer.use_text(
        &draw::truncate_name(&card.card_name, DETAIL_NAME_MAX_CHARS),
        11.0,
        Mm(text_x),
        Mm(row_top - 8.0),
        &fonts.bold,
    );
    layer.set_fill_color(draw::muted());
    layer.use_text(&card.card_code, 9.0, Mm(text_x), Mm(row_top - 14.0), &fonts.regular);

    layer.set_fill_color(draw::ink());
    sales_lines(layer, fonts, card, text_x, row_top - 23.0);

    // Average / subtotal panel
    value_panel(layer, fonts, card, row_top);
}

fn sales_lines(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    card: &CardValuation,
    x: f32,
    mut y: f32,
) {
    if let Some(reason) = &card.error {
        layer.set_fill_color(draw::muted());
        layer.use_text(reason.as_str(), 8.0, Mm(x), Mm(y), &fonts.regular);
        layer.set_fill_color(draw::ink());
        return;
    }
    if card.last_sales.is_empty() {
        layer.set_fill_color(draw::muted());
        layer.use_text("No recent sales data", 8.0, Mm(x), Mm(y), &fonts.regular);
        layer.set_fill_color(draw::ink());
        return;
    }

    for (n, sale) in card.last_sales.iter().take(3).enumerate() {
        let line = format!(
            "{}. {} - {} - {}",
            n + 1,
            sale.order_date,
            sale.condition,
            format_pdf_currency(sale.purchase_price)
        );
        layer.use_text(&line, 8.0, Mm(x), Mm(y), &fonts.regular);
        y -= 5.0;
    }
}

fn value_panel(layer: &PdfLayerReference, fonts: &Fonts, card: &CardValuation, row_top: f32) {
    let right_edge = MARGIN_MM + CONTENT_WIDTH - 4.0;

    let qty = format!("Qty: {}", card.quantity);
    layer.set_fill_color(draw::muted());
    layer.use_text(
        &qty,
        9.0,
        Mm(draw::right_aligned_x(&qty, 9.0, right_edge)),
        Mm(row_top - 8.0),
        &fonts.regular,
    );

    let average = format!("Avg: {}", format_currency(card.top3_average));
    layer.set_fill_color(draw::ink());
    layer.use_text(
        &average,
        10.0,
        Mm(draw::right_aligned_x(&average, 10.0, right_edge)),
        Mm(row_top - 16.0),
        &fonts.regular,
    );

    let subtotal = format!("Subtotal: {}", format_pdf_currency(card.subtotal));
    layer.use_text(
        &subtotal,
        11.0,
        Mm(draw::right_aligned_x(&subtotal, 11.0, right_edge)),
        Mm(row_top - 24.0),
        &fonts.bold,
    );
}

// ---------------------------------------------------------------------------
// Image embedding
// ---------------------------------------------------------------------------

fn embed_card_image(
    layer: &PdfLayerReference,
    encoded: &EncodedImage,
    x: f32,
    y: f32,
) -> crate::error::Result<()> {
    let rgb = image::load_from_memory(&encoded.data)
        .map_err(|e| crate::error::ReportError::Image(e.to_string()))?
        .to_rgb8();
    let (width_px, height_px) = rgb.dimensions();

    let image = Image::from(ImageXObject {
        width: Px(width_px as usize),
        height: Px(height_px as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: rgb.into_raw(),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    });

    // DPI chosen so the pixel width lands on the physical width in mm.
    let dpi = width_px as f32 / (IMAGE_WIDTH / 25.4);
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x)),
            translate_y: Some(Mm(y)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );
    Ok(())
}

fn image_placeholder(layer: &PdfLayerReference, fonts: &Fonts, x: f32, y: f32) {
    layer.set_outline_color(draw::border_gray());
    layer.set_outline_thickness(0.4);
    draw::stroke_rect(layer, x, y, IMAGE_WIDTH, IMAGE_HEIGHT);

    layer.set_fill_color(draw::muted());
    let label = "No Image";
    let label_x = x + (IMAGE_WIDTH - draw::approx_text_width(label, 8.0)) / 2.0;
    layer.use_text(label, 8.0, Mm(label_x), Mm(y + IMAGE_HEIGHT / 2.0), &fonts.regular);
    layer.set_fill_color(draw::ink());
}
