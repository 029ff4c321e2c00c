//! Shared drawing utilities for the report pages.

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{Color, IndirectFontRef, Line, Mm, PdfLayerReference, Point, Polygon, Rgb};

use crate::config;

const PT_TO_MM: f32 = 0.352_778;

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

pub fn ink() -> Color {
    Color::Rgb(Rgb::new(0.13, 0.13, 0.13, None))
}

pub fn muted() -> Color {
    Color::Rgb(Rgb::new(0.45, 0.45, 0.45, None))
}

pub fn white() -> Color {
    Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None))
}

/// Dark header band on the cover page.
pub fn band() -> Color {
    Color::Rgb(Rgb::new(0.10, 0.12, 0.20, None))
}

/// Light fill for stat boxes and the total-value box.
pub fn panel_fill() -> Color {
    Color::Rgb(Rgb::new(0.94, 0.95, 0.97, None))
}

/// Alternating-row shading in the breakdown table.
pub fn row_shade() -> Color {
    Color::Rgb(Rgb::new(0.96, 0.96, 0.96, None))
}

pub fn border_gray() -> Color {
    Color::Rgb(Rgb::new(0.78, 0.78, 0.78, None))
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

pub fn line(layer: &PdfLayerReference, x1: f32, y1: f32, x2: f32, y2: f32) {
    let points = vec![
        (Point::new(Mm(x1), Mm(y1)), false),
        (Point::new(Mm(x2), Mm(y2)), false),
    ];
    layer.add_line(Line {
        points,
        is_closed: false,
    });
}

/// Outline a rectangle; `y` is the bottom edge.
pub fn stroke_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32) {
    let points = vec![
        (Point::new(Mm(x), Mm(y)), false),
        (Point::new(Mm(x + w), Mm(y)), false),
        (Point::new(Mm(x + w), Mm(y + h)), false),
        (Point::new(Mm(x), Mm(y + h)), false),
    ];
    layer.add_line(Line {
        points,
        is_closed: true,
    });
}

/// Fill a rectangle with the layer's current fill color; `y` is the
/// bottom edge.
pub fn fill_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32) {
    let ring = vec![
        (Point::new(Mm(x), Mm(y)), false),
        (Point::new(Mm(x + w), Mm(y)), false),
        (Point::new(Mm(x + w), Mm(y + h)), false),
        (Point::new(Mm(x), Mm(y + h)), false),
    ];
    layer.add_polygon(Polygon {
        rings: vec![ring],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// Truncate to `max` characters, appending `...` when the name is longer.
pub fn truncate_name(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    let mut truncated: String = name.chars().take(max).collect();
    truncated.push_str("...");
    truncated
}

/// Approximate rendered width of builtin Helvetica text, in mm. The
/// average glyph is close to half an em; good enough for centering and
/// right-aligning against fixed edges.
pub fn approx_text_width(text: &str, font_size_pt: f32) -> f32 {
    text.chars().count() as f32 * font_size_pt * 0.5 * PT_TO_MM
}

pub fn centered_x(text: &str, font_size_pt: f32) -> f32 {
    (config::PAGE_WIDTH_MM - approx_text_width(text, font_size_pt)) / 2.0
}

pub fn right_aligned_x(text: &str, font_size_pt: f32, right_edge: f32) -> f32 {
    right_edge - approx_text_width(text, font_size_pt)
}

/// Footer with the page number; the cover counts as page 1.
pub fn page_footer(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    page_number: usize,
    total_pages: usize,
) {
    let text = format!("Page {page_number} of {total_pages}");
    layer.set_fill_color(muted());
    layer.use_text(&text, 8.0, Mm(centered_x(&text, 8.0)), Mm(9.0), font);
    layer.set_fill_color(ink());
}
