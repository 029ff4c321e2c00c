//! Report composer: lays out the paginated A4 document — cover page,
//! card-detail pages (4 cards each), and the breakdown table (hard page
//! break every 30 rows) — and serializes it to in-memory PDF bytes.
//!
//! Pages are emitted strictly in document order; the page plan is
//! computed up front so every footer can carry `Page {n} of {total}`.

mod breakdown;
mod cover;
mod details;
mod draw;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};

use crate::config::{
    BREAKDOWN_ROWS_PER_PAGE, CARDS_PER_DETAIL_PAGE, PAGE_HEIGHT_MM, PAGE_WIDTH_MM,
};
use crate::error::{ReportError, Result};
use crate::images::ImageCache;
use crate::models::CollectionReportData;

pub use draw::truncate_name;

// ---------------------------------------------------------------------------
// PagePlan
// ---------------------------------------------------------------------------

/// Page counts for a report, fixed before composition starts. The cover
/// is always page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    pub detail_pages: usize,
    pub breakdown_pages: usize,
}

impl PagePlan {
    pub fn total_pages(&self) -> usize {
        1 + self.detail_pages + self.breakdown_pages
    }
}

/// Compute the page plan for a card count.
pub fn page_plan(card_count: usize) -> PagePlan {
    PagePlan {
        detail_pages: (card_count + CARDS_PER_DETAIL_PAGE - 1) / CARDS_PER_DETAIL_PAGE,
        breakdown_pages: (card_count + BREAKDOWN_ROWS_PER_PAGE - 1) / BREAKDOWN_ROWS_PER_PAGE,
    }
}

// ---------------------------------------------------------------------------
// Fonts
// ---------------------------------------------------------------------------

/// The two builtin fonts every page draws with.
pub(crate) struct Fonts {
    pub regular: IndirectFontRef,
    pub bold: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self> {
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Pdf(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Pdf(e.to_string()))?;
        Ok(Self { regular, bold })
    }
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// Compose the full report document and return the PDF bytes.
///
/// Image loading must have completed before this is called; `images`
/// entries marked failed (or absent) render as placeholders.
pub fn compose(data: &CollectionReportData, images: &ImageCache) -> Result<Vec<u8>> {
    let plan = page_plan(data.cards.len());
    let total_pages = plan.total_pages();

    let (doc, cover_page, cover_layer) = PdfDocument::new(
        "Collection Valuation Report",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let fonts = Fonts::load(&doc)?;

    // Cover (page 1)
    let layer = doc.get_page(cover_page).get_layer(cover_layer);
    cover::draw_cover(&layer, &fonts, data);
    draw::page_footer(&layer, &fonts.regular, 1, total_pages);

    let mut page_number = 1;

    // Detail pages, 4 cards each, in input order
    for chunk in data.cards.chunks(CARDS_PER_DETAIL_PAGE) {
        page_number += 1;
        let (page, layer_index) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let layer = doc.get_page(page).get_layer(layer_index);
        details::draw_detail_page(&layer, &fonts, chunk, images);
        draw::page_footer(&layer, &fonts.regular, page_number, total_pages);
    }

    // Breakdown table, 30 rows per page
    let segments = data.cards.chunks(BREAKDOWN_ROWS_PER_PAGE);
    let segment_count = segments.len();
    for (i, rows) in segments.enumerate() {
        page_number += 1;
        let (page, layer_index) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let layer = doc.get_page(page).get_layer(layer_index);
        breakdown::draw_breakdown_page(
            &layer,
            &fonts,
            data,
            rows,
            i == 0,
            i + 1 == segment_count,
        );
        draw::page_footer(&layer, &fonts.regular, page_number, total_pages);
    }

    doc.save_to_bytes().map_err(|e| ReportError::Pdf(e.to_string()))
}
