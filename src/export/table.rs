use super::paint::{Painter, BANNER_BLOCK, ROW_HEIGHT};
use super::pdf::{PdfDoc, PAGE_HEIGHT, PAGE_WIDTH};
use crate::paginate;
use crate::sheet::SheetModel;
use pdf_writer::Content;

/// Distance from the page top to the banner block. Fixed on every page.
const BANNER_TOP_OFFSET: f32 = 26.0;
const BODY_BOTTOM: f32 = 34.0;
const FOOTER_BASELINE: f32 = 18.0;

fn body_top(painter: &Painter<'_>) -> f32 {
    PAGE_HEIGHT - BANNER_TOP_OFFSET - BANNER_BLOCK - painter.header_height()
}

/// Whole body rows that fit under the repeated banner and header.
pub fn rows_per_page(model: &SheetModel) -> usize {
    let painter = Painter::new(model, PAGE_WIDTH);
    let body = body_top(&painter) - BODY_BOTTOM;
    ((body / ROW_HEIGHT).floor() as usize).max(1)
}

/// Structured table: banner and both header tiers on every page, body rows
/// flowed whole from page to page.
pub fn render(doc: &mut PdfDoc, model: &SheetModel, generated: &str) {
    let painter = Painter::new(model, PAGE_WIDTH);
    let table_top = PAGE_HEIGHT - BANNER_TOP_OFFSET - BANNER_BLOCK;
    let top = body_top(&painter);

    let heights = vec![ROW_HEIGHT; model.rows.len()];
    let pages = paginate::flow_rows(&heights, top - BODY_BOTTOM);
    let total = pages.len();

    for (i, range) in pages.into_iter().enumerate() {
        let mut content = Content::new();
        painter.banner(&mut content, PAGE_HEIGHT - BANNER_TOP_OFFSET);
        painter.header(&mut content, table_top);
        painter.rows(&mut content, range, top);
        painter.footer(&mut content, FOOTER_BASELINE, i + 1, total, generated);
        doc.add_page(content, None);
    }
}
