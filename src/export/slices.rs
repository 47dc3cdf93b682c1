use super::paint::{Painter, BANNER_BLOCK, ROW_HEIGHT};
use super::pdf::{PdfDoc, PAGE_HEIGHT, PAGE_WIDTH};
use crate::paginate;
use crate::sheet::SheetModel;
use pdf_writer::{Content, Name, Rect};

const SHEET: Name<'static> = Name(b"Sheet");
const TOP_PAD: f32 = 40.0;
const BOTTOM_PAD: f32 = 60.0;

/// Full height of the sheet surface when drawn at page width.
pub fn surface_height(model: &SheetModel) -> f32 {
    let painter = Painter::new(model, PAGE_WIDTH);
    TOP_PAD
        + BANNER_BLOCK
        + painter.header_height()
        + model.rows.len() as f32 * ROW_HEIGHT
        + BOTTOM_PAD
}

/// One tall surface, sliced by height: each page shows the surface shifted up
/// by a whole number of page heights and clipped to the page box.
pub fn render(doc: &mut PdfDoc, model: &SheetModel) {
    let painter = Painter::new(model, PAGE_WIDTH);
    let height = surface_height(model);

    let mut surface = Content::new();
    let banner_top = height - TOP_PAD;
    painter.banner(&mut surface, banner_top);
    let body_top = painter.header(&mut surface, banner_top - BANNER_BLOCK);
    painter.rows(&mut surface, 0..model.rows.len(), body_top);
    let form = doc.add_form(surface, Rect::new(0.0, 0.0, PAGE_WIDTH, height));

    let scaled = paginate::scaled_height(PAGE_WIDTH, height, PAGE_WIDTH);
    for slice in paginate::slice_pages(scaled, PAGE_HEIGHT) {
        let mut content = Content::new();
        content.save_state();
        content.rect(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT);
        content.clip_nonzero();
        content.end_path();
        content.transform([1.0, 0.0, 0.0, 1.0, 0.0, PAGE_HEIGHT - scaled - slice.offset_y]);
        content.x_object(SHEET);
        content.restore_state();
        doc.add_page(content, Some((SHEET, form)));
    }
}
