use super::paint::{FONT_BOLD, FONT_REGULAR};
use chrono::{DateTime, Datelike, Local};
use pdf_writer::{Content, Date, Finish, Name, Pdf, Rect, Ref, TextStr};

/// A4 landscape, in points.
pub const PAGE_WIDTH: f32 = 841.89;
pub const PAGE_HEIGHT: f32 = 595.28;

/// Object allocation and page bookkeeping around `pdf_writer::Pdf`.
pub struct PdfDoc {
    pdf: Pdf,
    next_id: i32,
    page_tree: Ref,
    font_regular: Ref,
    font_bold: Ref,
    pages: Vec<Ref>,
}

impl PdfDoc {
    pub fn new(title: &str, generated: DateTime<Local>) -> Self {
        let mut doc = Self {
            pdf: Pdf::new(),
            next_id: 1,
            page_tree: Ref::new(1),
            font_regular: Ref::new(1),
            font_bold: Ref::new(1),
            pages: Vec::new(),
        };
        let catalog = doc.alloc();
        doc.page_tree = doc.alloc();
        doc.font_regular = doc.alloc();
        doc.font_bold = doc.alloc();
        let info = doc.alloc();

        doc.pdf.catalog(catalog).pages(doc.page_tree);
        doc.pdf
            .type1_font(doc.font_regular)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        doc.pdf
            .type1_font(doc.font_bold)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        doc.pdf
            .document_info(info)
            .title(TextStr(title))
            .producer(TextStr(concat!("gradesheetd ", env!("CARGO_PKG_VERSION"))))
            .creation_date(
                Date::new(generated.year().clamp(0, 9999) as u16)
                    .month(generated.month() as u8)
                    .day(generated.day() as u8),
            );
        doc
    }

    fn alloc(&mut self) -> Ref {
        let id = Ref::new(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Appends a page drawing `content`, optionally with one form XObject
    /// available under `xobject.0`.
    pub fn add_page(&mut self, content: Content, xobject: Option<(Name<'_>, Ref)>) {
        let page_id = self.alloc();
        let content_id = self.alloc();

        let mut page = self.pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
        page.parent(self.page_tree);
        page.contents(content_id);
        let mut resources = page.resources();
        resources
            .fonts()
            .pair(FONT_REGULAR, self.font_regular)
            .pair(FONT_BOLD, self.font_bold);
        if let Some((name, id)) = xobject {
            resources.x_objects().pair(name, id);
        }
        resources.finish();
        page.finish();

        self.pdf.stream(content_id, &content.finish());
        self.pages.push(page_id);
    }

    /// Registers `content` as a reusable form XObject covering `bbox`.
    pub fn add_form(&mut self, content: Content, bbox: Rect) -> Ref {
        let id = self.alloc();
        let bytes = content.finish();
        let mut form = self.pdf.form_xobject(id, &bytes);
        form.bbox(bbox);
        let mut resources = form.resources();
        resources
            .fonts()
            .pair(FONT_REGULAR, self.font_regular)
            .pair(FONT_BOLD, self.font_bold);
        resources.finish();
        form.finish();
        id
    }

    pub fn finish(mut self) -> Vec<u8> {
        let count = self.pages.len() as i32;
        self.pdf
            .pages(self.page_tree)
            .kids(self.pages.iter().copied())
            .count(count);
        self.pdf.finish()
    }
}
