use super::text::{fit, text_width, win_ansi};
use crate::sheet::{place_header, Emphasis, PlacedCell, Rgb, SheetModel, FILL_NONE};
use pdf_writer::{Content, Name, Str};
use std::ops::Range;

pub const FONT_REGULAR: Name<'static> = Name(b"F1");
pub const FONT_BOLD: Name<'static> = Name(b"F2");

pub const HEADER_TIER_HEIGHT: f32 = 16.0;
pub const ROW_HEIGHT: f32 = 14.0;
/// Banner lines plus the gap above the table.
pub const BANNER_BLOCK: f32 = 52.0;

const MIN_SIDE_MARGIN: f32 = 28.0;
const CELL_PAD: f32 = 3.0;
const HEADER_SIZE: f32 = 7.0;
const BODY_SIZE: f32 = 7.0;
const TITLE_SIZE: f32 = 14.0;
const SUBTITLE_SIZE: f32 = 11.0;
const FOOTER_SIZE: f32 = 7.0;

const BORDER: Rgb = [0.62, 0.64, 0.67];
const TEXT: Rgb = [0.0, 0.0, 0.0];
const TITLE: Rgb = [0.118, 0.251, 0.686];
const SUBTITLE: Rgb = [0.145, 0.388, 0.922];
const FINAL_TEXT: Rgb = [0.114, 0.306, 0.847];
const MUTED: Rgb = [0.42, 0.45, 0.5];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
    Right,
}

struct TextStyle {
    size: f32,
    bold: bool,
    color: Rgb,
}

fn show_text(c: &mut Content, text: &str, x: f32, baseline: f32, style: &TextStyle) {
    if text.is_empty() {
        return;
    }
    let bytes = win_ansi(text);
    c.save_state();
    c.set_fill_rgb(style.color[0], style.color[1], style.color[2]);
    c.begin_text();
    c.set_font(if style.bold { FONT_BOLD } else { FONT_REGULAR }, style.size);
    c.next_line(x, baseline);
    c.show(Str(&bytes));
    c.end_text();
    c.restore_state();
}

fn aligned_text(
    c: &mut Content,
    text: &str,
    (x, width): (f32, f32),
    baseline: f32,
    align: Align,
    style: &TextStyle,
) {
    let shown = fit(text, width - 2.0 * CELL_PAD, style.size, style.bold);
    let w = text_width(&shown, style.size, style.bold);
    let tx = match align {
        Align::Left => x + CELL_PAD,
        Align::Center => x + (width - w) / 2.0,
        Align::Right => x + width - CELL_PAD - w,
    };
    show_text(c, &shown, tx, baseline, style);
}

fn cell_box(c: &mut Content, x: f32, y: f32, w: f32, h: f32, fill: Rgb) {
    c.save_state();
    if fill != FILL_NONE {
        c.set_fill_rgb(fill[0], fill[1], fill[2]);
        c.rect(x, y, w, h);
        c.fill_nonzero();
    }
    c.set_stroke_rgb(BORDER[0], BORDER[1], BORDER[2]);
    c.set_line_width(0.5);
    c.rect(x, y, w, h);
    c.stroke();
    c.restore_state();
}

fn centered_baseline(bottom: f32, height: f32, size: f32) -> f32 {
    bottom + height / 2.0 - size * 0.35
}

/// Draws banner, header and body rows of one sheet model onto content
/// streams. Coordinates are PDF user space (origin bottom-left).
pub struct Painter<'m> {
    model: &'m SheetModel,
    placed: Vec<PlacedCell>,
    offsets: Vec<f32>,
    left: f32,
    surface_width: f32,
}

impl<'m> Painter<'m> {
    pub fn new(model: &'m SheetModel, surface_width: f32) -> Self {
        let placed = place_header(&model.header, model.columns.len());
        let left = ((surface_width - model.table_width()) / 2.0).max(MIN_SIDE_MARGIN);
        Self {
            model,
            placed,
            offsets: model.column_offsets(),
            left,
            surface_width,
        }
    }

    pub fn header_height(&self) -> f32 {
        self.model.header.len() as f32 * HEADER_TIER_HEIGHT
    }

    fn span_width(&self, col: usize, span: usize) -> f32 {
        self.model.columns[col..col + span].iter().map(|c| c.width).sum()
    }

    /// Institution and campus lines, centered. `top` is the upper edge of the
    /// banner block; the table starts `BANNER_BLOCK` below it.
    pub fn banner(&self, c: &mut Content, top: f32) {
        let banner = &self.model.banner;
        let title = TextStyle {
            size: TITLE_SIZE,
            bold: true,
            color: TITLE,
        };
        let subtitle = TextStyle {
            size: SUBTITLE_SIZE,
            bold: true,
            color: SUBTITLE,
        };
        aligned_text(
            c,
            &banner.institution,
            (0.0, self.surface_width),
            top - TITLE_SIZE,
            Align::Center,
            &title,
        );
        aligned_text(
            c,
            &banner.campus,
            (0.0, self.surface_width),
            top - TITLE_SIZE - 18.0,
            Align::Center,
            &subtitle,
        );
    }

    /// Both header tiers with their spans. Returns the y of the header's lower edge.
    pub fn header(&self, c: &mut Content, top: f32) -> f32 {
        let style = TextStyle {
            size: HEADER_SIZE,
            bold: true,
            color: TEXT,
        };
        for p in &self.placed {
            let cell = &self.model.header[p.row][p.index];
            let x = self.left + self.offsets[p.col];
            let w = self.span_width(p.col, p.col_span);
            let h = p.row_span as f32 * HEADER_TIER_HEIGHT;
            let y = top - p.row as f32 * HEADER_TIER_HEIGHT - h;
            cell_box(c, x, y, w, h, cell.fill);
            aligned_text(
                c,
                &cell.text,
                (x, w),
                centered_baseline(y, h, HEADER_SIZE),
                Align::Center,
                &style,
            );
        }
        top - self.header_height()
    }

    /// Body rows in `range`, first row hanging from `top`. Returns the y of
    /// the last row's lower edge.
    pub fn rows(&self, c: &mut Content, range: Range<usize>, top: f32) -> f32 {
        let mut y = top;
        for row in &self.model.rows[range] {
            y -= ROW_HEIGHT;
            for (i, col) in self.model.columns.iter().enumerate() {
                let x = self.left + self.offsets[i];
                cell_box(c, x, y, col.width, ROW_HEIGHT, FILL_NONE);
                let value = row.get(i).map(String::as_str).unwrap_or("");
                let style = match col.emphasis {
                    Emphasis::Normal => TextStyle {
                        size: BODY_SIZE,
                        bold: false,
                        color: TEXT,
                    },
                    Emphasis::Average => TextStyle {
                        size: BODY_SIZE,
                        bold: true,
                        color: TEXT,
                    },
                    Emphasis::Final => TextStyle {
                        size: BODY_SIZE,
                        bold: true,
                        color: FINAL_TEXT,
                    },
                };
                let align = if i < 2 { Align::Left } else { Align::Center };
                aligned_text(
                    c,
                    value,
                    (x, col.width),
                    centered_baseline(y, ROW_HEIGHT, BODY_SIZE),
                    align,
                    &style,
                );
            }
        }
        y
    }

    pub fn footer(&self, c: &mut Content, baseline: f32, page: usize, total: usize, generated: &str) {
        let style = TextStyle {
            size: FOOTER_SIZE,
            bold: false,
            color: MUTED,
        };
        let width = self.surface_width - 2.0 * self.left;
        aligned_text(
            c,
            &format!("Generado el {}", generated),
            (self.left, width),
            baseline,
            Align::Left,
            &style,
        );
        aligned_text(
            c,
            &format!("Página {} de {}", page, total),
            (self.left, width),
            baseline,
            Align::Right,
            &style,
        );
    }
}
