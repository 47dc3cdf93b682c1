mod paint;
mod pdf;
mod slices;
mod table;
mod text;

use crate::sheet::SheetModel;
use anyhow::Context;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportLayout {
    /// Header rows repeated per page, rows never split.
    Table,
    /// One tall surface cut into page-height slices.
    Slices,
}

impl ExportLayout {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "table" => Some(ExportLayout::Table),
            "slices" => Some(ExportLayout::Slices),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExportLayout::Table => "table",
            ExportLayout::Slices => "slices",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub path: PathBuf,
    pub layout: ExportLayout,
    pub page_count: usize,
    pub bytes: usize,
}

pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

pub fn render_pdf(
    model: &SheetModel,
    layout: ExportLayout,
    title: &str,
    generated: DateTime<Local>,
) -> RenderedPdf {
    let mut doc = pdf::PdfDoc::new(title, generated);
    match layout {
        ExportLayout::Table => {
            table::render(&mut doc, model, &generated.format("%d/%m/%Y").to_string())
        }
        ExportLayout::Slices => slices::render(&mut doc, model),
    }
    let page_count = doc.page_count();
    RenderedPdf {
        bytes: doc.finish(),
        page_count,
    }
}

/// Renders the whole document in memory, then writes it to `out_path`.
/// The file is only touched once the document is complete.
pub fn write_pdf(
    model: &SheetModel,
    layout: ExportLayout,
    title: &str,
    out_path: &Path,
) -> anyhow::Result<ExportSummary> {
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create directory {}", parent.to_string_lossy())
            })?;
        }
    }

    let rendered = render_pdf(model, layout, title, Local::now());
    std::fs::write(out_path, &rendered.bytes)
        .with_context(|| format!("failed to write {}", out_path.to_string_lossy()))?;

    info!(
        path = %out_path.display(),
        layout = layout.as_str(),
        pages = rendered.page_count,
        bytes = rendered.bytes.len(),
        "gradesheet exported"
    );
    Ok(ExportSummary {
        path: out_path.to_path_buf(),
        layout,
        page_count: rendered.page_count,
        bytes: rendered.bytes.len(),
    })
}

pub fn rows_per_page(model: &SheetModel) -> usize {
    table::rows_per_page(model)
}

#[cfg(test)]
mod tests {
    use super::pdf::PAGE_HEIGHT;
    use super::*;
    use crate::paginate;
    use crate::roster::{Roster, StudentInput};
    use crate::sheet::{Banner, SheetView};
    use serde_json::json;

    fn model_with(n: usize) -> SheetModel {
        let mut roster = Roster::new();
        for i in 0..n {
            let input = StudentInput::from_json(&json!({
                "studentName": format!("Estudiante {}", i + 1),
                "area": "Lenguaje",
                "gradeLevel": "7",
                "tasks": ["8", "9"],
                "evaluations": ["7"],
            }))
            .expect("input");
            roster.add(input).expect("add");
        }
        SheetModel::build(
            &roster,
            &SheetView { print_mode: true },
            Banner {
                institution: "INSTITUCIÓN EDUCATIVA RURAL".into(),
                campus: "Luis Antonio Robles".into(),
            },
        )
    }

    #[test]
    fn empty_roster_exports_one_table_page() {
        let out = render_pdf(&model_with(0), ExportLayout::Table, "t", Local::now());
        assert_eq!(out.page_count, 1);
        assert!(out.bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn table_pages_follow_rows_per_page() {
        let model = model_with(0);
        let per_page = rows_per_page(&model);
        assert!(per_page > 10);

        let full = model_with(per_page);
        assert_eq!(
            render_pdf(&full, ExportLayout::Table, "t", Local::now()).page_count,
            1
        );
        let spill = model_with(per_page + 1);
        assert_eq!(
            render_pdf(&spill, ExportLayout::Table, "t", Local::now()).page_count,
            2
        );
    }

    #[test]
    fn slices_cover_the_whole_surface() {
        let model = model_with(60);
        let expected = paginate::slice_pages(slices::surface_height(&model), PAGE_HEIGHT).len();
        assert!(expected >= 2);
        let out = render_pdf(&model, ExportLayout::Slices, "t", Local::now());
        assert_eq!(out.page_count, expected);
    }

    #[test]
    fn layout_parse_is_case_insensitive() {
        assert_eq!(ExportLayout::parse("TABLE"), Some(ExportLayout::Table));
        assert_eq!(ExportLayout::parse(" slices "), Some(ExportLayout::Slices));
        assert_eq!(ExportLayout::parse("raster"), None);
    }

    #[test]
    fn write_pdf_reports_unwritable_target() {
        let dir = std::env::temp_dir().join(format!("gradesheetd-export-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let blocker = dir.join("not-a-dir");
        std::fs::write(&blocker, b"x").expect("write blocker");

        let err = write_pdf(
            &model_with(1),
            ExportLayout::Table,
            "t",
            &blocker.join("sheet.pdf"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("failed to create directory"));
    }
}
