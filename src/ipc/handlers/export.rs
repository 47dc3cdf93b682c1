use crate::export::{self, ExportLayout};
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::print::PrintScope;
use crate::sheet::SheetModel;
use serde_json::json;
use std::path::PathBuf;
use tracing::error;

fn parse_layout(state: &AppState, req: &Request) -> Result<ExportLayout, serde_json::Value> {
    match req.params.get("layout").and_then(|v| v.as_str()) {
        None => Ok(state.config.layout),
        Some(raw) => ExportLayout::parse(raw).ok_or_else(|| {
            err(
                &req.id,
                "bad_params",
                "layout must be one of: table, slices",
                Some(json!({ "layout": raw })),
            )
        }),
    }
}

fn handle_export_pdf(state: &mut AppState, req: &Request) -> serde_json::Value {
    let layout = match parse_layout(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let path = req
        .params
        .get("path")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
        .unwrap_or_else(|| state.config.default_export_path());
    let title = state.config.file_stem.clone();
    let banner = state.config.banner();

    // Hidden only while the scope lives; every return below restores the view.
    let scope = PrintScope::enter(&mut state.view);
    let model = SheetModel::build(&state.roster, scope.view(), banner);
    let rows_per_page = export::rows_per_page(&model);

    match export::write_pdf(&model, layout, &title, &path) {
        Ok(summary) => ok(
            &req.id,
            json!({
                "path": summary.path.to_string_lossy(),
                "layout": summary.layout,
                "pageCount": summary.page_count,
                "bytes": summary.bytes,
                "rowsPerPage": rows_per_page,
            }),
        ),
        Err(e) => {
            error!(path = %path.display(), "export failed: {e:#}");
            err(
                &req.id,
                "export_failed",
                format!("{e:#}"),
                Some(json!({ "path": path.to_string_lossy() })),
            )
        }
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "export.pdf" => Some(handle_export_pdf(state, req)),
        _ => None,
    }
}
