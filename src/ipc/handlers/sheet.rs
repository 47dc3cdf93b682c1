use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use crate::sheet::SheetModel;
use serde_json::json;

/// The table exactly as the screen shows it right now.
fn handle_sheet_model(state: &mut AppState, req: &Request) -> serde_json::Value {
    let model = SheetModel::build(&state.roster, &state.view, state.config.banner());
    ok(&req.id, json!(model))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "sheet.model" => Some(handle_sheet_model(state, req)),
        _ => None,
    }
}
