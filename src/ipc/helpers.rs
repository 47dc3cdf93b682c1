use crate::ipc::error::{err, roster_err};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

/// Resolves the record a request targets, by `index` or by `studentId`.
pub fn target_index(state: &AppState, req: &Request) -> Result<usize, serde_json::Value> {
    if let Some(raw) = req.params.get("index").filter(|v| !v.is_null()) {
        let Some(index) = raw.as_u64().map(|v| v as usize) else {
            return Err(err(
                &req.id,
                "bad_params",
                "index must be a non-negative integer",
                Some(json!({ "index": raw })),
            ));
        };
        return state
            .roster
            .get(index)
            .map(|_| index)
            .map_err(|e| roster_err(&req.id, e));
    }
    if let Some(id) = req.params.get("studentId").and_then(|v| v.as_str()) {
        return state
            .roster
            .position_of(id)
            .map_err(|e| roster_err(&req.id, e));
    }
    Err(err(&req.id, "bad_params", "missing index or studentId", None))
}

/// Grade list parameter: strings kept verbatim, numbers as their decimal
/// text, nulls as empty slots.
pub fn grades_param(req: &Request, key: &str) -> Result<Vec<String>, serde_json::Value> {
    let Some(raw) = req.params.get(key).filter(|v| !v.is_null()) else {
        return Ok(Vec::new());
    };
    let Some(items) = raw.as_array() else {
        return Err(err(
            &req.id,
            "bad_params",
            format!("{} must be an array", key),
            None,
        ));
    };
    items
        .iter()
        .enumerate()
        .map(|(i, v)| match v {
            serde_json::Value::Null => Ok(String::new()),
            serde_json::Value::String(s) => Ok(s.clone()),
            serde_json::Value::Number(n) => Ok(n.to_string()),
            _ => Err(err(
                &req.id,
                "bad_params",
                format!("{}[{}] must be a string, number or null", key, i),
                None,
            )),
        })
        .collect()
}

pub fn bool_param(req: &Request, key: &str) -> bool {
    req.params
        .get(key)
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}
