use crate::roster::RosterError;
use serde_json::json;

/// Success reply: `{ "id", "ok": true, "result" }`.
pub fn ok(id: &str, result: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "ok": true,
        "result": result
    })
}

/// Failure reply: `{ "id", "ok": false, "error": { "code", "message", "details"? } }`.
/// `details` is left out entirely when there are none.
pub fn err(
    id: &str,
    code: &str,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> serde_json::Value {
    let mut error = json!({
        "code": code,
        "message": message.into(),
    });
    if let Some(d) = details {
        error["details"] = d;
    }
    json!({
        "id": id,
        "ok": false,
        "error": error,
    })
}

/// Maps a roster rejection onto its reply code.
pub fn roster_err(id: &str, e: RosterError) -> serde_json::Value {
    err(id, e.code(), e.to_string(), None)
}
