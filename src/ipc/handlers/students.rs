use crate::ipc::error::{ok, roster_err};
use crate::ipc::helpers::{bool_param, target_index};
use crate::ipc::types::{AppState, Request};
use crate::roster::{StudentInput, StudentRecord};
use serde_json::json;
use tracing::debug;

fn record_json(index: usize, record: &StudentRecord) -> serde_json::Value {
    let mut v = json!(record);
    v["index"] = json!(index);
    v
}

fn student_param(req: &Request) -> Result<StudentInput, serde_json::Value> {
    let raw = req.params.get("student").unwrap_or(&req.params);
    StudentInput::from_json(raw).map_err(|e| roster_err(&req.id, e))
}

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let students: Vec<serde_json::Value> = state
        .roster
        .records()
        .iter()
        .enumerate()
        .map(|(i, r)| record_json(i, r))
        .collect();
    ok(&req.id, json!({ "students": students }))
}

fn handle_students_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let input = match student_param(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    match state.roster.add(input) {
        Ok(index) => match state.roster.get(index) {
            Ok(r) => ok(&req.id, json!({ "index": index, "student": record_json(index, r) })),
            Err(e) => roster_err(&req.id, e),
        },
        Err(e) => roster_err(&req.id, e),
    }
}

fn handle_students_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let index = match target_index(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let input = match student_param(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    match state.roster.update(index, input) {
        Ok(r) => ok(&req.id, json!({ "index": index, "student": record_json(index, r) })),
        Err(e) => roster_err(&req.id, e),
    }
}

fn handle_students_edit(state: &mut AppState, req: &Request) -> serde_json::Value {
    let index = match target_index(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    match state.roster.edit_form(index) {
        Ok(form) => {
            state.editing = Some(index);
            debug!(index, "edit session opened");
            ok(&req.id, json!({ "index": index, "form": form }))
        }
        Err(e) => roster_err(&req.id, e),
    }
}

/// Form submission: replaces the record under edit, or appends a new one.
/// A rejected submission leaves the edit session open.
fn handle_students_submit(state: &mut AppState, req: &Request) -> serde_json::Value {
    let input = match student_param(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let (result, mode) = match state.editing {
        Some(index) => (state.roster.update(index, input).map(|_| index), "updated"),
        None => (state.roster.add(input), "created"),
    };
    let index = match result {
        Ok(v) => v,
        Err(e) => return roster_err(&req.id, e),
    };
    state.editing = None;
    match state.roster.get(index) {
        Ok(r) => ok(
            &req.id,
            json!({ "index": index, "mode": mode, "student": record_json(index, r) }),
        ),
        Err(e) => roster_err(&req.id, e),
    }
}

fn handle_students_cancel_edit(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.editing = None;
    ok(&req.id, json!({ "editing": null }))
}

fn handle_students_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let index = match target_index(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let removed = match state.roster.remove(index, bool_param(req, "confirm")) {
        Ok(v) => v,
        Err(e) => return roster_err(&req.id, e),
    };
    state.editing = match state.editing {
        Some(e) if e == index => None,
        Some(e) if e > index => Some(e - 1),
        other => other,
    };
    ok(
        &req.id,
        json!({
            "removed": record_json(index, &removed),
            "remaining": state.roster.len(),
            "editing": state.editing,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_students_list(state, req)),
        "students.create" => Some(handle_students_create(state, req)),
        "students.update" => Some(handle_students_update(state, req)),
        "students.edit" => Some(handle_students_edit(state, req)),
        "students.submit" => Some(handle_students_submit(state, req)),
        "students.cancelEdit" => Some(handle_students_cancel_edit(state, req)),
        "students.delete" => Some(handle_students_delete(state, req)),
        _ => None,
    }
}
