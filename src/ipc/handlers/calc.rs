use crate::calc;
use crate::ipc::error::ok;
use crate::ipc::helpers::grades_param;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_calc_average(req: &Request) -> serde_json::Value {
    let grades = match grades_param(req, "grades") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let average = calc::average_grades(&grades, calc::DECIMALS);
    ok(&req.id, json!({ "average": average }))
}

fn handle_calc_derive(req: &Request) -> serde_json::Value {
    let tasks = match grades_param(req, "tasks") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let evaluations = match grades_param(req, "evaluations") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let expositions = match grades_param(req, "expositions") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let derived = calc::derive_averages(&tasks, &evaluations, &expositions);
    ok(&req.id, json!(derived))
}

pub fn try_handle(_state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "calc.average" => Some(handle_calc_average(req)),
        "calc.derive" => Some(handle_calc_derive(req)),
        _ => None,
    }
}
