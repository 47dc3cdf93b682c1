use crate::calc::{self, DerivedAverages};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RosterError {
    #[error("studentName must not be empty")]
    MissingName,
    #[error("{field} must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("{field} accepts at most {max} grades, got {got}")]
    TooManyGrades {
        field: &'static str,
        max: usize,
        got: usize,
    },
    #[error("{field}[{slot}] must be a string, number or null")]
    BadGrade { field: &'static str, slot: usize },
    #[error("no student at position {0}")]
    OutOfRange(usize),
    #[error("student not found: {0}")]
    UnknownStudent(String),
    #[error("deleting a student requires confirm: true")]
    NotConfirmed,
}

impl RosterError {
    pub fn code(&self) -> &'static str {
        match self {
            RosterError::MissingName => "missing_name",
            RosterError::WrongType { .. }
            | RosterError::TooManyGrades { .. }
            | RosterError::BadGrade { .. } => "bad_params",
            RosterError::OutOfRange(_) | RosterError::UnknownStudent(_) => "not_found",
            RosterError::NotConfirmed => "confirmation_required",
        }
    }
}

/// Raw form state for one student. Grade slots are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentInput {
    pub student_name: String,
    pub area: String,
    pub grade_level: String,
    pub tasks: Vec<String>,
    pub evaluations: Vec<String>,
    pub expositions: Vec<String>,
}

fn text_field(obj: &serde_json::Map<String, Value>, key: &'static str) -> Result<String, RosterError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(RosterError::WrongType {
            field: key,
            expected: "a string",
        }),
    }
}

fn grade_slots(
    obj: &serde_json::Map<String, Value>,
    key: &'static str,
    slots: usize,
) -> Result<Vec<String>, RosterError> {
    let mut out = vec![String::new(); slots];
    let items = match obj.get(key) {
        None | Some(Value::Null) => return Ok(out),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(RosterError::WrongType {
                field: key,
                expected: "an array",
            })
        }
    };
    if items.len() > slots {
        return Err(RosterError::TooManyGrades {
            field: key,
            max: slots,
            got: items.len(),
        });
    }
    for (slot, item) in items.iter().enumerate() {
        out[slot] = match item {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return Err(RosterError::BadGrade { field: key, slot }),
        };
    }
    Ok(out)
}

impl StudentInput {
    pub fn from_json(raw: &Value) -> Result<Self, RosterError> {
        let empty = serde_json::Map::new();
        let obj = match raw {
            Value::Object(obj) => obj,
            Value::Null => &empty,
            _ => {
                return Err(RosterError::WrongType {
                    field: "student",
                    expected: "an object",
                })
            }
        };
        Ok(Self {
            student_name: text_field(obj, "studentName")?,
            area: text_field(obj, "area")?,
            grade_level: text_field(obj, "gradeLevel")?,
            tasks: grade_slots(obj, "tasks", calc::TASK_SLOTS)?,
            evaluations: grade_slots(obj, "evaluations", calc::EVALUATION_SLOTS)?,
            expositions: grade_slots(obj, "expositions", calc::EXPOSITION_SLOTS)?,
        })
    }

    fn validate(&self) -> Result<(), RosterError> {
        if self.student_name.trim().is_empty() {
            return Err(RosterError::MissingName);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: String,
    #[serde(flatten)]
    pub input: StudentInput,
    #[serde(flatten)]
    pub derived: DerivedAverages,
}

impl StudentRecord {
    fn new(id: String, input: StudentInput) -> Self {
        let derived = calc::derive_averages(&input.tasks, &input.evaluations, &input.expositions);
        Self { id, input, derived }
    }
}

/// Ordered list of records; position is display order.
#[derive(Debug, Default)]
pub struct Roster {
    records: Vec<StudentRecord>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn get(&self, index: usize) -> Result<&StudentRecord, RosterError> {
        self.records.get(index).ok_or(RosterError::OutOfRange(index))
    }

    pub fn position_of(&self, id: &str) -> Result<usize, RosterError> {
        self.records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| RosterError::UnknownStudent(id.to_string()))
    }

    pub fn add(&mut self, input: StudentInput) -> Result<usize, RosterError> {
        input.validate()?;
        let record = StudentRecord::new(Uuid::new_v4().to_string(), input);
        info!(student_id = %record.id, "student added");
        self.records.push(record);
        Ok(self.records.len() - 1)
    }

    /// Stored raw input, for loading back into the form.
    pub fn edit_form(&self, index: usize) -> Result<StudentInput, RosterError> {
        Ok(self.get(index)?.input.clone())
    }

    /// Replaces the record wholesale and recomputes its averages. The id is kept.
    pub fn update(&mut self, index: usize, input: StudentInput) -> Result<&StudentRecord, RosterError> {
        input.validate()?;
        let slot = self
            .records
            .get_mut(index)
            .ok_or(RosterError::OutOfRange(index))?;
        *slot = StudentRecord::new(slot.id.clone(), input);
        info!(student_id = %slot.id, index, "student updated");
        Ok(&*slot)
    }

    pub fn remove(&mut self, index: usize, confirmed: bool) -> Result<StudentRecord, RosterError> {
        if index >= self.records.len() {
            return Err(RosterError::OutOfRange(index));
        }
        if !confirmed {
            debug!(index, "delete refused without confirmation");
            return Err(RosterError::NotConfirmed);
        }
        let removed = self.records.remove(index);
        info!(student_id = %removed.id, index, "student removed");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(name: &str, tasks: &[&str]) -> StudentInput {
        StudentInput::from_json(&json!({
            "studentName": name,
            "area": "Matemáticas",
            "gradeLevel": "5",
            "tasks": tasks,
        }))
        .expect("valid input")
    }

    #[test]
    fn from_json_pads_short_grade_lists_and_stringifies_numbers() {
        let parsed = StudentInput::from_json(&json!({
            "studentName": "Ana",
            "tasks": ["8", 9.5, null],
            "evaluations": [7],
        }))
        .expect("parse");
        assert_eq!(parsed.tasks, vec!["8", "9.5", "", ""]);
        assert_eq!(parsed.evaluations, vec!["7", "", ""]);
        assert_eq!(parsed.expositions, vec!["", "", ""]);
        assert_eq!(parsed.area, "");
    }

    #[test]
    fn from_json_rejects_too_many_grades() {
        let e = StudentInput::from_json(&json!({
            "studentName": "Ana",
            "evaluations": ["1", "2", "3", "4"],
        }))
        .unwrap_err();
        assert_eq!(e.code(), "bad_params");
    }

    #[test]
    fn from_json_rejects_non_object_student() {
        let e = StudentInput::from_json(&json!("x")).unwrap_err();
        assert_eq!(
            e,
            RosterError::WrongType {
                field: "student",
                expected: "an object"
            }
        );
        assert_eq!(e.code(), "bad_params");
        assert_eq!(
            StudentInput::from_json(&json!(["Ana"])).unwrap_err().code(),
            "bad_params"
        );
    }

    #[test]
    fn add_rejects_blank_name_without_creating_a_record() {
        let mut roster = Roster::new();
        let e = roster.add(input("   ", &["8"])).unwrap_err();
        assert_eq!(e, RosterError::MissingName);
        assert_eq!(roster.len(), 0);
    }

    #[test]
    fn add_computes_derived_fields() {
        let mut roster = Roster::new();
        let idx = roster.add(input("Ana", &["8", "", "10", "9"])).expect("add");
        assert_eq!(idx, 0);
        let r = roster.get(0).expect("record");
        assert_eq!(r.derived.definitive_task, "9.0");
        assert_eq!(r.derived.final_overall_grade, "9.0");
    }

    #[test]
    fn update_replaces_in_place_and_keeps_length_and_id() {
        let mut roster = Roster::new();
        roster.add(input("Ana", &["8"])).expect("add");
        roster.add(input("Luis", &["6"])).expect("add");
        roster.add(input("Marta", &["7"])).expect("add");
        let id_before = roster.get(1).expect("record").id.clone();

        let mut form = roster.edit_form(1).expect("form");
        form.tasks[1] = "10".to_string();
        form.evaluations[0] = "9".to_string();
        let updated = roster.update(1, form).expect("update").clone();

        assert_eq!(roster.len(), 3);
        assert_eq!(updated.id, id_before);
        assert_eq!(updated.derived.definitive_task, "8.0");
        assert_eq!(updated.derived.definitive_evaluation, "9.0");
        assert_eq!(updated.derived.final_overall_grade, "8.5");
        let names: Vec<_> = roster.records().iter().map(|r| r.input.student_name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Luis", "Marta"]);
    }

    #[test]
    fn remove_requires_confirmation_and_preserves_order() {
        let mut roster = Roster::new();
        for name in ["A", "B", "C", "D"] {
            roster.add(input(name, &[])).expect("add");
        }
        assert_eq!(roster.remove(1, false).unwrap_err(), RosterError::NotConfirmed);
        assert_eq!(roster.len(), 4);

        let removed = roster.remove(1, true).expect("remove");
        assert_eq!(removed.input.student_name, "B");
        let names: Vec<_> = roster.records().iter().map(|r| r.input.student_name.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "D"]);
        assert_eq!(roster.remove(9, true).unwrap_err(), RosterError::OutOfRange(9));
    }

    #[test]
    fn position_of_resolves_ids() {
        let mut roster = Roster::new();
        roster.add(input("A", &[])).expect("add");
        roster.add(input("B", &[])).expect("add");
        let id = roster.get(1).expect("record").id.clone();
        assert_eq!(roster.position_of(&id), Ok(1));
        assert_eq!(roster.position_of("nope").unwrap_err().code(), "not_found");
    }
}
