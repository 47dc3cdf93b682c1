use crate::config::Config;
use crate::roster::Roster;
use crate::sheet::SheetView;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub config: Config,
    pub roster: Roster,
    pub view: SheetView,
    /// Position loaded into the form by `students.edit`, if any.
    pub editing: Option<usize>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            roster: Roster::new(),
            view: SheetView::default(),
            editing: None,
        }
    }
}
