use crate::roster::Roster;
use serde::Serialize;

pub type Rgb = [f32; 3];

pub const FILL_IDENTITY: Rgb = [0.898, 0.906, 0.922];
pub const FILL_TASKS: Rgb = [0.859, 0.918, 0.996];
pub const FILL_EVALUATIONS: Rgb = [0.996, 0.976, 0.765];
pub const FILL_EXPOSITIONS: Rgb = [0.863, 0.988, 0.906];
pub const FILL_FINAL: Rgb = [0.820, 0.835, 0.859];
pub const FILL_ACTIONS: Rgb = [0.996, 0.886, 0.886];
pub const FILL_NONE: Rgb = [1.0, 1.0, 1.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Emphasis {
    Normal,
    Average,
    Final,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
    pub width: f32,
    pub emphasis: Emphasis,
    pub printable: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderCell {
    pub text: String,
    pub col_span: usize,
    pub row_span: usize,
    pub fill: Rgb,
    pub printable: bool,
}

impl HeaderCell {
    fn new(text: &str, col_span: usize, row_span: usize, fill: Rgb) -> Self {
        Self {
            text: text.to_string(),
            col_span,
            row_span,
            fill,
            printable: true,
        }
    }

    fn screen_only(mut self) -> Self {
        self.printable = false;
        self
    }
}

/// A header cell resolved to grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedCell {
    /// Position of the cell within its header row.
    pub index: usize,
    pub row: usize,
    pub col: usize,
    pub row_span: usize,
    pub col_span: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub institution: String,
    pub campus: String,
}

/// What the on-screen table currently shows.
#[derive(Debug, Clone, Default)]
pub struct SheetView {
    pub print_mode: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetModel {
    pub banner: Banner,
    pub print_mode: bool,
    pub columns: Vec<Column>,
    pub header: Vec<Vec<HeaderCell>>,
    pub rows: Vec<Vec<String>>,
}

const GRADE_COL: f32 = 32.0;

fn grade_column(key: &'static str, label: &'static str, emphasis: Emphasis) -> Column {
    Column {
        key,
        label,
        width: GRADE_COL,
        emphasis,
        printable: true,
    }
}

pub fn all_columns() -> Vec<Column> {
    let mut cols = vec![
        Column {
            key: "studentName",
            label: "Nombre",
            width: 150.0,
            emphasis: Emphasis::Normal,
            printable: true,
        },
        Column {
            key: "area",
            label: "Área",
            width: 90.0,
            emphasis: Emphasis::Normal,
            printable: true,
        },
        Column {
            key: "gradeLevel",
            label: "Grado",
            width: 45.0,
            emphasis: Emphasis::Normal,
            printable: true,
        },
    ];
    cols.extend([
        grade_column("t1", "T1", Emphasis::Normal),
        grade_column("t2", "T2", Emphasis::Normal),
        grade_column("t3", "T3", Emphasis::Normal),
        grade_column("t4", "T4", Emphasis::Normal),
        grade_column("definitiveTask", "Prom.", Emphasis::Average),
        grade_column("e1", "E1", Emphasis::Normal),
        grade_column("e2", "E2", Emphasis::Normal),
        grade_column("e3", "E3", Emphasis::Normal),
        grade_column("definitiveEvaluation", "Prom.", Emphasis::Average),
        grade_column("x1", "X1", Emphasis::Normal),
        grade_column("x2", "X2", Emphasis::Normal),
        grade_column("x3", "X3", Emphasis::Normal),
        grade_column("definitiveExposition", "Prom.", Emphasis::Average),
    ]);
    cols.push(Column {
        key: "finalOverallGrade",
        label: "Nota Definitiva",
        width: 56.0,
        emphasis: Emphasis::Final,
        printable: true,
    });
    cols.push(Column {
        key: "actions",
        label: "Acciones",
        width: 80.0,
        emphasis: Emphasis::Normal,
        printable: false,
    });
    cols
}

/// Top tier merges category headers; identifiers and the final grade span
/// both tiers. The bottom tier only fills the columns left open.
fn header_tiers() -> Vec<Vec<HeaderCell>> {
    let top = vec![
        HeaderCell::new("Nombre", 1, 2, FILL_IDENTITY),
        HeaderCell::new("Área", 1, 2, FILL_IDENTITY),
        HeaderCell::new("Grado", 1, 2, FILL_IDENTITY),
        HeaderCell::new("Notas de Tareas", 5, 1, FILL_TASKS),
        HeaderCell::new("Notas de Evaluaciones", 4, 1, FILL_EVALUATIONS),
        HeaderCell::new("Notas de Exposiciones", 4, 1, FILL_EXPOSITIONS),
        HeaderCell::new("Nota Definitiva", 1, 2, FILL_FINAL),
        HeaderCell::new("Acciones", 1, 2, FILL_ACTIONS).screen_only(),
    ];
    let bottom = [
        ("T1", FILL_TASKS),
        ("T2", FILL_TASKS),
        ("T3", FILL_TASKS),
        ("T4", FILL_TASKS),
        ("Prom.", FILL_TASKS),
        ("E1", FILL_EVALUATIONS),
        ("E2", FILL_EVALUATIONS),
        ("E3", FILL_EVALUATIONS),
        ("Prom.", FILL_EVALUATIONS),
        ("X1", FILL_EXPOSITIONS),
        ("X2", FILL_EXPOSITIONS),
        ("X3", FILL_EXPOSITIONS),
        ("Prom.", FILL_EXPOSITIONS),
    ]
    .into_iter()
    .map(|(text, fill)| HeaderCell::new(text, 1, 1, fill))
    .collect();
    vec![top, bottom]
}

/// Places span-carrying header cells on a grid the way an HTML table does:
/// each cell takes the next column not already covered by a row span above.
pub fn place_header(header: &[Vec<HeaderCell>], columns: usize) -> Vec<PlacedCell> {
    let rows = header.len();
    let mut taken = vec![vec![false; columns]; rows];
    let mut out = Vec::new();
    for (r, tier) in header.iter().enumerate() {
        let mut c = 0;
        for (i, cell) in tier.iter().enumerate() {
            while c < columns && taken[r][c] {
                c += 1;
            }
            if c >= columns {
                break;
            }
            let col_span = cell.col_span.max(1).min(columns - c);
            let row_span = cell.row_span.max(1).min(rows - r);
            for rr in r..r + row_span {
                for cc in c..c + col_span {
                    taken[rr][cc] = true;
                }
            }
            out.push(PlacedCell {
                index: i,
                row: r,
                col: c,
                row_span,
                col_span,
            });
            c += col_span;
        }
    }
    out
}

impl SheetModel {
    /// Builds the table as the view currently shows it. In print mode
    /// non-printable columns and header cells are left out.
    pub fn build(roster: &Roster, view: &SheetView, banner: Banner) -> Self {
        let keep = |printable: bool| printable || !view.print_mode;

        let columns: Vec<Column> = all_columns().into_iter().filter(|c| keep(c.printable)).collect();
        let header: Vec<Vec<HeaderCell>> = header_tiers()
            .into_iter()
            .map(|tier| {
                tier.into_iter()
                    .filter(|c| keep(c.printable))
                    .collect::<Vec<_>>()
            })
            .collect();

        let rows = roster
            .records()
            .iter()
            .map(|r| {
                let mut row = vec![
                    r.input.student_name.clone(),
                    r.input.area.clone(),
                    r.input.grade_level.clone(),
                ];
                row.extend(r.input.tasks.iter().cloned());
                row.push(r.derived.definitive_task.clone());
                row.extend(r.input.evaluations.iter().cloned());
                row.push(r.derived.definitive_evaluation.clone());
                row.extend(r.input.expositions.iter().cloned());
                row.push(r.derived.definitive_exposition.clone());
                row.push(r.derived.final_overall_grade.clone());
                if !view.print_mode {
                    row.push("Editar | Eliminar".to_string());
                }
                row
            })
            .collect();

        Self {
            banner,
            print_mode: view.print_mode,
            columns,
            header,
            rows,
        }
    }

    pub fn table_width(&self) -> f32 {
        self.columns.iter().map(|c| c.width).sum()
    }

    /// Left edge of every column relative to the table's left edge.
    pub fn column_offsets(&self) -> Vec<f32> {
        let mut x = 0.0;
        self.columns
            .iter()
            .map(|c| {
                let at = x;
                x += c.width;
                at
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::StudentInput;
    use serde_json::json;

    fn banner() -> Banner {
        Banner {
            institution: "INSTITUCIÓN".into(),
            campus: "Sede".into(),
        }
    }

    fn roster_with_one() -> Roster {
        let mut roster = Roster::new();
        let input = StudentInput::from_json(&json!({
            "studentName": "Ana",
            "area": "Ciencias",
            "gradeLevel": "6",
            "tasks": ["8", "", "10", "9"],
            "evaluations": ["7", "8", "9"],
        }))
        .expect("input");
        roster.add(input).expect("add");
        roster
    }

    #[test]
    fn screen_view_includes_actions_column() {
        let model = SheetModel::build(&roster_with_one(), &SheetView::default(), banner());
        assert_eq!(model.columns.len(), 18);
        assert_eq!(model.columns.last().map(|c| c.key), Some("actions"));
        assert_eq!(model.header[0].len(), 8);
        assert_eq!(model.rows[0].len(), 18);
    }

    #[test]
    fn print_view_drops_non_printable_cells() {
        let view = SheetView { print_mode: true };
        let model = SheetModel::build(&roster_with_one(), &view, banner());
        assert_eq!(model.columns.len(), 17);
        assert!(model.columns.iter().all(|c| c.printable));
        assert!(model.header.iter().flatten().all(|c| c.printable));
        let row = &model.rows[0];
        assert_eq!(row.len(), 17);
        assert_eq!(row[7], "9.0");
        assert_eq!(row[11], "8.0");
        assert_eq!(row[15], "");
        assert_eq!(row[16], "8.5");
    }

    #[test]
    fn header_placement_reproduces_two_tiers() {
        let view = SheetView { print_mode: true };
        let model = SheetModel::build(&Roster::new(), &view, banner());
        let placed = place_header(&model.header, model.columns.len());

        let top: Vec<_> = placed.iter().filter(|p| p.row == 0).collect();
        assert_eq!(top.len(), 7);
        assert_eq!((top[3].col, top[3].col_span), (3, 5));
        assert_eq!((top[4].col, top[4].col_span), (8, 4));
        assert_eq!((top[6].col, top[6].row_span), (16, 2));

        let bottom: Vec<_> = placed.iter().filter(|p| p.row == 1).map(|p| p.col).collect();
        assert_eq!(bottom, (3..16).collect::<Vec<_>>());
    }

    #[test]
    fn column_offsets_accumulate_widths() {
        let model = SheetModel::build(&Roster::new(), &SheetView { print_mode: true }, banner());
        let offsets = model.column_offsets();
        assert_eq!(offsets[0], 0.0);
        assert_eq!(offsets[1], 150.0);
        assert_eq!(offsets[3], 285.0);
        assert_eq!(model.table_width(), 757.0);
    }
}
