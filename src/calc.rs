use serde::Serialize;

/// Decimal places used for every category and final average.
pub const DECIMALS: usize = 1;

pub const TASK_SLOTS: usize = 4;
pub const EVALUATION_SLOTS: usize = 3;
pub const EXPOSITION_SLOTS: usize = 3;

/// Rounds half away from zero on the scaled value, so `-2.25` becomes `-2.3`
/// the same way `2.25` becomes `2.3`. Values too large to scale are returned
/// as they are.
pub fn round_off(x: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    let scaled = scale * x.abs();
    if !scaled.is_finite() {
        return x;
    }
    (scaled + 0.5).floor().copysign(x) / scale
}

/// Plain sum over count, falling back to a running mean when the sum
/// overflows.
fn mean(values: &[f64]) -> f64 {
    let sum: f64 = values.iter().sum();
    if sum.is_finite() {
        return sum / values.len() as f64;
    }
    values
        .iter()
        .enumerate()
        .fold(0.0, |m, (i, v)| m + (v - m) / (i + 1) as f64)
}

/// A raw grade counts only when it parses as a finite number.
pub fn parse_grade(raw: &str) -> Option<f64> {
    let t = raw.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Mean of the inputs that parse, rendered with `decimals` fractional digits.
/// Returns an empty string when nothing parses.
pub fn average_grades<I, S>(inputs: I, decimals: usize) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let values: Vec<f64> = inputs
        .into_iter()
        .filter_map(|raw| parse_grade(raw.as_ref()))
        .collect();
    if values.is_empty() {
        return String::new();
    }
    let avg = round_off(mean(&values), decimals);
    // -0.0 would otherwise print as "-0.0"
    let avg = if avg == 0.0 { 0.0 } else { avg };
    format!("{:.*}", decimals, avg)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedAverages {
    pub definitive_task: String,
    pub definitive_evaluation: String,
    pub definitive_exposition: String,
    pub final_overall_grade: String,
}

/// Category averages first, then the final grade as the mean of the three
/// category averages. Each category weighs one third regardless of how many
/// raw grades it holds.
pub fn derive_averages(
    tasks: &[String],
    evaluations: &[String],
    expositions: &[String],
) -> DerivedAverages {
    let definitive_task = average_grades(tasks, DECIMALS);
    let definitive_evaluation = average_grades(evaluations, DECIMALS);
    let definitive_exposition = average_grades(expositions, DECIMALS);
    let final_overall_grade = average_grades(
        [
            definitive_task.as_str(),
            definitive_evaluation.as_str(),
            definitive_exposition.as_str(),
        ],
        DECIMALS,
    );
    DerivedAverages {
        definitive_task,
        definitive_evaluation,
        definitive_exposition,
        final_overall_grade,
    }
}
