use crate::export::ExportLayout;
use crate::sheet::Banner;
use clap::Parser;
use std::path::PathBuf;

/// Gradesheet sidecar: reads one JSON request per line on stdin and answers
/// one JSON line on stdout. Logs go to stderr.
#[derive(Debug, Clone, Parser)]
#[command(name = "gradesheetd", version)]
pub struct Config {
    /// First banner line on every exported page
    #[arg(long, default_value = "INSTITUCIÓN EDUCATIVA RURAL")]
    pub institution: String,

    /// Second banner line on every exported page
    #[arg(long, default_value = "Luis Antonio Robles")]
    pub campus: String,

    /// Directory exports are written to when a request gives no path
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// File name (without extension) for exports
    #[arg(long, default_value = "Boletin_Estudiantes")]
    pub file_stem: String,

    /// Page layout used when a request does not pick one
    #[arg(long, value_enum, default_value_t = ExportLayout::Table)]
    pub layout: ExportLayout,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn banner(&self) -> Banner {
        Banner {
            institution: self.institution.clone(),
            campus: self.campus.clone(),
        }
    }

    pub fn default_export_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.pdf", self.file_stem))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_flags() {
        let cfg = Config::parse_from(["gradesheetd"]);
        assert_eq!(cfg.layout, ExportLayout::Table);
        assert_eq!(cfg.default_export_path(), PathBuf::from("./Boletin_Estudiantes.pdf"));
        assert_eq!(cfg.banner().campus, "Luis Antonio Robles");
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = Config::parse_from([
            "gradesheetd",
            "--layout",
            "slices",
            "--file-stem",
            "grade_sheet",
            "--output-dir",
            "/tmp/out",
        ]);
        assert_eq!(cfg.layout, ExportLayout::Slices);
        assert_eq!(cfg.default_export_path(), PathBuf::from("/tmp/out/grade_sheet.pdf"));
    }
}
