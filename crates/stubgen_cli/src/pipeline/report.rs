// stubgen_cli/pipeline/report - Run summaries
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct GenerateReport {
    pub parsed_files: usize,
    pub failed_files: Vec<(PathBuf, String)>,
    pub packages: usize,
    pub written_units: Vec<PathBuf>,
    pub failed_units: Vec<(String, String)>,
    pub digest_file: Option<PathBuf>,
}

impl GenerateReport {
    pub fn success(&self) -> bool {
        self.failed_files.is_empty() && self.failed_units.is_empty()
    }
}

pub fn render_summary(report: &GenerateReport) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Parsed {} surface file(s), rendered {} unit(s) across {} package(s)",
        report.parsed_files,
        report.written_units.len(),
        report.packages
    ));

    for (path, message) in &report.failed_files {
        lines.push(format!("  failed to parse {}: {}", path.display(), message));
    }
    for (type_name, message) in &report.failed_units {
        lines.push(format!("  failed to render {}: {}", type_name, message));
    }
    if let Some(digest_file) = &report.digest_file {
        lines.push(format!("  digests: {}", digest_file.display()));
    }
    if !report.success() {
        lines.push(format!(
            "Completed with {} failure(s)",
            report.failed_files.len() + report.failed_units.len()
        ));
    }

    lines.join("\n")
}
