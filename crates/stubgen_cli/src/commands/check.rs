// stubgen_cli/commands/check - Validate the surface without generating
use crate::pipeline::run_check;
use crate::resolve_start_dir;
use anyhow::Result;

pub fn run(project: Option<&str>) -> Result<()> {
    let start_dir = resolve_start_dir(project)?;
    let report = run_check(&start_dir)?;

    for (path, message) in &report.failed_files {
        println!("parse error in {}: {}", path.display(), message);
    }
    for issue in &report.issues {
        println!("{}", issue);
    }

    if report.success() {
        println!("Checked {} surface file(s): no issues found", report.parsed_files);
        Ok(())
    } else {
        anyhow::bail!(
            "check found {} problem(s)",
            report.failed_files.len() + report.issues.len()
        );
    }
}
