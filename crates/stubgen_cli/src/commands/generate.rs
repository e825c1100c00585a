// stubgen_cli/commands/generate - Run the full generation pipeline
use crate::pipeline::{render_summary, run_generate, CliOverrides};
use crate::resolve_start_dir;
use anyhow::Result;

pub fn run(
    project: Option<&str>,
    output: Option<String>,
    format: bool,
    clean: bool,
    digests: bool,
) -> Result<()> {
    let start_dir = resolve_start_dir(project)?;
    let overrides = CliOverrides {
        output,
        format,
        digests,
    };

    let report = run_generate(&start_dir, &overrides, clean)?;
    println!("{}", render_summary(&report));

    if !report.success() {
        anyhow::bail!("stub generation completed with failures");
    }
    Ok(())
}
