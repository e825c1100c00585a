// stubgen_cli/pipeline - Batch generation pipeline
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use stubgen_api::{validate, ApiSurface};
use stubgen_codegen_java::{plan_units, StubRenderer};
use stubgen_fmt::JavaFormatter;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub mod digest;
pub mod locator;
pub mod manifest;
pub mod output;
pub mod report;

pub use locator::{ProjectLocator, ProjectRoot};
pub use manifest::{CliOverrides, ManifestLoader, ProjectSettings};
pub use output::{OutputManager, PreparedOutput};
pub use report::{render_summary, GenerateReport};

#[derive(Debug, Default)]
pub struct CheckReport {
    pub parsed_files: usize,
    pub failed_files: Vec<(PathBuf, String)>,
    pub issues: Vec<String>,
}

impl CheckReport {
    pub fn success(&self) -> bool {
        self.failed_files.is_empty() && self.issues.is_empty()
    }
}

/// Full generation run: discover, parse, validate, render, write.
///
/// A file that fails to parse fails as a whole and the run continues with
/// the remaining files; a unit that fails to render produces no output file
/// and the run continues with the remaining units. Validation issues abort
/// before anything is rendered, since they indicate a surface whose
/// signatures cannot be trusted.
pub fn run_generate(
    start_dir: &Path,
    overrides: &CliOverrides,
    clean: bool,
) -> Result<GenerateReport> {
    let root = ProjectLocator::locate(start_dir);
    let settings = ManifestLoader::load(root.root_dir(), root.manifest_path(), overrides)?;
    info!(root = %root.root_dir().display(), "starting stub generation");

    let inputs = discover_inputs(root.root_dir(), &settings.include, &settings.exclude)?;
    if inputs.is_empty() {
        warn!("no surface files matched the include patterns");
    }

    let mut report = GenerateReport::default();
    let surface = load_surface(&inputs, &mut report);

    let issues = validate(&surface);
    if !issues.is_empty() {
        let listing = issues
            .iter()
            .map(|issue| issue.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        anyhow::bail!("surface validation failed:\n{}", listing);
    }

    let mut surface = surface;
    surface.sort_canonical();
    report.packages = surface.packages.len();

    let mut prepared = OutputManager::prepare(&settings.output_dir, clean)?;
    let mut renderer = StubRenderer::with_config(settings.render.clone());
    let formatter = settings.format.then(JavaFormatter::default);

    for package in &surface.packages {
        if let Some(unit) = renderer.render_package_info(package) {
            write_rendered(
                &prepared,
                formatter.as_ref(),
                &unit.package,
                &unit.file_name,
                &unit.source,
                &format!("{}.package-info", unit.package),
                &mut report,
            );
        }

        let (plans, plan_errors) = plan_units(package);
        for error in plan_errors {
            report
                .failed_units
                .push((package.name.clone(), error.to_string()));
        }

        for plan in &plans {
            match renderer.render_unit(package, plan) {
                Ok(unit) => {
                    let qualified = format!("{}.{}", unit.package, unit.type_name);
                    write_rendered(
                        &prepared,
                        formatter.as_ref(),
                        &unit.package,
                        &unit.file_name,
                        &unit.source,
                        &qualified,
                        &mut report,
                    );
                }
                Err(error) => {
                    let qualified = format!("{}.{}", package.name, plan.outer.name);
                    report.failed_units.push((qualified, error.to_string()));
                }
            }
        }
    }

    if settings.digests {
        let digest_path = digest::write_digests(prepared.target_dir(), &report.written_units)?;
        report.digest_file = Some(digest_path);
    }

    info!(
        written = report.written_units.len(),
        failed = report.failed_units.len(),
        "stub generation finished"
    );
    prepared.mark_success();
    Ok(report)
}

/// Parse and validate only. Reports every problem instead of stopping at
/// the first, so one run shows the full picture.
pub fn run_check(start_dir: &Path) -> Result<CheckReport> {
    let root = ProjectLocator::locate(start_dir);
    let settings = ManifestLoader::load(root.root_dir(), root.manifest_path(), &CliOverrides::default())?;

    let inputs = discover_inputs(root.root_dir(), &settings.include, &settings.exclude)?;
    let mut generate_report = GenerateReport::default();
    let surface = load_surface(&inputs, &mut generate_report);

    Ok(CheckReport {
        parsed_files: generate_report.parsed_files,
        failed_files: generate_report.failed_files,
        issues: validate(&surface)
            .into_iter()
            .map(|issue| issue.to_string())
            .collect(),
    })
}

fn write_rendered(
    prepared: &PreparedOutput,
    formatter: Option<&JavaFormatter>,
    package: &str,
    file_name: &str,
    source: &str,
    qualified: &str,
    report: &mut GenerateReport,
) {
    let formatted = match formatter {
        Some(formatter) => match formatter.format_java_code(source) {
            Ok(formatted) => formatted,
            Err(error) => {
                report
                    .failed_units
                    .push((qualified.to_string(), error.to_string()));
                return;
            }
        },
        None => source.to_string(),
    };

    match prepared.write_unit(package, file_name, &formatted) {
        Ok(path) => {
            debug!(unit = qualified, path = %path.display(), "wrote stub unit");
            report.written_units.push(path);
        }
        Err(error) => {
            report
                .failed_units
                .push((qualified.to_string(), error.to_string()));
        }
    }
}

fn discover_inputs(root: &Path, include: &[String], exclude: &[String]) -> Result<Vec<PathBuf>> {
    let include_set = build_glob_set(include)?;
    let exclude_set = build_glob_set(exclude)?;

    let mut inputs = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.with_context(|| format!("unable to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .replace('\\', "/");
        if include_set.is_match(&relative) && !exclude_set.is_match(&relative) {
            inputs.push(entry.path().to_path_buf());
        }
    }

    inputs.sort();
    Ok(inputs)
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("invalid glob pattern '{}'", pattern))?;
        builder.add(glob);
    }
    builder.build().context("unable to compile glob patterns")
}

fn load_surface(inputs: &[PathBuf], report: &mut GenerateReport) -> ApiSurface {
    let mut surface = ApiSurface::new();
    for path in inputs {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) => {
                report
                    .failed_files
                    .push((path.clone(), error.to_string()));
                continue;
            }
        };
        match stubgen_parser::parse_surface(&content) {
            Ok(parsed) => {
                debug!(file = %path.display(), "parsed surface file");
                surface.merge(parsed);
                report.parsed_files += 1;
            }
            Err(error) => {
                report
                    .failed_files
                    .push((path.clone(), error.to_string()));
            }
        }
    }
    surface
}
