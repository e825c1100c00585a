// stubgen_cli/pipeline/manifest - Project settings from stubgen.toml
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use stubgen_codegen_java::StubGenConfig;

/// Raw manifest as written in `stubgen.toml`. Every section is optional;
/// omitted values fall back to the same defaults an absent manifest gets.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Manifest {
    #[serde(default)]
    pub package: PackageSection,
    #[serde(default)]
    pub surface: SurfaceSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub render: RenderSection,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PackageSection {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SurfaceSection {
    #[serde(default = "default_include")]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for SurfaceSection {
    fn default() -> Self {
        Self {
            include: default_include(),
            exclude: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSection {
    #[serde(default = "default_output_dir")]
    pub directory: String,
    #[serde(default)]
    pub format: bool,
    #[serde(default)]
    pub digests: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            format: false,
            digests: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderSection {
    #[serde(default = "default_indent")]
    pub indent: String,
    #[serde(default = "default_nullability_package")]
    pub nullability_package: String,
    /// Path, relative to the project root, of a file holding the license
    /// header comment emitted at the top of every unit.
    #[serde(default)]
    pub license_header: Option<String>,
    #[serde(default = "default_true")]
    pub emit_doc_comments: bool,
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            nullability_package: default_nullability_package(),
            license_header: None,
            emit_doc_comments: true,
        }
    }
}

fn default_include() -> Vec<String> {
    vec!["api/**/*.api".to_string()]
}

fn default_output_dir() -> String {
    "out".to_string()
}

fn default_indent() -> String {
    "    ".to_string()
}

fn default_nullability_package() -> String {
    "androidx.annotation".to_string()
}

fn default_true() -> bool {
    true
}

/// Resolved, CLI-adjusted project settings.
#[derive(Debug, Clone)]
pub struct ProjectSettings {
    pub name: Option<String>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub output_dir: PathBuf,
    pub format: bool,
    pub digests: bool,
    pub render: StubGenConfig,
}

/// Flag-level overrides collected from the command line. `None`/`false`
/// leaves the manifest value in place.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub output: Option<String>,
    pub format: bool,
    pub digests: bool,
}

pub struct ManifestLoader;

impl ManifestLoader {
    pub fn load(
        root_dir: &Path,
        manifest_path: Option<&Path>,
        overrides: &CliOverrides,
    ) -> Result<ProjectSettings> {
        let manifest = match manifest_path {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("unable to read {}", path.display()))?;
                toml::from_str::<Manifest>(&raw)
                    .with_context(|| format!("invalid manifest {}", path.display()))?
            }
            None => Manifest::default(),
        };

        let license_header = manifest
            .render
            .license_header
            .as_ref()
            .map(|relative| {
                let path = root_dir.join(relative);
                fs::read_to_string(&path)
                    .with_context(|| format!("unable to read license header {}", path.display()))
            })
            .transpose()?;

        let output_dir = overrides
            .output
            .clone()
            .unwrap_or_else(|| manifest.output.directory.clone());
        let output_dir = if Path::new(&output_dir).is_absolute() {
            PathBuf::from(output_dir)
        } else {
            root_dir.join(output_dir)
        };

        Ok(ProjectSettings {
            name: manifest.package.name,
            include: manifest.surface.include,
            exclude: manifest.surface.exclude,
            output_dir,
            format: manifest.output.format || overrides.format,
            digests: manifest.output.digests || overrides.digests,
            render: StubGenConfig {
                indent: manifest.render.indent,
                license_header,
                nullability_package: manifest.render.nullability_package,
                emit_doc_comments: manifest.render.emit_doc_comments,
            },
        })
    }
}
