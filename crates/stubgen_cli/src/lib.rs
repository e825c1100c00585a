// stubgen_cli - CLI functionality (library interface for testing)
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub mod commands;
pub mod pipeline;

#[derive(clap::Parser)]
#[command(name = "stubgen")]
#[command(about = "SDK stub source generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Initialize a new stub generation project
    Init {
        /// Project name
        #[arg(default_value = ".")]
        name: String,
    },
    /// Generate stub sources from the project's API surface files
    Generate {
        /// Project directory (defaults to the nearest stubgen.toml)
        #[arg(long)]
        project: Option<String>,
        /// Output directory override
        #[arg(short, long)]
        output: Option<String>,
        /// Format rendered units
        #[arg(long)]
        format: bool,
        /// Remove the output directory before generating
        #[arg(long)]
        clean: bool,
        /// Write a stubs.sha256 digest listing next to the output
        #[arg(long)]
        digests: bool,
    },
    /// Parse and validate the API surface without generating anything
    Check {
        /// Project directory (defaults to the nearest stubgen.toml)
        #[arg(long)]
        project: Option<String>,
    },
    /// Show version information
    Version,
}

pub fn init_project(name: &str) -> Result<String> {
    let project_dir = if name == "." {
        std::env::current_dir()?
    } else {
        let dir = Path::new(name);
        fs::create_dir_all(dir)?;
        dir.to_path_buf()
    };

    let project_name = project_dir
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let manifest = format!(
        r#"[package]
name = "{}"

[surface]
include = ["api/**/*.api"]

[output]
directory = "out"
format = true
"#,
        project_name
    );
    fs::write(project_dir.join("stubgen.toml"), manifest)
        .with_context(|| format!("unable to write {}/stubgen.toml", project_dir.display()))?;

    let api_dir = project_dir.join("api");
    fs::create_dir_all(&api_dir)?;

    let starter = r#"// Signature format: 2.0
package android.provider {

  /**
   * Commonly used column names.
   * @apiSince 1
   */
  public interface BaseColumns {
    /** @apiSince 1 */
    field public static final String _COUNT = "_count";
    /** @apiSince 1 */
    field public static final String _ID = "_id";
  }

}
"#;
    fs::write(api_dir.join("current.api"), starter)?;

    Ok(project_name)
}

pub fn get_version() -> String {
    format!("stubgen {} - SDK stub source generator", env!("CARGO_PKG_VERSION"))
}

pub fn resolve_start_dir(project: Option<&str>) -> Result<PathBuf> {
    match project {
        Some(path) => {
            let candidate = PathBuf::from(path);
            if candidate.is_dir() {
                Ok(candidate)
            } else {
                anyhow::bail!("project directory '{}' not found", path);
            }
        }
        None => std::env::current_dir().context("unable to determine current directory"),
    }
}
