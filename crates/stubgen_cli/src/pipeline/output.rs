// stubgen_cli/pipeline/output - Output directory lifecycle
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub struct OutputManager;

/// Prepared output directory. Cleans itself up on drop until the run is
/// marked successful, so an aborted run never leaves a half-written tree.
#[derive(Debug)]
pub struct PreparedOutput {
    target_dir: PathBuf,
    cleanup_on_drop: bool,
    clean_applied: bool,
}

impl OutputManager {
    pub fn prepare(target_dir: &Path, clean: bool) -> Result<PreparedOutput> {
        let mut clean_applied = false;
        if clean && target_dir.exists() {
            fs::remove_dir_all(target_dir)
                .with_context(|| format!("unable to clean {}", target_dir.display()))?;
            clean_applied = true;
        }

        fs::create_dir_all(target_dir)
            .with_context(|| format!("unable to create {}", target_dir.display()))?;

        Ok(PreparedOutput {
            target_dir: target_dir.to_path_buf(),
            cleanup_on_drop: true,
            clean_applied,
        })
    }
}

impl PreparedOutput {
    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    pub fn clean_applied(&self) -> bool {
        self.clean_applied
    }

    /// Write one rendered unit under its package path.
    pub fn write_unit(&self, package: &str, file_name: &str, source: &str) -> Result<PathBuf> {
        let mut dir = self.target_dir.clone();
        for segment in package.split('.') {
            dir.push(segment);
        }
        fs::create_dir_all(&dir)
            .with_context(|| format!("unable to create {}", dir.display()))?;

        let path = dir.join(file_name);
        fs::write(&path, source)
            .with_context(|| format!("unable to write {}", path.display()))?;
        Ok(path)
    }

    pub fn mark_success(&mut self) {
        self.cleanup_on_drop = false;
    }
}

impl Drop for PreparedOutput {
    fn drop(&mut self) {
        if self.cleanup_on_drop {
            let _ = fs::remove_dir_all(&self.target_dir);
        }
    }
}
