// stubgen_cli/pipeline/locator - Find the project root
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "stubgen.toml";

#[derive(Debug, Clone)]
pub struct ProjectRoot {
    root_dir: PathBuf,
    manifest_path: Option<PathBuf>,
}

impl ProjectRoot {
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn manifest_path(&self) -> Option<&Path> {
        self.manifest_path.as_deref()
    }
}

pub struct ProjectLocator;

impl ProjectLocator {
    /// Walk up from `start` looking for a `stubgen.toml`. Without one the
    /// start directory itself becomes the root and defaults apply.
    pub fn locate(start: &Path) -> ProjectRoot {
        let mut current = Some(start);
        while let Some(dir) = current {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                return ProjectRoot {
                    root_dir: dir.to_path_buf(),
                    manifest_path: Some(candidate),
                };
            }
            current = dir.parent();
        }

        ProjectRoot {
            root_dir: start.to_path_buf(),
            manifest_path: None,
        }
    }
}
