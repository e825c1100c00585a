// stubgen_cli/pipeline/digest - Byte-stability digests for emitted stubs
use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

pub const DIGEST_FILE: &str = "stubs.sha256";

/// Write a `hex  path` listing of every emitted unit, sorted by relative
/// path. Two runs over the same surface produce identical listings, which
/// is the cheap way for consumers to verify regeneration idempotence.
pub fn write_digests(output_dir: &Path, written: &[PathBuf]) -> Result<PathBuf> {
    let mut entries: Vec<(String, String)> = Vec::with_capacity(written.len());
    for path in written {
        let content = fs::read(path)
            .with_context(|| format!("unable to hash {}", path.display()))?;
        let digest = Sha256::digest(&content);
        let relative = path
            .strip_prefix(output_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        entries.push((relative, format!("{:x}", digest)));
    }
    entries.sort();

    let mut listing = String::new();
    for (relative, digest) in &entries {
        listing.push_str(digest);
        listing.push_str("  ");
        listing.push_str(relative);
        listing.push('\n');
    }

    let digest_path = output_dir.join(DIGEST_FILE);
    fs::write(&digest_path, listing)
        .with_context(|| format!("unable to write {}", digest_path.display()))?;
    Ok(digest_path)
}
