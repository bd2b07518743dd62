//! Zip archiving of directory trees.

use anyhow::{bail, Context, Result};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Create `zip_path` from the full recursive contents of `src_dir`.
///
/// Entry names are relative to `src_dir`; nothing is filtered. An
/// existing archive at the target path is replaced, not merged, so
/// calling this twice leaves a fresh archive of the current contents.
pub fn zip_directory(src_dir: &Path, zip_path: &Path) -> Result<()> {
    if !src_dir.is_dir() {
        bail!("archive source '{}' is not a directory", src_dir.display());
    }
    if zip_path.exists() {
        fs::remove_file(zip_path)
            .with_context(|| format!("removing stale archive '{}'", zip_path.display()))?;
    }

    let file = File::create(zip_path)
        .with_context(|| format!("creating archive '{}'", zip_path.display()))?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    // Sorted walk so archive layout does not depend on readdir order.
    for entry in WalkDir::new(src_dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walking '{}'", src_dir.display()))?;
        let path = entry.path();
        let rel = path.strip_prefix(src_dir).unwrap_or(path);
        if rel.as_os_str().is_empty() {
            continue;
        }
        let name = rel.to_string_lossy().replace('\\', "/");

        if entry.file_type().is_dir() {
            writer
                .add_directory(name, options)
                .with_context(|| format!("adding directory entry '{}'", rel.display()))?;
        } else {
            writer
                .start_file(name, options)
                .with_context(|| format!("adding file entry '{}'", rel.display()))?;
            let mut f = File::open(path)
                .with_context(|| format!("reading '{}'", path.display()))?;
            io::copy(&mut f, &mut writer)
                .with_context(|| format!("compressing '{}'", path.display()))?;
        }
    }

    writer
        .finish()
        .with_context(|| format!("finalizing archive '{}'", zip_path.display()))?;
    Ok(())
}
