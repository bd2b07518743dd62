//! Vendoring of the Chromium buildtools directory whitelist.
//!
//! The whitelist names the source-tree directories required to build
//! with the vendored toolchain. Copying is all-or-nothing at the level
//! of "first bad entry aborts": entries copied before the failing one
//! stay on disk, entries after it are never touched.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::archive::zip_directory;
use crate::fsutil::copy_dir_recursive;

/// Chromium source directories required by the vendored toolchain.
pub const BUILDTOOLS_DIRS: &[&str] = &[
    "build",
    "build_overrides",
    "buildtools",
    "testing",
    "third_party/ced",
    "third_party/googletest",
    "third_party/icu",
    "third_party/libxml",
    "third_party/llvm-build",
    "third_party/modp_b64",
    "third_party/win_build_output",
    "third_party/zlib",
    "tools/clang",
    "tools/win/DebugVisualizers",
];

/// Transient staging tree used by zip mode.
pub const STAGING_DIR: &str = "chromium_buildtools";

/// Archive produced by zip mode.
pub const BUILDTOOLS_ARCHIVE: &str = "buildtools_zip.zip";

/// Copy the buildtools whitelist from a Chromium checkout into `dst_root`.
///
/// Every entry's source must exist and its destination must not; either
/// violation fails the whole pass immediately. Nothing is overwritten
/// and nothing already copied is rolled back.
pub fn copy_buildtools(dst_root: &Path, src_root: &Path) -> Result<()> {
    copy_listed_dirs(dst_root, src_root, BUILDTOOLS_DIRS)
}

fn copy_listed_dirs(dst_root: &Path, src_root: &Path, dirs: &[&str]) -> Result<()> {
    for dir in dirs {
        let from = src_root.join(dir);
        let to = dst_root.join(dir);
        if !from.exists() {
            bail!("source directory '{}' does not exist", from.display());
        }
        if to.exists() {
            bail!("destination directory '{}' already exists", to.display());
        }
        info!("copying '{}' -> '{}'", from.display(), to.display());
        copy_dir_recursive(&from, &to)
            .with_context(|| format!("copying buildtools directory '{}'", dir))?;
    }
    Ok(())
}

/// Copy the whitelist into a transient staging tree under `dst_root`,
/// archive it, then delete the staging tree. Returns the archive path.
///
/// Removing the staging tree is best-effort; a leftover tree only costs
/// disk space and the archive is already complete.
pub fn zip_buildtools(dst_root: &Path, src_root: &Path) -> Result<PathBuf> {
    let staging = dst_root.join(STAGING_DIR);
    let zip_path = dst_root.join(BUILDTOOLS_ARCHIVE);

    copy_buildtools(&staging, src_root)?;
    zip_directory(&staging, &zip_path)
        .with_context(|| format!("archiving '{}'", staging.display()))?;
    let _ = fs::remove_dir_all(&staging);

    info!("buildtools archived to '{}'", zip_path.display());
    Ok(zip_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seed_source(src_root: &Path, dirs: &[&str]) {
        for dir in dirs {
            let path = src_root.join(dir);
            fs::create_dir_all(&path).unwrap();
            fs::write(path.join("marker.txt"), *dir).unwrap();
        }
    }

    #[test]
    fn copies_every_listed_directory() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        let dirs = ["build", "third_party/zlib"];
        seed_source(&src, &dirs);

        copy_listed_dirs(&dst, &src, &dirs).unwrap();

        for dir in dirs {
            assert!(dst.join(dir).join("marker.txt").exists());
        }
    }

    #[test]
    fn missing_source_stops_at_the_first_bad_entry() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        seed_source(&src, &["build", "testing"]);

        // "buildtools" was never created in the source tree.
        let dirs = ["build", "buildtools", "testing"];
        let err = copy_listed_dirs(&dst, &src, &dirs).unwrap_err();
        assert!(err.to_string().contains("does not exist"));

        // Entry before the failure was copied; the one after was not.
        assert!(dst.join("build/marker.txt").exists());
        assert!(!dst.join("testing").exists());
    }

    #[test]
    fn pre_existing_destination_is_an_error() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        seed_source(&src, &["build"]);
        fs::create_dir_all(dst.join("build")).unwrap();

        let err = copy_listed_dirs(&dst, &src, &["build"]).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn zip_mode_leaves_only_the_archive() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("chromium/src");
        let dst = temp.path().join("here");
        fs::create_dir_all(&dst).unwrap();
        seed_source(&src, BUILDTOOLS_DIRS);

        let zip_path = zip_buildtools(&dst, &src).unwrap();

        assert_eq!(zip_path, dst.join(BUILDTOOLS_ARCHIVE));
        assert!(zip_path.is_file());
        assert!(!dst.join(STAGING_DIR).exists());
    }
}
