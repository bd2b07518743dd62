//! The end-to-end packaging pipeline: generate, build, collect, archive.
//!
//! Stages run strictly in order with no feedback loops; the first
//! failure is terminal and aborts everything after it. A retry means
//! re-running the whole pipeline.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

use crate::archive::zip_directory;
use crate::collect::{collect_binaries, collect_headers, PACKAGE_DIR};
use crate::fsutil::sha256_file;
use crate::gn::generate_all;
use crate::ninja::build_variants;
use crate::toolchain::ToolchainEnv;
use crate::variant::GENERATE_ORDER;

/// Final distributable archive, relative to the tool root.
pub const PACKAGE_ARCHIVE: &str = "package.zip";

/// Checksum sidecar written next to the archive.
pub const PACKAGE_CHECKSUM: &str = "package.zip.sha256";

const BUILD_INFO_FILE: &str = "build-info.json";

/// Identification record written into the package before archiving.
#[derive(Debug, Serialize)]
struct BuildInfo {
    tool: &'static str,
    version: &'static str,
    variants: Vec<&'static str>,
    created_at_unix: u64,
}

impl BuildInfo {
    fn current() -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            variants: GENERATE_ORDER.iter().map(|v| v.dir_name()).collect(),
            created_at_unix: now_unix(),
        }
    }
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn write_build_info(root: &Path) -> Result<PathBuf> {
    let package_dir = root.join(PACKAGE_DIR);
    fs::create_dir_all(&package_dir)
        .with_context(|| format!("creating package directory '{}'", package_dir.display()))?;

    let path = package_dir.join(BUILD_INFO_FILE);
    let bytes = serde_json::to_vec_pretty(&BuildInfo::current())?;
    fs::write(&path, bytes)
        .with_context(|| format!("writing build info '{}'", path.display()))?;
    Ok(path)
}

/// Archive the assembled package tree and write its checksum sidecar.
///
/// The package directory must exist; a pre-existing archive is replaced.
fn archive_package(root: &Path) -> Result<PathBuf> {
    let package_dir = root.join(PACKAGE_DIR);
    if !package_dir.is_dir() {
        bail!(
            "package directory '{}' missing after artifact collection",
            package_dir.display()
        );
    }

    let zip_path = root.join(PACKAGE_ARCHIVE);
    zip_directory(&package_dir, &zip_path)
        .with_context(|| format!("archiving '{}'", package_dir.display()))?;

    let digest = sha256_file(&zip_path)?;
    let checksum_path = root.join(PACKAGE_CHECKSUM);
    fs::write(&checksum_path, format!("{digest}  {PACKAGE_ARCHIVE}\n"))
        .with_context(|| format!("writing checksum '{}'", checksum_path.display()))?;

    info!("package archive written to '{}'", zip_path.display());
    Ok(zip_path)
}

/// Run the whole pipeline: generate all four variants, build them all,
/// collect headers and binaries, then archive the package tree.
pub fn package_project(root: &Path, env: &ToolchainEnv) -> Result<()> {
    generate_all(root, env).context("generating build configurations")?;
    build_variants(root, "all", env).context("building all variants")?;
    collect_headers(root).context("collecting headers")?;
    collect_binaries(root).context("collecting built binaries")?;
    write_build_info(root).context("writing build info")?;
    archive_package(root)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn build_info_records_the_variant_table() {
        let temp = TempDir::new().unwrap();
        let path = write_build_info(temp.path()).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(parsed["tool"], "gn-packager");
        let variants: Vec<_> = parsed["variants"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(
            variants,
            vec![
                "debug_shared",
                "release_shared",
                "debug_static",
                "release_static"
            ]
        );
    }

    #[test]
    fn archive_package_writes_archive_and_matching_checksum() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("package/include")).unwrap();
        fs::write(root.join("package/include/a.h"), "// a").unwrap();

        let zip_path = archive_package(root).unwrap();

        assert!(zip_path.is_file());
        let sidecar = fs::read_to_string(root.join(PACKAGE_CHECKSUM)).unwrap();
        let digest = sha256_file(&zip_path).unwrap();
        assert_eq!(sidecar, format!("{digest}  {PACKAGE_ARCHIVE}\n"));
    }

    #[test]
    fn archive_package_replaces_a_previous_archive() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("package")).unwrap();
        fs::write(root.join(PACKAGE_ARCHIVE), "stale bytes").unwrap();

        let zip_path = archive_package(root).unwrap();

        assert_ne!(fs::read(&zip_path).unwrap(), b"stale bytes");
    }

    #[test]
    fn missing_package_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = archive_package(temp.path()).unwrap_err();
        assert!(err.to_string().contains("missing after artifact collection"));
        assert!(!temp.path().join(PACKAGE_ARCHIVE).exists());
    }
}
