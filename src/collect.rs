//! Collection of headers and built binaries into the packaging tree.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::info;
use walkdir::WalkDir;

use crate::fsutil::copy_file_creating_parents;

/// Extension of the files picked up by the header pass.
pub const HEADER_EXT: &str = "h";

/// Source subtree scanned for public headers, relative to the tool root.
pub const HEADER_SOURCE_DIR: &str = "base";

/// Staging tree assembled before archiving, relative to the tool root.
pub const PACKAGE_DIR: &str = "package";

/// One built artifact to collect: `from` under `out/`, `to` under
/// `package/`.
#[derive(Debug, Clone, Copy)]
pub struct ArtifactMapping {
    pub from: &'static str,
    pub to: &'static str,
}

/// Binaries, import libraries and debug symbols shipped in the package.
pub const ARTIFACT_MANIFEST: &[ArtifactMapping] = &[
    ArtifactMapping {
        from: "debug_shared/base.dll",
        to: "bin/win32/debug/base.dll",
    },
    ArtifactMapping {
        from: "debug_shared/base.dll.lib",
        to: "lib/win32/debug/base.dll.lib",
    },
    ArtifactMapping {
        from: "debug_shared/base.dll.pdb",
        to: "symbol/win32/debug/base.dll.pdb",
    },
    ArtifactMapping {
        from: "release_shared/base.dll",
        to: "bin/win32/release/base.dll",
    },
    ArtifactMapping {
        from: "release_shared/base.dll.lib",
        to: "lib/win32/release/base.dll.lib",
    },
    ArtifactMapping {
        from: "release_shared/base.dll.pdb",
        to: "symbol/win32/release/base.dll.pdb",
    },
    ArtifactMapping {
        from: "debug_static/obj/base/base.lib",
        to: "lib/win32/debug/base.lib",
    },
    ArtifactMapping {
        from: "release_static/obj/base/base.lib",
        to: "lib/win32/release/base.lib",
    },
];

/// Copy every header under `<root>/base` into `<root>/package/include`
/// at the same root-relative path. Returns the number of headers copied.
///
/// Only the extension is matched; there is no exclusion list.
pub fn collect_headers(root: &Path) -> Result<usize> {
    let base = root.join(HEADER_SOURCE_DIR);
    let include_dir = root.join(PACKAGE_DIR).join("include");

    let mut copied = 0usize;
    for entry in WalkDir::new(&base) {
        let entry = entry.with_context(|| format!("walking '{}'", base.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(HEADER_EXT) {
            continue;
        }
        let rel = path.strip_prefix(root).unwrap_or(path);
        copy_file_creating_parents(path, &include_dir.join(rel))?;
        copied += 1;
    }

    info!(
        "collected {copied} headers into '{}'",
        include_dir.display()
    );
    Ok(copied)
}

/// Copy every manifest entry from `<root>/out` into `<root>/package`.
///
/// A missing source aborts the whole pass; entries copied before the
/// failure remain on disk.
pub fn collect_binaries(root: &Path) -> Result<()> {
    let out_dir = root.join("out");
    let package_dir = root.join(PACKAGE_DIR);

    for mapping in ARTIFACT_MANIFEST {
        let from = out_dir.join(mapping.from);
        let to = package_dir.join(mapping.to);
        if !from.is_file() {
            bail!(
                "built artifact '{}' not found; build the project first",
                from.display()
            );
        }
        info!("collecting '{}' -> '{}'", from.display(), to.display());
        copy_file_creating_parents(&from, &to)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn header_pass_copies_only_headers_at_matching_paths() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("base/strings")).unwrap();
        fs::write(root.join("base/values.h"), "// values").unwrap();
        fs::write(root.join("base/values.cc"), "// impl").unwrap();
        fs::write(root.join("base/strings/utf.h"), "// utf").unwrap();

        let copied = collect_headers(root).unwrap();

        assert_eq!(copied, 2);
        let include = root.join("package/include");
        assert!(include.join("base/values.h").exists());
        assert!(include.join("base/strings/utf.h").exists());
        assert!(!include.join("base/values.cc").exists());
    }

    #[test]
    fn binary_pass_places_every_manifest_entry() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        for mapping in ARTIFACT_MANIFEST {
            let from = root.join("out").join(mapping.from);
            fs::create_dir_all(from.parent().unwrap()).unwrap();
            fs::write(&from, mapping.from).unwrap();
        }

        collect_binaries(root).unwrap();

        for mapping in ARTIFACT_MANIFEST {
            let to = root.join("package").join(mapping.to);
            assert_eq!(fs::read_to_string(&to).unwrap(), mapping.from);
        }
    }

    #[test]
    fn missing_artifact_aborts_and_keeps_earlier_copies() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        // Seed everything except the last manifest entry.
        let missing = ARTIFACT_MANIFEST.last().unwrap();
        for mapping in &ARTIFACT_MANIFEST[..ARTIFACT_MANIFEST.len() - 1] {
            let from = root.join("out").join(mapping.from);
            fs::create_dir_all(from.parent().unwrap()).unwrap();
            fs::write(&from, "bin").unwrap();
        }

        let err = collect_binaries(root).unwrap_err();
        assert!(err.to_string().contains(missing.from));

        let first = root.join("package").join(ARTIFACT_MANIFEST[0].to);
        assert!(first.exists());
        assert!(!root.join("package").join(missing.to).exists());
    }
}
