//! Project workspace IO: unit files, test sources and the manifest.
//!
//! Follows the standard Maven layout. All writes are full-file overwrites;
//! nothing is streamed or patched in place.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info, warn};

use crate::domain::errors::DomainResult;
use crate::domain::models::target::is_valid_package;
use crate::domain::models::GenerationTarget;

/// Root of main sources relative to the project root.
pub const MAIN_SOURCE_ROOT: &str = "src/main/java";
/// Root of test sources relative to the project root.
pub const TEST_SOURCE_ROOT: &str = "src/test/java";
/// Manifest file name at the project root.
pub const MANIFEST_FILE: &str = "pom.xml";

/// Path of the unit under repair, as addressed by the target's package.
pub fn unit_path(project_root: &Path, target: &GenerationTarget) -> PathBuf {
    project_root
        .join(MAIN_SOURCE_ROOT)
        .join(target.package_as_path())
        .join(target.unit_file_name())
}

/// Whether the unit under repair already exists on disk.
pub fn unit_exists(project_root: &Path, target: &GenerationTarget) -> bool {
    unit_path(project_root, target).exists()
}

/// Write the generated source as the full content of the unit file.
///
/// A package declared inside the generated source wins over the target's
/// package, for both the file location and the written text; when the
/// source has no declaration and the target supplies a package, one is
/// prepended. Parent directories are created as needed.
///
/// The declared package comes from untrusted generator output, so it must
/// pass the same dotted-identifier validation as the target's package
/// before it may influence the file location. An invalid declaration is
/// ignored for the path and left in the text for the compiler to reject.
pub async fn write_unit(
    project_root: &Path,
    target: &GenerationTarget,
    source: &str,
) -> DomainResult<PathBuf> {
    let raw_declared = declared_package(source);
    let declared = raw_declared.clone().filter(|package| {
        let valid = is_valid_package(package);
        if !valid {
            warn!(
                package = %package,
                "declared package is not a valid dotted identifier, using the target package"
            );
        }
        valid
    });
    let final_package = declared
        .or_else(|| target.package_name.clone())
        .unwrap_or_default();

    let path = project_root
        .join(MAIN_SOURCE_ROOT)
        .join(final_package.replace('.', "/"))
        .join(target.unit_file_name());

    let content = if raw_declared.is_none() && !final_package.is_empty() {
        format!("package {final_package};\n\n{source}")
    } else {
        source.to_string()
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(&path, content).await?;

    info!(path = %path.display(), "wrote unit source");
    Ok(path)
}

/// Load the conventional test class for the target, or an empty string.
///
/// Absence is non-fatal: a missing package name or a missing file
/// substitutes an empty test source, logged.
pub async fn load_test_source(project_root: &Path, target: &GenerationTarget) -> String {
    let Some(ref package) = target.package_name else {
        warn!("no package name provided, cannot locate the test class reliably");
        return String::new();
    };

    let path = project_root
        .join(TEST_SOURCE_ROOT)
        .join(package.replace('.', "/"))
        .join(target.test_file_name());

    match fs::read_to_string(&path).await {
        Ok(source) => {
            debug!(path = %path.display(), "loaded test class");
            source
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "test class not readable");
            String::new()
        }
    }
}

/// Read the whole manifest.
pub async fn read_manifest(project_root: &Path) -> DomainResult<String> {
    Ok(fs::read_to_string(project_root.join(MANIFEST_FILE)).await?)
}

/// Overwrite the whole manifest.
pub async fn write_manifest(project_root: &Path, manifest: &str) -> DomainResult<()> {
    fs::write(project_root.join(MANIFEST_FILE), manifest).await?;
    info!("manifest updated");
    Ok(())
}

/// The package declared inside a Java source, if any.
fn declared_package(source: &str) -> Option<String> {
    source.lines().map(str::trim).find_map(|line| {
        line.strip_prefix("package ")
            .and_then(|rest| rest.strip_suffix(';'))
            .map(|package| package.trim().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> GenerationTarget {
        GenerationTarget::new("Foo", Some("com.example".to_string()), "spec").unwrap()
    }

    #[tokio::test]
    async fn write_prepends_missing_package_declaration() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_unit(dir.path(), &target(), "class Foo {}")
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("src/main/java/com/example/Foo.java"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("package com.example;\n\nclass Foo {}"));
    }

    #[tokio::test]
    async fn declared_package_wins_over_target_package() {
        let dir = tempfile::tempdir().unwrap();
        let source = "package org.other;\n\nclass Foo {}";
        let path = write_unit(dir.path(), &target(), source).await.unwrap();

        assert_eq!(path, dir.path().join("src/main/java/org/other/Foo.java"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, source);
    }

    #[tokio::test]
    async fn invalid_declared_package_cannot_escape_the_source_root() {
        let dir = tempfile::tempdir().unwrap();
        let source = "package .tmp.evil;\n\nclass Foo {}";
        let path = write_unit(dir.path(), &target(), source).await.unwrap();

        assert!(path.starts_with(dir.path()));
        assert_eq!(path, dir.path().join("src/main/java/com/example/Foo.java"));
        // The bogus declaration stays in the text for the compiler to reject.
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, source);
    }

    #[tokio::test]
    async fn missing_test_class_yields_empty_source() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_test_source(dir.path(), &target()).await, "");

        let no_package = GenerationTarget::new("Foo", None, "spec").unwrap();
        assert_eq!(load_test_source(dir.path(), &no_package).await, "");
    }

    #[tokio::test]
    async fn test_source_is_loaded_from_the_conventional_path() {
        let dir = tempfile::tempdir().unwrap();
        let test_dir = dir.path().join("src/test/java/com/example");
        std::fs::create_dir_all(&test_dir).unwrap();
        std::fs::write(test_dir.join("FooTest.java"), "class FooTest {}").unwrap();

        assert_eq!(
            load_test_source(dir.path(), &target()).await,
            "class FooTest {}"
        );
    }

    #[test]
    fn unit_existence_follows_the_package_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!unit_exists(dir.path(), &target()));

        let unit_dir = dir.path().join("src/main/java/com/example");
        std::fs::create_dir_all(&unit_dir).unwrap();
        std::fs::write(unit_dir.join("Foo.java"), "class Foo {}").unwrap();
        assert!(unit_exists(dir.path(), &target()));
    }
}
