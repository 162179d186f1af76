use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use serde::de::IgnoredAny;

use crate::error::{BundleError, Result};

/// The subset of a `bower.json` that drives bundle generation.
///
/// Only the keys of `dependencies` matter. Their values (version ranges, git
/// urls, ...) are accepted in any shape and discarded. Key order is the order
/// in which the dependencies appear in the document.
#[derive(Debug, Deserialize)]
pub struct Manifest {
    dependencies: IndexMap<String, IgnoredAny>,
}

impl Manifest {
    /// Read and parse the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read(path).map_err(|source| BundleError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;

        let manifest: Self =
            serde_json::from_slice(&content).map_err(|source| BundleError::ManifestParse {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(
            "Loaded manifest {:?} with {} dependencies",
            path,
            manifest.dependencies.len()
        );
        Ok(manifest)
    }

    /// Parse a manifest from an in-memory JSON document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Dependency names in document order.
    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies.keys().map(String::as_str)
    }

    /// Number of dependencies.
    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    /// Whether `dependencies` is empty.
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_dependency_names_keep_document_order() {
        let manifest = Manifest::from_json(
            r#"{
                "name": "vaadin-addons",
                "dependencies": {
                    "zeta-grid": "^2.0.0",
                    "alpha-button": "vaadin/alpha-button#1.1.0",
                    "mid-dialog": {"version": "1.0"}
                }
            }"#,
        )
        .unwrap();

        let names: Vec<&str> = manifest.dependency_names().collect();
        assert_eq!(names, vec!["zeta-grid", "alpha-button", "mid-dialog"]);
        assert_eq!(manifest.len(), 3);
    }

    #[test]
    fn test_dependency_values_are_opaque() {
        let manifest = Manifest::from_json(
            r#"{"dependencies": {"a": null, "b": 1, "c": [true], "d": "latest"}}"#,
        )
        .unwrap();
        assert_eq!(manifest.len(), 4);
    }

    #[test]
    fn test_empty_dependencies() {
        let manifest = Manifest::from_json(r#"{"dependencies": {}}"#).unwrap();
        assert!(manifest.is_empty());
        assert_eq!(manifest.dependency_names().count(), 0);
    }

    #[test]
    fn test_missing_or_malformed_dependencies_rejected() {
        assert!(Manifest::from_json(r#"{"name": "vaadin-addons"}"#).is_err());
        assert!(Manifest::from_json(r#"{"dependencies": ["a", "b"]}"#).is_err());
        assert!(Manifest::from_json(r#"{"dependencies": null}"#).is_err());
        assert!(Manifest::from_json("not json").is_err());
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = Manifest::load(&temp_dir.path().join("bower.json")).unwrap_err();
        assert!(matches!(err, BundleError::ManifestRead { .. }));
    }

    #[test]
    fn test_load_invalid_file_is_parse_error() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("bower.json");
        fs::write(&path, "{\"dependencies\": ")?;

        let err = Manifest::load(&path).unwrap_err();
        assert!(matches!(err, BundleError::ManifestParse { .. }));
        Ok(())
    }
}
