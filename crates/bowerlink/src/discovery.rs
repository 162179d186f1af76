use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, trace};

use crate::error::{BundleError, Result};

/// Whether a directory entry looks like it defines a custom element.
///
/// Custom element names must contain a hyphen, and elements are expected to
/// live in their own file, so `paper-button.html` qualifies while demo and
/// test pages such as `index.html` do not. The suffix test is a plain string
/// match on `html`, not an extension check: `x-foo.xhtml` qualifies too.
pub fn is_import_candidate(file_name: &str) -> bool {
    file_name.contains('-') && file_name.ends_with("html")
}

/// A single HTML import discovered inside a dependency directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlImport {
    /// Dependency the file belongs to
    pub dependency: String,
    /// File name inside the dependency directory
    pub file_name: String,
    /// Value of the `href` attribute, `<components-dir>/<dependency>/<file>`
    pub href: String,
}

impl HtmlImport {
    /// Import for `file_name` inside `<components_dir>/<dependency>`.
    pub fn new(components_dir: &str, dependency: &str, file_name: &str) -> Self {
        let folder = dependency_folder(components_dir, dependency);
        Self {
            dependency: dependency.to_owned(),
            file_name: file_name.to_owned(),
            href: format!("{folder}/{file_name}"),
        }
    }
}

impl fmt::Display for HtmlImport {
    /// Renders the `<link rel="import">` line. Nothing is escaped.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<link rel=\"import\" href=\"{}\">", self.href)
    }
}

/// Folder prefix used in hrefs. Always `/`-separated, independent of the host platform.
fn dependency_folder(components_dir: &str, dependency: &str) -> String {
    let base = components_dir.trim_end_matches(['/', '\\']);
    if base.is_empty() {
        dependency.to_owned()
    } else {
        format!("{base}/{dependency}")
    }
}

/// Directory scanned for `dependency`.
///
/// Built from the same string as the hrefs, so a dependency name that looks
/// like an absolute path still resolves below the components directory.
fn dependency_dir(root: &Path, components_dir: &str, dependency: &str) -> PathBuf {
    let base = components_dir.trim_end_matches(['/', '\\']);
    let base = if base.is_empty() { "." } else { base };
    root.join(format!("{base}/{dependency}"))
}

/// List one dependency directory and collect its import candidates.
///
/// `root` is the directory relative paths resolve against; `components_dir`
/// is kept verbatim for the hrefs. Entries come back in the order the
/// filesystem yields them.
pub fn scan_dependency(
    root: &Path,
    components_dir: &str,
    dependency: &str,
) -> Result<Vec<HtmlImport>> {
    let dir = dependency_dir(root, components_dir, dependency);
    debug!("Scanning dependency '{}' in {:?}", dependency, dir);

    let missing = |source| BundleError::DependencyDirectoryMissing {
        name: dependency.to_owned(),
        path: dir.clone(),
        source,
    };

    let mut imports = Vec::new();
    for entry in fs::read_dir(&dir).map_err(missing)? {
        let entry = entry.map_err(missing)?;
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();

        if is_import_candidate(&file_name) {
            let import = HtmlImport::new(components_dir, dependency, &file_name);
            debug!("Found import {}", import.href);
            imports.push(import);
        } else {
            trace!("Skipping {:?} in '{}'", file_name, dependency);
        }
    }

    Ok(imports)
}
