use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::Config;
use crate::discovery::{HtmlImport, scan_dependency};
use crate::error::{BundleError, Result};
use crate::manifest::Manifest;

/// What happened to the output file at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Existing content already matched, nothing was written
    Unchanged,
    /// The file was created or overwritten
    Written,
}

/// Join import lines with `\n` and terminate with a single newline.
///
/// An empty import list renders as `"\n"`.
pub fn render_bundle(imports: &[HtmlImport]) -> String {
    let lines: Vec<String> = imports.iter().map(ToString::to_string).collect();
    let mut content = lines.join("\n");
    content.push('\n');
    content
}

/// Replace the file at `path` with `content` unless it already holds exactly those bytes.
///
/// A missing file counts as empty and is always written.
pub fn write_if_changed(path: &Path, content: &str) -> Result<WriteOutcome> {
    let existing = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
        Err(source) => {
            return Err(BundleError::OutputRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if existing == content.as_bytes() {
        return Ok(WriteOutcome::Unchanged);
    }

    fs::write(path, content).map_err(|source| BundleError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(WriteOutcome::Written)
}

/// Builds `bundle.html` from a manifest and the installed component directories.
///
/// The run is strictly linear: load the manifest, scan every dependency in
/// manifest order, render, then compare and possibly write. Any failure before
/// the final write leaves the output untouched.
#[derive(Debug)]
pub struct BundleGenerator {
    config: Config,
    root: PathBuf,
}

impl BundleGenerator {
    /// Generator resolving relative paths against the process working directory.
    pub fn new(config: Config) -> Self {
        Self::in_dir(config, PathBuf::from("."))
    }

    /// Generator resolving relative paths against `root`.
    pub fn in_dir(config: Config, root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            root: root.into(),
        }
    }

    /// Settings this generator runs with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Manifest location, resolved against the root.
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(&self.config.manifest)
    }

    /// Bundle location, resolved against the root.
    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.config.output)
    }

    /// Load the manifest and scan every dependency, in manifest order.
    pub fn collect_imports(&self) -> Result<Vec<HtmlImport>> {
        let manifest = Manifest::load(&self.manifest_path())?;
        info!(
            "Loaded {} dependencies from {:?}",
            manifest.len(),
            self.config.manifest
        );

        let mut imports = Vec::new();
        for dependency in manifest.dependency_names() {
            let found = scan_dependency(&self.root, &self.config.components_dir, dependency)?;
            debug!("Dependency '{}' contributed {} imports", dependency, found.len());
            imports.extend(found);
        }

        Ok(imports)
    }

    /// Compute the bundle content without touching the output file.
    pub fn render(&self) -> Result<String> {
        let imports = self.collect_imports()?;
        info!("Discovered {} HTML imports", imports.len());
        Ok(render_bundle(&imports))
    }

    /// Compute the bundle and write it if it differs from the current output.
    pub fn generate(&self) -> Result<WriteOutcome> {
        let content = self.render()?;
        let output_path = self.output_path();
        let outcome = write_if_changed(&output_path, &content)?;

        match outcome {
            WriteOutcome::Unchanged => info!("Bundle {:?} is up to date", self.config.output),
            WriteOutcome::Written => info!("Bundle written to {:?}", self.config.output),
        }
        Ok(outcome)
    }
}
