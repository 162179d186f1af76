use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::combine::Combine;
use crate::dirs::{CONFIG_FILE, system_config_file, user_config_file};

/// Default location of the add-on manifest
pub const DEFAULT_MANIFEST: &str = "vaadin-addons/bower.json";

/// Default directory holding one installed directory per dependency
pub const DEFAULT_COMPONENTS_DIR: &str = "bower_components";

/// Default bundle file
pub const DEFAULT_OUTPUT: &str = "bundle.html";

/// Fully resolved settings for a bundle run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Manifest whose `dependencies` keys are scanned
    pub manifest: PathBuf,

    /// Components root. Used verbatim as the href prefix, so it is kept as a
    /// string rather than a path.
    pub components_dir: String,

    /// Bundle file to (re)write
    pub output: PathBuf,

    /// Exit with a distinct status when the bundle was already up to date
    pub signal_unchanged: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            components_dir: DEFAULT_COMPONENTS_DIR.to_owned(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            signal_unchanged: false,
        }
    }
}

/// One configuration layer: a toml file, the environment, or the command line.
///
/// Unset keys fall through to the next layer and finally to [`Config::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Options {
    /// See [`Config::manifest`]
    pub manifest: Option<PathBuf>,
    /// See [`Config::components_dir`]
    pub components_dir: Option<String>,
    /// See [`Config::output`]
    pub output: Option<PathBuf>,
    /// See [`Config::signal_unchanged`]
    pub signal_unchanged: Option<bool>,
}

impl Combine for Options {
    fn combine(self, other: Self) -> Self {
        Self {
            manifest: self.manifest.combine(other.manifest),
            components_dir: self.components_dir.combine(other.components_dir),
            output: self.output.combine(other.output),
            signal_unchanged: self.signal_unchanged.combine(other.signal_unchanged),
        }
    }
}

impl Options {
    /// Load configuration values from `BOWERLINK_*` environment variables.
    ///
    /// Empty values are treated as unset.
    pub fn from_env() -> Self {
        Self {
            manifest: env_string("BOWERLINK_MANIFEST").map(PathBuf::from),
            components_dir: env_string("BOWERLINK_COMPONENTS_DIR"),
            output: env_string("BOWERLINK_OUTPUT").map(PathBuf::from),
            signal_unchanged: env_string("BOWERLINK_SIGNAL_UNCHANGED")
                .as_deref()
                .and_then(parse_bool),
        }
    }

    /// Load a single toml config file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Fill every unset key from the defaults.
    pub fn into_config(self) -> Config {
        let defaults = Config::default();
        Config {
            manifest: self.manifest.unwrap_or(defaults.manifest),
            components_dir: self.components_dir.unwrap_or(defaults.components_dir),
            output: self.output.unwrap_or(defaults.output),
            signal_unchanged: self.signal_unchanged.unwrap_or(defaults.signal_unchanged),
        }
    }
}

fn env_string(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Parse a boolean value from string, supporting various common formats
fn parse_bool(value: &str) -> Option<bool> {
    use cow_utils::CowUtils;
    match value.cow_to_lowercase().as_ref() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    fn load_layer(path: &Path, context: &str) -> Result<Options> {
        if !path.exists() {
            return Ok(Options::default());
        }
        log::debug!("Loading {} from: {:?}", context, path);
        Options::load_from_file(path)
            .with_context(|| format!("Failed to load {} from {:?}", context, path))
    }

    /// Load configuration with hierarchical precedence:
    /// 1. CLI-provided config path (highest precedence)
    /// 2. Environment variables (BOWERLINK_*)
    /// 3. Project config (bowerlink.toml in `project_dir`)
    /// 4. User config (~/.config/bowerlink/bowerlink.toml)
    /// 5. System config (/etc/bowerlink/bowerlink.toml or equivalent)
    /// 6. Default values (lowest precedence)
    pub fn load(project_dir: &Path, cli_config_path: Option<&Path>) -> Result<Self> {
        Self::load_with_overrides(project_dir, cli_config_path, Options::default())
    }

    /// Same as [`Config::load`], with `overrides` (usually command-line flags) on top.
    pub fn load_with_overrides(
        project_dir: &Path,
        cli_config_path: Option<&Path>,
        overrides: Options,
    ) -> Result<Self> {
        let mut options = overrides;

        if let Some(cli_config_path) = cli_config_path {
            // An explicitly requested file must exist
            let cli_layer = Options::load_from_file(cli_config_path)
                .with_context(|| format!("Failed to load CLI config from {:?}", cli_config_path))?;
            options = options.combine(cli_layer);
        }

        options = options.combine(Options::from_env());

        let project_config_path = project_dir.join(CONFIG_FILE);
        options = options.combine(Self::load_layer(&project_config_path, "project config")?);

        if let Some(user_config_path) = user_config_file() {
            options = options.combine(Self::load_layer(&user_config_path, "user config")?);
        }

        if let Some(system_config_path) = system_config_file() {
            options = options.combine(Self::load_layer(&system_config_path, "system config")?);
        }

        Ok(options.into_config())
    }
}
