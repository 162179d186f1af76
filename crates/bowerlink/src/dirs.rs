use std::env;
use std::path::PathBuf;

use etcetera::BaseStrategy;

/// Configuration directory name
const CONFIG_DIR: &str = "bowerlink";

/// Configuration file name, also looked up in the working directory
pub const CONFIG_FILE: &str = "bowerlink.toml";

/// Returns the path to the user configuration file, whether or not it exists.
///
/// Honours `XDG_CONFIG_HOME` (default `$HOME/.config`) on Unix and
/// `%APPDATA%` on Windows.
pub fn user_config_file() -> Option<PathBuf> {
    let dirs = etcetera::choose_base_strategy().ok()?;
    Some(dirs.config_dir().join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Returns the first existing system configuration file.
///
/// Searched in `XDG_CONFIG_DIRS` (default `/etc/xdg`) and then `/etc` on Unix,
/// and in `%PROGRAMDATA%` on Windows.
pub fn system_config_file() -> Option<PathBuf> {
    system_config_dirs()
        .into_iter()
        .map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}

#[cfg(not(windows))]
fn system_config_dirs() -> Vec<PathBuf> {
    xdg_config_dirs(env::var("XDG_CONFIG_DIRS").ok().as_deref())
}

#[cfg(windows)]
fn system_config_dirs() -> Vec<PathBuf> {
    env::var_os("PROGRAMDATA").map(PathBuf::from).into_iter().collect()
}

/// Directories from an `XDG_CONFIG_DIRS` value, followed by `/etc`.
#[cfg_attr(windows, allow(dead_code))]
fn xdg_config_dirs(value: Option<&str>) -> Vec<PathBuf> {
    let value = value.filter(|s| !s.is_empty()).unwrap_or("/etc/xdg");
    value
        .split(':')
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .chain([PathBuf::from("/etc")])
        .collect()
}
