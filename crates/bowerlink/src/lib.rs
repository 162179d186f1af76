//! Generates a `bundle.html` of `<link rel="import">` lines for every custom
//! element file shipped by the dependencies listed in a `bower.json`.

/// Rendering and conditional writing of the bundle file
pub mod bundle;
/// Merging of configuration layers
pub mod combine;
/// Layered configuration (toml files, `BOWERLINK_*` variables, flags)
pub mod config;
/// User and system configuration file locations
pub mod dirs;
/// Scanning dependency directories for custom element files
pub mod discovery;
/// Error taxonomy
pub mod error;
/// The `bower.json` manifest
pub mod manifest;

pub use bundle::{BundleGenerator, WriteOutcome};
pub use config::Config;
pub use error::BundleError;
