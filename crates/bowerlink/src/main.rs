use clap::Parser;
use env_logger::Env;
use log::{debug, info};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use bowerlink::bundle::{BundleGenerator, WriteOutcome};
use bowerlink::config::{Config, Options};

/// Exit status for an up-to-date bundle when `--signal-unchanged` is active
const UNCHANGED_EXIT_CODE: u8 = 2;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory that relative paths and the project config are resolved against
    #[arg(short = 'C', long, default_value = ".")]
    directory: PathBuf,

    /// Manifest listing the add-on dependencies [default: vaadin-addons/bower.json]
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Directory containing one installed directory per dependency [default: bower_components]
    #[arg(long)]
    components_dir: Option<String>,

    /// Bundle file to generate [default: bundle.html]
    #[arg(short, long, conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Print the bundle to stdout instead of writing the output file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Exit with status 2 when the bundle is already up to date
    #[arg(long)]
    signal_unchanged: bool,

    /// Configuration file path, relative to --directory
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn overrides(&self) -> Options {
        Options {
            manifest: self.manifest.clone(),
            components_dir: self.components_dir.clone(),
            output: self.output.clone(),
            signal_unchanged: self.signal_unchanged.then_some(true),
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    debug!("Verbosity level: {} (log level: {})", cli.verbose, log_level);
    info!("Starting bowerlink in {:?}", cli.directory);

    // Absolute paths are kept as-is by `join`
    let config_path = cli.config.as_ref().map(|path| cli.directory.join(path));
    let config =
        Config::load_with_overrides(&cli.directory, config_path.as_deref(), cli.overrides())?;
    debug!("Configuration: {:?}", config);

    let generator = BundleGenerator::in_dir(config, &cli.directory);

    if cli.stdout {
        let content = generator.render()?;
        let mut stdout = io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        stdout.flush()?;
        return Ok(ExitCode::SUCCESS);
    }

    match generator.generate()? {
        WriteOutcome::Written => Ok(ExitCode::SUCCESS),
        WriteOutcome::Unchanged if generator.config().signal_unchanged => {
            info!("No changes, exiting with status {}", UNCHANGED_EXIT_CODE);
            Ok(ExitCode::from(UNCHANGED_EXIT_CODE))
        }
        WriteOutcome::Unchanged => Ok(ExitCode::SUCCESS),
    }
}
