//! Pacchetto CLI - Command-line interface
//!
//! Builds Assetto Corsa dedicated server packages from a local installation
//! and sets up servers from those packages.

mod commands;
mod error;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use console::style;
use pacchetto::config::{config_file_path, ConfigFile, LoggingSettings};
use pacchetto::logging::init_logging;

use commands::common::ModeArg;
use commands::config::ConfigCommands;
use error::CliError;

const EXAMPLES: &str = "\
Examples:
  Create an Assetto Corsa dedicated server package that can be distributed
  to other machines:
    pacchetto package

  Create the package using an alternative staging directory. This is useful
  if your main storage is full:
    pacchetto package --staging-dir E:/alternative/temp/dir

  Create one archive per content category instead of a single archive:
    pacchetto package --mode distributed

  Set up a server from a distributed package set:
    pacchetto install --mode distributed ~/Desktop/assetto-corsa-server /srv/ac";

#[derive(Parser)]
#[command(name = "pacchetto")]
#[command(version = pacchetto::VERSION)]
#[command(about = "Tool for creating Assetto Corsa dedicated server packages, which can be directly distributed to other machines")]
#[command(after_help = EXAMPLES)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a dedicated server package from the local installation
    Package {
        /// Package topology (defaults to the config file, then phat)
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Parent directory for staging files instead of the system temp directory
        #[arg(short, long)]
        staging_dir: Option<PathBuf>,

        /// Directory to write the package into (defaults to the desktop)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Include every content file instead of only .ini and .acd files
        #[arg(long)]
        full: bool,
    },

    /// Set up a dedicated server from a package
    Install {
        /// Package topology of SOURCE
        #[arg(long, value_enum)]
        mode: ModeArg,

        /// Phat archive, or the directory of a distributed package set
        source: PathBuf,

        /// Directory to install the server into
        destination: PathBuf,
    },

    /// Print the detected Assetto Corsa installation directory
    Locate,

    /// View or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", style("error:").red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = config_file_path();
    let loaded = ConfigFile::load_from(&config_path);

    // Logging is best effort; a read-only home must not block packaging.
    let log_dir = match &loaded {
        Ok(config) => config.logging.directory_or_default(),
        Err(_) => LoggingSettings::default().directory_or_default(),
    };
    let _log_guard = match init_logging(&log_dir, cli.verbose) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("{} {}", style("warning:").yellow().bold(), e);
            None
        }
    };

    match cli.command {
        Commands::Package {
            mode,
            staging_dir,
            output_dir,
            full,
        } => commands::package::run(
            commands::package::PackageArgs {
                mode,
                staging_dir,
                output_dir,
                full,
            },
            &loaded?,
        ),
        Commands::Install {
            mode,
            source,
            destination,
        } => commands::install::run(commands::install::InstallArgs {
            mode,
            source,
            destination,
        }),
        Commands::Locate => commands::locate::run(),
        Commands::Config { command } => commands::config::run(command, loaded, &config_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_package_defaults() {
        let cli = Cli::try_parse_from(["pacchetto", "package"]).unwrap();
        match cli.command {
            Commands::Package {
                mode,
                staging_dir,
                output_dir,
                full,
            } => {
                assert_eq!(mode, None);
                assert_eq!(staging_dir, None);
                assert_eq!(output_dir, None);
                assert!(!full);
            }
            _ => panic!("expected package command"),
        }
    }

    #[test]
    fn test_parse_package_with_staging_override() {
        let cli = Cli::try_parse_from([
            "pacchetto",
            "package",
            "--mode",
            "distributed",
            "-s",
            "/mnt/scratch",
        ])
        .unwrap();
        match cli.command {
            Commands::Package {
                mode, staging_dir, ..
            } => {
                assert_eq!(mode, Some(ModeArg::Distributed));
                assert_eq!(staging_dir, Some(PathBuf::from("/mnt/scratch")));
            }
            _ => panic!("expected package command"),
        }
    }

    #[test]
    fn test_install_requires_mode() {
        assert!(Cli::try_parse_from(["pacchetto", "install", "a.zip", "/srv/ac"]).is_err());
        let cli =
            Cli::try_parse_from(["pacchetto", "install", "--mode", "phat", "a.zip", "/srv/ac"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Install {
                mode: ModeArg::Phat,
                ..
            }
        ));
    }
}
