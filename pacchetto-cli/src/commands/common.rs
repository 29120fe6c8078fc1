//! Common types and utilities shared across CLI commands.

use std::path::PathBuf;

use clap::ValueEnum;
use pacchetto::config::ConfigFile;
use pacchetto::{CopyMode, PackageMode};

use crate::error::CliError;

/// Package topology selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ModeArg {
    /// One archive with the server and all content
    Phat,
    /// A server archive plus one archive per content category
    Distributed,
}

impl From<ModeArg> for PackageMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Phat => PackageMode::Phat,
            ModeArg::Distributed => PackageMode::Distributed,
        }
    }
}

/// The user's home directory.
pub fn home_dir() -> Result<PathBuf, CliError> {
    dirs::home_dir()
        .ok_or_else(|| CliError::Config("could not determine the home directory".to_string()))
}

/// Resolve the package mode: CLI > config.
pub fn resolve_mode(cli_mode: Option<ModeArg>, config: &ConfigFile) -> PackageMode {
    cli_mode
        .map(PackageMode::from)
        .unwrap_or(config.package.mode)
}

/// Resolve the copy mode: `--full` > config.
pub fn resolve_copy_mode(full: bool, config: &ConfigFile) -> CopyMode {
    if full {
        CopyMode::Full
    } else {
        config.package.copy_mode
    }
}

/// Resolve the output directory: CLI > config > `<home>/Desktop`.
pub fn resolve_output_dir(
    cli_dir: Option<PathBuf>,
    config: &ConfigFile,
    home: &std::path::Path,
) -> PathBuf {
    cli_dir
        .or_else(|| config.package.output_dir.clone())
        .unwrap_or_else(|| home.join("Desktop"))
}

/// Resolve the staging parent: CLI > config > platform temp root.
pub fn resolve_staging_dir(cli_dir: Option<PathBuf>, config: &ConfigFile) -> Option<PathBuf> {
    cli_dir.or_else(|| config.package.staging_dir.clone())
}
