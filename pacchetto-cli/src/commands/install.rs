//! Install command - set up a dedicated server from a package.

use std::path::PathBuf;

use console::style;
use pacchetto::installer::PackageInstaller;
use pacchetto::{Layout, PackageMode};

use super::common::ModeArg;
use crate::error::CliError;

/// Arguments for the install command.
pub struct InstallArgs {
    pub mode: ModeArg,
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Run the install command.
pub fn run(args: InstallArgs) -> Result<(), CliError> {
    let mode = PackageMode::from(args.mode);
    let installer = PackageInstaller::new(Layout::default());

    println!("Setting up {} package from '{}'...", mode, args.source.display());
    let result = installer.install(mode, &args.source, &args.destination)?;

    println!(
        "{} Extracted {} files from {} archive(s)",
        style("✓").green().bold(),
        result.files_extracted,
        result.archives_extracted
    );
    println!("Server installed at '{}'", result.server_dir.display());
    Ok(())
}
