//! Locate command - print the detected installation directory.

use pacchetto::{InstallationLocator, Layout};

use super::common::home_dir;
use crate::error::CliError;

/// Run the locate command.
pub fn run() -> Result<(), CliError> {
    let home = home_dir()?;
    let locator = InstallationLocator::for_current_platform(&home, &Layout::default());
    let install = locator.locate()?;
    println!("{}", install.as_path().display());
    Ok(())
}
