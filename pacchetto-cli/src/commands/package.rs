//! Package command - build a dedicated server package from the local install.

use std::path::PathBuf;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use pacchetto::builder::{PackageBuilder, PackageOptions, PackageStage};
use pacchetto::config::ConfigFile;
use pacchetto::{InstallationLocator, Layout, PackageMode};
use tracing::info;

use super::common::{
    home_dir, resolve_copy_mode, resolve_mode, resolve_output_dir, resolve_staging_dir, ModeArg,
};
use crate::error::CliError;

/// Arguments for the package command.
pub struct PackageArgs {
    pub mode: Option<ModeArg>,
    pub staging_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub full: bool,
}

/// Run the package command.
pub fn run(args: PackageArgs, config: &ConfigFile) -> Result<(), CliError> {
    let home = home_dir()?;
    let layout = Layout::default();

    let mode = resolve_mode(args.mode, config);
    let options = PackageOptions::new(resolve_output_dir(args.output_dir, config, &home))
        .with_mode(mode)
        .with_copy_mode(resolve_copy_mode(args.full, config))
        .with_staging_parent(resolve_staging_dir(args.staging_dir, config));

    let locator = InstallationLocator::for_current_platform(&home, &layout);
    let install = locator.locate()?;
    println!("Assetto Corsa: {}", install.as_path().display());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let progress = spinner.clone();
    let builder = PackageBuilder::new(layout).with_progress(Box::new(
        move |stage: PackageStage, message: &str| {
            info!(stage = stage.name(), "{}", message);
            progress.set_message(message.to_string());
        },
    ));

    let result = builder.create_package(&install, &options);
    spinner.finish_and_clear();
    let path = result?;

    let what = match mode {
        PackageMode::Phat => "package",
        PackageMode::Distributed => "packages",
    };
    println!(
        "{} Created {} at '{}'",
        style("✓").green().bold(),
        what,
        path.display()
    );
    Ok(())
}
