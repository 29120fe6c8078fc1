//! Configuration management CLI commands.
//!
//! Provides `config path`, `config show` and `config init`. Only `show`
//! needs the file to parse; `path` and `init` work on a broken file.

use std::path::Path;

use clap::Subcommand;
use pacchetto::config::ConfigFile;

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Show the effective configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run a config subcommand against the file at `path`.
///
/// `loaded` is the outcome of loading that file.
pub fn run(
    command: ConfigCommands,
    loaded: pacchetto::Result<ConfigFile>,
    path: &Path,
) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Show => {
            print!("{}", loaded?.to_ini_string()?);
            Ok(())
        }
        ConfigCommands::Init { force } => run_init(path, force),
    }
}

fn run_init(path: &Path, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        )));
    }

    ConfigFile::default().save_to(path)?;
    println!("Configuration file: {}", path.display());
    println!("CLI arguments override config file values when specified.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn broken_config(dir: &Path) -> PathBuf {
        let path = dir.join("config.ini");
        fs::write(&path, "[package]\nmode = huge\n").unwrap();
        path
    }

    #[test]
    fn test_init_force_replaces_unparseable_file() {
        let temp = TempDir::new().unwrap();
        let path = broken_config(temp.path());
        let loaded = ConfigFile::load_from(&path);
        assert!(loaded.is_err());

        run(ConfigCommands::Init { force: true }, loaded, &path).unwrap();

        assert_eq!(ConfigFile::load_from(&path).unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_path_works_with_unparseable_file() {
        let temp = TempDir::new().unwrap();
        let path = broken_config(temp.path());
        let loaded = ConfigFile::load_from(&path);

        assert!(run(ConfigCommands::Path, loaded, &path).is_ok());
    }

    #[test]
    fn test_show_reports_parse_error_with_path() {
        let temp = TempDir::new().unwrap();
        let path = broken_config(temp.path());
        let loaded = ConfigFile::load_from(&path);

        let err = run(ConfigCommands::Show, loaded, &path).unwrap_err();
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn test_init_without_force_keeps_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = broken_config(temp.path());
        let loaded = ConfigFile::load_from(&path);

        let result = run(ConfigCommands::Init { force: false }, loaded, &path);

        assert!(matches!(result, Err(CliError::Config(_))));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[package]\nmode = huge\n"
        );
    }
}
