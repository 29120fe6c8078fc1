//! Configuration file handling.
//!
//! Settings live in `~/.pacchetto/config.ini`. A missing file is not an
//! error; every setting has a default. Command-line flags override values
//! read from the file.
//!
//! ```ini
//! [package]
//! mode = phat
//! copy_mode = selective
//! output_dir = /home/me/Desktop
//! staging_dir = /mnt/scratch
//!
//! [logging]
//! directory = /home/me/.pacchetto/logs
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use ini::Ini;

use crate::content::{CopyMode, PackageMode};
use crate::error::{PacchettoError, Result};

const PACKAGE_SECTION: &str = "package";
const LOGGING_SECTION: &str = "logging";

/// Directory holding the config file and default logs.
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".pacchetto")
}

/// Default config file location.
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.ini")
}

/// `[package]` section.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackageSettings {
    pub mode: PackageMode,
    pub copy_mode: CopyMode,
    /// Where packages are written; the CLI defaults to the desktop.
    pub output_dir: Option<PathBuf>,
    /// Parent of the staging directory; platform temp root when unset.
    pub staging_dir: Option<PathBuf>,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoggingSettings {
    pub directory: Option<PathBuf>,
}

impl LoggingSettings {
    /// Log directory, falling back to `~/.pacchetto/logs`.
    pub fn directory_or_default(&self) -> PathBuf {
        self.directory
            .clone()
            .unwrap_or_else(|| config_dir().join("logs"))
    }
}

/// Parsed configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigFile {
    pub package: PackageSettings,
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Load from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load from `path`, returning defaults if the file does not exist.
    ///
    /// Parse errors name the file.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| PacchettoError::io(path, e))?;
        Self::parse(&content).map_err(|e| match e {
            PacchettoError::Config(msg) => {
                PacchettoError::Config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse INI text.
    pub fn parse(content: &str) -> Result<Self> {
        let ini = Ini::load_from_str(content)
            .map_err(|e| PacchettoError::Config(format!("parse error: {}", e)))?;

        let mut config = Self::default();

        if let Some(section) = ini.section(Some(PACKAGE_SECTION)) {
            if let Some(mode) = section.get("mode") {
                config.package.mode = mode.trim().parse().map_err(PacchettoError::Config)?;
            }
            if let Some(copy_mode) = section.get("copy_mode") {
                config.package.copy_mode =
                    copy_mode.trim().parse().map_err(PacchettoError::Config)?;
            }
            config.package.output_dir = optional_path(section.get("output_dir"));
            config.package.staging_dir = optional_path(section.get("staging_dir"));
        }

        if let Some(section) = ini.section(Some(LOGGING_SECTION)) {
            config.logging.directory = optional_path(section.get("directory"));
        }

        Ok(config)
    }

    /// Serialize to INI text.
    pub fn to_ini_string(&self) -> Result<String> {
        let mut ini = Ini::new();
        ini.with_section(Some(PACKAGE_SECTION))
            .set("mode", self.package.mode.to_string())
            .set("copy_mode", self.package.copy_mode.to_string());
        if let Some(ref dir) = self.package.output_dir {
            ini.with_section(Some(PACKAGE_SECTION))
                .set("output_dir", dir.display().to_string());
        }
        if let Some(ref dir) = self.package.staging_dir {
            ini.with_section(Some(PACKAGE_SECTION))
                .set("staging_dir", dir.display().to_string());
        }
        if let Some(ref dir) = self.logging.directory {
            ini.with_section(Some(LOGGING_SECTION))
                .set("directory", dir.display().to_string());
        }

        let mut buf = Vec::new();
        ini.write_to(&mut buf)
            .map_err(|e| PacchettoError::Config(format!("failed to serialise: {}", e)))?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| PacchettoError::io(parent, e))?;
        }
        fs::write(path, self.to_ini_string()?).map_err(|e| PacchettoError::io(path, e))
    }
}

fn optional_path(value: Option<&str>) -> Option<PathBuf> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
