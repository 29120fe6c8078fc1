//! Fixed names used across discovery, packaging and installation.
//!
//! Every component receives a [`Layout`] at construction instead of reading
//! process-wide constants, which keeps tests free to swap any name.

use std::path::{Path, PathBuf};

use crate::content::ContentCategory;

/// Steam library path of the game, relative to a Steam root.
pub const STEAM_APP_SUBPATH: &str = "steamapps/common/assettocorsa";

/// Immutable table of subpaths, filenames and probe settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Server subtree beneath the install root.
    pub server_dir: String,
    /// Content subtree beneath the install root.
    pub content_dir: String,
    /// Install root relative to the user profile on fixed-layout platforms.
    pub fixed_install_suffix: PathBuf,
    /// Install root relative to a drive root on multi-drive platforms.
    pub drive_install_suffix: PathBuf,
    /// Drive letters probed, in order.
    pub drive_letters: Vec<char>,
    /// Marker file created and removed during the drive write-probe.
    pub probe_marker: String,
    /// Base name of the phat archive and the distributed package directory.
    pub output_name: String,
    /// Filename prefix of staging directories.
    pub staging_prefix: String,
    /// Extensions retained by selective copies, without the leading dot.
    pub selective_extensions: Vec<String>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            server_dir: "server".to_string(),
            content_dir: "content".to_string(),
            fixed_install_suffix: Path::new("Library/Application Support/Steam")
                .join(STEAM_APP_SUBPATH),
            drive_install_suffix: Path::new("Program Files (x86)/Steam").join(STEAM_APP_SUBPATH),
            drive_letters: ('A'..='Z').collect(),
            probe_marker: ".pacchetto".to_string(),
            output_name: "assetto-corsa-server".to_string(),
            staging_prefix: ".pacchetto.".to_string(),
            selective_extensions: vec!["ini".to_string(), "acd".to_string()],
        }
    }
}

impl Layout {
    /// Filename of the phat archive.
    pub fn phat_archive_name(&self) -> String {
        format!("{}.zip", self.output_name)
    }

    /// Filename of the server archive in a distributed set.
    pub fn server_archive_name(&self) -> String {
        format!("{}.zip", self.server_dir)
    }

    /// Filename of a category archive in a distributed set.
    pub fn category_archive_name(&self, category: ContentCategory) -> String {
        format!("{}.zip", category.dir_name())
    }

    /// Path of a category archive inside a distributed package directory.
    pub fn category_archive_path(&self, package_dir: &Path, category: ContentCategory) -> PathBuf {
        package_dir
            .join(&self.content_dir)
            .join(self.category_archive_name(category))
    }

    /// Whether a file name ends with `.<ext>` for one of the selective
    /// extensions. Case-insensitive; a bare `.ini` counts.
    pub fn is_selective_file(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let name = name.to_ascii_lowercase();
        self.selective_extensions
            .iter()
            .any(|ext| name.ends_with(&format!(".{}", ext.to_ascii_lowercase())))
    }
}
