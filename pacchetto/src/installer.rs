//! Dedicated server setup from packages.
//!
//! This is the inverse of [`crate::builder`]:
//! - a phat archive is extracted straight into the destination
//! - a distributed set extracts `server.zip` first, then each category
//!   archive into `<dest>/server/content/`

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::archive::extract_zip;
use crate::content::{ContentCategory, PackageMode};
use crate::error::{PacchettoError, Result};
use crate::layout::Layout;

/// Result of a server installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallResult {
    /// Root of the installed server tree.
    pub server_dir: PathBuf,
    /// Number of archives extracted.
    pub archives_extracted: usize,
    /// Total number of files extracted.
    pub files_extracted: usize,
}

/// Extracts phat and distributed packages.
#[derive(Debug, Clone, Default)]
pub struct PackageInstaller {
    layout: Layout,
}

impl PackageInstaller {
    /// Create an installer using the given layout.
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    /// Install from `source` according to `mode`.
    ///
    /// `source` is the phat archive for [`PackageMode::Phat`] and the
    /// package directory for [`PackageMode::Distributed`].
    pub fn install(
        &self,
        mode: PackageMode,
        source: &Path,
        destination_dir: &Path,
    ) -> Result<InstallResult> {
        match mode {
            PackageMode::Phat => self.install_monolithic(source, destination_dir),
            PackageMode::Distributed => self.install_distributed(source, destination_dir),
        }
    }

    /// Extract a phat package into `destination_dir`.
    ///
    /// # Errors
    ///
    /// `PackageMissing` if `package_path` does not exist.
    pub fn install_monolithic(
        &self,
        package_path: &Path,
        destination_dir: &Path,
    ) -> Result<InstallResult> {
        if !package_path.exists() {
            return Err(PacchettoError::PackageMissing(
                package_path.display().to_string(),
            ));
        }

        create_destination(destination_dir)?;

        info!(package = %package_path.display(), "Extracting phat package");
        let stats = extract_zip(package_path, destination_dir)?;

        Ok(InstallResult {
            server_dir: destination_dir.join(&self.layout.server_dir),
            archives_extracted: 1,
            files_extracted: stats.files,
        })
    }

    /// Extract a distributed package set into `destination_dir`.
    ///
    /// # Errors
    ///
    /// `PackageMissing` naming the package directory, `server`, or the first
    /// category whose archive is absent. Extraction stops at that point.
    pub fn install_distributed(
        &self,
        packages_dir: &Path,
        destination_dir: &Path,
    ) -> Result<InstallResult> {
        if !packages_dir.exists() {
            return Err(PacchettoError::PackageMissing(
                packages_dir.display().to_string(),
            ));
        }

        create_destination(destination_dir)?;

        let server_archive = packages_dir.join(self.layout.server_archive_name());
        if !server_archive.is_file() {
            return Err(PacchettoError::PackageMissing(self.layout.server_dir.clone()));
        }

        info!(package = %server_archive.display(), "Extracting the server package");
        let mut files_extracted = extract_zip(&server_archive, destination_dir)?.files;
        let mut archives_extracted = 1;

        let server_dir = destination_dir.join(&self.layout.server_dir);
        let content_dest = server_dir.join(&self.layout.content_dir);
        for category in ContentCategory::ALL {
            let archive = self.layout.category_archive_path(packages_dir, category);
            if !archive.is_file() {
                return Err(PacchettoError::PackageMissing(category.to_string()));
            }

            info!(package = %archive.display(), "Extracting the {} package", category);
            files_extracted += extract_zip(&archive, &content_dest)?.files;
            archives_extracted += 1;
        }

        Ok(InstallResult {
            server_dir,
            archives_extracted,
            files_extracted,
        })
    }
}

/// Create the destination tree; succeeds if it already exists.
fn create_destination(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| PacchettoError::io(path, e))
}
