//! Package building.
//!
//! Two topologies are produced:
//!
//! - **Phat**: the staged tree (server plus filtered content) in a single
//!   archive, `<dest>/assetto-corsa-server.zip`
//! - **Distributed**: a directory `<dest>/assetto-corsa-server/` holding
//!   `server.zip` and `content/<category>.zip`, archived straight from the
//!   installation without staging
//!
//! A distributed build that fails part way leaves the archives it already
//! wrote on disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::archive::create_zip;
use crate::content::{ContentCategory, CopyMode, PackageMode};
use crate::error::{PacchettoError, Result};
use crate::layout::Layout;
use crate::locator::InstallationPath;
use crate::staging::StagingArea;

/// Progress callback for packaging operations.
///
/// # Arguments
///
/// * `stage` - Current packaging stage
/// * `message` - Human-readable message
pub type PackageProgressCallback = Box<dyn Fn(PackageStage, &str)>;

/// Packaging stages for progress reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageStage {
    /// Copying files into the staging tree.
    Staging,
    /// Writing archives.
    Archiving,
    /// Packaging complete.
    Complete,
}

impl PackageStage {
    /// Get a human-readable name for the stage.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Staging => "Staging",
            Self::Archiving => "Archiving",
            Self::Complete => "Complete",
        }
    }
}

/// Options for [`PackageBuilder::create_package`].
#[derive(Debug, Clone)]
pub struct PackageOptions {
    /// Package topology.
    pub mode: PackageMode,
    /// Content copy mode (phat packages only).
    pub copy_mode: CopyMode,
    /// Directory the package is written into.
    pub destination_dir: PathBuf,
    /// Parent of the staging directory; platform temp root when `None`.
    pub staging_parent: Option<PathBuf>,
}

impl PackageOptions {
    /// Phat package with selective copy into `destination_dir`.
    pub fn new(destination_dir: impl Into<PathBuf>) -> Self {
        Self {
            mode: PackageMode::default(),
            copy_mode: CopyMode::default(),
            destination_dir: destination_dir.into(),
            staging_parent: None,
        }
    }

    /// Set the package topology.
    pub fn with_mode(mut self, mode: PackageMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the content copy mode.
    pub fn with_copy_mode(mut self, copy_mode: CopyMode) -> Self {
        self.copy_mode = copy_mode;
        self
    }

    /// Stage under `parent` instead of the platform temp root.
    pub fn with_staging_parent(mut self, parent: Option<PathBuf>) -> Self {
        self.staging_parent = parent;
        self
    }
}

/// Builds phat and distributed packages.
pub struct PackageBuilder {
    layout: Layout,
    on_progress: Option<PackageProgressCallback>,
}

impl PackageBuilder {
    /// Create a builder using the given layout.
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            on_progress: None,
        }
    }

    /// Report progress through `callback`.
    pub fn with_progress(mut self, callback: PackageProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    /// The layout in use.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    fn report(&self, stage: PackageStage, message: &str) {
        if let Some(ref cb) = self.on_progress {
            cb(stage, message);
        }
    }

    /// Build the package described by `options`.
    ///
    /// Returns the phat archive path or the distributed package directory.
    pub fn create_package(
        &self,
        install: &InstallationPath,
        options: &PackageOptions,
    ) -> Result<PathBuf> {
        match options.mode {
            PackageMode::Phat => self.create_phat_package(
                install,
                &options.destination_dir,
                options.staging_parent.as_deref(),
                options.copy_mode,
            ),
            PackageMode::Distributed => self.build_distributed(install, &options.destination_dir),
        }
    }

    /// Stage the installation and archive it as a phat package.
    ///
    /// The staging directory is removed before returning, whether or not
    /// packaging succeeded.
    pub fn create_phat_package(
        &self,
        install: &InstallationPath,
        destination_dir: &Path,
        staging_parent: Option<&Path>,
        copy_mode: CopyMode,
    ) -> Result<PathBuf> {
        let staging = StagingArea::create(staging_parent, &self.layout)?;

        staging.stage_all(install, copy_mode, &|message| {
            self.report(PackageStage::Staging, message)
        })?;

        let archive_path = self.build_monolithic(&staging, destination_dir)?;

        if let Err(e) = staging.close() {
            warn!(error = %e, "Failed to remove staging directory");
        }

        self.report(PackageStage::Complete, "Successfully created server package");
        Ok(archive_path)
    }

    /// Archive a fully staged tree into the phat archive under
    /// `destination_dir`, overwriting any previous archive.
    pub fn build_monolithic(&self, staging: &StagingArea, destination_dir: &Path) -> Result<PathBuf> {
        let archive_path = destination_dir.join(self.layout.phat_archive_name());

        self.report(PackageStage::Archiving, "Creating package...");
        let stats = create_zip(&staging.server_dir(), &archive_path)?;

        info!(
            archive = %archive_path.display(),
            files = stats.files,
            "Created phat package"
        );
        Ok(archive_path)
    }

    /// Archive the installation as a distributed package set.
    ///
    /// # Errors
    ///
    /// `ContentMissing` with the category name for the first category absent
    /// from the installation. Archives written before that point remain.
    pub fn build_distributed(
        &self,
        install: &InstallationPath,
        destination_dir: &Path,
    ) -> Result<PathBuf> {
        let package_dir = destination_dir.join(&self.layout.output_name);
        let content_dir = package_dir.join(&self.layout.content_dir);
        fs::create_dir_all(&content_dir).map_err(|e| PacchettoError::io(&content_dir, e))?;

        self.report(PackageStage::Archiving, "Creating server package...");
        let server_archive = package_dir.join(self.layout.server_archive_name());
        create_zip(&install.server_dir(&self.layout), &server_archive)?;

        for category in ContentCategory::ALL {
            let src = install.category_dir(&self.layout, category);
            if !src.is_dir() {
                return Err(PacchettoError::ContentMissing(category.to_string()));
            }

            self.report(
                PackageStage::Archiving,
                &format!("Creating {} package...", category),
            );
            let archive_path = self.layout.category_archive_path(&package_dir, category);
            create_zip(&src, &archive_path)?;
        }

        info!(path = %package_dir.display(), "Created distributed packages");
        self.report(PackageStage::Complete, "Successfully created server packages");
        Ok(package_dir)
    }
}

impl Default for PackageBuilder {
    fn default() -> Self {
        Self::new(Layout::default())
    }
}
