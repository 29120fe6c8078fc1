//! Platform discovery strategies.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::InstallationPath;
use crate::error::{PacchettoError, Result};
use crate::layout::Layout;

/// A way of finding the installation root on one kind of platform.
pub trait DiscoveryStrategy {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Find the installation root.
    fn discover(&self) -> Result<InstallationPath>;
}

/// Single candidate at a fixed path beneath the user profile.
#[derive(Debug, Clone)]
pub struct FixedLayoutStrategy {
    candidate: PathBuf,
}

impl FixedLayoutStrategy {
    /// Build the candidate from the profile root and the layout's suffix.
    pub fn new(profile_root: &Path, layout: &Layout) -> Self {
        Self {
            candidate: profile_root.join(&layout.fixed_install_suffix),
        }
    }

    /// The path that will be checked.
    pub fn candidate(&self) -> &Path {
        &self.candidate
    }
}

impl DiscoveryStrategy for FixedLayoutStrategy {
    fn name(&self) -> &'static str {
        "fixed-layout"
    }

    fn discover(&self) -> Result<InstallationPath> {
        debug!(candidate = %self.candidate.display(), "Checking install candidate");
        if self.candidate.exists() {
            Ok(InstallationPath::new(self.candidate.clone()))
        } else {
            Err(PacchettoError::NotFound)
        }
    }
}

/// Platform without a discovery strategy.
#[derive(Debug, Clone)]
pub struct UnsupportedStrategy {
    platform: String,
}

impl UnsupportedStrategy {
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
        }
    }
}

impl DiscoveryStrategy for UnsupportedStrategy {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    fn discover(&self) -> Result<InstallationPath> {
        Err(PacchettoError::Unsupported(self.platform.clone()))
    }
}

/// Filesystem checks used by [`MultiDriveStrategy`].
pub trait DriveProbe {
    /// Whether a marker file can be created (and removed) at the drive root.
    fn is_writable(&self, drive_root: &Path, marker: &str) -> bool;

    /// Whether a path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// [`DriveProbe`] against the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalDriveProbe;

impl DriveProbe for LocalDriveProbe {
    /// A drive only counts as writable when the marker is both created and
    /// removed. If removal fails the marker may be left behind and the drive
    /// is skipped.
    fn is_writable(&self, drive_root: &Path, marker: &str) -> bool {
        let marker_path = drive_root.join(marker);
        match File::create(&marker_path) {
            Ok(file) => {
                drop(file);
                marker_removed(&marker_path, fs::remove_file(&marker_path))
            }
            Err(_) => false,
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn marker_removed(marker_path: &Path, removal: io::Result<()>) -> bool {
    match removal {
        Ok(()) => true,
        Err(e) => {
            warn!(
                path = %marker_path.display(),
                error = %e,
                "Failed to remove drive probe marker, skipping drive"
            );
            false
        }
    }
}

/// Scan of every drive root, in order.
///
/// Optical and network drives can report that any path exists, so a drive
/// is only trusted after a marker file has been written to its root.
#[derive(Debug, Clone)]
pub struct MultiDriveStrategy<P: DriveProbe = LocalDriveProbe> {
    drive_roots: Vec<PathBuf>,
    install_suffix: PathBuf,
    marker: String,
    probe: P,
}

impl MultiDriveStrategy<LocalDriveProbe> {
    /// Scan the layout's drive letters (`A:/` .. `Z:/`).
    pub fn new(layout: &Layout) -> Self {
        let roots = layout
            .drive_letters
            .iter()
            .map(|letter| PathBuf::from(format!("{}:/", letter)))
            .collect();
        Self::with_drive_roots(roots, layout, LocalDriveProbe)
    }
}

impl<P: DriveProbe> MultiDriveStrategy<P> {
    /// Scan an explicit list of drive roots with a custom probe.
    pub fn with_drive_roots(drive_roots: Vec<PathBuf>, layout: &Layout, probe: P) -> Self {
        Self {
            drive_roots,
            install_suffix: layout.drive_install_suffix.clone(),
            marker: layout.probe_marker.clone(),
            probe,
        }
    }

    /// The drive roots scanned, in order.
    pub fn drive_roots(&self) -> &[PathBuf] {
        &self.drive_roots
    }
}

impl<P: DriveProbe> DiscoveryStrategy for MultiDriveStrategy<P> {
    fn name(&self) -> &'static str {
        "multi-drive"
    }

    fn discover(&self) -> Result<InstallationPath> {
        for root in &self.drive_roots {
            if !self.probe.is_writable(root, &self.marker) {
                continue;
            }

            let candidate = root.join(&self.install_suffix);
            debug!(candidate = %candidate.display(), "Checking install candidate");
            if self.probe.exists(&candidate) {
                return Ok(InstallationPath::new(candidate));
            }
        }

        Err(PacchettoError::NotFound)
    }
}
