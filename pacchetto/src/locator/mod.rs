//! Installation discovery.
//!
//! The [`InstallationLocator`] delegates to one [`DiscoveryStrategy`] chosen
//! once at startup by [`platform_strategy`]. Strategies:
//!
//! - [`FixedLayoutStrategy`] - single candidate beneath the user profile (macOS)
//! - [`MultiDriveStrategy`] - write-probed scan of every drive letter (Windows)
//! - [`UnsupportedStrategy`] - always fails (everything else)
//!
//! Nothing is cached: every [`InstallationLocator::locate`] call rescans.

mod strategy;

pub use strategy::{
    DiscoveryStrategy, DriveProbe, FixedLayoutStrategy, LocalDriveProbe, MultiDriveStrategy,
    UnsupportedStrategy,
};

use std::path::{Path, PathBuf};

use tracing::info;

use crate::content::ContentCategory;
use crate::error::Result;
use crate::layout::Layout;

/// Root directory of a detected game installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationPath(PathBuf);

impl InstallationPath {
    /// Wrap an installation root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self(root.into())
    }

    /// The installation root.
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// The server subtree.
    pub fn server_dir(&self, layout: &Layout) -> PathBuf {
        self.0.join(&layout.server_dir)
    }

    /// The directory holding one content category.
    pub fn category_dir(&self, layout: &Layout, category: ContentCategory) -> PathBuf {
        self.0.join(&layout.content_dir).join(category.dir_name())
    }
}

impl AsRef<Path> for InstallationPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// Finds the game installation using an injected strategy.
pub struct InstallationLocator {
    strategy: Box<dyn DiscoveryStrategy>,
}

impl InstallationLocator {
    /// Create a locator around a discovery strategy.
    pub fn new(strategy: Box<dyn DiscoveryStrategy>) -> Self {
        Self { strategy }
    }

    /// Create a locator for the platform this binary was built for.
    ///
    /// `profile_root` is the user's home directory.
    pub fn for_current_platform(profile_root: &Path, layout: &Layout) -> Self {
        Self::new(platform_strategy(profile_root, layout))
    }

    /// Name of the active strategy.
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Run discovery.
    ///
    /// # Errors
    ///
    /// `NotFound` when no candidate exists, `Unsupported` when the platform
    /// has no discovery strategy.
    pub fn locate(&self) -> Result<InstallationPath> {
        let path = self.strategy.discover()?;
        info!(
            strategy = self.strategy.name(),
            path = %path.as_path().display(),
            "Located Assetto Corsa installation"
        );
        Ok(path)
    }
}

/// Select the discovery strategy for the compiled target platform.
#[cfg(target_os = "macos")]
pub fn platform_strategy(profile_root: &Path, layout: &Layout) -> Box<dyn DiscoveryStrategy> {
    Box::new(FixedLayoutStrategy::new(profile_root, layout))
}

/// Select the discovery strategy for the compiled target platform.
#[cfg(target_os = "windows")]
pub fn platform_strategy(_profile_root: &Path, layout: &Layout) -> Box<dyn DiscoveryStrategy> {
    Box::new(MultiDriveStrategy::new(layout))
}

/// Select the discovery strategy for the compiled target platform.
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub fn platform_strategy(_profile_root: &Path, _layout: &Layout) -> Box<dyn DiscoveryStrategy> {
    Box::new(UnsupportedStrategy::new(std::env::consts::OS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PacchettoError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_installation_path_accessors() {
        let layout = Layout::default();
        let install = InstallationPath::new("/games/ac");
        assert_eq!(install.server_dir(&layout), PathBuf::from("/games/ac/server"));
        assert_eq!(
            install.category_dir(&layout, ContentCategory::Weather),
            PathBuf::from("/games/ac/content/weather")
        );
    }

    #[test]
    fn test_locator_rescans_every_call() {
        let temp = TempDir::new().unwrap();
        let layout = Layout::default();
        let locator = InstallationLocator::new(Box::new(FixedLayoutStrategy::new(
            temp.path(),
            &layout,
        )));

        assert!(matches!(locator.locate(), Err(PacchettoError::NotFound)));

        let root = temp.path().join(&layout.fixed_install_suffix);
        fs::create_dir_all(root.join("server")).unwrap();

        let found = locator.locate().unwrap();
        assert_eq!(found.as_path(), root);
        assert!(found.server_dir(&layout).is_dir());
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    #[test]
    fn test_platform_strategy_unsupported_here() {
        let temp = TempDir::new().unwrap();
        let locator = InstallationLocator::for_current_platform(temp.path(), &Layout::default());
        assert_eq!(locator.strategy_name(), "unsupported");
        assert!(matches!(
            locator.locate(),
            Err(PacchettoError::Unsupported(_))
        ));
    }
}
