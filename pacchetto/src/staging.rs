//! Ephemeral staging tree and the filtered copy pipeline.
//!
//! A [`StagingArea`] owns a uniquely named temporary directory. The
//! directory is removed recursively when the value is dropped, so every exit
//! path of a packaging call (including `?` returns from deep inside a copy)
//! releases it. Use [`StagingArea::close`] to observe removal errors.
//!
//! Staged layout mirrors the phat archive:
//!
//! ```text
//! <staging>/server/...                      verbatim server files
//! <staging>/server/content/<category>/...   full or selective content
//! ```

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, info};

use crate::content::{ContentCategory, CopyMode};
use crate::error::{PacchettoError, Result};
use crate::fs_util::copy_tree;
use crate::layout::Layout;
use crate::locator::InstallationPath;

/// Scoped staging directory.
#[derive(Debug)]
pub struct StagingArea {
    dir: TempDir,
    layout: Layout,
}

impl StagingArea {
    /// Create a staging directory under `override_parent`, or under the
    /// platform temp root when no override is given.
    pub fn create(override_parent: Option<&Path>, layout: &Layout) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(&layout.staging_prefix);

        let dir = match override_parent {
            Some(parent) => builder
                .tempdir_in(parent)
                .map_err(|e| PacchettoError::io(parent, e))?,
            None => builder
                .tempdir()
                .map_err(|e| PacchettoError::io(std::env::temp_dir(), e))?,
        };

        debug!(path = %dir.path().display(), "Created staging directory");
        Ok(Self {
            dir,
            layout: layout.clone(),
        })
    }

    /// Root of the staging tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Staged server tree, the root of a phat archive.
    pub fn server_dir(&self) -> PathBuf {
        self.dir.path().join(&self.layout.server_dir)
    }

    /// Staged destination of one content category.
    pub fn category_dir(&self, category: ContentCategory) -> PathBuf {
        self.server_dir()
            .join(&self.layout.content_dir)
            .join(category.dir_name())
    }

    /// Copy the installation's server subtree verbatim into the staging tree.
    pub fn copy_server_files(&self, install: &InstallationPath) -> Result<usize> {
        let src = install.server_dir(&self.layout);
        if !src.is_dir() {
            return Err(PacchettoError::io(
                &src,
                io::Error::new(io::ErrorKind::NotFound, "server directory does not exist"),
            ));
        }

        info!(src = %src.display(), "Staging server files");
        copy_tree(&src, &self.server_dir(), None)
    }

    /// Copy one content category into the staging tree.
    ///
    /// # Errors
    ///
    /// `ContentMissing` with the expected source path when the category
    /// directory is absent from the installation.
    pub fn copy_content(
        &self,
        install: &InstallationPath,
        category: ContentCategory,
        mode: CopyMode,
    ) -> Result<usize> {
        let src = install.category_dir(&self.layout, category);
        if !src.is_dir() {
            return Err(PacchettoError::ContentMissing(src.display().to_string()));
        }

        info!(src = %src.display(), mode = %mode, "Staging content");
        let dest = self.category_dir(category);
        match mode {
            CopyMode::Full => copy_tree(&src, &dest, None),
            CopyMode::Selective => {
                let layout = &self.layout;
                let accept: &dyn Fn(&Path) -> bool = &|path| layout.is_selective_file(path);
                copy_tree(&src, &dest, Some(accept))
            }
        }
    }

    /// Copy the server files and every content category.
    ///
    /// `on_step` receives a message before each copy starts.
    pub fn stage_all(
        &self,
        install: &InstallationPath,
        mode: CopyMode,
        on_step: &dyn Fn(&str),
    ) -> Result<usize> {
        on_step("Staging server files...");
        let mut copied = self.copy_server_files(install)?;
        for category in ContentCategory::ALL {
            on_step(&format!("Staging {} ({})...", category, mode));
            copied += self.copy_content(install, category, mode)?;
        }
        Ok(copied)
    }

    /// Remove the staging tree now, reporting any removal error.
    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir
            .close()
            .map_err(|e| PacchettoError::io(&path, e))?;
        debug!(path = %path.display(), "Removed staging directory");
        Ok(())
    }
}
