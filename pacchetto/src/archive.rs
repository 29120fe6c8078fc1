//! Zip creation and extraction primitives.
//!
//! Archives are rooted at the name of the directory they were built from:
//! zipping `/tmp/x/server` yields entries `server/`, `server/acServer`, ...
//! Entries are written in sorted path order with a fixed compression method
//! and timestamp, so the same tree always produces the same archive.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Component, Path};

use tracing::{debug, warn};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{PacchettoError, Result};

/// Summary of a created or extracted archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArchiveStats {
    /// Number of regular files.
    pub files: usize,
    /// Number of directories.
    pub directories: usize,
}

/// Zip `source_dir` into `archive_path`, replacing any existing file.
pub fn create_zip(source_dir: &Path, archive_path: &Path) -> Result<ArchiveStats> {
    let root_name = source_dir
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            PacchettoError::io(
                source_dir,
                io::Error::new(io::ErrorKind::InvalidInput, "invalid source directory name"),
            )
        })?;

    if !source_dir.is_dir() {
        return Err(PacchettoError::io(
            source_dir,
            io::Error::new(io::ErrorKind::NotFound, "source directory does not exist"),
        ));
    }

    if let Some(parent) = archive_path.parent() {
        fs::create_dir_all(parent).map_err(|e| PacchettoError::io(parent, e))?;
    }
    let file = File::create(archive_path).map_err(|e| PacchettoError::io(archive_path, e))?;
    let mut writer = ZipWriter::new(BufWriter::new(file));
    let base_options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    let mut stats = ArchiveStats::default();
    for entry in WalkDir::new(source_dir).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(source_dir).to_path_buf();
            PacchettoError::io(&path, e.into())
        })?;
        let Ok(rel_path) = entry.path().strip_prefix(source_dir) else {
            continue;
        };
        let name = entry_name(root_name, rel_path);
        let options = with_permissions(base_options, entry.path())?;

        if entry.file_type().is_dir() {
            writer
                .add_directory(format!("{}/", name), options)
                .map_err(|e| PacchettoError::archive(archive_path, e))?;
            stats.directories += 1;
        } else {
            writer
                .start_file(name, options)
                .map_err(|e| PacchettoError::archive(archive_path, e))?;
            let mut src = File::open(entry.path()).map_err(|e| PacchettoError::io(entry.path(), e))?;
            io::copy(&mut src, &mut writer).map_err(|e| PacchettoError::io(entry.path(), e))?;
            stats.files += 1;
        }
    }

    writer
        .finish()
        .map_err(|e| PacchettoError::archive(archive_path, e))?;

    debug!(
        archive = %archive_path.display(),
        files = stats.files,
        directories = stats.directories,
        "Created archive"
    );
    Ok(stats)
}

/// Extract `archive_path` into `dest_dir`.
///
/// Entries whose names would escape `dest_dir` are skipped.
pub fn extract_zip(archive_path: &Path, dest_dir: &Path) -> Result<ArchiveStats> {
    let file = File::open(archive_path).map_err(|e| PacchettoError::io(archive_path, e))?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| PacchettoError::archive(archive_path, e))?;

    fs::create_dir_all(dest_dir).map_err(|e| PacchettoError::io(dest_dir, e))?;

    let mut stats = ArchiveStats::default();
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| PacchettoError::archive(archive_path, e))?;

        let Some(entry_path) = entry.enclosed_name() else {
            warn!(entry = entry.name(), "Skipping archive entry with unsafe path");
            continue;
        };
        let output_path = dest_dir.join(entry_path);

        if entry.is_dir() {
            fs::create_dir_all(&output_path).map_err(|e| PacchettoError::io(&output_path, e))?;
            stats.directories += 1;
            continue;
        }

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| PacchettoError::io(parent, e))?;
        }
        let mut outfile =
            File::create(&output_path).map_err(|e| PacchettoError::io(&output_path, e))?;
        io::copy(&mut entry, &mut outfile).map_err(|e| PacchettoError::io(&output_path, e))?;
        drop(outfile);

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&output_path, fs::Permissions::from_mode(mode & 0o777))
                .map_err(|e| PacchettoError::io(&output_path, e))?;
        }

        stats.files += 1;
    }

    debug!(
        archive = %archive_path.display(),
        dest = %dest_dir.display(),
        files = stats.files,
        "Extracted archive"
    );
    Ok(stats)
}

/// Zip entry name for a path relative to the archive root.
fn entry_name(root_name: &str, rel_path: &Path) -> String {
    let mut name = root_name.to_string();
    for component in rel_path.components() {
        if let Component::Normal(part) = component {
            name.push('/');
            name.push_str(&part.to_string_lossy());
        }
    }
    name
}

#[cfg(unix)]
fn with_permissions(options: SimpleFileOptions, path: &Path) -> Result<SimpleFileOptions> {
    use std::os::unix::fs::PermissionsExt;

    let mode = fs::metadata(path)
        .map_err(|e| PacchettoError::io(path, e))?
        .permissions()
        .mode();
    Ok(options.unix_permissions(mode & 0o777))
}

#[cfg(not(unix))]
fn with_permissions(options: SimpleFileOptions, _path: &Path) -> Result<SimpleFileOptions> {
    Ok(options)
}
