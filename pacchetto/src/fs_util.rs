//! Recursive directory copy used by the staging pipeline.

use std::fs;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{PacchettoError, Result};

/// Recursively copy `src` into `dest`, preserving relative structure.
///
/// With no filter every directory and file is copied. With a filter only
/// files it accepts are copied, and directories are created on demand for
/// them; `dest` itself is always created. Stops at the first error.
///
/// Returns the number of files copied.
pub(crate) fn copy_tree(
    src: &Path,
    dest: &Path,
    filter: Option<&dyn Fn(&Path) -> bool>,
) -> Result<usize> {
    fs::create_dir_all(dest).map_err(|e| PacchettoError::io(dest, e))?;

    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            PacchettoError::io(&path, e.into())
        })?;
        let Ok(rel_path) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dest.join(rel_path);

        if entry.file_type().is_dir() {
            if filter.is_none() {
                fs::create_dir_all(&target).map_err(|e| PacchettoError::io(&target, e))?;
            }
            continue;
        }

        if let Some(accept) = filter {
            if !accept(entry.path()) {
                continue;
            }
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| PacchettoError::io(parent, e))?;
            }
        }

        fs::copy(entry.path(), &target).map_err(|e| PacchettoError::io(entry.path(), e))?;
        copied += 1;
    }

    debug!(
        src = %src.display(),
        dest = %dest.display(),
        files = copied,
        "Copied directory tree"
    );
    Ok(copied)
}
