use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Recursive directory walker for the scan root.
///
/// Two walks are offered: one yielding every regular file (the extraction
/// pass) and one yielding every directory with a given base name (the
/// clear pass). Entries are visited in sorted order so runs are
/// deterministic. Listing directories are ordinary directories to the
/// scanner; their contents show up in the file walk like anything else.
pub(crate) struct Scanner {
    root_dir: PathBuf,
}

impl Scanner {
    pub(crate) fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Collects every regular file under the root, sorted by path.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be read mid-walk.
    pub(crate) fn source_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in self.walk() {
            let entry = entry.map_err(|e| walk_error(&self.root_dir, e))?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        debug!("Found {} file(s) under {}", files.len(), self.root_dir.display());
        Ok(files)
    }

    /// Collects every directory under the root whose base name equals
    /// `name`, sorted by path. The walk completes before the caller
    /// starts deleting, so removals never race the traversal.
    pub(crate) fn directories_named(&self, name: &str) -> Result<Vec<PathBuf>> {
        let mut directories = Vec::new();
        for entry in self.walk() {
            let entry = entry.map_err(|e| walk_error(&self.root_dir, e))?;
            if entry.file_type().is_dir()
                && entry.path() != self.root_dir
                && entry.file_name() == name
            {
                directories.push(entry.into_path());
            }
        }
        debug!(
            "Found {} '{}' directory(ies) under {}",
            directories.len(),
            name,
            self.root_dir.display()
        );
        Ok(directories)
    }

    fn walk(&self) -> walkdir::IntoIter {
        WalkDir::new(&self.root_dir)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
    }
}

fn walk_error(root: &Path, source: walkdir::Error) -> Error {
    let path = source
        .path()
        .map_or_else(|| root.to_path_buf(), Path::to_path_buf);
    match source.into_io_error() {
        Some(io) => Error::io(path, io),
        None => Error::io(path, std::io::Error::other("filesystem loop detected")),
    }
}
