use crate::config::Conventions;
use crate::error::{Error, Result};
use crate::reporter::ActionReporter;
use crate::scanner::Scanner;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Counts of what a clear pass removed.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ClearStats {
    /// Generated listing files deleted, including those inside removed
    /// listing directories
    pub files_deleted: usize,

    /// Listing directories removed whole
    pub directories_removed: usize,
}

impl ClearStats {
    /// Returns true if the pass deleted anything at all.
    #[must_use]
    pub const fn cleared_anything(&self) -> bool {
        self.files_deleted > 0 || self.directories_removed > 0
    }
}

/// Deletes generated listing files and the listing directories that hold
/// them, leaving everything else in place.
///
/// Only files whose name carries the listing extension are ever deleted,
/// and only directories with the listing directory name are ever removed.
/// Foreign files or subdirectories inside a listing directory survive and
/// keep their directory alive; they never block deletion of sibling
/// listing files.
pub(crate) struct Cleaner<'a> {
    root_dir: &'a Path,
    conventions: &'a Conventions,
}

impl<'a> Cleaner<'a> {
    pub(crate) fn new(root_dir: &'a Path, conventions: &'a Conventions) -> Self {
        Self {
            root_dir,
            conventions,
        }
    }

    /// Runs the clear pass over the whole tree.
    ///
    /// All listing directories are collected up front, then each is
    /// cleared independently.
    ///
    /// # Errors
    ///
    /// Returns an error if the walk or a deletion fails.
    pub(crate) fn clear(&self, reporter: &mut dyn ActionReporter) -> Result<ClearStats> {
        let directories = Scanner::new(self.root_dir)
            .directories_named(self.conventions.directory_name())?;

        let mut stats = ClearStats::default();
        for directory in &directories {
            self.clear_directory(directory, reporter, &mut stats)?;
        }
        debug!(
            "Clear pass removed {} file(s) and {} directory(ies)",
            stats.files_deleted, stats.directories_removed
        );
        Ok(stats)
    }

    /// Clears one listing directory.
    ///
    /// When every direct child is a listing file the directory goes in a
    /// single `remove_dir_all` call; an empty directory counts. The
    /// contained listing files are still reported deleted one by one so
    /// the reporter's totals cover them. Otherwise only the listing
    /// files are deleted, each reported as it goes.
    fn clear_directory(
        &self,
        directory: &Path,
        reporter: &mut dyn ActionReporter,
        stats: &mut ClearStats,
    ) -> Result<()> {
        let (listing_files, foreign_children) = self.partition_children(directory)?;

        if foreign_children == 0 {
            fs::remove_dir_all(directory).map_err(|e| Error::io(directory, e))?;
            for file in &listing_files {
                reporter.notify_file_deleted(file);
            }
            reporter.notify_directory_removed(directory);
            stats.directories_removed += 1;
            stats.files_deleted += listing_files.len();
        } else {
            for file in &listing_files {
                fs::remove_file(file).map_err(|e| Error::io(file, e))?;
                reporter.notify_file_deleted(file);
                stats.files_deleted += 1;
            }
        }
        Ok(())
    }

    /// Splits a listing directory's direct children into listing files
    /// and everything else. Subdirectories and files with other names
    /// (including non-UTF-8 names) count as foreign.
    fn partition_children(&self, directory: &Path) -> Result<(Vec<PathBuf>, usize)> {
        let mut listing_files = Vec::new();
        let mut foreign_children = 0;

        for entry in fs::read_dir(directory).map_err(|e| Error::io(directory, e))? {
            let entry = entry.map_err(|e| Error::io(directory, e))?;
            let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
            let name = entry.file_name();
            let is_listing_file = file_type.is_file()
                && name
                    .to_str()
                    .is_some_and(|n| self.conventions.is_listing_file_name(n));
            if is_listing_file {
                listing_files.push(entry.path());
            } else {
                foreign_children += 1;
            }
        }

        listing_files.sort();
        Ok((listing_files, foreign_children))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::NullReporter;
    use assert_fs::prelude::*;

    fn clear(root: &Path) -> ClearStats {
        let conventions = Conventions::default();
        Cleaner::new(root, &conventions)
            .clear(&mut NullReporter)
            .unwrap()
    }

    #[derive(Debug, Default)]
    struct RecordingReporter {
        deleted_files: Vec<PathBuf>,
        removed_directories: Vec<PathBuf>,
    }

    impl ActionReporter for RecordingReporter {
        fn notify_extracted(&mut self, _path: &Path, _count: usize) {}
        fn notify_file_written(&mut self, _path: &Path) {}
        fn notify_directory_created(&mut self, _path: &Path) {}
        fn notify_file_deleted(&mut self, path: &Path) {
            self.deleted_files.push(path.to_path_buf());
        }
        fn notify_directory_removed(&mut self, path: &Path) {
            self.removed_directories.push(path.to_path_buf());
        }
    }

    #[test]
    fn test_clear_removes_pure_listing_directory_whole() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("src/main.py").write_str("x").unwrap();
        temp.child("src/listings/a.listing").write_str("a").unwrap();
        temp.child("src/listings/b.listing").write_str("b").unwrap();

        let stats = clear(temp.path());

        assert_eq!(stats.directories_removed, 1);
        assert_eq!(stats.files_deleted, 2);
        assert!(!temp.child("src/listings").path().exists());
        assert!(temp.child("src/main.py").path().exists());
    }

    #[test]
    fn test_whole_directory_removal_reports_contained_files() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("listings/a.listing").write_str("a").unwrap();
        temp.child("listings/b.listing").write_str("b").unwrap();

        let conventions = Conventions::default();
        let mut reporter = RecordingReporter::default();
        Cleaner::new(temp.path(), &conventions)
            .clear(&mut reporter)
            .unwrap();

        assert_eq!(reporter.deleted_files.len(), 2);
        assert_eq!(reporter.removed_directories.len(), 1);
        assert!(
            reporter
                .deleted_files
                .iter()
                .all(|p| p.extension().is_some_and(|e| e == "listing"))
        );
    }

    #[test]
    fn test_clear_removes_empty_listing_directory() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("listings").create_dir_all().unwrap();

        let stats = clear(temp.path());

        assert_eq!(stats.directories_removed, 1);
        assert_eq!(stats.files_deleted, 0);
        assert!(stats.cleared_anything());
        assert!(!temp.child("listings").path().exists());
    }

    #[test]
    fn test_clear_keeps_foreign_file_and_directory() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("listings/keep.txt").write_str("keep").unwrap();
        temp.child("listings/gone.listing").write_str("gone").unwrap();
        temp.child("listings/subdir").create_dir_all().unwrap();

        let stats = clear(temp.path());

        assert_eq!(stats.directories_removed, 0);
        assert_eq!(stats.files_deleted, 1);
        assert!(temp.child("listings/keep.txt").path().exists());
        assert!(temp.child("listings/subdir").path().exists());
        assert!(!temp.child("listings/gone.listing").path().exists());
    }

    #[test]
    fn test_clear_ignores_other_directories() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("output/result.listing").write_str("x").unwrap();
        temp.child("docs/readme.md").write_str("y").unwrap();

        let stats = clear(temp.path());

        assert!(!stats.cleared_anything());
        assert!(temp.child("output/result.listing").path().exists());
    }

    #[test]
    fn test_clear_nothing_to_clear() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("plain.txt").write_str("nothing").unwrap();

        let stats = clear(temp.path());

        assert!(!stats.cleared_anything());
    }

    #[test]
    fn test_clear_multiple_listing_directories() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a/listings/x.listing").write_str("x").unwrap();
        temp.child("b/listings/y.listing").write_str("y").unwrap();
        temp.child("b/listings/note.md").write_str("note").unwrap();

        let stats = clear(temp.path());

        assert_eq!(stats.directories_removed, 1);
        assert_eq!(stats.files_deleted, 2);
        assert!(!temp.child("a/listings").path().exists());
        assert!(temp.child("b/listings/note.md").path().exists());
    }
}
