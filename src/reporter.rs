use crate::config::Conventions;
use std::path::{Path, PathBuf};

/// Receives notifications as the extractor and cleaner touch the
/// filesystem.
///
/// The core calls these synchronously at the point each action occurs
/// and makes no assumptions about presentation; implementations own all
/// formatting and verbosity decisions.
pub trait ActionReporter {
    /// Called once per source file that yielded listings, with the count.
    fn notify_extracted(&mut self, path: &Path, count: usize);

    /// Called after a generated listing file is written or overwritten.
    fn notify_file_written(&mut self, path: &Path);

    /// Called after a listing directory is created.
    fn notify_directory_created(&mut self, path: &Path);

    /// Called after a generated listing file is deleted.
    fn notify_file_deleted(&mut self, path: &Path);

    /// Called after a listing directory is removed whole.
    fn notify_directory_removed(&mut self, path: &Path);
}

/// Reporter that discards every notification. Useful for library callers
/// and tests that do not care about progress output.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl ActionReporter for NullReporter {
    fn notify_extracted(&mut self, _path: &Path, _count: usize) {}
    fn notify_file_written(&mut self, _path: &Path) {}
    fn notify_directory_created(&mut self, _path: &Path) {}
    fn notify_file_deleted(&mut self, _path: &Path) {}
    fn notify_directory_removed(&mut self, _path: &Path) {}
}

/// Tally of notified paths, split by whether they name listing files.
#[derive(Debug, Default)]
struct PathTally {
    paths: usize,
    listing_files: usize,
}

impl PathTally {
    fn record(&mut self, path: &Path, conventions: &Conventions) {
        self.paths += 1;
        let is_listing = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| conventions.is_listing_file_name(n));
        if is_listing {
            self.listing_files += 1;
        }
    }
}

/// Reporter that prints actions to stdout.
///
/// In verbose mode every action gets its own line; otherwise only the
/// end-of-run summary is printed. Paths are shown relative to the
/// scanned root where possible.
#[derive(Debug)]
pub struct ConsoleReporter {
    root_dir: PathBuf,
    verbose: bool,
    conventions: Conventions,
    extracted_files: usize,
    created: PathTally,
    deleted: PathTally,
}

impl ConsoleReporter {
    /// Creates a reporter for a run rooted at `root_dir`.
    #[must_use]
    pub fn new(root_dir: impl Into<PathBuf>, verbose: bool, conventions: Conventions) -> Self {
        Self {
            root_dir: root_dir.into(),
            verbose,
            conventions,
            extracted_files: 0,
            created: PathTally::default(),
            deleted: PathTally::default(),
        }
    }

    /// Prints the extraction summary, or a note that there was nothing
    /// to extract.
    pub fn summarize_extraction(&self) {
        self.summarize(&format!(
            "No listings to extract from '{}'",
            self.root_dir.display()
        ));
    }

    /// Prints the clearing summary, or a note that there was nothing to
    /// clear.
    pub fn summarize_clearing(&self) {
        self.summarize(&format!("Nothing to clear in '{}'", self.root_dir.display()));
    }

    fn summarize(&self, no_actions_message: &str) {
        if self.created.paths == 0 && self.deleted.paths == 0 {
            println!("{no_actions_message}");
            return;
        }
        let deleted = self.deleted.listing_files;
        if deleted > 0 {
            println!(
                "Deleted a total of {deleted} extracted listing{}",
                plural_suffix(deleted)
            );
        }
        let written = self.created.listing_files;
        if written > 0 {
            println!(
                "Extracted a total of {written} listing{} from {} source file{}",
                plural_suffix(written),
                self.extracted_files,
                plural_suffix(self.extracted_files)
            );
        }
    }

    fn print_action(&self, action_keyword: &str, path: &Path) {
        if self.verbose {
            println!("{action_keyword} '{}'", self.display_path(path).display());
        }
    }

    fn display_path(&self, path: &Path) -> PathBuf {
        pathdiff::diff_paths(path, &self.root_dir).unwrap_or_else(|| path.to_path_buf())
    }
}

impl ActionReporter for ConsoleReporter {
    fn notify_extracted(&mut self, path: &Path, count: usize) {
        if count == 0 {
            return;
        }
        self.extracted_files += 1;
        if self.verbose {
            println!(
                "Extracted {count} listing{} from '{}'",
                plural_suffix(count),
                self.display_path(path).display()
            );
        }
    }

    fn notify_file_written(&mut self, path: &Path) {
        self.created.record(path, &self.conventions);
        self.print_action("Wrote", path);
    }

    fn notify_directory_created(&mut self, path: &Path) {
        self.created.record(path, &self.conventions);
        self.print_action("Created", path);
    }

    fn notify_file_deleted(&mut self, path: &Path) {
        self.deleted.record(path, &self.conventions);
        self.print_action("Deleted", path);
    }

    fn notify_directory_removed(&mut self, path: &Path) {
        self.deleted.record(path, &self.conventions);
        self.print_action("Removed", path);
    }
}

fn plural_suffix(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
