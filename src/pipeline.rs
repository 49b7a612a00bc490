use crate::{
    cleaner::{Cleaner, ClearStats},
    config::Config,
    error::Result,
    file::FileExtractor,
    reporter::ActionReporter,
    scanner::Scanner,
};
use serde::Serialize;
use tracing::{info, instrument};

/// Statistics collected during an extraction run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ExtractStats {
    /// Total number of files visited by the scan
    pub files_scanned: usize,

    /// Source files that declared at least one listing
    pub files_with_listings: usize,

    /// Generated listing files written
    pub listings_extracted: usize,

    /// Result of the clear pass, when prune mode ran one
    pub pruned: Option<ClearStats>,
}

impl ExtractStats {
    /// Returns true if any listing was written.
    #[must_use]
    pub const fn extracted_anything(&self) -> bool {
        self.listings_extracted > 0
    }
}

/// Drives the two tree passes: clearing stale extractions and extracting
/// declared listings.
///
/// The passes are independent walks on purpose; `clear` stays safe to
/// invoke on its own, and prune mode is just the one run after the other.
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    /// Creates a pipeline with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured root is not a directory.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Extracts every declared listing under the root.
    ///
    /// With `config.prune` set, a full clear pass runs first so stale
    /// generated files never coexist with freshly regenerated ones and a
    /// renamed listing leaves no orphan behind.
    ///
    /// # Errors
    ///
    /// Any validation or filesystem error is fatal to the run; files
    /// already processed keep their generated output.
    #[instrument(skip_all, fields(root_dir = %self.config.root_dir.display()))]
    pub fn extract(&self, reporter: &mut dyn ActionReporter) -> Result<ExtractStats> {
        let mut stats = ExtractStats::default();

        if self.config.prune {
            info!("Prune mode: clearing stale extractions first");
            stats.pruned = Some(self.run_clear(reporter)?);
        }

        let files = Scanner::new(&self.config.root_dir).source_files()?;
        stats.files_scanned = files.len();

        for path in &files {
            let extractor = FileExtractor::new(path, &self.config.conventions);
            let written = extractor.extract(reporter)?;
            if written > 0 {
                stats.files_with_listings += 1;
                stats.listings_extracted += written;
            }
        }

        info!(
            "Extracted {} listing(s) from {} of {} file(s)",
            stats.listings_extracted, stats.files_with_listings, stats.files_scanned
        );
        Ok(stats)
    }

    /// Deletes all generated listing files and the listing directories
    /// that held nothing else.
    ///
    /// # Errors
    ///
    /// Returns an error if the walk or a deletion fails.
    #[instrument(skip_all, fields(root_dir = %self.config.root_dir.display()))]
    pub fn clear(&self, reporter: &mut dyn ActionReporter) -> Result<ClearStats> {
        self.run_clear(reporter)
    }

    fn run_clear(&self, reporter: &mut dyn ActionReporter) -> Result<ClearStats> {
        Cleaner::new(&self.config.root_dir, &self.config.conventions).clear(reporter)
    }
}
