//! # listloc
//!
//! Extract and manage code listings declared in text-based source files.
//!
//! A listing is the text between a `BEGIN LISTING <name>` statement and
//! the next `END LISTING` statement. Extraction walks a directory tree,
//! finds every declared listing in its UTF-8 text files, and writes each
//! one to `<source dir>/listings/<name>.listing`, overwriting on every
//! run so the generated files track the source of truth. Clearing
//! deletes the generated files again, removing a `listings/` directory
//! outright when nothing else lives in it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use listloc::{Config, NullReporter, Pipeline};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::builder().root_dir("./my_project").build();
//! let stats = Pipeline::new(config)?.extract(&mut NullReporter)?;
//! println!("wrote {} listings", stats.listings_extracted);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! 1. **Scanner**: deterministic recursive walk of the tree
//! 2. **Listing**: grammar validation of one delimited block
//! 3. **FileExtractor**: per-file block discovery and output writing
//! 4. **Cleaner**: removal of generated files and emptied directories
//!
//! Progress is reported through the [`ActionReporter`] trait; the
//! bundled [`ConsoleReporter`] prints per-action lines and a summary,
//! while [`NullReporter`] discards everything.

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

mod cleaner;
mod config;
mod error;
mod file;
mod listing;
mod pipeline;
mod reporter;
mod scanner;

pub use cleaner::ClearStats;
pub use config::{Config, ConfigBuilder, Conventions};
pub use error::{Error, ListingError, Result};
pub use listing::Listing;
pub use pipeline::{ExtractStats, Pipeline};
pub use reporter::{ActionReporter, ConsoleReporter, NullReporter};

/// Extracts every declared listing under the configured root.
///
/// Convenience wrapper over [`Pipeline::new`] followed by
/// [`Pipeline::extract`].
///
/// # Errors
///
/// Returns an error if the root is not a directory, a listing block is
/// malformed, or a filesystem operation fails.
pub fn extract(config: Config, reporter: &mut dyn ActionReporter) -> Result<ExtractStats> {
    Pipeline::new(config)?.extract(reporter)
}

/// Deletes every generated listing file under the configured root.
///
/// Convenience wrapper over [`Pipeline::new`] followed by
/// [`Pipeline::clear`].
///
/// # Errors
///
/// Returns an error if the root is not a directory or a filesystem
/// operation fails.
pub fn clear(config: Config, reporter: &mut dyn ActionReporter) -> Result<ClearStats> {
    Pipeline::new(config)?.clear(reporter)
}
