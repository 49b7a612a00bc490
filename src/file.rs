use crate::config::Conventions;
use crate::error::{Error, Result};
use crate::listing::{Listing, find_blocks};
use crate::reporter::ActionReporter;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

const SNIFF_SIZE: usize = 8192;

/// Determines whether a file looks like UTF-8 text.
///
/// Reads up to the first 8 KiB and attempts to decode it. An unreadable
/// file or a decode failure means "not text" rather than an error; the
/// caller skips such files. A decode error caused only by a multi-byte
/// sequence cut off at the sniff boundary still counts as text.
pub(crate) fn is_utf8_text(path: &Path) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    let mut sample = Vec::with_capacity(SNIFF_SIZE);
    let Ok(bytes_read) = file.take(SNIFF_SIZE as u64).read_to_end(&mut sample) else {
        return false;
    };
    match std::str::from_utf8(&sample) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none() && bytes_read == SNIFF_SIZE,
    }
}

/// Extracts every valid listing from one source file and writes each one
/// to its own generated file under the source directory's listing
/// directory.
pub(crate) struct FileExtractor<'a> {
    source_path: &'a Path,
    listing_directory: PathBuf,
    conventions: &'a Conventions,
}

impl<'a> FileExtractor<'a> {
    pub(crate) fn new(source_path: &'a Path, conventions: &'a Conventions) -> Self {
        let parent = source_path.parent().unwrap_or_else(|| Path::new("."));
        Self {
            source_path,
            listing_directory: parent.join(conventions.directory_name()),
            conventions,
        }
    }

    /// Extracts all listings declared in the source file.
    ///
    /// Files that are not UTF-8 text, and files without any complete
    /// begin/end pair, yield zero listings and no side effects. Otherwise
    /// every block is parsed up front; a single malformed block fails the
    /// whole file with the source path attached, before anything from
    /// this file is written.
    ///
    /// Returns the number of listings written.
    ///
    /// # Errors
    ///
    /// Returns an error if a block fails validation or a filesystem
    /// operation fails.
    pub(crate) fn extract(&self, reporter: &mut dyn ActionReporter) -> Result<usize> {
        if !is_utf8_text(self.source_path) {
            trace!("Skipping non-text file: {}", self.source_path.display());
            return Ok(0);
        }

        let source = match fs::read_to_string(self.source_path) {
            Ok(source) => source,
            // Non-UTF-8 bytes past the sniffed prefix: same skip as above.
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                trace!("Skipping non-text file: {}", self.source_path.display());
                return Ok(0);
            }
            Err(e) => return Err(Error::io(self.source_path, e)),
        };

        let blocks = find_blocks(&source, self.conventions);
        if blocks.is_empty() {
            return Ok(0);
        }

        let listings = blocks
            .into_iter()
            .map(|block| {
                Listing::parse(block, self.conventions)
                    .map_err(|e| Error::listing(self.source_path, e))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Extracted {} listing(s) from {}",
            listings.len(),
            self.source_path.display()
        );
        reporter.notify_extracted(self.source_path, listings.len());

        self.create_directory_if_absent(reporter)?;
        for listing in &listings {
            self.write_listing_file(listing, reporter)?;
        }
        Ok(listings.len())
    }

    fn create_directory_if_absent(&self, reporter: &mut dyn ActionReporter) -> Result<()> {
        match fs::create_dir(&self.listing_directory) {
            Ok(()) => {
                reporter.notify_directory_created(&self.listing_directory);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(Error::io(&self.listing_directory, e)),
        }
    }

    /// Writes (or fully overwrites) one generated listing file. Duplicate
    /// names resolve to the same path, so the last listing written wins.
    fn write_listing_file(
        &self,
        listing: &Listing,
        reporter: &mut dyn ActionReporter,
    ) -> Result<()> {
        let file_name = format!("{}{}", listing.name(), self.conventions.file_extension());
        let write_path = self.listing_directory.join(file_name);
        fs::write(&write_path, listing.content()).map_err(|e| Error::io(&write_path, e))?;
        reporter.notify_file_written(&write_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::NullReporter;
    use assert_fs::prelude::*;

    fn extract(path: &Path) -> Result<usize> {
        let conventions = Conventions::default();
        FileExtractor::new(path, &conventions).extract(&mut NullReporter)
    }

    #[test]
    fn test_is_utf8_text_plain_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("plain.txt");
        file.write_str("Hello, wörld!").unwrap();

        assert!(is_utf8_text(file.path()));
    }

    #[test]
    fn test_is_utf8_text_binary_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("blob.bin");
        file.write_binary(&[0xff, 0xfe, 0x00, 0x41]).unwrap();

        assert!(!is_utf8_text(file.path()));
    }

    #[test]
    fn test_is_utf8_text_empty_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("empty.txt");
        file.touch().unwrap();

        assert!(is_utf8_text(file.path()));
    }

    #[test]
    fn test_is_utf8_text_missing_file() {
        assert!(!is_utf8_text(Path::new("/no/such/file")));
    }

    #[test]
    fn test_is_utf8_text_multibyte_cut_at_sniff_boundary() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("long.txt");
        let mut bytes = vec![b'a'; SNIFF_SIZE - 1];
        bytes.extend_from_slice("é".as_bytes()); // straddles the boundary
        file.write_binary(&bytes).unwrap();

        assert!(is_utf8_text(file.path()));
    }

    #[test]
    fn test_extract_writes_listing_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let source = temp.child("script.py");
        source
            .write_str("# BEGIN LISTING import\nimport os\n# END LISTING\n")
            .unwrap();

        let written = extract(source.path()).unwrap();

        assert_eq!(written, 1);
        temp.child("listings/import.listing")
            .assert("import os");
    }

    #[test]
    fn test_extract_multiple_listings() {
        let temp = assert_fs::TempDir::new().unwrap();
        let source = temp.child("doc.md");
        source
            .write_str(
                "text\nBEGIN LISTING one\nfirst\nEND LISTING\n\
                 more text\nBEGIN LISTING two\nsecond\nEND LISTING\n",
            )
            .unwrap();

        let written = extract(source.path()).unwrap();

        assert_eq!(written, 2);
        temp.child("listings/one.listing").assert("first");
        temp.child("listings/two.listing").assert("second");
    }

    #[test]
    fn test_extract_overwrites_existing_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let source = temp.child("script.py");
        source
            .write_str("BEGIN LISTING import\nimport sys\nEND LISTING\n")
            .unwrap();
        temp.child("listings/import.listing")
            .write_str("stale content")
            .unwrap();

        extract(source.path()).unwrap();

        temp.child("listings/import.listing").assert("import sys");
    }

    #[test]
    fn test_extract_duplicate_names_last_wins() {
        let temp = assert_fs::TempDir::new().unwrap();
        let source = temp.child("script.py");
        source
            .write_str(
                "BEGIN LISTING same\nfirst\nEND LISTING\n\
                 BEGIN LISTING same\nsecond\nEND LISTING\n",
            )
            .unwrap();

        let written = extract(source.path()).unwrap();

        assert_eq!(written, 2);
        temp.child("listings/same.listing").assert("second");
    }

    #[test]
    fn test_extract_no_markers() {
        let temp = assert_fs::TempDir::new().unwrap();
        let source = temp.child("plain.txt");
        source.write_str("nothing declared here\n").unwrap();

        assert_eq!(extract(source.path()).unwrap(), 0);
        assert!(!temp.child("listings").path().exists());
    }

    #[test]
    fn test_extract_skips_binary_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let source = temp.child("blob.bin");
        let mut bytes = b"BEGIN LISTING x\ny\nEND LISTING".to_vec();
        bytes.push(0xff);
        bytes.push(0xfe);
        source.write_binary(&bytes).unwrap();

        assert_eq!(extract(source.path()).unwrap(), 0);
        assert!(!temp.child("listings").path().exists());
    }

    #[test]
    fn test_extract_malformed_block_names_source_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let source = temp.child("broken.py");
        source
            .write_str("BEGIN LISTING one two\ncontent\nEND LISTING\n")
            .unwrap();

        let err = extract(source.path()).unwrap_err();

        assert!(err.is_listing());
        assert!(err.to_string().contains("broken.py"));
        assert!(err.to_string().contains("BEGIN LISTING one two"));
    }

    #[test]
    fn test_extract_malformed_block_writes_nothing_for_that_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let source = temp.child("broken.py");
        source
            .write_str(
                "BEGIN LISTING good\nfine\nEND LISTING\n\
                 BEGIN LISTING bad extra token\nnope\nEND LISTING\n",
            )
            .unwrap();

        assert!(extract(source.path()).is_err());
        assert!(!temp.child("listings").path().exists());
    }
}
