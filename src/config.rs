use crate::error::{Error, Result};
use std::path::PathBuf;

const DEFAULT_BEGIN_KEYWORD: &str = "BEGIN LISTING";
const DEFAULT_END_KEYWORD: &str = "END LISTING";
const DEFAULT_DIRECTORY_NAME: &str = "listings";
const DEFAULT_FILE_EXTENSION: &str = ".listing";

/// The fixed naming conventions threaded through every component.
///
/// Covers the begin/end statement keywords, the name of the directory
/// that holds generated files, and the generated file extension. A single
/// immutable value of this type is carried inside [`Config`] so the
/// parser, extractor and cleaner all agree on the same markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conventions {
    begin_keyword: String,
    end_keyword: String,
    directory_name: String,
    file_extension: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            begin_keyword: DEFAULT_BEGIN_KEYWORD.to_string(),
            end_keyword: DEFAULT_END_KEYWORD.to_string(),
            directory_name: DEFAULT_DIRECTORY_NAME.to_string(),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
        }
    }
}

impl Conventions {
    /// Creates conventions with custom keywords and naming.
    #[must_use]
    pub fn new(
        begin_keyword: impl Into<String>,
        end_keyword: impl Into<String>,
        directory_name: impl Into<String>,
        file_extension: impl Into<String>,
    ) -> Self {
        Self {
            begin_keyword: begin_keyword.into(),
            end_keyword: end_keyword.into(),
            directory_name: directory_name.into(),
            file_extension: file_extension.into(),
        }
    }

    /// The begin statement keyword, e.g. `BEGIN LISTING`.
    #[must_use]
    pub fn begin_keyword(&self) -> &str {
        &self.begin_keyword
    }

    /// The end statement keyword, e.g. `END LISTING`.
    #[must_use]
    pub fn end_keyword(&self) -> &str {
        &self.end_keyword
    }

    /// Name of the directory generated files are placed in, e.g. `listings`.
    #[must_use]
    pub fn directory_name(&self) -> &str {
        &self.directory_name
    }

    /// Extension of generated files, including the leading dot, e.g. `.listing`.
    #[must_use]
    pub fn file_extension(&self) -> &str {
        &self.file_extension
    }

    /// Returns true if `file_name` names a generated listing file.
    #[must_use]
    pub fn is_listing_file_name(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.file_extension)
    }
}

/// Configuration for a listloc run.
///
/// Use [`Config::builder()`] to construct a new configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Root directory to scan for source files
    pub root_dir: PathBuf,

    /// Run a full clear pass before extracting
    pub prune: bool,

    /// Marker keywords and generated-file naming
    pub conventions: Conventions,
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use listloc::Config;
    ///
    /// let config = Config::builder()
    ///     .root_dir(".")
    ///     .prune(true)
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotADirectory`] if the root path does not exist
    /// or is not a directory.
    pub fn validate(&self) -> Result<()> {
        if !self.root_dir.is_dir() {
            return Err(Error::not_a_directory(&self.root_dir));
        }
        Ok(())
    }
}

/// Builder for [`Config`].
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    root_dir: Option<PathBuf>,
    prune: bool,
    conventions: Option<Conventions>,
}

impl ConfigBuilder {
    /// Sets the root directory to scan. Defaults to the current directory.
    #[must_use]
    pub fn root_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.root_dir = Some(path.into());
        self
    }

    /// Enables or disables the clear pass before extraction.
    #[must_use]
    pub fn prune(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }

    /// Overrides the default marker and naming conventions.
    #[must_use]
    pub fn conventions(mut self, conventions: Conventions) -> Self {
        self.conventions = Some(conventions);
        self
    }

    /// Builds the configuration.
    ///
    /// Existence of the root directory is checked later by
    /// [`Config::validate`], not here, so a config can be built before
    /// the directory is created.
    #[must_use]
    pub fn build(self) -> Config {
        Config {
            root_dir: self.root_dir.unwrap_or_else(|| PathBuf::from(".")),
            prune: self.prune,
            conventions: self.conventions.unwrap_or_default(),
        }
    }
}
