use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the listloc library.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// IO error with context about the file path.
    #[error("IO error accessing '{path}': {message}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// The scan root is missing or is not a directory.
    #[error("Expected a directory path, but got: '{path}'")]
    NotADirectory {
        /// The offending path
        path: PathBuf,
    },

    /// A listing block in a source file failed validation.
    #[error("In file '{path}': {source}")]
    Listing {
        /// Source file containing the malformed block
        path: PathBuf,
        /// The underlying validation failure
        source: ListingError,
    },
}

impl Error {
    /// Creates an IO error with path context.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Creates a not-a-directory error.
    #[must_use]
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory { path: path.into() }
    }

    /// Wraps a validation failure with the source file it came from.
    #[must_use]
    pub fn listing(path: impl Into<PathBuf>, source: ListingError) -> Self {
        Self::Listing {
            path: path.into(),
            source,
        }
    }

    /// Returns true if this is an IO error.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns true if this wraps a listing validation failure.
    #[must_use]
    pub const fn is_listing(&self) -> bool {
        matches!(self, Self::Listing { .. })
    }
}

/// Validation failure for one raw listing block.
///
/// Each variant carries the offending line so diagnostics can quote the
/// exact text that broke the rule. Callers branch on the variant, not on
/// the message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ListingError {
    /// The raw block string was empty.
    #[error("The listing string cannot be empty")]
    EmptyInput,

    /// The begin statement line does not have the `<keyword> <name>` shape.
    #[error(
        "The begin statement '{line}' should be in the format \
         '{expected} <name>' (e.g., '{expected} my_snippet')"
    )]
    MalformedBeginLine {
        /// The trimmed begin line as found
        line: String,
        /// The begin keyword the parser was configured with
        expected: String,
    },

    /// The end statement line does not end with the end keyword.
    #[error("The end statement line '{line}' should end with '{expected}'")]
    MalformedEndLine {
        /// The trimmed end line as found
        line: String,
        /// The end keyword the parser was configured with
        expected: String,
    },

    /// The block contains no content between its statement lines.
    #[error("The listing content cannot be empty")]
    EmptyContent,
}
