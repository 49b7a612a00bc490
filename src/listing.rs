use crate::config::Conventions;
use crate::error::ListingError;
use memchr::memmem;

/// A validated listing extracted from one delimited block of source text.
///
/// A block is the inclusive span from a `BEGIN LISTING <name>` statement
/// through the next `END LISTING` statement. Parsing either yields a
/// `(name, content)` pair or a [`ListingError`] naming the exact rule
/// that failed; malformed input is never silently accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    name: String,
    content: String,
}

impl Listing {
    /// Parses and validates one raw block string.
    ///
    /// The first line must consist of exactly three whitespace-separated
    /// tokens, the begin keyword followed by the name. The last line must
    /// end with the end keyword; a prefix such as a comment marker is
    /// allowed. The content is everything in between, with fully-blank
    /// lines stripped from the front and back, and must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns the [`ListingError`] variant for the first rule violated,
    /// checked in order: empty input, begin line, end line, content.
    pub fn parse(block: &str, conventions: &Conventions) -> Result<Self, ListingError> {
        if block.is_empty() {
            return Err(ListingError::EmptyInput);
        }

        let lines: Vec<&str> = block.lines().collect();

        let begin_line = lines[0].trim();
        let keywords: Vec<&str> = begin_line.split_whitespace().collect();
        if keywords.len() != 3 || !begin_line.starts_with(conventions.begin_keyword()) {
            return Err(ListingError::MalformedBeginLine {
                line: begin_line.to_string(),
                expected: conventions.begin_keyword().to_string(),
            });
        }

        let end_line = lines[lines.len() - 1].trim();
        if !end_line.ends_with(conventions.end_keyword()) {
            return Err(ListingError::MalformedEndLine {
                line: end_line.to_string(),
                expected: conventions.end_keyword().to_string(),
            });
        }

        let content = extract_content(&lines);
        if content.is_empty() {
            return Err(ListingError::EmptyContent);
        }

        Ok(Self {
            name: keywords[2].to_string(),
            content,
        })
    }

    /// The listing name, the third token of the begin statement.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The listing content, with surrounding blank lines stripped.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Joins the lines between the two statement lines, dropping fully-blank
/// lines at the front and back. Interior blank lines and indentation are
/// preserved verbatim.
fn extract_content(lines: &[&str]) -> String {
    if lines.len() < 2 {
        return String::new();
    }
    let mut candidates = &lines[1..lines.len() - 1];
    while let [first, rest @ ..] = candidates {
        if !first.trim().is_empty() {
            break;
        }
        candidates = rest;
    }
    while let [rest @ .., last] = candidates {
        if !last.trim().is_empty() {
            break;
        }
        candidates = rest;
    }
    candidates.join("\n")
}

/// Finds every delimited block in `text`, in order of appearance.
///
/// Each block runs from an occurrence of the begin keyword through the
/// nearest subsequent occurrence of the end keyword, inclusive. Matches
/// are sequential and non-overlapping; a begin keyword with no subsequent
/// end keyword is ignored.
pub(crate) fn find_blocks<'a>(text: &'a str, conventions: &Conventions) -> Vec<&'a str> {
    let begin = memmem::Finder::new(conventions.begin_keyword());
    let end = memmem::Finder::new(conventions.end_keyword());
    let bytes = text.as_bytes();

    let mut blocks = Vec::new();
    let mut cursor = 0;
    while let Some(offset) = begin.find(&bytes[cursor..]) {
        let start = cursor + offset;
        let search_from = start + conventions.begin_keyword().len();
        let Some(end_offset) = end.find(&bytes[search_from..]) else {
            break;
        };
        let stop = search_from + end_offset + conventions.end_keyword().len();
        blocks.push(&text[start..stop]);
        cursor = stop;
    }
    blocks
}
