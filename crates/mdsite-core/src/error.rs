use thiserror::Error as ThisError;

/// Error kinds for categorizing conversion errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A delimiter pass found an opening delimiter with no closing pair
    UnbalancedDelimiter,
    /// Neither frontmatter nor a level-1 heading supplied a title
    TitleNotFound,
    /// An inline span had no element mapping
    UnsupportedSpanKind,
}

/// Errors surfaced by the conversion pipeline.
///
/// Every variant is a hard failure: the pipeline is deterministic, so the
/// caller gets the error instead of partial output.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// An odd number of `delimiter` occurrences in `text`.
    #[error("unbalanced delimiter `{delimiter}` in {text:?}")]
    UnbalancedDelimiter {
        /// The literal delimiter of the pass that failed.
        delimiter: String,
        /// The plain text the pass was splitting.
        text: String,
    },

    #[error("no title found: expected a `title:` frontmatter key or a `# ` heading")]
    TitleNotFound,

    #[error("unsupported inline span kind: {0}")]
    UnsupportedSpanKind(String),
}

impl Error {
    /// Create an error for a delimiter with no closing pair.
    pub fn unbalanced(delimiter: &str, text: &str) -> Self {
        Self::UnbalancedDelimiter {
            delimiter: delimiter.to_string(),
            text: text.to_string(),
        }
    }

    /// Get the error category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnbalancedDelimiter { .. } => ErrorKind::UnbalancedDelimiter,
            Self::TitleNotFound => ErrorKind::TitleNotFound,
            Self::UnsupportedSpanKind(_) => ErrorKind::UnsupportedSpanKind,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
