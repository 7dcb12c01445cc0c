//! Error taxonomy for route loading.
//!
//! Only malformed *definitions* produce errors. A request that matches no
//! route is an ordinary `None` from the matcher and never reaches this module.

use std::path::PathBuf;
use thiserror::Error;

/// What was wrong with a single DSL line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The first token is not a supported HTTP method or `*`
    #[error("unknown method token `{0}`")]
    UnknownMethod(String),
    /// Nothing follows the method (and optional host)
    #[error("missing path pattern")]
    MissingPath,
    /// Path patterns are absolute
    #[error("path pattern `{0}` must start with `/`")]
    RelativePath(String),
    /// Path is not followed by an action identifier
    #[error("missing action identifier")]
    MissingAction,
    /// A `{`, `[`, `(` or quote was opened and never closed
    #[error("unterminated `{open}` group")]
    Unterminated {
        /// The opening character
        open: char,
    },
    /// A `{<regex>name}` segment carries a regex the engine rejects
    #[error("invalid regex for parameter `{name}`: {message}")]
    InvalidRegex {
        /// Parameter the regex belongs to
        name: String,
        /// Compiler diagnostic
        message: String,
    },
    /// Parameter names must be identifiers
    #[error("invalid parameter name `{0}`")]
    InvalidParamName(String),
    /// The same dynamic name appears twice in one path
    #[error("duplicate dynamic segment `{0}`")]
    DuplicateParam(String),
    /// `*name` is only allowed as the final segment
    #[error("wildcard segment `*{0}` must be the last segment")]
    MisplacedWildcard(String),
    /// A bracketed query constraint could not be read
    #[error("malformed query constraint `{0}`")]
    InvalidConstraint(String),
    /// An `(name:'literal')` binding could not be read
    #[error("malformed action argument `{0}`")]
    InvalidArgument(String),
    /// Only one `[...]` group is allowed per line
    #[error("more than one query constraint group")]
    DuplicateConstraintGroup,
    /// Input left over after a complete rule
    #[error("unexpected trailing input `{0}`")]
    TrailingInput(String),
}

/// A [`ParseErrorKind`] tagged with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{source_name}:{line}: {kind}")]
pub struct ParseError {
    /// Logical source name (usually a file path)
    pub source_name: String,
    /// 1-based line number inside the source
    pub line: usize,
    /// The actual problem
    pub kind: ParseErrorKind,
}

/// A route load that did not produce a table.
///
/// Loads are all-or-nothing: when this is returned no table was published and
/// whatever table was active before stays active.
#[derive(Debug, Error)]
pub enum LoadError {
    /// One or more lines failed to parse or compile
    #[error("route load aborted with {} error(s): {}", .0.len(), summarize(.0))]
    Aborted(Vec<ParseError>),
    /// A route file could not be read
    #[error("failed to read route source `{}`", .path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// A file-name pattern matched no files
    #[error("route pattern `{}` matched no files", .pattern.display())]
    NoMatch {
        /// The pattern as given
        pattern: PathBuf,
    },
}

impl LoadError {
    /// Parse errors carried by an aborted load (empty for file failures).
    #[must_use]
    pub fn parse_errors(&self) -> &[ParseError] {
        match self {
            LoadError::Aborted(errors) => errors,
            LoadError::Io { .. } | LoadError::NoMatch { .. } => &[],
        }
    }
}

fn summarize(errors: &[ParseError]) -> String {
    match errors {
        [] => String::new(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}
