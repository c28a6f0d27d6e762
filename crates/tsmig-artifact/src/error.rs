//! Error types for source files and syntax trees
//!
//! - [`ParseError`]: file → tree (ingress)
//! - [`EditError`]: in-place tree mutation
//! - [`WriteError`]: tree → file (egress)

use std::path::PathBuf;

/// Location of the first syntax error found in a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorSite {
    /// 1-based line
    pub line: usize,
    /// 1-based column (in bytes)
    pub column: usize,
    /// What the parser tripped over
    pub detail: String,
}

impl std::fmt::Display for SyntaxErrorSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.detail)
    }
}

/// Errors building a tree from text, independent of any file
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// Grammar could not be loaded into the parser
    #[error("failed to initialize parser: {0}")]
    ParserInit(String),

    /// Parser returned no tree
    #[error("parser produced no syntax tree")]
    NoTree,
}

/// Errors during file parsing (ingress)
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// File extension is not one of the recognized source kinds
    #[error("unsupported source extension for {0}")]
    UnsupportedExtension(PathBuf),

    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Parser could not produce a tree
    #[error("could not parse {path}: {source}")]
    Tree {
        /// File being parsed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: TreeError,
    },

    /// Syntax error in source file
    #[error("syntax error in {path} at {site}")]
    Syntax {
        /// File being parsed
        path: PathBuf,
        /// First error location
        site: SyntaxErrorSite,
    },
}

impl ParseError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors applying text edits to a tree
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    /// Edit range lies outside the text or splits a UTF-8 sequence
    #[error("edit range {start}..{end} is not valid for a text of {len} bytes")]
    InvalidRange {
        /// Range start
        start: usize,
        /// Range end
        end: usize,
        /// Text length
        len: usize,
    },

    /// Two edits touch the same bytes
    #[error("overlapping edits at byte {0}")]
    Overlap(usize),

    /// Incremental reparse failed
    #[error("reparse failed: {0}")]
    Reparse(#[from] TreeError),
}

/// Errors during file write (egress)
#[derive(Debug, thiserror::Error)]
#[error("io error writing {path}: {source}")]
pub struct WriteError {
    /// File being written
    pub path: PathBuf,
    /// Underlying error
    #[source]
    pub source: std::io::Error,
}
