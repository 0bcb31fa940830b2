//! Error types for the Slimedit system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::kind::TagKind;
use crate::node::NodeId;

/// Result type alias for Slimedit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Slimedit operations.
#[derive(Debug, Error)]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Attaches a section name, keeping any existing path.
    #[must_use]
    pub fn in_section(mut self, section: &'static str) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_section(section));
        self
    }

    /// Attaches a file path, keeping any existing section.
    #[must_use]
    pub fn at_path(mut self, path: impl AsRef<Path>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_path(path));
        self
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: TagKind, actual: TagKind) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Creates a node not found error.
    #[must_use]
    pub fn node_not_found(id: NodeId) -> Self {
        Self::new(ErrorKind::NodeNotFound(id))
    }

    /// Creates a malformed tag error.
    #[must_use]
    pub fn malformed_tag(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedTag(message.into()))
    }

    /// Creates a decompression error.
    #[must_use]
    pub fn decompression(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decompression(message.into()))
    }

    /// Creates a path not found error.
    #[must_use]
    pub fn path_not_found(path: impl Into<String>) -> Self {
        Self::new(ErrorKind::PathNotFound(path.into()))
    }

    /// Creates an I/O error from a read failure.
    #[must_use]
    pub fn io(err: &std::io::Error) -> Self {
        Self::new(ErrorKind::Io(err.to_string()))
    }

    /// Creates a write error from a save failure.
    #[must_use]
    pub fn write(err: &std::io::Error) -> Self {
        Self::new(ErrorKind::WriteError(err.to_string()))
    }

    /// Returns true if this error was produced while decoding a section body.
    ///
    /// These are the errors that optional sections may degrade on.
    #[must_use]
    pub const fn is_section_decode(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Decompression(_) | ErrorKind::MalformedTag(_) | ErrorKind::UnexpectedRootKind(_)
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(context) = &self.context {
            write!(f, " ({context})")?;
        }
        Ok(())
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The file does not start with the SRF magic bytes.
    #[error("world does not have the SRF header (found {found:02X?})")]
    InvalidHeader {
        /// The bytes found where the magic was expected.
        found: Vec<u8>,
    },

    /// The container format version is not supported.
    #[error("world is not a supported version: found {found}, expected {expected}")]
    UnsupportedVersion {
        /// The version byte found in the file.
        found: u8,
        /// The only supported version.
        expected: u8,
    },

    /// A size or length field holds an impossible value.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// A compressed block did not expand to its declared length.
    #[error("decompression failed: {0}")]
    Decompression(String),

    /// A byte stream does not follow the tag wire grammar.
    #[error("malformed tag: {0}")]
    MalformedTag(String),

    /// A section's root tag is not a compound.
    #[error("unexpected root tag kind: expected Compound, got {0}")]
    UnexpectedRootKind(TagKind),

    /// The destination of a save could not be created or written.
    #[error("write failed: {0}")]
    WriteError(String),

    /// Reading the source file failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// A value of the wrong kind was supplied for a tag.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The kind the tag holds.
        expected: TagKind,
        /// The kind that was supplied.
        actual: TagKind,
    },

    /// The node handle was not issued by this tree.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// The operation requires a loaded world.
    #[error("world is not loaded")]
    NotLoaded,

    /// A path does not name a node.
    #[error("no such node: {0}")]
    PathNotFound(String),

    /// Text could not be parsed as a value of the given kind.
    #[error("'{text}' is not a valid {kind}")]
    InvalidValue {
        /// The kind the text was parsed as.
        kind: TagKind,
        /// The rejected text.
        text: String,
    },

    /// An editor command was not understood.
    #[error("{0}")]
    InvalidCommand(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The file being read or written.
    pub path: Option<PathBuf>,
    /// The container section being processed.
    pub section: Option<&'static str>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file path.
    #[must_use]
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the section name.
    #[must_use]
    pub fn with_section(mut self, section: &'static str) -> Self {
        self.section = Some(section);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.section, &self.path) {
            (Some(section), Some(path)) => {
                write!(f, "in section {section} of {}", path.display())
            }
            (Some(section), None) => write!(f, "in section {section}"),
            (None, Some(path)) => write!(f, "at {}", path.display()),
            (None, None) => Ok(()),
        }
    }
}
