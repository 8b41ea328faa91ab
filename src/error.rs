use crate::records::RecordKind;
use polars::prelude::PolarsError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while retrieving, parsing or writing structures.
#[derive(Debug, Error)]
pub enum Error {
    /// The repository has no structure with this ID.
    #[error("structure '{id}' was not found")]
    NotFound {
        /// Structure ID as requested
        id: String,
    },

    /// Retrieval failed before a complete response arrived.
    #[error("failed to retrieve structure '{id}': {details}")]
    Network {
        /// Structure ID as requested
        id: String,
        /// Transport or HTTP status description
        details: String,
    },

    /// A line is too short for a required field, or a numeric field does not parse.
    #[error("malformed {kind} record ({details}): '{line}'")]
    MalformedRecord {
        /// Classified kind of the offending line
        kind: RecordKind,
        /// The offending line, trailing whitespace removed
        line: String,
        /// What was missing or unparsable
        details: String,
    },

    /// A field was requested from a record kind that does not define it.
    #[error("field '{field}' is not defined for {kind} records")]
    FieldAccess {
        /// Name of the requested field
        field: &'static str,
        /// Kind of the record it was requested from
        kind: RecordKind,
    },

    /// A caller-supplied parameter violates a precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading or writing a file failed.
    #[error(
        "I/O error for {path_desc}: {source}",
        path_desc = PathDisplay(path)
    )]
    Io {
        /// File involved, if any
        path: Option<PathBuf>,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Building or writing a table failed.
    #[error(transparent)]
    DataFrame(#[from] PolarsError),
}

impl Error {
    /// No structure with this ID exists.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Retrieval of `id` failed in transport or with a non-success status.
    pub fn network(id: impl Into<String>, details: impl fmt::Display) -> Self {
        Self::Network {
            id: id.into(),
            details: details.to_string(),
        }
    }

    /// A record of `kind` lacks a field or holds an unparsable value.
    pub fn malformed(kind: RecordKind, line: &str, details: impl Into<String>) -> Self {
        Self::MalformedRecord {
            kind,
            line: line.trim_end().to_string(),
            details: details.into(),
        }
    }

    /// `field` was read from a record kind that does not define it.
    pub fn field_access(field: &'static str, kind: RecordKind) -> Self {
        Self::FieldAccess { field, kind }
    }

    /// A caller-supplied value was rejected.
    pub fn invalid_argument(details: impl Into<String>) -> Self {
        Self::InvalidArgument(details.into())
    }

    /// Wrap an I/O error, naming the file when there is one.
    pub fn from_io(source: std::io::Error, path: Option<PathBuf>) -> Self {
        Self::Io { path, source }
    }
}

struct PathDisplay<'a>(&'a Option<PathBuf>);

impl fmt::Display for PathDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(p) => write!(f, "file '{}'", p.display()),
            None => write!(f, "stream source"),
        }
    }
}
