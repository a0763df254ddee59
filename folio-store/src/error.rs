use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("document not found: {id}")]
    NotFound { id: String },

    #[error("not a PDF document: {filename}")]
    UnsupportedMediaType { filename: String },

    #[error("filename is not a plain file name: {filename}")]
    InvalidFilename { filename: String },

    #[error("document already exists: {filename}")]
    Conflict { filename: String },

    #[error("document exceeds the {limit_bytes} byte limit")]
    PayloadTooLarge { limit_bytes: u64 },

    #[error("range {start}-{end} of a {size} byte document is not satisfiable")]
    RangeNotSatisfiable { start: u64, end: u64, size: u64 },

    #[error("store root is not readable: {source}")]
    Unavailable {
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(id: S) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create an unsupported media type error
    pub fn unsupported_media_type<S: Into<String>>(filename: S) -> Self {
        Self::UnsupportedMediaType {
            filename: filename.into(),
        }
    }

    /// Create an invalid filename error
    pub fn invalid_filename<S: Into<String>>(filename: S) -> Self {
        Self::InvalidFilename {
            filename: filename.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict<S: Into<String>>(filename: S) -> Self {
        Self::Conflict {
            filename: filename.into(),
        }
    }

    /// Create a payload too large error
    pub fn payload_too_large(limit_bytes: u64) -> Self {
        Self::PayloadTooLarge { limit_bytes }
    }

    /// Create a range not satisfiable error
    pub fn range_not_satisfiable(start: u64, end: u64, size: u64) -> Self {
        Self::RangeNotSatisfiable { start, end, size }
    }

    /// Create an unavailable error from a directory-level failure
    pub fn unavailable(source: std::io::Error) -> Self {
        Self::Unavailable { source }
    }
}
