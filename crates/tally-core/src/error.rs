//! Shared error type across tally crates.

use std::fmt;

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Counter name already taken, or not present.
    NameConflict,
    /// Invalid input / malformed config.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::NameConflict => "NAME_CONFLICT",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Why a name conflicted. Only used for logs: clients see one code for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// Create on a name that is already registered.
    Exists,
    /// Increment/read on a name that is not registered.
    Missing,
}

impl ConflictKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ConflictKind::Exists => "exists",
            ConflictKind::Missing => "missing",
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, TallyError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("counter {name} conflicts ({kind})")]
    NameConflict { name: String, kind: ConflictKind },
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl TallyError {
    pub(crate) fn exists(name: &str) -> Self {
        TallyError::NameConflict { name: name.to_owned(), kind: ConflictKind::Exists }
    }

    pub(crate) fn missing(name: &str) -> Self {
        TallyError::NameConflict { name: name.to_owned(), kind: ConflictKind::Missing }
    }

    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            TallyError::NameConflict { .. } => ClientCode::NameConflict,
            TallyError::BadRequest(_) => ClientCode::BadRequest,
            TallyError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            TallyError::Internal(_) => ClientCode::Internal,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, TallyError::NameConflict { .. })
    }
}
