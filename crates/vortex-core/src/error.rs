//! Error types for Vortex Config.

use thiserror::Error;

/// Main error type for configuration resolution.
#[derive(Debug, Error)]
pub enum VortexError {
    /// The application name is not usable.
    #[error("invalid application '{name}': {reason}")]
    InvalidApplication {
        /// Offending application name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The request label could not be parsed.
    #[error("invalid label format '{label}': {reason}")]
    InvalidLabel {
        /// Label as received from the caller.
        label: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A backing source could not be reached or read.
    #[error("source '{backend}' unavailable: {message}")]
    SourceError {
        /// Identifier of the backend (URI or role).
        backend: String,
        /// Failure description.
        message: String,
    },

    /// One side of a two-source resolution failed, so nothing was merged.
    #[error("composite resolution failed on {side} branch '{branch}'")]
    CompositeFailed {
        /// Which side failed (`extension` or `core`).
        side: String,
        /// Branch requested on that side.
        branch: String,
        /// Underlying failure.
        #[source]
        cause: Box<VortexError>,
    },

    /// A configuration file inside a source could not be parsed.
    #[error("failed to parse '{file}': {message}")]
    ParseError {
        /// File that failed.
        file: String,
        /// Parser message.
        message: String,
    },

    /// The service's own settings are invalid.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl VortexError {
    /// Creates an [`VortexError::InvalidApplication`] error.
    pub fn invalid_application(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidApplication {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates an [`VortexError::InvalidLabel`] error.
    pub fn invalid_label(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidLabel {
            label: label.into(),
            reason: reason.into(),
        }
    }

    /// Creates a [`VortexError::SourceError`].
    pub fn source_error(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceError {
            backend: backend.into(),
            message: message.into(),
        }
    }

    /// Wraps a failure from one side of a composite resolution.
    pub fn composite_failed(side: impl Into<String>, branch: impl Into<String>, cause: Self) -> Self {
        Self::CompositeFailed {
            side: side.into(),
            branch: branch.into(),
            cause: Box::new(cause),
        }
    }

    /// Creates a [`VortexError::ParseError`].
    pub fn parse_error(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Returns true if this error, or the cause of a composite failure,
    /// came from an unreachable source.
    #[must_use]
    pub fn is_source_error(&self) -> bool {
        match self {
            Self::SourceError { .. } => true,
            Self::CompositeFailed { cause, .. } => cause.is_source_error(),
            _ => false,
        }
    }

    /// Returns true for caller label errors.
    #[must_use]
    pub const fn is_invalid_label(&self) -> bool {
        matches!(self, Self::InvalidLabel { .. })
    }

    /// Short, stable name of the error kind, used as a metrics label.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidApplication { .. } => "invalid_application",
            Self::InvalidLabel { .. } => "invalid_label",
            Self::SourceError { .. } => "source_unavailable",
            Self::CompositeFailed { .. } => "composite_failed",
            Self::ParseError { .. } => "parse_error",
            Self::Configuration(_) => "configuration",
        }
    }
}

/// Result type alias using [`VortexError`].
pub type Result<T> = std::result::Result<T, VortexError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_source_error_message() {
        let err = VortexError::source_error("git", "connection timeout");
        assert_eq!(err.to_string(), "source 'git' unavailable: connection timeout");
        assert!(err.is_source_error());
        assert_eq!(err.kind(), "source_unavailable");
    }

    #[test]
    fn test_composite_failure_keeps_cause() {
        let err = VortexError::composite_failed(
            "core",
            "rel-2",
            VortexError::source_error("https://example.com/core.git", "clone failed"),
        );

        assert!(err.is_source_error());
        assert!(err.to_string().contains("core branch 'rel-2'"));
        let cause = err.source().map(ToString::to_string).unwrap_or_default();
        assert!(cause.contains("clone failed"));
    }

    #[test]
    fn test_invalid_label_predicate() {
        let err = VortexError::invalid_label("a:b:c", "expected two branches");
        assert!(err.is_invalid_label());
        assert!(!err.is_source_error());
        assert_eq!(err.kind(), "invalid_label");
    }
}
