//! Core error types for outline derivation
//!
//! An empty outline is never an error: it is the empty string. Everything in
//! this enum is scoped to one diagram or one aggregate attempt.

use thiserror::Error;

/// Result alias used by the session layer
pub type Result<T, E = OutlineError> = std::result::Result<T, E>;

/// Error taxonomy for fetching, rendering and aggregating outlines
#[derive(Error, Debug)]
pub enum OutlineError {
    #[error("Unable to load diagram source '{path}': {message}")]
    FetchFailure { path: String, message: String },

    #[error("Diagram '{id}' has no source file")]
    MissingSource { id: String },

    #[error("Rendering failed: {message}")]
    RenderFailure { message: String },

    #[error("Aggregate outline build failed: {message}")]
    AggregateBuild { message: String },

    #[error("Unknown diagram: {id}")]
    UnknownDiagram { id: String },

    #[error("Manifest error: {message}")]
    ManifestError { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl OutlineError {
    /// Create a new fetch failure for a storage path
    pub fn fetch_failure(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FetchFailure {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new missing-source error
    pub fn missing_source(id: impl Into<String>) -> Self {
        Self::MissingSource { id: id.into() }
    }

    /// Create a new render failure
    pub fn render_failure(message: impl Into<String>) -> Self {
        Self::RenderFailure {
            message: message.into(),
        }
    }

    /// Create a new aggregate build failure
    pub fn aggregate_build(message: impl Into<String>) -> Self {
        Self::AggregateBuild {
            message: message.into(),
        }
    }

    /// Create a new unknown-diagram error
    pub fn unknown_diagram(id: impl Into<String>) -> Self {
        Self::UnknownDiagram { id: id.into() }
    }

    /// Create a new manifest error
    pub fn manifest_error(message: impl Into<String>) -> Self {
        Self::ManifestError {
            message: message.into(),
        }
    }

    /// Whether the failure only concerns one diagram's source text
    pub fn is_per_diagram(&self) -> bool {
        matches!(
            self,
            Self::FetchFailure { .. } | Self::MissingSource { .. } | Self::RenderFailure { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failure() {
        let error = OutlineError::fetch_failure("diagrams/home.mmd", "404");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Unable to load diagram source"));
        assert!(error_msg.contains("diagrams/home.mmd"));
        assert!(error_msg.contains("404"));
        assert!(error.is_per_diagram());
    }

    #[test]
    fn test_render_failure() {
        let error = OutlineError::render_failure("bad syntax");
        assert_eq!(format!("{}", error), "Rendering failed: bad syntax");
        assert!(error.is_per_diagram());
    }

    #[test]
    fn test_aggregate_build() {
        let error = OutlineError::aggregate_build("listing unavailable");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Aggregate outline build failed"));
        assert!(!error.is_per_diagram());
    }

    #[test]
    fn test_unknown_diagram() {
        let error = OutlineError::unknown_diagram("nope");
        assert!(format!("{}", error).contains("nope"));
    }

    #[test]
    fn test_io_error_conversion() {
        use std::io;
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: OutlineError = io_err.into();
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("IO error"));
        assert!(error_msg.contains("File not found"));
    }
}
