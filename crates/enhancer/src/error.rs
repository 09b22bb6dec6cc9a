//! Error types for the enhancement pipeline

use std::path::PathBuf;

/// Failures surfaced by the pipeline.
///
/// Every variant names the document it concerns: the input path, or
/// `<memory>` for documents loaded from bytes.
#[derive(thiserror::Error, Debug)]
pub enum EnhanceError {
    #[error("failed to read {document}: {source}")]
    Read {
        document: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed document {document}: {reason}")]
    MalformedDocument { document: String, reason: String },

    #[error("unsupported OpenAPI version in {document}: {found}")]
    UnsupportedVersion { document: String, found: String },

    #[error(
        "security scheme '{scheme}' in {document} already exists with type '{found_type}', expected 'oauth2'"
    )]
    SchemeConflict {
        document: String,
        scheme: String,
        found_type: String,
    },

    #[error("dangling reference '{reference}' from {referenced_from} in {document}")]
    DanglingReference {
        document: String,
        reference: String,
        referenced_from: String,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EnhanceError {
    /// Stable identifier of the failure class, used in logs and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            EnhanceError::Read { .. } => "ReadError",
            EnhanceError::MalformedDocument { .. } => "MalformedDocument",
            EnhanceError::UnsupportedVersion { .. } => "UnsupportedVersion",
            EnhanceError::SchemeConflict { .. } => "SchemeConflict",
            EnhanceError::DanglingReference { .. } => "DanglingReference",
            EnhanceError::Write { .. } => "WriteError",
            EnhanceError::InvalidConfig(_) => "InvalidConfig",
        }
    }
}

/// Result type for pipeline operations
pub type EnhanceResult<T> = Result<T, EnhanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        let err = EnhanceError::DanglingReference {
            document: "api.json".to_string(),
            reference: "Missing".to_string(),
            referenced_from: "#/components/schemas/Order".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("Missing"));
        assert!(message.contains("#/components/schemas/Order"));
        assert!(message.contains("api.json"));
        assert_eq!(err.kind(), "DanglingReference");
    }

    #[test]
    fn test_write_error_kind() {
        let err = EnhanceError::Write {
            path: PathBuf::from("out/api.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.kind(), "WriteError");
        assert!(err.to_string().contains("out/api.json"));
    }
}
