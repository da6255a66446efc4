//! Error handling for glTF parsing
//!
//! Every parsing operation returns a [`Result`]. A failure carries a
//! [`GltfError`] with context, and each error maps onto one code of the fixed
//! [`ErrorCode`] taxonomy so callers can branch on the class of failure and
//! look up a stable message with [`error_message`].

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error codes of the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The base directory does not exist or is not a directory
    InvalidPath,
    /// The input is not well-formed JSON
    InvalidJson,
    /// A required field is missing, has the wrong type, or conflicts with another field
    InvalidGltf,
    /// The top-level `asset` object is missing or has no string `version`
    InvalidOrMissingAssetField,
    /// A well-formed value that the format or the current options do not allow
    RestrictedValue,
    /// The binary container framing is broken
    InvalidGlb,
    /// An external buffer or image file could not be read
    FileLoadFailed,
}

impl ErrorCode {
    /// Returns the name of this error code as a string
    pub const fn name(self) -> &'static str {
        match self {
            ErrorCode::InvalidPath => "INVALID_PATH",
            ErrorCode::InvalidJson => "INVALID_JSON",
            ErrorCode::InvalidGltf => "INVALID_GLTF",
            ErrorCode::InvalidOrMissingAssetField => "INVALID_OR_MISSING_ASSET_FIELD",
            ErrorCode::RestrictedValue => "RESTRICTED_VALUE",
            ErrorCode::InvalidGlb => "INVALID_GLB",
            ErrorCode::FileLoadFailed => "FILE_LOAD_FAILED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Human-readable description of an error code.
pub const fn error_message(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::InvalidPath => "The glTF directory passed to the parser is invalid.",
        ErrorCode::InvalidJson => "The JSON text is malformed and could not be tokenized.",
        ErrorCode::InvalidGltf => {
            "The glTF is invalid: a required field is missing, has the wrong type, or conflicts with another field."
        }
        ErrorCode::InvalidOrMissingAssetField => {
            "The glTF asset object is missing or does not declare a version."
        }
        ErrorCode::RestrictedValue => {
            "The glTF uses a value that is not allowed with the current parser options."
        }
        ErrorCode::InvalidGlb => "The GLB container is malformed.",
        ErrorCode::FileLoadFailed => "An external buffer or image file could not be loaded.",
    }
}

/// Errors that can occur when loading or parsing glTF documents.
#[derive(Error, Debug)]
pub enum GltfError {
    #[error("Invalid directory: {0}")]
    InvalidPath(PathBuf),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid glTF: {0}")]
    InvalidGltf(String),

    #[error("Invalid or missing asset field: {0}")]
    InvalidOrMissingAssetField(String),

    #[error("Restricted value: {0}")]
    RestrictedValue(String),

    #[error("Invalid GLB: {0}")]
    InvalidGlb(String),

    #[error("Failed to load {path}: {source}")]
    FileLoad {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl GltfError {
    /// Returns the taxonomy code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            GltfError::InvalidPath(_) => ErrorCode::InvalidPath,
            GltfError::Json(_) => ErrorCode::InvalidJson,
            GltfError::InvalidGltf(_) => ErrorCode::InvalidGltf,
            GltfError::InvalidOrMissingAssetField(_) => ErrorCode::InvalidOrMissingAssetField,
            GltfError::RestrictedValue(_) => ErrorCode::RestrictedValue,
            GltfError::InvalidGlb(_) => ErrorCode::InvalidGlb,
            GltfError::FileLoad { .. } => ErrorCode::FileLoadFailed,
        }
    }

    /// Creates a schema error
    pub fn invalid(message: impl Into<String>) -> Self {
        GltfError::InvalidGltf(message.into())
    }

    /// Creates a semantic-restriction error
    pub fn restricted(message: impl Into<String>) -> Self {
        GltfError::RestrictedValue(message.into())
    }

    /// Creates a container framing error
    pub fn invalid_glb(message: impl Into<String>) -> Self {
        GltfError::InvalidGlb(message.into())
    }
}

pub type Result<T> = std::result::Result<T, GltfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(GltfError::invalid("x").code(), ErrorCode::InvalidGltf);
        assert_eq!(GltfError::restricted("x").code(), ErrorCode::RestrictedValue);
        assert_eq!(GltfError::invalid_glb("x").code(), ErrorCode::InvalidGlb);
        assert_eq!(
            GltfError::InvalidPath(PathBuf::from("/nope")).code(),
            ErrorCode::InvalidPath
        );

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(GltfError::from(json_err).code(), ErrorCode::InvalidJson);
    }

    #[test]
    fn test_error_code_names() {
        assert_eq!(ErrorCode::InvalidGltf.to_string(), "INVALID_GLTF");
        assert_eq!(ErrorCode::FileLoadFailed.name(), "FILE_LOAD_FAILED");
        assert!(error_message(ErrorCode::InvalidPath).contains("directory"));
    }

    #[test]
    fn test_display_includes_context() {
        let err = GltfError::invalid("accessors[2]: missing `count`");
        assert_eq!(err.to_string(), "Invalid glTF: accessors[2]: missing `count`");
    }
}
