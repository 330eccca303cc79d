use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while rendering a stylesheet from design tokens.
#[derive(Error, Debug)]
pub enum TokenError {
    /// Token file could not be read.
    #[error("cannot read token file '{}': {source}", .path.display())]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Token document is not valid JSON or lacks a required section.
    #[error("invalid token document: {0}")]
    Parse(#[from] serde_json::Error),

    /// Color value is not 6 or 8 hex digits after stripping a leading `#`.
    #[error("unexpected color format: {0}")]
    ColorFormat(String),

    /// A referenced color token is absent from the document.
    #[error("missing color token '{0}'")]
    MissingColor(String),

    /// A referenced spacing token is absent from the document.
    #[error("missing spacing token '{0}'")]
    MissingSpacing(String),

    /// A referenced typography token is absent from the document.
    #[error("missing typography token '{0}'")]
    MissingFont(String),

    /// Stylesheet output could not be written.
    #[error("cannot write stylesheet '{}': {source}", .path.display())]
    Write {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// Errors that can occur while validating a plugin manifest.
///
/// Validation is fail-fast: the first violated rule is reported and
/// checking stops. Display strings carry the field name and offending
/// value so a failure is actionable without re-running under a debugger.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest path does not exist.
    #[error("Manifest file '{}' not found", .0.display())]
    NotFound(PathBuf),

    /// Manifest could not be read for another IO reason.
    #[error("cannot read manifest '{}': {source}", .path.display())]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Manifest bytes are not valid UTF-8.
    #[error("Manifest not valid UTF-8: {0}")]
    NotUtf8(std::str::Utf8Error),

    /// Manifest text is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(serde_json::Error),

    /// Manifest root is an array, scalar, or null.
    #[error("Manifest root must be an object")]
    NotAnObject,

    /// One or more required fields are absent; the list is sorted.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// `identifier` does not match reverse-DNS notation.
    #[error("Invalid identifier '{0}'. Use reverse-DNS notation (e.g. org.example.plugin)")]
    Identifier(String),

    /// `displayName` is missing, not a string, or empty after trimming.
    #[error("displayName must be a non-empty string")]
    DisplayName,

    /// `version` is not a semantic version.
    #[error("Version '{0}' does not match semantic versioning (major.minor.patch)")]
    Version(String),

    /// `architectures` is not a non-empty array.
    #[error("architectures must be a non-empty array")]
    ArchitecturesEmpty,

    /// `architectures` contains entries outside the supported set.
    #[error(
        "Unsupported architectures [{}]; supported: [{}]",
        .0.join(", "),
        crate::manifest::SUPPORTED_ARCHS.join(", ")
    )]
    UnsupportedArchitectures(Vec<String>),

    /// `download` is not an object.
    #[error("download must be an object")]
    DownloadNotObject,

    /// `download.url` is missing, not a string, or not HTTPS.
    #[error("download.url must be an HTTPS URL")]
    DownloadUrl,

    /// `download.sha256` is missing or not 64 hex digits.
    #[error("download.sha256 must be a 64-character hexadecimal string")]
    DownloadSha256,

    /// `signature` is present but not a string.
    #[error("signature must be a string")]
    SignatureNotString,

    /// `signature` is not valid standard base64.
    #[error("Invalid signature encoding: {0}")]
    Signature(#[from] base64::DecodeError),
}
