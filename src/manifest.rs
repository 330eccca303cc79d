//! Plugin manifest (`manifest.json`) validation.
//!
//! Checks run in a fixed order and stop at the first violation: readable
//! UTF-8 input, well-formed JSON, object root, required fields present,
//! then per-field format and value rules. There is no aggregate mode; the
//! one-error-at-a-time contract is what callers and tests rely on.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::LazyLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use regex::Regex;
use serde_json::Value;

use crate::errors::ManifestError;

/// Reverse-DNS identifiers: dot-separated segments of letters, digits,
/// and hyphens, first segment starting with a letter, two segments
/// minimum.
static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9\-]*(\.[A-Za-z0-9\-]+)+$").expect("identifier regex")
});

/// Semantic versions: major.minor.patch without leading zeros, optional
/// `-`/`+` suffix of arbitrary content.
static SEMVER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)(?:[-+].*)?$").expect("semver regex")
});

/// Architectures a plugin bundle may declare, sorted for reporting.
pub const SUPPORTED_ARCHS: [&str; 3] = ["arm64", "universal2", "x86_64"];

/// Fields every manifest must carry.
const REQUIRED_FIELDS: [&str; 5] = [
    "identifier",
    "displayName",
    "version",
    "architectures",
    "download",
];

/// Validate the manifest file at `path`.
///
/// A missing file and non-UTF-8 content are reported as validation
/// errors, not panics, so the CLI can surface them uniformly.
pub fn validate_manifest_file(path: &Path) -> Result<(), ManifestError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(source) if source.kind() == ErrorKind::NotFound => {
            return Err(ManifestError::NotFound(path.to_path_buf()));
        }
        Err(source) => {
            return Err(ManifestError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let text = std::str::from_utf8(&bytes).map_err(ManifestError::NotUtf8)?;
    validate_manifest_str(text)
}

/// Validate manifest text that has already been read.
pub fn validate_manifest_str(text: &str) -> Result<(), ManifestError> {
    let root: Value = serde_json::from_str(text).map_err(ManifestError::Json)?;
    let manifest = root.as_object().ok_or(ManifestError::NotAnObject)?;

    let mut missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !manifest.contains_key(**field))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        missing.sort_unstable();
        return Err(ManifestError::MissingFields(missing));
    }

    validate_identifier(&manifest["identifier"])?;
    validate_display_name(&manifest["displayName"])?;
    validate_version(&manifest["version"])?;
    validate_architectures(&manifest["architectures"])?;
    validate_download(&manifest["download"])?;
    if let Some(signature) = manifest.get("signature") {
        validate_signature(signature)?;
    }
    Ok(())
}

fn validate_identifier(value: &Value) -> Result<(), ManifestError> {
    match value.as_str() {
        Some(id) if IDENTIFIER_RE.is_match(id) => Ok(()),
        _ => Err(ManifestError::Identifier(lossy(value))),
    }
}

fn validate_display_name(value: &Value) -> Result<(), ManifestError> {
    match value.as_str() {
        Some(name) if !name.trim().is_empty() => Ok(()),
        _ => Err(ManifestError::DisplayName),
    }
}

fn validate_version(value: &Value) -> Result<(), ManifestError> {
    match value.as_str() {
        Some(version) if SEMVER_RE.is_match(version) => Ok(()),
        _ => Err(ManifestError::Version(lossy(value))),
    }
}

fn validate_architectures(value: &Value) -> Result<(), ManifestError> {
    let archs = match value.as_array() {
        Some(archs) if !archs.is_empty() => archs,
        _ => return Err(ManifestError::ArchitecturesEmpty),
    };
    let invalid: Vec<String> = archs
        .iter()
        .filter(|arch| {
            !arch
                .as_str()
                .is_some_and(|a| SUPPORTED_ARCHS.contains(&a))
        })
        .map(lossy)
        .collect();
    if invalid.is_empty() {
        Ok(())
    } else {
        Err(ManifestError::UnsupportedArchitectures(invalid))
    }
}

fn validate_download(value: &Value) -> Result<(), ManifestError> {
    let download = value.as_object().ok_or(ManifestError::DownloadNotObject)?;

    let url_ok = download
        .get("url")
        .and_then(Value::as_str)
        .is_some_and(|url| url.starts_with("https://"));
    if !url_ok {
        return Err(ManifestError::DownloadUrl);
    }

    let sha_ok = download
        .get("sha256")
        .and_then(Value::as_str)
        .is_some_and(|sha| sha.len() == 64 && sha.chars().all(|c| c.is_ascii_hexdigit()));
    if sha_ok {
        Ok(())
    } else {
        Err(ManifestError::DownloadSha256)
    }
}

fn validate_signature(value: &Value) -> Result<(), ManifestError> {
    let signature = value.as_str().ok_or(ManifestError::SignatureNotString)?;
    // STANDARD rejects non-alphabet bytes and non-canonical padding.
    STANDARD.decode(signature)?;
    Ok(())
}

/// Render a JSON value for an error message: strings bare, everything
/// else as compact JSON.
fn lossy(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A minimal manifest that passes every check.
    fn valid_manifest() -> serde_json::Value {
        serde_json::json!({
            "identifier": "com.example.plugin",
            "displayName": "Example Plugin",
            "version": "1.2.3",
            "architectures": ["universal2"],
            "download": {
                "url": "https://example.com/plugin.zip",
                "sha256": "a".repeat(64)
            }
        })
    }

    fn validate(value: serde_json::Value) -> Result<(), ManifestError> {
        validate_manifest_str(&value.to_string())
    }

    #[test]
    fn valid_manifest_passes() {
        assert!(validate(valid_manifest()).is_ok());
    }

    #[test]
    fn invalid_json_is_rejected() {
        let err = validate_manifest_str("{ not json }").unwrap_err();
        assert!(matches!(err, ManifestError::Json(_)));
        assert!(err.to_string().starts_with("Invalid JSON:"));
    }

    #[test]
    fn non_object_root_is_rejected() {
        for text in ["[]", "42", "\"manifest\"", "null"] {
            let err = validate_manifest_str(text).unwrap_err();
            assert!(matches!(err, ManifestError::NotAnObject), "{text}");
        }
    }

    #[test]
    fn missing_fields_reported_sorted_together() {
        let mut manifest = valid_manifest();
        manifest.as_object_mut().unwrap().remove("version");
        manifest.as_object_mut().unwrap().remove("download");
        let err = validate(manifest).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required fields: download, version"
        );
    }

    #[test]
    fn all_required_fields_reported_for_empty_object() {
        let err = validate_manifest_str("{}").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required fields: architectures, displayName, download, identifier, version"
        );
    }

    #[test]
    fn identifier_requires_reverse_dns() {
        let accepted = ["com.example.plugin", "org.example-site.tool2", "a.b"];
        for id in accepted {
            let mut manifest = valid_manifest();
            manifest["identifier"] = serde_json::json!(id);
            assert!(validate(manifest).is_ok(), "{id}");
        }
        let rejected = ["plugin", ".example.plugin", "1com.example", "com.", "com..ex"];
        for id in rejected {
            let mut manifest = valid_manifest();
            manifest["identifier"] = serde_json::json!(id);
            let err = validate(manifest).unwrap_err();
            assert!(matches!(err, ManifestError::Identifier(_)), "{id}");
        }
    }

    #[test]
    fn identifier_error_names_value() {
        let mut manifest = valid_manifest();
        manifest["identifier"] = serde_json::json!("plugin");
        let err = validate(manifest).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid identifier 'plugin'. Use reverse-DNS notation (e.g. org.example.plugin)"
        );
    }

    #[test]
    fn non_string_identifier_is_rejected() {
        let mut manifest = valid_manifest();
        manifest["identifier"] = serde_json::json!(42);
        let err = validate(manifest).unwrap_err();
        assert!(matches!(err, ManifestError::Identifier(_)));
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn display_name_must_have_content() {
        for bad in [serde_json::json!(""), serde_json::json!("   "), serde_json::json!(7)] {
            let mut manifest = valid_manifest();
            manifest["displayName"] = bad;
            let err = validate(manifest).unwrap_err();
            assert_eq!(err.to_string(), "displayName must be a non-empty string");
        }
    }

    #[test]
    fn version_requires_semver() {
        let accepted = ["1.2.3", "0.0.0", "10.20.30", "1.2.3-beta.1", "1.2.3+build.7"];
        for version in accepted {
            let mut manifest = valid_manifest();
            manifest["version"] = serde_json::json!(version);
            assert!(validate(manifest).is_ok(), "{version}");
        }
        let rejected = ["1.2", "1.02.3", "01.2.3", "1.2.3.4", "v1.2.3", "1.2.x"];
        for version in rejected {
            let mut manifest = valid_manifest();
            manifest["version"] = serde_json::json!(version);
            let err = validate(manifest).unwrap_err();
            assert!(matches!(err, ManifestError::Version(_)), "{version}");
        }
    }

    #[test]
    fn architectures_must_be_non_empty_array() {
        for bad in [serde_json::json!([]), serde_json::json!("x86_64"), serde_json::json!(null)] {
            let mut manifest = valid_manifest();
            manifest["architectures"] = bad;
            let err = validate(manifest).unwrap_err();
            assert_eq!(err.to_string(), "architectures must be a non-empty array");
        }
    }

    #[test]
    fn all_supported_architectures_accepted() {
        let mut manifest = valid_manifest();
        manifest["architectures"] = serde_json::json!(["universal2", "x86_64", "arm64"]);
        assert!(validate(manifest).is_ok());
    }

    #[test]
    fn invalid_architectures_reported_together_with_allowed_set() {
        let mut manifest = valid_manifest();
        manifest["architectures"] = serde_json::json!(["x86_64", "risc-v", "ppc64"]);
        let err = validate(manifest).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported architectures [risc-v, ppc64]; supported: [arm64, universal2, x86_64]"
        );
    }

    #[test]
    fn non_string_architecture_entry_is_invalid() {
        let mut manifest = valid_manifest();
        manifest["architectures"] = serde_json::json!(["arm64", 64]);
        let err = validate(manifest).unwrap_err();
        assert!(matches!(err, ManifestError::UnsupportedArchitectures(_)));
        assert!(err.to_string().contains("64"));
    }

    #[test]
    fn download_must_be_object() {
        let mut manifest = valid_manifest();
        manifest["download"] = serde_json::json!("https://example.com");
        let err = validate(manifest).unwrap_err();
        assert_eq!(err.to_string(), "download must be an object");
    }

    #[test]
    fn download_url_must_be_https() {
        for bad in [
            serde_json::json!({ "url": "http://example.com/p.zip", "sha256": "a".repeat(64) }),
            serde_json::json!({ "url": "ftp://example.com/p.zip", "sha256": "a".repeat(64) }),
            serde_json::json!({ "sha256": "a".repeat(64) }),
            serde_json::json!({ "url": 1, "sha256": "a".repeat(64) }),
        ] {
            let mut manifest = valid_manifest();
            manifest["download"] = bad;
            let err = validate(manifest).unwrap_err();
            assert_eq!(err.to_string(), "download.url must be an HTTPS URL");
        }
    }

    #[test]
    fn sha256_must_be_64_hex_digits() {
        let cases = [
            "a".repeat(63),
            "a".repeat(65),
            format!("{}g", "a".repeat(63)),
        ];
        for bad in cases {
            let mut manifest = valid_manifest();
            manifest["download"]["sha256"] = serde_json::json!(bad);
            let err = validate(manifest).unwrap_err();
            assert_eq!(
                err.to_string(),
                "download.sha256 must be a 64-character hexadecimal string"
            );
        }
    }

    #[test]
    fn sha256_accepts_either_case() {
        let mut manifest = valid_manifest();
        manifest["download"]["sha256"] =
            serde_json::json!(format!("{}{}", "AB12".repeat(8), "cd34".repeat(8)));
        assert!(validate(manifest).is_ok());
    }

    #[test]
    fn absent_signature_is_fine() {
        assert!(validate(valid_manifest()).is_ok());
    }

    #[test]
    fn valid_signature_accepted() {
        let mut manifest = valid_manifest();
        manifest["signature"] = serde_json::json!("c2lnbmVkLWJ5LXNvbWVvbmU=");
        assert!(validate(manifest).is_ok());
    }

    #[test]
    fn malformed_signature_rejected() {
        let mut manifest = valid_manifest();
        manifest["signature"] = serde_json::json!("not-base64!!");
        let err = validate(manifest).unwrap_err();
        assert!(matches!(err, ManifestError::Signature(_)));
        assert!(err.to_string().starts_with("Invalid signature encoding:"));
    }

    #[test]
    fn unpadded_signature_rejected() {
        let mut manifest = valid_manifest();
        manifest["signature"] = serde_json::json!("c2ln0");
        let err = validate(manifest).unwrap_err();
        assert!(matches!(err, ManifestError::Signature(_)));
    }

    #[test]
    fn non_string_signature_rejected() {
        let mut manifest = valid_manifest();
        manifest["signature"] = serde_json::json!(["sig"]);
        let err = validate(manifest).unwrap_err();
        assert_eq!(err.to_string(), "signature must be a string");
    }

    #[test]
    fn first_failure_wins() {
        // Both identifier and version are bad; only identifier reports.
        let mut manifest = valid_manifest();
        manifest["identifier"] = serde_json::json!("plugin");
        manifest["version"] = serde_json::json!("1.2");
        let err = validate(manifest).unwrap_err();
        assert!(matches!(err, ManifestError::Identifier(_)));
    }

    #[test]
    fn nonexistent_file_reported_by_name() {
        let err = validate_manifest_file(Path::new("/nonexistent/manifest.json")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Manifest file '/nonexistent/manifest.json' not found"
        );
    }

    #[test]
    fn non_utf8_input_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::write(&path, [0xff, 0xfe, b'{', b'}']).unwrap();
        let err = validate_manifest_file(&path).unwrap_err();
        assert!(matches!(err, ManifestError::NotUtf8(_)));
        assert!(err.to_string().starts_with("Manifest not valid UTF-8:"));
    }
}
