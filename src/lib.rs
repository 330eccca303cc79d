//! Liquid Glass design tooling.
//!
//! Two independent utilities behind one CLI: a stylesheet generator that
//! renders the Liquid Glass design tokens into a QSS artifact, and a
//! plugin manifest validator that checks `manifest.json` files against
//! the distribution schema.

pub mod errors;
pub mod manifest;
pub mod stylesheet;
pub mod tokens;

// Re-export key types at crate root for convenience.
pub use errors::{ManifestError, TokenError};
pub use manifest::{validate_manifest_file, validate_manifest_str, SUPPORTED_ARCHS};
pub use stylesheet::{generate, write_stylesheet};
pub use tokens::{css_color, FontSpec, TokenDocument};
