//! Design-token document model (`liquid_glass.json`) and color rendering.

use std::collections::HashMap;

use serde::Deserialize;

use crate::errors::TokenError;

/// Parsed design-token document.
///
/// All three sections are required; deserialization fails if one is
/// absent. Token values are looked up by fixed keys via the accessor
/// methods, which report absent keys by name.
#[derive(Debug, Deserialize)]
pub struct TokenDocument {
    /// Color tokens: name → hex string (`RRGGBB` or `RRGGBBAA`, optional
    /// leading `#`).
    pub colors: HashMap<String, String>,
    /// Spacing tokens: name → pixel value.
    pub spacing: HashMap<String, i64>,
    /// Typography tokens: name → font spec.
    pub typography: HashMap<String, FontSpec>,
}

/// A typography token: font family, point size, and weight.
#[derive(Debug, Deserialize)]
pub struct FontSpec {
    /// Font family name.
    pub family: String,
    /// Point size.
    pub size_pt: f64,
    /// Font weight (used by display-style rules).
    pub weight: i64,
}

impl TokenDocument {
    /// Look up a color token and render it as CSS functional notation.
    pub fn color(&self, key: &str) -> Result<String, TokenError> {
        let raw = self
            .colors
            .get(key)
            .ok_or_else(|| TokenError::MissingColor(key.to_string()))?;
        css_color(raw)
    }

    /// Look up a spacing token in pixels.
    pub fn spacing(&self, key: &str) -> Result<i64, TokenError> {
        self.spacing
            .get(key)
            .copied()
            .ok_or_else(|| TokenError::MissingSpacing(key.to_string()))
    }

    /// Look up a typography token.
    pub fn font(&self, key: &str) -> Result<&FontSpec, TokenError> {
        self.typography
            .get(key)
            .ok_or_else(|| TokenError::MissingFont(key.to_string()))
    }
}

/// Render a hex color token as CSS functional notation.
///
/// Six hex digits render as `rgb(r, g, b)` with decimal channels; eight
/// digits render as `rgba(r, g, b, a)` with the trailing byte mapped to a
/// two-decimal alpha in [0, 1]. Any other length is an error naming the
/// offending value.
pub fn css_color(value: &str) -> Result<String, TokenError> {
    let hex = value.trim_start_matches('#');
    match hex.len() {
        6 => {
            let (r, g, b) = (hex_byte(hex, 0)?, hex_byte(hex, 2)?, hex_byte(hex, 4)?);
            Ok(format!("rgb({r}, {g}, {b})"))
        }
        8 => {
            let (r, g, b) = (hex_byte(hex, 0)?, hex_byte(hex, 2)?, hex_byte(hex, 4)?);
            let alpha = f64::from(hex_byte(hex, 6)?) / 255.0;
            Ok(format!("rgba({r}, {g}, {b}, {alpha:.2})"))
        }
        _ => Err(TokenError::ColorFormat(hex.to_string())),
    }
}

/// Parse the two hex digits at `index` as a byte.
fn hex_byte(hex: &str, index: usize) -> Result<u8, TokenError> {
    hex.get(index..index + 2)
        .and_then(|pair| u8::from_str_radix(pair, 16).ok())
        .ok_or_else(|| TokenError::ColorFormat(hex.to_string()))
}
