//! Stylesheet rendering from the design-token document.
//!
//! The output is a fixed sequence of QSS rule blocks: light-mode defaults
//! for the base widget, dock title, button, and selection states, followed
//! by dark-mode overrides scoped under `[data-theme="dark"]`. Block order
//! matters only for readability; every rule is independently scoped.

use std::fs;
use std::path::Path;

use crate::errors::TokenError;
use crate::tokens::TokenDocument;

/// Render the full stylesheet for a token document.
///
/// The result is deterministic: the same document always produces
/// byte-identical output. Any missing token or malformed color aborts
/// rendering with an error naming the offender.
pub fn generate(tokens: &TokenDocument) -> Result<String, TokenError> {
    let body = tokens.font("lg.font.body")?;
    let display = tokens.font("lg.font.display")?;
    let padding_sm = tokens.spacing("lg.spacing.sm")?;
    let padding_md = tokens.spacing("lg.spacing.md")?;
    let button_radius = tokens.spacing("lg.corner.radius.button")?;

    let mut blocks = vec![
        "/* Generated from design/tokens/liquid_glass.json */".to_string(),
        "/* Light mode defaults */".to_string(),
    ];

    blocks.push(rule(
        "QWidget",
        &[
            format!(
                "background-color: {}",
                tokens.color("lg.surface.primary.light")?
            ),
            format!("color: {}", tokens.color("lg.text.primary.light")?),
            format!("font-family: '{}'", body.family),
            format!("font-size: {}pt", body.size_pt),
        ],
    ));

    blocks.push(rule(
        "QDockWidget::title",
        &[
            format!(
                "background-color: {}",
                tokens.color("lg.surface.secondary.light")?
            ),
            format!("padding: {padding_sm}px"),
            "margin: 0px".to_string(),
            format!("font-family: '{}'", display.family),
            format!("font-size: {}pt", display.size_pt),
            format!("font-weight: {}", display.weight),
        ],
    ));

    blocks.push(rule(
        "QPushButton",
        &[
            format!(
                "background: {}",
                accent_gradient(tokens, "lg.accent.blue.light", "lg.accent.blue.dark")?
            ),
            format!("border-radius: {button_radius}px"),
            format!("padding: {padding_sm}px {padding_md}px"),
            format!("color: {}", tokens.color("lg.surface.secondary.light")?),
        ],
    ));

    blocks.push(rule(
        "QPushButton:disabled",
        &[
            format!(
                "background: {}",
                tokens.color("lg.surface.secondary.light")?
            ),
            format!("color: {}", tokens.color("lg.text.secondary.light")?),
        ],
    ));

    blocks.push(rule(
        "QTreeView::item:selected",
        &[
            format!(
                "background: {}",
                accent_gradient(tokens, "lg.accent.blue.light", "lg.accent.blue.dark")?
            ),
            format!("color: {}", tokens.color("lg.surface.secondary.light")?),
        ],
    ));

    blocks.push("/* Dark mode overrides (to be toggled dynamically) */".to_string());

    blocks.push(rule(
        "[data-theme=\"dark\"] QWidget",
        &[
            format!(
                "background-color: {}",
                tokens.color("lg.surface.primary.dark")?
            ),
            format!("color: {}", tokens.color("lg.text.primary.dark")?),
        ],
    ));

    blocks.push(rule(
        "[data-theme=\"dark\"] QDockWidget::title",
        &[
            format!(
                "background-color: {}",
                tokens.color("lg.surface.secondary.dark")?
            ),
            format!("color: {}", tokens.color("lg.text.primary.dark")?),
        ],
    ));

    // Dark buttons invert the gradient stop order.
    blocks.push(rule(
        "[data-theme=\"dark\"] QPushButton",
        &[format!(
            "background: {}",
            accent_gradient(tokens, "lg.accent.blue.dark", "lg.accent.blue.light")?
        )],
    ));

    Ok(blocks.join("\n\n") + "\n")
}

/// Read the token document at `src`, render the stylesheet, and write it
/// to `out`.
///
/// Creates missing parent directories and overwrites any existing output
/// file. Rendering errors abort before anything touches the filesystem.
pub fn write_stylesheet(src: &Path, out: &Path) -> Result<(), TokenError> {
    let text = fs::read_to_string(src).map_err(|source| TokenError::Read {
        path: src.to_path_buf(),
        source,
    })?;
    let tokens: TokenDocument = serde_json::from_str(&text)?;
    let stylesheet = generate(&tokens)?;

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| TokenError::Write {
            path: out.to_path_buf(),
            source,
        })?;
    }
    fs::write(out, stylesheet).map_err(|source| TokenError::Write {
        path: out.to_path_buf(),
        source,
    })
}

/// Format one rule block: selector, two-space-indented properties, one
/// property per line.
fn rule(selector: &str, properties: &[String]) -> String {
    let body: String = properties.iter().map(|p| format!("  {p};\n")).collect();
    format!("{selector} {{\n{body}}}")
}

/// A top-to-bottom linear gradient between two accent color tokens.
fn accent_gradient(tokens: &TokenDocument, top: &str, bottom: &str) -> Result<String, TokenError> {
    Ok(format!(
        "qlineargradient(x1:0, y1:0, x2:0, y2:1, stop:0 {}, stop:1 {})",
        tokens.color(top)?,
        tokens.color(bottom)?
    ))
}
