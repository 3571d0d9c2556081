//! Visual styles for highlighted wiki markup
//!
//! Style sheets are YAML documents mapping style ids (referenced by pattern
//! registry entries) to text attributes. Built-in sheets are embedded at
//! compile time; user sheets live in the config directory.
//!
//! Loading priority:
//! 1. User config: `~/.config/wikitext/styles/{id}.yaml`
//! 2. Embedded: Built-in sheets compiled into binary

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config_paths::ConfigPaths;

pub const DEFAULT_YAML: &str = include_str!("../styles/default.yaml");
pub const DARK_YAML: &str = include_str!("../styles/dark.yaml");

/// A built-in style sheet entry
pub struct BuiltinStyleSheet {
    /// Stable identifier for config (e.g. "default", "dark")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in style sheets
pub const BUILTIN_STYLE_SHEETS: &[BuiltinStyleSheet] = &[
    BuiltinStyleSheet {
        id: "default",
        yaml: DEFAULT_YAML,
    },
    BuiltinStyleSheet {
        id: "dark",
        yaml: DARK_YAML,
    },
];

/// Errors raised while loading a style sheet
#[derive(Debug, Clone)]
pub enum StyleError {
    /// No user or built-in sheet with this id
    UnknownSheet(String),
    /// YAML could not be parsed
    Parse(String),
    /// A color string was not `#RRGGBB` or `#RRGGBBAA`
    InvalidColor(String),
    /// Sheet file could not be read
    Io(String),
}

impl std::fmt::Display for StyleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownSheet(id) => write!(f, "unknown style sheet: {}", id),
            Self::Parse(msg) => write!(f, "style sheet parse error: {}", msg),
            Self::InvalidColor(s) => write!(f, "invalid color format: {}", s),
            Self::Io(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for StyleError {}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, StyleError> {
        let hex = s.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| StyleError::InvalidColor(s.to_string()))
        };
        match hex.len() {
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(StyleError::InvalidColor(s.to_string())),
        }
    }
}

/// Text attributes applied to a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TextStyle {
    /// None = inherit the widget's foreground
    pub foreground: Option<Color>,
    /// None = inherit the widget's background
    pub background: Option<Color>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

/// Raw style sheet data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct StyleSheetData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub plain: TextStyleData,
    #[serde(default)]
    pub styles: HashMap<String, TextStyleData>,
}

/// Text attributes (raw strings from YAML)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextStyleData {
    #[serde(default)]
    pub foreground: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
}

impl TextStyleData {
    fn resolve(&self) -> Result<TextStyle, StyleError> {
        Ok(TextStyle {
            foreground: self.foreground.as_deref().map(Color::from_hex).transpose()?,
            background: self.background.as_deref().map(Color::from_hex).transpose()?,
            bold: self.bold,
            italic: self.italic,
            underline: self.underline,
        })
    }
}

/// Resolved style sheet
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    pub name: String,
    /// Style for text outside any span
    pub plain: TextStyle,
    styles: HashMap<String, TextStyle>,
}

impl StyleSheet {
    /// Load a style sheet from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, StyleError> {
        let data: StyleSheetData =
            serde_yaml::from_str(yaml).map_err(|e| StyleError::Parse(e.to_string()))?;
        Self::from_data(data)
    }

    /// Load a built-in sheet by id
    pub fn from_builtin(id: &str) -> Result<Self, StyleError> {
        let entry = BUILTIN_STYLE_SHEETS
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| StyleError::UnknownSheet(id.to_string()))?;
        Self::from_yaml(entry.yaml)
    }

    /// Convert raw sheet data to a resolved sheet
    pub fn from_data(data: StyleSheetData) -> Result<Self, StyleError> {
        let styles = data
            .styles
            .iter()
            .map(|(id, style)| Ok((id.clone(), style.resolve()?)))
            .collect::<Result<HashMap<_, _>, StyleError>>()?;

        Ok(StyleSheet {
            name: data.name,
            plain: data.plain.resolve()?,
            styles,
        })
    }

    /// Look up a style by id, falling back to the plain style
    pub fn resolve(&self, style_id: &str) -> TextStyle {
        match self.styles.get(style_id) {
            Some(style) => *style,
            None => {
                tracing::trace!("Style '{}' not in sheet '{}', using plain", style_id, self.name);
                self.plain
            }
        }
    }

    pub fn has_style(&self, style_id: &str) -> bool {
        self.styles.contains_key(style_id)
    }

    /// Add or replace a style
    pub fn set_style(&mut self, style_id: impl Into<String>, style: TextStyle) {
        self.styles.insert(style_id.into(), style);
    }

    /// Built-in default sheet (YAML-backed with Rust fallback)
    pub fn default_sheet() -> Self {
        match Self::from_yaml(DEFAULT_YAML) {
            Ok(sheet) => sheet,
            Err(e) => {
                tracing::warn!("Built-in style sheet failed to parse: {}", e);
                StyleSheet {
                    name: "Default".to_string(),
                    ..Default::default()
                }
            }
        }
    }
}

/// Load a style sheet from a YAML file
pub fn from_file(path: &Path) -> Result<StyleSheet, StyleError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        StyleError::Io(format!(
            "Failed to read style sheet {}: {}",
            path.display(),
            e
        ))
    })?;
    StyleSheet::from_yaml(&content)
}

/// Load a style sheet by id with priority: user → builtin
pub fn load_style_sheet(id: &str) -> Result<StyleSheet, StyleError> {
    load_style_sheet_from(ConfigPaths::user().as_ref(), id)
}

/// Like [`load_style_sheet`], looking for user sheets under `paths`
pub fn load_style_sheet_from(
    paths: Option<&ConfigPaths>,
    id: &str,
) -> Result<StyleSheet, StyleError> {
    if let Some(paths) = paths {
        let user_path = paths.style_file(id);
        if user_path.exists() {
            tracing::info!("Loading user style sheet from {}", user_path.display());
            return from_file(&user_path);
        }
    }

    tracing::info!("Loading builtin style sheet: {}", id);
    StyleSheet::from_builtin(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("#1A5FB4").unwrap(), Color::rgb(0x1A, 0x5F, 0xB4));
        assert_eq!(
            Color::from_hex("#1A5FB480").unwrap(),
            Color::rgba(0x1A, 0x5F, 0xB4, 0x80)
        );
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#GGGGGG").is_err());
    }

    #[test]
    fn test_builtin_sheets_parse() {
        for builtin in BUILTIN_STYLE_SHEETS {
            let sheet = StyleSheet::from_yaml(builtin.yaml);
            assert!(sheet.is_ok(), "built-in sheet '{}' failed", builtin.id);
        }
    }

    #[test]
    fn test_default_sheet_has_link_styles() {
        let sheet = StyleSheet::default_sheet();
        assert!(sheet.has_style("url"));
        assert!(sheet.resolve("url").underline);
        assert!(sheet.resolve("bold").bold);
        assert!(sheet.resolve("italic").italic);
    }

    #[test]
    fn test_missing_style_falls_back_to_plain() {
        let sheet = StyleSheet::default_sheet();
        assert_eq!(sheet.resolve("no-such-style"), sheet.plain);
    }

    #[test]
    fn test_unknown_builtin() {
        assert!(matches!(
            StyleSheet::from_builtin("nope"),
            Err(StyleError::UnknownSheet(_))
        ));
    }

    #[test]
    fn test_invalid_color_in_yaml() {
        let yaml = r#"
version: 1
name: "Broken"
styles:
  url:
    foreground: "blue"
"#;
        assert!(matches!(
            StyleSheet::from_yaml(yaml),
            Err(StyleError::InvalidColor(_))
        ));
    }
}
