//! Ordered pattern registry
//!
//! Each entry pairs a compiled regex with a style id and a selection action.
//! Registration order is priority order: when two patterns match the same
//! text, the earlier entry keeps it.
//!
//! A built registry is immutable. Adding patterns later produces a new
//! registry via [`PatternRegistry::extended`], leaving existing entries (and
//! their [`PatternId`]s) untouched.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::events::ObjectKind;

/// URLs: `http://`, `https://`, `ftp://` or bare `www.` hosts
pub const URL_PATTERN: &str =
    r#"(?i)\b(?:(?:https?|ftp)://|www\.)[^\s<>\[\]"']*[^\s<>\[\]"'.,;:!?)]"#;

/// Keywords recognised as object references, in registration order
pub const OBJECT_KEYWORDS: &[(&str, ObjectKind)] = &[
    ("image", ObjectKind::Image),
    ("dataset", ObjectKind::Dataset),
    ("project", ObjectKind::Project),
    ("protocol", ObjectKind::Protocol),
    ("file", ObjectKind::File),
];

/// Object reference for `keyword`, e.g. `Image: 123`, `image id=4`, `image 7`
pub fn object_pattern(keyword: &str) -> String {
    format!(r"(?i)\b{}\s*(?:id)?\s*[:=]?\s*\d+\b", regex::escape(keyword))
}

/// `[[target]]` or `[[target|label]]`
pub const WIKI_LINK_PATTERN: &str = r"\[\[[^\[\]|]+(?:\|[^\[\]]+)?\]\]";

/// `'''bold'''`
pub const BOLD_PATTERN: &str = r"'''[^']+'''";

/// `''italic''`
pub const ITALIC_PATTERN: &str = r"''[^']+''";

/// What happens when a span claimed by a pattern is clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "kind", rename_all = "snake_case")]
pub enum SelectionAction {
    /// Style only
    #[default]
    None,
    /// Open the matched text in the default browser (single click)
    LaunchUrl,
    /// Select the referenced object (double click, or one click when enabled)
    SelectObject(ObjectKind),
}

/// Index of an entry in its registry. Lower ids have higher priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PatternId(pub usize);

/// Uncompiled pattern description (e.g. from config)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSpec {
    pub name: String,
    pub pattern: String,
    pub style: String,
    #[serde(default)]
    pub action: SelectionAction,
}

impl PatternSpec {
    pub fn new(
        name: impl Into<String>,
        pattern: impl Into<String>,
        style: impl Into<String>,
        action: SelectionAction,
    ) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            style: style.into(),
            action,
        }
    }
}

/// A compiled registry entry
#[derive(Debug, Clone)]
pub struct PatternEntry {
    pub id: PatternId,
    pub name: String,
    pub regex: Regex,
    pub style: String,
    pub action: SelectionAction,
}

/// Errors raised while registering patterns
#[derive(Debug, Clone)]
pub enum RegistryError {
    /// Regex failed to compile
    InvalidPattern { name: String, reason: String },
    /// Name or pattern string already registered
    DuplicatePattern(String),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPattern { name, reason } => {
                write!(f, "invalid pattern '{}': {}", name, reason)
            }
            Self::DuplicatePattern(name) => write!(f, "pattern already registered: {}", name),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Immutable, priority-ordered set of patterns
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    entries: Vec<PatternEntry>,
}

impl PatternRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registry with the stock wiki patterns:
    /// URL → object references → wiki link → bold → italic
    pub fn wiki_defaults() -> Result<Self, RegistryError> {
        let mut builder =
            Self::builder().pattern("url", URL_PATTERN, "url", SelectionAction::LaunchUrl)?;
        for (keyword, kind) in OBJECT_KEYWORDS {
            builder.add_pattern(
                keyword,
                &object_pattern(keyword),
                "object",
                SelectionAction::SelectObject(*kind),
            )?;
        }
        Ok(builder
            .pattern(
                "wiki_link",
                WIKI_LINK_PATTERN,
                "wiki_link",
                SelectionAction::SelectObject(ObjectKind::Link),
            )?
            .pattern("bold", BOLD_PATTERN, "bold", SelectionAction::None)?
            .pattern("italic", ITALIC_PATTERN, "italic", SelectionAction::None)?
            .build())
    }

    /// New registry with `extra` appended after the existing entries.
    ///
    /// Fails without touching `self` if any extra pattern is invalid.
    pub fn extended(&self, extra: &[PatternSpec]) -> Result<Self, RegistryError> {
        let mut builder = RegistryBuilder {
            entries: self.entries.clone(),
        };
        for spec in extra {
            builder.add_spec(spec)?;
        }
        Ok(builder.build())
    }

    pub fn get(&self, id: PatternId) -> Option<&PatternEntry> {
        self.entries.get(id.0)
    }

    pub fn find(&self, name: &str) -> Option<&PatternEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Entries in priority order
    pub fn iter(&self) -> impl Iterator<Item = &PatternEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collects patterns; every addition is validated before it is stored
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<PatternEntry>,
}

impl RegistryBuilder {
    /// Chaining form of [`RegistryBuilder::add_pattern`]
    pub fn pattern(
        mut self,
        name: &str,
        pattern: &str,
        style: &str,
        action: SelectionAction,
    ) -> Result<Self, RegistryError> {
        self.add_pattern(name, pattern, style, action)?;
        Ok(self)
    }

    /// Compile and append a pattern at the lowest priority
    pub fn add_pattern(
        &mut self,
        name: &str,
        pattern: &str,
        style: &str,
        action: SelectionAction,
    ) -> Result<PatternId, RegistryError> {
        if self
            .entries
            .iter()
            .any(|e| e.name == name || e.regex.as_str() == pattern)
        {
            return Err(RegistryError::DuplicatePattern(name.to_string()));
        }

        let regex = Regex::new(pattern).map_err(|e| {
            tracing::warn!("Rejected pattern '{}': {}", name, e);
            RegistryError::InvalidPattern {
                name: name.to_string(),
                reason: e.to_string(),
            }
        })?;

        let id = PatternId(self.entries.len());
        self.entries.push(PatternEntry {
            id,
            name: name.to_string(),
            regex,
            style: style.to_string(),
            action,
        });
        tracing::debug!("Registered pattern '{}' as {:?}", name, id);
        Ok(id)
    }

    pub fn add_spec(&mut self, spec: &PatternSpec) -> Result<PatternId, RegistryError> {
        self.add_pattern(&spec.name, &spec.pattern, &spec.style, spec.action)
    }

    pub fn build(self) -> PatternRegistry {
        PatternRegistry {
            entries: self.entries,
        }
    }
}
