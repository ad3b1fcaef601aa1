//! Typed front-matter metadata per content kind.

use serde::{Deserialize, Serialize};

/// The three kinds of content the corpus holds, each with its own root
/// directory and metadata schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Vocabulary,
    Style,
    Page,
}

impl ContentKind {
    /// Directory name under the content root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Vocabulary => "vocabulary",
            Self::Style => "styles",
            Self::Page => "pages",
        }
    }
}

/// Reading difficulty of a vocabulary entry. Absent front-matter defaults
/// to `Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Display priority of a vocabulary category. Lower sorts first; categories
/// not in the table sort last.
pub fn category_priority(category: &str) -> u32 {
    match category {
        "Layout" => 1,
        "Components" => 2,
        "Typography" => 3,
        "Color" => 4,
        "Animation" => 5,
        "Responsive" => 6,
        _ => 99,
    }
}

/// Front-matter of a vocabulary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyMeta {
    /// Locale-independent identifier, set from the requested slug rather
    /// than the front-matter.
    #[serde(skip_deserializing)]
    pub slug: String,

    pub title: String,

    #[serde(default)]
    pub subtitle: Option<String>,

    /// Free-form category name, e.g. "Layout" or "Typography".
    pub category: String,

    #[serde(default)]
    pub difficulty: Difficulty,

    #[serde(default)]
    pub tags: Vec<String>,

    pub description: String,

    /// ISO-8601 date string.
    pub created_at: String,

    /// ISO-8601 date string.
    pub updated_at: String,

    /// Explicit ordering within a category; lower sorts first.
    #[serde(default)]
    pub priority: Option<f64>,
}

/// Color palette shown on a style card before the full entry is opened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylePreview {
    pub background_color: String,
    pub text_color: String,
    pub font_family: String,

    #[serde(default)]
    pub accent_color: Option<String>,

    #[serde(default)]
    pub secondary_color: Option<String>,

    #[serde(default)]
    pub border_color: Option<String>,

    #[serde(default)]
    pub border_radius: Option<String>,
}

/// Front-matter of a style entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleMeta {
    #[serde(skip_deserializing)]
    pub slug: String,

    pub title: String,

    pub description: String,

    #[serde(default)]
    pub tags: Vec<String>,

    pub preview: StylePreview,

    /// Prompt text a reader can copy to reproduce the style.
    pub prompt: String,
}

/// Front-matter of a static page (about, imprint, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub title: String,

    pub description: String,

    /// ISO-8601 date string.
    pub updated_at: String,
}
