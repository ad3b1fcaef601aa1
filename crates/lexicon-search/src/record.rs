//! Flattened search records and corpus aggregation.

use serde::{Deserialize, Serialize};

use lexicon_content::{ContentError, CorpusAccessor, Resolver};

/// Which content kind a record points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Vocabulary,
    Style,
}

impl RecordKind {
    /// Route a committed result navigates to.
    pub fn route(&self, slug: &str) -> String {
        match self {
            Self::Vocabulary => format!("/vocabulary/{slug}"),
            Self::Style => format!("/styles/{slug}"),
        }
    }
}

/// One searchable record, flattened from vocabulary or style metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecord {
    pub title: String,
    pub description: String,
    pub slug: String,

    #[serde(rename = "type")]
    pub kind: RecordKind,

    /// Vocabulary records only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Flatten vocabulary and style metadata into one searchable list,
/// vocabulary first, preserving listing order.
pub fn aggregate<A: CorpusAccessor>(
    resolver: &Resolver<A>,
    locale: &str,
) -> Result<Vec<SearchRecord>, ContentError> {
    let vocabulary = resolver.vocabulary_listing(locale)?;
    let styles = resolver.style_listing(locale)?;

    let mut records = Vec::with_capacity(vocabulary.len() + styles.len());

    for meta in vocabulary {
        records.push(SearchRecord {
            title: meta.title,
            description: meta.description,
            slug: meta.slug,
            kind: RecordKind::Vocabulary,
            category: Some(meta.category),
            tags: Some(meta.tags),
        });
    }

    for meta in styles {
        records.push(SearchRecord {
            title: meta.title,
            description: meta.description,
            slug: meta.slug,
            kind: RecordKind::Style,
            category: None,
            tags: Some(meta.tags),
        });
    }

    Ok(records)
}
