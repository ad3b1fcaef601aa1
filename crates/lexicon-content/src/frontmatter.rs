//! Front-matter extraction and parsing.
//!
//! Content files open with a `---`-fenced YAML block followed by the raw
//! body. Every content kind requires front-matter (a title at minimum), so
//! a missing block is an error here rather than an `Option`.

use serde::de::DeserializeOwned;

/// Errors that can occur when parsing front-matter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("missing front-matter block")]
    Missing,

    #[error("unclosed front-matter block - missing closing ---")]
    Unclosed,

    #[error("invalid YAML in front-matter: {0}")]
    InvalidYaml(String),
}

/// Split a document into its raw YAML header and body.
pub fn split(source: &str) -> Result<(&str, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    if !trimmed.starts_with("---") {
        return Err(FrontmatterError::Missing);
    }

    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml = after_open[..close_pos].trim();
    let body = after_open[close_pos + 4..].trim_start();

    Ok((yaml, body))
}

/// Parse the front-matter into a typed metadata struct, returning the
/// metadata and the remaining body.
pub fn parse<M: DeserializeOwned>(source: &str) -> Result<(M, &str), FrontmatterError> {
    let (yaml, body) = split(source)?;

    let meta: M =
        serde_yaml::from_str(yaml).map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?;

    Ok((meta, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::{Difficulty, VocabularyMeta};
    use pretty_assertions::assert_eq;

    const FLEXBOX: &str = r#"---
title: Flexbox
category: Layout
difficulty: Easy
description: One-dimensional layout model
createdAt: "2024-01-10"
updatedAt: "2024-02-01"
---

# Flexbox

Body text.
"#;

    #[test]
    fn parses_typed_frontmatter() {
        let (meta, body) = parse::<VocabularyMeta>(FLEXBOX).unwrap();

        assert_eq!(meta.title, "Flexbox");
        assert_eq!(meta.category, "Layout");
        assert_eq!(meta.difficulty, Difficulty::Easy);
        assert!(body.starts_with("# Flexbox"));
    }

    #[test]
    fn errors_on_missing_frontmatter() {
        let result = split("# Just Markdown\n\nNo front-matter here.");

        assert!(matches!(result, Err(FrontmatterError::Missing)));
    }

    #[test]
    fn errors_on_unclosed_frontmatter() {
        let result = split("---\ntitle: Test\n# No closing");

        assert!(matches!(result, Err(FrontmatterError::Unclosed)));
    }

    #[test]
    fn errors_on_invalid_yaml() {
        let result = parse::<VocabularyMeta>("---\ntitle: [invalid yaml\n---\n");

        assert!(matches!(result, Err(FrontmatterError::InvalidYaml(_))));
    }

    #[test]
    fn errors_on_missing_required_field() {
        let result = parse::<VocabularyMeta>("---\ntitle: Orphan\n---\nbody");

        assert!(matches!(result, Err(FrontmatterError::InvalidYaml(_))));
    }
}
