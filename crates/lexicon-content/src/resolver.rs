//! Locale-fallback content resolution.
//!
//! Maps `(kind, slug, locale)` to a content record by probing an ordered
//! chain of filename candidates against the corpus:
//!
//! 1. `{slug}.{locale}.mdx`
//! 2. `{slug}.mdx` (locale-neutral)
//! 3. `{slug}.en.mdx`
//!
//! The chain is identical for every content kind. Matching is by file name
//! only; directory structure inside a corpus root does not affect slugs or
//! lookup. Resolution is stateless: every call re-reads and re-parses the
//! file.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::corpus::{CorpusAccessor, CorpusError};
use crate::frontmatter;
use crate::meta::{category_priority, ContentKind, PageMeta, StyleMeta, VocabularyMeta};

/// Closed set of supported locales. Static path generation enumerates this
/// set explicitly.
pub const SUPPORTED_LOCALES: &[&str] = &["en", "zh"];

/// Locale used when none is requested and as the final fallback.
pub const DEFAULT_LOCALE: &str = "en";

static LOCALE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\.en|\.zh)?\.mdx$").expect("valid locale suffix pattern"));

/// A resolved content record: requested slug, typed metadata, raw body.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<M> {
    pub slug: String,
    pub meta: M,
    pub body: String,
}

/// Errors surfaced by content resolution.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("content not found: {kind:?} '{slug}' (locale: {locale})")]
    NotFound {
        kind: ContentKind,
        slug: String,
        locale: String,
    },

    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error("malformed metadata in {path}: {message}")]
    MalformedMetadata { path: String, message: String },
}

/// Post-deserialization hook for metadata types: inject the requested slug
/// and validate fields the YAML layer cannot check.
trait FrontMatter: DeserializeOwned {
    fn finish(&mut self, slug: &str) -> Result<(), String>;
}

impl FrontMatter for VocabularyMeta {
    fn finish(&mut self, slug: &str) -> Result<(), String> {
        self.slug = slug.to_string();
        if let Some(priority) = self.priority {
            if !priority.is_finite() {
                return Err(format!("priority must be a finite number, got {priority}"));
            }
        }
        Ok(())
    }
}

impl FrontMatter for StyleMeta {
    fn finish(&mut self, slug: &str) -> Result<(), String> {
        self.slug = slug.to_string();
        Ok(())
    }
}

impl FrontMatter for PageMeta {
    fn finish(&mut self, _slug: &str) -> Result<(), String> {
        Ok(())
    }
}

/// Content resolver over an injected corpus accessor.
pub struct Resolver<A: CorpusAccessor> {
    corpus: A,
}

impl<A: CorpusAccessor> Resolver<A> {
    pub fn new(corpus: A) -> Self {
        Self { corpus }
    }

    /// Resolve a vocabulary entry.
    pub fn vocabulary(
        &self,
        slug: &str,
        locale: &str,
    ) -> Result<Entry<VocabularyMeta>, ContentError> {
        self.load(ContentKind::Vocabulary, slug, locale)
    }

    /// Resolve a style entry.
    pub fn style(&self, slug: &str, locale: &str) -> Result<Entry<StyleMeta>, ContentError> {
        self.load(ContentKind::Style, slug, locale)
    }

    /// Resolve a static page.
    pub fn page(&self, slug: &str, locale: &str) -> Result<Entry<PageMeta>, ContentError> {
        self.load(ContentKind::Page, slug, locale)
    }

    /// All unique slugs for a kind, sorted. Multiple locale variants of the
    /// same base name collapse to one slug; non-`.mdx` files are ignored.
    pub fn enumerate_slugs(&self, kind: ContentKind) -> Result<Vec<String>, ContentError> {
        let mut slugs = BTreeSet::new();

        for path in self.corpus.list_files(kind)? {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.ends_with(".mdx") {
                continue;
            }
            slugs.insert(LOCALE_SUFFIX.replace(name, "").into_owned());
        }

        Ok(slugs.into_iter().collect())
    }

    /// Vocabulary metadata for every slug, sorted by category priority, then
    /// explicit priority (entries that declare one first, lower first), then
    /// creation date descending. Slugs whose fallback chain resolves to no
    /// file are skipped silently.
    pub fn vocabulary_listing(&self, locale: &str) -> Result<Vec<VocabularyMeta>, ContentError> {
        let mut entries = Vec::new();

        for slug in self.enumerate_slugs(ContentKind::Vocabulary)? {
            match self.vocabulary(&slug, locale) {
                Ok(entry) => entries.push(entry.meta),
                Err(ContentError::NotFound { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        entries.sort_by(compare_vocabulary);
        Ok(entries)
    }

    /// Style metadata for every slug, in enumeration order. Missing fallback
    /// files are skipped silently, as in [`Self::vocabulary_listing`].
    pub fn style_listing(&self, locale: &str) -> Result<Vec<StyleMeta>, ContentError> {
        let mut entries = Vec::new();

        for slug in self.enumerate_slugs(ContentKind::Style)? {
            match self.style(&slug, locale) {
                Ok(entry) => entries.push(entry.meta),
                Err(ContentError::NotFound { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(entries)
    }

    fn locate(
        &self,
        kind: ContentKind,
        slug: &str,
        locale: &str,
    ) -> Result<Option<PathBuf>, CorpusError> {
        let files = self.corpus.list_files(kind)?;
        let candidates = [
            format!("{slug}.{locale}.mdx"),
            format!("{slug}.mdx"),
            format!("{slug}.{DEFAULT_LOCALE}.mdx"),
        ];

        for candidate in &candidates {
            let found = files
                .iter()
                .find(|f| f.file_name().and_then(|n| n.to_str()) == Some(candidate.as_str()));
            if let Some(path) = found {
                return Ok(Some(path.clone()));
            }
        }

        Ok(None)
    }

    fn load<M: FrontMatter>(
        &self,
        kind: ContentKind,
        slug: &str,
        locale: &str,
    ) -> Result<Entry<M>, ContentError> {
        let path = self
            .locate(kind, slug, locale)?
            .ok_or_else(|| ContentError::NotFound {
                kind,
                slug: slug.to_string(),
                locale: locale.to_string(),
            })?;

        let source = self.corpus.read_file(&path)?;

        let (mut meta, body) =
            frontmatter::parse::<M>(&source).map_err(|e| ContentError::MalformedMetadata {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        meta.finish(slug)
            .map_err(|message| ContentError::MalformedMetadata {
                path: path.display().to_string(),
                message,
            })?;

        Ok(Entry {
            slug: slug.to_string(),
            meta,
            body: body.to_string(),
        })
    }
}

fn compare_vocabulary(a: &VocabularyMeta, b: &VocabularyMeta) -> Ordering {
    category_priority(&a.category)
        .cmp(&category_priority(&b.category))
        .then_with(|| match (a.priority, b.priority) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| b.created_at.cmp(&a.created_at))
}
