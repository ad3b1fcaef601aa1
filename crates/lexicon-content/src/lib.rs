//! Locale-aware content resolver for the design vocabulary corpus.
//!
//! This crate maps `(kind, slug, locale)` triples to content records backed
//! by a file corpus of front-matter-headed MDX documents. It provides slug
//! enumeration for static path generation and sorted metadata listings for
//! index pages.

pub mod corpus;
pub mod frontmatter;
pub mod meta;
pub mod resolver;

pub use corpus::{CorpusAccessor, CorpusError, FsCorpus, MemoryCorpus};
pub use frontmatter::FrontmatterError;
pub use meta::{
    category_priority, ContentKind, Difficulty, PageMeta, StyleMeta, StylePreview, VocabularyMeta,
};
pub use resolver::{ContentError, Entry, Resolver, DEFAULT_LOCALE, SUPPORTED_LOCALES};
