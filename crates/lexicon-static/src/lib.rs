//! Static site generator for the design vocabulary corpus.
//!
//! Produces one page per `(slug, locale)` pair for every enumerated slug
//! and supported locale, listing index pages, and a per-locale search
//! corpus JSON file.

pub mod builder;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
