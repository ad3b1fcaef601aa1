//! API route handlers.
//!
//! Every handler resolves against the live corpus on each request; there is
//! no caching layer, so content edits are visible immediately.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use lexicon_content::{
    ContentError, Entry, FsCorpus, PageMeta, Resolver, StyleMeta, VocabularyMeta, DEFAULT_LOCALE,
};
use lexicon_search::SearchRecord;

/// Shared request state.
pub struct AppState {
    pub resolver: Resolver<FsCorpus>,
}

/// `?locale=` query parameter, defaulting to `en`.
#[derive(Debug, Deserialize)]
pub struct LocaleQuery {
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

/// API-level error mapping for [`ContentError`].
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl From<ContentError> for ApiError {
    fn from(e: ContentError) -> Self {
        match e {
            ContentError::NotFound { .. } => Self::NotFound(e.to_string()),
            ContentError::Corpus(_) | ContentError::MalformedMetadata { .. } => {
                Self::Internal(e.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(m) => (StatusCode::NOT_FOUND, m),
            Self::Internal(m) => {
                tracing::error!("api error: {m}");
                (StatusCode::INTERNAL_SERVER_ERROR, m)
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// A resolved entry in JSON shape: metadata plus the raw body.
#[derive(Debug, Serialize)]
pub struct EntryResponse<M> {
    pub slug: String,
    pub meta: M,
    pub body: String,
}

impl<M> From<Entry<M>> for EntryResponse<M> {
    fn from(entry: Entry<M>) -> Self {
        Self {
            slug: entry.slug,
            meta: entry.meta,
            body: entry.body,
        }
    }
}

/// `GET /api/search?locale=` - the aggregation endpoint. Any corpus failure
/// is a 500; the client treats non-success as an empty corpus.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<Vec<SearchRecord>>, ApiError> {
    let records = lexicon_search::aggregate(&state.resolver, &query.locale)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(records))
}

/// `GET /api/vocabulary?locale=` - sorted vocabulary listing.
pub async fn vocabulary_listing(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<Vec<VocabularyMeta>>, ApiError> {
    Ok(Json(state.resolver.vocabulary_listing(&query.locale)?))
}

/// `GET /api/vocabulary/{slug}?locale=` - full vocabulary entry.
pub async fn vocabulary_entry(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<EntryResponse<VocabularyMeta>>, ApiError> {
    let entry = state.resolver.vocabulary(&slug, &query.locale)?;
    Ok(Json(entry.into()))
}

/// `GET /api/styles?locale=` - style listing in enumeration order.
pub async fn style_listing(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<Vec<StyleMeta>>, ApiError> {
    Ok(Json(state.resolver.style_listing(&query.locale)?))
}

/// `GET /api/styles/{slug}?locale=` - full style entry.
pub async fn style_entry(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<EntryResponse<StyleMeta>>, ApiError> {
    let entry = state.resolver.style(&slug, &query.locale)?;
    Ok(Json(entry.into()))
}

/// `GET /api/pages/{slug}?locale=` - static page.
pub async fn page_entry(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<EntryResponse<PageMeta>>, ApiError> {
    let entry = state.resolver.page(&slug, &query.locale)?;
    Ok(Json(entry.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn state_with_corpus() -> (tempfile::TempDir, Arc<AppState>) {
        let temp = tempfile::tempdir().unwrap();
        let vocab = temp.path().join("vocabulary");
        let styles = temp.path().join("styles");
        fs::create_dir_all(&vocab).unwrap();
        fs::create_dir_all(&styles).unwrap();

        fs::write(
            vocab.join("flexbox.en.mdx"),
            "---\ntitle: Flexbox\ncategory: Layout\ndescription: flex\n\
             createdAt: \"2024-01-01\"\nupdatedAt: \"2024-01-01\"\n---\n# Flexbox\n",
        )
        .unwrap();
        fs::write(
            styles.join("terminal.en.mdx"),
            "---\ntitle: Terminal\ndescription: green on black\ntags: [retro]\n\
             preview:\n  backgroundColor: \"#000\"\n  textColor: \"#0f0\"\n  fontFamily: monospace\n\
             prompt: terminal look\n---\nbody\n",
        )
        .unwrap();

        let state = Arc::new(AppState {
            resolver: Resolver::new(FsCorpus::new(temp.path())),
        });
        (temp, state)
    }

    fn en() -> Query<LocaleQuery> {
        Query(LocaleQuery {
            locale: "en".to_string(),
        })
    }

    #[tokio::test]
    async fn search_merges_both_kinds() {
        let (_temp, state) = state_with_corpus();

        let Json(records) = search(State(state), en()).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].slug, "flexbox");
        assert_eq!(records[1].slug, "terminal");
    }

    #[tokio::test]
    async fn search_fails_with_500_on_malformed_corpus() {
        let (temp, state) = state_with_corpus();
        fs::write(
            temp.path().join("vocabulary/broken.en.mdx"),
            "---\ntitle: [oops\n---\nbody",
        )
        .unwrap();

        let err = search(State(state), en()).await.unwrap_err();

        assert!(matches!(err, ApiError::Internal(_)));
        let status = err.into_response().status();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn vocabulary_entry_resolves_with_fallback() {
        let (_temp, state) = state_with_corpus();

        let Json(entry) = vocabulary_entry(
            State(state),
            Path("flexbox".to_string()),
            Query(LocaleQuery {
                locale: "zh".to_string(),
            }),
        )
        .await
        .unwrap();

        // No zh variant on disk: the en file serves the request.
        assert_eq!(entry.meta.title, "Flexbox");
        assert_eq!(entry.slug, "flexbox");
    }

    #[tokio::test]
    async fn missing_entry_is_404() {
        let (_temp, state) = state_with_corpus();

        let err = vocabulary_entry(State(state), Path("missing".to_string()), en())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn style_entry_includes_preview() {
        let (_temp, state) = state_with_corpus();

        let Json(entry) = style_entry(State(state), Path("terminal".to_string()), en())
            .await
            .unwrap();

        assert_eq!(entry.meta.preview.background_color, "#000");
    }
}
