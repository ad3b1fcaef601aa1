//! Search engine state machine.
//!
//! Owns the loaded corpus, the current query and its results, the dropdown
//! open flag, and the selection cursor. All transitions are synchronous;
//! the only async boundary is the one-shot delayed corpus load in
//! [`load_after_delay`].

use std::future::Future;
use std::sync::{Mutex, Weak};
use std::time::Duration;

use crate::record::SearchRecord;

/// Maximum number of results shown for a query.
pub const MAX_RESULTS: usize = 8;

/// Delay before the corpus load fires, so it does not compete with the
/// initial page paint.
pub const LOAD_DELAY: Duration = Duration::from_secs(1);

/// Corpus load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
}

/// Generation token returned by [`SearchEngine::begin_load`]. A completion
/// carrying a superseded token is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken(u64);

/// Errors from the corpus fetch. Failures are silent from the user's
/// perspective; the engine just keeps an empty corpus.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("search corpus fetch failed: {0}")]
    Fetch(String),
}

/// Keys the engine reacts to while the input is focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// What the surrounding UI should do after an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    /// Navigate to the given path.
    Navigate(String),
    /// Remove focus from the input.
    Blur,
}

/// Client-side search state: corpus, query, results, cursor.
#[derive(Debug, Default)]
pub struct SearchEngine {
    load_state: LoadState,
    generation: u64,
    corpus: Vec<SearchRecord>,
    query: String,
    results: Vec<SearchRecord>,
    open: bool,
    cursor: Option<usize>,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchRecord] {
        &self.results
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Selected result index; `None` means no selection.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Start a corpus load. Supersedes any earlier in-flight load.
    pub fn begin_load(&mut self) -> LoadToken {
        self.generation += 1;
        self.load_state = LoadState::Loading;
        LoadToken(self.generation)
    }

    /// Finish a corpus load. Stale tokens are dropped, which suppresses
    /// responses that arrive after a newer load started. A failed fetch
    /// leaves the corpus empty; there is no retry and no user-visible error.
    pub fn complete_load(&mut self, token: LoadToken, result: Result<Vec<SearchRecord>, LoadError>) {
        if token.0 != self.generation {
            tracing::debug!("dropping stale search corpus load");
            return;
        }

        match result {
            Ok(records) => {
                tracing::debug!(records = records.len(), "search corpus loaded");
                self.corpus = records;
            }
            Err(e) => {
                tracing::debug!("search corpus load failed: {e}");
                self.corpus.clear();
            }
        }

        self.load_state = LoadState::Ready;

        // A query typed while the load was in flight gets results now.
        if !self.query.trim().is_empty() {
            self.refilter();
        }
    }

    /// Update the query text, recompute results, and reset the cursor.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();

        if self.query.trim().is_empty() {
            self.results.clear();
            self.open = false;
            self.cursor = None;
            return;
        }

        self.refilter();
        self.open = true;
    }

    /// Handle a key press while the input is focused.
    pub fn key(&mut self, key: Key) -> Action {
        match key {
            // Escape works regardless of dropdown state.
            Key::Escape => {
                self.open = false;
                return Action::Blur;
            }
            _ if !self.open => return Action::None,
            Key::ArrowDown => {
                if !self.results.is_empty() {
                    self.cursor = Some(match self.cursor {
                        Some(i) => (i + 1).min(self.results.len() - 1),
                        None => 0,
                    });
                }
                Action::None
            }
            Key::ArrowUp => {
                self.cursor = match self.cursor {
                    Some(0) | None => None,
                    Some(i) => Some(i - 1),
                };
                Action::None
            }
            Key::Enter => match self.cursor {
                Some(i) => self.commit(i),
                None => Action::None,
            },
        }
    }

    /// Commit the result at `index` (click or Enter): navigate, close,
    /// clear the query.
    pub fn commit(&mut self, index: usize) -> Action {
        let Some(record) = self.results.get(index) else {
            return Action::None;
        };

        let path = record.kind.route(&record.slug);

        self.query.clear();
        self.results.clear();
        self.cursor = None;
        self.open = false;

        Action::Navigate(path)
    }

    /// Pointer hover over a result moves the cursor.
    pub fn hover(&mut self, index: usize) {
        if index < self.results.len() {
            self.cursor = Some(index);
        }
    }

    /// Input regained focus: reopen only when a query is already typed.
    pub fn focus(&mut self) {
        if !self.query.trim().is_empty() {
            self.open = true;
        }
    }

    /// Global modifier+K shortcut: same reopen rule as [`Self::focus`].
    pub fn focus_shortcut(&mut self) {
        self.focus();
    }

    /// Pointer interaction outside the component: close without clearing
    /// the query.
    pub fn dismiss(&mut self) {
        self.open = false;
    }

    fn refilter(&mut self) {
        let lowered = self.query.to_lowercase();
        let terms: Vec<&str> = lowered.split_whitespace().collect();

        self.results = self
            .corpus
            .iter()
            .filter(|record| {
                let title = record.title.to_lowercase();
                let description = record.description.to_lowercase();
                let tags = record
                    .tags
                    .as_ref()
                    .map(|t| t.join(" ").to_lowercase())
                    .unwrap_or_default();

                terms.iter().all(|term| {
                    title.contains(term) || description.contains(term) || tags.contains(term)
                })
            })
            .take(MAX_RESULTS)
            .cloned()
            .collect();

        self.cursor = None;
    }
}

/// Drive the one-shot delayed corpus load against a shared engine.
///
/// Sleeps for `delay`, then runs `fetch` exactly once and installs the
/// outcome. The handle is weak on purpose: if every strong reference to the
/// engine is gone by the time the delay fires or the fetch returns, the
/// update is suppressed instead of touching a torn-down engine.
pub async fn load_after_delay<F, Fut>(engine: Weak<Mutex<SearchEngine>>, delay: Duration, fetch: F)
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<SearchRecord>, LoadError>>,
{
    tokio::time::sleep(delay).await;

    let token = match engine.upgrade() {
        Some(engine) => engine.lock().expect("engine lock poisoned").begin_load(),
        None => return,
    };

    let result = fetch().await;

    if let Some(engine) = engine.upgrade() {
        engine
            .lock()
            .expect("engine lock poisoned")
            .complete_load(token, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordKind;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn record(title: &str, description: &str, tags: &[&str]) -> SearchRecord {
        SearchRecord {
            title: title.to_string(),
            description: description.to_string(),
            slug: title.to_lowercase().replace(' ', "-"),
            kind: RecordKind::Vocabulary,
            category: Some("Layout".to_string()),
            tags: Some(tags.iter().map(|t| t.to_string()).collect()),
        }
    }

    fn loaded_engine(records: Vec<SearchRecord>) -> SearchEngine {
        let mut engine = SearchEngine::new();
        let token = engine.begin_load();
        engine.complete_load(token, Ok(records));
        engine
    }

    fn flex_corpus() -> Vec<SearchRecord> {
        vec![
            record("Flexbox Basics", "intro", &["css"]),
            record("Grid Layout", "flex comparison", &[]),
        ]
    }

    #[test]
    fn matches_terms_across_fields() {
        let mut engine = loaded_engine(flex_corpus());

        engine.set_query("flex");

        let titles: Vec<_> = engine.results().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Flexbox Basics", "Grid Layout"]);
    }

    #[test]
    fn all_terms_must_match() {
        let mut engine = loaded_engine(flex_corpus());

        engine.set_query("flex basics");

        let titles: Vec<_> = engine.results().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Flexbox Basics"]);
    }

    #[test]
    fn matching_is_case_insensitive_and_covers_tags() {
        let mut engine = loaded_engine(flex_corpus());

        engine.set_query("CSS");

        assert_eq!(engine.results().len(), 1);
        assert_eq!(engine.results()[0].title, "Flexbox Basics");
    }

    #[test]
    fn results_capped_at_eight() {
        let corpus: Vec<_> = (0..20)
            .map(|i| record(&format!("Flex {i}"), "", &[]))
            .collect();
        let mut engine = loaded_engine(corpus);

        engine.set_query("flex");

        assert_eq!(engine.results().len(), MAX_RESULTS);
        // Corpus order preserved, no ranking.
        assert_eq!(engine.results()[0].title, "Flex 0");
    }

    #[test]
    fn empty_query_clears_and_closes() {
        let mut engine = loaded_engine(flex_corpus());
        engine.set_query("flex");
        assert!(engine.is_open());

        engine.set_query("   ");

        assert!(!engine.is_open());
        assert!(engine.results().is_empty());
        assert_eq!(engine.cursor(), None);
    }

    #[test]
    fn cursor_resets_when_results_change() {
        let mut engine = loaded_engine(flex_corpus());
        engine.set_query("flex");
        engine.key(Key::ArrowDown);
        assert_eq!(engine.cursor(), Some(0));

        engine.set_query("flex b");

        assert_eq!(engine.cursor(), None);
    }

    #[test]
    fn arrow_down_clamps_at_last_result() {
        let corpus = vec![
            record("Flex A", "", &[]),
            record("Flex B", "", &[]),
            record("Flex C", "", &[]),
        ];
        let mut engine = loaded_engine(corpus);
        engine.set_query("flex");

        engine.key(Key::ArrowDown);
        assert_eq!(engine.cursor(), Some(0));

        engine.key(Key::ArrowDown);
        engine.key(Key::ArrowDown);
        engine.key(Key::ArrowDown);
        assert_eq!(engine.cursor(), Some(2));
    }

    #[test]
    fn arrow_up_clamps_at_none_and_never_wraps() {
        let mut engine = loaded_engine(flex_corpus());
        engine.set_query("flex");

        engine.key(Key::ArrowUp);
        assert_eq!(engine.cursor(), None);

        engine.key(Key::ArrowDown);
        engine.key(Key::ArrowUp);
        assert_eq!(engine.cursor(), None);
    }

    #[test]
    fn enter_without_selection_is_noop() {
        let mut engine = loaded_engine(flex_corpus());
        engine.set_query("flex");

        assert_eq!(engine.key(Key::Enter), Action::None);
        assert!(engine.is_open());
    }

    #[test]
    fn enter_commits_selection_and_clears_query() {
        let mut engine = loaded_engine(flex_corpus());
        engine.set_query("flex");
        engine.key(Key::ArrowDown);

        let action = engine.key(Key::Enter);

        assert_eq!(action, Action::Navigate("/vocabulary/flexbox-basics".into()));
        assert!(!engine.is_open());
        assert_eq!(engine.query(), "");
    }

    #[test]
    fn style_records_route_to_styles() {
        let mut engine = loaded_engine(vec![SearchRecord {
            title: "Terminal".into(),
            description: "green on black".into(),
            slug: "terminal".into(),
            kind: RecordKind::Style,
            category: None,
            tags: None,
        }]);
        engine.set_query("terminal");

        let action = engine.commit(0);

        assert_eq!(action, Action::Navigate("/styles/terminal".into()));
    }

    #[test]
    fn hover_moves_cursor_within_bounds() {
        let mut engine = loaded_engine(flex_corpus());
        engine.set_query("flex");

        engine.hover(1);
        assert_eq!(engine.cursor(), Some(1));

        engine.hover(9);
        assert_eq!(engine.cursor(), Some(1));
    }

    #[test]
    fn escape_closes_without_clearing_query() {
        let mut engine = loaded_engine(flex_corpus());
        engine.set_query("flex");

        let action = engine.key(Key::Escape);

        assert_eq!(action, Action::Blur);
        assert!(!engine.is_open());
        assert_eq!(engine.query(), "flex");
    }

    #[test]
    fn escape_is_safe_with_no_query() {
        let mut engine = SearchEngine::new();

        assert_eq!(engine.key(Key::Escape), Action::Blur);
        assert!(!engine.is_open());
    }

    #[test]
    fn dismiss_keeps_query_text() {
        let mut engine = loaded_engine(flex_corpus());
        engine.set_query("flex");

        engine.dismiss();

        assert!(!engine.is_open());
        assert_eq!(engine.query(), "flex");
    }

    #[test]
    fn focus_shortcut_reopens_only_with_query() {
        let mut engine = loaded_engine(flex_corpus());

        engine.focus_shortcut();
        assert!(!engine.is_open());

        engine.set_query("flex");
        engine.dismiss();
        engine.focus_shortcut();
        assert!(engine.is_open());
    }

    #[test]
    fn failed_load_leaves_corpus_empty() {
        let mut engine = SearchEngine::new();
        let token = engine.begin_load();

        engine.complete_load(token, Err(LoadError::Fetch("500".into())));

        assert_eq!(engine.load_state(), LoadState::Ready);
        engine.set_query("flex");
        assert!(engine.results().is_empty());
    }

    #[test]
    fn stale_load_is_ignored() {
        let mut engine = SearchEngine::new();
        let stale = engine.begin_load();
        let fresh = engine.begin_load();

        engine.complete_load(stale, Ok(flex_corpus()));
        assert_eq!(engine.load_state(), LoadState::Loading);

        engine.complete_load(fresh, Ok(vec![record("Only", "", &[])]));
        engine.set_query("only");
        assert_eq!(engine.results().len(), 1);
    }

    #[test]
    fn query_typed_during_load_gets_results_on_completion() {
        let mut engine = SearchEngine::new();
        let token = engine.begin_load();
        engine.set_query("flex");
        assert!(engine.results().is_empty());

        engine.complete_load(token, Ok(flex_corpus()));

        assert_eq!(engine.results().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_load_installs_corpus() {
        let engine = Arc::new(Mutex::new(SearchEngine::new()));

        load_after_delay(Arc::downgrade(&engine), LOAD_DELAY, || async {
            Ok(flex_corpus())
        })
        .await;

        let mut engine = engine.lock().unwrap();
        assert_eq!(engine.load_state(), LoadState::Ready);
        engine.set_query("flex");
        assert_eq!(engine.results().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_before_delay_suppresses_update() {
        use std::sync::atomic::{AtomicBool, Ordering};

        let engine = Arc::new(Mutex::new(SearchEngine::new()));
        let fetched = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&fetched);
        let task = tokio::spawn(load_after_delay(
            Arc::downgrade(&engine),
            LOAD_DELAY,
            move || {
                flag.store(true, Ordering::SeqCst);
                async { Ok(Vec::new()) }
            },
        ));

        // Last strong handle dropped before the delay fires.
        drop(engine);
        task.await.unwrap();

        assert!(!fetched.load(Ordering::SeqCst));
    }
}
