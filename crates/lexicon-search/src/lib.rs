//! In-memory search index and keyboard-driven query engine.
//!
//! The search corpus is fetched once per session from the aggregation
//! endpoint and filtered synchronously on every keystroke; no per-keystroke
//! network round-trip and no debounce is needed. The engine itself is a
//! plain state object so filtering and navigation can be tested without any
//! rendering layer.

pub mod engine;
pub mod record;

pub use engine::{
    load_after_delay, Action, Key, LoadError, LoadState, LoadToken, SearchEngine, LOAD_DELAY,
    MAX_RESULTS,
};
pub use record::{aggregate, RecordKind, SearchRecord};
