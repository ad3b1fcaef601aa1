//! Command-line search against the aggregated corpus.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;

use lexicon_content::{FsCorpus, Resolver};
use lexicon_search::{aggregate, load_after_delay, LoadError, SearchEngine};

use crate::config;

/// Run the search command: aggregate the corpus, filter, print matches.
pub async fn run(config_path: &Path, query: &str, locale: &str) -> Result<()> {
    let file_config = config::load(config_path)?;
    let resolver = Resolver::new(FsCorpus::new(&file_config.content.dir));

    let engine = Arc::new(Mutex::new(SearchEngine::new()));

    // No paint to yield to on the command line, so load immediately.
    load_after_delay(Arc::downgrade(&engine), Duration::ZERO, || async {
        aggregate(&resolver, locale).map_err(|e| LoadError::Fetch(e.to_string()))
    })
    .await;

    let mut engine = engine.lock().expect("engine lock poisoned");
    engine.set_query(query);

    if engine.results().is_empty() {
        println!("No results for '{query}'");
        return Ok(());
    }

    for record in engine.results() {
        println!(
            "{:<32} {}  {}",
            record.kind.route(&record.slug),
            record.title,
            record.description
        );
    }

    Ok(())
}
