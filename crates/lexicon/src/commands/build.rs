//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use lexicon_static::{BuildConfig, StaticBuilder};

use crate::config;

/// Run the build command.
pub fn run(config_path: &Path, output: Option<PathBuf>) -> Result<()> {
    tracing::info!("Building static site...");

    let file_config = config::load(config_path)?;

    let build_config = BuildConfig {
        content_dir: PathBuf::from(&file_config.content.dir),
        output_dir: output.unwrap_or_else(|| PathBuf::from(&file_config.site.output)),
        base_url: file_config.site.base_url,
        title: file_config.site.title,
        locales: file_config.site.locales,
    };

    let result = StaticBuilder::new(build_config).build()?;

    tracing::info!(
        "Built {} pages in {}ms",
        result.pages,
        result.duration_ms
    );
    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
