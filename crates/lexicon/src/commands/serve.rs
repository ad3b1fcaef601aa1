//! Content API server command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use lexicon_server::{ServerConfig, SiteServer};

use crate::config;

/// Run the serve command.
pub async fn run(config_path: &Path, port: Option<u16>, open: bool) -> Result<()> {
    let file_config = config::load(config_path)?;

    let output_dir = PathBuf::from(&file_config.site.output);
    let static_dir = output_dir.exists().then_some(output_dir);
    if static_dir.is_none() {
        tracing::warn!("No built site found; serving the content API only. Run 'lexicon build' to generate pages.");
    }

    let server_config = ServerConfig {
        content_dir: PathBuf::from(&file_config.content.dir),
        static_dir,
        port: port.unwrap_or(file_config.server.port),
        host: file_config.server.host.clone(),
    };

    if open {
        let url = format!("http://{}:{}", server_config.host, server_config.port);
        let _ = open::that(&url);
    }

    SiteServer::new(server_config).start().await?;

    Ok(())
}
