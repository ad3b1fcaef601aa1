//! Configuration file loading (`lexicon.toml`).

use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

/// Configuration file structure (lexicon.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub server: ServerSettings,
}

/// `[content]` section.
#[derive(Debug, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_content_dir")]
    pub dir: String,
}

/// `[site]` section.
#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
}

/// `[server]` section.
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_content_dir() -> String {
    "content".to_string()
}
fn default_title() -> String {
    "Design Vocabulary".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_locales() -> Vec<String> {
    lexicon_content::SUPPORTED_LOCALES
        .iter()
        .map(|l| l.to_string())
        .collect()
}
fn default_port() -> u16 {
    3000
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            base_url: default_base_url(),
            output: default_output(),
            locales: default_locales(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

/// Load configuration from the given path if it exists, defaults otherwise.
/// A config file that exists but is malformed is an error.
pub fn load(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = load(Path::new("does-not-exist.toml")).unwrap();

        assert_eq!(config.content.dir, "content");
        assert_eq!(config.site.locales, vec!["en", "zh"]);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("lexicon.toml");
        fs::write(&path, "[site]\ntitle = \"My Vocabulary\"\n").unwrap();

        let config = load(&path).unwrap();

        assert_eq!(config.site.title, "My Vocabulary");
        assert_eq!(config.site.output, "dist");
        assert_eq!(config.content.dir, "content");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("lexicon.toml");
        fs::write(&path, "[site\ntitle =").unwrap();

        assert!(load(&path).is_err());
    }
}
