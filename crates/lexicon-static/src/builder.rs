//! Static site builder.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use rayon::prelude::*;

use lexicon_content::{ContentError, ContentKind, FsCorpus, Resolver, SUPPORTED_LOCALES};

use crate::templates::{EntryContext, ListingContext, ListingItem, TemplateEngine};

/// Configuration for building the static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Content corpus root (holds `vocabulary/`, `styles/`, `pages/`)
    pub content_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Base URL for the site
    pub base_url: String,

    /// Site title
    pub title: String,

    /// Locales to generate pages for
    pub locales: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            output_dir: PathBuf::from("dist"),
            base_url: "/".to_string(),
            title: "Design Vocabulary".to_string(),
            locales: SUPPORTED_LOCALES.iter().map(|l| l.to_string()).collect(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// One page to generate.
#[derive(Debug, Clone)]
enum PageJob {
    VocabularyEntry { slug: String, locale: String },
    StyleEntry { slug: String, locale: String },
    Page { slug: String, locale: String },
    VocabularyIndex { locale: String },
    StyleIndex { locale: String },
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    resolver: Resolver<FsCorpus>,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        let resolver = Resolver::new(FsCorpus::new(&config.content_dir));
        Self {
            config,
            resolver,
            templates: TemplateEngine::new(),
        }
    }

    /// Build the static site.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let jobs = self.plan_jobs()?;

        // Render and write pages in parallel. A job whose fallback chain
        // resolves to no file is skipped, not an error.
        let results: Vec<Result<Option<String>, BuildError>> =
            jobs.par_iter().map(|job| self.build_job(job)).collect();

        let mut urls = Vec::new();
        for result in results {
            if let Some(url) = result? {
                urls.push(url);
            }
        }

        for locale in &self.config.locales {
            self.write_search_index(locale)?;
        }

        self.write_sitemap(&urls)?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: urls.len(),
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Enumerate every page the site needs: one per `(slug, locale)` pair
    /// for each content kind, plus listing indexes per locale.
    fn plan_jobs(&self) -> Result<Vec<PageJob>, BuildError> {
        let vocabulary = self.resolver.enumerate_slugs(ContentKind::Vocabulary)?;
        let styles = self.resolver.enumerate_slugs(ContentKind::Style)?;
        let pages = self.resolver.enumerate_slugs(ContentKind::Page)?;

        let mut jobs = Vec::new();

        for locale in &self.config.locales {
            jobs.push(PageJob::VocabularyIndex {
                locale: locale.clone(),
            });
            jobs.push(PageJob::StyleIndex {
                locale: locale.clone(),
            });

            for slug in &vocabulary {
                jobs.push(PageJob::VocabularyEntry {
                    slug: slug.clone(),
                    locale: locale.clone(),
                });
            }
            for slug in &styles {
                jobs.push(PageJob::StyleEntry {
                    slug: slug.clone(),
                    locale: locale.clone(),
                });
            }
            for slug in &pages {
                jobs.push(PageJob::Page {
                    slug: slug.clone(),
                    locale: locale.clone(),
                });
            }
        }

        Ok(jobs)
    }

    /// Build one page. Returns the page URL, or `None` when the slug has no
    /// file for this locale's fallback chain.
    fn build_job(&self, job: &PageJob) -> Result<Option<String>, BuildError> {
        match job {
            PageJob::VocabularyEntry { slug, locale } => {
                let entry = match self.resolver.vocabulary(slug, locale) {
                    Ok(entry) => entry,
                    Err(ContentError::NotFound { .. }) => {
                        tracing::debug!("skipping vocabulary/{slug} for locale {locale}");
                        return Ok(None);
                    }
                    Err(e) => return Err(e.into()),
                };

                let ctx = EntryContext {
                    title: entry.meta.title.clone(),
                    site_title: self.config.title.clone(),
                    content: render_markdown(&entry.body),
                    locale: locale.clone(),
                    base_url: self.config.base_url.clone(),
                    subtitle: entry.meta.subtitle.clone(),
                    category: Some(entry.meta.category.clone()),
                    difficulty: Some(format!("{:?}", entry.meta.difficulty)),
                    tags: entry.meta.tags.clone(),
                    prompt: None,
                };

                let url = format!("{locale}/vocabulary/{slug}/");
                self.render_and_write(&url, &ctx)?;
                Ok(Some(url))
            }

            PageJob::StyleEntry { slug, locale } => {
                let entry = match self.resolver.style(slug, locale) {
                    Ok(entry) => entry,
                    Err(ContentError::NotFound { .. }) => {
                        tracing::debug!("skipping styles/{slug} for locale {locale}");
                        return Ok(None);
                    }
                    Err(e) => return Err(e.into()),
                };

                let ctx = EntryContext {
                    title: entry.meta.title.clone(),
                    site_title: self.config.title.clone(),
                    content: render_markdown(&entry.body),
                    locale: locale.clone(),
                    base_url: self.config.base_url.clone(),
                    subtitle: None,
                    category: None,
                    difficulty: None,
                    tags: entry.meta.tags.clone(),
                    prompt: Some(entry.meta.prompt.clone()),
                };

                let url = format!("{locale}/styles/{slug}/");
                self.render_and_write(&url, &ctx)?;
                Ok(Some(url))
            }

            PageJob::Page { slug, locale } => {
                let entry = match self.resolver.page(slug, locale) {
                    Ok(entry) => entry,
                    Err(ContentError::NotFound { .. }) => {
                        tracing::debug!("skipping pages/{slug} for locale {locale}");
                        return Ok(None);
                    }
                    Err(e) => return Err(e.into()),
                };

                let ctx = EntryContext {
                    title: entry.meta.title.clone(),
                    site_title: self.config.title.clone(),
                    content: render_markdown(&entry.body),
                    locale: locale.clone(),
                    base_url: self.config.base_url.clone(),
                    subtitle: None,
                    category: None,
                    difficulty: None,
                    tags: Vec::new(),
                    prompt: None,
                };

                let url = format!("{locale}/{slug}/");
                self.render_and_write(&url, &ctx)?;
                Ok(Some(url))
            }

            PageJob::VocabularyIndex { locale } => {
                let listing = self.resolver.vocabulary_listing(locale)?;

                let ctx = ListingContext {
                    title: "Vocabulary".to_string(),
                    site_title: self.config.title.clone(),
                    locale: locale.clone(),
                    base_url: self.config.base_url.clone(),
                    items: listing
                        .iter()
                        .map(|m| ListingItem::vocabulary(m, &self.config.base_url, locale))
                        .collect(),
                };

                let url = format!("{locale}/vocabulary/");
                let html = self
                    .templates
                    .render_listing(&ctx)
                    .map_err(|e| BuildError::TemplateError(e.to_string()))?;
                self.write_page(&url, &html)?;
                Ok(Some(url))
            }

            PageJob::StyleIndex { locale } => {
                let listing = self.resolver.style_listing(locale)?;

                let ctx = ListingContext {
                    title: "Styles".to_string(),
                    site_title: self.config.title.clone(),
                    locale: locale.clone(),
                    base_url: self.config.base_url.clone(),
                    items: listing
                        .iter()
                        .map(|m| ListingItem::style(m, &self.config.base_url, locale))
                        .collect(),
                };

                let url = format!("{locale}/styles/");
                let html = self
                    .templates
                    .render_listing(&ctx)
                    .map_err(|e| BuildError::TemplateError(e.to_string()))?;
                self.write_page(&url, &html)?;
                Ok(Some(url))
            }
        }
    }

    fn render_and_write(&self, url: &str, ctx: &EntryContext) -> Result<(), BuildError> {
        let html = self
            .templates
            .render_entry(ctx)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;
        self.write_page(url, &html)
    }

    fn write_page(&self, url: &str, html: &str) -> Result<(), BuildError> {
        let dir = self.config.output_dir.join(url);
        fs::create_dir_all(&dir).map_err(|e| BuildError::WriteError(e.to_string()))?;
        fs::write(dir.join("index.html"), html).map_err(|e| BuildError::WriteError(e.to_string()))
    }

    /// Write the aggregated search corpus for a locale.
    fn write_search_index(&self, locale: &str) -> Result<(), BuildError> {
        let records = lexicon_search::aggregate(&self.resolver, locale)?;

        let json = serde_json::to_string_pretty(&records)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(
            self.config
                .output_dir
                .join(format!("search-index.{locale}.json")),
            json,
        )
        .map_err(|e| BuildError::WriteError(e.to_string()))
    }

    /// Generate sitemap.xml and robots.txt.
    fn write_sitemap(&self, urls: &[String]) -> Result<(), BuildError> {
        let entries: Vec<String> = urls
            .iter()
            .map(|url| {
                format!(
                    "  <url>\n    <loc>{}{}</loc>\n  </url>",
                    self.config.base_url, url
                )
            })
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            entries.join("\n")
        );

        fs::write(self.config.output_dir.join("sitemap.xml"), sitemap)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let robots = format!(
            "User-agent: *\nAllow: /\nSitemap: {}sitemap.xml",
            self.config.base_url
        );
        fs::write(self.config.output_dir.join("robots.txt"), robots)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }
}

/// Render a markdown body to HTML.
fn render_markdown(content: &str) -> String {
    use pulldown_cmark::{html, Options, Parser};

    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(content, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_corpus(root: &Path) {
        let vocab = root.join("vocabulary");
        let styles = root.join("styles");
        let pages = root.join("pages");
        fs::create_dir_all(vocab.join("layout")).unwrap();
        fs::create_dir_all(&styles).unwrap();
        fs::create_dir_all(&pages).unwrap();

        fs::write(
            vocab.join("layout/flexbox.en.mdx"),
            "---\ntitle: Flexbox\ncategory: Layout\ndescription: flex\n\
             createdAt: \"2024-01-01\"\nupdatedAt: \"2024-01-01\"\n---\n# Flexbox\n",
        )
        .unwrap();
        fs::write(
            vocab.join("layout/flexbox.zh.mdx"),
            "---\ntitle: 弹性盒子\ncategory: Layout\ndescription: flex\n\
             createdAt: \"2024-01-01\"\nupdatedAt: \"2024-01-01\"\n---\n# 弹性盒子\n",
        )
        .unwrap();
        // zh-only entry: must be skipped when building the en tree.
        fs::write(
            vocab.join("zh-only.zh.mdx"),
            "---\ntitle: 仅中文\ncategory: Color\ndescription: zh only\n\
             createdAt: \"2024-02-01\"\nupdatedAt: \"2024-02-01\"\n---\nbody\n",
        )
        .unwrap();
        fs::write(
            styles.join("terminal.en.mdx"),
            "---\ntitle: Terminal\ndescription: green on black\ntags: [retro]\n\
             preview:\n  backgroundColor: \"#000\"\n  textColor: \"#0f0\"\n  fontFamily: monospace\n\
             prompt: terminal look\n---\nbody\n",
        )
        .unwrap();
        fs::write(
            pages.join("about.mdx"),
            "---\ntitle: About\ndescription: about this site\nupdatedAt: \"2024-05-01\"\n---\nHi.\n",
        )
        .unwrap();
    }

    #[test]
    fn builds_pages_for_every_locale() {
        let temp = tempfile::tempdir().unwrap();
        let content = temp.path().join("content");
        let out = temp.path().join("dist");
        write_corpus(&content);

        let builder = StaticBuilder::new(BuildConfig {
            content_dir: content,
            output_dir: out.clone(),
            ..Default::default()
        });
        let result = builder.build().unwrap();

        assert!(out.join("en/vocabulary/flexbox/index.html").exists());
        assert!(out.join("zh/vocabulary/flexbox/index.html").exists());
        // en falls back for style and page content authored once.
        assert!(out.join("zh/styles/terminal/index.html").exists());
        assert!(out.join("zh/about/index.html").exists());
        // zh-only entries are skipped in the en tree, not errors.
        assert!(!out.join("en/vocabulary/zh-only/index.html").exists());
        assert!(out.join("zh/vocabulary/zh-only/index.html").exists());
        assert!(result.pages > 0);
    }

    #[test]
    fn localized_page_uses_locale_file() {
        let temp = tempfile::tempdir().unwrap();
        let content = temp.path().join("content");
        let out = temp.path().join("dist");
        write_corpus(&content);

        let builder = StaticBuilder::new(BuildConfig {
            content_dir: content,
            output_dir: out.clone(),
            ..Default::default()
        });
        builder.build().unwrap();

        let zh = fs::read_to_string(out.join("zh/vocabulary/flexbox/index.html")).unwrap();
        assert!(zh.contains("弹性盒子"));
    }

    #[test]
    fn writes_search_index_per_locale() {
        let temp = tempfile::tempdir().unwrap();
        let content = temp.path().join("content");
        let out = temp.path().join("dist");
        write_corpus(&content);

        let builder = StaticBuilder::new(BuildConfig {
            content_dir: content,
            output_dir: out.clone(),
            ..Default::default()
        });
        builder.build().unwrap();

        let index = fs::read_to_string(out.join("search-index.en.json")).unwrap();
        assert!(index.contains("Flexbox"));
        assert!(index.contains("Terminal"));

        let index = fs::read_to_string(out.join("search-index.zh.json")).unwrap();
        assert!(index.contains("弹性盒子"));
    }

    #[test]
    fn writes_sitemap_and_robots() {
        let temp = tempfile::tempdir().unwrap();
        let content = temp.path().join("content");
        let out = temp.path().join("dist");
        write_corpus(&content);

        let builder = StaticBuilder::new(BuildConfig {
            content_dir: content,
            output_dir: out.clone(),
            ..Default::default()
        });
        builder.build().unwrap();

        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("/en/vocabulary/flexbox/"));
        assert!(out.join("robots.txt").exists());
    }

    #[test]
    fn listing_page_orders_by_category() {
        let temp = tempfile::tempdir().unwrap();
        let content = temp.path().join("content");
        let out = temp.path().join("dist");
        write_corpus(&content);
        fs::write(
            content.join("vocabulary/palette.en.mdx"),
            "---\ntitle: Palette\ncategory: Color\ndescription: colors\n\
             createdAt: \"2024-03-01\"\nupdatedAt: \"2024-03-01\"\n---\nbody\n",
        )
        .unwrap();

        let builder = StaticBuilder::new(BuildConfig {
            content_dir: content,
            output_dir: out.clone(),
            ..Default::default()
        });
        builder.build().unwrap();

        let index = fs::read_to_string(out.join("en/vocabulary/index.html")).unwrap();
        let flexbox_pos = index.find("Flexbox").unwrap();
        let palette_pos = index.find("Palette").unwrap();
        assert!(flexbox_pos < palette_pos, "Layout must sort before Color");
    }
}
