//! Template engine for rendering site pages.

use minijinja::{context, Environment};

use lexicon_content::{StyleMeta, VocabularyMeta};

/// Context for rendering an entry page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct EntryContext {
    /// Page title
    pub title: String,
    /// Site title
    pub site_title: String,
    /// Rendered body HTML
    pub content: String,
    /// Locale of the rendered page
    pub locale: String,
    /// Base URL
    pub base_url: String,
    /// Optional subtitle line
    pub subtitle: Option<String>,
    /// Category and difficulty labels (vocabulary pages)
    pub category: Option<String>,
    pub difficulty: Option<String>,
    /// Tag list shown under the title
    pub tags: Vec<String>,
    /// Copyable prompt text (style pages)
    pub prompt: Option<String>,
}

/// Context for rendering a listing index page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ListingContext {
    pub title: String,
    pub site_title: String,
    pub locale: String,
    pub base_url: String,
    pub items: Vec<ListingItem>,
}

/// One card on a listing page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ListingItem {
    pub title: String,
    pub description: String,
    pub path: String,
    pub category: Option<String>,
    pub difficulty: Option<String>,
}

impl ListingItem {
    pub fn vocabulary(meta: &VocabularyMeta, base_url: &str, locale: &str) -> Self {
        Self {
            title: meta.title.clone(),
            description: meta.description.clone(),
            path: format!("{base_url}{locale}/vocabulary/{}/", meta.slug),
            category: Some(meta.category.clone()),
            difficulty: Some(format!("{:?}", meta.difficulty)),
        }
    }

    pub fn style(meta: &StyleMeta, base_url: &str, locale: &str) -> Self {
        Self {
            title: meta.title.clone(),
            description: meta.description.clone(),
            path: format!("{base_url}{locale}/styles/{}/", meta.slug),
            category: None,
            difficulty: None,
        }
    }
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned("base.html".to_string(), BASE_TEMPLATE.to_string())
            .expect("Failed to add base template");

        env.add_template_owned("entry.html".to_string(), ENTRY_TEMPLATE.to_string())
            .expect("Failed to add entry template");

        env.add_template_owned("listing.html".to_string(), LISTING_TEMPLATE.to_string())
            .expect("Failed to add listing template");

        Self { env }
    }

    /// Render an entry page.
    pub fn render_entry(&self, ctx: &EntryContext) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("entry.html")?;

        tmpl.render(context! {
            title => &ctx.title,
            site_title => &ctx.site_title,
            content => &ctx.content,
            locale => &ctx.locale,
            base_url => &ctx.base_url,
            subtitle => &ctx.subtitle,
            category => &ctx.category,
            difficulty => &ctx.difficulty,
            tags => &ctx.tags,
            prompt => &ctx.prompt,
        })
    }

    /// Render a listing index page.
    pub fn render_listing(&self, ctx: &ListingContext) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("listing.html")?;

        tmpl.render(context! {
            title => &ctx.title,
            site_title => &ctx.site_title,
            content => "",
            locale => &ctx.locale,
            base_url => &ctx.base_url,
            items => &ctx.items,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ locale }}">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} - {{ site_title }}</title>
</head>
<body>
  <header class="site-header">
    <a href="{{ base_url }}{{ locale }}/" class="site-logo">{{ site_title }}</a>
  </header>
  <main class="main">
    {% block content %}{% endblock %}
  </main>
</body>
</html>"##;

const ENTRY_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="entry">
  <header>
    <h1>{{ title }}</h1>
    {% if subtitle %}<p class="subtitle">{{ subtitle }}</p>{% endif %}
    {% if category %}<span class="category">{{ category }}</span>{% endif %}
    {% if difficulty %}<span class="difficulty">{{ difficulty }}</span>{% endif %}
    {% if tags %}
    <ul class="tags">
      {% for tag in tags %}<li>{{ tag }}</li>{% endfor %}
    </ul>
    {% endif %}
  </header>
  <div class="content">
    {{ content | safe }}
  </div>
  {% if prompt %}
  <section class="prompt">
    <h2>Prompt</h2>
    <pre>{{ prompt }}</pre>
  </section>
  {% endif %}
</article>
{% endblock %}"##;

const LISTING_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<h1>{{ title }}</h1>
<ul class="card-list">
{% for item in items %}
  <li class="card">
    <a href="{{ item.path }}">
      <h2>{{ item.title }}</h2>
      {% if item.category %}<span class="category">{{ item.category }}</span>{% endif %}
      {% if item.difficulty %}<span class="difficulty">{{ item.difficulty }}</span>{% endif %}
      <p>{{ item.description }}</p>
    </a>
  </li>
{% endfor %}
</ul>
{% endblock %}"##;
