//! Initialize a content tree in the current directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing lexicon...");

    let content_dir = Path::new("content");

    if content_dir.exists() && !yes {
        tracing::warn!("content/ directory already exists. Use --yes to overwrite.");
        return Ok(());
    }

    for sub in ["vocabulary", "styles", "pages"] {
        fs::create_dir_all(content_dir.join(sub))
            .with_context(|| format!("Failed to create content/{sub}"))?;
    }

    let config_path = Path::new("lexicon.toml");
    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG).context("Failed to write lexicon.toml")?;
        tracing::info!("Created lexicon.toml");
    }

    let samples: &[(&str, &str)] = &[
        ("vocabulary/flexbox.en.mdx", SAMPLE_VOCABULARY_EN),
        ("vocabulary/flexbox.zh.mdx", SAMPLE_VOCABULARY_ZH),
        ("styles/terminal.en.mdx", SAMPLE_STYLE),
        ("pages/about.mdx", SAMPLE_PAGE),
    ];

    for (rel, contents) in samples {
        let path = content_dir.join(rel);
        if !path.exists() || yes {
            fs::write(&path, contents)
                .with_context(|| format!("Failed to write content/{rel}"))?;
            tracing::info!("Created content/{rel}");
        }
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'lexicon build' to generate the site, 'lexicon serve' to serve it.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Lexicon Configuration

[content]
# Content corpus root (vocabulary/, styles/, pages/)
dir = "content"

[site]
title = "Design Vocabulary"
base_url = "/"
output = "dist"
locales = ["en", "zh"]

[server]
port = 3000
host = "127.0.0.1"
"#;

const SAMPLE_VOCABULARY_EN: &str = r#"---
title: Flexbox
subtitle: One-dimensional layout
category: Layout
difficulty: Easy
tags: [css, layout]
description: Arrange items in a row or column with flexible sizing.
createdAt: "2024-01-10"
updatedAt: "2024-01-10"
priority: 1
---

# Flexbox

Flexbox lays out children along a single axis and distributes free space
between them.
"#;

const SAMPLE_VOCABULARY_ZH: &str = r#"---
title: 弹性盒子
subtitle: 一维布局
category: Layout
difficulty: Easy
tags: [css, layout]
description: 让子元素沿单一轴线灵活排列。
createdAt: "2024-01-10"
updatedAt: "2024-01-10"
priority: 1
---

# 弹性盒子

弹性盒子沿单一轴线排列子元素，并在它们之间分配剩余空间。
"#;

const SAMPLE_STYLE: &str = r##"---
title: Terminal
description: Green phosphor text on a black screen.
tags: [retro, monospace]
preview:
  backgroundColor: "#0a0a0a"
  textColor: "#33ff33"
  fontFamily: monospace
  accentColor: "#66ff66"
prompt: A terminal-inspired interface with green monospace text on black.
---

Classic phosphor terminal look: high contrast, scanline-friendly, no
rounded corners.
"##;

const SAMPLE_PAGE: &str = r#"---
title: About
description: What this site is.
updatedAt: "2024-01-10"
---

A visual vocabulary of CSS and design concepts, in two languages.
"#;
