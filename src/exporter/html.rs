// file: src/exporter/html.rs
// description: standalone print-ready html export, printed to pdf by the browser
// reference: https://developer.mozilla.org/en-US/docs/Web/CSS/@page

use super::slugify;
use crate::config::Config;
use crate::error::{EditorError, Result};
use crate::models::Document;
use crate::preview::MarkdownRenderer;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct HtmlExporter {
    output_dir: PathBuf,
    renderer: MarkdownRenderer,
    page_size: String,
    margin: String,
}

impl HtmlExporter {
    pub fn new(output_dir: impl Into<PathBuf>, renderer: MarkdownRenderer) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;

        Ok(Self {
            output_dir,
            renderer,
            page_size: "A4".to_string(),
            margin: "20mm".to_string(),
        })
    }

    pub fn from_config(config: &Config, output_dir: Option<&Path>) -> Result<Self> {
        let output_dir = output_dir.unwrap_or(config.export.output_dir.as_path());
        let exporter = Self::new(output_dir, MarkdownRenderer::from_config(&config.preview))?;
        Ok(exporter.with_page(&config.export.page_size, &config.export.margin))
    }

    pub fn with_page(mut self, page_size: &str, margin: &str) -> Self {
        self.page_size = page_size.to_string();
        self.margin = margin.to_string();
        self
    }

    /// A complete html document; printing it from a browser yields the pdf.
    pub fn render_page(&self, doc: &Document) -> String {
        self.wrap_page(doc.display_title(), &self.renderer.render(&doc.content))
    }

    /// Embed an already rendered fragment in the print-ready page shell.
    pub fn wrap_page(&self, title: &str, body: &str) -> String {
        let title = escape_html(title);

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
@page {{ size: {page_size}; margin: {margin}; }}
body {{ font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; line-height: 1.6; max-width: 48rem; margin: 0 auto; padding: 2rem; color: #1f2328; }}
pre, code {{ font-family: ui-monospace, "SFMono-Regular", Menlo, monospace; }}
pre {{ background: #f6f8fa; padding: 1rem; overflow-x: auto; }}
table {{ border-collapse: collapse; }}
th, td {{ border: 1px solid #d0d7de; padding: 0.4rem 0.8rem; }}
blockquote {{ border-left: 0.25rem solid #d0d7de; margin: 0; padding: 0 1rem; color: #59636e; }}
@media print {{
  body {{ max-width: none; padding: 0; }}
  pre, blockquote, table, img {{ page-break-inside: avoid; }}
  h1, h2, h3 {{ page-break-after: avoid; }}
}}
</style>
</head>
<body>
<article class="markdown-body">
{body}</article>
</body>
</html>
"#,
            title = title,
            page_size = self.page_size,
            margin = self.margin,
            body = body,
        )
    }

    pub fn export(&self, doc: &Document) -> Result<PathBuf> {
        let path = self.output_dir.join(format!("{}.html", slugify(doc)));

        fs::write(&path, self.render_page(doc)).map_err(|source| EditorError::Export {
            path: path.clone(),
            source,
        })?;

        info!("Exported {} to {:?}", doc.display_title(), path);
        Ok(path)
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
