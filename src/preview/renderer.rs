// file: src/preview/renderer.rs
// description: markdown to html rendering with pulldown-cmark
// reference: https://docs.rs/pulldown-cmark

use crate::config::PreviewConfig;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};

/// Renders document bodies for the preview pane and for export.
///
/// Math is not typeset here: `$x$` and `$$x$$` come out as
/// `<span class="math math-inline">` / `math-display` spans for a
/// client-side typesetter. Fenced code keeps its `language-*` class so the
/// host can highlight it.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    options: Options,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub level: u32,
    pub text: String,
}

impl MarkdownRenderer {
    pub fn new(gfm: bool, math: bool) -> Self {
        let mut options = Options::ENABLE_HEADING_ATTRIBUTES;

        if gfm {
            options.insert(Options::ENABLE_TABLES);
            options.insert(Options::ENABLE_STRIKETHROUGH);
            options.insert(Options::ENABLE_TASKLISTS);
            options.insert(Options::ENABLE_FOOTNOTES);
            options.insert(Options::ENABLE_GFM);
        }

        if math {
            options.insert(Options::ENABLE_MATH);
        }

        Self { options }
    }

    pub fn from_config(config: &PreviewConfig) -> Self {
        Self::new(config.gfm, config.math)
    }

    pub fn render(&self, content: &str) -> String {
        let parser = Parser::new_ext(content, self.options);
        let mut output = String::with_capacity(content.len() * 3 / 2);
        html::push_html(&mut output, parser);
        output
    }

    /// Headings in document order.
    pub fn outline(&self, content: &str) -> Vec<OutlineEntry> {
        let mut outline = Vec::new();
        let mut current: Option<(u32, String)> = None;

        for event in Parser::new_ext(content, self.options) {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    current = Some((level as u32, String::new()));
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some((level, text)) = current.take() {
                        outline.push(OutlineEntry {
                            level,
                            text: text.trim().to_string(),
                        });
                    }
                }
                Event::Text(text) | Event::Code(text) | Event::InlineMath(text) => {
                    if let Some((_, ref mut heading)) = current {
                        heading.push_str(&text);
                    }
                }
                _ => {}
            }
        }

        outline
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(true, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_basic_rendering() {
        let html = MarkdownRenderer::default().render("# Hi\n\nSome *text*.");
        assert!(html.contains("<h1>Hi</h1>"));
        assert!(html.contains("<em>text</em>"));
    }

    #[test]
    fn test_gfm_extensions() {
        let renderer = MarkdownRenderer::default();
        let html = renderer.render("| a | b |\n|---|---|\n| 1 | 2 |\n\n- [x] done\n- [ ] todo\n\n~~gone~~");

        assert!(html.contains("<table>"));
        assert!(html.contains("type=\"checkbox\""));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn test_gfm_disabled_leaves_tables_as_text() {
        let html = MarkdownRenderer::new(false, false).render("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_math_spans() {
        let html = MarkdownRenderer::default().render("Euler: $e^{i\\pi} = -1$\n\n$$x^2$$");
        assert!(html.contains("math-inline"));
        assert!(html.contains("math-display"));
    }

    #[test]
    fn test_code_block_language_class() {
        let html = MarkdownRenderer::default().render("```rust\nfn main() {}\n```");
        assert!(html.contains("language-rust"));
    }

    #[test]
    fn test_outline() {
        let outline = MarkdownRenderer::default().outline("# Title\n\ntext\n\n## Sub `code`\n");
        assert_eq!(
            outline,
            vec![
                OutlineEntry {
                    level: 1,
                    text: "Title".to_string()
                },
                OutlineEntry {
                    level: 2,
                    text: "Sub code".to_string()
                },
            ]
        );
    }
}
