// file: src/exporter/mod.rs
// description: document export module exports and file naming
// reference: https://docs.rs/regex

pub mod html;
pub mod json;
pub mod markdown;

use crate::models::Document;
use lazy_static::lazy_static;
use regex::Regex;

pub use html::HtmlExporter;
pub use json::{ExportManifest, ExportedDocument, JsonExporter};
pub use markdown::MarkdownExporter;

lazy_static! {
    static ref NON_SLUG: Regex = Regex::new(r"[^a-z0-9]+").expect("NON_SLUG regex is valid");
}

/// File stem for an exported document: the lowercased title with runs of
/// other characters collapsed to `-`, or the id when nothing is left.
pub fn slugify(doc: &Document) -> String {
    let lowered = doc.title.to_lowercase();
    let slug = NON_SLUG.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        doc.id.clone()
    } else {
        slug.to_string()
    }
}
