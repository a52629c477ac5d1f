// file: src/preview/mod.rs
// description: live preview rendering and refresh throttling
// reference: internal module structure

pub mod debounce;
pub mod renderer;

pub use debounce::Debouncer;
pub use renderer::{MarkdownRenderer, OutlineEntry};
