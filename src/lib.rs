// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod models;
pub mod preview;
pub mod repository;
pub mod session;
pub mod store;
pub mod utils;

pub use config::{Config, EditorConfig, ExportConfig, PreviewConfig, StorageConfig};
pub use error::{EditorError, Result, StoreError, StoreResult};
pub use exporter::{ExportManifest, ExportedDocument, HtmlExporter, JsonExporter, MarkdownExporter};
pub use models::Document;
pub use preview::{Debouncer, MarkdownRenderer, OutlineEntry};
pub use repository::DocumentRepository;
pub use session::{EditorSession, ViewMode};
pub use store::{FileStore, KeyValueStore, MemoryStore, StorageKeys};
pub use utils::Validator;
