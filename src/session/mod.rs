// file: src/session/mod.rs
// description: view orchestration module exports
// reference: internal module structure

pub mod editor;
pub mod view;

pub use editor::EditorSession;
pub use view::ViewMode;
