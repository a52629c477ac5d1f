// file: src/repository/mod.rs
// description: Document repository module exports
// reference: Internal module structure

pub mod documents;

pub use documents::DocumentRepository;
