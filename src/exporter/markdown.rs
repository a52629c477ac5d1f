// file: src/exporter/markdown.rs
// description: raw markdown export of a single document

use super::slugify;
use crate::error::{EditorError, Result};
use crate::models::Document;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct MarkdownExporter {
    output_dir: PathBuf,
}

impl MarkdownExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn export(&self, doc: &Document) -> Result<PathBuf> {
        let path = self.output_dir.join(format!("{}.md", slugify(doc)));

        fs::write(&path, &doc.content).map_err(|source| EditorError::Export {
            path: path.clone(),
            source,
        })?;

        info!("Exported {} to {:?}", doc.display_title(), path);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_export_writes_body_verbatim() {
        let dir = tempdir().unwrap();
        let exporter = MarkdownExporter::new(dir.path()).unwrap();
        let doc = Document {
            title: "Notes".to_string(),
            content: "# Hi\n\n- a\n".to_string(),
            ..Document::blank()
        };

        let path = exporter.export(&doc).unwrap();
        assert_eq!(path.file_name().unwrap(), "notes.md");
        assert_eq!(fs::read_to_string(path).unwrap(), "# Hi\n\n- a\n");
    }
}
