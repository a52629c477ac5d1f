// file: src/exporter/json.rs
// description: json backup of every persisted document with a manifest

use crate::error::{EditorError, Result};
use crate::models::Document;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportedDocument {
    #[serde(flatten)]
    pub document: Document,
    pub content_hash: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub total_documents: usize,
    pub documents: Vec<ExportedDocument>,
}

impl JsonExporter {
    pub const FILE_NAME: &'static str = "documents.json";

    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn export_all(&self, documents: Vec<Document>, pretty: bool) -> Result<ExportManifest> {
        info!("Starting JSON export to {:?}", self.output_dir);

        let documents: Vec<ExportedDocument> = documents
            .into_iter()
            .map(|document| ExportedDocument {
                content_hash: document.content_hash(),
                document,
            })
            .collect();

        let manifest = ExportManifest {
            exported_at: Utc::now().to_rfc3339(),
            total_documents: documents.len(),
            documents,
        };

        let contents = if pretty {
            serde_json::to_string_pretty(&manifest)?
        } else {
            serde_json::to_string(&manifest)?
        };

        let path = self.output_dir.join(Self::FILE_NAME);
        fs::write(&path, contents).map_err(|source| EditorError::Export {
            path: path.clone(),
            source,
        })?;

        info!(
            "Export complete: {} documents exported",
            manifest.total_documents
        );
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_exporter_creation() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path());
        assert!(exporter.is_ok());
    }

    #[test]
    fn test_export_all_writes_manifest() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path()).unwrap();
        let doc = Document {
            title: "Notes".to_string(),
            content: "# Hi".to_string(),
            ..Document::blank()
        };

        let manifest = exporter.export_all(vec![doc.clone()], true).unwrap();
        assert_eq!(manifest.total_documents, 1);

        let raw = fs::read_to_string(dir.path().join(JsonExporter::FILE_NAME)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let entry = &value["documents"][0];
        assert_eq!(entry["id"], doc.id.as_str());
        assert_eq!(entry["createdAt"], doc.created_at);
        assert_eq!(entry["content_hash"], doc.content_hash().as_str());
    }
}
