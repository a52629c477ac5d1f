// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{EditorError, Result};
use crate::session::ViewMode;
use crate::store::StorageKeys;
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub editor: EditorConfig,
    pub preview: PreviewConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub path: PathBuf,
    #[serde(default = "default_documents_key")]
    pub documents_key: String,
    #[serde(default = "default_current_key")]
    pub current_key: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EditorConfig {
    /// Reopen the last edited document instead of starting blank.
    #[serde(default)]
    pub restore_last_session: bool,
    #[serde(default)]
    pub default_view: ViewMode,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PreviewConfig {
    pub debounce_ms: u64,
    #[serde(default = "default_true")]
    pub gfm: bool,
    #[serde(default = "default_true")]
    pub math: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub page_size: String,
    pub margin: String,
}

fn default_documents_key() -> String {
    StorageKeys::default().documents
}

fn default_current_key() -> String {
    StorageKeys::default().current
}

fn default_true() -> bool {
    true
}

impl StorageConfig {
    pub fn keys(&self) -> StorageKeys {
        StorageKeys {
            documents: self.documents_key.clone(),
            current: self.current_key.clone(),
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("MDPAD")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| EditorError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| EditorError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        let keys = StorageKeys::default();

        Self {
            storage: StorageConfig {
                path: PathBuf::from("data/store.json"),
                documents_key: keys.documents,
                current_key: keys.current,
            },
            editor: EditorConfig {
                restore_last_session: false,
                default_view: ViewMode::Split,
            },
            preview: PreviewConfig {
                debounce_ms: 150,
                gfm: true,
                math: true,
            },
            export: ExportConfig {
                output_dir: PathBuf::from("./exports"),
                page_size: "A4".to_string(),
                margin: "20mm".to_string(),
            },
        }
    }

    fn validate(&self) -> Result<()> {
        Validator::debounce_ms(self.preview.debounce_ms)?;
        Validator::storage_key(&self.storage.documents_key)?;
        Validator::storage_key(&self.storage.current_key)?;

        if self.storage.documents_key == self.storage.current_key {
            return Err(EditorError::Config(
                "documents_key and current_key must differ".to_string(),
            ));
        }

        Ok(())
    }
}
