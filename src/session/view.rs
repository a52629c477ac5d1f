// file: src/session/view.rs
// description: pane visibility state for the editor window

use crate::error::{EditorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which panes are visible. There is no state with both panes hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Editor,
    #[default]
    Split,
    Preview,
}

impl ViewMode {
    pub fn shows_editor(self) -> bool {
        matches!(self, ViewMode::Editor | ViewMode::Split)
    }

    pub fn shows_preview(self) -> bool {
        matches!(self, ViewMode::Preview | ViewMode::Split)
    }

    /// Editor -> Split -> Preview -> Editor.
    pub fn cycle(self) -> Self {
        match self {
            ViewMode::Editor => ViewMode::Split,
            ViewMode::Split => ViewMode::Preview,
            ViewMode::Preview => ViewMode::Editor,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewMode::Editor => "editor",
            ViewMode::Split => "split",
            ViewMode::Preview => "preview",
        };
        f.write_str(name)
    }
}

impl FromStr for ViewMode {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "editor" => Ok(ViewMode::Editor),
            "split" => Ok(ViewMode::Split),
            "preview" => Ok(ViewMode::Preview),
            other => Err(EditorError::Validation(format!(
                "Unknown view mode: {:?} (expected editor, split or preview)",
                other
            ))),
        }
    }
}
