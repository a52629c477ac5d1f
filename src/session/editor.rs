// file: src/session/editor.rs
// description: editor session routing user actions to the repository and preview
// reference: view orchestration over the document repository

use super::view::ViewMode;
use crate::config::Config;
use crate::error::{EditorError, Result};
use crate::models::Document;
use crate::preview::{Debouncer, MarkdownRenderer};
use crate::repository::DocumentRepository;
use crate::store::KeyValueStore;
use crate::utils::Validator;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

/// One editing window: the repository, which panes are visible, and a
/// debounced feed of content into the preview renderer.
pub struct EditorSession<S> {
    repo: DocumentRepository<S>,
    view: ViewMode,
    renderer: MarkdownRenderer,
    debouncer: Debouncer<String>,
    previews: mpsc::UnboundedReceiver<String>,
}

impl<S: KeyValueStore> EditorSession<S> {
    /// Must be called from within a tokio runtime.
    pub fn new(
        repo: DocumentRepository<S>,
        view: ViewMode,
        renderer: MarkdownRenderer,
        debounce: Duration,
    ) -> Self {
        let (debouncer, previews) = Debouncer::spawn(debounce);

        let session = Self {
            repo,
            view,
            renderer,
            debouncer,
            previews,
        };
        session.schedule_preview();
        session
    }

    pub fn from_config(store: S, config: &Config) -> Self {
        let keys = config.storage.keys();
        let repo = if config.editor.restore_last_session {
            DocumentRepository::restore(store, keys)
        } else {
            DocumentRepository::new(store, keys)
        };

        Self::new(
            repo,
            config.editor.default_view,
            MarkdownRenderer::from_config(&config.preview),
            Duration::from_millis(config.preview.debounce_ms),
        )
    }

    pub fn current(&self) -> &Document {
        self.repo.current()
    }

    pub fn repository(&self) -> &DocumentRepository<S> {
        &self.repo
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn set_view(&mut self, view: ViewMode) {
        let was_hidden = !self.view.shows_preview();
        self.view = view;

        if was_hidden && view.shows_preview() {
            self.schedule_preview();
        }
    }

    pub fn cycle_view(&mut self) -> ViewMode {
        self.set_view(self.view.cycle());
        self.view
    }

    pub fn list_documents(&self) -> Vec<Document> {
        self.repo.list_documents()
    }

    pub fn set_content(&mut self, content: impl Into<String>) -> &Document {
        self.repo.update_content(content);
        self.schedule_preview();
        self.repo.current()
    }

    /// Append one line of input to the current body.
    pub fn append_line(&mut self, line: &str) -> &Document {
        let mut content = self.repo.current().content.clone();
        content.push_str(line);
        content.push('\n');
        self.set_content(content)
    }

    pub fn set_title(&mut self, title: &str) -> &Document {
        self.repo.update_title(title)
    }

    pub fn new_document(&mut self) -> &Document {
        self.repo.create_document();
        self.schedule_preview();
        self.repo.current()
    }

    pub fn open_document(&mut self, id: &str) -> Result<&Document> {
        let doc = self
            .repo
            .find_document(id)
            .ok_or_else(|| EditorError::DocumentNotFound(id.to_string()))?;

        self.repo.switch_document(doc);
        self.schedule_preview();
        Ok(self.repo.current())
    }

    /// Rename a persisted document. Titles are trimmed and blank titles
    /// rejected before the repository sees them.
    pub fn rename_document(&mut self, id: &str, title: &str) -> Result<()> {
        let title = Validator::title(title)?;
        self.repo.rename_document(id, &title);
        Ok(())
    }

    pub fn delete_document(&mut self, id: &str) {
        let was_current = self.repo.current().id == id;
        self.repo.delete_document(id);

        if was_current {
            self.schedule_preview();
        }
    }

    /// Render the current body immediately, bypassing the debounce.
    pub fn render_now(&self) -> String {
        self.renderer.render(&self.repo.current().content)
    }

    /// Wait for the next debounced preview. `None` once the session closed.
    pub async fn next_preview(&mut self) -> Option<String> {
        let content = self.previews.recv().await?;
        Some(self.renderer.render(&content))
    }

    /// Shut down the debouncer, returning the last rendered preview if one
    /// was still pending.
    pub async fn close(self) -> Option<String> {
        let Self {
            debouncer,
            mut previews,
            renderer,
            ..
        } = self;

        debouncer.close().await;

        let mut last = None;
        while let Ok(content) = previews.try_recv() {
            last = Some(content);
        }
        last.map(|content| renderer.render(&content))
    }

    fn schedule_preview(&self) {
        if !self.view.shows_preview() {
            return;
        }

        if !self.debouncer.push(self.repo.current().content.clone()) {
            debug!("Preview debouncer closed, dropping refresh");
        }
    }
}
