// file: src/repository/documents.rs
// description: multi-document repository with write-through persistence
// reference: local storage backed document lifecycle

use crate::models::Document;
use crate::store::{KeyValueStore, StorageKeys};
use tracing::{debug, info, warn};

/// Owns the current document and mediates every read and write against the
/// store.
///
/// No operation returns an error: store failures are logged and degrade to
/// "no persisted documents" on read or "change not persisted" on write, so
/// the document being edited in memory is never lost.
pub struct DocumentRepository<S> {
    store: S,
    keys: StorageKeys,
    current: Document,
}

impl<S: KeyValueStore> DocumentRepository<S> {
    /// Start a session with a fresh, unsaved document. The store is not read.
    pub fn new(store: S, keys: StorageKeys) -> Self {
        Self {
            store,
            keys,
            current: Document::blank(),
        }
    }

    /// Start from the document recorded under the current-document key,
    /// falling back to a fresh one when it is missing or unreadable.
    pub fn restore(store: S, keys: StorageKeys) -> Self {
        let mut repo = Self::new(store, keys);

        if let Some(doc) = repo.load_current_pointer() {
            info!("Restored document {} ({})", doc.id, doc.display_title());
            repo.current = doc;
        }

        repo
    }

    pub fn current(&self) -> &Document {
        &self.current
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persisted documents, most recently updated first.
    pub fn list_documents(&self) -> Vec<Document> {
        let mut documents = self.load_documents();
        documents.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        documents
    }

    pub fn find_document(&self, id: &str) -> Option<Document> {
        self.load_documents().into_iter().find(|doc| doc.id == id)
    }

    pub fn update_content(&mut self, content: impl Into<String>) -> &Document {
        self.current.set_content(content);
        self.persist_current();
        &self.current
    }

    pub fn update_title(&mut self, title: impl Into<String>) -> &Document {
        self.current.set_title(title);
        self.persist_current();
        &self.current
    }

    /// Replace the current document with a blank one. Nothing is written;
    /// it enters the store once it gets a title.
    pub fn create_document(&mut self) -> &Document {
        self.current = Document::blank();
        debug!("Created document {}", self.current.id);
        &self.current
    }

    pub fn switch_document(&mut self, doc: Document) -> &Document {
        debug!("Switching to document {}", doc.id);
        self.current = doc;
        self.persist_current();
        &self.current
    }

    /// Remove `id` from the persisted list. Deleting the current document
    /// replaces it with a blank one. Unknown ids are ignored.
    pub fn delete_document(&mut self, id: &str) {
        let mut documents = self.load_documents();
        let before = documents.len();
        documents.retain(|doc| doc.id != id);

        if documents.len() != before {
            self.save_documents(&documents);
            info!("Deleted document {}", id);
        } else {
            debug!("Delete ignored, no persisted document {}", id);
        }

        if self.current.id == id {
            self.create_document();
        }
    }

    /// Set the title of a persisted document. The title is stored as given;
    /// callers trim and reject blank titles beforehand.
    pub fn rename_document(&mut self, id: &str, new_title: &str) {
        let mut documents = self.load_documents();

        let Some(doc) = documents.iter_mut().find(|doc| doc.id == id) else {
            debug!("Rename ignored, no persisted document {}", id);
            return;
        };

        // The in-memory current document may hold edits the store never got.
        if self.current.id == id {
            self.current.set_title(new_title);
            *doc = self.current.clone();
        } else {
            doc.set_title(new_title);
        }

        self.save_documents(&documents);
        info!("Renamed document {} to {:?}", id, new_title);

        if self.current.id == id {
            let current = self.current.clone();
            self.save_current_pointer(&current);
        }
    }

    fn persist_current(&mut self) {
        if !self.current.is_persistable() {
            debug!(
                "Document {} has no title, keeping it in memory only",
                self.current.id
            );
            return;
        }

        let current = self.current.clone();
        let mut documents = self.load_documents();
        match documents.iter_mut().find(|doc| doc.id == current.id) {
            Some(existing) => *existing = current.clone(),
            None => documents.push(current.clone()),
        }

        self.save_documents(&documents);
        self.save_current_pointer(&current);
    }

    fn load_documents(&self) -> Vec<Document> {
        let raw = match self.store.get(&self.keys.documents) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read document list: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(documents) => documents,
            Err(e) => {
                warn!("Stored document list is malformed, ignoring it: {}", e);
                Vec::new()
            }
        }
    }

    fn save_documents(&mut self, documents: &[Document]) {
        let raw = match serde_json::to_string(documents) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to serialize document list: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(&self.keys.documents, &raw) {
            warn!("Document list not persisted: {}", e);
        }
    }

    fn load_current_pointer(&self) -> Option<Document> {
        let raw = match self.store.get(&self.keys.current) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Failed to read current document: {}", e);
                return None;
            }
        };

        serde_json::from_str(&raw)
            .map_err(|e| warn!("Stored current document is malformed, ignoring it: {}", e))
            .ok()
    }

    fn save_current_pointer(&mut self, doc: &Document) {
        let raw = match serde_json::to_string(doc) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to serialize current document: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(&self.keys.current, &raw) {
            warn!("Current document not persisted: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    fn repo() -> DocumentRepository<MemoryStore> {
        DocumentRepository::new(MemoryStore::new(), StorageKeys::default())
    }

    fn titled(repo: &mut DocumentRepository<MemoryStore>, title: &str) -> Document {
        repo.create_document();
        repo.update_title(title).clone()
    }

    fn persisted_ids(repo: &DocumentRepository<MemoryStore>) -> Vec<String> {
        repo.list_documents().into_iter().map(|d| d.id).collect()
    }

    #[test]
    fn test_starts_blank_without_reading_store() {
        let mut store = MemoryStore::new();
        let old = Document {
            title: "Old".to_string(),
            ..Document::blank()
        };
        store.insert_raw(
            &StorageKeys::default().current,
            &serde_json::to_string(&old).unwrap(),
        );

        let repo = DocumentRepository::new(store, StorageKeys::default());
        assert_ne!(repo.current().id, old.id);
        assert_eq!(repo.current().title, "");
        assert_eq!(repo.current().content, "");
    }

    #[test]
    fn test_restore_reads_current_pointer() {
        let mut store = MemoryStore::new();
        let old = Document {
            title: "Old".to_string(),
            content: "body".to_string(),
            ..Document::blank()
        };
        store.insert_raw(
            &StorageKeys::default().current,
            &serde_json::to_string(&old).unwrap(),
        );

        let repo = DocumentRepository::restore(store, StorageKeys::default());
        assert_eq!(repo.current(), &old);
    }

    #[test]
    fn test_restore_falls_back_on_garbage() {
        let mut store = MemoryStore::new();
        store.insert_raw(&StorageKeys::default().current, "{oops");

        let repo = DocumentRepository::restore(store, StorageKeys::default());
        assert_eq!(repo.current().title, "");
    }

    #[test]
    fn test_round_trip_notes() {
        let mut repo = repo();
        repo.create_document();
        repo.update_title("Notes");
        repo.update_content("# Hi");

        let docs = repo.list_documents();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title, "Notes");
        assert_eq!(docs[0].content, "# Hi");
    }

    #[test]
    fn test_repeated_updates_keep_single_entry() {
        let mut repo = repo();
        let id = titled(&mut repo, "Draft").id;

        let mut last_updated = 0;
        for text in ["a", "ab", "abc", "abcd"] {
            repo.update_content(text);
            let docs: Vec<_> = repo
                .list_documents()
                .into_iter()
                .filter(|d| d.id == id)
                .collect();
            assert_eq!(docs.len(), 1);
            assert_eq!(docs[0].content, text);
            assert!(docs[0].updated_at >= last_updated);
            last_updated = docs[0].updated_at;
        }
    }

    #[test]
    fn test_blank_title_never_persisted() {
        let mut repo = repo();
        for text in ["one", "two", "three"] {
            repo.update_content(text);
        }
        repo.update_title("   ");
        repo.update_content("four");

        assert!(repo.list_documents().is_empty());
        assert!(repo.store().is_empty());
        assert_eq!(repo.current().content, "four");
    }

    #[test]
    fn test_title_transition_writes_current_pointer() {
        let mut repo = repo();
        repo.update_content("body");
        let id = repo.update_title("First").id.clone();

        let raw = repo
            .store()
            .get(&StorageKeys::default().current)
            .unwrap()
            .unwrap();
        let pointer: Document = serde_json::from_str(&raw).unwrap();
        assert_eq!(pointer.id, id);
        assert_eq!(pointer.content, "body");
    }

    #[test]
    fn test_create_while_current_keeps_previous() {
        let mut repo = repo();
        repo.update_title("A");
        repo.update_content("x");
        let a = repo.current().clone();

        let docs = repo.list_documents();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title, "A");
        assert_eq!(docs[0].content, "x");

        let b = repo.create_document().clone();
        assert_ne!(b.id, a.id);
        assert_eq!(b.title, "");
        assert_eq!(b.content, "");
        assert_eq!(repo.current(), &b);
        assert_eq!(repo.list_documents(), vec![a]);
    }

    #[test]
    fn test_delete_current_creates_fresh_document() {
        let mut repo = repo();
        let doc = titled(&mut repo, "Doomed");

        repo.delete_document(&doc.id);

        assert!(repo.list_documents().is_empty());
        assert_ne!(repo.current().id, doc.id);
        assert_eq!(repo.current().title, "");
        assert_eq!(repo.current().content, "");
    }

    #[test]
    fn test_delete_unsaved_current_still_resets() {
        let mut repo = repo();
        repo.update_content("scratch");
        let id = repo.current().id.clone();

        repo.delete_document(&id);
        assert_ne!(repo.current().id, id);
        assert_eq!(repo.current().content, "");
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut repo = repo();
        let a = titled(&mut repo, "A");
        let b = titled(&mut repo, "B");

        repo.delete_document(&a.id);
        let list_after = repo.list_documents();
        let current_after = repo.current().clone();

        repo.delete_document(&a.id);
        repo.delete_document("no-such-id");

        assert_eq!(repo.list_documents(), list_after);
        assert_eq!(repo.current(), &current_after);
        assert_eq!(repo.current().id, b.id);
    }

    #[test]
    fn test_switch_ensures_single_entry() {
        let mut repo = repo();
        let a = titled(&mut repo, "A");
        titled(&mut repo, "B");

        repo.switch_document(a.clone());
        repo.switch_document(a.clone());

        assert_eq!(repo.current(), &a);
        let count = persisted_ids(&repo).iter().filter(|id| **id == a.id).count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_switch_blank_document_not_persisted() {
        let mut repo = repo();
        let blank = Document {
            content: "draft".to_string(),
            ..Document::blank()
        };

        repo.switch_document(blank.clone());

        assert_eq!(repo.current(), &blank);
        assert!(repo.list_documents().is_empty());
        assert!(repo.store().is_empty());
    }

    #[test]
    fn test_switch_appends_unknown_document() {
        let mut repo = repo();
        let foreign = Document {
            title: "Imported".to_string(),
            ..Document::blank()
        };

        repo.switch_document(foreign.clone());
        assert_eq!(repo.find_document(&foreign.id), Some(foreign));
    }

    #[test]
    fn test_rename_current_refreshes_pointer() {
        let mut repo = repo();
        repo.update_title("Before");
        repo.update_content("kept");
        let id = repo.current().id.clone();

        repo.rename_document(&id, "After");

        assert_eq!(repo.current().title, "After");
        assert_eq!(repo.current().content, "kept");
        assert_eq!(repo.find_document(&id).unwrap().title, "After");

        let raw = repo
            .store()
            .get(&StorageKeys::default().current)
            .unwrap()
            .unwrap();
        let pointer: Document = serde_json::from_str(&raw).unwrap();
        assert_eq!(pointer.title, "After");
    }

    #[test]
    fn test_rename_current_keeps_unsaved_edits() {
        let mut repo = repo();
        repo.update_title("Doc");
        repo.update_content("saved");
        let id = repo.current().id.clone();

        repo.store.set_available(false);
        repo.update_content("typed while store was down");
        repo.store.set_available(true);

        repo.rename_document(&id, "Doc renamed");

        assert_eq!(repo.current().title, "Doc renamed");
        assert_eq!(repo.current().content, "typed while store was down");

        let stored = repo.find_document(&id).unwrap();
        assert_eq!(stored.title, "Doc renamed");
        assert_eq!(stored.content, "typed while store was down");
    }

    #[test]
    fn test_rename_other_document_leaves_current() {
        let mut repo = repo();
        let a = titled(&mut repo, "A");
        let b = titled(&mut repo, "B");

        repo.rename_document(&a.id, "A2");

        assert_eq!(repo.current(), &b);
        assert_eq!(repo.find_document(&a.id).unwrap().title, "A2");
    }

    #[test]
    fn test_rename_does_not_trim() {
        let mut repo = repo();
        let a = titled(&mut repo, "A");

        repo.rename_document(&a.id, "  padded  ");
        assert_eq!(repo.find_document(&a.id).unwrap().title, "  padded  ");
    }

    #[test]
    fn test_rename_unknown_is_noop() {
        let mut repo = repo();
        titled(&mut repo, "A");
        let before = repo.list_documents();

        repo.rename_document("missing", "X");
        assert_eq!(repo.list_documents(), before);
    }

    #[test]
    fn test_list_orders_by_updated_desc() {
        let mut repo = repo();
        let a = titled(&mut repo, "A");
        let b = titled(&mut repo, "B");

        let mut bumped = a.clone();
        bumped.updated_at = b.updated_at + 1000;
        repo.switch_document(bumped);

        let ids = persisted_ids(&repo);
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[test]
    fn test_malformed_list_reads_empty() {
        let mut store = MemoryStore::new();
        store.insert_raw(&StorageKeys::default().documents, "definitely not json");
        let repo = DocumentRepository::new(store, StorageKeys::default());

        assert!(repo.list_documents().is_empty());
        assert_eq!(repo.find_document("anything"), None);
    }

    #[test]
    fn test_unavailable_store_keeps_memory_state() {
        let mut repo = DocumentRepository::new(MemoryStore::unavailable(), StorageKeys::default());
        repo.update_title("Offline");
        repo.update_content("still here");

        assert!(repo.list_documents().is_empty());
        assert_eq!(repo.current().title, "Offline");
        assert_eq!(repo.current().content, "still here");
    }

    #[test]
    fn test_quota_exceeded_keeps_last_good_list() {
        let mut repo = DocumentRepository::new(MemoryStore::with_quota(600), StorageKeys::default());
        repo.update_title("Small");
        repo.update_content("fits");

        repo.update_content("x".repeat(1000));

        let docs = repo.list_documents();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, "fits");
        assert_eq!(repo.current().content.len(), 1000);
    }
}
