use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use jsonstore_types::{Document, PathExpr};

use crate::error::{StoreError, StoreResult};
use crate::traits::DocumentStore;

type DocumentMap = HashMap<String, Document>;

/// In-memory, HashMap-based document store.
///
/// All documents are held behind a `RwLock`: any number of readers, or one
/// writer. Documents are moved in on upsert and cloned out on read, so no
/// caller ever holds a reference into the map. Data lives as long as the
/// store value does.
///
/// After [`close`](Self::close) the store keeps serving reads but rejects
/// every write with [`StoreError::Unavailable`].
pub struct InMemoryDocumentStore {
    documents: RwLock<DocumentMap>,
    closed: AtomicBool,
}

impl InMemoryDocumentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            closed: AtomicBool::new(false),
        }
    }

    /// Number of documents currently stored.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read_lock()?.len())
    }

    /// Returns `true` if the store holds no documents.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read_lock()?.is_empty())
    }

    /// Return a sorted list of all document names.
    pub fn names(&self) -> StoreResult<Vec<String>> {
        let map = self.read_lock()?;
        let mut names: Vec<String> = map.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Stop accepting writes.
    ///
    /// Waits for an in-flight write to finish, so once this returns no
    /// further mutation can become visible.
    pub fn close(&self) {
        let _guard = self.documents.write();
        self.closed.store(true, Ordering::Release);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn read_lock(&self) -> StoreResult<RwLockReadGuard<'_, DocumentMap>> {
        self.documents
            .read()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))
    }

    fn write_lock(&self) -> StoreResult<RwLockWriteGuard<'_, DocumentMap>> {
        let guard = self
            .documents
            .write()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))?;
        // Checked under the lock so a write cannot slip in after close().
        if self.is_closed() {
            return Err(StoreError::Unavailable("store is closed".into()));
        }
        Ok(guard)
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn get(&self, name: &str) -> StoreResult<Document> {
        let map = self.read_lock()?;
        map.get(name)
            .cloned()
            .ok_or_else(|| StoreError::not_found(name))
    }

    /// Documents are returned sorted by name.
    fn get_all(&self) -> StoreResult<Vec<Document>> {
        let map = self.read_lock()?;
        if map.is_empty() {
            return Err(StoreError::EmptyCollection);
        }
        let mut documents: Vec<Document> = map.values().cloned().collect();
        documents.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(documents)
    }

    /// Full scan; matches are returned sorted by name.
    fn search_expr(&self, path: &PathExpr, expected: &str) -> StoreResult<Vec<Document>> {
        let map = self.read_lock()?;
        let mut matches: Vec<Document> = map
            .values()
            .filter(|doc| doc.matches(path, expected))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(matches)
    }

    fn upsert(&self, document: Document) -> StoreResult<()> {
        let mut map = self.write_lock()?;
        map.insert(document.name().to_string(), document);
        Ok(())
    }

    fn delete(&self, name: &str) -> StoreResult<()> {
        let mut map = self.write_lock()?;
        map.remove(name)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(name))
    }

    fn contains(&self, name: &str) -> StoreResult<bool> {
        Ok(self.read_lock()?.contains_key(name))
    }
}

impl std::fmt::Debug for InMemoryDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.documents.read().map(|map| map.len()).ok();
        f.debug_struct("InMemoryDocumentStore")
            .field("document_count", &count)
            .field("closed", &self.is_closed())
            .finish()
    }
}
