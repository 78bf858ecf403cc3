use jsonstore_types::{Document, PathExpr};

use crate::error::{StoreError, StoreResult};

/// Named document collection.
///
/// All implementations must satisfy these invariants:
/// - At most one document exists per name.
/// - A document visible to readers is always fully formed.
/// - Each operation is atomic with respect to visible state: it is either
///   fully applied or not applied at all.
/// - Documents are owned by the store; callers receive copies and cannot
///   mutate stored state in place.
pub trait DocumentStore: Send + Sync {
    /// Fetch a document by name.
    ///
    /// Returns [`StoreError::NotFound`] if no such document exists.
    fn get(&self, name: &str) -> StoreResult<Document>;

    /// Return every stored document.
    ///
    /// Returns [`StoreError::EmptyCollection`] when the store is empty.
    /// Callers must not rely on any ordering unless the backend documents one.
    fn get_all(&self) -> StoreResult<Vec<Document>>;

    /// Return every document whose value at `path` compares equal to
    /// `expected`. An empty result is success.
    fn search_expr(&self, path: &PathExpr, expected: &str) -> StoreResult<Vec<Document>>;

    /// Insert a document, or wholesale replace the one with the same name.
    fn upsert(&self, document: Document) -> StoreResult<()>;

    /// Remove a document by name.
    ///
    /// Returns [`StoreError::NotFound`] if no such document exists.
    fn delete(&self, name: &str) -> StoreResult<()>;

    /// Search with a textual path expression.
    ///
    /// An expression that does not parse addresses nothing, so it matches
    /// no document.
    fn search(&self, path: &str, expected: &str) -> StoreResult<Vec<Document>> {
        match PathExpr::parse(path) {
            Ok(expr) => self.search_expr(&expr, expected),
            Err(_) => Ok(Vec::new()),
        }
    }

    /// Check whether a document with this name exists.
    fn contains(&self, name: &str) -> StoreResult<bool> {
        match self.get(name) {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
