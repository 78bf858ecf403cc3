//! Document storage for JsonStore.
//!
//! This crate owns the authoritative collection of [`Document`]s keyed by
//! name and the operations callers use on it: get, list, search by path,
//! upsert, and delete.
//!
//! # Storage Backends
//!
//! All backends implement the [`DocumentStore`] trait:
//!
//! - [`InMemoryDocumentStore`] -- `HashMap` behind a `RwLock`, scoped to the
//!   process lifetime
//!
//! # Design Rules
//!
//! 1. At most one document exists per name.
//! 2. Readers run concurrently; a writer excludes every reader and writer.
//! 3. A document is stored whole and replaced whole; there is no merge.
//! 4. Search is a full scan evaluated against each document's value tree.
//! 5. The store never logs, retries, or renders errors; it returns
//!    [`StoreError`] and leaves presentation to the caller.
//!
//! [`Document`]: jsonstore_types::Document

pub mod error;
pub mod memory;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryDocumentStore;
pub use traits::DocumentStore;
