//! Foundation types for JsonStore.
//!
//! This crate defines the data model shared by the store and its HTTP layer:
//!
//! - [`Value`] -- a schema-less value tree (null, boolean, number, text,
//!   sequence, mapping) modelled as a tagged variant
//! - [`Document`] -- a named record holding a [`Value`] as its metadata
//! - [`PathExpr`] -- a dotted path expression addressing mapping keys inside
//!   a value tree, together with the evaluator used by search
//!
//! # Comparison Rules
//!
//! Path evaluation is pure. A path resolves to a value only by descending
//! through mappings; any miss yields absence, never an error. Only text and
//! boolean leaves participate in equality search (see [`leaf_text`]).

pub mod document;
pub mod error;
pub mod path;
pub mod value;

pub use document::Document;
pub use error::PathError;
pub use path::{leaf_text, resolve_segments, PathExpr, SEGMENT_DELIMITER};
pub use value::{Number, Value, ValueKind};
