use serde::{Deserialize, Serialize};

use crate::path::{leaf_text, resolve_segments, PathExpr};
use crate::value::Value;

/// Envelope key that addresses the document name in a path.
const NAME_KEY: &str = "name";
/// Envelope key that addresses the metadata tree in a path.
const METADATA_KEY: &str = "metadata";

/// A named, schema-less record.
///
/// The name is the primary key and cannot be changed on an existing value;
/// renaming is modelled as removing one document and storing another.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    name: String,
    #[serde(default)]
    metadata: Value,
}

impl Document {
    pub fn new(name: impl Into<String>, metadata: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            metadata: metadata.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metadata(&self) -> &Value {
        &self.metadata
    }

    pub fn into_parts(self) -> (String, Value) {
        (self.name, self.metadata)
    }

    /// Comparable text at `path`, resolved for search.
    ///
    /// The path is first resolved against the metadata tree. If nothing is
    /// found there, it is resolved against the document envelope, so that
    /// `name` and `metadata.<key>...` address the document as it is encoded
    /// on the wire. A value present in the metadata tree always wins, even
    /// when it is not comparable.
    pub fn resolve_text(&self, path: &PathExpr) -> Option<&str> {
        if let Some(value) = path.resolve(&self.metadata) {
            return leaf_text(value);
        }
        match path.segments() {
            [only] if only == NAME_KEY => Some(self.name.as_str()),
            [first, rest @ ..] if first == METADATA_KEY => {
                resolve_segments(&self.metadata, rest).and_then(leaf_text)
            }
            _ => None,
        }
    }

    /// True when [`Document::resolve_text`] yields exactly `expected`.
    pub fn matches(&self, path: &PathExpr, expected: &str) -> bool {
        self.resolve_text(path) == Some(expected)
    }
}
