use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

/// Address of one document: a collection name plus a document key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey {
    pub collection: String,
    pub document: String,
}

impl DocumentKey {
    #[must_use]
    pub fn new(collection: impl Into<String>, document: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            document: document.into(),
        }
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.document)
    }
}

/// Key-value document store holding JSON objects.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document snapshot. `Ok(None)` means the document does not exist.
    async fn get(&self, key: &DocumentKey) -> Result<Option<Value>, StoreError>;

    /// Overwrite a document with `fields`. No merge is performed.
    async fn set(&self, key: &DocumentKey, fields: Value) -> Result<(), StoreError>;
}
