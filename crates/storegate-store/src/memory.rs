use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::traits::{DocumentKey, DocumentStore};

/// In-process store, useful for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<DocumentKey, Value>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document before the store is shared.
    #[must_use]
    pub fn with_document(mut self, key: DocumentKey, fields: Value) -> Self {
        self.documents.get_mut().insert(key, fields);
        self
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, key: &DocumentKey) -> Result<Option<Value>, StoreError> {
        Ok(self.documents.read().await.get(key).cloned())
    }

    async fn set(&self, key: &DocumentKey, fields: Value) -> Result<(), StoreError> {
        if !fields.is_object() {
            return Err(StoreError::NotAnObject {
                key: key.to_string(),
            });
        }
        self.documents.write().await.insert(key.clone(), fields);
        Ok(())
    }
}
