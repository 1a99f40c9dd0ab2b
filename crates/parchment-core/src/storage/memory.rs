//! In-memory storage.

use super::{BoxFuture, Storage, StorageError, StorageResult, check_id};
use crate::document::CanvasDocument;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Keeps serialized documents in a map, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    documents: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw JSON under `id` as if it had been saved earlier.
    pub fn insert_raw(&self, id: &str, json: impl Into<String>) -> StorageResult<()> {
        check_id(id)?;
        self.documents
            .write()
            .map_err(|_| StorageError::Poisoned)?
            .insert(id.to_string(), json.into());
        Ok(())
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, document: &CanvasDocument) -> BoxFuture<'_, StorageResult<()>> {
        let result = check_id(id)
            .and_then(|()| Ok(document.to_json()?))
            .map(|json| (id.to_string(), json));
        Box::pin(async move {
            let (id, json) = result?;
            self.documents
                .write()
                .map_err(|_| StorageError::Poisoned)?
                .insert(id, json);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<CanvasDocument>> {
        let id = id.to_string();
        Box::pin(async move {
            let docs = self.documents.read().map_err(|_| StorageError::Poisoned)?;
            let json = docs.get(&id).ok_or(StorageError::NotFound(id.clone()))?;
            Ok(CanvasDocument::from_json(json)?)
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            self.documents
                .write()
                .map_err(|_| StorageError::Poisoned)?
                .remove(&id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let docs = self.documents.read().map_err(|_| StorageError::Poisoned)?;
            Ok(docs.keys().cloned().collect())
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_string();
        Box::pin(async move {
            let docs = self.documents.read().map_err(|_| StorageError::Poisoned)?;
            Ok(docs.contains_key(&id))
        })
    }
}
