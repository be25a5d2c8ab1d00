//! Subscriber store
//!
//! The ULR core reads subscriber records through [`SubscriberStore`]; the
//! storage behind it is not its concern. [`MemorySubscriberStore`] is the
//! in-process implementation used by the replay binary and the tests.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Subscriber store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Subscriber not found: {0}")]
    NotFound(String),

    #[error("Subscriber store backend error: {0}")]
    Backend(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse subscriber YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Subscriber record as provisioned in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriberData {
    pub imsi: String,
    /// Name of the subscription profile in the HSS configuration
    #[serde(default)]
    pub sub_profile: String,
}

impl SubscriberData {
    pub fn new(imsi: &str, sub_profile: &str) -> Self {
        Self {
            imsi: imsi.to_string(),
            sub_profile: sub_profile.to_string(),
        }
    }
}

/// Synchronous subscriber lookup.
///
/// Implementations may block; callers run each request on its own task.
pub trait SubscriberStore: Send + Sync {
    fn get_subscriber_data(&self, imsi: &str) -> Result<SubscriberData, StoreError>;
}

impl<S: SubscriberStore + ?Sized> SubscriberStore for std::sync::Arc<S> {
    fn get_subscriber_data(&self, imsi: &str) -> Result<SubscriberData, StoreError> {
        (**self).get_subscriber_data(imsi)
    }
}

#[derive(Debug, Deserialize)]
struct SubscriberFile {
    #[serde(default)]
    subscribers: Vec<SubscriberData>,
}

/// In-memory subscriber store keyed by IMSI
#[derive(Debug, Default)]
pub struct MemorySubscriberStore {
    subscribers: RwLock<HashMap<String, SubscriberData>>,
}

impl MemorySubscriberStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `subscribers:` YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self, StoreError> {
        let file: SubscriberFile = serde_yaml::from_str(yaml)?;
        let store = Self::new();
        for subscriber in file.subscribers {
            store.insert(subscriber)?;
        }
        Ok(store)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let store = Self::from_yaml_str(&content)?;
        log::info!("Loaded {} subscribers from {}", store.len(), path.display());
        Ok(store)
    }

    /// Add or replace a subscriber
    pub fn insert(&self, subscriber: SubscriberData) -> Result<(), StoreError> {
        let mut map = self
            .subscribers
            .write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        map.insert(subscriber.imsi.clone(), subscriber);
        Ok(())
    }

    pub fn remove(&self, imsi: &str) -> Result<Option<SubscriberData>, StoreError> {
        let mut map = self
            .subscribers
            .write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(map.remove(imsi))
    }

    pub fn len(&self) -> usize {
        self.subscribers.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SubscriberStore for MemorySubscriberStore {
    fn get_subscriber_data(&self, imsi: &str) -> Result<SubscriberData, StoreError> {
        let map = self
            .subscribers
            .read()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        map.get(imsi)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(imsi.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_get_remove() {
        let store = MemorySubscriberStore::new();
        assert!(store.is_empty());

        store.insert(SubscriberData::new("001010000000001", "gold")).unwrap();
        assert_eq!(store.len(), 1);

        let sub = store.get_subscriber_data("001010000000001").unwrap();
        assert_eq!(sub.sub_profile, "gold");

        assert!(store.remove("001010000000001").unwrap().is_some());
        assert!(matches!(
            store.get_subscriber_data("001010000000001"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_from_yaml() {
        let store = MemorySubscriberStore::from_yaml_str(
            r#"
subscribers:
  - imsi: "001010000000001"
    sub_profile: gold
  - imsi: "001010000000002"
"#,
        )
        .unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.get_subscriber_data("001010000000002").unwrap().sub_profile,
            ""
        );
    }

    #[test]
    fn test_arc_store() {
        let store = std::sync::Arc::new(MemorySubscriberStore::new());
        store.insert(SubscriberData::new("001010000000003", "silver")).unwrap();
        let shared: &dyn SubscriberStore = &store;
        assert!(shared.get_subscriber_data("001010000000003").is_ok());
    }

    #[test]
    fn test_poisoned_lock_is_backend_error() {
        let store = MemorySubscriberStore::new();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.subscribers.write().unwrap();
            panic!("writer died holding the lock");
        }));

        assert!(matches!(
            store.insert(SubscriberData::new("001010000000004", "gold")),
            Err(StoreError::Backend(_))
        ));
        assert!(matches!(
            store.remove("001010000000004"),
            Err(StoreError::Backend(_))
        ));
        assert!(matches!(
            store.get_subscriber_data("001010000000004"),
            Err(StoreError::Backend(_))
        ));
    }
}
