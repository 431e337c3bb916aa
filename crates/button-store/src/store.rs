//! Storage backends for button associations.

use crate::error::StoreError;
use crate::types::{AssociationMap, MessageButtons};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// Key-value storage of button sets keyed by message id.
///
/// Setting an empty set removes the key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, message_id: &str) -> Result<Option<MessageButtons>, StoreError>;

    async fn set(&self, message_id: &str, buttons: MessageButtons) -> Result<(), StoreError>;

    async fn remove(&self, message_id: &str) -> Result<bool, StoreError>;

    /// Copy of the whole association map.
    async fn snapshot(&self) -> Result<AssociationMap, StoreError>;
}

fn apply(map: &mut AssociationMap, message_id: &str, buttons: MessageButtons) {
    if buttons.is_empty() {
        map.shift_remove(message_id);
    } else {
        map.insert(message_id.to_string(), buttons);
    }
}

/// In-memory store, lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<AssociationMap>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with associations.
    pub fn with_data(data: AssociationMap) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, message_id: &str) -> Result<Option<MessageButtons>, StoreError> {
        Ok(self.data.read().await.get(message_id).cloned())
    }

    async fn set(&self, message_id: &str, buttons: MessageButtons) -> Result<(), StoreError> {
        apply(&mut *self.data.write().await, message_id, buttons);
        Ok(())
    }

    async fn remove(&self, message_id: &str) -> Result<bool, StoreError> {
        Ok(self.data.write().await.shift_remove(message_id).is_some())
    }

    async fn snapshot(&self) -> Result<AssociationMap, StoreError> {
        Ok(self.data.read().await.clone())
    }
}

/// Store persisted as a single JSON object `{message_id: {component_id: button}}`.
///
/// The whole object is rewritten on every change, through a temp file and rename.
pub struct FileStore {
    data: RwLock<AssociationMap>,
    path: PathBuf,
}

impl FileStore {
    /// Open the store, loading existing data. A missing file starts empty.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let data = Self::load(&path).await?;

        info!(
            "Loaded {} messages with buttons from {:?}",
            data.len(),
            path
        );

        Ok(Self {
            data: RwLock::new(data),
            path,
        })
    }

    async fn load(path: &Path) -> Result<AssociationMap, StoreError> {
        if !fs::try_exists(path).await? {
            info!("Button store not found at {:?}, starting empty", path);
            return Ok(AssociationMap::new());
        }

        let bytes = fs::read(path).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(AssociationMap::new());
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, data: &AssociationMap) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(data)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &bytes).await?;
        fs::rename(&temp_path, &self.path).await?;

        debug!("Saved button store ({} bytes) to {:?}", bytes.len(), self.path);
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, message_id: &str) -> Result<Option<MessageButtons>, StoreError> {
        Ok(self.data.read().await.get(message_id).cloned())
    }

    #[instrument(skip(self, buttons), fields(count = buttons.len()))]
    async fn set(&self, message_id: &str, buttons: MessageButtons) -> Result<(), StoreError> {
        // Held across the write so file updates never interleave.
        let mut data = self.data.write().await;
        let mut updated = data.clone();
        apply(&mut updated, message_id, buttons);

        self.persist(&updated).await?;
        *data = updated;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, message_id: &str) -> Result<bool, StoreError> {
        let mut data = self.data.write().await;
        if !data.contains_key(message_id) {
            return Ok(false);
        }

        let mut updated = data.clone();
        updated.shift_remove(message_id);

        self.persist(&updated).await?;
        *data = updated;
        Ok(true)
    }

    async fn snapshot(&self) -> Result<AssociationMap, StoreError> {
        Ok(self.data.read().await.clone())
    }
}
