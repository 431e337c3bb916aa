//! Button registry with per-message write serialization.

use crate::error::StoreError;
use crate::store::KeyValueStore;
use crate::types::{AssociationMap, ButtonDefinition, MessageButtons};
use std::collections::HashMap;
use std::sync::{Arc, Mutex as SyncMutex};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, instrument};

type LockMap = HashMap<String, Arc<Mutex<()>>>;

/// Access to stored buttons.
///
/// Read-modify-write cycles on the same message id run one at a time, so
/// concurrent attachments to one message never overwrite each other.
#[derive(Clone)]
pub struct ButtonRegistry {
    store: Arc<dyn KeyValueStore>,
    locks: Arc<SyncMutex<LockMap>>,
}

/// Exclusive access to one message's buttons, held until dropped.
///
/// Lets a caller write, talk to Discord and write again without another
/// writer on the same message slipping in between.
pub struct MessageGuard {
    store: Arc<dyn KeyValueStore>,
    locks: Arc<SyncMutex<LockMap>>,
    message_id: String,
    lock: Arc<Mutex<()>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl MessageGuard {
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// Current buttons of the message.
    pub async fn buttons(&self) -> Result<MessageButtons, StoreError> {
        Ok(self.store.get(&self.message_id).await?.unwrap_or_default())
    }

    /// Replace the message's buttons. An empty set removes the message.
    pub async fn set(&self, buttons: MessageButtons) -> Result<(), StoreError> {
        self.store.set(&self.message_id, buttons).await
    }
}

impl Drop for MessageGuard {
    fn drop(&mut self) {
        self.guard.take();

        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        // Only the map and this guard still point at the lock: nobody waits on it.
        if Arc::strong_count(&self.lock) == 2 {
            locks.remove(&self.message_id);
        }
    }
}

impl ButtonRegistry {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            locks: Arc::new(SyncMutex::new(HashMap::new())),
        }
    }

    /// Wait for exclusive access to a message's buttons.
    pub async fn lock(&self, message_id: &str) -> MessageGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            locks
                .entry(message_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        let guard = lock.clone().lock_owned().await;

        MessageGuard {
            store: self.store.clone(),
            locks: self.locks.clone(),
            message_id: message_id.to_string(),
            lock,
            guard: Some(guard),
        }
    }

    #[cfg(test)]
    pub(crate) fn lock_entries(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Look up one button.
    pub async fn get(
        &self,
        message_id: &str,
        component_id: &str,
    ) -> Result<Option<ButtonDefinition>, StoreError> {
        Ok(self
            .store
            .get(message_id)
            .await?
            .and_then(|mut buttons| buttons.shift_remove(component_id)))
    }

    /// All buttons of a message, in display order.
    pub async fn buttons(&self, message_id: &str) -> Result<MessageButtons, StoreError> {
        Ok(self.store.get(message_id).await?.unwrap_or_default())
    }

    /// Run `f` against the message's button set and store the result.
    ///
    /// Nothing is written when `f` fails.
    #[instrument(skip(self, f))]
    pub async fn update<F, T, E>(&self, message_id: &str, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut MessageButtons) -> Result<T, E>,
        E: From<StoreError>,
    {
        let guard = self.lock(message_id).await;

        let original = guard.buttons().await?;
        let mut buttons = original.clone();
        let result = f(&mut buttons)?;
        if buttons != original {
            guard.set(buttons).await?;
        }

        Ok(result)
    }

    /// Insert or replace a button, returning the message's full set.
    pub async fn upsert(
        &self,
        message_id: &str,
        component_id: &str,
        definition: ButtonDefinition,
    ) -> Result<MessageButtons, StoreError> {
        self.update(message_id, |buttons| {
            buttons.insert(component_id.to_string(), definition);
            Ok::<_, StoreError>(buttons.clone())
        })
        .await
    }

    /// Delete a button, returning it if it existed.
    pub async fn remove(
        &self,
        message_id: &str,
        component_id: &str,
    ) -> Result<Option<ButtonDefinition>, StoreError> {
        let removed = self
            .update(message_id, |buttons| {
                Ok::<_, StoreError>(buttons.shift_remove(component_id))
            })
            .await?;

        if removed.is_some() {
            debug!("Removed button {} from message {}", component_id, message_id);
        }
        Ok(removed)
    }

    /// Copy of every stored association.
    pub async fn snapshot(&self) -> Result<AssociationMap, StoreError> {
        self.store.snapshot().await
    }
}
