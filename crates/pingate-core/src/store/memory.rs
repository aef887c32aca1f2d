//! In-memory stores for tests and ephemeral sessions

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{CredentialStore, KeyValueStore};
use crate::buffer::Pin;
use crate::error::Result;

#[derive(Default)]
struct Credentials {
    pin: Option<Pin>,
    new_pin: Option<Pin>,
}

/// Credential store that forgets everything on drop
#[derive(Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<Credentials>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an active PIN already set
    pub fn with_pin(pin: Pin) -> Self {
        Self {
            inner: Mutex::new(Credentials {
                pin: Some(pin),
                new_pin: None,
            }),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn pin(&self) -> Result<Option<Pin>> {
        Ok(self.inner.lock().await.pin.clone())
    }

    async fn save_pin(&self, pin: &Pin) -> Result<()> {
        self.inner.lock().await.pin = Some(pin.clone());
        Ok(())
    }

    async fn new_pin(&self) -> Result<Option<Pin>> {
        Ok(self.inner.lock().await.new_pin.clone())
    }

    async fn save_new_pin(&self, pin: &Pin) -> Result<()> {
        self.inner.lock().await.new_pin = Some(pin.clone());
        Ok(())
    }

    async fn reset_new_pin(&self) -> Result<()> {
        self.inner.lock().await.new_pin = None;
        Ok(())
    }

    async fn remove_keys(&self) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.pin = None;
        inner.new_pin = None;
        Ok(())
    }
}

/// Key-value store backed by a `HashMap`
#[derive(Default)]
pub struct MemoryKeyValueStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.values.lock().await.remove(key);
        Ok(())
    }
}
