//! Storage contracts used by the PIN controller
//!
//! The controller never touches disk directly. Active and pending PINs live
//! behind a [`CredentialStore`]; the retry counter lives in a
//! [`KeyValueStore`]. File-backed implementations persist across restarts,
//! in-memory ones are for tests and throwaway sessions.

mod file;
mod memory;

pub use file::{FileCredentialStore, FileKeyValueStore};
pub use memory::{MemoryCredentialStore, MemoryKeyValueStore};

use std::sync::Arc;

use async_trait::async_trait;

use crate::buffer::Pin;
use crate::error::Result;

/// Secure storage for the active PIN and the PIN staged during setup
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Currently active PIN, `None` if unset
    async fn pin(&self) -> Result<Option<Pin>>;

    /// Persist the active PIN
    async fn save_pin(&self, pin: &Pin) -> Result<()>;

    /// PIN staged by the first entry of a setup flow
    async fn new_pin(&self) -> Result<Option<Pin>>;

    /// Stage a PIN awaiting confirmation
    async fn save_new_pin(&self, pin: &Pin) -> Result<()>;

    /// Drop the staged PIN
    async fn reset_new_pin(&self) -> Result<()>;

    /// Wipe every stored credential
    async fn remove_keys(&self) -> Result<()>;
}

/// Durable string key-value storage
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;
}

#[async_trait]
impl<T: CredentialStore + ?Sized> CredentialStore for Arc<T> {
    async fn pin(&self) -> Result<Option<Pin>> {
        (**self).pin().await
    }

    async fn save_pin(&self, pin: &Pin) -> Result<()> {
        (**self).save_pin(pin).await
    }

    async fn new_pin(&self) -> Result<Option<Pin>> {
        (**self).new_pin().await
    }

    async fn save_new_pin(&self, pin: &Pin) -> Result<()> {
        (**self).save_new_pin(pin).await
    }

    async fn reset_new_pin(&self) -> Result<()> {
        (**self).reset_new_pin().await
    }

    async fn remove_keys(&self) -> Result<()> {
        (**self).remove_keys().await
    }
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key).await
    }
}
