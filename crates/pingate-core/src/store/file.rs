//! File-backed stores
//!
//! Both stores keep a single JSON document and rewrite it on every change:
//! write to a temp file, rename over the target, then restrict permissions
//! to the owner on Unix.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;

use super::{CredentialStore, KeyValueStore};
use crate::buffer::Pin;
use crate::error::{PingateError, Result};

/// Credential file name inside the data directory
pub const CREDENTIALS_FILE_NAME: &str = "credentials.json";

/// Key-value file name inside the data directory
pub const STATE_FILE_NAME: &str = "state.json";

/// Credential storage format (persisted to disk)
#[derive(Serialize, Deserialize)]
struct CredentialRecord {
    /// Active PIN
    #[serde(default)]
    pin: Option<Pin>,
    /// PIN staged during setup
    #[serde(default)]
    new_pin: Option<Pin>,
    /// Version for future migrations
    #[serde(default = "record_version")]
    version: u32,
}

fn record_version() -> u32 {
    1
}

impl Default for CredentialRecord {
    fn default() -> Self {
        Self {
            pin: None,
            new_pin: None,
            version: record_version(),
        }
    }
}

async fn read_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    match fs::read_to_string(path).await {
        Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
            PingateError::Storage(format!("Failed to parse {}: {}", path.display(), e))
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(e.into()),
    }
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let contents = serde_json::to_string_pretty(value)?;

    // Ensure directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    // Write atomically
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, &contents).await?;
    fs::rename(&temp_path, path).await?;

    // Set restrictive permissions (Unix only)
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await?;
    }

    Ok(())
}

/// Credential store persisted as `credentials.json`
pub struct FileCredentialStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles
    lock: Mutex<()>,
}

impl FileCredentialStore {
    /// Store credentials inside `dir`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self::with_path(dir.as_ref().join(CREDENTIALS_FILE_NAME))
    }

    /// Store credentials at an explicit file path
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn update<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut CredentialRecord) + Send,
    {
        let _guard = self.lock.lock().await;
        let mut record: CredentialRecord = read_json(&self.path).await?;
        apply(&mut record);
        write_json(&self.path, &record).await
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn pin(&self) -> Result<Option<Pin>> {
        let _guard = self.lock.lock().await;
        let record: CredentialRecord = read_json(&self.path).await?;
        Ok(record.pin.clone())
    }

    async fn save_pin(&self, pin: &Pin) -> Result<()> {
        let pin = pin.clone();
        self.update(move |record| record.pin = Some(pin)).await
    }

    async fn new_pin(&self) -> Result<Option<Pin>> {
        let _guard = self.lock.lock().await;
        let record: CredentialRecord = read_json(&self.path).await?;
        Ok(record.new_pin.clone())
    }

    async fn save_new_pin(&self, pin: &Pin) -> Result<()> {
        let pin = pin.clone();
        self.update(move |record| record.new_pin = Some(pin)).await
    }

    async fn reset_new_pin(&self) -> Result<()> {
        self.update(|record| record.new_pin = None).await
    }

    async fn remove_keys(&self) -> Result<()> {
        let _guard = self.lock.lock().await;
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Key-value store persisted as a flat JSON object
pub struct FileKeyValueStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Store values inside `dir`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self::with_path(dir.as_ref().join(STATE_FILE_NAME))
    }

    /// Store values at an explicit file path
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        let mut map: BTreeMap<String, String> = read_json(&self.path).await?;
        Ok(map.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut map: BTreeMap<String, String> = read_json(&self.path).await?;
        map.insert(key.to_owned(), value.to_owned());
        write_json(&self.path, &map).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut map: BTreeMap<String, String> = read_json(&self.path).await?;
        if map.remove(key).is_some() {
            write_json(&self.path, &map).await?;
        }
        Ok(())
    }
}
