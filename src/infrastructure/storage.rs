// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::config::settings::StorageSettings;
use crate::domain::repositories::storage_repository::{StorageError, StorageRepository};

/// Images stored under a media root on the local filesystem
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_settings(settings: &StorageSettings) -> Self {
        Self::new(&settings.local_path)
    }

    /// Resolve a key below the root, rejecting absolute keys and `..`
    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(key);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if key.is_empty() || escapes {
            return Err(StorageError::Other(format!("Invalid storage key: {}", key)));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl StorageRepository for LocalStorage {
    async fn save(&self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(&path).await?;
        file.write_all(data).await?;
        file.flush().await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(self.path_for(key)?).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)?).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(fs::try_exists(self.path_for(key)?).await?)
    }
}

/// Map backed storage for tests and dry runs
#[derive(Default)]
pub struct InMemoryStorage {
    data: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.data.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl StorageRepository for InMemoryStorage {
    async fn save(&self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        self.data.write().insert(key.to_string(), data.to_vec());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.data.read().get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.data.write().remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.data.read().contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_local_storage_lifecycle() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage
            .save("attraction_images/7_zoo.jpg", b"jpeg")
            .await
            .unwrap();

        assert!(dir.path().join("attraction_images/7_zoo.jpg").is_file());
        assert!(storage.exists("attraction_images/7_zoo.jpg").await.unwrap());
        assert_eq!(
            storage.get("attraction_images/7_zoo.jpg").await.unwrap(),
            Some(b"jpeg".to_vec())
        );

        storage.delete("attraction_images/7_zoo.jpg").await.unwrap();
        assert!(!storage.exists("attraction_images/7_zoo.jpg").await.unwrap());
        assert_eq!(storage.get("attraction_images/7_zoo.jpg").await.unwrap(), None);
        // deleting twice is fine
        storage.delete("attraction_images/7_zoo.jpg").await.unwrap();
    }

    #[tokio::test]
    async fn test_local_storage_rejects_escaping_keys() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("media"));

        assert!(storage.save("../outside.jpg", b"x").await.is_err());
        assert!(storage.save("/etc/passwd", b"x").await.is_err());
        assert!(storage.get("").await.is_err());
        assert!(!dir.path().join("outside.jpg").exists());
    }

    #[tokio::test]
    async fn test_in_memory_storage() {
        let storage = InMemoryStorage::new();

        storage.save("b.jpg", b"2").await.unwrap();
        storage.save("a.jpg", b"1").await.unwrap();

        assert_eq!(storage.keys(), vec!["a.jpg".to_string(), "b.jpg".to_string()]);
        assert!(storage.exists("a.jpg").await.unwrap());
        storage.delete("a.jpg").await.unwrap();
        assert_eq!(storage.get("a.jpg").await.unwrap(), None);
    }
}
