use nt_core::{Error, Result, StoryStorage};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

pub mod backends;

pub use backends::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Memory,
    File,
    Remote,
}

impl FromStr for StorageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" | "json" => Ok(Self::File),
            "remote" | "http" => Ok(Self::Remote),
            other => Err(Error::Config(format!(
                "Unknown storage backend: {} (expected memory, file or remote)",
                other
            ))),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Memory => "memory",
            Self::File => "file",
            Self::Remote => "remote",
        };
        f.write_str(name)
    }
}

/// Builds the storage backend. `location` is the fixture path for `file` and
/// the base URL for `remote`; `memory` ignores it.
pub async fn create_storage(
    kind: StorageKind,
    location: Option<&str>,
    remote: RemoteConfig,
) -> Result<Arc<dyn StoryStorage>> {
    let storage: Arc<dyn StoryStorage> = match kind {
        StorageKind::Memory => Arc::new(InMemoryStorage::new()),
        StorageKind::File => {
            let path = location.ok_or_else(|| {
                Error::Config("file storage needs a fixture path (--backend-url)".to_string())
            })?;
            Arc::new(InMemoryStorage::from_json_file(path).await?)
        }
        StorageKind::Remote => {
            let config = match location {
                Some(url) => remote.with_url(url),
                None => remote,
            };
            Arc::new(RemoteStorage::new(config)?)
        }
    };
    info!("💾 Storage backend ready (using {})", storage.name());
    Ok(storage)
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_storage, StorageKind};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_kind_from_str() {
        assert_eq!("memory".parse::<StorageKind>().unwrap(), StorageKind::Memory);
        assert_eq!("JSON".parse::<StorageKind>().unwrap(), StorageKind::File);
        assert_eq!("http".parse::<StorageKind>().unwrap(), StorageKind::Remote);
        assert!("qdrant".parse::<StorageKind>().is_err());
    }

    #[tokio::test]
    async fn test_file_storage_requires_path() {
        let result = create_storage(StorageKind::File, None, RemoteConfig::default()).await;
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_create_memory_storage() {
        let storage = create_storage(StorageKind::Memory, None, RemoteConfig::default())
            .await
            .unwrap();
        assert_eq!(storage.name(), "memory");
        assert!(storage.list_stories().await.unwrap().is_empty());
    }
}
