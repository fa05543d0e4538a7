use crate::{error::Result, storage::StorageBackend};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based storage backend.
///
/// Each key maps to one JSON file inside a `.corkboard` directory under the
/// session root.
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const CORKBOARD_DIR: &'static str = ".corkboard";

    /// Creates a new FileStorage instance for the given session root
    pub fn new(session_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: session_root.as_ref().join(Self::CORKBOARD_DIR),
        }
    }

    fn key_file(&self, key: &str) -> PathBuf {
        self.root_path.join(format!("{}.json", key))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl StorageBackend for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let file_path = self.key_file(key);

        if !file_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&file_path).await?;
        Ok(Some(contents))
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;
        fs::write(self.key_file(key), value).await?;
        Ok(())
    }
}
