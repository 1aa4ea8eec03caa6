//! Filesystem artifact store for rendered reports.

use std::path::PathBuf;

use async_trait::async_trait;

use super::{ArtifactError, ArtifactStore};

/// Writes artifacts under a root directory, creating it on demand.
pub struct FsArtifacts {
    root: PathBuf,
}

impl FsArtifacts {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ArtifactStore for FsArtifacts {
    async fn write(&self, name: &str, content: &str) -> Result<(), ArtifactError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| ArtifactError::Write(format!("create {}: {e}", self.root.display())))?;

        let path = self.root.join(name);
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| ArtifactError::Write(format!("write {}: {e}", path.display())))
    }
}
