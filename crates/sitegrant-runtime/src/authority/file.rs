//! File-based host authority for persistent grants
//!
//! Stores granted origins in a JSON file:
//!
//! ```json
//! { "origins": ["https://a.example/*", "https://*.b.example/*"] }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sitegrant_core::{HostAuthority, SiteGrantError, SiteGrantResult};
use std::path::{Path, PathBuf};

use super::{InMemoryAuthority, RequestPolicy};

#[derive(Debug, Default, Serialize, Deserialize)]
struct GrantFile {
    #[serde(default)]
    origins: Vec<String>,
}

/// Grant store persisted to a JSON file
///
/// Every change is written immediately. A missing file starts empty.
#[derive(Debug)]
pub struct FileAuthority {
    path: PathBuf,
    inner: InMemoryAuthority,
}

impl FileAuthority {
    pub async fn open(path: impl Into<PathBuf>, policy: RequestPolicy) -> SiteGrantResult<Self> {
        let path = path.into();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    SiteGrantError::authority(format!(
                        "Failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let exists = tokio::fs::try_exists(&path).await.map_err(|e| {
            SiteGrantError::authority(format!(
                "Failed to stat grants file {}: {}",
                path.display(),
                e
            ))
        })?;

        let stored: GrantFile = if exists {
            let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
                SiteGrantError::authority(format!(
                    "Failed to read grants file {}: {}",
                    path.display(),
                    e
                ))
            })?;

            if content.trim().is_empty() {
                GrantFile::default()
            } else {
                serde_json::from_str(&content).map_err(|e| {
                    SiteGrantError::authority(format!(
                        "Failed to parse grants file {}: {}",
                        path.display(),
                        e
                    ))
                })?
            }
        } else {
            GrantFile::default()
        };

        let inner = InMemoryAuthority::new()
            .with_policy(policy)
            .with_granted(&stored.origins)?;

        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn origins(&self) -> Vec<String> {
        self.inner.origins()
    }

    pub async fn grant(&self, origins: &[String]) -> SiteGrantResult<()> {
        self.inner.grant(origins)?;
        self.persist().await
    }

    pub async fn revoke(&self, origins: &[String]) -> SiteGrantResult<usize> {
        let removed = self.inner.revoke(origins);
        self.persist().await?;
        Ok(removed)
    }

    async fn persist(&self) -> SiteGrantResult<()> {
        let file = GrantFile {
            origins: self.inner.origins(),
        };
        let content = serde_json::to_string_pretty(&file)?;

        tokio::fs::write(&self.path, content).await.map_err(|e| {
            SiteGrantError::authority(format!(
                "Failed to write grants file {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl HostAuthority for FileAuthority {
    async fn granted_origins(&self) -> SiteGrantResult<Vec<String>> {
        self.inner.granted_origins().await
    }

    async fn contains(&self, origins: &[String]) -> SiteGrantResult<bool> {
        self.inner.contains(origins).await
    }

    async fn request(&self, origins: &[String]) -> SiteGrantResult<bool> {
        let granted = self.inner.request(origins).await?;
        self.persist().await?;
        Ok(granted)
    }
}
