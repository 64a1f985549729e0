//! Host permission authority abstraction
//!
//! The host platform stores and enforces origin grants. sitegrant only
//! observes and requests; implementations wrap the platform API.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::SiteGrantResult;

#[async_trait]
pub trait HostAuthority: Send + Sync {
    /// Every origin pattern currently granted
    async fn granted_origins(&self) -> SiteGrantResult<Vec<String>>;

    /// True only if every listed pattern is currently granted
    async fn contains(&self, origins: &[String]) -> SiteGrantResult<bool>;

    /// Ask for the listed origins; may suspend while a human decides
    async fn request(&self, origins: &[String]) -> SiteGrantResult<bool>;
}

#[async_trait]
impl<T: HostAuthority + ?Sized> HostAuthority for Arc<T> {
    async fn granted_origins(&self) -> SiteGrantResult<Vec<String>> {
        (**self).granted_origins().await
    }

    async fn contains(&self, origins: &[String]) -> SiteGrantResult<bool> {
        (**self).contains(origins).await
    }

    async fn request(&self, origins: &[String]) -> SiteGrantResult<bool> {
        (**self).request(origins).await
    }
}
