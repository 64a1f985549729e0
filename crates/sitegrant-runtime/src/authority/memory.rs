//! In-memory host authority

use async_trait::async_trait;
use parking_lot::RwLock;
use sitegrant_core::{HostAuthority, SiteGrantResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

use super::{covers_all, parse_all, RequestPolicy};

/// Ephemeral grant store
///
/// Grants are kept in insertion order without duplicates. Call counters
/// let callers verify how often the host was consulted.
#[derive(Debug, Default)]
pub struct InMemoryAuthority {
    granted: RwLock<Vec<String>>,
    policy: RequestPolicy,
    queries: AtomicUsize,
    contains_calls: AtomicUsize,
    requests: AtomicUsize,
}

impl InMemoryAuthority {
    /// Empty store that denies every request
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: RequestPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_granted(self, origins: &[String]) -> SiteGrantResult<Self> {
        self.grant(origins)?;
        Ok(self)
    }

    pub fn policy(&self) -> &RequestPolicy {
        &self.policy
    }

    /// Record grants directly, bypassing the request policy
    pub fn grant(&self, origins: &[String]) -> SiteGrantResult<()> {
        parse_all(origins)?;
        let mut granted = self.granted.write();
        for origin in origins {
            if !granted.contains(origin) {
                granted.push(origin.clone());
            }
        }
        Ok(())
    }

    /// Remove exact grants, returning how many were removed
    pub fn revoke(&self, origins: &[String]) -> usize {
        let mut granted = self.granted.write();
        let before = granted.len();
        granted.retain(|g| !origins.contains(g));
        before - granted.len()
    }

    pub fn origins(&self) -> Vec<String> {
        self.granted.read().clone()
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn contains_count(&self) -> usize {
        self.contains_calls.load(Ordering::SeqCst)
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HostAuthority for InMemoryAuthority {
    async fn granted_origins(&self) -> SiteGrantResult<Vec<String>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.origins())
    }

    async fn contains(&self, origins: &[String]) -> SiteGrantResult<bool> {
        self.contains_calls.fetch_add(1, Ordering::SeqCst);
        let granted = self.origins();
        covers_all(&granted, origins)
    }

    async fn request(&self, origins: &[String]) -> SiteGrantResult<bool> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        parse_all(origins)?;

        let approved = self.policy.decide(origins).await?;
        debug!(
            requested = origins.len(),
            approved = approved.len(),
            "Settled grant request"
        );
        self.grant(&approved)?;

        let granted = self.origins();
        covers_all(&granted, origins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_grant_and_contains() {
        let authority = InMemoryAuthority::new();
        authority
            .grant(&strings(&["https://*.example.com/*", "https://*.example.com/*"]))
            .unwrap();

        assert_eq!(authority.origins().len(), 1);
        assert!(authority
            .contains(&strings(&["https://www.example.com/*"]))
            .await
            .unwrap());
        assert!(!authority
            .contains(&strings(&["https://other.org/*"]))
            .await
            .unwrap());
        assert_eq!(authority.contains_count(), 2);
    }

    #[tokio::test]
    async fn test_grant_rejects_invalid_pattern() {
        let authority = InMemoryAuthority::new();
        assert!(authority.grant(&strings(&["example.com"])).is_err());
        assert!(authority.origins().is_empty());
    }

    #[tokio::test]
    async fn test_revoke() {
        let authority = InMemoryAuthority::new()
            .with_granted(&strings(&["https://a.example/*", "https://b.example/*"]))
            .unwrap();

        assert_eq!(authority.revoke(&strings(&["https://a.example/*"])), 1);
        assert_eq!(authority.origins(), strings(&["https://b.example/*"]));
        assert_eq!(authority.revoke(&strings(&["https://a.example/*"])), 0);
    }

    #[tokio::test]
    async fn test_request_with_default_policy_denies() {
        let authority = InMemoryAuthority::new();
        let granted = authority
            .request(&strings(&["https://a.example/*"]))
            .await
            .unwrap();

        assert!(!granted);
        assert!(authority.origins().is_empty());
        assert_eq!(authority.request_count(), 1);
    }

    #[tokio::test]
    async fn test_partial_request_returns_false_but_records_approved() {
        let authority = InMemoryAuthority::new().with_policy(RequestPolicy::ApproveOnly(
            strings(&["https://a.example/*"]),
        ));

        let granted = authority
            .request(&strings(&["https://a.example/*", "https://b.example/*"]))
            .await
            .unwrap();

        assert!(!granted);
        assert_eq!(authority.origins(), strings(&["https://a.example/*"]));
    }

    #[tokio::test]
    async fn test_request_already_covered_returns_true() {
        let authority = InMemoryAuthority::new()
            .with_granted(&strings(&["<all_urls>"]))
            .unwrap();

        let granted = authority
            .request(&strings(&["https://a.example/*"]))
            .await
            .unwrap();
        assert!(granted);
    }
}
