//! Sitegrant Runtime - Grant coordination against a host authority
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sitegrant_core::{ClassifierConfig, ManifestDescriptor};
//! use sitegrant_runtime::{FileAuthority, GrantCoordinator, RequestPolicy};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest = ManifestDescriptor::from_file("manifest.json")?;
//! let authority = FileAuthority::open("grants.json", RequestPolicy::Prompt).await?;
//! let coordinator =
//!     GrantCoordinator::from_manifest(&manifest, ClassifierConfig::default(), Arc::new(authority))?;
//!
//! coordinator.check_status().await?;
//! if !coordinator.required().status().is_granted() {
//!     coordinator.request_grants().await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod authority;
pub mod coordinator;

pub use authority::{FileAuthority, InMemoryAuthority, RequestPolicy};
pub use coordinator::{GrantCoordinator, GrantEvent};

// Re-export core types
pub use sitegrant_core::{
    GrantStatus, GroupSnapshot, HostAuthority, RequirementGroup, RequirementSet, SiteGrantError,
    SiteGrantResult,
};
