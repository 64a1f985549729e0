// Sitegrant Core - Site-access requirement bookkeeping
//
// Turns an extension manifest into requirement groups (required, player,
// per-feature pages) and defines the host authority those groups are
// reconciled against.

pub mod authority;
pub mod classifier;
pub mod config;
pub mod error;
pub mod group;
pub mod manifest;
pub mod pattern;
pub mod status;

// Re-export core types
pub use authority::HostAuthority;
pub use classifier::{classify, Classifier, ScriptKind};
pub use config::ClassifierConfig;
pub use error::{SiteGrantError, SiteGrantResult};
pub use group::{GroupLabel, GroupSnapshot, RequirementGroup, RequirementSet};
pub use manifest::{ContentScriptRule, ManifestDescriptor};
pub use pattern::{is_covered, MatchPattern, ALL_URLS};
pub use status::{GrantStatus, StatusCell};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
