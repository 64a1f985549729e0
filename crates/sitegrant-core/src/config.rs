//! Classifier conventions
//!
//! Script naming conventions that route content-script rules into the
//! player group or a per-feature page group. Loadable from YAML:
//!
//! ```yaml
//! page_marker: content/page_
//! iframe_marker: iframe.js
//! script_extension: .js
//! wildcard_origin: <all_urls>
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{SiteGrantError, SiteGrantResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Substring identifying a page-feature script
    pub page_marker: String,

    /// Substring identifying the iframe-embedding script
    pub iframe_marker: String,

    /// Extension removed from page-feature script names
    pub script_extension: String,

    /// "All sites" sentinel dropped from the top-level origin list
    pub wildcard_origin: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            page_marker: "content/page_".to_string(),
            iframe_marker: "iframe.js".to_string(),
            script_extension: ".js".to_string(),
            wildcard_origin: "<all_urls>".to_string(),
        }
    }
}

impl ClassifierConfig {
    pub fn from_yaml(yaml: &str) -> SiteGrantResult<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| {
            SiteGrantError::config(format!("Failed to parse classifier config: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> SiteGrantResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SiteGrantError::config(format!(
                "Failed to read classifier config {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Reject conventions that would match every script
    pub fn validate(&self) -> SiteGrantResult<()> {
        if self.page_marker.is_empty() {
            return Err(SiteGrantError::config("page_marker must not be empty"));
        }
        if self.iframe_marker.is_empty() {
            return Err(SiteGrantError::config("iframe_marker must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = ClassifierConfig::from_yaml("iframe_marker: embed.js\n").unwrap();
        assert_eq!(config.iframe_marker, "embed.js");
        assert_eq!(config.page_marker, "content/page_");
        assert_eq!(config.wildcard_origin, "<all_urls>");
    }

    #[test]
    fn test_empty_marker_rejected() {
        let err = ClassifierConfig::from_yaml("page_marker: \"\"\n").unwrap_err();
        assert!(matches!(err, SiteGrantError::Config(_)));
    }
}
