//! Extension manifest descriptor
//!
//! Only the parts of the manifest that carry site-access requirements are
//! modelled: the top-level `host_permissions` list and the `content_scripts`
//! rules. Every other manifest key is ignored.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{SiteGrantError, SiteGrantResult};

/// Manifest snapshot consumed by the classifier
///
/// Example:
/// ```json
/// {
///   "host_permissions": ["<all_urls>", "https://api.example.com/*"],
///   "content_scripts": [
///     { "matches": ["https://a.example/*"], "js": ["content/index.js"] },
///     { "matches": ["https://b.example/*"], "js": ["content/page_chat.js"] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestDescriptor {
    /// Origins declared at the top level of the manifest
    pub host_permissions: Vec<String>,

    /// Content-script injection rules
    pub content_scripts: Vec<ContentScriptRule>,
}

/// One content-script rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentScriptRule {
    /// Origin match patterns the scripts are injected into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<String>>,

    /// Injected script filenames
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub js: Vec<String>,
}

impl ContentScriptRule {
    pub fn new(matches: Vec<String>, js: Vec<String>) -> Self {
        Self {
            matches: Some(matches),
            js,
        }
    }
}

impl ManifestDescriptor {
    /// Parse a manifest from JSON text
    ///
    /// Parse failures report the JSON path of the offending field.
    pub fn from_json_str(json: &str) -> SiteGrantResult<Self> {
        let de = &mut serde_json::Deserializer::from_str(json);
        serde_path_to_error::deserialize(de).map_err(|e| {
            SiteGrantError::manifest(format!(
                "Failed to parse manifest at '{}': {}",
                e.path(),
                e.inner()
            ))
        })
    }

    /// Load a manifest from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> SiteGrantResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SiteGrantError::manifest(format!(
                "Failed to read manifest file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest() {
        let json = r#"{
            "manifest_version": 3,
            "name": "Example",
            "host_permissions": ["<all_urls>", "https://api.example.com/*"],
            "content_scripts": [
                { "matches": ["https://a.example/*"], "js": ["content/index.js"], "run_at": "document_end" },
                { "css": ["style.css"] }
            ]
        }"#;

        let manifest = ManifestDescriptor::from_json_str(json).unwrap();
        assert_eq!(manifest.host_permissions.len(), 2);
        assert_eq!(manifest.content_scripts.len(), 2);
        assert_eq!(
            manifest.content_scripts[0].matches,
            Some(vec!["https://a.example/*".to_string()])
        );
        assert!(manifest.content_scripts[1].matches.is_none());
        assert!(manifest.content_scripts[1].js.is_empty());
    }

    #[test]
    fn test_missing_host_permissions_is_an_error() {
        let json = r#"{ "content_scripts": [] }"#;
        let err = ManifestDescriptor::from_json_str(json).unwrap_err();
        assert!(matches!(err, SiteGrantError::Manifest(_)));
        assert!(err.to_string().contains("host_permissions"));
    }

    #[test]
    fn test_error_reports_json_path() {
        let json = r#"{
            "host_permissions": [],
            "content_scripts": [ { "matches": "https://a.example/*" } ]
        }"#;
        let err = ManifestDescriptor::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("content_scripts[0].matches"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::write(
            &path,
            r#"{ "host_permissions": [], "content_scripts": [] }"#,
        )
        .unwrap();

        let manifest = ManifestDescriptor::from_file(&path).unwrap();
        assert!(manifest.content_scripts.is_empty());

        let missing = ManifestDescriptor::from_file(dir.path().join("nope.json"));
        assert!(matches!(missing, Err(SiteGrantError::Manifest(_))));
    }
}
