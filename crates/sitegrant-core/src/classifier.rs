//! Requirement Classifier - Partition content-script rules into groups
//!
//! Each content-script rule lands in exactly one bucket:
//! - page: one of its scripts follows the page-feature naming convention
//! - player: one of its scripts is the iframe-embedding script
//! - required: neither convention matched
//!
//! The first script matching either convention decides, so the order of the
//! rule's `js` list matters when both kinds are present.

use tracing::debug;

use crate::config::ClassifierConfig;
use crate::error::SiteGrantResult;
use crate::group::{RequirementGroup, RequirementSet};
use crate::manifest::ManifestDescriptor;

/// What a single script filename is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptKind {
    /// Page-feature script with its derived feature name
    Page(String),
    /// Iframe-embedding script
    Iframe,
}

#[derive(Debug, Clone, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> SiteGrantResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Recognise a script filename
    ///
    /// A name carrying both markers is the iframe-embedding script.
    pub fn script_kind(&self, script: &str) -> Option<ScriptKind> {
        if script.contains(&self.config.iframe_marker) {
            return Some(ScriptKind::Iframe);
        }
        if script.contains(&self.config.page_marker) {
            return Some(ScriptKind::Page(self.feature_name(script)));
        }
        None
    }

    /// Strip everything up to the last page marker, then the extension
    fn feature_name(&self, script: &str) -> String {
        let tail = match script.rfind(&self.config.page_marker) {
            Some(idx) => &script[idx + self.config.page_marker.len()..],
            None => script,
        };
        if self.config.script_extension.is_empty() {
            tail.to_string()
        } else {
            tail.replacen(&self.config.script_extension, "", 1)
        }
    }

    pub fn classify(&self, manifest: &ManifestDescriptor) -> RequirementSet {
        let extra_origins: Vec<String> = manifest
            .host_permissions
            .iter()
            .filter(|origin| **origin != self.config.wildcard_origin)
            .cloned()
            .collect();

        let mut set = RequirementSet {
            required: RequirementGroup::new().with_extra_origins(extra_origins),
            player: RequirementGroup::new(),
            pages: Vec::new(),
        };

        for rule in &manifest.content_scripts {
            let Some(matches) = &rule.matches else {
                continue;
            };

            let kind = rule.js.iter().find_map(|script| self.script_kind(script));
            match kind {
                None => set.required.match_patterns.extend(matches.iter().cloned()),
                Some(ScriptKind::Iframe) => {
                    set.player.match_patterns.extend(matches.iter().cloned())
                }
                Some(ScriptKind::Page(name)) => {
                    set.pages.push(RequirementGroup::named(name, matches.clone()))
                }
            }
        }

        debug!(
            required = set.required.match_patterns.len(),
            player = set.player.match_patterns.len(),
            pages = set.pages.len(),
            "Classified manifest requirements"
        );

        set
    }
}

/// Classify with the default conventions
pub fn classify(manifest: &ManifestDescriptor) -> RequirementSet {
    Classifier::default().classify(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ContentScriptRule;
    use crate::status::GrantStatus;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn manifest(host: &[&str], rules: Vec<ContentScriptRule>) -> ManifestDescriptor {
        ManifestDescriptor {
            host_permissions: strings(host),
            content_scripts: rules,
        }
    }

    fn rule(matches: &[&str], js: &[&str]) -> ContentScriptRule {
        ContentScriptRule::new(strings(matches), strings(js))
    }

    #[test]
    fn test_rule_without_scripts_is_required() {
        let m = manifest(&[], vec![rule(&["https://a.example/*"], &[])]);
        let set = classify(&m);

        assert_eq!(set.required.match_patterns, strings(&["https://a.example/*"]));
        assert!(set.player.match_patterns.is_empty());
        assert!(set.pages.is_empty());
    }

    #[test]
    fn test_page_script_creates_named_group() {
        let m = manifest(
            &[],
            vec![rule(&["https://b.example/*"], &["content/page_chat.js"])],
        );
        let set = classify(&m);

        assert_eq!(set.pages.len(), 1);
        assert_eq!(set.pages[0].name.as_deref(), Some("chat"));
        assert_eq!(set.pages[0].match_patterns, strings(&["https://b.example/*"]));
        assert_eq!(set.pages[0].status(), GrantStatus::Unknown);
        assert!(set.required.match_patterns.is_empty());
    }

    #[test]
    fn test_iframe_script_goes_to_player() {
        let m = manifest(
            &[],
            vec![
                rule(&["https://video.example/*"], &["vendor.js", "content/iframe.js"]),
                rule(&["https://cdn.example/*"], &["iframe.js"]),
            ],
        );
        let set = classify(&m);

        assert_eq!(
            set.player.match_patterns,
            strings(&["https://video.example/*", "https://cdn.example/*"])
        );
        assert!(set.required.match_patterns.is_empty());
        assert!(set.pages.is_empty());
    }

    #[test]
    fn test_first_recognised_script_wins() {
        let m = manifest(
            &[],
            vec![
                rule(&["https://x.example/*"], &["content/page_list.js", "iframe.js"]),
                rule(&["https://y.example/*"], &["iframe.js", "content/page_list.js"]),
            ],
        );
        let set = classify(&m);

        assert_eq!(set.pages.len(), 1);
        assert_eq!(set.pages[0].match_patterns, strings(&["https://x.example/*"]));
        assert_eq!(set.player.match_patterns, strings(&["https://y.example/*"]));
    }

    #[test]
    fn test_rule_without_matches_is_skipped() {
        let m = manifest(
            &[],
            vec![ContentScriptRule {
                matches: None,
                js: strings(&["content/page_chat.js"]),
            }],
        );
        let set = classify(&m);
        assert!(set.pages.is_empty());
        assert!(set.required.match_patterns.is_empty());
    }

    #[test]
    fn test_wildcard_excluded_from_extra_origins() {
        let m = manifest(&["<all_urls>", "https://api.example/*"], vec![]);
        let set = classify(&m);

        assert_eq!(
            set.required.extra_origins,
            Some(strings(&["https://api.example/*"]))
        );
        assert!(set.player.extra_origins.is_none());
    }

    #[test]
    fn test_script_with_both_markers_goes_to_player() {
        let m = manifest(
            &[],
            vec![rule(&["https://v.example/*"], &["content/page_iframe.js"])],
        );
        let set = classify(&m);

        assert_eq!(set.player.match_patterns, strings(&["https://v.example/*"]));
        assert!(set.pages.is_empty());
        assert!(set.required.match_patterns.is_empty());
    }

    #[test]
    fn test_feature_name_strips_nested_prefix() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.script_kind("dist/content/page_anime_list.js"),
            Some(ScriptKind::Page("anime_list".to_string()))
        );
        assert_eq!(
            classifier.script_kind("content/iframe.js"),
            Some(ScriptKind::Iframe)
        );
        assert_eq!(classifier.script_kind("content/index.js"), None);
    }

    #[test]
    fn test_partition_keeps_every_pattern_once_per_rule() {
        let m = manifest(
            &[],
            vec![
                rule(&["https://a.example/*", "https://b.example/*"], &["main.js"]),
                rule(&["https://a.example/*"], &["content/page_chat.js"]),
                rule(&["https://c.example/*"], &["iframe.js"]),
                rule(&["https://d.example/*"], &["content/page_sync.js"]),
            ],
        );
        let set = classify(&m);

        let mut classified: Vec<String> = set
            .groups()
            .flat_map(|(_, g)| g.match_patterns.clone())
            .collect();
        let mut declared: Vec<String> = m
            .content_scripts
            .iter()
            .flat_map(|r| r.matches.clone().unwrap_or_default())
            .collect();
        classified.sort();
        declared.sort();
        assert_eq!(classified, declared);
    }

    #[test]
    fn test_custom_conventions() {
        let config = ClassifierConfig {
            page_marker: "pages/".to_string(),
            iframe_marker: "embed.js".to_string(),
            ..ClassifierConfig::default()
        };
        let classifier = Classifier::new(config).unwrap();
        let m = manifest(
            &[],
            vec![
                rule(&["https://a.example/*"], &["pages/settings.js"]),
                rule(&["https://b.example/*"], &["embed.js"]),
            ],
        );
        let set = classifier.classify(&m);

        assert_eq!(set.pages[0].name.as_deref(), Some("settings"));
        assert_eq!(set.player.match_patterns, strings(&["https://b.example/*"]));
    }
}
