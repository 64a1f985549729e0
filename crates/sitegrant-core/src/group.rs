//! Requirement groups produced by classification

use serde::{Deserialize, Serialize};

use crate::status::{GrantStatus, StatusCell};

/// One classification bucket sharing a single grant-status lifecycle
#[derive(Debug, Clone, Default)]
pub struct RequirementGroup {
    /// Feature name, set only for page groups
    pub name: Option<String>,

    /// Origin match patterns in declaration order (duplicates kept)
    pub match_patterns: Vec<String>,

    /// Origins granted independently of `match_patterns`
    pub extra_origins: Option<Vec<String>>,

    status: StatusCell,
}

impl RequirementGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>, match_patterns: Vec<String>) -> Self {
        Self {
            name: Some(name.into()),
            match_patterns,
            ..Self::default()
        }
    }

    pub fn with_extra_origins(mut self, origins: Vec<String>) -> Self {
        self.extra_origins = Some(origins);
        self
    }

    pub fn status(&self) -> GrantStatus {
        self.status.get()
    }

    /// The observable cell backing [`RequirementGroup::status`]
    pub fn status_cell(&self) -> &StatusCell {
        &self.status
    }
}

/// The aggregate produced by classification
#[derive(Debug, Clone, Default)]
pub struct RequirementSet {
    pub required: RequirementGroup,
    pub player: RequirementGroup,
    pub pages: Vec<RequirementGroup>,
}

impl RequirementSet {
    /// Every group: required, player, then pages in declaration order
    pub fn groups(&self) -> impl Iterator<Item = (GroupLabel, &RequirementGroup)> {
        [
            (GroupLabel::Required, &self.required),
            (GroupLabel::Player, &self.player),
        ]
        .into_iter()
        .chain(self.pages.iter().map(|page| {
            let label = GroupLabel::Page(page.name.clone().unwrap_or_default());
            (label, page)
        }))
    }

    pub fn page(&self, name: &str) -> Option<&RequirementGroup> {
        self.pages.iter().find(|p| p.name.as_deref() == Some(name))
    }

    /// Origins to ask the host for, in request order, not deduplicated
    pub fn request_origins(&self) -> Vec<String> {
        let mut origins = self.required.match_patterns.clone();
        if let Some(extra) = &self.required.extra_origins {
            origins.extend(extra.iter().cloned());
        }
        origins.extend(self.player.match_patterns.iter().cloned());
        origins.extend(
            self.pages
                .iter()
                .flat_map(|page| page.match_patterns.iter().cloned()),
        );
        origins
    }

    pub fn snapshot(&self) -> Vec<GroupSnapshot> {
        self.groups()
            .map(|(label, group)| GroupSnapshot::of(label, group))
            .collect()
    }
}

/// Which bucket a group is
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupLabel {
    Required,
    Player,
    Page(String),
}

impl std::fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required => write!(f, "required"),
            Self::Player => write!(f, "player"),
            Self::Page(name) => write!(f, "page:{}", name),
        }
    }
}

/// Serializable point-in-time view of a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSnapshot {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub matches: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_origins: Option<Vec<String>>,
    pub status: GrantStatus,
}

impl GroupSnapshot {
    pub fn of(label: GroupLabel, group: &RequirementGroup) -> Self {
        Self {
            label: label.to_string(),
            name: group.name.clone(),
            matches: group.match_patterns.clone(),
            extra_origins: group.extra_origins.clone(),
            status: group.status(),
        }
    }
}
