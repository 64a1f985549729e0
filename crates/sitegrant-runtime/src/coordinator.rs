//! Grant Coordinator - Reconcile requirement groups against the host
//!
//! The coordinator owns the classified [`RequirementSet`] and is the only
//! writer of group statuses. Two operations drive it:
//! - `check_status`: read the host's grants once, then settle every group
//!   concurrently against that snapshot
//! - `request_grants`: ask the host for every required origin in one call,
//!   then run a full `check_status`

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use sitegrant_core::{
    Classifier, ClassifierConfig, GrantStatus, GroupLabel, GroupSnapshot, HostAuthority,
    ManifestDescriptor, RequirementGroup, RequirementSet, SiteGrantResult,
};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Events emitted by the grant coordinator
#[derive(Debug, Clone)]
pub enum GrantEvent {
    /// A group's status moved to a new value
    StatusChanged {
        group: String,
        from: GrantStatus,
        to: GrantStatus,
        at: DateTime<Utc>,
    },
    /// A bulk grant request was sent to the host
    RequestIssued {
        origins: Vec<String>,
        at: DateTime<Utc>,
    },
    /// The host answered a bulk grant request
    RequestCompleted { granted: bool, at: DateTime<Utc> },
    /// Every group has been reconciled
    CheckCompleted {
        granted: usize,
        denied: usize,
        at: DateTime<Utc>,
    },
}

pub struct GrantCoordinator {
    requirements: RequirementSet,
    authority: Arc<dyn HostAuthority>,
    event_tx: Option<mpsc::Sender<GrantEvent>>,
}

impl GrantCoordinator {
    pub fn new(requirements: RequirementSet, authority: Arc<dyn HostAuthority>) -> Self {
        Self {
            requirements,
            authority,
            event_tx: None,
        }
    }

    /// Classify `manifest` once and coordinate the resulting groups
    pub fn from_manifest(
        manifest: &ManifestDescriptor,
        config: ClassifierConfig,
        authority: Arc<dyn HostAuthority>,
    ) -> SiteGrantResult<Self> {
        let requirements = Classifier::new(config)?.classify(manifest);
        Ok(Self::new(requirements, authority))
    }

    /// Set event channel
    ///
    /// Events are sent with `send().await`, so a full channel suspends
    /// `check_status` and `request_grants` until the receiver drains it.
    /// Size the buffer for at least one event per group plus three, or keep
    /// the receiver polling.
    pub fn with_event_channel(mut self, tx: mpsc::Sender<GrantEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    pub fn required(&self) -> &RequirementGroup {
        &self.requirements.required
    }

    pub fn player(&self) -> &RequirementGroup {
        &self.requirements.player
    }

    pub fn pages(&self) -> &[RequirementGroup] {
        &self.requirements.pages
    }

    pub fn page(&self, name: &str) -> Option<&RequirementGroup> {
        self.requirements.page(name)
    }

    /// Every group: required, player, then pages in declaration order
    pub fn groups(&self) -> impl Iterator<Item = (GroupLabel, &RequirementGroup)> {
        self.requirements.groups()
    }

    pub fn requirements(&self) -> &RequirementSet {
        &self.requirements
    }

    pub fn snapshot(&self) -> Vec<GroupSnapshot> {
        self.requirements.snapshot()
    }

    pub fn request_origins(&self) -> Vec<String> {
        self.requirements.request_origins()
    }

    /// Reconcile every group's status with the host's current grants
    ///
    /// On error, groups already settled keep their new status and the rest
    /// keep their old one.
    pub async fn check_status(&self) -> SiteGrantResult<()> {
        let snapshot: HashSet<String> = self
            .authority
            .granted_origins()
            .await?
            .into_iter()
            .collect();

        let checks = self
            .requirements
            .groups()
            .map(|(label, group)| self.reconcile(label, group, &snapshot));
        let outcomes = try_join_all(checks).await?;

        let granted = outcomes.iter().filter(|s| s.is_granted()).count();
        let denied = outcomes.len() - granted;
        debug!(granted, denied, "Grant status check completed");

        self.emit_event(GrantEvent::CheckCompleted {
            granted,
            denied,
            at: Utc::now(),
        })
        .await;

        Ok(())
    }

    /// Ask the host for every required origin, then re-check all groups
    ///
    /// The returned flag is the host's coarse answer; group statuses say
    /// which groups actually gained access.
    pub async fn request_grants(&self) -> SiteGrantResult<bool> {
        let origins = self.requirements.request_origins();
        info!("Requesting {} origins from host authority", origins.len());

        self.emit_event(GrantEvent::RequestIssued {
            origins: origins.clone(),
            at: Utc::now(),
        })
        .await;

        let granted = self.authority.request(&origins).await?;
        info!(granted, "Host authority answered grant request");

        self.emit_event(GrantEvent::RequestCompleted {
            granted,
            at: Utc::now(),
        })
        .await;

        self.check_status().await?;

        Ok(granted)
    }

    async fn reconcile(
        &self,
        label: GroupLabel,
        group: &RequirementGroup,
        snapshot: &HashSet<String>,
    ) -> SiteGrantResult<GrantStatus> {
        let status = self.evaluate(&label, group, snapshot).await?;
        let previous = group.status_cell().publish(status);
        debug!(group = %label, %status, "Reconciled requirement group");

        if previous != status {
            self.emit_event(GrantEvent::StatusChanged {
                group: label.to_string(),
                from: previous,
                to: status,
                at: Utc::now(),
            })
            .await;
        }

        Ok(status)
    }

    async fn evaluate(
        &self,
        label: &GroupLabel,
        group: &RequirementGroup,
        snapshot: &HashSet<String>,
    ) -> SiteGrantResult<GrantStatus> {
        let listed = group
            .match_patterns
            .iter()
            .all(|pattern| snapshot.contains(pattern));

        // The bulk listing misses patterns covered by broader grants
        if !listed {
            if !self.authority.contains(&group.match_patterns).await? {
                return Ok(GrantStatus::Denied);
            }
            debug!(group = %label, "Match patterns covered by a broader grant");
        }

        if let Some(extra) = &group.extra_origins {
            if !self.authority.contains(extra).await? {
                return Ok(GrantStatus::Denied);
            }
        }

        Ok(GrantStatus::Granted)
    }

    async fn emit_event(&self, event: GrantEvent) {
        if let Some(ref tx) = self.event_tx {
            let _ = tx.send(event).await;
        }
    }
}
