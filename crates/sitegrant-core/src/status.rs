//! Grant status and the observable cell that carries it

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

/// Grant status of one requirement group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrantStatus {
    Granted,
    Denied,
    #[default]
    Unknown,
}

impl GrantStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl std::fmt::Display for GrantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Granted => write!(f, "granted"),
            Self::Denied => write!(f, "denied"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for GrantStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "granted" => Ok(Self::Granted),
            "denied" => Ok(Self::Denied),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("Unknown grant status: {}", s)),
        }
    }
}

/// Observable status value
///
/// UI code can poll [`StatusCell::get`] or hold a receiver from
/// [`StatusCell::subscribe`] and await changes. Clones share the same value.
#[derive(Debug, Clone)]
pub struct StatusCell {
    tx: Arc<watch::Sender<GrantStatus>>,
}

impl Default for StatusCell {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusCell {
    /// New cell holding [`GrantStatus::Unknown`]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(GrantStatus::Unknown);
        Self { tx: Arc::new(tx) }
    }

    pub fn get(&self) -> GrantStatus {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<GrantStatus> {
        self.tx.subscribe()
    }

    /// Store a new status and return the previous one
    ///
    /// Subscribers are only woken when the value actually changes. Only the
    /// grant coordinator writes statuses.
    pub fn publish(&self, status: GrantStatus) -> GrantStatus {
        let mut previous = status;
        self.tx.send_if_modified(|current| {
            previous = *current;
            if *current == status {
                false
            } else {
                *current = status;
                true
            }
        });
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_and_parse() {
        assert_eq!(GrantStatus::Granted.to_string(), "granted");
        assert_eq!("DENIED".parse::<GrantStatus>().unwrap(), GrantStatus::Denied);
        assert!("maybe".parse::<GrantStatus>().is_err());
        assert_eq!(
            serde_json::to_string(&GrantStatus::Unknown).unwrap(),
            "\"unknown\""
        );
    }

    #[test]
    fn test_cell_starts_unknown() {
        let cell = StatusCell::new();
        assert_eq!(cell.get(), GrantStatus::Unknown);
    }

    #[tokio::test]
    async fn test_subscriber_sees_change() {
        let cell = StatusCell::new();
        let mut rx = cell.subscribe();

        let previous = cell.publish(GrantStatus::Granted);
        assert_eq!(previous, GrantStatus::Unknown);

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), GrantStatus::Granted);
    }

    #[test]
    fn test_same_value_does_not_notify() {
        let cell = StatusCell::new();
        cell.publish(GrantStatus::Denied);
        let rx = cell.subscribe();

        let previous = cell.publish(GrantStatus::Denied);
        assert_eq!(previous, GrantStatus::Denied);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_clones_share_value() {
        let cell = StatusCell::new();
        let view = cell.clone();
        cell.publish(GrantStatus::Granted);
        assert_eq!(view.get(), GrantStatus::Granted);
    }
}
