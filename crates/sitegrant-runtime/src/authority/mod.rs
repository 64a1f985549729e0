//! Host authority backends
//!
//! - **InMemoryAuthority**: ephemeral grant store, used for tests and embedding
//! - **FileAuthority**: JSON-file grant store that survives restarts
//!
//! Both answer `contains` by pattern coverage and settle `request` through a
//! [`RequestPolicy`] standing in for the host's permission prompt.

pub mod file;
pub mod memory;

pub use file::FileAuthority;
pub use memory::InMemoryAuthority;

use sitegrant_core::{is_covered, MatchPattern, SiteGrantError, SiteGrantResult};
use std::io::{self, BufRead, Write};

/// How a grant request is answered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestPolicy {
    ApproveAll,
    #[default]
    DenyAll,
    /// Approve only these exact origins
    ApproveOnly(Vec<String>),
    /// Ask on the terminal; all or nothing
    Prompt,
}

impl std::str::FromStr for RequestPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "approve" | "approve-all" => Ok(Self::ApproveAll),
            "deny" | "deny-all" => Ok(Self::DenyAll),
            "prompt" => Ok(Self::Prompt),
            _ => Err(format!("Unknown request policy: {}", s)),
        }
    }
}

impl RequestPolicy {
    /// The subset of `origins` this policy approves
    pub async fn decide(&self, origins: &[String]) -> SiteGrantResult<Vec<String>> {
        match self {
            Self::ApproveAll => Ok(origins.to_vec()),
            Self::DenyAll => Ok(Vec::new()),
            Self::ApproveOnly(allowed) => Ok(origins
                .iter()
                .filter(|o| allowed.contains(o))
                .cloned()
                .collect()),
            Self::Prompt => {
                let listed = origins.to_vec();
                let approved = tokio::task::spawn_blocking(move || prompt(&listed))
                    .await
                    .map_err(|e| SiteGrantError::authority(format!("Prompt task failed: {}", e)))??;
                Ok(if approved { origins.to_vec() } else { Vec::new() })
            }
        }
    }
}

fn prompt(origins: &[String]) -> SiteGrantResult<bool> {
    let mut stderr = io::stderr();
    writeln!(stderr, "Site access requested for {} origins:", origins.len())?;
    for origin in origins {
        writeln!(stderr, "  - {}", origin)?;
    }
    write!(stderr, "Allow? [y/N] ")?;
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Parse and validate origins before they enter a grant store
pub(crate) fn parse_all(origins: &[String]) -> SiteGrantResult<Vec<MatchPattern>> {
    origins.iter().map(|o| MatchPattern::parse(o)).collect()
}

/// True when every requested origin is covered by some granted origin
pub(crate) fn covers_all(granted: &[String], requested: &[String]) -> SiteGrantResult<bool> {
    let requested = parse_all(requested)?;
    let granted: Vec<MatchPattern> = granted
        .iter()
        .filter_map(|g| MatchPattern::parse(g).ok())
        .collect();
    Ok(requested.iter().all(|r| is_covered(&granted, r)))
}
