//! Origin match patterns
//!
//! Hosts answer "is this granted" by coverage, not string equality: a grant
//! for `https://*.example.com/*` also satisfies `https://www.example.com/*`.
//! This module models that relation.
//!
//! Grammar: `<all_urls>` or `<scheme>://<host><path>`
//! - scheme: `*`, `http`, `https`, `ws`, `wss`, `ftp`, `file`
//! - host: `*`, `*.<domain>`, or an exact host (empty for `file`)
//! - path: starts with `/`, `*` matches any run of characters

use regex::Regex;
use std::fmt;
use std::str::FromStr;

use crate::error::{SiteGrantError, SiteGrantResult};

pub const ALL_URLS: &str = "<all_urls>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// `*` - http and https only
    Any,
    Http,
    Https,
    Ws,
    Wss,
    Ftp,
    File,
}

impl Scheme {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "*" => Some(Self::Any),
            "http" => Some(Self::Http),
            "https" => Some(Self::Https),
            "ws" => Some(Self::Ws),
            "wss" => Some(Self::Wss),
            "ftp" => Some(Self::Ftp),
            "file" => Some(Self::File),
            _ => None,
        }
    }

    fn covers(self, other: Scheme) -> bool {
        match self {
            Self::Any => matches!(other, Self::Any | Self::Http | Self::Https),
            _ => self == other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostPattern {
    Any,
    /// `*.domain` - the domain itself and every subdomain
    Subdomains(String),
    Exact(String),
}

impl HostPattern {
    fn parse(raw: &str) -> Result<Self, &'static str> {
        if raw == "*" {
            return Ok(Self::Any);
        }
        if let Some(domain) = raw.strip_prefix("*.") {
            if domain.is_empty() || domain.contains('*') {
                return Err("wildcard host must be '*' or '*.<domain>'");
            }
            return Ok(Self::Subdomains(domain.to_ascii_lowercase()));
        }
        if raw.contains('*') {
            return Err("wildcard host must be '*' or '*.<domain>'");
        }
        Ok(Self::Exact(raw.to_ascii_lowercase()))
    }

    fn covers(&self, other: &HostPattern) -> bool {
        match (self, other) {
            (Self::Any, _) => true,
            (_, Self::Any) => false,
            (Self::Subdomains(d), Self::Subdomains(o)) | (Self::Subdomains(d), Self::Exact(o)) => {
                o == d || o.ends_with(&format!(".{}", d))
            }
            (Self::Exact(h), Self::Exact(o)) => h == o,
            (Self::Exact(_), Self::Subdomains(_)) => false,
        }
    }
}

#[derive(Debug, Clone)]
enum Kind {
    AllUrls,
    Url {
        scheme: Scheme,
        host: HostPattern,
        path: String,
        path_glob: Regex,
    },
}

/// A parsed origin match pattern
#[derive(Debug, Clone)]
pub struct MatchPattern {
    raw: String,
    kind: Kind,
}

impl MatchPattern {
    pub fn parse(raw: &str) -> SiteGrantResult<Self> {
        if raw == ALL_URLS {
            return Ok(Self {
                raw: raw.to_string(),
                kind: Kind::AllUrls,
            });
        }

        let (scheme_raw, rest) = raw
            .split_once("://")
            .ok_or_else(|| SiteGrantError::invalid_pattern(raw, "missing '://'"))?;
        let scheme = Scheme::parse(scheme_raw).ok_or_else(|| {
            SiteGrantError::invalid_pattern(raw, format!("unsupported scheme '{}'", scheme_raw))
        })?;

        let slash = rest
            .find('/')
            .ok_or_else(|| SiteGrantError::invalid_pattern(raw, "missing path"))?;
        let (host_raw, path) = rest.split_at(slash);

        if host_raw.is_empty() && scheme != Scheme::File {
            return Err(SiteGrantError::invalid_pattern(raw, "missing host"));
        }
        let host = HostPattern::parse(host_raw)
            .map_err(|reason| SiteGrantError::invalid_pattern(raw, reason))?;

        let glob = format!("^{}$", regex::escape(path).replace(r"\*", ".*"));
        let path_glob = Regex::new(&glob)
            .map_err(|e| SiteGrantError::invalid_pattern(raw, e.to_string()))?;

        Ok(Self {
            raw: raw.to_string(),
            kind: Kind::Url {
                scheme,
                host,
                path: path.to_string(),
                path_glob,
            },
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_all_urls(&self) -> bool {
        matches!(self.kind, Kind::AllUrls)
    }

    /// True when every URL matched by `other` is also matched by `self`
    pub fn covers(&self, other: &MatchPattern) -> bool {
        match (&self.kind, &other.kind) {
            (Kind::AllUrls, _) => true,
            (_, Kind::AllUrls) => false,
            (
                Kind::Url {
                    scheme,
                    host,
                    path_glob,
                    ..
                },
                Kind::Url {
                    scheme: other_scheme,
                    host: other_host,
                    path: other_path,
                    ..
                },
            ) => {
                scheme.covers(*other_scheme)
                    && host.covers(other_host)
                    && path_glob.is_match(other_path)
            }
        }
    }
}

impl PartialEq for MatchPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for MatchPattern {}

impl fmt::Display for MatchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl FromStr for MatchPattern {
    type Err = SiteGrantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Whether `granted` covers `requested`, by exact match or by coverage
pub fn is_covered(granted: &[MatchPattern], requested: &MatchPattern) -> bool {
    granted.iter().any(|g| g == requested || g.covers(requested))
}
