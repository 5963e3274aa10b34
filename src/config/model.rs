//! Data structures for the route table.
//!
//! Contains [`RouteEntry`] (one prefix → upstream mapping) and
//! [`MatchResult`] (the entry selected for a request, borrowed from the
//! table). Entries are validated on construction and never mutated.

use serde::Serialize;

use super::validation;
use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    prefix: String,
    upstream: String,
}

impl RouteEntry {
    /// Build an entry from a prefix and an absolute base URL.
    ///
    /// A trailing slash on the base URL is stripped so that
    /// `upstream + remaining_path` never produces `//`.
    pub fn new(
        prefix: impl Into<String>,
        upstream: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let prefix = prefix.into();
        let upstream = upstream.into();
        let upstream = upstream.trim_end_matches('/').to_string();

        validation::validate_prefix(&prefix).map_err(|message| ValidationError {
            entry: prefix.clone(),
            field: "prefix".into(),
            message,
            suggestion: None,
        })?;
        validation::validate_base_url(&upstream).map_err(|message| ValidationError {
            entry: prefix.clone(),
            field: "upstream".into(),
            message,
            suggestion: None,
        })?;

        Ok(Self { prefix, upstream })
    }

    /// Build the entry for a short key and a bare hostname:
    /// `/key` → `https://host`.
    pub fn from_host(key: &str, host: &str) -> Result<Self, ValidationError> {
        validation::validate_key(key).map_err(|message| ValidationError {
            entry: key.to_string(),
            field: "key".into(),
            message,
            suggestion: None,
        })?;
        validation::validate_host(host).map_err(|message| ValidationError {
            entry: key.to_string(),
            field: "host".into(),
            message,
            suggestion: None,
        })?;
        Self::new(format!("/{key}"), format!("https://{host}"))
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn upstream(&self) -> &str {
        &self.upstream
    }

    /// `true` when `path` is the prefix itself or lies beneath it.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        path.strip_prefix(self.prefix.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }
}

/// The route selected for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult<'a> {
    pub prefix: &'a str,
    pub upstream: &'a str,
}

impl<'a> From<&'a RouteEntry> for MatchResult<'a> {
    fn from(entry: &'a RouteEntry) -> Self {
        Self {
            prefix: &entry.prefix,
            upstream: &entry.upstream,
        }
    }
}

impl MatchResult<'_> {
    /// The inbound path with the matched prefix removed: empty, or
    /// starting with `/`.
    #[must_use]
    pub fn remaining_path<'p>(&self, path: &'p str) -> &'p str {
        path.strip_prefix(self.prefix).unwrap_or(path)
    }
}
