//! Route table construction and validation.
//!
//! [`RouteTable`] is built once at startup, either from a key → hostname
//! mapping ([`RouteTable::from_hosts`]) or from pre-built entries
//! ([`RouteTable::new`]), and is shared read-only by every request
//! handler. Submodules provide the data model, validation, and the
//! built-in upstream mapping.

pub mod model;
pub mod upstreams;
pub mod validation;

use std::collections::HashSet;

use crate::error::{GatewayError, ValidationError};
use crate::proxy::routing;
use model::{MatchResult, RouteEntry};

#[derive(Debug, Clone)]
pub struct RouteTable {
    // Sorted by descending prefix length; see `new`.
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Build a table from pre-built entries, rejecting duplicate prefixes.
    pub fn new(mut entries: Vec<RouteEntry>) -> Result<Self, GatewayError> {
        let duplicates: Vec<ValidationError> = {
            let mut seen = HashSet::new();
            entries
                .iter()
                .filter(|entry| !seen.insert(entry.prefix()))
                .map(|entry| ValidationError {
                    entry: entry.prefix().to_string(),
                    field: "prefix".into(),
                    message: "duplicate route prefix".into(),
                    suggestion: None,
                })
                .collect()
        };
        if !duplicates.is_empty() {
            return Err(GatewayError::Configuration { errors: duplicates });
        }

        // Stable sort: equal-length prefixes keep their configured order.
        entries.sort_by_key(|entry| std::cmp::Reverse(entry.prefix().len()));
        Ok(Self { entries })
    }

    /// Build a table from `key → hostname` pairs: `/key` → `https://hostname`.
    pub fn from_hosts<K, H>(upstreams: &[(K, H)]) -> Result<Self, GatewayError>
    where
        K: AsRef<str>,
        H: AsRef<str>,
    {
        validation::validate(upstreams).map_err(|errors| GatewayError::Configuration { errors })?;

        let entries = upstreams
            .iter()
            .map(|(key, host)| RouteEntry::from_host(key.as_ref(), host.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(GatewayError::configuration)?;
        Self::new(entries)
    }

    /// The table for the reference deployment.
    pub fn builtin() -> Result<Self, GatewayError> {
        Self::from_hosts(upstreams::BUILTIN_UPSTREAMS)
    }

    /// Entries in match order (longest prefix first).
    #[must_use]
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<MatchResult<'_>> {
        routing::match_route(&self.entries, path)
    }
}
