//! Longest-prefix route matching for incoming request paths.
//!
//! [`match_route`] walks entries that are already sorted by descending
//! prefix length and returns the first whose prefix equals the path or
//! is followed by `/` in it. Because of the ordering, the first hit is
//! also the most specific one: with `/a` and `/ab` configured, `/ab/x`
//! always resolves to `/ab`.

use crate::config::model::{MatchResult, RouteEntry};

#[must_use]
pub fn match_route<'a>(entries: &'a [RouteEntry], path: &str) -> Option<MatchResult<'a>> {
    entries
        .iter()
        .find(|entry| entry.matches(path))
        .map(MatchResult::from)
}
