//! Scope-set parsing and subset queries
//!
//! Spotify transmits granted permissions as a single space-delimited
//! string. This module parses that wire form into an explicit set of scope
//! tokens so the broker can answer "does the cached token cover this
//! request" with a real subset comparison. Substring tests over the raw
//! string are not an acceptable substitute: `read` is a substring of
//! `user-read-private` without granting anything.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A parsed set of OAuth scope tokens.
///
/// Serializes to and from the space-delimited wire representation. The
/// empty set stands for "no user context required" and is satisfied by
/// every granted set.
///
/// # Examples
///
/// ```
/// use ostinato::auth::ScopeSet;
///
/// let granted = ScopeSet::parse("user-read-playback-state user-top-read");
/// assert!(granted.contains_all(&ScopeSet::parse("user-top-read")));
/// assert!(!granted.contains_all(&ScopeSet::parse("playlist-modify-public")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeSet(BTreeSet<String>);

impl ScopeSet {
    /// Parses a space-delimited scope string. Extra whitespace is ignored.
    pub fn parse(raw: &str) -> Self {
        ScopeSet(
            raw.split_whitespace()
                .map(|token| token.to_string())
                .collect(),
        )
    }

    /// Parses an optional requested-scope string; `None` is the empty set.
    pub fn parse_opt(raw: Option<&str>) -> Self {
        raw.map(Self::parse).unwrap_or_default()
    }

    /// Returns `true` when no scope tokens are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` when every token of `requested` is granted here.
    ///
    /// The comparison is over whole scope tokens; partial token matches
    /// never count.
    pub fn contains_all(&self, requested: &ScopeSet) -> bool {
        requested.0.is_subset(&self.0)
    }

    /// Iterates the scope tokens in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for ScopeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for token in &self.0 {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(token)?;
            first = false;
        }
        Ok(())
    }
}

impl From<&str> for ScopeSet {
    fn from(raw: &str) -> Self {
        ScopeSet::parse(raw)
    }
}

impl Serialize for ScopeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ScopeSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ScopeSet::parse(&raw))
    }
}
