//! Host identifiers and the per-host visitor policy record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HostgateError, Result};

/// Canonical host identifier.
///
/// Identity is case-insensitive: every `HostId` holds the trimmed, uppercased
/// form, so equality and hashing never see two spellings of the same host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HostId(String);

impl HostId {
    /// Canonicalize a raw identifier. Empty (or all-whitespace) ids are rejected.
    pub fn new(raw: &str) -> Result<Self> {
        let id = raw.trim();
        if id.is_empty() {
            return Err(HostgateError::InvalidArgument("host id must not be empty".into()));
        }
        Ok(Self(id.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for HostId {
    type Error = HostgateError;

    fn try_from(raw: String) -> Result<Self> {
        HostId::new(&raw)
    }
}

impl From<HostId> for String {
    fn from(id: HostId) -> Self {
        id.0
    }
}

/// The two relationship lists a host maintains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Friends,
    Banlist,
}

impl ListKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ListKind::Friends => "friends",
            ListKind::Banlist => "banlist",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two boolean policy flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    OnlyFriends,
    AllowNonames,
}

impl Flag {
    pub fn as_str(self) -> &'static str {
        match self {
            Flag::OnlyFriends => "only_friends",
            Flag::AllowNonames => "allow_nonames",
        }
    }
}

/// Visitor policy of one host.
///
/// `friends` and `banlist` keep insertion order but hold each member at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostPolicy {
    #[serde(rename = "uuid")]
    pub id: HostId,
    pub only_friends: bool,
    pub allow_nonames: bool,
    #[serde(default)]
    pub friends: Vec<HostId>,
    #[serde(default)]
    pub banlist: Vec<HostId>,
}

impl HostPolicy {
    /// Fresh record: friends only, no anonymous visitors, empty lists.
    pub fn new(id: HostId) -> Self {
        Self {
            id,
            only_friends: true,
            allow_nonames: false,
            friends: Vec::new(),
            banlist: Vec::new(),
        }
    }

    pub fn list(&self, kind: ListKind) -> &[HostId] {
        match kind {
            ListKind::Friends => &self.friends,
            ListKind::Banlist => &self.banlist,
        }
    }

    pub fn list_mut(&mut self, kind: ListKind) -> &mut Vec<HostId> {
        match kind {
            ListKind::Friends => &mut self.friends,
            ListKind::Banlist => &mut self.banlist,
        }
    }

    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        match flag {
            Flag::OnlyFriends => self.only_friends = value,
            Flag::AllowNonames => self.allow_nonames = value,
        }
    }

    pub fn is_friend(&self, id: &HostId) -> bool {
        self.friends.contains(id)
    }

    pub fn is_banned(&self, id: &HostId) -> bool {
        self.banlist.contains(id)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn ids_are_case_insensitive() {
        assert_eq!(HostId::new("testee").unwrap(), HostId::new("TeStEe").unwrap());
        assert_eq!(HostId::new("  other_guy ").unwrap().as_str(), "OTHER_GUY");
    }

    #[test]
    fn empty_id_rejected() {
        assert!(matches!(HostId::new("   "), Err(HostgateError::InvalidArgument(_))));
    }

    #[test]
    fn record_json_shape() {
        let rec = HostPolicy::new(HostId::new("testee").unwrap());
        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "uuid": "TESTEE",
                "only_friends": true,
                "allow_nonames": false,
                "friends": [],
                "banlist": []
            })
        );
    }

    #[test]
    fn deserialize_canonicalizes() {
        let rec: HostPolicy = serde_json::from_str(
            r#"{"uuid":"abc","only_friends":false,"allow_nonames":true,"friends":["x"]}"#,
        )
        .unwrap();
        assert_eq!(rec.id.as_str(), "ABC");
        assert_eq!(rec.friends, vec![HostId::new("X").unwrap()]);
        assert!(rec.banlist.is_empty());
    }
}
