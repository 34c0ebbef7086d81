//! Welcome decision.
//!
//! Rules are evaluated in a fixed order and the first one that matches wins:
//! anonymous check, friends-only check, ban check. A ban therefore overrides
//! friendship.

use crate::host::{HostId, HostPolicy};

/// Outcome of evaluating a visitor against a host policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Welcome,
    /// Visitor is anonymous and the host does not allow nonames.
    Anonymous,
    /// Host accepts friends only and the visitor is not one.
    NotFriend,
    Banned,
}

impl Verdict {
    pub fn is_welcome(self) -> bool {
        matches!(self, Verdict::Welcome)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Welcome => "welcome",
            Verdict::Anonymous => "nonames are not allowed",
            Verdict::NotFriend => "not a friend",
            Verdict::Banned => "banned",
        }
    }
}

/// Evaluate `visitor` (None = anonymous) against `host`.
pub fn judge(host: &HostPolicy, visitor: Option<&HostId>) -> Verdict {
    if !host.allow_nonames && visitor.is_none() {
        return Verdict::Anonymous;
    }

    // An anonymous visitor is never in `friends`.
    if host.only_friends && !visitor.is_some_and(|v| host.is_friend(v)) {
        return Verdict::NotFriend;
    }

    if visitor.is_some_and(|v| host.is_banned(v)) {
        return Verdict::Banned;
    }

    Verdict::Welcome
}
