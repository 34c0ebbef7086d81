//! Host Policy Store: the operations the request layer calls.
//!
//! Every entry point takes raw identifiers and canonicalizes them itself.
//! Preconditions are checked in a fixed order (self reference, other party,
//! this party, list membership) and always before the write.

use std::sync::Arc;

use crate::error::{HostgateError, Result};
use crate::host::{Flag, HostId, HostPolicy, ListKind};
use crate::policy::{judge, Verdict};
use crate::repo::{HostRepository, ListEdit, MemoryRepository};

/// Cheap to clone; all clones share one repository.
#[derive(Clone)]
pub struct HostPolicyStore {
    repo: Arc<dyn HostRepository>,
}

impl HostPolicyStore {
    pub fn new(repo: Arc<dyn HostRepository>) -> Self {
        Self { repo }
    }

    /// Store backed by a fresh in-process repository.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryRepository::new()))
    }

    pub fn create(&self, id: &str) -> Result<HostPolicy> {
        let id = HostId::new(id)?;
        let policy = HostPolicy::new(id.clone());
        if !self.repo.insert_if_absent(policy.clone())? {
            return Err(HostgateError::AlreadyExists(id));
        }
        tracing::info!(host = %id, "host created");
        Ok(policy)
    }

    pub fn get(&self, id: &str) -> Result<HostPolicy> {
        let id = HostId::new(id)?;
        self.fetch(&id)
    }

    pub fn set_only_friends(&self, id: &str, value: bool) -> Result<()> {
        self.set_flag(id, Flag::OnlyFriends, value)
    }

    pub fn set_allow_nonames(&self, id: &str, value: bool) -> Result<()> {
        self.set_flag(id, Flag::AllowNonames, value)
    }

    pub fn befriend(&self, id: &str, other: &str) -> Result<()> {
        self.add_member(id, other, ListKind::Friends)
    }

    pub fn unfriend(&self, id: &str, other: &str) -> Result<()> {
        self.remove_member(id, other, ListKind::Friends)
    }

    pub fn ban(&self, id: &str, other: &str) -> Result<()> {
        self.add_member(id, other, ListKind::Banlist)
    }

    pub fn unban(&self, id: &str, other: &str) -> Result<()> {
        self.remove_member(id, other, ListKind::Banlist)
    }

    /// Whether `visitor` (None = anonymous) is welcome at host `id`.
    ///
    /// The host is looked up before the visitor id is checked, so an unknown
    /// host is reported as such whatever the visitor.
    pub fn welcomes(&self, id: &str, visitor: Option<&str>) -> Result<bool> {
        let id = HostId::new(id)?;
        let host = self.fetch(&id)?;
        let visitor = visitor.map(HostId::new).transpose()?;

        let verdict = judge(&host, visitor.as_ref());
        log_verdict(&id, visitor.as_ref(), verdict);
        Ok(verdict.is_welcome())
    }

    /// Keep the visitors welcome at host `id`, in input order.
    ///
    /// The host record is fetched once and every visitor is judged against it.
    /// Blank visitor ids name no one and are dropped.
    pub fn filter_welcomes<S: AsRef<str>>(
        &self,
        id: &str,
        visitors: &[S],
    ) -> Result<Vec<HostId>> {
        let id = HostId::new(id)?;
        let host = self.fetch(&id)?;

        Ok(visitors
            .iter()
            .filter_map(|raw| {
                let raw: &str = raw.as_ref();
                match HostId::new(raw) {
                    Ok(v) => Some(v),
                    Err(_) => {
                        tracing::debug!(host = %id, visitor = raw, "blank visitor skipped");
                        None
                    }
                }
            })
            .filter(|v| {
                let verdict = judge(&host, Some(v));
                log_verdict(&id, Some(v), verdict);
                verdict.is_welcome()
            })
            .collect())
    }

    fn fetch(&self, id: &HostId) -> Result<HostPolicy> {
        self.repo
            .get(id)?
            .ok_or_else(|| HostgateError::not_found_this(id))
    }

    fn set_flag(&self, id: &str, flag: Flag, value: bool) -> Result<()> {
        let id = HostId::new(id)?;
        if !self.repo.set_flag(&id, flag, value)? {
            return Err(HostgateError::not_found_this(&id));
        }
        tracing::debug!(host = %id, flag = flag.as_str(), value, "flag set");
        Ok(())
    }

    fn add_member(&self, id: &str, other: &str, list: ListKind) -> Result<()> {
        let id = HostId::new(id)?;
        let other = HostId::new(other)?;

        if id == other {
            return Err(HostgateError::InvalidArgument(format!(
                "{id} cannot add itself to its {list}"
            )));
        }
        if !self.repo.contains(&other)? {
            return Err(HostgateError::not_found_other(&other));
        }

        match self.repo.add_member(&id, list, &other)? {
            ListEdit::Missing => Err(HostgateError::not_found_this(&id)),
            ListEdit::Changed => {
                tracing::debug!(
                    host = %id,
                    other = %other,
                    list = list.as_str(),
                    "member added"
                );
                Ok(())
            }
            ListEdit::Unchanged => {
                tracing::debug!(
                    host = %id,
                    other = %other,
                    list = list.as_str(),
                    "member already listed"
                );
                Ok(())
            }
        }
    }

    fn remove_member(&self, id: &str, other: &str, list: ListKind) -> Result<()> {
        let id = HostId::new(id)?;
        let other = HostId::new(other)?;

        if !self.repo.contains(&other)? {
            return Err(HostgateError::not_found_other(&other));
        }

        match self.repo.remove_member(&id, list, &other)? {
            ListEdit::Missing => Err(HostgateError::not_found_this(&id)),
            ListEdit::Unchanged => Err(HostgateError::NotListed { list, host: id, member: other }),
            ListEdit::Changed => {
                tracing::debug!(
                    host = %id,
                    other = %other,
                    list = list.as_str(),
                    "member removed"
                );
                Ok(())
            }
        }
    }
}

fn log_verdict(host: &HostId, visitor: Option<&HostId>, verdict: Verdict) {
    let visitor = visitor.map(HostId::as_str).unwrap_or("<anonymous>");
    if verdict.is_welcome() {
        tracing::debug!(host = %host, visitor, "welcome");
    } else {
        tracing::debug!(host = %host, visitor, reason = verdict.as_str(), "not welcome");
    }
}
