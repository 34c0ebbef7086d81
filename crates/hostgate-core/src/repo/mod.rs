//! Persistence contract for host policy records.
//!
//! The store only needs keyed insert-if-absent, get, flag update, and
//! single-element list edits. Each call is atomic on its own; nothing here
//! spans more than one call.

pub mod json_file;
pub mod memory;

use crate::error::Result;
use crate::host::{Flag, HostId, HostPolicy, ListKind};

pub use json_file::JsonFileRepository;
pub use memory::MemoryRepository;

/// Result of a list edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEdit {
    /// No record for the host.
    Missing,
    Changed,
    /// Add of a present member, or remove of an absent one.
    Unchanged,
}

pub trait HostRepository: Send + Sync {
    /// Insert `policy` unless its id is taken. Returns false when taken.
    fn insert_if_absent(&self, policy: HostPolicy) -> Result<bool>;

    fn get(&self, id: &HostId) -> Result<Option<HostPolicy>>;

    fn contains(&self, id: &HostId) -> Result<bool> {
        Ok(self.get(id)?.is_some())
    }

    /// Overwrite a flag. Returns false when no record exists.
    fn set_flag(&self, id: &HostId, flag: Flag, value: bool) -> Result<bool>;

    fn add_member(&self, id: &HostId, list: ListKind, member: &HostId) -> Result<ListEdit>;

    fn remove_member(&self, id: &HostId, list: ListKind, member: &HostId) -> Result<ListEdit>;
}

pub(crate) fn add_to(policy: &mut HostPolicy, list: ListKind, member: &HostId) -> ListEdit {
    if policy.list(list).contains(member) {
        return ListEdit::Unchanged;
    }
    policy.list_mut(list).push(member.clone());
    ListEdit::Changed
}

pub(crate) fn remove_from(policy: &mut HostPolicy, list: ListKind, member: &HostId) -> ListEdit {
    let members = policy.list_mut(list);
    match members.iter().position(|m| m == member) {
        Some(idx) => {
            members.remove(idx);
            ListEdit::Changed
        }
        None => ListEdit::Unchanged,
    }
}
