use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::Result;
use crate::host::{Flag, HostId, HostPolicy, ListKind};

use super::{add_to, remove_from, HostRepository, ListEdit};

/// In-process repository: `host_id -> HostPolicy`.
///
/// Edits run under the DashMap shard lock of the entry, so each call is atomic.
#[derive(Default)]
pub struct MemoryRepository {
    hosts: DashMap<HostId, HostPolicy>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self { hosts: DashMap::new() }
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    fn edit(&self, id: &HostId, f: impl FnOnce(&mut HostPolicy) -> ListEdit) -> ListEdit {
        match self.hosts.get_mut(id) {
            Some(mut entry) => f(entry.value_mut()),
            None => ListEdit::Missing,
        }
    }
}

impl HostRepository for MemoryRepository {
    fn insert_if_absent(&self, policy: HostPolicy) -> Result<bool> {
        match self.hosts.entry(policy.id.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(policy);
                Ok(true)
            }
        }
    }

    fn get(&self, id: &HostId) -> Result<Option<HostPolicy>> {
        Ok(self.hosts.get(id).map(|r| r.value().clone()))
    }

    fn contains(&self, id: &HostId) -> Result<bool> {
        Ok(self.hosts.contains_key(id))
    }

    fn set_flag(&self, id: &HostId, flag: Flag, value: bool) -> Result<bool> {
        let Some(mut entry) = self.hosts.get_mut(id) else {
            return Ok(false);
        };
        entry.value_mut().set_flag(flag, value);
        Ok(true)
    }

    fn add_member(&self, id: &HostId, list: ListKind, member: &HostId) -> Result<ListEdit> {
        Ok(self.edit(id, |p| add_to(p, list, member)))
    }

    fn remove_member(&self, id: &HostId, list: ListKind, member: &HostId) -> Result<ListEdit> {
        Ok(self.edit(id, |p| remove_from(p, list, member)))
    }
}
