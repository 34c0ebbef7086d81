//! Single-document JSON repository.
//!
//! The whole table lives in memory and is rewritten to disk after every
//! successful mutation (temp file + rename). A failed write rolls the in-memory
//! change back so memory and disk never diverge.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::error::{HostgateError, Result};
use crate::host::{Flag, HostId, HostPolicy, ListKind};

use super::{add_to, remove_from, HostRepository, ListEdit};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    hosts: Vec<HostPolicy>,
}

pub struct JsonFileRepository {
    path: PathBuf,
    hosts: Mutex<BTreeMap<HostId, HostPolicy>>,
}

impl JsonFileRepository {
    /// Open the document at `path`, creating parent directories as needed.
    /// A missing file is an empty table; it is written on the first mutation.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| {
                HostgateError::Storage(format!("create {} failed: {e}", dir.display()))
            })?;
        }

        let hosts = match fs::read_to_string(&path) {
            Ok(s) if s.trim().is_empty() => BTreeMap::new(),
            Ok(s) => {
                let doc: Document = serde_json::from_str(&s).map_err(|e| {
                    HostgateError::Storage(format!("parse {} failed: {e}", path.display()))
                })?;
                doc.hosts.into_iter().map(|h| (h.id.clone(), h)).collect()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(HostgateError::Storage(format!(
                    "read {} failed: {e}",
                    path.display()
                )))
            }
        };

        tracing::debug!(path = %path.display(), hosts = hosts.len(), "json repository opened");
        Ok(Self { path, hosts: Mutex::new(hosts) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<HostId, HostPolicy>>> {
        // Poisoned mutex means a writer panicked mid-edit; refuse rather than
        // serve a half-applied table.
        self.hosts
            .lock()
            .map_err(|_| HostgateError::Storage("repository lock poisoned".into()))
    }

    fn flush(&self, hosts: &BTreeMap<HostId, HostPolicy>) -> Result<()> {
        let doc = Document { hosts: hosts.values().cloned().collect() };
        let body = serde_json::to_vec_pretty(&doc)
            .map_err(|e| HostgateError::Storage(format!("encode failed: {e}")))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, body)
            .and_then(|_| fs::rename(&tmp, &self.path))
            .map_err(|e| {
                HostgateError::Storage(format!("write {} failed: {e}", self.path.display()))
            })
    }

    fn edit(&self, id: &HostId, f: impl FnOnce(&mut HostPolicy) -> ListEdit) -> Result<ListEdit> {
        let mut hosts = self.lock()?;
        let Some(rec) = hosts.get_mut(id) else {
            return Ok(ListEdit::Missing);
        };

        let before = rec.clone();
        let outcome = f(rec);
        if outcome != ListEdit::Changed {
            return Ok(outcome);
        }

        if let Err(e) = self.flush(&hosts) {
            hosts.insert(id.clone(), before);
            return Err(e);
        }
        Ok(outcome)
    }
}

impl HostRepository for JsonFileRepository {
    fn insert_if_absent(&self, policy: HostPolicy) -> Result<bool> {
        let mut hosts = self.lock()?;
        if hosts.contains_key(&policy.id) {
            return Ok(false);
        }

        let id = policy.id.clone();
        hosts.insert(id.clone(), policy);
        if let Err(e) = self.flush(&hosts) {
            hosts.remove(&id);
            return Err(e);
        }
        Ok(true)
    }

    fn get(&self, id: &HostId) -> Result<Option<HostPolicy>> {
        Ok(self.lock()?.get(id).cloned())
    }

    fn contains(&self, id: &HostId) -> Result<bool> {
        Ok(self.lock()?.contains_key(id))
    }

    fn set_flag(&self, id: &HostId, flag: Flag, value: bool) -> Result<bool> {
        let outcome = self.edit(id, |p| {
            let before = p.clone();
            p.set_flag(flag, value);
            if *p == before {
                ListEdit::Unchanged
            } else {
                ListEdit::Changed
            }
        })?;
        Ok(outcome != ListEdit::Missing)
    }

    fn add_member(&self, id: &HostId, list: ListKind, member: &HostId) -> Result<ListEdit> {
        self.edit(id, |p| add_to(p, list, member))
    }

    fn remove_member(&self, id: &HostId, list: ListKind, member: &HostId) -> Result<ListEdit> {
        self.edit(id, |p| remove_from(p, list, member))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn id(s: &str) -> HostId {
        HostId::new(s).unwrap()
    }

    #[test]
    fn missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::open(dir.path().join("nested/hosts.json")).unwrap();
        assert!(repo.get(&id("a")).unwrap().is_none());
        assert!(!repo.path().exists());
    }

    #[test]
    fn mutations_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts.json");
        {
            let repo = JsonFileRepository::open(&path).unwrap();
            repo.insert_if_absent(HostPolicy::new(id("a"))).unwrap();
            repo.insert_if_absent(HostPolicy::new(id("b"))).unwrap();
            repo.add_member(&id("a"), ListKind::Friends, &id("b")).unwrap();
            repo.add_member(&id("a"), ListKind::Banlist, &id("b")).unwrap();
            repo.set_flag(&id("a"), Flag::AllowNonames, true).unwrap();
        }

        let repo = JsonFileRepository::open(&path).unwrap();
        let a = repo.get(&id("a")).unwrap().unwrap();
        assert!(a.allow_nonames);
        assert_eq!(a.friends, vec![id("b")]);
        assert_eq!(a.banlist, vec![id("b")]);
        assert!(repo.contains(&id("b")).unwrap());
    }

    #[test]
    fn corrupt_document_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(JsonFileRepository::open(&path), Err(HostgateError::Storage(_))));
    }

    #[test]
    fn failed_write_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts.json");
        let repo = JsonFileRepository::open(&path).unwrap();
        repo.insert_if_absent(HostPolicy::new(id("a"))).unwrap();
        repo.insert_if_absent(HostPolicy::new(id("b"))).unwrap();

        // the temp file cannot be written once its path is a directory
        fs::create_dir(dir.path().join("hosts.tmp")).unwrap();

        let err = repo.add_member(&id("a"), ListKind::Friends, &id("b")).unwrap_err();
        assert!(matches!(err, HostgateError::Storage(_)));
        assert!(repo.get(&id("a")).unwrap().unwrap().friends.is_empty());

        assert!(repo.set_flag(&id("a"), Flag::OnlyFriends, false).is_err());
        assert!(repo.get(&id("a")).unwrap().unwrap().only_friends);

        assert!(repo.insert_if_absent(HostPolicy::new(id("c"))).is_err());
        assert!(!repo.contains(&id("c")).unwrap());

        // unchanged edits never touch the disk
        let edit = repo.remove_member(&id("a"), ListKind::Banlist, &id("b")).unwrap();
        assert_eq!(edit, ListEdit::Unchanged);

        let on_disk = JsonFileRepository::open(&path).unwrap();
        assert_eq!(on_disk.get(&id("a")).unwrap(), repo.get(&id("a")).unwrap());
        assert!(!on_disk.contains(&id("c")).unwrap());
    }
}
