//! The control registry: a persistent mapping from identity to record.
//!
//! Records are created on first lookup and survive for the process lifetime
//! (or until the host runs an explicit stale sweep). The registry is the
//! exclusive owner of all records; every other component borrows per call,
//! keyed by [`ControlId`], so no cross-call references exist to invalidate.

use glint_core::alloc::RandomState;
use indexmap::IndexMap;

use crate::control::{ControlFlags, ControlKind, ControlRecord};
use crate::id::ControlId;

/// Persistent identity → record map.
///
/// Uses an ordered map so per-frame iteration (sibling occlusion checks,
/// stale sweeps) is deterministic across runs.
#[derive(Debug, Default)]
pub struct ControlRegistry {
    records: IndexMap<ControlId, ControlRecord, RandomState>,
}

impl ControlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a record, inserting a fresh one parented to `parent` if
    /// absent. Every lookup bumps the saturating update counter and stamps
    /// the record with the current frame (lazily resetting per-frame
    /// fields).
    pub fn create_or_get(
        &mut self,
        id: ControlId,
        kind: ControlKind,
        parent: ControlId,
        frame: u64,
    ) -> &mut ControlRecord {
        let record = self
            .records
            .entry(id)
            .or_insert_with(|| ControlRecord::new(id, kind, parent));
        record.touch(frame);
        record
    }

    pub fn get(&self, id: ControlId) -> Option<&ControlRecord> {
        if id.is_none() {
            return None;
        }
        self.records.get(&id)
    }

    pub fn get_mut(&mut self, id: ControlId) -> Option<&mut ControlRecord> {
        if id.is_none() {
            return None;
        }
        self.records.get_mut(&id)
    }

    pub fn contains(&self, id: ControlId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ControlRecord> {
        self.records.values()
    }

    /// Whether `id` lies in the subtree rooted at `root` (inclusive).
    ///
    /// An iterative parent-chain walk bounded by the root sentinel; the
    /// parent relation is a tree, but the walk is additionally bounded by
    /// the registry size as a guard against a corrupted chain.
    pub fn in_subtree(&self, root: ControlId, id: ControlId) -> bool {
        if root.is_none() || id.is_none() {
            return false;
        }
        let mut current = id;
        let mut remaining = self.records.len();
        while current.is_some() && remaining > 0 {
            if current == root {
                return true;
            }
            current = match self.get(current) {
                Some(record) => record.parent,
                None => return false,
            };
            remaining -= 1;
        }
        false
    }

    /// Nearest ancestor of `id` (inclusive) carrying the FOCUSABLE flag,
    /// or NONE.
    pub fn closest_focusable_ancestor(&self, id: ControlId) -> ControlId {
        let mut current = id;
        let mut remaining = self.records.len();
        while current.is_some() && remaining > 0 {
            let Some(record) = self.get(current) else {
                return ControlId::NONE;
            };
            if record.flags.contains(ControlFlags::FOCUSABLE) {
                return current;
            }
            current = record.parent;
            remaining -= 1;
        }
        ControlId::NONE
    }

    /// Root window (topmost Window-kind ancestor, inclusive) of a control,
    /// or NONE if it has no window in its chain.
    pub fn owning_window(&self, id: ControlId) -> ControlId {
        let mut current = id;
        let mut found = ControlId::NONE;
        let mut remaining = self.records.len();
        while current.is_some() && remaining > 0 {
            let Some(record) = self.get(current) else {
                break;
            };
            if record.kind == ControlKind::Window {
                found = current;
            }
            current = record.parent;
            remaining -= 1;
        }
        found
    }

    /// Remove records not looked up for `max_age` frames.
    ///
    /// `exempt` lets the caller protect records that must outlive a gap in
    /// lookups (dock members, singleton slot holders). Returns the number
    /// of records removed.
    pub fn sweep_stale<F>(&mut self, current_frame: u64, max_age: u64, exempt: F) -> usize
    where
        F: Fn(&ControlRecord) -> bool,
    {
        let before = self.records.len();
        self.records
            .retain(|_, record| current_frame.saturating_sub(record.last_frame) <= max_age || exempt(record));
        before - self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (ControlId, ControlId, ControlId) {
        let w = ControlId::new("win", ControlKind::Window, "");
        let p = ControlId::new("panel", ControlKind::ListView, "win");
        let b = ControlId::new("ok", ControlKind::Button, "win");
        (w, p, b)
    }

    #[test]
    fn create_or_get_returns_same_record() {
        let (w, ..) = ids();
        let mut reg = ControlRegistry::new();
        reg.create_or_get(w, ControlKind::Window, ControlId::NONE, 1);
        let first_len = reg.len();
        reg.create_or_get(w, ControlKind::Window, ControlId::NONE, 1);
        assert_eq!(reg.len(), first_len);
        assert_eq!(reg.get(w).unwrap().updates, 2);
    }

    #[test]
    fn subtree_walk_is_inclusive_and_bounded() {
        let (w, p, b) = ids();
        let mut reg = ControlRegistry::new();
        reg.create_or_get(w, ControlKind::Window, ControlId::NONE, 1);
        reg.create_or_get(p, ControlKind::ListView, w, 1);
        reg.create_or_get(b, ControlKind::Button, p, 1);

        assert!(reg.in_subtree(w, b));
        assert!(reg.in_subtree(w, w));
        assert!(!reg.in_subtree(b, w));
        assert!(!reg.in_subtree(ControlId::NONE, b));
    }

    #[test]
    fn closest_focusable_ancestor_walks_up() {
        let (w, p, b) = ids();
        let mut reg = ControlRegistry::new();
        reg.create_or_get(w, ControlKind::Window, ControlId::NONE, 1)
            .flags |= ControlFlags::FOCUSABLE;
        reg.create_or_get(p, ControlKind::ListView, w, 1);
        reg.create_or_get(b, ControlKind::Button, p, 1);

        assert_eq!(reg.closest_focusable_ancestor(b), w);
        assert_eq!(reg.closest_focusable_ancestor(w), w);
    }

    #[test]
    fn sweep_respects_exemptions() {
        let (w, p, _) = ids();
        let mut reg = ControlRegistry::new();
        reg.create_or_get(w, ControlKind::Window, ControlId::NONE, 1);
        reg.create_or_get(p, ControlKind::ListView, w, 1);
        // Only w is touched afterwards.
        for frame in 2..=10 {
            reg.create_or_get(w, ControlKind::Window, ControlId::NONE, frame);
        }
        let removed = reg.sweep_stale(10, 3, |_| false);
        assert_eq!(removed, 1);
        assert!(reg.contains(w));
        assert!(!reg.contains(p));
    }
}
