//! Per-render inclusion state.
//!
//! Each (target, kind) pair goes `Pending -> Consumed` at most once per
//! render. A new render starts from a fresh state.

use indexmap::IndexSet;
use rustc_hash::FxHashSet;

use crate::asset::AssetKind;

/// Targets with files registered this render that were not included yet.
#[derive(Debug, Default, Clone)]
pub struct InclusionState {
    pending: [IndexSet<String>; 2],
    /// Already included; never pending again this render.
    consumed: [FxHashSet<String>; 2],
}

impl InclusionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a target as having unconsumed files.
    ///
    /// No-op when already pending or already consumed. Returns whether the
    /// target is pending afterwards.
    pub fn mark_pending(&mut self, kind: AssetKind, key: impl Into<String>) -> bool {
        let key = key.into();
        if self.consumed[kind.index()].contains(&key) {
            return false;
        }
        self.pending[kind.index()].insert(key);
        true
    }

    pub fn is_pending(&self, kind: AssetKind, key: &str) -> bool {
        self.pending[kind.index()].contains(key)
    }

    /// Consume a pending target. Returns false when it was not pending.
    pub fn take(&mut self, kind: AssetKind, key: &str) -> bool {
        let taken = self.pending[kind.index()].shift_remove(key);
        if taken {
            self.consumed[kind.index()].insert(key.to_string());
        }
        taken
    }


    /// Pending targets of a kind, in registration order.
    pub fn pending(&self, kind: AssetKind) -> Vec<String> {
        self.pending[kind.index()].iter().cloned().collect()
    }
}
