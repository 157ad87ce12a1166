// src/watch/reconcile.rs

//! Directory reconciliation.
//!
//! A cycle first computes a [`ReconcilePlan`] from an immutable snapshot of
//! the tracked set and the fresh listing, and only then applies it. The two
//! halves of the plan act on disjoint predicates ("listed but not tracked"
//! vs "tracked but not listed"), so the order of application does not
//! matter.

use std::collections::BTreeSet;

use tracing::debug;

use crate::engine::state::WatchState;
use crate::engine::{FileName, WatchEvent};
use crate::watch::patterns::ExtensionFilter;

/// Additions and removals for one cycle, each sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub added: Vec<FileName>,
    pub removed: Vec<FileName>,
}

impl ReconcilePlan {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Apply the plan to `state`, returning one event per change.
    ///
    /// Removals are applied (and reported) before additions.
    pub fn apply(self, state: &mut WatchState) -> Vec<WatchEvent> {
        let mut events = Vec::with_capacity(self.added.len() + self.removed.len());

        for file in self.removed {
            if state.untrack(&file).is_some() {
                events.push(WatchEvent::FileRemoved { file });
            }
        }

        for file in self.added {
            if state.track(file.clone()) {
                events.push(WatchEvent::FileAdded { file });
            }
        }

        events
    }
}

/// Compare `listing` against the tracked set.
///
/// - listed, untracked, extension-matching names are added;
/// - tracked names absent from the listing are removed;
/// - tracked names are never re-checked against `filter`.
///
/// An empty listing therefore removes every tracked file.
pub fn plan_reconcile(
    state: &WatchState,
    listing: &[FileName],
    filter: &ExtensionFilter,
) -> ReconcilePlan {
    let listed: BTreeSet<&str> = listing.iter().map(String::as_str).collect();

    let added: Vec<FileName> = listed
        .iter()
        .filter(|name| !state.contains(name) && filter.matches(name))
        .map(|name| name.to_string())
        .collect();

    let removed: Vec<FileName> = state
        .files()
        .filter(|name| !listed.contains(name))
        .map(str::to_string)
        .collect();

    debug!(
        listed = listed.len(),
        added = added.len(),
        removed = removed.len(),
        "reconcile plan computed"
    );

    ReconcilePlan { added, removed }
}
