//! Which overview metrics are shown, kept in step with the overview universe.

use campaign_core::config::SelectionConfig;
use campaign_core::Metric;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Selected overview metric ids.
///
/// `cleared` is set only when the user empties the selection on purpose
/// (clear all, or toggling off the last id). Any other empty selection is
/// auto-filled on the next reconcile; a cleared one only when
/// `auto_select_after_clear` is configured. `cleared` implies `ids` is empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricSelection {
    ids: BTreeSet<String>,
    #[serde(default)]
    cleared: bool,
}

impl MetricSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &BTreeSet<String> {
        &self.ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    /// Bring the selection in line with a freshly computed overview.
    pub fn reconcile(&self, overview: &[Metric], config: &SelectionConfig) -> Self {
        let auto_fill = self.ids.is_empty() && (!self.cleared || config.auto_select_after_clear);
        let ids = if auto_fill {
            overview.iter().map(|m| m.id.clone()).collect()
        } else {
            self.ids
                .iter()
                .filter(|id| overview.iter().any(|m| &m.id == *id))
                .cloned()
                .collect()
        };
        // Filtering that empties the selection leaves it auto-fillable.
        Self {
            ids,
            cleared: self.cleared && !auto_fill,
        }
    }

    /// Flip membership of `id`. Toggling off the last id counts as a clear.
    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
        self.cleared = self.ids.is_empty();
    }

    /// Select every overview id. Returns whether the selection changed.
    pub fn select_all(&mut self, overview: &[Metric]) -> bool {
        let ids: BTreeSet<String> = overview.iter().map(|m| m.id.clone()).collect();
        let changed = ids != self.ids || self.cleared;
        self.ids = ids;
        self.cleared = false;
        changed
    }

    /// Empty the selection on purpose. Returns whether the selection changed.
    pub fn clear_all(&mut self) -> bool {
        let changed = !self.ids.is_empty() || !self.cleared;
        self.ids.clear();
        self.cleared = true;
        changed
    }

    /// Overview metrics that are selected, in overview order.
    pub fn selected<'a>(&self, overview: &'a [Metric]) -> Vec<&'a Metric> {
        overview.iter().filter(|m| self.ids.contains(&m.id)).collect()
    }
}
