//! Transient per-record editing state.
//!
//! Session state is process-local and never persisted; it exists only to
//! assemble the next judgment. Every navigation transition clears the
//! drafts, so selections and reason text are scoped to exactly one
//! displayed record.

use std::collections::BTreeSet;

use cur_core::enums::{Axis, AxisAValue, AxisBValue, ReviewAction, Subcategory};

/// Draft decision for one classification axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisDraft<V> {
    pub action: ReviewAction,
    pub new_value: V,
    /// Sentences already folded into `reason`, keyed by exact text.
    pub used_sentences: BTreeSet<String>,
    pub reason: String,
}

impl<V: Default> Default for AxisDraft<V> {
    fn default() -> Self {
        Self {
            action: ReviewAction::default(),
            new_value: V::default(),
            used_sentences: BTreeSet::new(),
            reason: String::new(),
        }
    }
}

/// Editing state for the currently displayed record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Cursor into the dataset, `0 <= index < N`.
    pub index: usize,
    /// Whether the progress detail view is open. Survives draft clears.
    pub show_progress: bool,
    pub axis_a: AxisDraft<AxisAValue>,
    pub axis_b: AxisDraft<AxisBValue>,
    /// Draft subcategory selection. Only reaches the judgment when the
    /// axis A decision resolves to `NonHuman`.
    pub subcategories: BTreeSet<Subcategory>,
}

impl SessionState {
    /// Reset everything scoped to the displayed record, keeping the cursor
    /// and the progress view toggle.
    pub fn clear_drafts(&mut self) {
        self.axis_a = AxisDraft::default();
        self.axis_b = AxisDraft::default();
        self.subcategories.clear();
    }

    /// Discard one axis's draft, as when the reviewer switches back to
    /// keeping the original classification.
    pub fn clear_axis(&mut self, axis: Axis) {
        match axis {
            Axis::HumanNonHuman => self.axis_a = AxisDraft::default(),
            Axis::DatasetType => self.axis_b = AxisDraft::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn clear_drafts_keeps_cursor_and_progress_toggle() {
        let mut state = SessionState {
            index: 3,
            show_progress: true,
            ..SessionState::default()
        };
        state.axis_a.reason = "draft".into();
        state.axis_a.used_sentences.insert("A sentence.".into());
        state.subcategories.insert(Subcategory::Animal);

        state.clear_drafts();

        assert_eq!(state.index, 3);
        assert!(state.show_progress);
        assert_eq!(state.axis_a, AxisDraft::default());
        assert!(state.subcategories.is_empty());
    }

    #[test]
    fn clear_axis_leaves_the_other_axis_alone() {
        let mut state = SessionState::default();
        state.axis_a.reason = "a".into();
        state.axis_b.reason = "b".into();

        state.clear_axis(Axis::HumanNonHuman);

        assert!(state.axis_a.reason.is_empty());
        assert_eq!(state.axis_b.reason, "b");
    }
}
