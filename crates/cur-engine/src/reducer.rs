//! Pure session transition function.
//!
//! `apply` maps `(state, action)` to a new state plus any notices; it never
//! performs I/O. The central contract: every navigation transition clears
//! all drafts, so evidence selections and reason text never leak from one
//! record to the next.

use cur_core::entities::Record;
use cur_core::enums::{Axis, ReviewAction};

use crate::action::{Action, Notice};
use crate::evidence;
use crate::session::SessionState;

/// Apply one reviewer action.
#[must_use]
pub fn apply(
    state: &SessionState,
    dataset: &[Record],
    action: Action,
) -> (SessionState, Vec<Notice>) {
    let mut next = state.clone();
    let mut notices = Vec::new();

    match action {
        Action::Previous => {
            next.index = next.index.saturating_sub(1);
            next.clear_drafts();
        }
        Action::Next => {
            next.index = (next.index + 1).min(dataset.len().saturating_sub(1));
            next.clear_drafts();
        }
        Action::JumpTo(record_id) => {
            match dataset.iter().position(|r| r.id == record_id) {
                Some(found) => {
                    next.index = found;
                    next.clear_drafts();
                }
                None => notices.push(Notice::JumpTargetMissing { record_id }),
            }
        }
        Action::SelectSentence { axis, sentence } => match axis {
            Axis::HumanNonHuman => evidence::add_sentence(&mut next.axis_a, &sentence),
            Axis::DatasetType => evidence::add_sentence(&mut next.axis_b, &sentence),
        },
        Action::SetAction { axis, action } => match action {
            // Switching back to the original discards that axis's draft.
            ReviewAction::KeepOriginal => next.clear_axis(axis),
            ReviewAction::ChangeClassification => match axis {
                Axis::HumanNonHuman => next.axis_a.action = action,
                Axis::DatasetType => next.axis_b.action = action,
            },
        },
        Action::SetAxisAValue(value) => next.axis_a.new_value = value,
        Action::SetAxisBValue(value) => next.axis_b.new_value = value,
        Action::SetSubcategories(subcategories) => next.subcategories = subcategories,
        Action::EditReason { axis, text } => match axis {
            Axis::HumanNonHuman => next.axis_a.reason = text,
            Axis::DatasetType => next.axis_b.reason = text,
        },
        Action::ToggleProgressView => next.show_progress = !next.show_progress,
    }

    (next, notices)
}

/// Post-save cursor advance. Capped at the last record; a save there pins
/// the cursor and reports review-complete.
#[must_use]
pub fn advance_after_save(state: &SessionState, dataset: &[Record]) -> (SessionState, Vec<Notice>) {
    let mut next = state.clone();
    let mut notices = Vec::new();

    let last = dataset.len().saturating_sub(1);
    if next.index < last {
        next.index += 1;
    } else {
        notices.push(Notice::ReviewComplete);
    }
    next.clear_drafts();

    (next, notices)
}
