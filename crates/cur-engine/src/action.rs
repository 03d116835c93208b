//! Reviewer actions and the notices they can raise.

use std::collections::BTreeSet;

use cur_core::enums::{Axis, AxisAValue, AxisBValue, ReviewAction, Subcategory};

/// One reviewer action, applied to the session by the reducer.
///
/// Saving is not listed here: it performs I/O and is driven by
/// [`crate::ReviewSession::save`] instead of the pure reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Previous,
    Next,
    JumpTo(String),
    /// Fold a sentence fragment of the abstract into an axis's draft reason.
    SelectSentence { axis: Axis, sentence: String },
    SetAction { axis: Axis, action: ReviewAction },
    SetAxisAValue(AxisAValue),
    SetAxisBValue(AxisBValue),
    SetSubcategories(BTreeSet<Subcategory>),
    /// Replace an axis's draft reason with directly edited text. Does not
    /// touch the used-sentence set.
    EditReason { axis: Axis, text: String },
    ToggleProgressView,
}

/// Non-fatal conditions surfaced to the reviewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A `JumpTo` target was not in the dataset; the cursor did not move.
    JumpTargetMissing { record_id: String },
    /// A save at the last record completed; the cursor stays pinned there.
    ReviewComplete,
}
