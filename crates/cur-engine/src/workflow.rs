//! Classification workflow: projecting session state into a judgment.
//!
//! Pure aggregation, no I/O. Keep-original resolves to the record's
//! original value and reason byte-for-byte; change-classification takes
//! the draft. Subcategories reach the judgment only when the resolved
//! axis A value is `NonHuman`.

use chrono::{DateTime, Utc};
use cur_core::entities::{Judgment, Record};
use cur_core::enums::{AxisAValue, ReviewAction};

use crate::session::SessionState;

/// Assemble the judgment for the current record from session state.
#[must_use]
pub fn assemble_judgment(
    reviewer: &str,
    now: DateTime<Utc>,
    record: &Record,
    state: &SessionState,
) -> Judgment {
    let (axis_a_new_value, axis_a_new_reason) = match state.axis_a.action {
        ReviewAction::KeepOriginal => {
            (record.original_axis_a, record.original_axis_a_reason.clone())
        }
        ReviewAction::ChangeClassification => {
            (state.axis_a.new_value, state.axis_a.reason.clone())
        }
    };
    let (axis_b_new_value, axis_b_new_reason) = match state.axis_b.action {
        ReviewAction::KeepOriginal => {
            (record.original_axis_b, record.original_axis_b_reason.clone())
        }
        ReviewAction::ChangeClassification => {
            (state.axis_b.new_value, state.axis_b.reason.clone())
        }
    };

    let axis_a_subcategories = if axis_a_new_value == AxisAValue::NonHuman {
        Some(state.subcategories.clone())
    } else {
        None
    };

    Judgment {
        reviewer: reviewer.to_string(),
        timestamp: now,
        record_id: record.id.clone(),
        title: record.title.clone(),
        abstract_text: record.abstract_text.clone(),
        original_axis_a: record.original_axis_a,
        original_axis_a_reason: record.original_axis_a_reason.clone(),
        original_axis_b: record.original_axis_b,
        original_axis_b_reason: record.original_axis_b_reason.clone(),
        axis_a_action: state.axis_a.action,
        axis_a_new_value,
        axis_a_new_reason,
        axis_b_action: state.axis_b.action,
        axis_b_new_value,
        axis_b_new_reason,
        axis_a_subcategories,
    }
}
