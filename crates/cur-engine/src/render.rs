//! Display payload derived per render.
//!
//! Nothing here is stored between actions: tagged sentences and progress
//! are recomputed from the session every time, so the display can never
//! drift from the state that produced it.

use std::collections::BTreeSet;

use cur_core::entities::Record;
use cur_core::enums::{AxisAValue, AxisBValue, ReviewAction, Subcategory};
use schemars::JsonSchema;
use serde::Serialize;

use crate::evidence::TaggedSentence;
use crate::progress::{ProgressCounts, ProgressDetail};

/// One axis's panel as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct AxisPanel<V> {
    pub action: ReviewAction,
    pub new_value: V,
    pub reason: String,
}

/// Everything the front end needs to draw the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct RenderPayload {
    pub index: usize,
    pub total: usize,
    pub record: Record,
    pub sentences: Vec<TaggedSentence>,
    pub axis_a: AxisPanel<AxisAValue>,
    pub axis_b: AxisPanel<AxisBValue>,
    pub subcategories: BTreeSet<Subcategory>,
    pub progress: ProgressCounts,
    /// Present only while the progress view is toggled open.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_detail: Option<ProgressDetail>,
}
