//! Entity structs for Curator.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AxisAValue, AxisBValue, ReviewAction, Subcategory};

/// One reviewable unit of literature metadata.
///
/// Immutable once loaded; the dataset's order defines the navigation index
/// and must stay stable for the duration of a session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Record {
    /// Natural key, unique and stable across sessions.
    pub id: String,
    pub title: String,
    pub abstract_text: String,
    pub original_axis_a: AxisAValue,
    pub original_axis_a_reason: String,
    pub original_axis_b: AxisBValue,
    pub original_axis_b_reason: String,
}

/// One reviewer's finalized decision about one record.
///
/// Created exactly once per save action and immutable thereafter. The
/// original-axis fields are a snapshot copied at judgment time, never
/// re-fetched later.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Judgment {
    pub reviewer: String,
    pub timestamp: DateTime<Utc>,
    pub record_id: String,
    pub title: String,
    pub abstract_text: String,
    pub original_axis_a: AxisAValue,
    pub original_axis_a_reason: String,
    pub original_axis_b: AxisBValue,
    pub original_axis_b_reason: String,
    pub axis_a_action: ReviewAction,
    pub axis_a_new_value: AxisAValue,
    pub axis_a_new_reason: String,
    pub axis_b_action: ReviewAction,
    pub axis_b_new_value: AxisBValue,
    pub axis_b_new_reason: String,
    /// Present if and only if `axis_a_new_value` is `NonHuman`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis_a_subcategories: Option<BTreeSet<Subcategory>>,
}
