//! Classification enums for the two review axes.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! The same strings are used for ledger cells (`as_str()`); dataset sheets are
//! external, so their values go through the lenient `from_sheet_value` parsers
//! instead, defaulting to `Unclear` on anything unrecognized.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Axis
// ---------------------------------------------------------------------------

/// One of the two independent classification dimensions of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    HumanNonHuman,
    DatasetType,
}

impl Axis {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HumanNonHuman => "human_non_human",
            Self::DatasetType => "dataset_type",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AxisAValue — Human / Non-Human classification
// ---------------------------------------------------------------------------

/// Classification value on the Human/Non-Human axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AxisAValue {
    #[default]
    Human,
    NonHuman,
    Unclear,
}

impl AxisAValue {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::NonHuman => "non_human",
            Self::Unclear => "unclear",
        }
    }

    /// All values, in the order the reviewer is offered them.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Human, Self::NonHuman, Self::Unclear]
    }

    /// Lenient parse for externally-authored dataset cells.
    ///
    /// Case- and separator-insensitive (`"Non-Human"`, `"non_human"` and
    /// `"NonHuman"` all parse). Unrecognized or empty values degrade to
    /// `Unclear`, matching how records without an original classification
    /// are loaded.
    #[must_use]
    pub fn from_sheet_value(value: &str) -> Self {
        match normalize(value).as_str() {
            "human" => Self::Human,
            "nonhuman" => Self::NonHuman,
            _ => Self::Unclear,
        }
    }
}

impl FromStr for AxisAValue {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(Self::Human),
            "non_human" => Ok(Self::NonHuman),
            "unclear" => Ok(Self::Unclear),
            other => Err(CoreError::UnknownValue {
                field: "human/non-human classification",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for AxisAValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AxisBValue — Dataset Type classification
// ---------------------------------------------------------------------------

/// Classification value on the Dataset Type axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AxisBValue {
    #[default]
    Original,
    Used,
    Mixed,
    Unclear,
}

impl AxisBValue {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Used => "used",
            Self::Mixed => "mixed",
            Self::Unclear => "unclear",
        }
    }

    /// All values, in the order the reviewer is offered them.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Original, Self::Used, Self::Mixed, Self::Unclear]
    }

    /// Lenient parse for externally-authored dataset cells. See
    /// [`AxisAValue::from_sheet_value`].
    #[must_use]
    pub fn from_sheet_value(value: &str) -> Self {
        match normalize(value).as_str() {
            "original" => Self::Original,
            "used" => Self::Used,
            "mixed" => Self::Mixed,
            _ => Self::Unclear,
        }
    }
}

impl FromStr for AxisBValue {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "original" => Ok(Self::Original),
            "used" => Ok(Self::Used),
            "mixed" => Ok(Self::Mixed),
            "unclear" => Ok(Self::Unclear),
            other => Err(CoreError::UnknownValue {
                field: "dataset type classification",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for AxisBValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Subcategory — Non-Human subcategories (axis A only)
// ---------------------------------------------------------------------------

/// Non-Human subcategory, collected only when axis A is reclassified to
/// `NonHuman`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Subcategory {
    Plants,
    Environmental,
    Microbial,
    Animal,
}

impl Subcategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plants => "plants",
            Self::Environmental => "environmental",
            Self::Microbial => "microbial",
            Self::Animal => "animal",
        }
    }

    /// All subcategories, in the order the reviewer is offered them.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Plants, Self::Environmental, Self::Microbial, Self::Animal]
    }
}

impl FromStr for Subcategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plants" => Ok(Self::Plants),
            "environmental" => Ok(Self::Environmental),
            "microbial" => Ok(Self::Microbial),
            "animal" => Ok(Self::Animal),
            other => Err(CoreError::UnknownValue {
                field: "non-human subcategory",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Subcategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ReviewAction
// ---------------------------------------------------------------------------

/// Per-axis decision: keep the record's original classification or change it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    #[default]
    KeepOriginal,
    ChangeClassification,
}

impl ReviewAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::KeepOriginal => "keep_original",
            Self::ChangeClassification => "change_classification",
        }
    }
}

impl FromStr for ReviewAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keep_original" | "keep" => Ok(Self::KeepOriginal),
            "change_classification" | "change" => Ok(Self::ChangeClassification),
            other => Err(CoreError::UnknownValue {
                field: "review action",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase and strip separators so `"Non-Human"`, `"non human"` and
/// `"non_human"` compare equal.
fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
