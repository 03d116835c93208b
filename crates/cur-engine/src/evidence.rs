//! Evidence selection over sentence fragments of the abstract.
//!
//! The reviewer builds a justification by picking split sentences; each
//! pick is idempotent. For display, every fragment carries exactly one
//! presentation tag, resolved in a fixed priority order.

use cur_core::entities::Record;
use cur_core::sentences::split_sentences;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::session::{AxisDraft, SessionState};

/// Presentation state of one displayed sentence. Mutually exclusive;
/// earlier variants win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SentenceTag {
    /// In either axis's used-sentence set.
    SelectedForNewReason,
    /// Equals axis A's original reason, case-insensitively, as a whole
    /// sentence. Substring containment does not count.
    MatchesOriginalAxisAReason,
    MatchesOriginalAxisBReason,
    Plain,
}

/// One abstract fragment with its resolved tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaggedSentence {
    pub text: String,
    pub tag: SentenceTag,
}

/// Fold a sentence into an axis draft.
///
/// No-op when the sentence is already in the used-set; otherwise it is
/// inserted and appended to the draft reason, newline-joined.
pub fn add_sentence<V>(draft: &mut AxisDraft<V>, sentence: &str) {
    if !draft.used_sentences.insert(sentence.to_string()) {
        return;
    }
    if draft.reason.is_empty() {
        draft.reason = sentence.to_string();
    } else {
        draft.reason.push('\n');
        draft.reason.push_str(sentence);
    }
}

/// Split the current record's abstract and tag every fragment.
#[must_use]
pub fn tagged_sentences(record: &Record, state: &SessionState) -> Vec<TaggedSentence> {
    split_sentences(&record.abstract_text)
        .into_iter()
        .map(|text| {
            let tag = tag_for(&text, record, state);
            TaggedSentence { text, tag }
        })
        .collect()
}

fn tag_for(sentence: &str, record: &Record, state: &SessionState) -> SentenceTag {
    if state.axis_a.used_sentences.contains(sentence)
        || state.axis_b.used_sentences.contains(sentence)
    {
        SentenceTag::SelectedForNewReason
    } else if matches_reason(sentence, &record.original_axis_a_reason) {
        SentenceTag::MatchesOriginalAxisAReason
    } else if matches_reason(sentence, &record.original_axis_b_reason) {
        SentenceTag::MatchesOriginalAxisBReason
    } else {
        SentenceTag::Plain
    }
}

fn matches_reason(sentence: &str, reason: &str) -> bool {
    let reason = reason.trim();
    !reason.is_empty() && sentence.to_lowercase() == reason.to_lowercase()
}

#[cfg(test)]
mod tests {
    use cur_core::enums::{AxisAValue, AxisBValue};
    use pretty_assertions::assert_eq;

    use super::*;

    fn record() -> Record {
        Record {
            id: "pm1".into(),
            title: "Title".into(),
            abstract_text: "Mice were dosed. Serum was sampled. Data were public.".into(),
            original_axis_a: AxisAValue::NonHuman,
            original_axis_a_reason: "Mice were dosed.".into(),
            original_axis_b: AxisBValue::Used,
            original_axis_b_reason: "data were public.".into(),
        }
    }

    #[test]
    fn add_sentence_is_idempotent_and_newline_joins() {
        let mut draft: AxisDraft<AxisAValue> = AxisDraft::default();
        add_sentence(&mut draft, "First.");
        add_sentence(&mut draft, "Second.");
        add_sentence(&mut draft, "First.");

        assert_eq!(draft.reason, "First.\nSecond.");
        assert_eq!(draft.used_sentences.len(), 2);
    }

    #[test]
    fn selection_outranks_original_reason_match() {
        let record = record();
        let mut state = SessionState::default();
        state.axis_a.used_sentences.insert("Mice were dosed.".into());

        let tags: Vec<SentenceTag> = tagged_sentences(&record, &state)
            .into_iter()
            .map(|s| s.tag)
            .collect();
        assert_eq!(
            tags,
            vec![
                SentenceTag::SelectedForNewReason,
                SentenceTag::Plain,
                SentenceTag::MatchesOriginalAxisBReason,
            ]
        );
    }

    #[test]
    fn original_reason_match_is_case_insensitive_whole_sentence() {
        let record = record();
        let state = SessionState::default();

        let tagged = tagged_sentences(&record, &state);
        assert_eq!(tagged[0].tag, SentenceTag::MatchesOriginalAxisAReason);
        // "Serum was sampled." is not any reason, even though the axis B
        // reason is a substring-free different sentence.
        assert_eq!(tagged[1].tag, SentenceTag::Plain);
        assert_eq!(tagged[2].tag, SentenceTag::MatchesOriginalAxisBReason);
    }

    #[test]
    fn empty_original_reason_never_matches() {
        let mut record = record();
        record.original_axis_a_reason = "  ".into();
        let state = SessionState::default();

        let tagged = tagged_sentences(&record, &state);
        assert_eq!(tagged[0].tag, SentenceTag::Plain);
    }
}
